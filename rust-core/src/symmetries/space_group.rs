use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::clusters::{Cluster, ClusterKey};
use crate::error::CvmError;
use crate::lattice::LatticeBasis;
use crate::symmetries::symmetry_operations::SymmetryOperation;
use crate::Result;

/// Space group of a phase: coset representatives, lattice translations and the
/// Wyckoff sites of each sublattice inside one primitive cell.
///
/// Two clusters are equivalent under the group if an operation maps one onto a lattice
/// translate of the other. Comparison is done through [`SpaceGroup::canonical_key`],
/// which removes the translation freedom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceGroup {
    name: String,
    operations: Vec<SymmetryOperation>,
    lattice: LatticeBasis,
    sublattices: Vec<Vec<Vector3<f64>>>,
}

impl SpaceGroup {
    pub fn new(
        name: impl Into<String>,
        operations: Vec<SymmetryOperation>,
        lattice: LatticeBasis,
        sublattices: Vec<Vec<Vector3<f64>>>,
    ) -> Result<Self> {
        let name = name.into();
        if operations.is_empty() {
            return Err(CvmError::invalid(format!(
                "space group '{}' has no symmetry operations",
                name
            )));
        }
        if !operations.iter().any(SymmetryOperation::is_identity) {
            return Err(CvmError::invalid(format!(
                "space group '{}' does not contain the identity",
                name
            )));
        }
        if sublattices.is_empty() || sublattices.iter().any(|s| s.is_empty()) {
            return Err(CvmError::invalid(format!(
                "space group '{}' needs at least one site on every sublattice",
                name
            )));
        }

        Ok(Self {
            name,
            operations,
            lattice,
            sublattices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &[SymmetryOperation] {
        &self.operations
    }

    pub fn lattice(&self) -> &LatticeBasis {
        &self.lattice
    }

    pub fn num_sublattices(&self) -> usize {
        self.sublattices.len()
    }

    /// Number of lattice sites per primitive cell, over all sublattices.
    pub fn sites_per_cell(&self) -> usize {
        self.sublattices.iter().map(Vec::len).sum()
    }

    /// Sublattice whose Wyckoff sites differ from `position` by a lattice vector.
    pub fn sublattice_of(&self, position: &Vector3<f64>) -> Option<usize> {
        self.sublattices.iter().position(|sites| {
            sites
                .iter()
                .any(|site| self.lattice.is_lattice_vector(&(position - site)))
        })
    }

    /// Translate `cluster` so its lexicographically smallest site lies in the home cell,
    /// with the sites of each sublattice sorted.
    pub fn canonical_form(&self, cluster: &Cluster) -> Cluster {
        let anchor = cluster
            .sites()
            .map(|(_, site)| site)
            .min_by_key(|site| site.key());
        let mut form = match anchor {
            Some(site) => cluster.translated(&-self.lattice.home_cell_translation(&site.position)),
            None => cluster.clone(),
        };
        form.sort_sites();
        form
    }

    /// Translation-invariant key of a cluster.
    pub fn canonical_key(&self, cluster: &Cluster) -> ClusterKey {
        ClusterKey::of(&self.canonical_form(cluster))
    }

    /// Orbit of `cluster` modulo lattice translations, keyed and ordered by canonical key.
    pub fn orbit(&self, cluster: &Cluster) -> BTreeMap<ClusterKey, Cluster> {
        let mut orbit = BTreeMap::new();
        for op in &self.operations {
            let form = self.canonical_form(&op.apply_to_cluster(cluster));
            orbit.entry(ClusterKey::of(&form)).or_insert(form);
        }
        orbit
    }
}

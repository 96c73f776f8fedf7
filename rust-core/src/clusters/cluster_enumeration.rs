use std::collections::HashMap;

use log::debug;

use crate::clusters::cluster_types::{Cluster, ClusterKey};
use crate::error::CvmError;
use crate::interfaces::DecorationBasis;
use crate::symmetries::SpaceGroup;
use crate::Result;

/// One symmetry-distinct (decorated) cluster.
#[derive(Debug, Clone)]
pub struct ClusterType {
    /// Sub-cluster of a maximal cluster, in the phase's own frame
    pub representative: Cluster,
    /// Every equivalent cluster modulo lattice translations, in canonical form
    pub orbit: Vec<Cluster>,
    /// Clusters of this type per lattice site
    pub multiplicity: f64,
    /// Sites of the representative on each sublattice
    pub site_counts: Vec<usize>,
}

impl ClusterType {
    pub fn num_sites(&self) -> usize {
        self.site_counts.iter().sum()
    }
}

/// Symmetry-distinct sub-clusters of a set of maximal clusters.
///
/// Types are sorted by descending site count; index 0 is a maximal cluster and the last
/// entry is the empty cluster, preceded by the point cluster(s).
#[derive(Debug, Clone)]
pub struct ClusterTypeSet {
    types: Vec<ClusterType>,
    membership: HashMap<ClusterKey, usize>,
    basis: DecorationBasis,
}

impl ClusterTypeSet {
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of types excluding the empty cluster.
    pub fn non_empty_len(&self) -> usize {
        self.types.iter().filter(|t| t.num_sites() > 0).count()
    }

    pub fn types(&self) -> &[ClusterType] {
        &self.types
    }

    pub fn get(&self, index: usize) -> Option<&ClusterType> {
        self.types.get(index)
    }

    pub fn basis(&self) -> DecorationBasis {
        self.basis
    }

    pub fn multiplicities(&self) -> Vec<f64> {
        self.types.iter().map(|t| t.multiplicity).collect()
    }

    /// Type whose orbit contains the cluster with this canonical key.
    pub fn type_of(&self, key: &ClusterKey) -> Option<usize> {
        self.membership.get(key).copied()
    }
}

/// Enumerate the symmetry-distinct decorated sub-clusters of `maximal` under `group`.
///
/// Candidates are visited by descending size, then maximal cluster, then site subset in
/// lexicographic order, then decoration in lexicographic order. The first candidate of
/// each equivalence class becomes its representative.
pub fn enumerate_cluster_types(
    maximal: &[Cluster],
    group: &SpaceGroup,
    basis: &DecorationBasis,
) -> Result<ClusterTypeSet> {
    if maximal.is_empty() {
        return Err(CvmError::invalid("no maximal clusters to enumerate"));
    }
    if let Some(bad) = maximal
        .iter()
        .find(|c| c.num_sublattices() != group.num_sublattices())
    {
        return Err(CvmError::dimension(
            format!("sublattices of maximal cluster in group '{}'", group.name()),
            group.num_sublattices(),
            bad.num_sublattices(),
        ));
    }

    let symbols = basis.symbols();
    let sites_per_cell = group.sites_per_cell() as f64;
    let max_size = maximal.iter().map(Cluster::num_sites).max().unwrap_or(0);

    let mut types: Vec<ClusterType> = Vec::new();
    let mut membership: HashMap<ClusterKey, usize> = HashMap::new();

    for size in (0..=max_size).rev() {
        let decorations = cartesian_power(size, symbols.len());
        for cluster in maximal {
            if cluster.num_sites() < size {
                continue;
            }
            for subset in combinations(cluster.num_sites(), size) {
                for assignment in &decorations {
                    let labels: Vec<Option<usize>> =
                        assignment.iter().map(|&d| symbols[d]).collect();
                    let candidate = cluster.decorated_subcluster(&subset, &labels);
                    if membership.contains_key(&group.canonical_key(&candidate)) {
                        continue;
                    }

                    let index = types.len();
                    let orbit = group.orbit(&candidate);
                    for key in orbit.keys() {
                        if let Some(previous) = membership.insert(key.clone(), index) {
                            return Err(CvmError::inconsistent(format!(
                                "orbit of cluster type {} overlaps cluster type {}",
                                index, previous
                            )));
                        }
                    }

                    // The empty cluster occurs once per lattice site in every phase
                    let multiplicity = if size == 0 {
                        1.0
                    } else {
                        orbit.len() as f64 / sites_per_cell
                    };
                    types.push(ClusterType {
                        site_counts: candidate.site_counts(),
                        multiplicity,
                        orbit: orbit.into_values().collect(),
                        representative: candidate,
                    });
                }
            }
        }
    }

    debug!(
        "group '{}': {} cluster types from {} maximal clusters ({:?} basis)",
        group.name(),
        types.len(),
        maximal.len(),
        basis
    );

    Ok(ClusterTypeSet {
        types,
        membership,
        basis: *basis,
    })
}

/// All `k`-element subsets of `0..n` in lexicographic order.
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        result.push(current.clone());
        // Rightmost index that can still advance
        let mut i = k;
        while i > 0 && current[i - 1] == n - k + i - 1 {
            i -= 1;
        }
        if i == 0 {
            return result;
        }
        current[i - 1] += 1;
        for j in i..k {
            current[j] = current[j - 1] + 1;
        }
    }
}

/// All length-`len` tuples over `0..radix` in lexicographic order.
pub(crate) fn cartesian_power(len: usize, radix: usize) -> Vec<Vec<usize>> {
    let mut result = vec![Vec::with_capacity(len)];
    for _ in 0..len {
        result = result
            .into_iter()
            .flat_map(|prefix| {
                (0..radix).map(move |d| {
                    let mut next = prefix.clone();
                    next.push(d);
                    next
                })
            })
            .collect();
    }
    result
}

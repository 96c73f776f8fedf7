// Constants and run configuration

use serde::{Deserialize, Serialize};

use crate::clusters::{Cluster, FrameTransform};
use crate::error::CvmError;
use crate::symmetries::SpaceGroup;
use crate::Result;

// Tolerances
pub const GEOMETRY_TOLERANCE: f64 = 1e-8; // For lattice-vector tests and home-cell reduction
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // For construction of lattice bases
pub const POSITION_KEY_SCALE: f64 = 1e6; // Quantisation of coordinates for hashing
pub const PIVOT_TOLERANCE: f64 = 1e-12; // Gaussian elimination, relative to the largest entry
pub const COMPOSITION_TOLERANCE: f64 = 1e-8; // Mole fractions must sum to one within this
pub const ROW_MERGE_SCALE: f64 = 1e9; // Quantisation of C-matrix rows before merging

// Free energy
pub const ENTROPY_SMOOTHING_THRESHOLD: f64 = 1e-6; // Below this p*ln(p) is replaced by its Taylor expansion

/// One crystallographic phase: its maximal clusters and its space group.
///
/// The maximal clusters are given in the phase's own coordinate frame, with one
/// [`crate::clusters::Sublattice`] per sublattice of the space group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseDefinition {
    pub name: String,
    pub maximal_clusters: Vec<Cluster>,
    pub space_group: SpaceGroup,
}

impl PhaseDefinition {
    pub fn new(
        name: impl Into<String>,
        maximal_clusters: Vec<Cluster>,
        space_group: SpaceGroup,
    ) -> Result<Self> {
        let name = name.into();
        if maximal_clusters.is_empty() {
            return Err(CvmError::invalid(format!(
                "phase '{}' has no maximal clusters",
                name
            )));
        }

        for (c, cluster) in maximal_clusters.iter().enumerate() {
            if cluster.num_sites() == 0 {
                return Err(CvmError::invalid(format!(
                    "maximal cluster {} of phase '{}' is empty",
                    c, name
                )));
            }
            if cluster.num_sublattices() != space_group.num_sublattices() {
                return Err(CvmError::dimension(
                    format!("sublattices of maximal cluster {} in phase '{}'", c, name),
                    space_group.num_sublattices(),
                    cluster.num_sublattices(),
                ));
            }
            // Every site must sit on the sublattice it is listed under
            for (s, site) in cluster.sites() {
                if space_group.sublattice_of(&site.position) != Some(s) {
                    return Err(CvmError::invalid(format!(
                        "site {:?} of maximal cluster {} in phase '{}' is not on sublattice {}",
                        site.position.as_slice(),
                        c,
                        name,
                        s
                    )));
                }
            }
        }

        Ok(Self {
            name,
            maximal_clusters,
            space_group,
        })
    }
}

/// Inputs of the identification pipeline.
///
/// Identification results are pure functions of this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvmConfig {
    reference: PhaseDefinition,
    ordered: PhaseDefinition,
    transform: FrameTransform,
    components: usize,
}

impl CvmConfig {
    /// Validated constructor.
    ///
    /// `transform` maps ordered-phase coordinates into the reference frame.
    pub fn new(
        reference: PhaseDefinition,
        ordered: PhaseDefinition,
        transform: FrameTransform,
        components: usize,
    ) -> Result<Self> {
        if components < 2 {
            return Err(CvmError::invalid(format!(
                "component count must be at least 2, got {}",
                components
            )));
        }
        if transform.rotation.determinant().abs() < BASE_VECTOR_TOLERANCE {
            return Err(CvmError::invalid(
                "ordered-to-reference transformation matrix is singular",
            ));
        }

        Ok(Self {
            reference,
            ordered,
            transform,
            components,
        })
    }

    /// Configuration for a phase that is its own reference.
    pub fn disordered(phase: PhaseDefinition, components: usize) -> Result<Self> {
        Self::new(phase.clone(), phase, FrameTransform::identity(), components)
    }

    pub fn reference(&self) -> &PhaseDefinition {
        &self.reference
    }

    pub fn ordered(&self) -> &PhaseDefinition {
        &self.ordered
    }

    pub fn transform(&self) -> &FrameTransform {
        &self.transform
    }

    pub fn components(&self) -> usize {
        self.components
    }
}

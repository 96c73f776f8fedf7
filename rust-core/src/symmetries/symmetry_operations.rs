use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::clusters::{Cluster, Site, Sublattice};
use crate::config::GEOMETRY_TOLERANCE;
use crate::error::CvmError;
use crate::Result;

/// Upper bound for the order of a crystallographic linear part.
const MAX_ORDER: usize = 12;

/// A single symmetry operation: linear part (rotation or rotoinversion) + translation.
///
/// Acts on cartesian coordinates as `x ↦ R·x + t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryOperation {
    /// Linear part with determinant ±1
    pub rotation: Matrix3<f64>,
    /// Translation shift
    pub translation: Vector3<f64>,
}

impl SymmetryOperation {
    /// Create a new symmetry operation
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create identity operation
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Apply symmetry operation to a point
    pub fn apply(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * point + self.translation
    }

    /// Apply the operation to every site of a cluster.
    ///
    /// Sublattice membership and decorations are carried over unchanged; the operations
    /// of a space group map each sublattice onto itself.
    pub fn apply_to_cluster(&self, cluster: &Cluster) -> Cluster {
        Cluster::new(
            cluster
                .sublattices
                .iter()
                .map(|sublattice| Sublattice {
                    sites: sublattice
                        .sites
                        .iter()
                        .map(|site| Site {
                            position: self.apply(&site.position),
                            decoration: site.decoration,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    pub fn inverse(&self) -> Result<Self> {
        let inv = self
            .rotation
            .try_inverse()
            .ok_or_else(|| CvmError::invalid("symmetry operation has a singular linear part"))?;
        Ok(Self {
            rotation: inv,
            translation: -(inv * self.translation),
        })
    }

    /// Order of the linear part (smallest n with Rⁿ = 1), or `None` if it exceeds 12.
    pub fn order(&self) -> Option<usize> {
        let identity = Matrix3::identity();
        let mut power = self.rotation;
        for n in 1..=MAX_ORDER {
            if (power - identity).amax() < GEOMETRY_TOLERANCE {
                return Some(n);
            }
            power *= self.rotation;
        }
        None
    }

    /// Check if this is the identity operation
    pub fn is_identity(&self) -> bool {
        (self.rotation - Matrix3::identity()).amax() < GEOMETRY_TOLERANCE
            && self.translation.norm() < GEOMETRY_TOLERANCE
    }
}

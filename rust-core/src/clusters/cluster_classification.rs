use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::clusters::cluster_enumeration::ClusterTypeSet;
use crate::clusters::cluster_types::{Cluster, Site};
use crate::config::GEOMETRY_TOLERANCE;
use crate::error::CvmError;
use crate::symmetries::SpaceGroup;
use crate::Result;

/// Affine map from ordered-phase coordinates into the reference frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTransform {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl FrameTransform {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Used when the ordered phase is the reference itself.
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    pub fn is_identity(&self) -> bool {
        (self.rotation - Matrix3::identity()).amax() < GEOMETRY_TOLERANCE
            && self.translation.norm() < GEOMETRY_TOLERANCE
    }

    pub fn apply(&self, position: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * position + self.translation
    }

    /// Map an ordered-phase cluster into the reference frame and regroup its sites by
    /// reference sublattice. Decorations are kept.
    pub fn to_reference(&self, cluster: &Cluster, reference: &SpaceGroup) -> Result<Cluster> {
        let mut sites = Vec::with_capacity(cluster.num_sites());
        for (_, site) in cluster.sites() {
            let position = self.apply(&site.position);
            let sublattice = reference.sublattice_of(&position).ok_or_else(|| {
                CvmError::invalid(format!(
                    "ordered-phase site {:?} maps to {:?}, which is not a site of '{}'",
                    site.position.as_slice(),
                    position.as_slice(),
                    reference.name()
                ))
            })?;
            sites.push((
                sublattice,
                Site {
                    position,
                    decoration: site.decoration,
                },
            ));
        }
        Ok(Cluster::from_sites(reference.num_sublattices(), sites))
    }
}

/// Position of an ordered-phase group inside the classification: reference type `t`,
/// ordered group `j` within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupIndex {
    pub cluster_type: usize,
    pub group: usize,
}

/// One ordered-phase cluster type filed under its parent reference type.
#[derive(Debug, Clone)]
pub struct OrderedGroup {
    /// Index into the ordered-phase [`ClusterTypeSet`]
    pub ordered_type: usize,
    /// Ordered-phase multiplicity per lattice site
    pub multiplicity: f64,
    /// Orbit in the ordered frame
    pub orbit: Vec<Cluster>,
}

/// Ordered-phase cluster types grouped under their parent reference types.
///
/// Groups are stored flat, reference type by reference type; `offsets[t]..offsets[t + 1]`
/// is the range belonging to reference type `t`.
#[derive(Debug, Clone)]
pub struct ClassifiedClusters {
    groups: Vec<OrderedGroup>,
    offsets: Vec<usize>,
    index_of_ordered: Vec<GroupIndex>,
}

impl ClassifiedClusters {
    pub fn num_reference_types(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Groups under reference type `t`.
    pub fn groups_of(&self, t: usize) -> &[OrderedGroup] {
        &self.groups[self.offsets[t]..self.offsets[t + 1]]
    }

    pub fn group(&self, index: GroupIndex) -> &OrderedGroup {
        &self.groups_of(index.cluster_type)[index.group]
    }

    /// Number of groups under each reference type.
    pub fn group_counts(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Position of ordered type `ordered_type` in the classification.
    pub fn index_of(&self, ordered_type: usize) -> GroupIndex {
        self.index_of_ordered[ordered_type]
    }

    /// Flat position of a group, counting over all reference types.
    pub fn flat_index(&self, index: GroupIndex) -> usize {
        self.offsets[index.cluster_type] + index.group
    }

    /// All group indices in flat order.
    pub fn indices(&self) -> impl Iterator<Item = GroupIndex> + '_ {
        (0..self.num_reference_types()).flat_map(move |t| {
            (0..self.groups_of(t).len()).map(move |j| GroupIndex {
                cluster_type: t,
                group: j,
            })
        })
    }
}

/// File every ordered-phase type under the reference type whose orbit contains its
/// transformed representative.
pub fn classify_clusters(
    ordered: &ClusterTypeSet,
    transform: &FrameTransform,
    reference: &ClusterTypeSet,
    reference_group: &SpaceGroup,
) -> Result<ClassifiedClusters> {
    let mut parents = Vec::with_capacity(ordered.len());
    for (o, ordered_type) in ordered.types().iter().enumerate() {
        let mapped = transform.to_reference(&ordered_type.representative, reference_group)?;
        let parent = reference
            .type_of(&reference_group.canonical_key(&mapped))
            .ok_or_else(|| {
                CvmError::inconsistent(format!(
                    "ordered cluster type {} has no parent among {} reference types",
                    o,
                    reference.len()
                ))
            })?;
        parents.push(parent);
    }

    let mut groups = Vec::with_capacity(ordered.len());
    let mut offsets = vec![0];
    let mut index_of_ordered = vec![
        GroupIndex {
            cluster_type: 0,
            group: 0
        };
        ordered.len()
    ];
    for t in 0..reference.len() {
        for (o, _) in parents.iter().enumerate().filter(|(_, p)| **p == t) {
            let ordered_type = &ordered.types()[o];
            index_of_ordered[o] = GroupIndex {
                cluster_type: t,
                group: groups.len() - offsets[t],
            };
            groups.push(OrderedGroup {
                ordered_type: o,
                multiplicity: ordered_type.multiplicity,
                orbit: ordered_type.orbit.clone(),
            });
        }
        offsets.push(groups.len());
    }

    debug!(
        "classified {} ordered types under {} reference types",
        groups.len(),
        reference.len()
    );

    Ok(ClassifiedClusters {
        groups,
        offsets,
        index_of_ordered,
    })
}

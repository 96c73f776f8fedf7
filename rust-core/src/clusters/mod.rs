// Clusters module: cluster representation, enumeration, classification and entropy weights
// This module turns maximal clusters plus a space group into symmetry-distinct cluster types

// ======================== MODULE DECLARATIONS ========================
pub mod cluster_classification;
pub mod cluster_containment;
pub mod cluster_enumeration;
pub mod cluster_types;

// Test modules
mod _tests_cluster_classification;

// ======================== CLUSTER REPRESENTATION ========================
pub use cluster_types::{
    Cluster,     // struct - sites grouped by sublattice
    ClusterKey,  // struct - hashable canonical identity of a decorated cluster
    PositionKey, // struct - quantised coordinates for tolerance-aware hashing
    Site,        // struct - position + optional site-operator symbol
    Sublattice,  // struct - the sites of one sublattice
};
// Cluster impl methods:
//   from_positions(positions: Vec<Vec<Vector3<f64>>>) -> Self       - bare cluster from per-sublattice positions
//   from_sites(num_sublattices, sites) -> Self                      - cluster from (sublattice, site) pairs
//   sites(&self) -> impl Iterator<Item = (usize, &Site)>           - sites in site-index order
//   site_counts(&self) -> Vec<usize>                                - sites per sublattice
//   stripped(&self) -> Cluster                                      - geometry without decorations
//   decorated_subcluster(&self, indices, decorations) -> Cluster    - decorated subset of sites

// ======================== ENUMERATION ========================
pub use cluster_enumeration::{
    enumerate_cluster_types, // fn(maximal: &[Cluster], group: &SpaceGroup, basis: &DecorationBasis) -> Result<ClusterTypeSet>
    ClusterType,             // struct - representative, orbit, multiplicity, site counts
    ClusterTypeSet,          // struct - all types sorted by descending size, empty cluster last
};

// ======================== FRAME TRANSFORM & CLASSIFICATION ========================
pub use cluster_classification::{
    classify_clusters,  // fn(ordered, transform, reference, reference_group) -> Result<ClassifiedClusters>
    ClassifiedClusters, // struct - ordered groups filed under reference types (flat storage)
    FrameTransform,     // struct - ordered → reference affine map
    GroupIndex,         // struct - (reference type, ordered group) key
    OrderedGroup,       // struct - ordered type, multiplicity, orbit
};

// ======================== CONTAINMENT & ENTROPY COEFFICIENTS ========================
pub use cluster_containment::{
    containment_table,          // fn(types: &ClusterTypeSet, group: &SpaceGroup, count: usize) -> Result<Vec<Vec<usize>>>
    kikuchi_baker_coefficients, // fn(multiplicities: &[f64], nij: &[Vec<usize>]) -> Result<Vec<f64>>
};

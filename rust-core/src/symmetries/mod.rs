// Symmetries module: symmetry operations, space groups and point-group generators
// This module decides when two clusters are equivalent

// ======================== MODULE DECLARATIONS ========================
pub mod point_groups;
pub mod space_group;
pub mod symmetry_operations;

// Test modules
mod _tests_space_group;

// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::SymmetryOperation; // struct - linear part + translation
// SymmetryOperation impl methods:
//   new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self - creates operation
//   identity() -> Self                                             - identity operation
//   apply(&self, point: &Vector3<f64>) -> Vector3<f64>             - applies operation to a point
//   apply_to_cluster(&self, cluster: &Cluster) -> Cluster          - applies operation to every site
//   compose(&self, other: &Self) -> Self                           - self after other
//   inverse(&self) -> Result<Self>                                 - inverse operation
//   order(&self) -> Option<usize>                                  - order of the linear part
//   is_identity(&self) -> bool                                     - identity test

// ======================== SPACE GROUPS ========================
pub use space_group::SpaceGroup; // struct - operations + lattice translations + sublattice sites
// SpaceGroup impl methods:
//   new(name, operations, lattice: LatticeBasis, sublattices: Vec<Vec<Vector3<f64>>>) -> Result<Self>
//   sites_per_cell(&self) -> usize                                 - lattice sites per primitive cell
//   sublattice_of(&self, position: &Vector3<f64>) -> Option<usize> - sublattice a position lies on
//   canonical_form(&self, cluster: &Cluster) -> Cluster            - translation-normalised cluster
//   canonical_key(&self, cluster: &Cluster) -> ClusterKey          - hashable equivalence key (mod translations)
//   orbit(&self, cluster: &Cluster) -> BTreeMap<ClusterKey, Cluster> - orbit modulo translations

// ======================== POINT GROUP GENERATORS ========================
pub use point_groups::generate_cubic_operations; // fn() -> Vec<SymmetryOperation> - the 48 operations of O_h

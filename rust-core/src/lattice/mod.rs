//! Lattice module: translation bases and standard cubic structures.
//!
//! Quick reference
//! - Types: [`LatticeBasis`]
//! - Lattices: [`body_centered_cubic_lattice`], [`face_centered_cubic_lattice`], [`simple_cubic_lattice`]
//! - Space groups: [`a2_space_group`], [`b2_space_group`], [`a1_space_group`]
//! - Phases: [`a2_pair`], [`a2_tetrahedron`], [`b2_tetrahedron`], [`a1_tetrahedron`]
//! - Configurations: [`b2_on_a2_tetrahedron`]

// ======================== MODULE DECLARATIONS ========================
pub mod lattice_basis;
pub mod lattice_construction;

mod _tests_lattice_construction;

// ======================== RE-EXPORTED PUBLIC API (curated) ========================
#[doc(inline)]
pub use lattice_basis::LatticeBasis;

pub use lattice_construction::{
    a1_space_group, a1_tetrahedron, a2_pair, a2_space_group, a2_tetrahedron, b2_on_a2_tetrahedron,
    b2_space_group, b2_tetrahedron, body_centered_cubic_lattice, face_centered_cubic_lattice,
    simple_cubic_lattice,
};

use nalgebra::{Matrix3, Vector3};

use crate::clusters::{Cluster, FrameTransform};
use crate::config::{CvmConfig, PhaseDefinition};
use crate::lattice::lattice_basis::LatticeBasis;
use crate::symmetries::{generate_cubic_operations, SpaceGroup};
use crate::Result;

// Standard cubic structures. All coordinates are in units of half the cubic lattice
// parameter, so every site of the structures below has integer coordinates.

/// Primitive body-centred cubic translations (a/2)(-1,1,1), (1,-1,1), (1,1,-1)
pub fn body_centered_cubic_lattice() -> Result<LatticeBasis> {
    LatticeBasis::from_matrix(Matrix3::new(
        -1.0, 1.0, 1.0, //
        1.0, -1.0, 1.0, //
        1.0, 1.0, -1.0,
    ))
}

/// Primitive face-centred cubic translations (a/2)(0,1,1), (1,0,1), (1,1,0)
pub fn face_centered_cubic_lattice() -> Result<LatticeBasis> {
    LatticeBasis::from_matrix(Matrix3::new(
        0.0, 1.0, 1.0, //
        1.0, 0.0, 1.0, //
        1.0, 1.0, 0.0,
    ))
}

/// Simple cubic translations of edge a
pub fn simple_cubic_lattice() -> Result<LatticeBasis> {
    LatticeBasis::from_matrix(Matrix3::identity() * 2.0)
}

/// A2 (W-type, Im-3m): one sublattice on the BCC lattice
pub fn a2_space_group() -> Result<SpaceGroup> {
    SpaceGroup::new(
        "A2 (Im-3m)",
        generate_cubic_operations(),
        body_centered_cubic_lattice()?,
        vec![vec![Vector3::zeros()]],
    )
}

/// B2 (CsCl-type, Pm-3m): cube corners and cube centres form two sublattices
pub fn b2_space_group() -> Result<SpaceGroup> {
    SpaceGroup::new(
        "B2 (Pm-3m)",
        generate_cubic_operations(),
        simple_cubic_lattice()?,
        vec![vec![Vector3::zeros()], vec![Vector3::new(1.0, 1.0, 1.0)]],
    )
}

/// A1 (Cu-type, Fm-3m): one sublattice on the FCC lattice
pub fn a1_space_group() -> Result<SpaceGroup> {
    SpaceGroup::new(
        "A1 (Fm-3m)",
        generate_cubic_operations(),
        face_centered_cubic_lattice()?,
        vec![vec![Vector3::zeros()]],
    )
}

/// Irregular BCC tetrahedron: four nearest-neighbour and two next-nearest-neighbour edges.
/// The site order puts a nearest-neighbour pair first.
fn bcc_tetrahedron_sites() -> [Vector3<f64>; 4] {
    [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(2.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, -1.0),
    ]
}

/// A2 in the nearest-neighbour pair approximation
pub fn a2_pair() -> Result<PhaseDefinition> {
    PhaseDefinition::new(
        "A2 pair",
        vec![Cluster::from_positions(vec![vec![
            Vector3::zeros(),
            Vector3::new(1.0, 1.0, 1.0),
        ]])],
        a2_space_group()?,
    )
}

/// A2 in the irregular tetrahedron approximation
pub fn a2_tetrahedron() -> Result<PhaseDefinition> {
    PhaseDefinition::new(
        "A2 tetrahedron",
        vec![Cluster::from_positions(vec![bcc_tetrahedron_sites().to_vec()])],
        a2_space_group()?,
    )
}

/// B2 in the irregular tetrahedron approximation; cube corners on sublattice 0
pub fn b2_tetrahedron() -> Result<PhaseDefinition> {
    let [p0, p1, p2, p3] = bcc_tetrahedron_sites();
    PhaseDefinition::new(
        "B2 tetrahedron",
        vec![Cluster::from_positions(vec![vec![p0, p2], vec![p1, p3]])],
        b2_space_group()?,
    )
}

/// A1 in the regular tetrahedron approximation
pub fn a1_tetrahedron() -> Result<PhaseDefinition> {
    PhaseDefinition::new(
        "A1 tetrahedron",
        vec![Cluster::from_positions(vec![vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 1.0),
        ]])],
        a1_space_group()?,
    )
}

/// B2 ordering on the A2 reference, both in the tetrahedron approximation.
/// The two phases share coordinates, so the frame transform is the identity.
pub fn b2_on_a2_tetrahedron(components: usize) -> Result<CvmConfig> {
    CvmConfig::new(
        a2_tetrahedron()?,
        b2_tetrahedron()?,
        FrameTransform::identity(),
        components,
    )
}

#[cfg(test)]
mod _tests_lattice_construction {
    use super::super::lattice_construction::*;
    use nalgebra::Vector3;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_primitive_cell_volumes() {
        // Units of a/2: conventional cubic cell has volume 8
        assert!((body_centered_cubic_lattice().unwrap().determinant().abs() - 4.0).abs() < TOL);
        assert!((face_centered_cubic_lattice().unwrap().determinant().abs() - 2.0).abs() < TOL);
        assert!((simple_cubic_lattice().unwrap().determinant().abs() - 8.0).abs() < TOL);
    }

    #[test]
    fn test_space_groups() {
        let a2 = a2_space_group().unwrap();
        assert_eq!(a2.operations().len(), 48);
        assert_eq!(a2.num_sublattices(), 1);

        let b2 = b2_space_group().unwrap();
        assert_eq!(b2.num_sublattices(), 2);
        assert_eq!(b2.sites_per_cell(), 2);

        let a1 = a1_space_group().unwrap();
        assert_eq!(a1.sublattice_of(&Vector3::new(1.0, 1.0, 0.0)), Some(0));
        assert_eq!(a1.sublattice_of(&Vector3::new(1.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_phase_presets() {
        let pair = a2_pair().unwrap();
        assert_eq!(pair.maximal_clusters[0].num_sites(), 2);

        let tet = a2_tetrahedron().unwrap();
        assert_eq!(tet.maximal_clusters.len(), 1);
        assert_eq!(tet.maximal_clusters[0].site_counts(), vec![4]);

        let b2 = b2_tetrahedron().unwrap();
        assert_eq!(b2.maximal_clusters[0].site_counts(), vec![2, 2]);

        let fcc = a1_tetrahedron().unwrap();
        let sites: Vec<_> = fcc.maximal_clusters[0].sites().map(|(_, s)| s.position).collect();
        // Regular tetrahedron: all six edges are nearest-neighbour bonds
        for i in 0..4 {
            for j in i + 1..4 {
                assert!(((sites[i] - sites[j]).norm() - 2.0_f64.sqrt()).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_b2_configuration() {
        let config = b2_on_a2_tetrahedron(2).unwrap();
        assert!(config.transform().is_identity());
        assert_eq!(config.components(), 2);
        assert_eq!(config.reference().space_group.num_sublattices(), 1);
        assert_eq!(config.ordered().space_group.num_sublattices(), 2);
        assert!(b2_on_a2_tetrahedron(1).is_err());
    }
}

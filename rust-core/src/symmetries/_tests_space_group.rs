#[cfg(test)]
mod _tests_space_group {
    use super::super::point_groups::generate_cubic_operations;
    use super::super::space_group::SpaceGroup;
    use super::super::symmetry_operations::SymmetryOperation;
    use crate::clusters::Cluster;
    use crate::lattice::{a2_space_group, b2_space_group, body_centered_cubic_lattice};
    use nalgebra::{Matrix3, Vector3};

    fn pair(a: Vector3<f64>, b: Vector3<f64>) -> Cluster {
        Cluster::from_positions(vec![vec![a, b]])
    }

    #[test]
    fn test_new_requires_identity() {
        let lattice = body_centered_cubic_lattice().unwrap();
        let only_inversion = vec![SymmetryOperation::new(-Matrix3::identity(), Vector3::zeros())];
        assert!(SpaceGroup::new("bad", only_inversion, lattice.clone(), vec![vec![Vector3::zeros()]]).is_err());
        assert!(SpaceGroup::new("bad", Vec::new(), lattice.clone(), vec![vec![Vector3::zeros()]]).is_err());
        assert!(SpaceGroup::new("bad", generate_cubic_operations(), lattice, vec![vec![]]).is_err());
    }

    #[test]
    fn test_sublattice_of() {
        let a2 = a2_space_group().unwrap();
        assert_eq!(a2.sites_per_cell(), 1);
        assert_eq!(a2.sublattice_of(&Vector3::new(1.0, 1.0, 1.0)), Some(0));
        assert_eq!(a2.sublattice_of(&Vector3::new(2.0, 0.0, 0.0)), Some(0));
        assert_eq!(a2.sublattice_of(&Vector3::new(1.0, 0.0, 0.0)), None);

        let b2 = b2_space_group().unwrap();
        assert_eq!(b2.sites_per_cell(), 2);
        assert_eq!(b2.sublattice_of(&Vector3::new(2.0, -2.0, 4.0)), Some(0));
        assert_eq!(b2.sublattice_of(&Vector3::new(-1.0, 1.0, 3.0)), Some(1));
        assert_eq!(b2.sublattice_of(&Vector3::new(1.0, 1.0, 0.0)), None);
    }

    #[test]
    fn test_canonical_key_is_translation_invariant() {
        let a2 = a2_space_group().unwrap();
        let p = pair(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let shifted = p.translated(&Vector3::new(-1.0, 1.0, 1.0));
        assert_eq!(a2.canonical_key(&p), a2.canonical_key(&shifted));
    }

    #[test]
    fn test_canonical_key_ignores_site_order() {
        let a2 = a2_space_group().unwrap();
        let forward = pair(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let backward = pair(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros());
        assert_eq!(a2.canonical_key(&forward), a2.canonical_key(&backward));
    }

    #[test]
    fn test_canonical_key_separates_distinct_pairs() {
        let a2 = a2_space_group().unwrap();
        let nn = pair(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let nnn = pair(Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0));
        assert_ne!(a2.canonical_key(&nn), a2.canonical_key(&nnn));
    }

    #[test]
    fn test_orbit_sizes_on_bcc() {
        let a2 = a2_space_group().unwrap();
        // Eight nearest neighbours, each bond counted from both ends
        let nn = pair(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(a2.orbit(&nn).len(), 4);
        let nnn = pair(Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(a2.orbit(&nnn).len(), 3);
        let point = Cluster::from_positions(vec![vec![Vector3::zeros()]]);
        assert_eq!(a2.orbit(&point).len(), 1);
    }

    #[test]
    fn test_orbit_members_share_canonical_keys() {
        let a2 = a2_space_group().unwrap();
        let nn = pair(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        for (key, member) in a2.orbit(&nn) {
            assert_eq!(a2.canonical_key(&member), key);
        }
    }
}

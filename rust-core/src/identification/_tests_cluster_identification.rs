#[cfg(test)]
mod _tests_cluster_identification {
    use super::super::cluster_identification::ClusterIdentification;
    use crate::clusters::GroupIndex;
    use crate::config::CvmConfig;
    use crate::lattice::{a1_tetrahedron, a2_pair, a2_tetrahedron, b2_on_a2_tetrahedron};
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-10;

    fn disordered(phase: crate::config::PhaseDefinition) -> ClusterIdentification {
        ClusterIdentification::identify(&CvmConfig::disordered(phase, 2).unwrap()).unwrap()
    }

    #[test]
    fn test_a2_tetrahedron_stage_one() {
        let stage = disordered(a2_tetrahedron().unwrap());
        assert_eq!(stage.tcdis(), 5);
        assert_eq!(stage.point_type(), 4);
        assert_eq!(stage.lc(), vec![1; 5]);
        assert_eq!(stage.tc(), 5);

        let expected_kb = [1.0, -1.0, 1.0, 1.0, -1.0];
        for (k, e) in stage.kb().iter().zip(expected_kb) {
            assert!((k - e).abs() < TOL);
        }
        for (m, e) in stage.mhdis().iter().zip([6.0, 12.0, 4.0, 3.0, 1.0]) {
            assert!((m - e).abs() < TOL);
        }
        assert!((stage.kb()[0] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_entropy_sum_rule() {
        for phase in [a2_pair().unwrap(), a2_tetrahedron().unwrap(), a1_tetrahedron().unwrap()] {
            let stage = disordered(phase);
            assert_abs_diff_eq!(stage.entropy_sum_rule(), 1.0, epsilon = TOL);
        }
    }

    #[test]
    fn test_containment_is_upper_triangular() {
        let stage = disordered(a2_tetrahedron().unwrap());
        let nij = stage.nij();
        for i in 0..stage.tcdis() {
            for j in 0..stage.tcdis() {
                if j < i || stage.num_sites(j) > stage.num_sites(i) {
                    assert_eq!(nij[i][j], 0);
                }
            }
            assert_eq!(nij[i][i], 1);
        }
    }

    #[test]
    fn test_disordered_mh_is_one() {
        let stage = disordered(a2_tetrahedron().unwrap());
        for index in stage.group_indices() {
            assert!((stage.mh(index) - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn test_b2_ordered_groups() {
        let stage = ClusterIdentification::identify(&b2_on_a2_tetrahedron(2).unwrap()).unwrap();
        assert_eq!(stage.tcdis(), 5);
        assert_eq!(stage.lc(), vec![1, 2, 1, 2, 2]);
        assert_eq!(stage.tc(), 8);
        assert_eq!(stage.group_indices().count(), 8);

        // Ordered groups split the reference weight of each type
        for row in stage.mh_table() {
            let total: f64 = row.iter().sum();
            assert!((total - 1.0).abs() < TOL);
        }
        let point_a = GroupIndex {
            cluster_type: 4,
            group: 0,
        };
        assert_abs_diff_eq!(stage.mh(point_a), 0.5, epsilon = TOL);

        // Entropy coefficients come from the reference phase
        for (k, e) in stage.kb().iter().zip([1.0, -1.0, 1.0, 1.0, -1.0]) {
            assert!((k - e).abs() < TOL);
        }
    }
}

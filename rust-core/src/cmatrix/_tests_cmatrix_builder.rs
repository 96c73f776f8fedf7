#[cfg(test)]
mod _tests_cmatrix_builder {
    use super::super::cmatrix_builder::build_cmatrix;
    use crate::clusters::GroupIndex;
    use crate::config::CvmConfig;
    use crate::identification::identify;
    use crate::lattice::{a1_tetrahedron, a2_pair, a2_tetrahedron, b2_on_a2_tetrahedron};
    use nalgebra::DVector;

    const TOL: f64 = 1e-12;

    fn group(t: usize, j: usize) -> GroupIndex {
        GroupIndex {
            cluster_type: t,
            group: j,
        }
    }

    #[test]
    fn test_binary_pair_block() {
        let identification =
            identify(&CvmConfig::disordered(a2_pair().unwrap(), 2).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        assert_eq!(cmatrix.tcf(), 2);
        assert_eq!(cmatrix.ncf(), 1);
        assert_eq!(cmatrix.lcv_table(), vec![vec![3], vec![2]]);

        // AA, AB (= BA), BB over columns [pair, point]
        let block = cmatrix.block(group(0, 0));
        assert_eq!(block.weights, vec![1, 2, 1]);
        let expected = [
            (0.25, [0.25, -0.5]),
            (0.25, [-0.25, 0.0]),
            (0.25, [0.25, 0.5]),
        ];
        for (v, (constant, row)) in expected.iter().enumerate() {
            assert!((block.constants[v] - constant).abs() < TOL);
            for (k, c) in row.iter().enumerate() {
                assert!((block.coefficients[(v, k)] - c).abs() < TOL);
            }
        }

        let point = cmatrix.block(group(1, 0));
        assert_eq!(point.weights, vec![1, 1]);
        assert!((point.coefficients[(0, 1)] + 0.5).abs() < TOL);
        assert!((point.coefficients[(0, 0)]).abs() < TOL);
    }

    #[test]
    fn test_cf_basis_indices() {
        let identification =
            identify(&CvmConfig::disordered(a2_pair().unwrap(), 3).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        assert_eq!(
            cmatrix.cf_basis_indices(),
            &[vec![1, 1], vec![1, 2], vec![2, 2], vec![1], vec![2]]
        );
        assert_eq!(cmatrix.basis(), &[-1.0, 0.0, 1.0]);
        assert_eq!(cmatrix.components(), 3);
    }

    #[test]
    fn test_weight_sums() {
        let configs = vec![
            CvmConfig::disordered(a2_tetrahedron().unwrap(), 2).unwrap(),
            CvmConfig::disordered(a2_tetrahedron().unwrap(), 3).unwrap(),
            CvmConfig::disordered(a1_tetrahedron().unwrap(), 2).unwrap(),
            b2_on_a2_tetrahedron(2).unwrap(),
            b2_on_a2_tetrahedron(3).unwrap(),
        ];
        for config in configs {
            let identification = identify(&config).unwrap();
            let cmatrix = build_cmatrix(&identification).unwrap();
            let k = config.components();
            for block in cmatrix.blocks() {
                let n = identification.clusters().num_sites(block.group.cluster_type);
                let total: usize = block.weights.iter().sum();
                assert_eq!(total, k.pow(n as u32));
                assert_eq!(block.coefficients.ncols(), cmatrix.tcf());
                assert_eq!(block.coefficients.nrows(), block.lcv());
            }
        }
    }

    #[test]
    fn test_binary_tetrahedron_merges_rows() {
        let identification =
            identify(&CvmConfig::disordered(a2_tetrahedron().unwrap(), 2).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        // Tetrahedron: 16 configurations merge into 6 (D2d classes)
        let lcv = cmatrix.lcv_table();
        assert_eq!(lcv[0], vec![6]);
        assert_eq!(lcv[4], vec![2]);
    }

    #[test]
    fn test_probabilities_are_normalised() {
        let identification = identify(&b2_on_a2_tetrahedron(3).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        // Normalisation holds for any correlation vector
        let u = DVector::from_fn(cmatrix.tcf(), |k, _| 0.1 * ((k % 5) as f64) - 0.2);
        for block in cmatrix.blocks() {
            let cv = block.evaluate(&u);
            let total: f64 = cv.iter().zip(&block.weights).map(|(p, &w)| p * w as f64).sum();
            assert!((total - 1.0).abs() < 1e-10);
        }
    }
}

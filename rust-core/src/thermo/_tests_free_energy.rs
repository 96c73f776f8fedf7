#[cfg(test)]
mod _tests_free_energy {
    use super::super::free_energy::{smoothed_entropy_term, FreeEnergyFunctional};
    use crate::cmatrix::{build_cmatrix, random_state_correlations, CMatrix};
    use crate::config::{CvmConfig, ENTROPY_SMOOTHING_THRESHOLD};
    use crate::identification::{identify, Identification};
    use crate::lattice::{a2_tetrahedron, b2_on_a2_tetrahedron};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::DVector;

    fn a2_tetrahedron_data(k: usize) -> (Identification, CMatrix) {
        let identification =
            identify(&CvmConfig::disordered(a2_tetrahedron().unwrap(), k).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        (identification, cmatrix)
    }

    fn ideal_entropy(x: &[f64]) -> f64 {
        -x.iter().filter(|&&xi| xi > 0.0).map(|xi| xi * xi.ln()).sum::<f64>()
    }

    fn entropy_at_random_state(identification: &Identification, cmatrix: &CMatrix, x: &[f64]) -> f64 {
        let eci = vec![0.0; cmatrix.ncf()];
        let functional = FreeEnergyFunctional::new(
            identification.clusters(),
            identification.cfs(),
            cmatrix,
            &eci,
            1.0,
            x,
        )
        .unwrap();
        let u = random_state_correlations(cmatrix, x).unwrap();
        functional.evaluate(&u).unwrap().entropy
    }

    #[test]
    fn test_smoothed_term_above_threshold() {
        let (f, df, d2f) = smoothed_entropy_term(0.5);
        assert_relative_eq!(f, 0.5 * 0.5_f64.ln());
        assert_relative_eq!(df, 1.0 + 0.5_f64.ln());
        assert_relative_eq!(d2f, 2.0);
    }

    #[test]
    fn test_smoothed_term_is_continuous_at_threshold() {
        let eps = ENTROPY_SMOOTHING_THRESHOLD;
        let below = smoothed_entropy_term(eps * (1.0 - 1e-9));
        let above = smoothed_entropy_term(eps * (1.0 + 1e-9));
        assert!((below.0 - above.0).abs() < 1e-12);
        assert!((below.1 - above.1).abs() < 1e-6);
        assert!((below.2 - above.2).abs() / above.2 < 1e-6);
    }

    #[test]
    fn test_smoothed_term_is_finite_for_non_positive_probabilities() {
        for p in [0.0, -1e-8, -0.1] {
            let (f, df, d2f) = smoothed_entropy_term(p);
            assert!(f.is_finite() && df.is_finite() && d2f.is_finite());
            assert!((d2f - 1.0 / ENTROPY_SMOOTHING_THRESHOLD).abs() < 1e-6);
        }
        // Grows again below zero, acting as a barrier
        assert!(smoothed_entropy_term(-0.1).0 > smoothed_entropy_term(0.0).0);
    }

    #[test]
    fn test_ideal_entropy_binary_equimolar() {
        let (identification, cmatrix) = a2_tetrahedron_data(2);
        let s = entropy_at_random_state(&identification, &cmatrix, &[0.5, 0.5]);
        assert_abs_diff_eq!(s, 2.0_f64.ln(), epsilon = 1e-10);
        assert_abs_diff_eq!(s, 0.693147, epsilon = 1e-6);
    }

    #[test]
    fn test_ideal_entropy_ternary_equimolar() {
        let (identification, cmatrix) = a2_tetrahedron_data(3);
        let x = [1.0 / 3.0; 3];
        let s = entropy_at_random_state(&identification, &cmatrix, &x);
        assert_abs_diff_eq!(s, 3.0_f64.ln(), epsilon = 1e-10);
        assert_abs_diff_eq!(s, 1.098612, epsilon = 1e-6);
    }

    #[test]
    fn test_ideal_entropy_off_stoichiometric() {
        let (identification, cmatrix) = a2_tetrahedron_data(3);
        let x = [0.2, 0.3, 0.5];
        let s = entropy_at_random_state(&identification, &cmatrix, &x);
        assert!((s - ideal_entropy(&x)).abs() < 1e-10);

        let identification = identify(&b2_on_a2_tetrahedron(2).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        let x = [0.35, 0.65];
        let s = entropy_at_random_state(&identification, &cmatrix, &x);
        assert!((s - ideal_entropy(&x)).abs() < 1e-10);
    }

    #[test]
    fn test_enthalpy_is_linear() {
        let (identification, cmatrix) = a2_tetrahedron_data(2);
        let eci = [0.1, -0.2, -1.0, 0.3];
        let functional = FreeEnergyFunctional::new(
            identification.clusters(),
            identification.cfs(),
            &cmatrix,
            &eci,
            2.0,
            &[0.5, 0.5],
        )
        .unwrap();
        let u = DVector::from_vec(vec![0.01, 0.02, 0.05, 0.03]);
        let evaluation = functional.evaluate(&u).unwrap();
        let mhdis = identification.clusters().mhdis();
        let expected: f64 = (0..4).map(|l| mhdis[l] * eci[l] * u[l]).sum();
        assert!((evaluation.enthalpy - expected).abs() < 1e-14);
        assert!((evaluation.gibbs_energy - (evaluation.enthalpy - 2.0 * evaluation.entropy)).abs() < 1e-14);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let identification = identify(&b2_on_a2_tetrahedron(2).unwrap()).unwrap();
        let cmatrix = build_cmatrix(&identification).unwrap();
        let x = [0.45, 0.55];
        let eci = [0.05, -0.1, 0.02, 1.0, -0.3, 0.1];
        let functional = FreeEnergyFunctional::new(
            identification.clusters(),
            identification.cfs(),
            &cmatrix,
            &eci,
            3.0,
            &x,
        )
        .unwrap();

        let mut u = random_state_correlations(&cmatrix, &x).unwrap();
        for l in 0..u.len() {
            u[l] += 0.003 * (l as f64 + 1.0) * if l % 2 == 0 { 1.0 } else { -1.0 };
        }
        let at_u = functional.evaluate(&u).unwrap();

        let h = 1e-6;
        for l in 0..u.len() {
            let mut plus = u.clone();
            plus[l] += h;
            let mut minus = u.clone();
            minus[l] -= h;
            let fp = functional.evaluate(&plus).unwrap();
            let fm = functional.evaluate(&minus).unwrap();

            let gradient = (fp.gibbs_energy - fm.gibbs_energy) / (2.0 * h);
            assert!(
                (gradient - at_u.gradient[l]).abs() < 1e-6,
                "dG/du[{}]: {} vs {}",
                l,
                gradient,
                at_u.gradient[l]
            );
            for m in 0..u.len() {
                let hessian = (fp.gradient[m] - fm.gradient[m]) / (2.0 * h);
                assert!((hessian - at_u.hessian[(l, m)]).abs() < 1e-4);
            }
        }
        assert!((&at_u.hessian - at_u.hessian.transpose()).amax() < 1e-10);
    }

    #[test]
    fn test_invalid_inputs() {
        let (identification, cmatrix) = a2_tetrahedron_data(2);
        let clusters = identification.clusters();
        let cfs = identification.cfs();
        let eci = [0.0; 4];
        let x = [0.5, 0.5];
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, 0.0, &x).is_err());
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, -1.0, &x).is_err());
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, f64::NAN, &x).is_err());
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci[..3], 1.0, &x).is_err());
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, 1.0, &[0.5, 0.6]).is_err());
        // A vanished component is rejected even though the composition is normalised
        assert!(FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, 1.0, &[1.0, 0.0]).is_err());

        let functional = FreeEnergyFunctional::new(clusters, cfs, &cmatrix, &eci, 1.0, &x).unwrap();
        assert!(functional.evaluate(&DVector::zeros(3)).is_err());
    }
}

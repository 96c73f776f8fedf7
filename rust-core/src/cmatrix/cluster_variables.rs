use nalgebra::DVector;

use crate::cmatrix::cmatrix_builder::CMatrix;
use crate::config::COMPOSITION_TOLERANCE;
use crate::error::CvmError;
use crate::Result;

/// Check that `mole_fractions` has one non-negative entry per component summing to one.
pub fn validate_composition(mole_fractions: &[f64], components: usize) -> Result<()> {
    if mole_fractions.len() != components {
        return Err(CvmError::dimension(
            "mole fractions",
            components,
            mole_fractions.len(),
        ));
    }
    if let Some((i, x)) = mole_fractions
        .iter()
        .enumerate()
        .find(|(_, x)| !x.is_finite() || **x < 0.0)
    {
        return Err(CvmError::invalid(format!(
            "mole fraction {} of component {} is not a non-negative number",
            x, i
        )));
    }
    let total: f64 = mole_fractions.iter().sum();
    if (total - 1.0).abs() > COMPOSITION_TOLERANCE {
        return Err(CvmError::invalid(format!(
            "mole fractions sum to {}, expected 1",
            total
        )));
    }
    Ok(())
}

/// `pointCF[p] = Σ_i x_i·basis[i]^p` for `p = 0..K`; entry 0 is always 1.
pub fn point_correlations(mole_fractions: &[f64], basis: &[f64]) -> Result<Vec<f64>> {
    validate_composition(mole_fractions, basis.len())?;
    Ok((0..basis.len())
        .map(|p| {
            mole_fractions
                .iter()
                .zip(basis)
                .map(|(x, b)| x * b.powi(p as i32))
                .sum()
        })
        .collect())
}

fn uncorrelated_value(powers: &[usize], point: &[f64]) -> f64 {
    powers.iter().map(|&p| point[p]).product()
}

/// Independent correlation functions of the fully random state at this composition.
pub fn random_state_correlations(cmatrix: &CMatrix, mole_fractions: &[f64]) -> Result<DVector<f64>> {
    let point = point_correlations(mole_fractions, cmatrix.basis())?;
    Ok(DVector::from_iterator(
        cmatrix.ncf(),
        cmatrix.cf_basis_indices()[..cmatrix.ncf()]
            .iter()
            .map(|powers| uncorrelated_value(powers, &point)),
    ))
}

/// Full correlation vector: the `ncf` independent values followed by the point
/// correlation functions fixed by composition.
pub fn full_correlations(
    cmatrix: &CMatrix,
    independent: &DVector<f64>,
    mole_fractions: &[f64],
) -> Result<DVector<f64>> {
    if independent.len() != cmatrix.ncf() {
        return Err(CvmError::dimension(
            "independent correlation functions",
            cmatrix.ncf(),
            independent.len(),
        ));
    }
    let point = point_correlations(mole_fractions, cmatrix.basis())?;
    Ok(DVector::from_fn(cmatrix.tcf(), |k, _| {
        if k < cmatrix.ncf() {
            independent[k]
        } else {
            uncorrelated_value(&cmatrix.cf_basis_indices()[k], &point)
        }
    }))
}

/// Cluster variables of every block, in block order.
pub fn cluster_variables(cmatrix: &CMatrix, u_full: &DVector<f64>) -> Result<Vec<DVector<f64>>> {
    if u_full.len() != cmatrix.tcf() {
        return Err(CvmError::dimension(
            "full correlation vector",
            cmatrix.tcf(),
            u_full.len(),
        ));
    }
    Ok(cmatrix
        .blocks()
        .iter()
        .map(|block| block.evaluate(u_full))
        .collect())
}

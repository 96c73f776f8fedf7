use nalgebra::DMatrix;

use crate::error::CvmError;
use crate::Result;

/// Symmetric integer site basis for `components` species.
///
/// Even K gives `{-K/2, ..., -1, 1, ..., K/2}`, odd K gives `{-(K-1)/2, ..., (K-1)/2}`.
pub fn site_basis(components: usize) -> Result<Vec<f64>> {
    if components < 2 {
        return Err(CvmError::invalid(format!(
            "component count must be at least 2, got {}",
            components
        )));
    }
    let half = (components / 2) as i64;
    let values: Vec<f64> = if components % 2 == 0 {
        (-half..=half).filter(|&v| v != 0).map(|v| v as f64).collect()
    } else {
        (-half..=half).map(|v| v as f64).collect()
    };
    Ok(values)
}

/// Inverse of the power matrix `V[s][i] = basis[i]^s`.
///
/// Rows of the result index species and columns index powers, so the occupation
/// indicator of species `i` on a site is `Σ_s R[i][s]·σ^s`.
pub fn r_matrix(basis: &[f64]) -> Result<DMatrix<f64>> {
    let k = basis.len();
    if k == 0 {
        return Err(CvmError::invalid("empty site basis"));
    }
    let powers = DMatrix::from_fn(k, k, |s, i| basis[i].powi(s as i32));
    powers.try_inverse().ok_or_else(|| {
        CvmError::invalid(format!(
            "power matrix of site basis {:?} is singular",
            basis
        ))
    })
}

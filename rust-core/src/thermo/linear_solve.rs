use nalgebra::{DMatrix, DVector};

use crate::config::PIVOT_TOLERANCE;
use crate::error::CvmError;
use crate::Result;

/// Solve `a·x = b` by Gaussian elimination with partial pivoting.
///
/// A pivot smaller than `PIVOT_TOLERANCE·max(1, max|a|)` is reported as
/// [`CvmError::SingularMatrix`] instead of producing a degenerate solution.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(CvmError::dimension("columns of square system", n, a.ncols()));
    }
    if b.len() != n {
        return Err(CvmError::dimension("right-hand side", n, b.len()));
    }
    if n == 0 {
        return Ok(DVector::zeros(0));
    }

    let threshold = PIVOT_TOLERANCE * a.amax().max(1.0);
    let mut m = a.clone();
    let mut x = b.clone();

    for col in 0..n {
        let (offset, pivot) = m
            .view((col, col), (n - col, 1))
            .iter()
            .enumerate()
            .fold((0, 0.0_f64), |best, (i, &v)| {
                if v.abs() > best.1.abs() {
                    (i, v)
                } else {
                    best
                }
            });
        if pivot.abs() < threshold {
            return Err(CvmError::SingularMatrix { pivot, row: col });
        }
        let pivot_row = col + offset;
        if pivot_row != col {
            m.swap_rows(col, pivot_row);
            x.swap_rows(col, pivot_row);
        }

        for row in col + 1..n {
            let factor = m[(row, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[(row, k)] -= factor * m[(col, k)];
            }
            x[row] -= factor * x[col];
        }
    }

    for row in (0..n).rev() {
        let mut acc = x[row];
        for k in row + 1..n {
            acc -= m[(row, k)] * x[k];
        }
        x[row] = acc / m[(row, row)];
    }
    Ok(x)
}

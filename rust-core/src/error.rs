// Error taxonomy shared by every stage of the pipeline

/// Errors raised by the identification stages, the C-matrix builder and the solver.
///
/// Non-convergence of the Newton-Raphson solver is not an error; it is reported through
/// [`crate::thermo::EquilibriumResult::converged`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CvmError {
    /// Missing or out-of-range input supplied by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Array or matrix dimensions disagree.
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// A pivot fell below the singularity threshold during elimination or inversion.
    #[error("singular matrix: pivot {pivot:e} at row {row}")]
    SingularMatrix { pivot: f64, row: usize },

    /// Output of an earlier stage contradicts itself.
    #[error("inconsistent cluster data: {0}")]
    Inconsistency(String),
}

impl CvmError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CvmError::InvalidInput(msg.into())
    }

    pub fn inconsistent(msg: impl Into<String>) -> Self {
        CvmError::Inconsistency(msg.into())
    }

    pub fn dimension(what: impl Into<String>, expected: usize, found: usize) -> Self {
        CvmError::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}

//! Error taxonomy surfaced at the crate boundary.

use thiserror::Error;

/// Errors that can abort a `solve` run.
///
/// `InvalidConfig` and `InvalidValue` are detected before any LP is ever
/// assembled; `LinearProgramError` comes from the primary LP failing inside
/// the pluggable solver. Secondary-LP failures during post-optimality are
/// non-fatal and are logged instead (see [`crate::postopt`]).
#[derive(Debug, Error)]
pub enum UtastarError {
    /// Structural problem with the input (missing criterion, non-positive
    /// split/delta/epsilon, fewer than two alternatives, mismatched widths).
    #[error("invalid problem configuration: {0}")]
    InvalidConfig(String),

    /// A criterion value was negative or not a finite number.
    #[error("invalid criterion value: {0}")]
    InvalidValue(String),

    /// The primary linear program was reported infeasible, unbounded, or
    /// otherwise failed inside the solver adapter.
    #[error("linear program could not be solved: {0}")]
    LinearProgramError(String),
}

impl From<crate::solve::UtastarProblemBuilderError> for UtastarError {
    fn from(err: crate::solve::UtastarProblemBuilderError) -> Self {
        UtastarError::InvalidConfig(err.to_string())
    }
}

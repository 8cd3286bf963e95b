use thiserror::Error;

/// Errors reported for misuse of a linear solver.
///
/// Non-convergence is not an error; see [`Status`](super::Status).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("solver has no built-in operator")]
    NoOperator,

    #[error("boundary solve requested but no boundary condition is configured")]
    NoBoundaryCondition,

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}

use march_core::linear::{self, Solution};
use thiserror::Error;

/// Errors that can occur during an implicit Euler step.
#[derive(Debug, Error)]
pub enum ImplicitError<E> {
    /// Evaluating the source term failed.
    #[error("equation error")]
    Equation(#[source] E),

    /// The linear solver was misused.
    #[error("linear solver error: {0}")]
    Solver(#[source] linear::Error),

    /// The linear solve did not meet its tolerance.
    #[error("linear solve for the step from t = {t} did not converge")]
    NotConverged { t: f64, solution: Solution },
}

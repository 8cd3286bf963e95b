//! The iterative linear-solver contract used by implicit and elliptic terms.
//!
//! A [`LinearSolver`] solves `A x = b` to a configured tolerance and iteration
//! budget. `A` is any [`Operator`]: either one the solver was built with, or
//! one supplied per call. A solver may also reconcile a separately tracked
//! boundary contribution `xb`, and delegates cross-partition bookkeeping to a
//! [`Connectivity`].
//!
//! Failing to converge is not an error. Every solve that runs returns a
//! [`Solution`] whose [`Status`] tells the caller whether the residual met the
//! tolerance, so the caller can decide to retry with a smaller step, switch
//! preconditioner, or accept the iterate. [`Error`] is reserved for misuse.

mod config;
mod connectivity;
mod error;
mod norm;
mod operator;
mod solution;

pub use config::Config;
pub use connectivity::{Connectivity, Reduction};
pub use error::Error;
pub use norm::Norm;
pub use operator::Operator;
pub use solution::{Solution, Status};

/// Solves linear systems `A x = b` iteratively.
///
/// `x` is both the initial guess and the result. All three overloads share
/// the solver's [`Config`].
pub trait LinearSolver {
    /// Returns the solver configuration.
    fn config(&self) -> &Config;

    /// Solves against the solver's built-in operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOperator`] if the solver was built without an
    /// operator, or [`Error::DimensionMismatch`] if `b` or `x` do not match
    /// its dimension.
    fn solve(&mut self, b: &[f64], x: &mut [f64]) -> Result<Solution, Error>;

    /// Solves against an explicitly supplied operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `b` or `x` do not match the
    /// dimension of `a`.
    fn solve_with<A>(&mut self, a: &A, b: &[f64], x: &mut [f64]) -> Result<Solution, Error>
    where
        A: Operator + ?Sized;

    /// Solves for the homogeneous part `x` given a boundary contribution `xb`.
    ///
    /// Where `xb` enters the iteration is scheme specific; implementations
    /// must document it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoBoundaryCondition`] unless
    /// [`Config::has_boundary`] is set, or [`Error::DimensionMismatch`] if
    /// any vector does not match the dimension of `a`.
    fn solve_with_boundary<A>(
        &mut self,
        a: &A,
        b: &[f64],
        xb: &[f64],
        x: &mut [f64],
    ) -> Result<Solution, Error>
    where
        A: Operator + ?Sized;
}

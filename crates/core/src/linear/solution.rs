/// Indicates how an iterative solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual norm met the tolerance.
    Converged,

    /// The iteration budget ran out before the tolerance was met.
    MaxIters,

    /// The iteration cannot continue (e.g. the operator is not positive
    /// definite along the current search direction).
    Breakdown,

    /// No stopping test was configured; the full budget was used.
    Unchecked,
}

/// The result of an iterative solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// How the solver terminated.
    pub status: Status,

    /// Number of iteration passes, counted from 1.
    ///
    /// Each pass starts with the stopping test, so a solve that converges
    /// after `k` updates reports `k + 1`, and an initial guess that already
    /// meets the tolerance reports 1. When the budget runs out, this is
    /// `max_iters` whether or not the last update met the tolerance.
    pub iters: usize,

    /// Final residual norm `|b - A x|`, measured with the configured norm, or
    /// with the Euclidean norm when no stopping norm is configured.
    pub residual: f64,
}

impl Solution {
    /// Returns `true` if the solve met its tolerance.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

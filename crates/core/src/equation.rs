use crate::State;

/// A semi-discrete PDE system `du/dt = f(t, u)`.
///
/// An equation computes the time derivative of a state and may advise an
/// upper bound on a stable step size (for example from a CFL condition).
/// Whether advice is available is an explicit runtime capability: callers
/// check [`supports_dt`](Equation::supports_dt) before calling
/// [`dt`](Equation::dt).
///
/// Spatial discretization, boundary treatment, and any parallel exchange are
/// the implementor's business. When `derivative` returns, the derivative must
/// be complete; callers never see partially computed values.
pub trait Equation {
    /// The discretized solution type.
    type State: State;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes the time derivative of `u` at time `t` into `dudt`.
    ///
    /// `dudt` has the same shape as `u`; its previous contents are
    /// unspecified and must be overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated.
    fn derivative(
        &mut self,
        t: f64,
        u: &Self::State,
        dudt: &mut Self::State,
    ) -> Result<(), Self::Error>;

    /// Returns `true` if this equation provides step-size advice via [`dt`].
    ///
    /// [`dt`]: Equation::dt
    fn supports_dt(&self) -> bool {
        false
    }

    /// Returns an upper bound on a stable step size at the given state.
    ///
    /// Only called when [`supports_dt`](Equation::supports_dt) returns
    /// `true`. The default places no bound.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the bound cannot be computed.
    fn dt(&self, _t: f64, _u: &Self::State) -> Result<f64, Self::Error> {
        Ok(f64::INFINITY)
    }
}

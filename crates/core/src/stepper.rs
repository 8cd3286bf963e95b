use crate::Equation;

/// A time-stepping scheme that advances a state by one step of an equation.
///
/// A stepper realizes the equation's derivative as a state update, e.g.
/// forward Euler, a Runge-Kutta method, or an implicit scheme that solves a
/// linear system internally. It advances by exactly the `dt` it is given: it
/// never adjusts the step size and never refuses to step. Step-size control
/// belongs to the caller.
///
/// Steppers may keep workspace states (stages, derivatives) between calls to
/// avoid reallocation, but their contents carry no meaning across steps.
pub trait Stepper<E: Equation> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Advances `u` in place from time `t` to `t + dt`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the equation fails or the scheme cannot
    /// complete the step.
    fn step(
        &mut self,
        equation: &mut E,
        t: f64,
        u: &mut E::State,
        dt: f64,
    ) -> Result<(), Self::Error>;
}

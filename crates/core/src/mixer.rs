use std::convert::Infallible;

/// Updates auxiliary forcing data after a completed step.
///
/// A mixer sees the newly advanced solution and may blend it into the forcing
/// state (relaxation toward a reference, nudging, coupling terms). It must not
/// change the solution itself.
///
/// Closures `FnMut(f64, &U, &mut U)` implement `Mixer`, and `()` is the no-op
/// mixer.
pub trait Mixer<U> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Updates `forcing` given the solution `u` at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the forcing cannot be updated.
    fn mix(&mut self, t: f64, u: &U, forcing: &mut U) -> Result<(), Self::Error>;
}

/// A no-op mixer that leaves the forcing untouched.
impl<U> Mixer<U> for () {
    type Error = Infallible;

    fn mix(&mut self, _t: f64, _u: &U, _forcing: &mut U) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Blanket implementation for mixer closures.
impl<U, F> Mixer<U> for F
where
    F: FnMut(f64, &U, &mut U),
{
    type Error = Infallible;

    fn mix(&mut self, t: f64, u: &U, forcing: &mut U) -> Result<(), Self::Error> {
        self(t, u, forcing);
        Ok(())
    }
}

use crate::StateInfo;

/// When an [`Event`] is emitted relative to the step it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Emitted before a step is taken; `dt` is the step about to be used.
    Step,

    /// Emitted once after the last step of a run; `dt` is the last step
    /// taken, or zero if the run took none.
    Final,
}

/// A read-only view of the integration at one instant.
#[derive(Debug)]
pub struct Event<'a, U> {
    pub phase: Phase,

    /// Number of steps completed so far.
    pub cycle: usize,

    /// Simulation time.
    pub t: f64,

    /// Step size associated with this event (see [`Phase`]).
    pub dt: f64,

    /// The solution at time `t`.
    pub state: &'a U,

    /// The auxiliary forcing at time `t`.
    pub forcing: &'a U,
}

impl<U> Clone for Event<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Event<'_, U> {}

/// Receives integration events for diagnostics, instrumentation, or output.
///
/// Observers only ever see shared references, so they cannot disturb the
/// run. Each observer is initialized once with the [`StateInfo`] of the grid
/// before any event is delivered.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer.
pub trait Observer<U> {
    /// Prepares the observer for states described by `info`.
    ///
    /// The default implementation does nothing.
    fn init(&mut self, _info: &StateInfo) {}

    /// Observes an integration event.
    fn observe(&mut self, event: &Event<'_, U>);
}

/// Blanket implementation for observer closures.
impl<U, F> Observer<U> for F
where
    F: FnMut(&Event<'_, U>),
{
    fn observe(&mut self, event: &Event<'_, U>) {
        self(event);
    }
}

/// A no-op observer.
impl<U> Observer<U> for () {
    fn observe(&mut self, _event: &Event<'_, U>) {}
}

use log::{Level, log};
use march_core::{Event, Observer, Phase, StateInfo};

/// Reports run progress through the `log` facade.
///
/// Logs every `every`-th step event and every final event at the configured
/// level. Installing a logger implementation is up to the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    level: Level,
    every: usize,
}

impl Logger {
    /// Creates a logger that reports every step at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level, every: 1 }
    }

    /// Reports only steps whose cycle is a multiple of `every`.
    ///
    /// An interval of zero reports final events only.
    #[must_use]
    pub fn every(mut self, every: usize) -> Self {
        self.every = every;
        self
    }

    fn reports<U>(&self, event: &Event<'_, U>) -> bool {
        match event.phase {
            Phase::Final => true,
            Phase::Step => self.every > 0 && event.cycle % self.every == 0,
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl<U> Observer<U> for Logger {
    fn init(&mut self, info: &StateInfo) {
        log!(self.level, "observing a state with {} degrees of freedom", info.dofs);
    }

    fn observe(&mut self, event: &Event<'_, U>) {
        if !self.reports(event) {
            return;
        }
        match event.phase {
            Phase::Step => log!(
                self.level,
                "cycle {}: t = {}, dt = {}",
                event.cycle,
                event.t,
                event.dt
            ),
            Phase::Final => log!(
                self.level,
                "finished after {} cycles at t = {} (last dt = {})",
                event.cycle,
                event.t,
                event.dt
            ),
        }
    }
}

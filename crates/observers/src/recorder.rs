use march_core::{Event, Observer, Phase, StateInfo};

/// One observed event, with an owned copy of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<U> {
    pub phase: Phase,
    pub cycle: usize,
    pub t: f64,
    pub dt: f64,
    pub state: U,
}

/// An observer that records every event it sees.
///
/// Recording clones the state on every event, so prefer a [`Probe`] or a
/// closure when only a few values are needed.
///
/// [`Probe`]: crate::Probe
#[derive(Debug, Clone)]
pub struct Recorder<U> {
    info: Option<StateInfo>,
    records: Vec<Record<U>>,
}

impl<U> Recorder<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: None,
            records: Vec::new(),
        }
    }

    /// Returns the state metadata received at registration.
    pub fn info(&self) -> Option<&StateInfo> {
        self.info.as_ref()
    }

    /// Returns all records in the order they were observed.
    pub fn records(&self) -> &[Record<U>] {
        &self.records
    }

    /// Returns the records emitted before each step.
    pub fn steps(&self) -> impl Iterator<Item = &Record<U>> {
        self.records.iter().filter(|r| r.phase == Phase::Step)
    }

    /// Returns the most recent final record.
    pub fn last_final(&self) -> Option<&Record<U>> {
        self.records.iter().rev().find(|r| r.phase == Phase::Final)
    }

    /// Discards all records, keeping the state metadata.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<U> Default for Recorder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Clone> Observer<U> for Recorder<U> {
    fn init(&mut self, info: &StateInfo) {
        self.info = Some(info.clone());
    }

    fn observe(&mut self, event: &Event<'_, U>) {
        self.records.push(Record {
            phase: event.phase,
            cycle: event.cycle,
            t: event.t,
            dt: event.dt,
            state: event.state.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[allow(clippy::ptr_arg)]
    fn event<'a>(phase: Phase, cycle: usize, t: f64, state: &'a Vec<f64>) -> Event<'a, Vec<f64>> {
        Event {
            phase,
            cycle,
            t,
            dt: 0.5,
            state,
            forcing: state,
        }
    }

    #[test]
    fn records_events_with_owned_states() {
        let mut recorder = Recorder::<Vec<f64>>::new();
        recorder.init(&StateInfo::new(2).with_labels(["h"]));

        let mut u = vec![1.0, 2.0];
        recorder.observe(&event(Phase::Step, 0, 0.0, &u));
        u[0] = 3.0;
        recorder.observe(&event(Phase::Step, 1, 0.5, &u));
        recorder.observe(&event(Phase::Final, 2, 1.0, &u));

        assert_eq!(recorder.info().map(|i| i.dofs), Some(2));
        assert_eq!(recorder.records().len(), 3);
        assert_eq!(recorder.records()[0].state, vec![1.0, 2.0]);
        assert_eq!(recorder.steps().count(), 2);

        let last = recorder.last_final().unwrap();
        assert_eq!(last.cycle, 2);
        assert_relative_eq!(last.t, 1.0);
        assert_relative_eq!(last.dt, 0.5);
        assert_eq!(last.state, vec![3.0, 2.0]);
    }

    #[test]
    fn clear_keeps_info() {
        let mut recorder = Recorder::<Vec<f64>>::new();
        recorder.init(&StateInfo::new(1));
        recorder.observe(&event(Phase::Final, 0, 0.0, &vec![0.0]));

        recorder.clear();

        assert!(recorder.records().is_empty());
        assert!(recorder.last_final().is_none());
        assert!(recorder.info().is_some());
    }
}

use log::warn;
use march_core::{Event, Observer, StateInfo};

/// Samples a single degree of freedom at every event as `(t, value)`.
///
/// Works with any state that views as a slice of `f64`. Events whose state
/// has no entry at the probed index are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    index: usize,
    samples: Vec<(f64, f64)>,
}

impl Probe {
    /// Creates a probe for the degree of freedom at `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            samples: Vec::new(),
        }
    }

    /// Returns the probed index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the collected `(t, value)` samples.
    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    /// Returns the most recent sample.
    pub fn last(&self) -> Option<(f64, f64)> {
        self.samples.last().copied()
    }
}

impl<U: AsRef<[f64]>> Observer<U> for Probe {
    fn init(&mut self, info: &StateInfo) {
        if self.index >= info.dofs {
            warn!(
                "probe index {} is outside a state with {} degrees of freedom",
                self.index, info.dofs
            );
        }
    }

    fn observe(&mut self, event: &Event<'_, U>) {
        if let Some(&value) = event.state.as_ref().get(self.index) {
            self.samples.push((event.t, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use march_core::Phase;

    fn observe(probe: &mut Probe, t: f64, state: &[f64; 3]) {
        probe.observe(&Event {
            phase: Phase::Step,
            cycle: 0,
            t,
            dt: 0.1,
            state,
            forcing: state,
        });
    }

    #[test]
    fn samples_one_component() {
        let mut probe = Probe::new(1);
        observe(&mut probe, 0.0, &[0.0, 1.0, 2.0]);
        observe(&mut probe, 0.1, &[0.0, 1.5, 2.0]);
        observe(&mut probe, 0.3, &[0.0, 0.1 + 0.2, 2.0]);

        assert_eq!(probe.samples().len(), 3);
        assert_eq!(probe.samples()[0], (0.0, 1.0));

        let (t, value) = probe.last().unwrap();
        assert_relative_eq!(t, 0.3);
        assert_relative_eq!(value, 0.3, epsilon = 1e-15);
    }

    #[test]
    fn skips_out_of_range_index() {
        let mut probe = Probe::new(5);
        Observer::<[f64; 3]>::init(&mut probe, &StateInfo::new(3));
        observe(&mut probe, 0.0, &[0.0, 1.0, 2.0]);

        assert!(probe.samples().is_empty());
    }
}

mod config;
mod error;
mod progress;


pub use config::{Config, Mode};
pub use error::Error;
pub use progress::Progress;

use std::{cell::RefCell, rc::Rc};

use log::{debug, trace};
use march_core::{Equation, Event, Grid, Mixer, Observer, Phase, State, Stepper};

/// Relative slack within which the remaining interval is covered by one step.
///
/// Without it, floating-point accumulation can leave a sliver of the interval
/// that would cost an extra, vanishingly small step.
const ARRIVAL_SLACK: f64 = 1e-10;

/// An observer shared between the caller and an [`Integrator`].
pub type SharedObserver<U> = Rc<RefCell<dyn Observer<U>>>;

/// Drives the time-stepping loop of a semi-discrete PDE system.
///
/// An `Integrator` owns an [`Equation`], the [`Stepper`] that advances it, a
/// [`Mixer`] (the no-op `()` by default), and an ordered list of
/// [`Observer`]s that it shares with the caller. The state and forcing are
/// owned by the caller and mutated in place.
///
/// Every step runs the same sequence:
///
/// 1. Compute the effective step size (see [`effective_dt`]).
/// 2. Notify every observer, in registration order, with a [`Phase::Step`]
///    event describing the state before the step.
/// 3. Advance the state with the stepper.
/// 4. Advance the simulation clock.
/// 5. Increment the cycle counter.
/// 6. Let the mixer update the forcing from the new state.
///
/// When a run ends, every observer receives one more [`Phase::Final`] event
/// with the final state, so a run of `k` steps produces `k + 1` notifications.
///
/// [`effective_dt`]: Integrator::effective_dt
pub struct Integrator<E, S, M = ()>
where
    E: Equation,
{
    config: Config,
    grid: Rc<dyn Grid>,
    equation: E,
    stepper: S,
    mixer: M,
    observers: Vec<SharedObserver<E::State>>,
    cycle: usize,
}

impl<E, S> Integrator<E, S>
where
    E: Equation,
    S: Stepper<E>,
{
    /// Creates an integrator with the no-op mixer and no observers.
    ///
    /// The cycle counter starts at the configured start cycle in
    /// [`Mode::Cycles`] and at zero otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the config fails validation.
    pub fn new(
        config: Config,
        grid: Rc<dyn Grid>,
        equation: E,
        stepper: S,
    ) -> Result<Self, Error> {
        config
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;

        let cycle = match config.mode {
            Some(Mode::Cycles { start, .. }) => start,
            _ => 0,
        };

        Ok(Self {
            config,
            grid,
            equation,
            stepper,
            mixer: (),
            observers: Vec::new(),
            cycle,
        })
    }
}

impl<E, S, M> Integrator<E, S, M>
where
    E: Equation,
    S: Stepper<E>,
    M: Mixer<E::State>,
{
    /// Replaces the mixer.
    pub fn with_mixer<N>(self, mixer: N) -> Integrator<E, S, N>
    where
        N: Mixer<E::State>,
    {
        Integrator {
            config: self.config,
            grid: self.grid,
            equation: self.equation,
            stepper: self.stepper,
            mixer,
            observers: self.observers,
            cycle: self.cycle,
        }
    }

    /// Appends an observer and initializes it with the grid's [`StateInfo`].
    ///
    /// The observer must not be borrowed by the caller while the integrator
    /// runs.
    ///
    /// [`StateInfo`]: march_core::StateInfo
    pub fn add_observer(&mut self, observer: SharedObserver<E::State>) {
        observer.borrow_mut().init(&self.grid.info());
        self.observers.push(observer);
    }

    /// Appends an observer; see [`add_observer`](Self::add_observer).
    #[must_use]
    pub fn with_observer(mut self, observer: SharedObserver<E::State>) -> Self {
        self.add_observer(observer);
        self
    }

    /// Returns the number of completed steps.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &dyn Grid {
        &*self.grid
    }

    pub fn equation(&self) -> &E {
        &self.equation
    }

    pub fn equation_mut(&mut self) -> &mut E {
        &mut self.equation
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut M {
        &mut self.mixer
    }

    /// Runs the integration described by the configured [`Mode`].
    ///
    /// - [`Mode::Cycles`] takes `end - start` steps from `*t`.
    /// - [`Mode::EndTime`] integrates from `start` to exactly `end`.
    /// - [`Mode::Checkpoints`] integrates through each listed time.
    ///
    /// On success `*t` holds the time reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTermination`] if no mode is configured,
    /// [`Error::DimensionMismatch`] if `u` does not fit the grid, or any error
    /// from the underlying run.
    pub fn time_integrate(
        &mut self,
        t: &mut f64,
        forcing: &mut E::State,
        u: &mut E::State,
    ) -> Result<(), Error> {
        let expected = self.grid.dofs();
        if u.dofs() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: u.dofs(),
            });
        }

        let Some(mode) = self.config.mode.clone() else {
            return Err(Error::NoTermination);
        };

        let dt = self.config.dt;
        let progress = match mode {
            Mode::Cycles { start, end } => {
                self.steps(*t, dt, end - start, forcing, u)?
            }
            Mode::EndTime { start, end } => self.time(start, end, dt, forcing, u)?,
            Mode::Checkpoints(times) => self.list(&times, forcing, u)?,
        };

        *t = progress.time;
        Ok(())
    }

    /// Integrates from `t0` to exactly `t1` with nominal step `dt`.
    ///
    /// Each step is bounded by [`effective_dt`](Self::effective_dt). The step
    /// that reaches `t1` is the smaller of that bound and the remaining
    /// interval, and the clock is set to `t1` itself, so the run never
    /// overshoots or falls short by a rounding error. When `t0 == t1` no step
    /// is taken and observers receive only the final event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedInterval`] if `t1 < t0`,
    /// [`Error::NonPositiveStep`] if a step collapses to zero, or any error
    /// raised while stepping.
    pub fn time(
        &mut self,
        t0: f64,
        t1: f64,
        dt: f64,
        forcing: &mut E::State,
        u: &mut E::State,
    ) -> Result<Progress, Error> {
        if t0.is_nan() || t1.is_nan() || t1 < t0 {
            return Err(Error::InvertedInterval { start: t0, end: t1 });
        }

        debug!("integrating from t = {t0} to t = {t1} with nominal dt = {dt}");

        let mut t = t0;
        let mut steps = 0;
        let mut last_dt = 0.0;

        while t < t1 {
            let allowed = self.effective_dt(t, u, dt)?;

            // The stepper never sees more than the allowed step; within the
            // slack only the clock is snapped to `t1`.
            let remaining = t1 - t;
            let arrives = remaining <= allowed * (1.0 + ARRIVAL_SLACK);
            let h = remaining.min(allowed);

            let next = if arrives { t1 } else { t + h };
            if next <= t {
                return Err(Error::NonPositiveStep { t, dt: next - t });
            }

            self.advance(t, h, next, forcing, u)?;
            t = next;
            steps += 1;
            last_dt = h;
        }

        self.notify(Phase::Final, t, last_dt, forcing, u);
        debug!("reached t = {t} after {steps} steps (cycle {})", self.cycle);

        Ok(Progress { time: t, steps })
    }

    /// Takes exactly `n` steps from `t0` with nominal step `dt`.
    ///
    /// Step sizes follow [`effective_dt`](Self::effective_dt) but no end time
    /// is targeted. The reached time is returned in [`Progress::time`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveStep`] if a step collapses to zero, or any
    /// error raised while stepping.
    pub fn steps(
        &mut self,
        t0: f64,
        dt: f64,
        n: usize,
        forcing: &mut E::State,
        u: &mut E::State,
    ) -> Result<Progress, Error> {
        debug!("taking {n} steps from t = {t0} with nominal dt = {dt}");

        let mut t = t0;
        let mut last_dt = 0.0;

        for _ in 0..n {
            let h = self.effective_dt(t, u, dt)?;
            let next = t + h;
            self.advance(t, h, next, forcing, u)?;
            t = next;
            last_dt = h;
        }

        self.notify(Phase::Final, t, last_dt, forcing, u);
        debug!("reached t = {t} after {n} steps (cycle {})", self.cycle);

        Ok(Progress { time: t, steps: n })
    }

    /// Integrates through each time in `times`, which must be strictly
    /// increasing.
    ///
    /// Consecutive pairs `(a, b)` run as `time(a, b, b - a)`, so every segment
    /// ends exactly on its checkpoint and observers see one final event per
    /// segment. A single checkpoint takes no steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCheckpoints`] for an empty list,
    /// [`Error::UnorderedCheckpoints`] if the times are not strictly
    /// increasing, or any error from a segment.
    pub fn list(
        &mut self,
        times: &[f64],
        forcing: &mut E::State,
        u: &mut E::State,
    ) -> Result<Progress, Error> {
        let Some(&first) = times.first() else {
            return Err(Error::EmptyCheckpoints);
        };

        if let Some(index) = times.windows(2).position(|pair| !(pair[0] < pair[1])) {
            return Err(Error::UnorderedCheckpoints { index: index + 1 });
        }

        let mut progress = Progress {
            time: first,
            steps: 0,
        };

        for pair in times.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            let segment = self.time(t0, t1, t1 - t0, forcing, u)?;
            progress.time = segment.time;
            progress.steps += segment.steps;
        }

        Ok(progress)
    }

    /// Returns the step size to use from state `u` at time `t`.
    ///
    /// The requested `dt` is clamped to `[dt_min, dt_max]`. If the equation
    /// supports step-size advice, the result is further limited to
    /// `cfl * equation.dt(t, u)`. The integrator itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveStep`] if the result is not positive,
    /// [`Error::AdviceBelowMinimum`] if the advice forces the step below
    /// `dt_min`, or [`Error::Equation`] if the advice cannot be computed.
    pub fn effective_dt(&self, t: f64, u: &E::State, dt: f64) -> Result<f64, Error> {
        let Config {
            dt_min, dt_max, cfl, ..
        } = self.config;

        let mut h = dt.clamp(dt_min, dt_max);

        if self.equation.supports_dt() {
            let advice = cfl * self.equation.dt(t, u).map_err(Error::equation)?;

            if advice.is_nan() {
                return Err(Error::NonPositiveStep { t, dt: advice });
            }

            if advice < h {
                if advice > 0.0 && advice < dt_min {
                    return Err(Error::AdviceBelowMinimum {
                        t,
                        advice,
                        dt_min,
                    });
                }
                h = advice;
            }
        }

        if h.is_nan() || h <= 0.0 {
            return Err(Error::NonPositiveStep { t, dt: h });
        }

        Ok(h)
    }

    /// Runs one step: notify, advance, count, mix.
    fn advance(
        &mut self,
        t: f64,
        h: f64,
        next: f64,
        forcing: &mut E::State,
        u: &mut E::State,
    ) -> Result<(), Error> {
        self.notify(Phase::Step, t, h, forcing, u);

        self.stepper
            .step(&mut self.equation, t, u, h)
            .map_err(Error::step)?;
        self.cycle += 1;
        trace!("cycle {}: t = {next}, dt = {h}", self.cycle);

        self.mixer.mix(next, u, forcing).map_err(Error::mixer)
    }

    fn notify(&self, phase: Phase, t: f64, dt: f64, forcing: &E::State, u: &E::State) {
        let event = Event {
            phase,
            cycle: self.cycle,
            t,
            dt,
            state: u,
            forcing,
        };

        for observer in &self.observers {
            observer.borrow_mut().observe(&event);
        }
    }
}

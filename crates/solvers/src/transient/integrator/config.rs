/// How a call to [`Integrator::time_integrate`](super::Integrator::time_integrate)
/// decides when to stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Take `end - start` steps. The cycle counter starts at `start`.
    Cycles { start: usize, end: usize },

    /// Integrate from `start` to exactly `end`.
    EndTime { start: f64, end: f64 },

    /// Integrate through each time of a strictly increasing list.
    Checkpoints(Vec<f64>),
}

/// Configuration of an integration run.
///
/// The step actually taken is the nominal `dt` clamped to
/// `[dt_min, dt_max]`, further limited to `cfl` times the equation's stable
/// step advice when the equation provides it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct Config {
    /// Termination mode; a run without one fails.
    pub mode: Option<Mode>,

    /// Nominal step size.
    pub dt: f64,

    pub dt_min: f64,
    pub dt_max: f64,

    /// Safety factor applied to the equation's step-size advice.
    pub cfl: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: None,
            dt: 1.0,
            dt_min: 0.0,
            dt_max: f64::INFINITY,
            cfl: 1.0,
        }
    }
}

impl Config {
    /// Creates a config that runs `n` steps of size `dt`.
    #[must_use]
    pub fn cycles(n: usize, dt: f64) -> Self {
        Self {
            mode: Some(Mode::Cycles { start: 0, end: n }),
            dt,
            ..Self::default()
        }
    }

    /// Creates a config that integrates from `start` to `end` with nominal
    /// step `dt`.
    #[must_use]
    pub fn end_time(start: f64, end: f64, dt: f64) -> Self {
        Self {
            mode: Some(Mode::EndTime { start, end }),
            dt,
            ..Self::default()
        }
    }

    /// Creates a config that integrates through a list of checkpoint times.
    #[must_use]
    pub fn checkpoints(times: impl Into<Vec<f64>>) -> Self {
        Self {
            mode: Some(Mode::Checkpoints(times.into())),
            ..Self::default()
        }
    }

    /// Returns the config with new step-size bounds.
    #[must_use]
    pub fn with_bounds(mut self, dt_min: f64, dt_max: f64) -> Self {
        self.dt_min = dt_min;
        self.dt_max = dt_max;
        self
    }

    /// Returns the config with a new CFL safety factor.
    #[must_use]
    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }

    /// Validates step sizes, bounds, the safety factor, and the cycle range.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err("dt must be finite and positive");
        }
        if !self.dt_min.is_finite() || self.dt_min < 0.0 {
            return Err("dt_min must be finite and non-negative");
        }
        if self.dt_max.is_nan() || self.dt_max < self.dt_min {
            return Err("dt_max must be at least dt_min");
        }
        if !self.cfl.is_finite() || self.cfl <= 0.0 {
            return Err("cfl must be finite and positive");
        }
        if matches!(self.mode, Some(Mode::Cycles { start, end }) if start > end) {
            return Err("cycle range must not end before it starts");
        }
        Ok(())
    }
}

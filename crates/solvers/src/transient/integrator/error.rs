use std::error::Error as StdError;

use thiserror::Error;

/// Errors that stop an integration run.
///
/// Every variant is fatal: the run ends immediately and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("no termination mode configured")]
    NoTermination,

    #[error("non-positive step size {dt} at t = {t}")]
    NonPositiveStep { t: f64, dt: f64 },

    #[error("step-size advice {advice} at t = {t} is below dt_min = {dt_min}")]
    AdviceBelowMinimum { t: f64, advice: f64, dt_min: f64 },

    #[error("end time {end} precedes start time {start}")]
    InvertedInterval { start: f64, end: f64 },

    #[error("checkpoint list is empty")]
    EmptyCheckpoints,

    #[error("checkpoint times must be strictly increasing (index {index})")]
    UnorderedCheckpoints { index: usize },

    #[error("state has {found} degrees of freedom but the grid has {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("equation error: {0}")]
    Equation(#[source] Box<dyn StdError + Send + Sync>),

    #[error("step failed: {0}")]
    Step(#[source] Box<dyn StdError + Send + Sync>),

    #[error("mixer error: {0}")]
    Mixer(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn equation<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Equation(Box::new(err))
    }

    pub(crate) fn step<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Step(Box::new(err))
    }

    pub(crate) fn mixer<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Mixer(Box::new(err))
    }
}

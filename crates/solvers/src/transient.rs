//! Time integration of semi-discrete PDE systems.
//!
//! An [`Integrator`] drives a run: it bounds each step size, notifies
//! observers, asks a [`Stepper`](march_core::Stepper) to advance the state
//! with an [`Equation`](march_core::Equation), advances the clock and cycle
//! counter, and finally lets the [`Mixer`](march_core::Mixer) update the
//! forcing.
//!
//! # Steppers
//!
//! - [`ForwardEuler`] — first-order explicit
//! - [`SspRk3`] — third-order strong-stability-preserving Runge-Kutta
//! - [`Rk4`] — classic fourth-order Runge-Kutta
//! - [`ImplicitEuler`] — first-order implicit for [`LinearEquation`]s, backed
//!   by a [`LinearSolver`](march_core::linear::LinearSolver)

mod forward_euler;
mod implicit_euler;
mod integrator;
mod rk4;
mod ssp_rk3;
mod workspace;

#[cfg(test)]
mod test_utils;

pub use forward_euler::ForwardEuler;
pub use implicit_euler::{ImplicitError, ImplicitEuler, LinearEquation};
pub use integrator::{Config, Error, Integrator, Mode, Progress, SharedObserver};
pub use rk4::Rk4;
pub use ssp_rk3::SspRk3;

//! Time integrators, steppers, and iterative linear solvers.
//!
//! # Modules
//!
//! - [`transient`] — the [`Integrator`](transient::Integrator) that drives a
//!   run, plus explicit and implicit [`Stepper`](march_core::Stepper)s
//! - [`linear`] — [`LinearSolver`](march_core::linear::LinearSolver)
//!   implementations, operators, and preconditioners

pub mod linear;
pub mod transient;

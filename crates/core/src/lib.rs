//! Core contracts for time-marching discretized PDE systems.
//!
//! This crate defines the shared abstractions that integrators, steppers,
//! linear solvers, and observers build on:
//!
//! - [`State`] — a discretized solution that supports the vector operations
//!   time-stepping schemes need
//! - [`Grid`] — the spatial layout a state lives on, described by [`StateInfo`]
//! - [`Equation`] — produces a time derivative and optionally advises a
//!   stable step size
//! - [`Stepper`] — advances a state by exactly one step of an [`Equation`]
//! - [`Mixer`] — post-step update of auxiliary forcing data
//! - [`Observer`] — read-only hook receiving an [`Event`] around each step
//! - [`linear`] — the iterative linear-solver contract used by implicit terms

mod equation;
mod grid;
mod mixer;
mod observer;
mod state;
mod stepper;

pub mod linear;

pub use equation::Equation;
pub use grid::{Grid, StateInfo};
pub use mixer::Mixer;
pub use observer::{Event, Observer, Phase};
pub use state::State;
pub use stepper::Stepper;

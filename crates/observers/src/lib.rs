//! Reusable observers for March time integration runs.
//!
//! Each type here implements [`Observer`] and can be registered with an
//! integrator, usually wrapped in `Rc<RefCell<_>>` so its contents can be
//! read once the run ends.
//!
//! - [`Recorder`] — keeps a copy of every observed state
//! - [`Probe`] — samples one degree of freedom over time
//! - [`Logger`] — reports progress through the `log` facade
//!
//! [`Observer`]: march_core::Observer

mod logger;
mod probe;
mod recorder;

pub use logger::Logger;
pub use probe::Probe;
pub use recorder::{Record, Recorder};

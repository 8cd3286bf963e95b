//! Shared models for the workspace integration tests.

pub mod test_components;

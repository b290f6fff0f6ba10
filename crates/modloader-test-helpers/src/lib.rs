//! Test utilities and fixtures for the module loader
//!
//! This crate provides shared test helpers that can be used by both
//! unit tests (#[cfg(test)]) and integration tests (tests/ directory).

pub mod counters;
pub mod fixtures;

pub use counters::{counted, InvocationCounter};

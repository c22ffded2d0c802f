//! Crate-internal test suites and shared helpers.

mod behaviour;
pub(crate) mod support;

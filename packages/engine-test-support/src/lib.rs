//! Shared helpers for the engine's test suites: one-time logging setup and
//! unique test-data generation.

pub mod test_logging;
pub mod unique_helpers;

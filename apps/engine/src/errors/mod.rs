//! Error handling for the fabula engine.

pub mod domain;

pub use domain::GameError;

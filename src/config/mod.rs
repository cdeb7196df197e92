//! Configuration surface handed to the core by its caller.

pub mod error;
pub mod policy;

pub use error::ConfigError;
pub use policy::{Policy, PredictionPolicy, ScoringPolicy};

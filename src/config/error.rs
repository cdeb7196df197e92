use std::error::Error;
use std::fmt;

use crate::refusal::codes::RefusalCode;

/// Fatal configuration problems, detected before any parsing or scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NegativeWeight { name: &'static str, value: f64 },
    NonFiniteWeight { name: &'static str, value: f64 },
    ZeroWeightSum,
    InvalidPolicy { field: &'static str, reason: String },
    PolicyFile { path: String, message: String },
    SuggestionsFile { path: String, message: String },
}

impl ConfigError {
    pub const fn code(&self) -> RefusalCode {
        match self {
            ConfigError::NegativeWeight { .. }
            | ConfigError::NonFiniteWeight { .. }
            | ConfigError::ZeroWeightSum => RefusalCode::Weights,
            ConfigError::InvalidPolicy { .. } | ConfigError::PolicyFile { .. } => {
                RefusalCode::Policy
            }
            ConfigError::SuggestionsFile { .. } => RefusalCode::Suggestions,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeWeight { name, value } => {
                write!(f, "{name} weight must be >= 0 (got {value})")
            }
            ConfigError::NonFiniteWeight { name, value } => {
                write!(f, "{name} weight must be a finite number (got {value})")
            }
            ConfigError::ZeroWeightSum => f.write_str("priority weights must sum to more than 0"),
            ConfigError::InvalidPolicy { field, reason } => write!(f, "policy {field}: {reason}"),
            ConfigError::PolicyFile { path, message } => {
                write!(f, "cannot load policy {path}: {message}")
            }
            ConfigError::SuggestionsFile { path, message } => {
                write!(f, "cannot load suggestions {path}: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

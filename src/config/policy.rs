//! Tunable heuristic constants.
//!
//! None of these values is derived from theory; they are defaults that a
//! project can override with a JSON policy file (`--policy`). Unknown keys
//! are rejected so typos do not silently fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const DEFAULT_CROSS_IMPACT_BOOST: f64 = 0.1;
pub const DEFAULT_BLOCKING_DEPENDENCY_THRESHOLD: usize = 3;
pub const DEFAULT_HIGH_CONFIDENCE_MAX_ITEMS: usize = 5;
pub const DEFAULT_LOW_CONFIDENCE_BLOCKING_RATIO: f64 = 0.5;
pub const DEFAULT_LIKELIHOOD_COVERAGE_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringPolicy {
    /// Added to coverage impact for cross bins, capped at 1.0.
    pub cross_impact_boost: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            cross_impact_boost: DEFAULT_CROSS_IMPACT_BOOST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictionPolicy {
    /// A Very Hard suggestion with at least this many dependencies blocks.
    pub blocking_dependency_threshold: usize,
    /// High confidence requires at most this many uncovered items.
    pub high_confidence_max_items: usize,
    /// Blocking ratio above which confidence is Low.
    pub low_confidence_blocking_ratio: f64,
    /// Lower bound of the overall-coverage factor applied to likelihood.
    pub likelihood_coverage_floor: f64,
}

impl Default for PredictionPolicy {
    fn default() -> Self {
        Self {
            blocking_dependency_threshold: DEFAULT_BLOCKING_DEPENDENCY_THRESHOLD,
            high_confidence_max_items: DEFAULT_HIGH_CONFIDENCE_MAX_ITEMS,
            low_confidence_blocking_ratio: DEFAULT_LOW_CONFIDENCE_BLOCKING_RATIO,
            likelihood_coverage_floor: DEFAULT_LIKELIHOOD_COVERAGE_FLOOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    pub scoring: ScoringPolicy,
    pub prediction: PredictionPolicy,
}

impl Policy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("scoring.cross_impact_boost", self.scoring.cross_impact_boost)?;
        check_unit(
            "prediction.low_confidence_blocking_ratio",
            self.prediction.low_confidence_blocking_ratio,
        )?;
        check_unit(
            "prediction.likelihood_coverage_floor",
            self.prediction.likelihood_coverage_floor,
        )?;
        Ok(())
    }

    /// Parse and validate a JSON policy document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let policy: Policy =
            serde_json::from_str(text).map_err(|err| ConfigError::InvalidPolicy {
                field: "document",
                reason: err.to_string(),
            })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|err| ConfigError::PolicyFile {
            path: display.clone(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&text).map_err(|err| match err {
            ConfigError::InvalidPolicy { reason, .. } => ConfigError::PolicyFile {
                path: display,
                message: reason,
            },
            other => other,
        })
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidPolicy {
            field,
            reason: format!("must be within [0, 1] (got {value})"),
        });
    }
    Ok(())
}

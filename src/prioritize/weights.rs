use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub const DEFAULT_IMPACT_WEIGHT: f64 = 0.5;
pub const DEFAULT_DIFFICULTY_WEIGHT: f64 = 0.3;
pub const DEFAULT_DEPENDENCY_WEIGHT: f64 = 0.2;

/// Linear weights of the three priority factors.
///
/// Weights are used as given. They need not sum to 1, so a score may exceed
/// 1 when the sum does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub impact: f64,
    pub difficulty: f64,
    pub dependency: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            impact: DEFAULT_IMPACT_WEIGHT,
            difficulty: DEFAULT_DIFFICULTY_WEIGHT,
            dependency: DEFAULT_DEPENDENCY_WEIGHT,
        }
    }
}

impl PriorityWeights {
    pub const fn new(impact: f64, difficulty: f64, dependency: f64) -> Self {
        Self {
            impact,
            difficulty,
            dependency,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }
        if self.sum() <= 0.0 {
            return Err(ConfigError::ZeroWeightSum);
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.impact + self.difficulty + self.dependency
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("impact", self.impact),
            ("difficulty", self.difficulty),
            ("dependency", self.dependency),
        ]
    }
}

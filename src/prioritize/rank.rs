//! Weighted scoring and stable ranking of suggestions.

use serde::Serialize;
use tracing::debug;

use crate::config::{ConfigError, ScoringPolicy};
use crate::model::{CoverageReport, ScopeIndex};
use crate::suggest::TestSuggestion;

use super::score::ScoreBreakdown;
use super::weights::PriorityWeights;

/// A suggestion with its score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedSuggestion {
    #[serde(flatten)]
    pub suggestion: TestSuggestion,
    pub priority_score: f64,
    pub rank: usize,
    pub factors: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Prioritizer {
    weights: PriorityWeights,
    policy: ScoringPolicy,
}

impl Prioritizer {
    /// Validates the weights up front so ranking itself cannot fail.
    pub fn new(weights: PriorityWeights, policy: ScoringPolicy) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights, policy })
    }

    pub fn weights(&self) -> PriorityWeights {
        self.weights
    }

    pub fn rank(
        &self,
        suggestions: Vec<TestSuggestion>,
        report: &CoverageReport,
    ) -> Vec<PrioritizedSuggestion> {
        let index = ScopeIndex::build(report);
        let mut scored: Vec<PrioritizedSuggestion> = suggestions
            .into_iter()
            .map(|suggestion| {
                let factors = ScoreBreakdown::for_suggestion(&suggestion, &index, &self.policy);
                PrioritizedSuggestion {
                    priority_score: factors.weighted(&self.weights),
                    rank: 0,
                    factors,
                    suggestion,
                }
            })
            .collect();

        // sort_by is stable: equal scores keep generation order.
        scored.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        for (position, entry) in scored.iter_mut().enumerate() {
            entry.rank = position + 1;
        }
        debug!(ranked = scored.len(), "prioritization complete");
        scored
    }
}

/// Score and rank with the default scoring policy.
pub fn prioritize(
    suggestions: Vec<TestSuggestion>,
    report: &CoverageReport,
    weights: &PriorityWeights,
) -> Result<Vec<PrioritizedSuggestion>, ConfigError> {
    let prioritizer = Prioritizer::new(*weights, ScoringPolicy::default())?;
    Ok(prioritizer.rank(suggestions, report))
}

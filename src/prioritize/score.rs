//! Per-suggestion priority factors, each in [0, 1].

use serde::Serialize;
use tracing::warn;

use crate::config::ScoringPolicy;
use crate::model::{ScopeIndex, ScopeKind};
use crate::suggest::TestSuggestion;

use super::weights::PriorityWeights;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub coverage_impact: f64,
    pub inverse_difficulty: f64,
    pub dependency_score: f64,
}

impl ScoreBreakdown {
    pub fn for_suggestion(
        suggestion: &TestSuggestion,
        index: &ScopeIndex<'_>,
        policy: &ScoringPolicy,
    ) -> Self {
        let coverage_impact = match index.resolve(&suggestion.target) {
            Some(scope) => coverage_impact(scope.coverage_percent, scope.kind, policy),
            None => {
                warn!(target_bin = %suggestion.target, "suggestion target not found in report, impact is 0");
                0.0
            }
        };
        Self {
            coverage_impact,
            inverse_difficulty: suggestion.difficulty.inverse_difficulty(),
            dependency_score: dependency_score(suggestion.dependency_count()),
        }
    }

    pub fn weighted(&self, weights: &PriorityWeights) -> f64 {
        weights.impact * self.coverage_impact
            + weights.difficulty * self.inverse_difficulty
            + weights.dependency * self.dependency_score
    }
}

/// Lower scope coverage means higher impact; cross bins get a capped boost.
pub fn coverage_impact(scope_percent: f64, kind: ScopeKind, policy: &ScoringPolicy) -> f64 {
    let base = (1.0 - scope_percent / 100.0).clamp(0.0, 1.0);
    match kind {
        ScopeKind::Cross => (base + policy.cross_impact_boost).min(1.0),
        ScopeKind::Coverpoint => base,
    }
}

#[inline]
pub fn dependency_score(count: usize) -> f64 {
    1.0 / (1.0 + count as f64)
}

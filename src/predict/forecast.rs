//! Closure forecast: effort, likelihood, and blocking items.
//!
//! The forecast assumes each suggestion fully closes its target and that
//! blocking items never close. All thresholds come from
//! [`PredictionPolicy`].

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::PredictionPolicy;
use crate::model::CoverageReport;
use crate::prioritize::PrioritizedSuggestion;

use super::blocking::{self, BlockingBin};

/// Estimated effort to close every gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClosureTime {
    Hours(f64),
    /// Gaps exist but nothing was suggested for them.
    Indeterminate,
}

impl ClosureTime {
    pub fn hours(self) -> Option<f64> {
        match self {
            ClosureTime::Hours(hours) => Some(hours),
            ClosureTime::Indeterminate => None,
        }
    }
}

impl Serialize for ClosureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClosureTime::Hours(hours) => serializer.serialize_f64(*hours),
            ClosureTime::Indeterminate => serializer.serialize_str("indeterminate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosurePrediction {
    pub estimated_time_to_100_percent_hours: ClosureTime,
    pub likelihood_of_100_percent: f64,
    pub blocking_bins: Vec<BlockingBin>,
    pub predicted_final_coverage_percent: f64,
    pub confidence_level: ConfidenceLevel,
    pub total_uncovered_items: usize,
    pub blocking_ratio: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClosurePredictor {
    policy: PredictionPolicy,
}

impl ClosurePredictor {
    pub fn new(policy: PredictionPolicy) -> Self {
        Self { policy }
    }

    pub fn predict(
        &self,
        report: &CoverageReport,
        prioritized: &[PrioritizedSuggestion],
    ) -> ClosurePrediction {
        let items = report.all_uncovered_items();
        let total = items.len();
        let scan = blocking::scan(&items, prioritized, &self.policy);

        let time = if prioritized.is_empty() && total > 0 {
            ClosureTime::Indeterminate
        } else {
            ClosureTime::Hours(
                prioritized
                    .iter()
                    .map(|p| p.suggestion.estimated_time_hours)
                    .sum(),
            )
        };

        let blocking_ratio = scan.blocking.len() as f64 / total.max(1) as f64;
        let overall = report.overall_coverage_percent.clamp(0.0, 100.0);
        let likelihood = if total == 0 {
            1.0
        } else {
            let suggested_fraction = scan.suggested as f64 / total as f64;
            let blend = (suggested_fraction + (1.0 - blocking_ratio)) / 2.0;
            let floor = self.policy.likelihood_coverage_floor;
            let coverage_factor = floor + (1.0 - floor) * overall / 100.0;
            (blend * coverage_factor).clamp(0.0, 1.0)
        };
        let predicted_final = overall + (1.0 - blocking_ratio) * (100.0 - overall);
        let confidence = self.confidence(total, blocking_ratio);

        debug!(
            uncovered = total,
            blocking = scan.blocking.len(),
            likelihood,
            "closure prediction complete"
        );
        ClosurePrediction {
            estimated_time_to_100_percent_hours: time,
            likelihood_of_100_percent: likelihood,
            blocking_bins: scan.blocking,
            predicted_final_coverage_percent: predicted_final,
            confidence_level: confidence,
            total_uncovered_items: total,
            blocking_ratio,
        }
    }

    fn confidence(&self, total: usize, blocking_ratio: f64) -> ConfidenceLevel {
        if blocking_ratio > self.policy.low_confidence_blocking_ratio {
            ConfidenceLevel::Low
        } else if total <= self.policy.high_confidence_max_items && blocking_ratio == 0.0 {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Medium
        }
    }
}

/// Forecast with the default prediction policy.
pub fn predict(report: &CoverageReport, prioritized: &[PrioritizedSuggestion]) -> ClosurePrediction {
    ClosurePredictor::default().predict(report, prioritized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::predict::blocking::BlockingReason;
    use crate::prioritize::{PriorityWeights, prioritize};
    use crate::suggest::{Difficulty, TestSuggestion};

    const THREE_GAPS: &str = "\
Design: d
Overall Coverage: 40%
Covergroup: cg
Coverpoint: cp
Bin: a - Hits: 0 - Status: Uncovered
Bin: b - Hits: 0 - Status: Uncovered
Bin: c - Hits: 0 - Status: Uncovered
Bin: d - Hits: 2 - Status: Covered
";

    fn ranked(report: &CoverageReport, tweak: impl Fn(&mut TestSuggestion)) -> Vec<PrioritizedSuggestion> {
        let suggestions = report
            .all_uncovered_items()
            .into_iter()
            .map(|item| {
                let mut s = TestSuggestion::placeholder(item.key);
                tweak(&mut s);
                s
            })
            .collect();
        prioritize(suggestions, report, &PriorityWeights::default()).expect("weights")
    }

    #[test]
    fn zero_suggestions_block_everything() {
        let report = parse(THREE_GAPS).expect("parse").report;
        let prediction = predict(&report, &[]);
        assert_eq!(prediction.blocking_bins.len(), 3);
        assert!(prediction
            .blocking_bins
            .iter()
            .all(|b| b.reason == BlockingReason::NoSuggestion));
        assert_eq!(prediction.likelihood_of_100_percent, 0.0);
        assert_eq!(prediction.estimated_time_to_100_percent_hours, ClosureTime::Indeterminate);
        assert_eq!(prediction.predicted_final_coverage_percent, 40.0);
        assert_eq!(prediction.confidence_level, ConfidenceLevel::Low);
    }

    #[test]
    fn nothing_uncovered_is_certain() {
        let report = parse("Design: d\nOverall Coverage: 100%\nCovergroup: cg\nCoverpoint: cp\nBin: a - Hits: 1 - Status: Covered\n")
            .expect("parse")
            .report;
        let prediction = predict(&report, &[]);
        assert_eq!(prediction.estimated_time_to_100_percent_hours, ClosureTime::Hours(0.0));
        assert_eq!(prediction.likelihood_of_100_percent, 1.0);
        assert!(prediction.blocking_bins.is_empty());
        assert_eq!(prediction.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn full_suggestion_set_depends_on_overall_only() {
        let report = parse(THREE_GAPS).expect("parse").report;
        let prediction = predict(&report, &ranked(&report, |_| {}));
        assert_eq!(prediction.blocking_ratio, 0.0);
        // floor 0.5 + 0.5 * 0.4
        assert!((prediction.likelihood_of_100_percent - 0.7).abs() < 1e-12);
        assert_eq!(prediction.predicted_final_coverage_percent, 100.0);
        assert_eq!(prediction.estimated_time_to_100_percent_hours, ClosureTime::Hours(12.0));
        assert_eq!(prediction.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn unclosable_suggestions_lower_the_forecast() {
        let report = parse(THREE_GAPS).expect("parse").report;
        let prioritized = ranked(&report, |s| {
            if s.target.bin == "b" {
                s.difficulty = Difficulty::VeryHard;
                s.dependencies = ["x", "y", "z"].iter().map(|d| d.to_string()).collect();
            }
        });
        let prediction = predict(&report, &prioritized);
        assert_eq!(prediction.blocking_bins.len(), 1);
        assert_eq!(prediction.blocking_bins[0].target.bin, "b");
        assert!((prediction.blocking_ratio - 1.0 / 3.0).abs() < 1e-12);
        assert!((prediction.predicted_final_coverage_percent - 80.0).abs() < 1e-9);
        assert_eq!(prediction.confidence_level, ConfidenceLevel::Medium);
        // mean(1, 2/3) * 0.7
        assert!((prediction.likelihood_of_100_percent - (5.0 / 6.0) * 0.7).abs() < 1e-12);
    }

    #[test]
    fn policy_thresholds_are_honored() {
        let report = parse(THREE_GAPS).expect("parse").report;
        let policy = PredictionPolicy {
            high_confidence_max_items: 2,
            ..PredictionPolicy::default()
        };
        let prediction = ClosurePredictor::new(policy).predict(&report, &ranked(&report, |_| {}));
        assert_eq!(prediction.confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn indeterminate_time_serializes_as_string() {
        let report = parse(THREE_GAPS).expect("parse").report;
        let value = serde_json::to_value(predict(&report, &[])).expect("json");
        assert_eq!(value["estimated_time_to_100_percent_hours"], "indeterminate");
        assert_eq!(value["confidence_level"], "low");
        assert_eq!(value["blocking_bins"][0]["severity"], "medium");
    }
}

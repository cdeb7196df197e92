// JSON output record assembly

use serde::Serialize;

use crate::cli::exit::Outcome as ExitOutcome;
use crate::model::CoverageReport;
use crate::parse::ParseAnomaly;
use crate::predict::ClosurePrediction;
use crate::prioritize::{PrioritizedSuggestion, PriorityWeights};
use crate::refusal::codes::RefusalCode;

pub const OUTPUT_VERSION: &str = "covgap.v0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    NoGaps,
    GapsFound,
    Refusal,
}

impl From<ExitOutcome> for Outcome {
    fn from(outcome: ExitOutcome) -> Self {
        match outcome {
            ExitOutcome::NoGaps => Outcome::NoGaps,
            ExitOutcome::GapsFound => Outcome::GapsFound,
            ExitOutcome::Refusal => Outcome::Refusal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub design_name: String,
    pub overall_coverage: f64,
    pub covergroups: usize,
    pub total_bins: usize,
    pub covered_bins: usize,
    pub ignored_bins: usize,
    pub uncovered_bins_count: usize,
    pub uncovered_crosses_count: usize,
}

impl CoverageSummary {
    pub fn from_report(report: &CoverageReport) -> Self {
        Self {
            design_name: report.design_name.clone(),
            overall_coverage: report.overall_coverage_percent,
            covergroups: report.covergroups.len(),
            total_bins: report.total_bins(),
            covered_bins: report.covered_bins(),
            ignored_bins: report.ignored_bins(),
            uncovered_bins_count: report.all_uncovered_bins().len(),
            uncovered_crosses_count: report.all_uncovered_crosses().len(),
        }
    }

    pub fn uncovered_total(&self) -> usize {
        self.uncovered_bins_count + self.uncovered_crosses_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub weights: PriorityWeights,
    pub max_suggestions: Option<usize>,
    pub prediction_enabled: bool,
    pub design_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refusal {
    pub code: String,
    pub reason: String,
    pub message: String,
}

impl Refusal {
    pub fn new(code: RefusalCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            reason: code.reason().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonOutput {
    pub version: &'static str,
    pub outcome: Outcome,
    pub coverage_report: Option<CoverageSummary>,
    pub settings: Option<Settings>,
    /// Suggestions generated before `max_suggestions` was applied.
    pub total_suggestions: usize,
    pub placeholder_suggestions: usize,
    pub test_suggestions: Vec<PrioritizedSuggestion>,
    pub prediction: Option<ClosurePrediction>,
    pub anomalies: Vec<ParseAnomaly>,
    pub refusal: Option<Refusal>,
}

/// Everything a successful analysis contributes to the record.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub summary: CoverageSummary,
    pub settings: Settings,
    pub total_suggestions: usize,
    pub placeholder_suggestions: usize,
    pub test_suggestions: Vec<PrioritizedSuggestion>,
    pub prediction: Option<ClosurePrediction>,
    pub anomalies: Vec<ParseAnomaly>,
}

impl JsonOutput {
    pub fn analysis(record: AnalysisRecord) -> Self {
        let outcome = if record.summary.uncovered_total() == 0 {
            Outcome::NoGaps
        } else {
            Outcome::GapsFound
        };
        Self {
            version: OUTPUT_VERSION,
            outcome,
            coverage_report: Some(record.summary),
            settings: Some(record.settings),
            total_suggestions: record.total_suggestions,
            placeholder_suggestions: record.placeholder_suggestions,
            test_suggestions: record.test_suggestions,
            prediction: record.prediction,
            anomalies: record.anomalies,
            refusal: None,
        }
    }

    pub fn refusal(refusal: Refusal) -> Self {
        Self {
            version: OUTPUT_VERSION,
            outcome: Outcome::Refusal,
            coverage_report: None,
            settings: None,
            total_suggestions: 0,
            placeholder_suggestions: 0,
            test_suggestions: Vec::new(),
            prediction: None,
            anomalies: Vec::new(),
            refusal: Some(refusal),
        }
    }
}

pub fn render_json(output: &JsonOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string(output)
}

pub fn render_json_pretty(output: &JsonOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

use std::path::PathBuf;

use clap::Parser;

use crate::prioritize::PriorityWeights;

/// CLI argument parsing & validation.
///
/// Weight signs are not checked here: a negative weight is a configuration
/// refusal (`E_WEIGHTS`), not a usage error.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "covgap",
    about = "Find functional-coverage gaps, rank the tests that would close them, and forecast closure.",
    override_usage = "covgap <REPORT> [--weights <IMPACT> <DIFFICULTY> <DEPENDENCY>] [--design-context <TEXT>] [--max-suggestions <N>] [--predict] [--suggestions <FILE.json>] [--policy <FILE.json>] [--output <FILE.json>] [--json]"
)]
pub struct Args {
    /// Text coverage report.
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Priority weights for coverage impact, difficulty and dependencies (default: 0.5 0.3 0.2).
    #[arg(
        long,
        num_args = 3,
        value_names = ["IMPACT", "DIFFICULTY", "DEPENDENCY"],
        allow_negative_numbers = true,
        value_parser = parse_weight
    )]
    pub weights: Option<Vec<f64>>,

    /// Free-text design description passed to the suggestion generator.
    #[arg(long, value_name = "TEXT")]
    pub design_context: Option<String>,

    /// Keep only the N highest-ranked suggestions.
    #[arg(long, value_name = "N", value_parser = parse_max_suggestions)]
    pub max_suggestions: Option<usize>,

    /// Forecast coverage closure.
    #[arg(long, alias = "enable-prediction")]
    pub predict: bool,

    /// Replay suggestions from a JSON file instead of the built-in templates.
    #[arg(long, value_name = "FILE.json")]
    pub suggestions: Option<PathBuf>,

    /// Override heuristic thresholds from a JSON policy file.
    #[arg(long, value_name = "FILE.json")]
    pub policy: Option<PathBuf>,

    /// Also write the JSON record to this file.
    #[arg(long, value_name = "FILE.json")]
    pub output: Option<PathBuf>,

    /// Emit JSON output (single object).
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Build args for a report path with every option at its default.
    pub fn for_report(report: impl Into<PathBuf>) -> Self {
        Self {
            report: report.into(),
            weights: None,
            design_context: None,
            max_suggestions: None,
            predict: false,
            suggestions: None,
            policy: None,
            output: None,
            json: false,
        }
    }

    pub fn priority_weights(&self) -> PriorityWeights {
        match self.weights.as_deref() {
            Some(&[impact, difficulty, dependency]) => {
                PriorityWeights::new(impact, difficulty, dependency)
            }
            _ => PriorityWeights::default(),
        }
    }
}

fn parse_weight(raw: &str) -> Result<f64, String> {
    parse_finite(raw, "weight")
}

fn parse_max_suggestions(raw: &str) -> Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| "max-suggestions must be a whole number".to_string())?;
    if value == 0 {
        return Err("max-suggestions must be >= 1".to_string());
    }
    Ok(value)
}

fn parse_finite(raw: &str, label: &str) -> Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("{label} must be a valid number"))?;
    if !value.is_finite() {
        return Err(format!("{label} must be a finite number"));
    }
    Ok(value)
}

//! Pipeline orchestration: configure → read → parse → suggest → rank → forecast → output

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cli::args::Args;
use crate::cli::exit::Outcome;
use crate::config::{ConfigError, Policy};
use crate::model::CoverageReport;
use crate::output::human::header::{HumanHeader, render_header};
use crate::output::human::prediction::render_prediction_body;
use crate::output::human::refusal::{RefusalBody, render_refusal_body};
use crate::output::human::suggestions::{SuggestionsBody, render_suggestions_body};
use crate::output::json::{
    AnalysisRecord, CoverageSummary, JsonOutput, Refusal as JsonRefusal, Settings, render_json,
    render_json_pretty,
};
use crate::parse::input::guard_input_bytes;
use crate::parse::{ParseAnomaly, ParseOutcome, parse};
use crate::predict::{ClosurePrediction, ClosurePredictor};
use crate::prioritize::{PrioritizedSuggestion, Prioritizer, PriorityWeights};
use crate::refusal::codes::RefusalCode;
use crate::refusal::process::{DomainRefusal, PipelineError, ProcessError};
use crate::suggest::{
    RecordedSuggestions, SuggestionGenerator, TemplateGenerator, generate_suggestions,
};

pub struct PipelineResult {
    pub outcome: Outcome,
    pub output: String,
}

/// Caller-supplied knobs for one analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    pub weights: PriorityWeights,
    pub policy: Policy,
    pub design_context: Option<String>,
    /// Applied to the ranked list after prediction.
    pub max_suggestions: Option<usize>,
    pub enable_prediction: bool,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.policy.validate()
    }

    fn settings(&self) -> Settings {
        Settings {
            weights: self.weights,
            max_suggestions: self.max_suggestions,
            prediction_enabled: self.enable_prediction,
            design_context: self.design_context.clone(),
        }
    }
}

/// Result of a successful analysis, before rendering.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: CoverageReport,
    pub anomalies: Vec<ParseAnomaly>,
    /// Ranked and, if configured, truncated.
    pub suggestions: Vec<PrioritizedSuggestion>,
    pub total_suggestions: usize,
    pub placeholders: usize,
    pub prediction: Option<ClosurePrediction>,
}

impl Analysis {
    pub fn outcome(&self) -> Outcome {
        if self.report.all_uncovered_items().is_empty() {
            Outcome::NoGaps
        } else {
            Outcome::GapsFound
        }
    }

    pub fn into_json(self, config: &AnalysisConfig) -> JsonOutput {
        JsonOutput::analysis(AnalysisRecord {
            summary: CoverageSummary::from_report(&self.report),
            settings: config.settings(),
            total_suggestions: self.total_suggestions,
            placeholder_suggestions: self.placeholders,
            test_suggestions: self.suggestions,
            prediction: self.prediction,
            anomalies: self.anomalies,
        })
    }
}

/// Run the core over report text. Configuration is checked before parsing.
pub fn analyze(
    text: &str,
    config: &AnalysisConfig,
    generator: &dyn SuggestionGenerator,
) -> Result<Analysis, DomainRefusal> {
    config.validate()?;
    let prioritizer = Prioritizer::new(config.weights, config.policy.scoring)?;

    let ParseOutcome { report, anomalies } = parse(text)?;
    log_anomalies(&anomalies);
    info!(
        design = %report.design_name,
        covergroups = report.covergroups.len(),
        bins = report.total_bins(),
        "report parsed"
    );

    let generated = generate_suggestions(generator, &report, config.design_context.as_deref());
    let mut ranked = prioritizer.rank(generated.suggestions, &report);
    let prediction = config
        .enable_prediction
        .then(|| ClosurePredictor::new(config.policy.prediction).predict(&report, &ranked));

    let total_suggestions = ranked.len();
    if let Some(max) = config.max_suggestions {
        ranked.truncate(max);
    }

    Ok(Analysis {
        report,
        anomalies,
        suggestions: ranked,
        total_suggestions,
        placeholders: generated.placeholders,
        prediction,
    })
}

/// Like [`analyze`], starting from raw bytes guarded for encoding.
pub fn analyze_bytes(
    bytes: &[u8],
    config: &AnalysisConfig,
    generator: &dyn SuggestionGenerator,
) -> Result<Analysis, DomainRefusal> {
    config.validate()?;
    let text = guard_input_bytes(bytes)
        .map_err(|issue| DomainRefusal::new(RefusalCode::Encoding, issue.describe()))?;
    analyze(text, config, generator)
}

/// Read and analyze a report file. An unreadable file is an `E_IO` refusal.
pub fn analyze_path(
    path: &Path,
    config: &AnalysisConfig,
    generator: &dyn SuggestionGenerator,
) -> Result<Analysis, PipelineError> {
    let bytes = fs::read(path).map_err(|err| {
        DomainRefusal::new(RefusalCode::Io, format!("{}: {err}", display_name(path)))
    })?;
    Ok(analyze_bytes(&bytes, config, generator)?)
}

pub fn run(args: &Args) -> Result<PipelineResult, PipelineError> {
    let report_name = display_name(&args.report);

    let (config, generator) = match configure(args) {
        Ok(configured) => configured,
        Err(refusal) => return render_refusal(args, &report_name, refusal),
    };

    match analyze_path(&args.report, &config, generator.as_ref()) {
        Ok(analysis) => render_analysis(args, &report_name, &config, analysis),
        Err(PipelineError::Refusal(refusal)) => render_refusal(args, &report_name, refusal),
        Err(err) => Err(err),
    }
}

/// Resolve every configuration input before the report is touched.
fn configure(
    args: &Args,
) -> Result<(AnalysisConfig, Box<dyn SuggestionGenerator>), DomainRefusal> {
    let weights = args.priority_weights();
    weights.validate()?;

    let policy = match &args.policy {
        Some(path) => Policy::load(path)?,
        None => Policy::default(),
    };

    let generator: Box<dyn SuggestionGenerator> = match &args.suggestions {
        Some(path) => {
            let recorded = RecordedSuggestions::load(path)?;
            debug!(count = recorded.len(), "loaded recorded suggestions");
            Box::new(recorded)
        }
        None => Box::new(TemplateGenerator::new()),
    };

    let config = AnalysisConfig {
        weights,
        policy,
        design_context: args.design_context.clone(),
        max_suggestions: args.max_suggestions,
        enable_prediction: args.predict,
    };
    Ok((config, generator))
}

fn render_analysis(
    args: &Args,
    report_name: &str,
    config: &AnalysisConfig,
    analysis: Analysis,
) -> Result<PipelineResult, PipelineError> {
    let outcome = analysis.outcome();

    let mut lines = vec![
        "COVGAP".to_string(),
        String::new(),
        match outcome {
            Outcome::NoGaps => "NO GAPS".to_string(),
            _ => "GAPS FOUND".to_string(),
        },
        String::new(),
    ];
    let summary = CoverageSummary::from_report(&analysis.report);
    lines.extend(render_header(&HumanHeader {
        report_name,
        summary: &summary,
        weights: config.weights,
    }));
    lines.push(String::new());
    lines.extend(render_suggestions_body(&SuggestionsBody {
        suggestions: &analysis.suggestions,
        total: analysis.total_suggestions,
        placeholders: analysis.placeholders,
    }));
    if let Some(prediction) = &analysis.prediction {
        lines.push(String::new());
        lines.extend(render_prediction_body(prediction));
    }
    let notable: Vec<&ParseAnomaly> = analysis
        .anomalies
        .iter()
        .filter(|anomaly| !anomaly.kind.is_noise())
        .collect();
    if !notable.is_empty() {
        lines.push(String::new());
        lines.push(format!("Parse warnings ({}):", notable.len()));
        lines.extend(notable.iter().map(|anomaly| format!("  {anomaly}")));
    }

    let record = analysis.into_json(config);
    finish(args, outcome, &record, lines)
}

fn render_refusal(
    args: &Args,
    report_name: &str,
    refusal: DomainRefusal,
) -> Result<PipelineResult, PipelineError> {
    warn!(code = %refusal.code, "{}", refusal.message());
    let mut lines = vec![format!("COVGAP ERROR ({})", refusal.code), String::new()];
    lines.extend(render_refusal_body(&RefusalBody {
        code: refusal.code,
        message: refusal.message(),
        report_name,
    }));
    let record = JsonOutput::refusal(JsonRefusal::new(refusal.code, refusal.message()));
    finish(args, Outcome::Refusal, &record, lines)
}

fn finish(
    args: &Args,
    outcome: Outcome,
    record: &JsonOutput,
    human: Vec<String>,
) -> Result<PipelineResult, PipelineError> {
    if let Some(path) = &args.output {
        let mut pretty = render_json_pretty(record).map_err(serialize_failure)?;
        pretty.push('\n');
        fs::write(path, pretty).map_err(|err| {
            ProcessError::new(format!("cannot write {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "wrote JSON record");
    }
    let mut output = if args.json {
        render_json(record).map_err(serialize_failure)?
    } else {
        human.join("\n")
    };
    output.push('\n');
    Ok(PipelineResult { outcome, output })
}

fn serialize_failure(err: serde_json::Error) -> ProcessError {
    ProcessError::new(format!("cannot serialize JSON record: {err}"))
}

fn log_anomalies(anomalies: &[ParseAnomaly]) {
    for anomaly in anomalies {
        if anomaly.kind.is_noise() {
            debug!(line = anomaly.line, code = anomaly.code, "{anomaly}");
        } else {
            warn!(line = anomaly.line, code = anomaly.code, "{anomaly}");
        }
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

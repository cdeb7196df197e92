mod helpers;

use std::path::PathBuf;

use covgap::cli::args::Args;
use covgap::cli::exit::Outcome;
use covgap::config::Policy;
use covgap::orchestrator::{self, AnalysisConfig, analyze};
use covgap::predict::{BlockingReason, ConfidenceLevel, Severity};
use covgap::suggest::{RecordedSuggestions, TemplateGenerator};

fn set_manifest_cwd() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    std::env::set_current_dir(&manifest_dir).expect("set current dir to manifest");
}

fn recorded_args() -> Args {
    Args {
        predict: true,
        json: true,
        suggestions: Some(PathBuf::from("tests/fixtures/suggestions.json")),
        ..Args::for_report("tests/fixtures/dma_controller_coverage.txt")
    }
}

fn json_of(args: &Args) -> serde_json::Value {
    set_manifest_cwd();
    let result = orchestrator::run(args).expect("run pipeline");
    serde_json::from_str(&result.output).expect("json output")
}

fn bins_in_rank_order(value: &serde_json::Value) -> Vec<String> {
    value["test_suggestions"]
        .as_array()
        .expect("suggestions array")
        .iter()
        .map(|s| s["target"]["bin"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn recorded_suggestions_fill_gaps_with_placeholders() {
    let value = json_of(&recorded_args());
    assert_eq!(value["outcome"], "GAPS_FOUND");
    assert_eq!(value["total_suggestions"], 6);
    assert_eq!(value["placeholder_suggestions"], 3);
    assert_eq!(
        bins_in_rank_order(&value),
        vec![
            "len_max_mem_to_periph",
            "dec_err",
            "ch3",
            "slv_err",
            "len_max",
            "len_max_mem_to_mem",
        ]
    );
    assert_eq!(value["test_suggestions"][2]["difficulty"], "easy");
    assert_eq!(value["test_suggestions"][5]["difficulty"], "very_hard");
}

#[test]
fn very_hard_cross_with_dependencies_blocks_closure() {
    let value = json_of(&recorded_args());
    let prediction = &value["prediction"];
    let blocking = prediction["blocking_bins"].as_array().expect("blocking bins");
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0]["target"]["bin"], "len_max_mem_to_mem");
    assert_eq!(blocking[0]["reason"], "very_hard_with_dependencies");
    assert_eq!(blocking[0]["severity"], "high");

    // 20 + 3.5 + 1 recorded, three 4h placeholders
    assert_eq!(prediction["estimated_time_to_100_percent_hours"], 36.5);
    assert_eq!(prediction["confidence_level"], "medium");
    assert_eq!(prediction["total_uncovered_items"], 6);
    let predicted = prediction["predicted_final_coverage_percent"]
        .as_f64()
        .expect("predicted coverage");
    assert!((predicted - 95.0).abs() < 1e-9);
    let likelihood = prediction["likelihood_of_100_percent"]
        .as_f64()
        .expect("likelihood");
    assert!((likelihood - (11.0 / 12.0) * 0.85).abs() < 1e-9);
}

#[test]
fn policy_file_changes_cross_boost() {
    let default_run = json_of(&recorded_args());
    let tuned_run = json_of(&Args {
        policy: Some(PathBuf::from("tests/fixtures/policy.json")),
        ..recorded_args()
    });

    let impact = |value: &serde_json::Value| {
        value["test_suggestions"][0]["factors"]["coverage_impact"]
            .as_f64()
            .expect("impact")
    };
    assert!((impact(&default_run) - 0.6).abs() < 1e-9);
    assert!((impact(&tuned_run) - 0.7).abs() < 1e-9);
    assert_eq!(bins_in_rank_order(&default_run), bins_in_rank_order(&tuned_run));
}

#[test]
fn truncation_keeps_prediction_over_every_suggestion() {
    let value = json_of(&Args {
        max_suggestions: Some(2),
        ..recorded_args()
    });
    assert_eq!(value["total_suggestions"], 6);
    assert_eq!(value["test_suggestions"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["settings"]["max_suggestions"], 2);
    assert_eq!(value["prediction"]["estimated_time_to_100_percent_hours"], 36.5);
    assert_eq!(
        value["prediction"]["blocking_bins"].as_array().map(Vec::len),
        Some(1)
    );
}

#[test]
fn prediction_is_absent_unless_requested() {
    let value = json_of(&Args {
        predict: false,
        ..recorded_args()
    });
    assert!(value["prediction"].is_null());
    assert_eq!(value["settings"]["prediction_enabled"], false);
}

#[test]
fn missing_suggestions_file_is_refused() {
    let value = json_of(&Args {
        suggestions: Some(PathBuf::from("tests/fixtures/nope.json")),
        ..recorded_args()
    });
    assert_eq!(value["outcome"], "REFUSAL");
    assert_eq!(value["refusal"]["code"], "E_SUGGESTIONS");
}

#[test]
fn malformed_policy_is_refused() {
    set_manifest_cwd();
    let path = std::env::temp_dir().join(format!("covgap-policy-{}.json", std::process::id()));
    std::fs::write(&path, "{\"scoring\": {\"cross_impact_boost\": -1}}").expect("write policy");
    let result = orchestrator::run(&Args {
        policy: Some(path.clone()),
        ..recorded_args()
    })
    .expect("run pipeline");
    let _ = std::fs::remove_file(&path);

    assert_eq!(result.outcome, Outcome::Refusal);
    let value: serde_json::Value = serde_json::from_str(&result.output).expect("json");
    assert_eq!(value["refusal"]["code"], "E_POLICY");
}

#[test]
fn three_uncovered_bins_without_suggestions() {
    let text = "\
Design: d
Overall Coverage: 40%
Covergroup: cg
Coverpoint: cp
Bin: a - Hits: 0 - Status: Uncovered
Bin: b - Hits: 0 - Status: Uncovered
Bin: c - Hits: 0 - Status: Uncovered
Bin: d - Hits: 2 - Status: Covered
";
    let config = AnalysisConfig {
        enable_prediction: true,
        ..AnalysisConfig::default()
    };
    let analysis = analyze(text, &config, &RecordedSuggestions::new(Vec::new())).expect("analyze");
    // every recorded lookup fails, so each item gets a placeholder
    assert_eq!(analysis.placeholders, 3);

    let template = analyze(text, &config, &TemplateGenerator::new()).expect("analyze");
    let prediction = template.prediction.expect("prediction");
    assert!(prediction.blocking_bins.is_empty());
    assert_eq!(prediction.confidence_level, ConfidenceLevel::High);

    let empty = covgap::predict::predict(&template.report, &[]);
    assert_eq!(empty.blocking_bins.len(), 3);
    assert!(empty
        .blocking_bins
        .iter()
        .all(|b| b.reason == BlockingReason::NoSuggestion && b.severity == Severity::Medium));
    assert_eq!(empty.likelihood_of_100_percent, 0.0);
    assert_eq!(empty.confidence_level, ConfidenceLevel::Low);
}

#[test]
fn policy_fixture_loads() {
    set_manifest_cwd();
    let policy = Policy::load(std::path::Path::new("tests/fixtures/policy.json")).expect("policy");
    assert_eq!(policy.scoring.cross_impact_boost, 0.2);
    assert_eq!(policy.prediction.high_confidence_max_items, 10);
    assert_eq!(policy.prediction.blocking_dependency_threshold, 3);
}

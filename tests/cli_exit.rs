use std::path::PathBuf;

use covgap::cli::args::Args;
use covgap::cli::exit::{OutputMode, OutputStream, exit_code, output_stream};
use covgap::orchestrator;

fn set_manifest_cwd() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    std::env::set_current_dir(&manifest_dir).expect("set current dir to manifest");
}

fn run_fixture(name: &str, json: bool) -> (u8, OutputStream, String) {
    set_manifest_cwd();
    let args = Args {
        json,
        ..Args::for_report(format!("tests/fixtures/{name}"))
    };
    let mode = if json { OutputMode::Json } else { OutputMode::Human };
    let result = orchestrator::run(&args).expect("run fixture");
    (
        exit_code(result.outcome),
        output_stream(result.outcome, mode),
        result.output,
    )
}

#[test]
fn fully_covered_report_exits_zero_on_stdout() {
    let (code, stream, output) = run_fixture("fully_covered.txt", false);
    assert_eq!(code, 0);
    assert_eq!(stream, OutputStream::Stdout);
    assert!(output.starts_with("COVGAP\n\nNO GAPS\n"));
}

#[test]
fn report_with_gaps_exits_one() {
    let (code, stream, _) = run_fixture("dma_controller_coverage.txt", false);
    assert_eq!(code, 1);
    assert_eq!(stream, OutputStream::Stdout);
}

#[test]
fn refusal_exits_two_on_stderr_in_human_mode() {
    let (code, stream, output) = run_fixture("no_design.txt", false);
    assert_eq!(code, 2);
    assert_eq!(stream, OutputStream::Stderr);
    assert!(output.starts_with("COVGAP ERROR (E_NO_DESIGN)"));
}

#[test]
fn refusal_stays_on_stdout_in_json_mode() {
    let (code, stream, output) = run_fixture("duplicate_scope.txt", true);
    assert_eq!(code, 2);
    assert_eq!(stream, OutputStream::Stdout);
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["outcome"], "REFUSAL");
}

#[test]
fn missing_report_exits_two() {
    let (code, _, output) = run_fixture("absent.txt", true);
    assert_eq!(code, 2);
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["refusal"]["code"], "E_IO");
}

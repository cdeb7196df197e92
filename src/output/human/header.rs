// Human output header: report summary and settings

use crate::format::numbers::{format_count, format_float_shortest, format_percent};
use crate::output::json::CoverageSummary;
use crate::prioritize::PriorityWeights;

pub struct HumanHeader<'a> {
    pub report_name: &'a str,
    pub summary: &'a CoverageSummary,
    pub weights: PriorityWeights,
}

pub fn render_header(ctx: &HumanHeader<'_>) -> Vec<String> {
    let summary = ctx.summary;
    vec![
        format!("Report: {}", ctx.report_name),
        format!("Design: {}", summary.design_name),
        format!("Overall coverage: {}", format_percent(summary.overall_coverage)),
        format!(
            "Bins: {} total, {} covered, {} ignored, {} uncovered ({} coverpoint, {} cross)",
            format_count(summary.total_bins),
            format_count(summary.covered_bins),
            format_count(summary.ignored_bins),
            format_count(summary.uncovered_total()),
            format_count(summary.uncovered_bins_count),
            format_count(summary.uncovered_crosses_count),
        ),
        format!(
            "Weights: impact={} difficulty={} dependency={}",
            format_float_shortest(ctx.weights.impact),
            format_float_shortest(ctx.weights.difficulty),
            format_float_shortest(ctx.weights.dependency),
        ),
    ]
}

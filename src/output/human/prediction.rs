// Human body: closure forecast

use crate::format::numbers::{format_count, format_hours, format_percent, format_ratio_percent};
use crate::predict::{ClosurePrediction, ClosureTime};

pub fn render_prediction_body(prediction: &ClosurePrediction) -> Vec<String> {
    let effort = match prediction.estimated_time_to_100_percent_hours {
        ClosureTime::Hours(hours) => format_hours(hours),
        ClosureTime::Indeterminate => "indeterminate (no suggestions)".to_string(),
    };
    let mut lines = vec![
        "Closure forecast:".to_string(),
        format!("  Estimated effort to 100%: {effort}"),
        format!(
            "  Likelihood of 100%: {}",
            format_ratio_percent(prediction.likelihood_of_100_percent)
        ),
        format!(
            "  Predicted final coverage: {}",
            format_percent(prediction.predicted_final_coverage_percent)
        ),
        format!("  Confidence: {}", prediction.confidence_level.as_str()),
        format!(
            "  Blocking bins: {} of {}",
            format_count(prediction.blocking_bins.len()),
            format_count(prediction.total_uncovered_items)
        ),
    ];
    for blocking in &prediction.blocking_bins {
        lines.push(format!(
            "    {}  {} ({})",
            blocking.target,
            blocking.reason.describe(),
            blocking.severity.as_str()
        ));
    }
    lines
}

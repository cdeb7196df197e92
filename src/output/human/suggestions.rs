// Human body: ranked test suggestions

use crate::format::numbers::{format_count, format_hours, format_score};
use crate::prioritize::PrioritizedSuggestion;

pub struct SuggestionsBody<'a> {
    pub suggestions: &'a [PrioritizedSuggestion],
    /// Count before truncation to `max_suggestions`.
    pub total: usize,
    pub placeholders: usize,
}

pub fn render_suggestions_body(ctx: &SuggestionsBody<'_>) -> Vec<String> {
    if ctx.total == 0 {
        return vec!["No coverage gaps: every bin is covered or ignored.".to_string()];
    }

    let shown = ctx.suggestions.len();
    let noun = if ctx.total == 1 { "suggestion" } else { "suggestions" };
    let mut heading = format!("{} test {noun}", format_count(ctx.total));
    if shown < ctx.total {
        heading.push_str(&format!(" (showing top {})", format_count(shown)));
    }
    heading.push_str(", highest priority first:");

    let mut lines = Vec::with_capacity(shown * 2 + 4);
    lines.push(heading);
    lines.push(String::new());
    for entry in ctx.suggestions {
        let suggestion = &entry.suggestion;
        lines.push(format!(
            "{}. {}  score={}  {}  {}  deps={}",
            entry.rank,
            suggestion.target,
            format_score(entry.priority_score),
            suggestion.difficulty.label(),
            format_hours(suggestion.estimated_time_hours),
            suggestion.dependency_count()
        ));
        lines.push(format!("   {}", suggestion.description));
    }
    if ctx.placeholders > 0 {
        lines.push(String::new());
        lines.push(format!(
            "{} placeholder {} inserted where generation failed.",
            format_count(ctx.placeholders),
            if ctx.placeholders == 1 { "suggestion" } else { "suggestions" }
        ));
    }
    lines
}

//! Suggestion-generation boundary.
//!
//! Generators are opaque collaborators (an LLM client, a recorded file, a
//! template engine). The core never lets a generation failure escape: a
//! failed item gets a placeholder so prioritization and prediction can
//! always run.

use std::error::Error;
use std::fmt;

use tracing::{debug, warn};

use crate::model::{CoverageReport, UncoveredItem};

use super::suggestion::TestSuggestion;

/// Everything a generator is told about one uncovered item.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub item: &'a UncoveredItem,
    pub design_name: &'a str,
    pub design_context: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for GenerationFailure {}

/// Maps an uncovered item to a structured test suggestion.
///
/// `Send + Sync` so callers may fan requests out across threads.
pub trait SuggestionGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<TestSuggestion, GenerationFailure>;
}

/// Generator output after fallback handling.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSuggestions {
    /// One suggestion per uncovered item, in generation order.
    pub suggestions: Vec<TestSuggestion>,
    /// Number of items that received a placeholder.
    pub placeholders: usize,
}

/// Produce exactly one suggestion for every uncovered item of `report`.
pub fn generate_suggestions(
    generator: &dyn SuggestionGenerator,
    report: &CoverageReport,
    design_context: Option<&str>,
) -> GeneratedSuggestions {
    let items = report.all_uncovered_items();
    let mut suggestions = Vec::with_capacity(items.len());
    let mut placeholders = 0;
    for item in &items {
        let request = GenerationRequest {
            item,
            design_name: &report.design_name,
            design_context,
        };
        let suggestion = match generator.generate(&request) {
            Ok(suggestion) => retarget(suggestion, item),
            Err(failure) => {
                warn!(target_bin = %item.key, error = %failure, "suggestion generation failed, using placeholder");
                placeholders += 1;
                TestSuggestion::placeholder(item.key.clone())
            }
        };
        suggestions.push(suggestion.sanitized());
    }
    debug!(
        generated = suggestions.len(),
        placeholders, "suggestion generation complete"
    );
    GeneratedSuggestions {
        suggestions,
        placeholders,
    }
}

/// Keep the association with the originating item even if the generator
/// echoed a different target.
fn retarget(mut suggestion: TestSuggestion, item: &UncoveredItem) -> TestSuggestion {
    if suggestion.target != item.key {
        warn!(
            requested = %item.key,
            returned = %suggestion.target,
            "generator returned a suggestion for another bin, re-targeting"
        );
        suggestion.target = item.key.clone();
    }
    suggestion
}

//! Suggestions produced earlier by an external generator, replayed from JSON.
//!
//! The file holds a JSON array of suggestion records. Items without a
//! recorded suggestion report a generation failure and therefore receive a
//! placeholder downstream.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::config::ConfigError;
use crate::model::ItemKey;

use super::generator::{GenerationFailure, GenerationRequest, SuggestionGenerator};
use super::suggestion::TestSuggestion;

#[derive(Debug, Clone, Default)]
pub struct RecordedSuggestions {
    by_target: HashMap<ItemKey, TestSuggestion>,
}

impl RecordedSuggestions {
    /// Index suggestions by target. For repeated targets the first wins.
    pub fn new(suggestions: Vec<TestSuggestion>) -> Self {
        let mut by_target = HashMap::with_capacity(suggestions.len());
        for suggestion in suggestions {
            if by_target.contains_key(&suggestion.target) {
                warn!(target_bin = %suggestion.target, "duplicate recorded suggestion ignored");
                continue;
            }
            by_target.insert(suggestion.target.clone(), suggestion);
        }
        Self { by_target }
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let suggestions: Vec<TestSuggestion> = serde_json::from_str(text)?;
        Ok(Self::new(suggestions))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let to_error = |message: String| ConfigError::SuggestionsFile {
            path: path.display().to_string(),
            message,
        };
        let text = fs::read_to_string(path).map_err(|err| to_error(err.to_string()))?;
        Self::from_json_str(&text).map_err(|err| to_error(err.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

impl SuggestionGenerator for RecordedSuggestions {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<TestSuggestion, GenerationFailure> {
        self.by_target
            .get(&request.item.key)
            .cloned()
            .ok_or_else(|| GenerationFailure::new(format!("no recorded suggestion for {}", request.item.key)))
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ItemKey;

use super::difficulty::Difficulty;

/// A proposed test for one uncovered bin.
///
/// `target` is a by-name back-reference into the coverage model; it is
/// resolved through [`crate::model::ScopeIndex`], never stored as a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuggestion {
    pub target: ItemKey,
    pub description: String,
    #[serde(default)]
    pub test_outline: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    pub estimated_time_hours: f64,
    #[serde(default)]
    pub reasoning: String,
}

impl TestSuggestion {
    /// Minimal stand-in used when generation fails.
    pub fn placeholder(target: ItemKey) -> Self {
        let description = format!(
            "Write a directed test that samples bin {} of {} {}",
            target.bin, target.scope_kind, target.scope
        );
        Self {
            description,
            test_outline: vec![
                format!("Review the sampling conditions of {}.{}", target.covergroup, target.scope),
                format!("Drive stimulus that reaches bin {}", target.bin),
                "Re-run coverage and confirm the bin is hit".to_string(),
            ],
            difficulty: Difficulty::Medium,
            dependencies: BTreeSet::new(),
            estimated_time_hours: Difficulty::Medium.nominal_hours(),
            reasoning: "No generated suggestion was available; placeholder inserted.".to_string(),
            target,
        }
    }

    /// Force the effort estimate to a finite, non-negative value.
    pub fn sanitized(mut self) -> Self {
        if !self.estimated_time_hours.is_finite() || self.estimated_time_hours < 0.0 {
            self.estimated_time_hours = self.difficulty.nominal_hours();
        }
        self
    }

    #[inline]
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScopeKind;

    fn key() -> ItemKey {
        ItemKey::new("cg", "cp", ScopeKind::Coverpoint, "b")
    }

    #[test]
    fn placeholder_is_medium_without_dependencies() {
        let suggestion = TestSuggestion::placeholder(key());
        assert_eq!(suggestion.difficulty, Difficulty::Medium);
        assert!(suggestion.dependencies.is_empty());
        assert_eq!(suggestion.estimated_time_hours, 4.0);
        assert_eq!(suggestion.target, key());
    }

    #[test]
    fn sanitized_replaces_negative_or_nan_hours() {
        let mut suggestion = TestSuggestion::placeholder(key());
        suggestion.difficulty = Difficulty::Hard;
        suggestion.estimated_time_hours = -3.0;
        assert_eq!(suggestion.clone().sanitized().estimated_time_hours, 8.0);
        suggestion.estimated_time_hours = f64::NAN;
        assert_eq!(suggestion.sanitized().estimated_time_hours, 8.0);
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let json = r#"{
            "target": {"covergroup":"cg","scope":"cp","scope_kind":"coverpoint","bin":"b"},
            "description": "hit b",
            "difficulty": "Very Hard",
            "estimated_time_hours": 6.5
        }"#;
        let suggestion: TestSuggestion = serde_json::from_str(json).expect("json");
        assert_eq!(suggestion.difficulty, Difficulty::VeryHard);
        assert!(suggestion.test_outline.is_empty());
        assert_eq!(suggestion.dependency_count(), 0);
    }
}

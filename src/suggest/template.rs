//! Offline, deterministic suggestion generator.
//!
//! Produces structured suggestions from the bin and scope names alone, so the
//! whole pipeline runs without any remote model. Difficulty is inferred from
//! naming conventions common in SystemVerilog covergroups.

use std::collections::BTreeSet;

use crate::model::UncoveredItem;

use super::difficulty::Difficulty;
use super::generator::{GenerationFailure, GenerationRequest, SuggestionGenerator};
use super::suggestion::TestSuggestion;

const ERROR_MARKERS: [&str; 9] = [
    "error", "err", "illegal", "overflow", "underflow", "timeout", "abort", "retry", "corrupt",
];
const CORNER_MARKERS: [&str; 7] = ["max", "min", "boundary", "full", "empty", "wrap", "last"];

/// Crosses over at least this many coverpoints are rated Very Hard.
const WIDE_CROSS: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SuggestionGenerator for TemplateGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<TestSuggestion, GenerationFailure> {
        let item = request.item;
        let key = &item.key;
        if key.bin.trim().is_empty() {
            return Err(GenerationFailure::new("bin has no name to describe"));
        }

        let difficulty = rate(item);
        let dependencies = dependencies_for(item, difficulty);

        let mut outline = vec![format!(
            "Configure the {} environment for covergroup {}",
            request.design_name, key.covergroup
        )];
        if item.is_cross() {
            let components = item.crossed_coverpoints.join(" and ");
            outline.push(format!(
                "Constrain {components} jointly so that cross {} produces {}",
                key.scope, key.bin
            ));
        } else {
            outline.push(format!(
                "Constrain stimulus so that {} samples a value in bin {}",
                key.scope, key.bin
            ));
        }
        if has_marker(&key.bin, &ERROR_MARKERS) {
            outline.push("Enable error injection and check the recovery path".to_string());
        }
        outline.push(format!("Run the test and confirm {key} reports hits > 0"));

        let description = if item.is_cross() {
            format!("Hit cross bin {} of {}", key.bin, key.scope)
        } else {
            format!("Drive {} into bin {}", key.scope, key.bin)
        };

        let mut reasoning = format!(
            "{} {} is at {}% coverage and bin {} has {} hits.",
            key.scope_kind, key.scope, item.scope_coverage_percent, key.bin, item.hits
        );
        if let Some(context) = request.design_context {
            reasoning.push_str(" Design context: ");
            reasoning.push_str(context);
        }

        Ok(TestSuggestion {
            target: key.clone(),
            description,
            test_outline: outline,
            difficulty,
            dependencies,
            estimated_time_hours: difficulty.nominal_hours(),
            reasoning,
        })
    }
}

fn rate(item: &UncoveredItem) -> Difficulty {
    if item.is_cross() {
        if item.crossed_coverpoints.len() >= WIDE_CROSS {
            return Difficulty::VeryHard;
        }
        return Difficulty::Hard;
    }
    if has_marker(&item.key.bin, &ERROR_MARKERS) {
        Difficulty::Hard
    } else if has_marker(&item.key.bin, &CORNER_MARKERS) {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

fn dependencies_for(item: &UncoveredItem, difficulty: Difficulty) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();
    if item.is_cross() {
        for cp in &item.crossed_coverpoints {
            deps.insert(format!("stimulus reaching every bin of {cp}"));
        }
    } else if difficulty == Difficulty::Hard {
        deps.insert("error injection hook in the testbench".to_string());
    }
    deps
}

/// Match markers against the alphanumeric tokens of the bin name.
fn has_marker(bin: &str, markers: &[&str]) -> bool {
    bin.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| markers.contains(&token))
}

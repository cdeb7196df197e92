//! Uncovered items judged unlikely to close with the current suggestion set.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::PredictionPolicy;
use crate::model::{ItemKey, UncoveredItem};
use crate::prioritize::PrioritizedSuggestion;
use crate::suggest::{Difficulty, TestSuggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingReason {
    NoSuggestion,
    VeryHardWithDependencies,
}

impl BlockingReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockingReason::NoSuggestion => "no_suggestion",
            BlockingReason::VeryHardWithDependencies => "very_hard_with_dependencies",
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            BlockingReason::NoSuggestion => "no test suggestion generated",
            BlockingReason::VeryHardWithDependencies => "very hard test with multiple dependencies",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            BlockingReason::NoSuggestion => Severity::Medium,
            BlockingReason::VeryHardWithDependencies => Severity::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockingBin {
    pub target: ItemKey,
    pub reason: BlockingReason,
    pub severity: Severity,
}

/// Blocking items in document order, plus the number of items that have
/// at least one suggestion.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BlockingScan {
    pub blocking: Vec<BlockingBin>,
    pub suggested: usize,
}

pub(crate) fn scan(
    items: &[UncoveredItem],
    prioritized: &[PrioritizedSuggestion],
    policy: &PredictionPolicy,
) -> BlockingScan {
    // key -> has at least one closable suggestion
    let mut closable: HashMap<&ItemKey, bool> = HashMap::with_capacity(prioritized.len());
    for entry in prioritized {
        let ok = !is_unclosable(&entry.suggestion, policy);
        closable
            .entry(&entry.suggestion.target)
            .and_modify(|seen| *seen |= ok)
            .or_insert(ok);
    }

    let mut out = BlockingScan::default();
    for item in items {
        let reason = match closable.get(&item.key) {
            None => Some(BlockingReason::NoSuggestion),
            Some(false) => {
                out.suggested += 1;
                Some(BlockingReason::VeryHardWithDependencies)
            }
            Some(true) => {
                out.suggested += 1;
                None
            }
        };
        if let Some(reason) = reason {
            out.blocking.push(BlockingBin {
                target: item.key.clone(),
                reason,
                severity: reason.severity(),
            });
        }
    }
    out
}

fn is_unclosable(suggestion: &TestSuggestion, policy: &PredictionPolicy) -> bool {
    suggestion.difficulty == Difficulty::VeryHard
        && suggestion.dependency_count() >= policy.blocking_dependency_threshold
}

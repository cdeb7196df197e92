use std::fmt;

use serde::{Deserialize, Serialize};

use super::bin::{Bin, BinStatus};

/// Which kind of bin-owning scope a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Coverpoint,
    Cross,
}

impl ScopeKind {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Coverpoint => "coverpoint",
            ScopeKind::Cross => "cross",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared view over coverpoints and crosses.
pub trait BinScope {
    const KIND: ScopeKind;

    fn name(&self) -> &str;
    fn coverage_percent(&self) -> f64;
    fn bins(&self) -> &[Bin];

    fn uncovered_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins().iter().filter(|bin| bin.is_uncovered())
    }

    fn total_bins(&self) -> usize {
        self.bins().len()
    }

    fn covered_bins(&self) -> usize {
        count_status(self.bins(), BinStatus::Covered)
    }

    fn ignored_bins(&self) -> usize {
        count_status(self.bins(), BinStatus::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverpoint {
    pub name: String,
    pub coverage_percent: f64,
    pub bins: Vec<Bin>,
}

/// Coverage of value combinations across two or more coverpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCoverage {
    pub name: String,
    pub coverage_percent: f64,
    pub bins: Vec<Bin>,
}

impl CrossCoverage {
    /// Component coverpoints encoded in the name (`"cp_a x cp_b"`).
    pub fn crossed_coverpoints(&self) -> Vec<&str> {
        split_cross_name(&self.name)
    }
}

impl BinScope for Coverpoint {
    const KIND: ScopeKind = ScopeKind::Coverpoint;

    fn name(&self) -> &str {
        &self.name
    }

    fn coverage_percent(&self) -> f64 {
        self.coverage_percent
    }

    fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

impl BinScope for CrossCoverage {
    const KIND: ScopeKind = ScopeKind::Cross;

    fn name(&self) -> &str {
        &self.name
    }

    fn coverage_percent(&self) -> f64 {
        self.coverage_percent
    }

    fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

/// Split a cross name on standalone `x` tokens (case-insensitive).
pub fn split_cross_name(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = name.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        let is_x = matches!(bytes[idx], b'x' | b'X');
        let left_blank = idx > 0 && bytes[idx - 1].is_ascii_whitespace();
        let right_blank = idx + 1 < bytes.len() && bytes[idx + 1].is_ascii_whitespace();
        if is_x && left_blank && right_blank {
            parts.push(name[start..idx].trim());
            start = idx + 1;
        }
        idx += 1;
    }
    parts.push(name[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Coverage implied by bin statuses; ignored bins do not count.
pub fn derived_percent<'a>(bins: impl IntoIterator<Item = &'a Bin>) -> f64 {
    let mut covered = 0usize;
    let mut countable = 0usize;
    for bin in bins {
        match bin.status {
            BinStatus::Covered => {
                covered += 1;
                countable += 1;
            }
            BinStatus::Uncovered => countable += 1,
            BinStatus::Ignored => {}
        }
    }
    if countable == 0 {
        return 100.0;
    }
    covered as f64 / countable as f64 * 100.0
}

fn count_status(bins: &[Bin], status: BinStatus) -> usize {
    bins.iter().filter(|bin| bin.status == status).count()
}

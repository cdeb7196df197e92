use std::fmt;

use serde::{Deserialize, Serialize};

use super::bin::{Bin, BinStatus};
use super::scope::{BinScope, Coverpoint, CrossCoverage, ScopeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Covergroup {
    pub name: String,
    pub coverage_percent: f64,
    pub coverpoints: Vec<Coverpoint>,
    pub crosses: Vec<CrossCoverage>,
}

impl Covergroup {
    /// All bins in this group: coverpoints first, then crosses.
    pub fn bins(&self) -> impl Iterator<Item = &Bin> {
        self.coverpoints
            .iter()
            .flat_map(|cp| cp.bins.iter())
            .chain(self.crosses.iter().flat_map(|cross| cross.bins.iter()))
    }

    pub fn total_bins(&self) -> usize {
        self.bins().count()
    }

    pub fn covered_bins(&self) -> usize {
        self.bins().filter(|b| b.status == BinStatus::Covered).count()
    }

    pub fn ignored_bins(&self) -> usize {
        self.bins().filter(|b| b.status == BinStatus::Ignored).count()
    }

    /// Uncovered bins of this group, coverpoint gaps before cross gaps.
    pub fn uncovered_items(&self) -> Vec<UncoveredItem> {
        let mut items = collect_uncovered(&self.name, &self.coverpoints);
        items.extend(collect_uncovered(&self.name, &self.crosses));
        items
    }
}

/// Root of a parsed coverage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub design_name: String,
    pub overall_coverage_percent: f64,
    pub covergroups: Vec<Covergroup>,
}

impl CoverageReport {
    /// Uncovered coverpoint bins in document order.
    pub fn all_uncovered_bins(&self) -> Vec<UncoveredItem> {
        self.covergroups
            .iter()
            .flat_map(|cg| collect_uncovered(&cg.name, &cg.coverpoints))
            .collect()
    }

    /// Uncovered cross bins in document order.
    pub fn all_uncovered_crosses(&self) -> Vec<UncoveredItem> {
        self.covergroups
            .iter()
            .flat_map(|cg| collect_uncovered(&cg.name, &cg.crosses))
            .collect()
    }

    /// Every uncovered item, grouped per covergroup. This is the order in
    /// which suggestions are generated.
    pub fn all_uncovered_items(&self) -> Vec<UncoveredItem> {
        self.covergroups
            .iter()
            .flat_map(Covergroup::uncovered_items)
            .collect()
    }

    pub fn total_bins(&self) -> usize {
        self.covergroups.iter().map(Covergroup::total_bins).sum()
    }

    pub fn covered_bins(&self) -> usize {
        self.covergroups.iter().map(Covergroup::covered_bins).sum()
    }

    pub fn ignored_bins(&self) -> usize {
        self.covergroups.iter().map(Covergroup::ignored_bins).sum()
    }
}

/// Name-based identity of one bin inside the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub covergroup: String,
    pub scope: String,
    pub scope_kind: ScopeKind,
    pub bin: String,
}

impl ItemKey {
    pub fn new(
        covergroup: impl Into<String>,
        scope: impl Into<String>,
        scope_kind: ScopeKind,
        bin: impl Into<String>,
    ) -> Self {
        Self {
            covergroup: covergroup.into(),
            scope: scope.into(),
            scope_kind,
            bin: bin.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.covergroup, self.scope, self.bin)
    }
}

/// An uncovered bin with the context a suggestion generator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncoveredItem {
    #[serde(flatten)]
    pub key: ItemKey,
    pub hits: u64,
    pub scope_coverage_percent: f64,
    /// Component coverpoints when the owning scope is a cross.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crossed_coverpoints: Vec<String>,
}

impl UncoveredItem {
    #[inline]
    pub fn is_cross(&self) -> bool {
        self.key.scope_kind == ScopeKind::Cross
    }
}

fn collect_uncovered<S: BinScope + CrossedNames>(covergroup: &str, scopes: &[S]) -> Vec<UncoveredItem> {
    let mut items = Vec::new();
    for scope in scopes {
        for bin in scope.uncovered_bins() {
            items.push(UncoveredItem {
                key: ItemKey::new(covergroup, scope.name(), S::KIND, &bin.name),
                hits: bin.hits,
                scope_coverage_percent: scope.coverage_percent(),
                crossed_coverpoints: scope.crossed_names(),
            });
        }
    }
    items
}

trait CrossedNames {
    fn crossed_names(&self) -> Vec<String>;
}

impl CrossedNames for Coverpoint {
    fn crossed_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl CrossedNames for CrossCoverage {
    fn crossed_names(&self) -> Vec<String> {
        self.crossed_coverpoints()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

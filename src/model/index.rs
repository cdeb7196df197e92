//! Name-keyed lookup from back-references to model scopes.
//!
//! Suggestions refer to their target by (covergroup, scope, bin) names. The
//! index is built once after parsing and borrowed by the scoring and
//! prediction engines.

use std::collections::{HashMap, HashSet};

use super::report::{CoverageReport, ItemKey};
use super::scope::{BinScope, ScopeKind};

/// Resolved scope facts needed downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeRef<'a> {
    pub covergroup: &'a str,
    pub name: &'a str,
    pub kind: ScopeKind,
    pub coverage_percent: f64,
}

#[derive(Debug)]
struct ScopeEntry<'a> {
    scope: ScopeRef<'a>,
    uncovered: HashSet<&'a str>,
}

#[derive(Debug, Default)]
pub struct ScopeIndex<'a> {
    groups: HashMap<&'a str, HashMap<&'a str, ScopeEntry<'a>>>,
}

impl<'a> ScopeIndex<'a> {
    pub fn build(report: &'a CoverageReport) -> Self {
        let mut index = Self::default();
        for cg in &report.covergroups {
            let scopes = index.groups.entry(cg.name.as_str()).or_default();
            for cp in &cg.coverpoints {
                insert_scope(scopes, &cg.name, cp);
            }
            for cross in &cg.crosses {
                insert_scope(scopes, &cg.name, cross);
            }
        }
        index
    }

    pub fn scope(&self, covergroup: &str, scope: &str) -> Option<ScopeRef<'a>> {
        self.entry(covergroup, scope).map(|entry| entry.scope)
    }

    /// Scope owning the key's bin, provided the declared kind matches.
    pub fn resolve(&self, key: &ItemKey) -> Option<ScopeRef<'a>> {
        self.scope(&key.covergroup, &key.scope)
            .filter(|scope| scope.kind == key.scope_kind)
    }

    pub fn is_uncovered(&self, key: &ItemKey) -> bool {
        self.entry(&key.covergroup, &key.scope)
            .filter(|entry| entry.scope.kind == key.scope_kind)
            .is_some_and(|entry| entry.uncovered.contains(key.bin.as_str()))
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, covergroup: &str, scope: &str) -> Option<&ScopeEntry<'a>> {
        self.groups.get(covergroup)?.get(scope)
    }
}

fn insert_scope<'a, S: BinScope>(
    scopes: &mut HashMap<&'a str, ScopeEntry<'a>>,
    covergroup: &'a str,
    scope: &'a S,
) {
    let uncovered = scope.uncovered_bins().map(|bin| bin.name.as_str()).collect();
    scopes.insert(
        scope.name(),
        ScopeEntry {
            scope: ScopeRef {
                covergroup,
                name: scope.name(),
                kind: S::KIND,
                coverage_percent: scope.coverage_percent(),
            },
            uncovered,
        },
    );
}

//! Single-pass report scanner.
//!
//! The cursor is an explicit state machine. It owns the covergroup and the
//! coverpoint/cross currently being filled; closing a state moves the owned
//! value into its parent, so nothing is shared or revisited.

use std::mem;

use tracing::debug;

use crate::model::scope::derived_percent;
use crate::model::{
    Bin, BinStatus, CoverageReport, Covergroup, Coverpoint, CrossCoverage, ScopeKind,
};

use super::anomaly::{AnomalyKind, ParseAnomaly};
use super::error::{NameKind, ParseError};
use super::line::{BinFields, Header, Line, PercentValue, classify_line};

/// A parsed report plus everything that was recovered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub report: CoverageReport,
    pub anomalies: Vec<ParseAnomaly>,
}

/// Parse report text into a coverage model.
pub fn parse(text: &str) -> Result<ParseOutcome, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut scanner = Scanner::default();
    for (idx, raw) in text.lines().enumerate() {
        scanner.feed(idx + 1, raw)?;
    }
    scanner.finish()
}

struct OpenScope {
    kind: ScopeKind,
    name: String,
    coverage: Option<f64>,
    bins: Vec<Bin>,
}

impl OpenScope {
    fn close(self, group: &mut OpenGroup) {
        let coverage_percent = self
            .coverage
            .unwrap_or_else(|| derived_percent(&self.bins));
        match self.kind {
            ScopeKind::Coverpoint => group.coverpoints.push(Coverpoint {
                name: self.name,
                coverage_percent,
                bins: self.bins,
            }),
            ScopeKind::Cross => group.crosses.push(CrossCoverage {
                name: self.name,
                coverage_percent,
                bins: self.bins,
            }),
        }
    }
}

struct OpenGroup {
    name: String,
    coverage: Option<f64>,
    coverpoints: Vec<Coverpoint>,
    crosses: Vec<CrossCoverage>,
}

impl OpenGroup {
    fn new(name: String, coverage: Option<f64>) -> Self {
        Self {
            name,
            coverage,
            coverpoints: Vec::new(),
            crosses: Vec::new(),
        }
    }

    fn has_scope(&self, name: &str) -> bool {
        self.coverpoints.iter().any(|cp| cp.name == name)
            || self.crosses.iter().any(|cross| cross.name == name)
    }

    fn close(self) -> Covergroup {
        let coverage_percent = self.coverage.unwrap_or_else(|| {
            derived_percent(
                self.coverpoints
                    .iter()
                    .flat_map(|cp| cp.bins.iter())
                    .chain(self.crosses.iter().flat_map(|cross| cross.bins.iter())),
            )
        });
        Covergroup {
            name: self.name,
            coverage_percent,
            coverpoints: self.coverpoints,
            crosses: self.crosses,
        }
    }
}

#[derive(Default)]
enum Cursor {
    #[default]
    NoCovergroup,
    InCovergroup(OpenGroup),
    InScope(OpenGroup, OpenScope),
    /// After a nameless coverpoint/cross header: its lines belong nowhere.
    InUnnamedScope(OpenGroup),
}

#[derive(Default)]
struct Scanner {
    design: Option<String>,
    overall: Option<f64>,
    covergroups: Vec<Covergroup>,
    cursor: Cursor,
    anomalies: Vec<ParseAnomaly>,
}

impl Scanner {
    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        match classify_line(raw) {
            Line::Blank => {}
            Line::Design(name) => self.on_design(line_no, name),
            Line::Overall(value) => {
                if let Some(pct) = self.percent(line_no, value) {
                    if self.overall.is_some() {
                        self.anomaly(line_no, AnomalyKind::DuplicateOverall);
                    } else {
                        self.overall = Some(pct);
                    }
                }
            }
            Line::Covergroup(header) => self.on_covergroup(line_no, header)?,
            Line::Coverpoint(header) => self.on_scope(line_no, ScopeKind::Coverpoint, header)?,
            Line::Cross(header) => self.on_scope(line_no, ScopeKind::Cross, header)?,
            Line::Coverage(value) => {
                if let Some(pct) = self.percent(line_no, value) {
                    self.on_coverage(line_no, pct);
                }
            }
            Line::Bin(Ok(fields)) => self.on_bin(line_no, fields),
            Line::Bin(Err(text)) => self.anomaly(
                line_no,
                AnomalyKind::MalformedBin {
                    text: text.to_string(),
                },
            ),
            Line::Unrecognized(text) => self.anomaly(
                line_no,
                AnomalyKind::UnrecognizedLine {
                    text: text.to_string(),
                },
            ),
        }
        Ok(())
    }

    fn on_design(&mut self, line_no: usize, name: &str) {
        if name.is_empty() {
            self.anomaly(
                line_no,
                AnomalyKind::EmptyName {
                    keyword: "Design".to_string(),
                },
            );
            return;
        }
        match &self.design {
            Some(_) => self.anomaly(
                line_no,
                AnomalyKind::DuplicateDesign {
                    name: name.to_string(),
                },
            ),
            None => self.design = Some(name.to_string()),
        }
    }

    fn on_covergroup(&mut self, line_no: usize, header: Header<'_>) -> Result<(), ParseError> {
        self.close_group();
        if header.name.is_empty() {
            self.anomaly(
                line_no,
                AnomalyKind::EmptyName {
                    keyword: "Covergroup".to_string(),
                },
            );
            return Ok(());
        }
        if self.covergroups.iter().any(|cg| cg.name == header.name) {
            return Err(ParseError::DuplicateName {
                line: line_no,
                kind: NameKind::Covergroup,
                name: header.name.to_string(),
                covergroup: None,
            });
        }
        let coverage = self.header_percent(line_no, header.coverage);
        debug!(line = line_no, covergroup = header.name, "open covergroup");
        self.cursor = Cursor::InCovergroup(OpenGroup::new(header.name.to_string(), coverage));
        Ok(())
    }

    fn on_scope(
        &mut self,
        line_no: usize,
        kind: ScopeKind,
        header: Header<'_>,
    ) -> Result<(), ParseError> {
        if header.name.is_empty() {
            let keyword = match kind {
                ScopeKind::Coverpoint => "Coverpoint",
                ScopeKind::Cross => "Cross",
            };
            self.anomaly(
                line_no,
                AnomalyKind::EmptyName {
                    keyword: keyword.to_string(),
                },
            );
            self.cursor = match mem::take(&mut self.cursor) {
                Cursor::NoCovergroup => Cursor::NoCovergroup,
                Cursor::InCovergroup(group) | Cursor::InUnnamedScope(group) => {
                    Cursor::InUnnamedScope(group)
                }
                Cursor::InScope(mut group, scope) => {
                    scope.close(&mut group);
                    Cursor::InUnnamedScope(group)
                }
            };
            return Ok(());
        }
        let coverage = self.header_percent(line_no, header.coverage);
        let mut group = match mem::take(&mut self.cursor) {
            Cursor::NoCovergroup => {
                self.anomaly(
                    line_no,
                    AnomalyKind::OrphanScope {
                        scope_kind: kind,
                        name: header.name.to_string(),
                    },
                );
                return Ok(());
            }
            Cursor::InCovergroup(group) | Cursor::InUnnamedScope(group) => group,
            Cursor::InScope(mut group, scope) => {
                scope.close(&mut group);
                group
            }
        };
        if group.has_scope(header.name) {
            return Err(ParseError::DuplicateName {
                line: line_no,
                kind: match kind {
                    ScopeKind::Coverpoint => NameKind::Coverpoint,
                    ScopeKind::Cross => NameKind::Cross,
                },
                name: header.name.to_string(),
                covergroup: Some(group.name),
            });
        }
        let scope = OpenScope {
            kind,
            name: header.name.to_string(),
            coverage,
            bins: Vec::new(),
        };
        self.cursor = Cursor::InScope(group, scope);
        Ok(())
    }

    fn on_coverage(&mut self, line_no: usize, pct: f64) {
        match &mut self.cursor {
            Cursor::InScope(_, scope) => scope.coverage = Some(pct),
            Cursor::InCovergroup(group) => group.coverage = Some(pct),
            Cursor::NoCovergroup | Cursor::InUnnamedScope(_) => {
                self.anomaly(line_no, AnomalyKind::OrphanCoverage)
            }
        }
    }

    fn on_bin(&mut self, line_no: usize, fields: BinFields<'_>) {
        let status = match fields.status.parse::<BinStatus>() {
            Ok(status) => status,
            Err(_) => {
                self.anomaly(
                    line_no,
                    AnomalyKind::UnknownStatus {
                        bin: fields.name.to_string(),
                        status: fields.status.to_string(),
                    },
                );
                BinStatus::Uncovered
            }
        };
        match &mut self.cursor {
            Cursor::InScope(_, scope) => scope.bins.push(Bin::new(fields.name, fields.hits, status)),
            Cursor::NoCovergroup | Cursor::InCovergroup(_) | Cursor::InUnnamedScope(_) => {
                self.anomaly(
                    line_no,
                    AnomalyKind::OrphanBin {
                        name: fields.name.to_string(),
                    },
                )
            }
        }
    }

    fn header_percent(&mut self, line_no: usize, value: Option<PercentValue<'_>>) -> Option<f64> {
        value.and_then(|value| self.percent(line_no, value))
    }

    /// Validate and clamp a percentage, recording anomalies.
    fn percent(&mut self, line_no: usize, value: PercentValue<'_>) -> Option<f64> {
        match value {
            Ok(value) => {
                let clamped = value.clamp(0.0, 100.0);
                if clamped != value {
                    self.anomaly(line_no, AnomalyKind::PercentClamped { value, clamped });
                }
                Some(clamped)
            }
            Err(text) => {
                self.anomaly(
                    line_no,
                    AnomalyKind::MalformedPercent {
                        text: text.to_string(),
                    },
                );
                None
            }
        }
    }

    fn close_group(&mut self) {
        match mem::take(&mut self.cursor) {
            Cursor::NoCovergroup => {}
            Cursor::InCovergroup(group) | Cursor::InUnnamedScope(group) => {
                self.covergroups.push(group.close())
            }
            Cursor::InScope(mut group, scope) => {
                scope.close(&mut group);
                self.covergroups.push(group.close());
            }
        }
    }

    fn anomaly(&mut self, line_no: usize, kind: AnomalyKind) {
        self.anomalies.push(ParseAnomaly::new(line_no, kind));
    }

    fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        self.close_group();
        let design_name = self.design.ok_or(ParseError::MissingDesign)?;
        let overall_coverage_percent = self.overall.unwrap_or_else(|| {
            derived_percent(self.covergroups.iter().flat_map(|cg| cg.bins()))
        });
        Ok(ParseOutcome {
            report: CoverageReport {
                design_name,
                overall_coverage_percent,
                covergroups: self.covergroups,
            },
            anomalies: self.anomalies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(outcome: &ParseOutcome) -> Vec<&'static str> {
        outcome.anomalies.iter().map(|a| a.code).collect()
    }

    #[test]
    fn empty_input_is_fatal() {
        assert_eq!(parse(""), Err(ParseError::EmptyInput));
        assert_eq!(parse(" \n\t\n"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn missing_design_is_fatal() {
        let err = parse("Covergroup: cg\nCoverpoint: cp\n").unwrap_err();
        assert_eq!(err, ParseError::MissingDesign);
    }

    #[test]
    fn first_design_wins() {
        let outcome = parse("Design: first\nDesign: second\n").expect("parse");
        assert_eq!(outcome.report.design_name, "first");
        assert_eq!(codes(&outcome), vec!["W_DUP_DESIGN"]);
    }

    #[test]
    fn coverage_attaches_to_innermost_scope() {
        let text = "Design: d\nCovergroup: cg\nCoverage: 40%\nCoverpoint: cp\nCoverage: 75%\n";
        let report = parse(text).expect("parse").report;
        assert_eq!(report.covergroups[0].coverage_percent, 40.0);
        assert_eq!(report.covergroups[0].coverpoints[0].coverage_percent, 75.0);
    }

    #[test]
    fn orphans_are_dropped_with_anomalies() {
        let text = "Design: d\nCoverpoint: early\nBin: b - Hits: 0 - Status: Uncovered\nCoverage: 5%\nCovergroup: cg\nBin: c - Hits: 1 - Status: Covered\n";
        let outcome = parse(text).expect("parse");
        assert_eq!(
            codes(&outcome),
            vec!["W_ORPHAN_SCOPE", "W_ORPHAN_BIN", "W_ORPHAN_COVERAGE", "W_ORPHAN_BIN"]
        );
        assert!(outcome.report.covergroups[0].coverpoints.is_empty());
    }

    #[test]
    fn unknown_status_is_uncovered_and_flagged() {
        let text = "Design: d\nCovergroup: cg\nCoverpoint: cp\nBin: b - Hits: 4 - Status: Excluded\n";
        let outcome = parse(text).expect("parse");
        let bin = &outcome.report.covergroups[0].coverpoints[0].bins[0];
        assert_eq!(bin.status, BinStatus::Uncovered);
        assert_eq!(bin.hits, 4);
        assert_eq!(codes(&outcome), vec!["W_UNKNOWN_STATUS"]);
    }

    #[test]
    fn duplicate_sibling_names_are_fatal() {
        let text = "Design: d\nCovergroup: cg\nCoverpoint: cp\nCross: cp\n";
        let err = parse(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateName {
                line: 4,
                kind: NameKind::Cross,
                name: "cp".to_string(),
                covergroup: Some("cg".to_string()),
            }
        );
    }

    #[test]
    fn same_scope_name_in_different_groups_is_allowed() {
        let text = "Design: d\nCovergroup: a\nCoverpoint: cp\nCovergroup: b\nCoverpoint: cp\n";
        let report = parse(text).expect("parse").report;
        assert_eq!(report.covergroups.len(), 2);
    }

    #[test]
    fn undeclared_coverage_is_derived_from_bins() {
        let text = "Design: d\nCovergroup: cg\nCoverpoint: cp\nBin: a - Hits: 1 - Status: Covered\nBin: b - Hits: 0 - Status: Uncovered\nBin: c - Hits: 0 - Status: Uncovered\nBin: d - Hits: 9 - Status: Covered\n";
        let report = parse(text).expect("parse").report;
        assert_eq!(report.covergroups[0].coverpoints[0].coverage_percent, 50.0);
        assert_eq!(report.covergroups[0].coverage_percent, 50.0);
        assert_eq!(report.overall_coverage_percent, 50.0);
    }

    #[test]
    fn out_of_range_percent_is_clamped() {
        let text = "Design: d\nOverall Coverage: 140%\n";
        let outcome = parse(text).expect("parse");
        assert_eq!(outcome.report.overall_coverage_percent, 100.0);
        assert_eq!(codes(&outcome), vec!["W_PERCENT_CLAMPED"]);
    }

    #[test]
    fn cross_header_with_inline_coverage() {
        let text = "Design: d\nCovergroup: cg\nCross: a x b - Coverage: 25%\nBin: a0_b1 - Hits: 0 - Status: Uncovered\n";
        let report = parse(text).expect("parse").report;
        let cross = &report.covergroups[0].crosses[0];
        assert_eq!(cross.name, "a x b");
        assert_eq!(cross.coverage_percent, 25.0);
        assert_eq!(cross.bins.len(), 1);
    }

    #[test]
    fn nameless_scope_does_not_absorb_bins_into_previous_sibling() {
        let text = "\
Design: d
Covergroup: cg
Coverage: 60%
Coverpoint: cp_a
Bin: a0 - Hits: 3 - Status: Covered
Coverpoint:
Coverage: 10%
Bin: z0 - Hits: 0 - Status: Uncovered
Coverpoint: cp_b
Bin: b0 - Hits: 0 - Status: Uncovered
";
        let outcome = parse(text).expect("parse");
        let cg = &outcome.report.covergroups[0];
        let bins: Vec<&str> = cg.coverpoints[0].bins.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(bins, vec!["a0"]);
        assert_eq!(cg.coverpoints[0].coverage_percent, 100.0);
        assert_eq!(cg.coverage_percent, 60.0);
        assert_eq!(cg.coverpoints[1].name, "cp_b");
        assert_eq!(cg.coverpoints[1].bins.len(), 1);
        assert_eq!(
            codes(&outcome),
            vec!["W_EMPTY_NAME", "W_ORPHAN_COVERAGE", "W_ORPHAN_BIN"]
        );
    }

    #[test]
    fn nameless_covergroup_closes_the_previous_one() {
        let text = "\
Design: d
Covergroup: cg1
Coverpoint: cp
Bin: a - Hits: 1 - Status: Covered
Covergroup:
Coverpoint: cp
Bin: b - Hits: 0 - Status: Uncovered
Covergroup: cg2
Coverpoint: cp
Bin: c - Hits: 0 - Status: Uncovered
";
        let outcome = parse(text).expect("parse");
        let report = &outcome.report;
        assert_eq!(report.covergroups.len(), 2);
        assert_eq!(report.covergroups[0].coverpoints[0].bins.len(), 1);
        assert_eq!(report.covergroups[1].name, "cg2");
        assert_eq!(
            codes(&outcome),
            vec!["W_EMPTY_NAME", "W_ORPHAN_SCOPE", "W_ORPHAN_BIN"]
        );
    }
}

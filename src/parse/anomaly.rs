//! Recoverable parse anomalies.
//!
//! Each anomaly records the 1-based line it came from and a stable `W_*`
//! code so callers (and tests) can assert on specific recovery paths.

use std::fmt;

use serde::Serialize;

use crate::model::ScopeKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Non-blank line matching no known shape.
    UnrecognizedLine { text: String },
    /// `Coverpoint:`/`Cross:` before any `Covergroup:`.
    OrphanScope { scope_kind: ScopeKind, name: String },
    /// `Bin:` before any `Coverpoint:`/`Cross:` in the current covergroup.
    OrphanBin { name: String },
    /// `Coverage:` with no open scope at all.
    OrphanCoverage,
    /// Status outside {Covered, Uncovered, Ignored}; bin kept as Uncovered.
    UnknownStatus { bin: String, status: String },
    /// `Bin:` line missing its hits or status fields.
    MalformedBin { text: String },
    /// Percentage value that is not a number.
    MalformedPercent { text: String },
    /// Percentage outside [0, 100]; clamped.
    PercentClamped { value: f64, clamped: f64 },
    /// Header keyword with nothing after the colon.
    EmptyName { keyword: String },
    /// Second `Design:` line; first one wins.
    DuplicateDesign { name: String },
    /// Second `Overall Coverage:` line; first one wins.
    DuplicateOverall,
}

impl AnomalyKind {
    pub const fn code(&self) -> &'static str {
        match self {
            AnomalyKind::UnrecognizedLine { .. } => "W_UNRECOGNIZED",
            AnomalyKind::OrphanScope { .. } => "W_ORPHAN_SCOPE",
            AnomalyKind::OrphanBin { .. } => "W_ORPHAN_BIN",
            AnomalyKind::OrphanCoverage => "W_ORPHAN_COVERAGE",
            AnomalyKind::UnknownStatus { .. } => "W_UNKNOWN_STATUS",
            AnomalyKind::MalformedBin { .. } => "W_MALFORMED_BIN",
            AnomalyKind::MalformedPercent { .. } => "W_MALFORMED_PERCENT",
            AnomalyKind::PercentClamped { .. } => "W_PERCENT_CLAMPED",
            AnomalyKind::EmptyName { .. } => "W_EMPTY_NAME",
            AnomalyKind::DuplicateDesign { .. } => "W_DUP_DESIGN",
            AnomalyKind::DuplicateOverall => "W_DUP_OVERALL",
        }
    }

    /// Unrecognized lines are routine decoration in most reports.
    pub const fn is_noise(&self) -> bool {
        matches!(self, AnomalyKind::UnrecognizedLine { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseAnomaly {
    pub line: usize,
    pub code: &'static str,
    #[serde(flatten)]
    pub kind: AnomalyKind,
}

impl ParseAnomaly {
    pub fn new(line: usize, kind: AnomalyKind) -> Self {
        Self {
            line,
            code: kind.code(),
            kind,
        }
    }
}

impl fmt::Display for ParseAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} ({}): ", self.line, self.code)?;
        match &self.kind {
            AnomalyKind::UnrecognizedLine { text } => write!(f, "skipped \"{text}\""),
            AnomalyKind::OrphanScope { scope_kind, name } => {
                write!(f, "{scope_kind} \"{name}\" outside any covergroup, dropped")
            }
            AnomalyKind::OrphanBin { name } => {
                write!(f, "bin \"{name}\" outside any coverpoint or cross, dropped")
            }
            AnomalyKind::OrphanCoverage => f.write_str("coverage value with no open scope, dropped"),
            AnomalyKind::UnknownStatus { bin, status } => {
                write!(f, "bin \"{bin}\" has unknown status \"{status}\", treated as Uncovered")
            }
            AnomalyKind::MalformedBin { text } => write!(f, "malformed bin line \"{text}\""),
            AnomalyKind::MalformedPercent { text } => {
                write!(f, "malformed percentage \"{text}\"")
            }
            AnomalyKind::PercentClamped { value, clamped } => {
                write!(f, "percentage {value} clamped to {clamped}")
            }
            AnomalyKind::EmptyName { keyword } => write!(f, "{keyword} line without a name"),
            AnomalyKind::DuplicateDesign { name } => {
                write!(f, "additional design name \"{name}\" ignored")
            }
            AnomalyKind::DuplicateOverall => f.write_str("additional overall coverage ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_derived_from_kind() {
        let anomaly = ParseAnomaly::new(
            3,
            AnomalyKind::UnknownStatus {
                bin: "b".to_string(),
                status: "Excluded".to_string(),
            },
        );
        assert_eq!(anomaly.code, "W_UNKNOWN_STATUS");
        assert_eq!(
            anomaly.to_string(),
            "line 3 (W_UNKNOWN_STATUS): bin \"b\" has unknown status \"Excluded\", treated as Uncovered"
        );
    }

    #[test]
    fn serializes_with_tagged_kind() {
        let anomaly = ParseAnomaly::new(1, AnomalyKind::OrphanCoverage);
        let value = serde_json::to_value(&anomaly).expect("json");
        assert_eq!(value["line"], 1);
        assert_eq!(value["code"], "W_ORPHAN_COVERAGE");
        assert_eq!(value["kind"], "orphan_coverage");
    }

    #[test]
    fn only_unrecognized_lines_are_noise() {
        assert!(AnomalyKind::UnrecognizedLine { text: "====".to_string() }.is_noise());
        assert!(!AnomalyKind::OrphanCoverage.is_noise());
    }
}

use std::error::Error;
use std::fmt;

use crate::refusal::codes::RefusalCode;

/// What kind of sibling carried a duplicated name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Covergroup,
    Coverpoint,
    Cross,
}

impl NameKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NameKind::Covergroup => "covergroup",
            NameKind::Coverpoint => "coverpoint",
            NameKind::Cross => "cross",
        }
    }
}

/// Fatal parse failures. Everything else is recovered as an anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is empty or whitespace only.
    EmptyInput,
    /// No usable `Design:` line anywhere in the report.
    MissingDesign,
    /// Two siblings share a name; names are the join key for suggestions.
    DuplicateName {
        line: usize,
        kind: NameKind,
        name: String,
        covergroup: Option<String>,
    },
}

impl ParseError {
    pub const fn code(&self) -> RefusalCode {
        match self {
            ParseError::EmptyInput => RefusalCode::Empty,
            ParseError::MissingDesign => RefusalCode::NoDesign,
            ParseError::DuplicateName { .. } => RefusalCode::DupName,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => f.write_str("coverage report is empty"),
            ParseError::MissingDesign => {
                f.write_str("coverage report has no \"Design: <name>\" line")
            }
            ParseError::DuplicateName {
                line,
                kind,
                name,
                covergroup,
            } => match covergroup {
                Some(cg) => write!(
                    f,
                    "line {line}: {} \"{name}\" appears twice in covergroup \"{cg}\"",
                    kind.as_str()
                ),
                None => write!(f, "line {line}: {} \"{name}\" appears twice", kind.as_str()),
            },
        }
    }
}

impl Error for ParseError {}

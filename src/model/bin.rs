use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared status of a bin, as reported by the upstream tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinStatus {
    Covered,
    Uncovered,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBinStatus(pub String);

impl BinStatus {
    pub const ALL: [BinStatus; 3] = [BinStatus::Covered, BinStatus::Uncovered, BinStatus::Ignored];

    /// Report-text spelling.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            BinStatus::Covered => "Covered",
            BinStatus::Uncovered => "Uncovered",
            BinStatus::Ignored => "Ignored",
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnknownBinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bin status \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownBinStatus {}

impl FromStr for BinStatus {
    type Err = UnknownBinStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BinStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownBinStatus(trimmed.to_string()))
    }
}

/// A single value bucket inside a coverpoint or cross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub name: String,
    pub hits: u64,
    pub status: BinStatus,
}

impl Bin {
    pub fn new(name: impl Into<String>, hits: u64, status: BinStatus) -> Self {
        Self {
            name: name.into(),
            hits,
            status,
        }
    }

    #[inline]
    pub fn is_uncovered(&self) -> bool {
        self.status == BinStatus::Uncovered
    }
}

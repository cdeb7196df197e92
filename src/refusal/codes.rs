use std::fmt;
use std::str::FromStr;

/// Canonical refusal codes (v0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefusalCode {
    Io,
    Encoding,
    Empty,
    NoDesign,
    DupName,
    Weights,
    Policy,
    Suggestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRefusalCode;

impl RefusalCode {
    pub const ALL: [RefusalCode; 8] = [
        RefusalCode::Io,
        RefusalCode::Encoding,
        RefusalCode::Empty,
        RefusalCode::NoDesign,
        RefusalCode::DupName,
        RefusalCode::Weights,
        RefusalCode::Policy,
        RefusalCode::Suggestions,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            RefusalCode::Io => "E_IO",
            RefusalCode::Encoding => "E_ENCODING",
            RefusalCode::Empty => "E_EMPTY",
            RefusalCode::NoDesign => "E_NO_DESIGN",
            RefusalCode::DupName => "E_DUP_NAME",
            RefusalCode::Weights => "E_WEIGHTS",
            RefusalCode::Policy => "E_POLICY",
            RefusalCode::Suggestions => "E_SUGGESTIONS",
        }
    }

    /// A short, stable reason label for human output.
    #[inline]
    pub const fn reason(self) -> &'static str {
        match self {
            RefusalCode::Io => "file read error",
            RefusalCode::Encoding => "report is not UTF-8 text",
            RefusalCode::Empty => "report is empty",
            RefusalCode::NoDesign => "no Design: header found",
            RefusalCode::DupName => "duplicate covergroup, coverpoint or cross name",
            RefusalCode::Weights => "invalid priority weights",
            RefusalCode::Policy => "invalid policy configuration",
            RefusalCode::Suggestions => "unreadable recorded suggestions",
        }
    }

    /// Fatal configuration problems are detected before any parsing work.
    #[inline]
    pub const fn is_config(self) -> bool {
        matches!(
            self,
            RefusalCode::Weights | RefusalCode::Policy | RefusalCode::Suggestions
        )
    }
}

impl fmt::Display for RefusalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnknownRefusalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown refusal code")
    }
}

impl std::error::Error for UnknownRefusalCode {}

impl FromStr for RefusalCode {
    type Err = UnknownRefusalCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RefusalCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or(UnknownRefusalCode)
    }
}

#[cfg(test)]
mod tests {
    use super::{RefusalCode, UnknownRefusalCode};
    use std::str::FromStr;

    #[test]
    fn codes_round_trip() {
        for code in RefusalCode::ALL {
            let text = code.as_str();
            let parsed = RefusalCode::from_str(text).expect("parse");
            assert_eq!(parsed, code);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        let err = RefusalCode::from_str("E_NOPE").unwrap_err();
        assert_eq!(err, UnknownRefusalCode);
    }

    #[test]
    fn config_codes_are_flagged() {
        assert!(RefusalCode::Weights.is_config());
        assert!(RefusalCode::Policy.is_config());
        assert!(!RefusalCode::NoDesign.is_config());
    }
}

//! Process-level errors vs domain refusals.
//!
//! Domain refusals are E_* outcomes and still emit a JSON object in `--json`
//! mode. Process errors are failures outside the analysis, such as writing
//! the output file.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;
use crate::parse::ParseError;
use crate::refusal::codes::RefusalCode;

/// A domain refusal (E_*), distinct from process-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRefusal {
    pub code: RefusalCode,
    pub message: String,
}

impl DomainRefusal {
    pub fn new(code: RefusalCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for DomainRefusal {}

impl From<ParseError> for DomainRefusal {
    fn from(err: ParseError) -> Self {
        DomainRefusal::new(err.code(), err.to_string())
    }
}

impl From<ConfigError> for DomainRefusal {
    fn from(err: ConfigError) -> Self {
        DomainRefusal::new(err.code(), err.to_string())
    }
}

/// Failure outside the analysis itself, such as writing the JSON record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessError {
    message: String,
}

impl ProcessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ProcessError {}

/// What a file-level analysis can end in besides a result.
///
/// Refusals are rendered as output with exit code 2; process errors abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Refusal(DomainRefusal),
    Process(ProcessError),
}

impl PipelineError {
    #[inline]
    pub fn is_refusal(&self) -> bool {
        matches!(self, PipelineError::Refusal(_))
    }

    #[inline]
    pub fn is_process(&self) -> bool {
        matches!(self, PipelineError::Process(_))
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Refusal(err) => write!(f, "{err}"),
            PipelineError::Process(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {}

impl From<DomainRefusal> for PipelineError {
    fn from(err: DomainRefusal) -> Self {
        PipelineError::Refusal(err)
    }
}

impl From<ProcessError> for PipelineError {
    fn from(err: ProcessError) -> Self {
        PipelineError::Process(err)
    }
}

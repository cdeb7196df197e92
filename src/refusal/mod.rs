pub mod codes;
pub mod process;

pub use codes::RefusalCode;
pub use process::{DomainRefusal, PipelineError, ProcessError};

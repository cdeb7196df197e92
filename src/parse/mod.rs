//! Report parser: raw text → coverage model.
//!
//! The parser is the only component that sees untrusted input. It owns all
//! format tolerance: unknown lines are skipped and recorded as anomalies,
//! only an empty report, a missing `Design:` line or a duplicated sibling
//! name are fatal.

pub mod anomaly;
pub mod error;
pub mod input;
pub mod line;
pub mod render;
pub mod scanner;

pub use anomaly::{AnomalyKind, ParseAnomaly};
pub use error::{NameKind, ParseError};
pub use render::render_report_text;
pub use scanner::{ParseOutcome, parse};

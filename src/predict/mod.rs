pub mod blocking;
pub mod forecast;

pub use blocking::{BlockingBin, BlockingReason, Severity};
pub use forecast::{ClosurePrediction, ClosurePredictor, ClosureTime, ConfidenceLevel, predict};

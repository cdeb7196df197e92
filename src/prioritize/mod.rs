pub mod rank;
pub mod score;
pub mod weights;

pub use rank::{PrioritizedSuggestion, Prioritizer, prioritize};
pub use score::ScoreBreakdown;
pub use weights::PriorityWeights;

//! Test suggestions and the generator boundary that produces them.

pub mod difficulty;
pub mod generator;
pub mod recorded;
pub mod suggestion;
pub mod template;

pub use difficulty::Difficulty;
pub use generator::{
    GeneratedSuggestions, GenerationFailure, GenerationRequest, SuggestionGenerator,
    generate_suggestions,
};
pub use recorded::RecordedSuggestions;
pub use suggestion::TestSuggestion;
pub use template::TemplateGenerator;

pub mod header;
pub mod prediction;
pub mod refusal;
pub mod suggestions;

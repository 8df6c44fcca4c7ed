// Cover letter generation, history and deletion.
// Generation goes through the same model fallback list as resume analysis.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;

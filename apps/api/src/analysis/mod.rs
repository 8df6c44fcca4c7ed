// Resume analysis: heuristic checks, AI scoring through the model
// fallback list, grammar/tone review, chat, history and analytics.

pub mod ai;
pub mod analytics;
pub mod checks;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod result;
pub mod store;
pub mod validation;

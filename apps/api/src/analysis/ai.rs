//! Model-backed resume features: scoring, grammar/tone review, chat.
//! All calls go through `AiGateway` and its model fallback list.

use tracing::warn;

use crate::analysis::prompts::{
    GRAMMAR_AND_TONE_PROMPT, RESUME_ANALYSIS_PROMPT, RESUME_CHAT_PROMPT,
};
use crate::analysis::validation::{
    validate_ai_result, validate_grammar_and_tone, AiResult, GrammarAndTone,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{AiGateway, AttemptError};

pub const RESUME_ANALYSIS_FAILED: &str = "Failed to analyze resume with AI";
pub const CHAT_FAILED: &str = "Failed to get chat response";

/// Fills a prompt with the shared instructions plus `values`.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut all: Vec<(&str, &str)> = vec![
        ("json_only", JSON_ONLY_INSTRUCTION),
        ("no_fabrication", NO_FABRICATION_INSTRUCTION),
    ];
    all.extend_from_slice(values);
    fill_template(template, &all)
}

/// Scores a resume. Fails with `AnalysisFailed` once every model has failed.
pub async fn analyze_with_ai(
    gateway: &AiGateway,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<AiResult, AppError> {
    let prompt = render(
        RESUME_ANALYSIS_PROMPT,
        &[
            ("jobDescription", job_description.unwrap_or("")),
            ("resumeText", resume_text),
        ],
    );

    gateway
        .complete_json("resume_analysis", &prompt, validate_ai_result)
        .await
        .map_err(|exhausted| AppError::AnalysisFailed(exhausted.message_or(RESUME_ANALYSIS_FAILED)))
}

/// Grammar and tone review. Non-fatal: `None` once every model has failed.
pub async fn grammar_and_tone(gateway: &AiGateway, resume_text: &str) -> Option<GrammarAndTone> {
    let prompt = render(GRAMMAR_AND_TONE_PROMPT, &[("resumeText", resume_text)]);

    match gateway
        .complete_json("grammar_and_tone", &prompt, validate_grammar_and_tone)
        .await
    {
        Ok(feedback) => Some(feedback),
        Err(exhausted) => {
            warn!(
                attempts = exhausted.attempts,
                "Grammar and tone feedback unavailable: {}",
                exhausted.message_or("no models attempted")
            );
            None
        }
    }
}

/// Free-text answer to a question about the resume.
pub async fn chat_about_resume(
    gateway: &AiGateway,
    resume_text: &str,
    question: &str,
) -> Result<String, AppError> {
    let prompt = render(
        RESUME_CHAT_PROMPT,
        &[("question", question), ("resumeText", resume_text)],
    );

    gateway
        .complete("resume_chat", &prompt, |text| {
            let answer = text.trim();
            if answer.is_empty() {
                Err(AttemptError::Rejected("Chat response was empty".to_string()))
            } else {
                Ok(answer.to_string())
            }
        })
        .await
        .map_err(|exhausted| AppError::ChatFailed(exhausted.message_or(CHAT_FAILED)))
}

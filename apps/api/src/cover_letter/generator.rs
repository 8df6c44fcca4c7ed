use tracing::debug;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{AiGateway, AttemptError};

pub const COVER_LETTER_FAILED: &str = "Failed to generate cover letter";
/// Trimmed responses shorter than this are treated as failed attempts.
pub const MIN_COVER_LETTER_CHARS: usize = 100;
pub const GENERAL_POSITION: &str =
    "a general position that matches the candidate's skills and experience";

/// Generates a cover letter, falling back through the model list until one
/// returns a plausible letter.
pub async fn generate_cover_letter(
    gateway: &AiGateway,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<String, AppError> {
    let target = job_description
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or(GENERAL_POSITION);

    let prompt = fill_template(
        COVER_LETTER_PROMPT,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("jobDescription", target),
            ("resumeText", resume_text),
        ],
    );

    let letter = gateway
        .complete("cover_letter", &prompt, accept_letter)
        .await
        .map_err(|exhausted| AppError::CoverLetterFailed(exhausted.message_or(COVER_LETTER_FAILED)))?;

    debug!(chars = letter.len(), "Cover letter generated");
    Ok(letter)
}

fn accept_letter(text: String) -> Result<String, AttemptError> {
    let letter = text.trim();
    if letter.chars().count() < MIN_COVER_LETTER_CHARS {
        return Err(AttemptError::Rejected(
            "Generated cover letter is too short or invalid".to_string(),
        ));
    }
    Ok(letter.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::gateway::testing::ScriptedModel;

    fn letter() -> String {
        format!("Dear Hiring Manager,\n\n{}\n\nSincerely,\nJane", "I build reliable services. ".repeat(5))
    }

    fn models(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("model-{i}")).collect()
    }

    #[tokio::test]
    async fn test_short_response_falls_through_to_next_model() {
        let backend = Arc::new(
            ScriptedModel::new()
                .reply("model-1", "Too short.")
                .reply("model-2", &format!("  {}  ", letter())),
        );
        let gateway = AiGateway::with_models(backend.clone(), models(3));

        let text = generate_cover_letter(&gateway, "resume", None).await.unwrap();

        assert_eq!(text, letter());
        assert_eq!(backend.calls(), vec!["model-1", "model-2"]);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_rejection() {
        let backend = Arc::new(
            ScriptedModel::new()
                .fail("model-1", 500)
                .reply("model-2", "   "),
        );
        let gateway = AiGateway::with_models(backend, models(2));

        let err = generate_cover_letter(&gateway, "resume", Some("Backend role"))
            .await
            .unwrap_err();

        match err {
            AppError::CoverLetterFailed(message) => {
                assert_eq!(message, "Generated cover letter is too short or invalid")
            }
            other => panic!("expected CoverLetterFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_models_uses_default_message() {
        let gateway = AiGateway::with_models(Arc::new(ScriptedModel::new()), vec![]);
        let err = generate_cover_letter(&gateway, "resume", None).await.unwrap_err();
        assert!(matches!(err, AppError::CoverLetterFailed(ref m) if m == COVER_LETTER_FAILED));
    }

    #[test]
    fn test_accept_letter_counts_trimmed_chars() {
        let exactly = "a".repeat(MIN_COVER_LETTER_CHARS);
        assert!(accept_letter(format!("\n{exactly}\n")).is_ok());
        assert!(accept_letter(format!("  {}  ", &exactly[1..])).is_err());
    }
}

//! Resume analysis request pipeline.
//!
//! Flow: (AI scoring, grammar/tone, heuristic checks) joined, then merged, then persisted.
//!
//! The three branches are independent and joined before anything is
//! written. A failed AI scoring call aborts the request; nothing is stored.

use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::ai::{analyze_with_ai, grammar_and_tone};
use crate::analysis::checks::analyze_checks;
use crate::analysis::result::AnalysisResult;
use crate::analysis::store::{insert_analysis, NewAnalysis};
use crate::errors::AppError;
use crate::llm_client::AiGateway;
use crate::models::analysis::AnalysisRow;

/// Runs every analysis branch concurrently and merges the outputs.
pub async fn run_analysis(
    gateway: &AiGateway,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<AnalysisResult, AppError> {
    let (ai, grammar, checks) = tokio::join!(
        analyze_with_ai(gateway, resume_text, job_description),
        grammar_and_tone(gateway, resume_text),
        async { analyze_checks(resume_text) },
    );

    Ok(AnalysisResult::merge(ai?, checks, grammar))
}

pub async fn analyze_and_store(
    pool: &PgPool,
    gateway: &AiGateway,
    user_id: Uuid,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<AnalysisRow, AppError> {
    let result = run_analysis(gateway, resume_text, job_description).await?;

    let row = insert_analysis(
        pool,
        NewAnalysis {
            user_id,
            resume_text,
            job_description,
            result: &result,
        },
    )
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::checks::LengthStatus;
    use crate::llm_client::gateway::testing::ScriptedModel;

    const RESUME: &str = "Experience\n- Built Python and SQL services on AWS, 2021\njane@example.com";

    #[tokio::test]
    async fn test_run_analysis_merges_all_branches() {
        let backend = Arc::new(ScriptedModel::new().reply(
            "m1",
            r#"{"resumeScore": 7, "strengths": ["AWS"], "weaknesses": [], "improvementSuggestions": [],
                "grammarScore": 9, "toneAssessment": "Direct"}"#,
        ));
        let gateway = AiGateway::with_models(backend.clone(), vec!["m1".to_string()]);

        let result = run_analysis(&gateway, RESUME, None).await.unwrap();

        assert_eq!(result.ai.resume_score, 7.0);
        assert_eq!(result.length_check.status, LengthStatus::TooShort);
        assert!(result.formatting_issues.is_empty());
        assert_eq!(result.grammar_and_tone.unwrap().tone_assessment, "Direct");
        // One scoring call and one grammar call.
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_grammar_failure_does_not_fail_analysis() {
        // Valid for the scoring shape, but grammarScore is out of range.
        let backend = Arc::new(ScriptedModel::new().reply(
            "m1",
            r#"{"strengths": [], "weaknesses": [], "improvementSuggestions": [], "grammarScore": 99}"#,
        ));
        let gateway = AiGateway::with_models(backend, vec!["m1".to_string()]);

        let result = run_analysis(&gateway, RESUME, None).await.unwrap();

        assert!(result.grammar_and_tone.is_none());
        assert_eq!(result.ai.resume_score, 0.0);
    }

    #[tokio::test]
    async fn test_scoring_failure_fails_analysis() {
        let backend = Arc::new(ScriptedModel::new().fail("m1", 500).fail("m2", 500));
        let gateway =
            AiGateway::with_models(backend, vec!["m1".to_string(), "m2".to_string()]);

        let err = run_analysis(&gateway, RESUME, Some("job")).await.unwrap_err();

        assert!(matches!(err, AppError::AnalysisFailed(_)));
    }
}

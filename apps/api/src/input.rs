//! Request body checks shared by the resume and cover-letter routes.

use crate::errors::AppError;

pub const MIN_RESUME_CHARS: usize = 50;
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MAX_QUESTION_CHARS: usize = 2000;

pub fn require_resume_text(resume_text: &str) -> Result<&str, AppError> {
    let trimmed = resume_text.trim();
    if trimmed.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(format!(
            "Resume text must be at least {MIN_RESUME_CHARS} characters long"
        )));
    }
    Ok(trimmed)
}

/// Empty or whitespace-only means "no job description".
pub fn optional_job_description(job_description: Option<&str>) -> Result<Option<&str>, AppError> {
    match job_description.map(str::trim) {
        None | Some("") => Ok(None),
        Some(jd) if jd.chars().count() < MIN_JOB_DESCRIPTION_CHARS => {
            Err(AppError::Validation(format!(
                "Job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters long"
            )))
        }
        Some(jd) => Ok(Some(jd)),
    }
}

pub fn require_question(question: &str) -> Result<&str, AppError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_QUESTION_CHARS {
        return Err(AppError::Validation(format!(
            "question must be at most {MAX_QUESTION_CHARS} characters long"
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_resume_rejected() {
        assert!(matches!(
            require_resume_text("too short"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_resume_is_trimmed() {
        let body = "r".repeat(MIN_RESUME_CHARS);
        assert_eq!(require_resume_text(&format!("  {body}\n")).unwrap(), body);
    }

    #[test]
    fn test_empty_job_description_is_absent() {
        assert_eq!(optional_job_description(None).unwrap(), None);
        assert_eq!(optional_job_description(Some("")).unwrap(), None);
        assert_eq!(optional_job_description(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_short_job_description_rejected() {
        assert!(optional_job_description(Some("Rust dev")).is_err());
    }

    #[test]
    fn test_long_job_description_kept() {
        let jd = "j".repeat(MIN_JOB_DESCRIPTION_CHARS);
        assert_eq!(optional_job_description(Some(&jd)).unwrap(), Some(jd.as_str()));
    }

    #[test]
    fn test_question_bounds() {
        assert!(require_question("  ").is_err());
        assert!(require_question(&"q".repeat(MAX_QUESTION_CHARS + 1)).is_err());
        assert_eq!(require_question(" Is my summary too long? ").unwrap(), "Is my summary too long?");
    }
}

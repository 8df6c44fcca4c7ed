//! Deterministic resume checks for length, formatting and ATS compatibility.
//!
//! Pure functions over raw resume text. No I/O, no error conditions:
//! empty text produces degenerate but valid results.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const OPTIMAL_WORD_COUNT_MIN: usize = 400;
pub const OPTIMAL_WORD_COUNT_MAX: usize = 800;
pub const WORDS_PER_PAGE: usize = 250;
/// Above this, some ATS parsers truncate (roughly three pages).
pub const ATS_MAX_WORD_COUNT: usize = 1200;
const MIN_TECH_KEYWORD_MATCHES: usize = 3;

const COMMON_SECTIONS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "contact",
    "work",
    "employment",
];

// Digit classes and word boundaries are ASCII-only.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-*]\s|[0-9]+\.\s").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[0-9]{4}|(?-u:\b)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[A-Za-z0-9_]*\s+[0-9]{4}(?-u:\b)",
    )
    .unwrap()
});
static SPECIAL_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s\-.,;:!?()@/]").unwrap());
static TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table|<tr|<td").unwrap());
static HEADER_FOOTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)header|footer|page [0-9]+").unwrap());
static TECH_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?-u:\b)(javascript|python|java|react|node|sql|aws|docker|kubernetes|agile|scrum)(?-u:\b)",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthStatus {
    Optimal,
    TooShort,
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthCheck {
    pub word_count: usize,
    pub page_estimate: usize,
    pub status: LengthStatus,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormattingIssueType {
    MissingSection,
    InconsistentFormatting,
    PoorStructure,
    AtsUnfriendly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingIssue {
    #[serde(rename = "type")]
    pub issue_type: FormattingIssueType,
    pub severity: IssueSeverity,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtsSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsWarning {
    pub issue: String,
    pub severity: AtsSeverity,
    pub recommendation: String,
}

/// All heuristic diagnostics for one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeChecks {
    pub length: LengthCheck,
    pub formatting_issues: Vec<FormattingIssue>,
    pub ats_warnings: Vec<AtsWarning>,
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn check_length(text: &str) -> LengthCheck {
    let word_count = word_count(text);
    let page_estimate = word_count.div_ceil(WORDS_PER_PAGE);

    let (status, recommendation) = if word_count < OPTIMAL_WORD_COUNT_MIN {
        (
            LengthStatus::TooShort,
            format!(
                "Your resume is {word_count} words. Consider adding more details about your \
                 experience, skills, and achievements. Aim for 400-800 words for optimal ATS \
                 compatibility."
            ),
        )
    } else if word_count > OPTIMAL_WORD_COUNT_MAX {
        (
            LengthStatus::TooLong,
            format!(
                "Your resume is {word_count} words (approximately {page_estimate} pages). For \
                 most positions, keep it to 1-2 pages. Consider removing less relevant \
                 information or condensing descriptions."
            ),
        )
    } else {
        let plural = if page_estimate > 1 { "s" } else { "" };
        (
            LengthStatus::Optimal,
            format!(
                "Your resume length is optimal at {word_count} words (approximately \
                 {page_estimate} page{plural}). This length works well for ATS systems."
            ),
        )
    };

    LengthCheck {
        word_count,
        page_estimate,
        status,
        recommendation,
    }
}

/// Emits at most one issue per category: sections, contact, structure, dates.
pub fn detect_formatting_issues(text: &str) -> Vec<FormattingIssue> {
    let mut issues = Vec::new();
    let lower = text.to_lowercase();

    if !COMMON_SECTIONS.iter().any(|section| lower.contains(section)) {
        issues.push(FormattingIssue {
            issue_type: FormattingIssueType::MissingSection,
            severity: IssueSeverity::Error,
            message: "Resume appears to be missing standard sections".to_string(),
            suggestion: "Ensure your resume includes sections like Experience, Education, Skills, and Summary/Objective.".to_string(),
        });
    }

    if !EMAIL_RE.is_match(text) {
        issues.push(FormattingIssue {
            issue_type: FormattingIssueType::MissingSection,
            severity: IssueSeverity::Warning,
            message: "Contact information may be missing".to_string(),
            suggestion: "Make sure your resume includes your email address and phone number."
                .to_string(),
        });
    }

    if !BULLET_RE.is_match(text) {
        issues.push(FormattingIssue {
            issue_type: FormattingIssueType::PoorStructure,
            severity: IssueSeverity::Warning,
            message: "Consider using bullet points for better readability".to_string(),
            suggestion: "Use bullet points to list achievements and responsibilities. This improves ATS parsing and readability.".to_string(),
        });
    }

    if !DATE_RE.is_match(text) {
        issues.push(FormattingIssue {
            issue_type: FormattingIssueType::InconsistentFormatting,
            severity: IssueSeverity::Warning,
            message: "Dates may be missing from experience/education".to_string(),
            suggestion: "Include dates for all work experience and education entries to show your career progression.".to_string(),
        });
    }

    issues
}

pub fn check_ats(text: &str) -> Vec<AtsWarning> {
    let mut warnings = Vec::new();

    if SPECIAL_CHAR_RE.is_match(text) {
        warnings.push(AtsWarning {
            issue: "Unusual special characters detected".to_string(),
            severity: AtsSeverity::Medium,
            recommendation: "Avoid decorative characters, symbols, or special formatting that ATS systems may not parse correctly. Stick to standard punctuation.".to_string(),
        });
    }

    if TABLE_RE.is_match(text) {
        warnings.push(AtsWarning {
            issue: "Tables detected in resume".to_string(),
            severity: AtsSeverity::High,
            recommendation: "Tables can cause parsing issues in ATS systems. Use standard formatting with sections and bullet points instead.".to_string(),
        });
    }

    if HEADER_FOOTER_RE.is_match(text) {
        warnings.push(AtsWarning {
            issue: "Headers or footers detected".to_string(),
            severity: AtsSeverity::Medium,
            recommendation: "Headers and footers may not be parsed correctly by ATS systems. Keep important information in the main body of the resume.".to_string(),
        });
    }

    if word_count(text) > ATS_MAX_WORD_COUNT {
        warnings.push(AtsWarning {
            issue: "Resume is very long".to_string(),
            severity: AtsSeverity::Medium,
            recommendation: "Very long resumes (over 3 pages) may be truncated or not fully parsed by some ATS systems. Consider condensing to 1-2 pages.".to_string(),
        });
    }

    if TECH_KEYWORD_RE.find_iter(text).count() < MIN_TECH_KEYWORD_MATCHES {
        warnings.push(AtsWarning {
            issue: "Limited technical keywords detected".to_string(),
            severity: AtsSeverity::Low,
            recommendation: "Include relevant technical skills and keywords from the job description to improve ATS matching.".to_string(),
        });
    }

    warnings
}

pub fn analyze_checks(text: &str) -> ResumeChecks {
    ResumeChecks {
        length: check_length(text),
        formatting_issues: detect_formatting_issues(text),
        ats_warnings: check_ats(text),
    }
}

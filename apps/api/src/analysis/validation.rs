//! Validation of untrusted model output.
//!
//! The model is asked for a fixed JSON shape but nothing guarantees it.
//! Everything it returns goes through here before it can be merged or
//! stored: required fields must be present with the right type, optional
//! fields get defaults, unknown fields are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validated AI scoring and feedback for one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResult {
    pub resume_score: f64,
    pub score_summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub keywords_present: Vec<String>,
    pub keywords_missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarIssue {
    pub original: String,
    pub correction: String,
    pub explanation: String,
}

/// Validated grammar and tone feedback. Optional part of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarAndTone {
    pub grammar_score: f64,
    pub tone_assessment: String,
    pub issues: Vec<GrammarIssue>,
    pub tone_suggestions: Vec<String>,
}

/// Validates a parsed model response against the `AiResult` shape.
pub fn validate_ai_result(value: Value) -> Result<AiResult, ValidationError> {
    let obj = as_object(&value, "aiResult")?;

    Ok(AiResult {
        resume_score: optional_score(obj, "resumeScore")?,
        score_summary: optional_string(obj, "scoreSummary")?,
        strengths: required_strings(obj, "strengths")?,
        weaknesses: required_strings(obj, "weaknesses")?,
        improvement_suggestions: required_strings(obj, "improvementSuggestions")?,
        keywords_present: optional_strings(obj, "keywordsPresent")?,
        keywords_missing: optional_strings(obj, "keywordsMissing")?,
    })
}

/// Validates a parsed model response against the `GrammarAndTone` shape.
pub fn validate_grammar_and_tone(value: Value) -> Result<GrammarAndTone, ValidationError> {
    let obj = as_object(&value, "grammarAndTone")?;

    let issues = match present(obj, "issues") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| grammar_issue(item, i))
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(ValidationError::new("issues", "expected an array")),
    };

    Ok(GrammarAndTone {
        grammar_score: optional_score(obj, "grammarScore")?,
        tone_assessment: optional_string(obj, "toneAssessment")?,
        issues,
        tone_suggestions: optional_strings(obj, "toneSuggestions")?,
    })
}

fn grammar_issue(item: &Value, index: usize) -> Result<GrammarIssue, ValidationError> {
    let field = format!("issues[{index}]");
    let obj = as_object(item, &field)?;
    let text = |key: &str, required: bool| -> Result<String, ValidationError> {
        match present(obj, key) {
            Some(Value::String(s)) => Ok(s.clone()),
            None if !required => Ok(String::new()),
            None => Err(ValidationError::new(&format!("{field}.{key}"), "is required")),
            Some(_) => Err(ValidationError::new(
                &format!("{field}.{key}"),
                "expected a string",
            )),
        }
    };

    Ok(GrammarIssue {
        original: text("original", true)?,
        correction: text("correction", true)?,
        explanation: text("explanation", false)?,
    })
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(field, "expected a JSON object"))
}

/// A key counts as absent when it is missing or explicitly `null`.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn optional_score(obj: &Map<String, Value>, key: &str) -> Result<f64, ValidationError> {
    let score = match present(obj, key) {
        None => return Ok(MIN_SCORE),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| ValidationError::new(key, "expected a number"))?,
    };
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ValidationError::new(
            key,
            format!("must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"),
        ));
    }
    Ok(score)
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<String, ValidationError> {
    match present(obj, key) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::new(key, "expected a string")),
    }
}

fn required_strings(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    match present(obj, key) {
        None => Err(ValidationError::new(key, "is required")),
        Some(v) => string_array(v, key),
    }
}

fn optional_strings(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    match present(obj, key) {
        None => Ok(Vec::new()),
        Some(v) => string_array(v, key),
    }
}

fn string_array(value: &Value, key: &str) -> Result<Vec<String>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::new(key, "expected an array of strings"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::new(&format!("{key}[{i}]"), "expected a string"))
        })
        .collect()
}

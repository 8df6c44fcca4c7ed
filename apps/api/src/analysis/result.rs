use serde::{Deserialize, Serialize};

use crate::analysis::checks::{AtsWarning, FormattingIssue, LengthCheck, ResumeChecks};
use crate::analysis::validation::{AiResult, GrammarAndTone};

/// The merged result persisted with every analysis.
///
/// AI fields sit at the top level; heuristic diagnostics and the optional
/// grammar/tone review are added under their own keys and never shadow an
/// AI field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub ai: AiResult,
    pub length_check: LengthCheck,
    pub formatting_issues: Vec<FormattingIssue>,
    pub ats_warnings: Vec<AtsWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_and_tone: Option<GrammarAndTone>,
}

impl AnalysisResult {
    pub fn merge(ai: AiResult, checks: ResumeChecks, grammar_and_tone: Option<GrammarAndTone>) -> Self {
        Self {
            ai,
            length_check: checks.length,
            formatting_issues: checks.formatting_issues,
            ats_warnings: checks.ats_warnings,
            grammar_and_tone,
        }
    }
}

//! Analytics over a user's analysis history: score trend, keyword trend,
//! summary metrics.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisRow;

const TOP_KEYWORDS: usize = 10;

/// Scanned in raw resume text when a record carries no `keywordsPresent`.
pub const TECH_KEYWORDS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "GraphQL",
    "REST",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Git",
    "CI/CD",
    "Linux",
    "Machine Learning",
    "TensorFlow",
    "Agile",
    "Scrum",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrend {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTrend {
    pub keyword: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetrics {
    pub average_score: f64,
    pub latest_score: f64,
    pub first_score: f64,
    pub score_improvement: f64,
    pub total_analyses: usize,
    pub total_keywords: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub score_trends: Vec<ScoreTrend>,
    pub keyword_trends: Vec<KeywordTrend>,
    pub metrics: AnalyticsMetrics,
}

/// Builds the report from records ordered by `created_at` ascending.
pub fn build_report(records: &[AnalysisRow]) -> AnalyticsReport {
    let score_trends = score_trends(records);
    let (keyword_trends, total_keywords) = keyword_trends(records);

    let scores: Vec<f64> = score_trends.iter().map(|t| t.score).collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        round_to_tenth(scores.iter().sum::<f64>() / scores.len() as f64)
    };
    let first_score = scores.first().copied().unwrap_or(0.0);
    let latest_score = scores.last().copied().unwrap_or(0.0);

    AnalyticsReport {
        score_trends,
        keyword_trends,
        metrics: AnalyticsMetrics {
            average_score,
            latest_score,
            first_score,
            score_improvement: latest_score - first_score,
            total_analyses: records.len(),
            total_keywords,
        },
    }
}

fn score_trends(records: &[AnalysisRow]) -> Vec<ScoreTrend> {
    records
        .iter()
        .filter_map(|record| {
            let score = record.result.get("resumeScore")?.as_f64()?;
            Some(ScoreTrend {
                date: record.created_at.date_naive(),
                score,
            })
        })
        .collect()
}

/// Returns the top keywords and the number of distinct keywords seen.
fn keyword_trends(records: &[AnalysisRow]) -> (Vec<KeywordTrend>, usize) {
    // Vec keeps first-encountered order; the map indexes into it.
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        for keyword in record_keywords(record) {
            match index.get(&keyword) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(keyword.clone(), counts.len());
                    counts.push((keyword, 1));
                }
            }
        }
    }

    let total_keywords = counts.len();
    // Stable: ties keep first-encountered order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total_records = records.len().max(1) as f64;
    let trends = counts
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(keyword, count)| KeywordTrend {
            keyword,
            count,
            percentage: (count as f64 / total_records * 100.0).round() as u32,
        })
        .collect();

    (trends, total_keywords)
}

/// Explicit `keywordsPresent` when non-empty, otherwise a scan of the raw text.
fn record_keywords(record: &AnalysisRow) -> Vec<String> {
    let explicit: Vec<String> = record
        .result
        .get("keywordsPresent")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|k| k.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if !explicit.is_empty() {
        return explicit;
    }

    let text = record.resume_text.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

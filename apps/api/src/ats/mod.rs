//! ATS scoring: rule-based heuristics averaged with a keyword-match score.

pub mod heuristics;
pub mod prompts;
pub mod scorer;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use heuristics::HeuristicReport;
use scorer::{KeywordScore, KeywordScorer};

pub const EMPTY_JOB_DESCRIPTION_MESSAGE: &str = "Please enter a job description first";

#[derive(Debug, Clone, Serialize)]
pub struct AtsResult {
    /// 0 – 100
    pub score: u32,
    pub feedback: String,
    pub scored_at: DateTime<Utc>,
}

/// Averages the heuristic and keyword scores and joins their feedback, heuristic
/// messages first.
pub fn combine(heuristic: &HeuristicReport, keyword: &KeywordScore) -> AtsResult {
    let average = (f64::from(heuristic.score) + keyword.keyword_score) / 2.0;
    let score = average.round().clamp(0.0, 100.0) as u32;

    let feedback = heuristic
        .messages
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(keyword.keyword_feedback.as_str()))
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    AtsResult {
        score,
        feedback,
        scored_at: Utc::now(),
    }
}

/// Full ATS pass over resume text. A blank job description is rejected before any
/// remote call is made.
pub async fn score_resume(
    scorer: &dyn KeywordScorer,
    content: &str,
    job_description: &str,
) -> Result<AtsResult, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_JOB_DESCRIPTION_MESSAGE.to_string()));
    }

    let heuristic = heuristics::check(content);
    let keyword = scorer.score(content, job_description).await?;
    Ok(combine(&heuristic, &keyword))
}

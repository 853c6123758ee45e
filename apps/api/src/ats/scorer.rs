//! Keyword scoring: pluggable, trait-based scorer comparing resume text against a
//! job description.
//!
//! `AppState` holds an `Arc<dyn KeywordScorer>`; the Gemini-backed scorer is the
//! production backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai_client::prompts::JSON_ONLY_SYSTEM;
use crate::ai_client::AiClient;
use crate::ats::prompts::build_keyword_score_prompt;
use crate::errors::AppError;

/// Keyword-match verdict returned by a scorer backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordScore {
    /// 0 – 100
    pub keyword_score: f64,
    #[serde(default)]
    pub keyword_feedback: String,
}

impl KeywordScore {
    /// Clamps the score into 0 – 100. Non-finite scores become 0.
    pub fn clamped(self) -> Self {
        let keyword_score = if self.keyword_score.is_finite() {
            self.keyword_score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            keyword_score,
            keyword_feedback: self.keyword_feedback.trim().to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The keyword scorer trait. Implement this to swap backends without touching
/// the handler.
#[async_trait]
pub trait KeywordScorer: Send + Sync {
    async fn score(&self, content: &str, job_description: &str)
        -> Result<KeywordScore, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiKeywordScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiKeywordScorer(pub AiClient);

#[async_trait]
impl KeywordScorer for GeminiKeywordScorer {
    async fn score(
        &self,
        content: &str,
        job_description: &str,
    ) -> Result<KeywordScore, AppError> {
        let prompt = build_keyword_score_prompt(content, job_description);

        let verdict: KeywordScore = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| {
                warn!("Keyword scoring call failed: {e}");
                AppError::Ai(format!("Keyword scoring failed: {e}"))
            })?;

        let verdict = verdict.clamped();
        info!(
            keyword_score = verdict.keyword_score,
            resume_bytes = content.len(),
            "Keyword scoring complete"
        );
        Ok(verdict)
    }
}

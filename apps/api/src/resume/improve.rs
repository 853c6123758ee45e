//! AI-assisted rewriting of a summary or an entry description.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::ai_client::AiClient;
use crate::errors::AppError;
use crate::resume::prompts::build_improve_prompt;

pub const NOTHING_TO_IMPROVE_MESSAGE: &str =
    "Please enter a summary or generate keywords first";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImproveKind {
    Summary,
    Experience,
    Education,
    Project,
}

impl ImproveKind {
    fn label(self) -> &'static str {
        match self {
            ImproveKind::Summary => "professional summary",
            ImproveKind::Experience => "work experience description",
            ImproveKind::Education => "education description",
            ImproveKind::Project => "project description",
        }
    }
}

/// Text sent for improvement: the current text, with suggested keywords appended
/// when present. Fails when both are blank.
pub fn improvement_input(current: &str, keywords: Option<&str>) -> Result<String, AppError> {
    let current = current.trim();
    let keywords = keywords.map(str::trim).filter(|k| !k.is_empty());

    match keywords {
        Some(keywords) => Ok(format!("{current}\n\nIncorporate these keywords: {keywords}")),
        None if current.is_empty() => {
            Err(AppError::Validation(NOTHING_TO_IMPROVE_MESSAGE.to_string()))
        }
        None => Ok(current.to_string()),
    }
}

/// Readable industry name from the stored value: `WEB_DEV-frontend-development`
/// becomes `web dev frontend development`.
pub fn industry_label(industry: Option<&str>) -> String {
    industry
        .map(|i| i.replace(['_', '-'], " ").to_lowercase())
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| "general".to_string())
}

/// Asks the model for an improved version of the text.
pub async fn improve(
    ai: &AiClient,
    kind: ImproveKind,
    current: &str,
    keywords: Option<&str>,
    industry: Option<&str>,
) -> Result<String, AppError> {
    let input = improvement_input(current, keywords)?;
    let prompt = build_improve_prompt(
        kind.label(),
        &industry_label(industry),
        &input,
    );

    let improved = ai.call_text(&prompt, PLAIN_TEXT_SYSTEM).await.map_err(|e| {
        warn!("Improve call failed: {e}");
        AppError::Ai(format!("Failed to improve content: {e}"))
    })?;

    info!(kind = ?kind, input_bytes = input.len(), output_bytes = improved.len(), "Content improved");
    Ok(improved)
}

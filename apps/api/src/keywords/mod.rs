//! Keyword suggestion: model-service keywords merged with fixed industry terms.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::ats::EMPTY_JOB_DESCRIPTION_MESSAGE;
use crate::errors::AppError;
use crate::remote::{ensure_success, ServiceError};

/// Number of keywords requested from the extraction service.
pub const NUM_KEYWORDS: u32 = 15;

pub const KEYWORD_FAILURE_MESSAGE: &str = "Failed to generate keywords";

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    job_description: &'a str,
    num_keywords: u32,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    keywords: Vec<String>,
}

/// Source of job-description keywords.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn extract(&self, job_description: &str) -> Result<Vec<String>, ServiceError>;
}

/// HTTP client for the keyword-extraction model service.
#[derive(Clone)]
pub struct KeywordClient {
    client: Client,
    base_url: String,
}

impl KeywordClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl KeywordSource for KeywordClient {
    async fn extract(&self, job_description: &str) -> Result<Vec<String>, ServiceError> {
        let response = self
            .client
            .post(format!("{}/extract-keywords", self.base_url))
            .json(&ExtractRequest {
                job_description,
                num_keywords: NUM_KEYWORDS,
            })
            .send()
            .await?;

        let body: ExtractResponse = ensure_success(response).await?.json().await?;
        debug!("Keyword service returned {} keywords", body.keywords.len());
        Ok(body.keywords)
    }
}

/// Fixed terms for an industry category. The category is the stored industry value
/// up to its first `-` (e.g. `WEB_DEV-frontend` → `WEB_DEV`).
pub fn industry_terms(industry: Option<&str>) -> &'static [&'static str] {
    let category = industry
        .and_then(|i| i.split('-').next())
        .map(str::trim)
        .unwrap_or_default();

    match category {
        "WEB_DEV" => &["REST API", "React", "Node.js", "TypeScript"],
        "EMBEDDED" => &["IoT", "Microcontrollers", "RTOS", "ARM Cortex"],
        "DATA_SCIENCE" => &["Machine Learning", "Python", "Pandas", "TensorFlow"],
        _ => &[],
    }
}

/// Order-preserving de-duplication of remote keywords followed by industry terms,
/// joined with `", "`.
pub fn merge_keywords(remote: &[String], industry: &[&str]) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(remote.len() + industry.len());
    for keyword in remote.iter().map(String::as_str).chain(industry.iter().copied()) {
        if !seen.contains(&keyword) {
            seen.push(keyword);
        }
    }
    seen.join(", ")
}

/// Suggests keywords for a job description, tailored to the user's industry.
pub async fn suggest(
    source: &dyn KeywordSource,
    job_description: &str,
    industry: Option<&str>,
) -> Result<String, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_JOB_DESCRIPTION_MESSAGE.to_string()));
    }

    let remote = source.extract(job_description).await.map_err(|e| {
        error!("Keyword extraction error: {e}");
        AppError::RemoteService(KEYWORD_FAILURE_MESSAGE.to_string())
    })?;

    Ok(merge_keywords(&remote, industry_terms(industry)))
}

//! AI client. The single point of entry for all generative-AI calls; no other module
//! calls the Gemini API directly.
//!
//! Calls are not retried. A failure is reported to the caller, who may trigger the
//! operation again.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all AI calls.
pub const MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("AI returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Instruction<'a>,
    contents: Vec<Instruction<'a>>,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The AI client shared by ATS scoring and content improvement.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_key: String,
}

impl AiClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Makes a single call to the model, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<GenerateResponse, AiError> {
        let request_body = GenerateRequest {
            system_instruction: Instruction {
                parts: vec![TextPart { text: system }],
            },
            contents: vec![Instruction {
                parts: vec![TextPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            debug!(
                "AI call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(generated)
    }

    /// Calls the model and returns the trimmed text of its answer.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, AiError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(AiError::EmptyContent);
        }
        Ok(text.to_string())
    }

    /// Calls the model and deserializes its text answer as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, AiError> {
        let text = self.call_text(prompt, system).await?;
        parse_json_answer(&text)
    }
}

/// Parses a model answer as JSON, tolerating markdown code fences around it.
pub fn parse_json_answer<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    serde_json::from_str(strip_json_fences(text)).map_err(AiError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_takes_first_text_part() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("first"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let body = GenerateRequest {
            system_instruction: Instruction {
                parts: vec![TextPart { text: "sys" }],
            },
            contents: vec![Instruction {
                parts: vec![TextPart { text: "hi" }],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_parse_json_answer_handles_fences() {
        #[derive(Deserialize)]
        struct Answer {
            score: u32,
        }
        let answer: Answer = parse_json_answer("```json\n{\"score\": 7}\n```").unwrap();
        assert_eq!(answer.score, 7);
        assert!(parse_json_answer::<Answer>("not json").is_err());
    }
}

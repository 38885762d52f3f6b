//! LLM Client: the single point of entry for all Gemini API calls in Career Catalyst.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All LLM interactions MUST go through this module (or the `TextGenerator` seam it implements).
//!
//! Model: gemini-2.5-flash (hardcoded)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls in Career Catalyst.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Text generation constrained to a JSON response schema.
///
/// Returns `Ok(None)` when the service answered but produced no text.
/// Implemented by `LlmClient`; tests substitute scripted generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
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

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    /// Returns `None` when there is no candidate or every part is empty.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Extra time the HTTP transport gets beyond the caller's deadline, so an expired call
/// is reported by the caller's timer rather than as a transport error.
const TRANSPORT_GRACE: Duration = Duration::from_secs(5);

pub fn transport_timeout(deadline: Duration) -> Duration {
    deadline.saturating_add(TRANSPORT_GRACE)
}

/// The single LLM client used by all services in Career Catalyst.
/// Wraps the Gemini `generateContent` endpoint with schema-constrained JSON output.
/// One attempt per call: failures are surfaced to the caller, never retried.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    /// `deadline` is the per-call deadline callers enforce; the transport timeout is
    /// set slightly past it.
    pub fn new(api_key: String, deadline: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(transport_timeout(deadline))
                .build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}", status);
            // Try to parse error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        if let Some(reason) = llm_response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason != "STOP" {
                warn!("LLM candidate finished with reason {reason}");
            }
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<Option<String>, LlmError> {
        Ok(self.call(prompt, system, schema).await?.text())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
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

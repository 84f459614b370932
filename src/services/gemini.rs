//! Gemini text generation client.
//!
//! A thin wrapper over the `generateContent` REST method. The prompt is sent
//! verbatim as a single user turn and the text of the first candidate is
//! returned. No retries are performed.

use crate::config::GatewayConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Carries the API key; the key must never end up in a request URL
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini request failed: {0}")]
    Network(String),

    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse Gemini response: {0}")]
    Parse(String),

    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    #[error("Gemini returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from config. Returns `Ok(None)` when no API key is set.
    pub fn from_config(config: &GatewayConfig) -> Result<Option<Self>, GeminiError> {
        let Some(api_key) = config.gemini_api_key.as_deref() else {
            return Ok(None);
        };

        Self::new(
            api_key,
            config.gemini_model.as_str(),
            config.gemini_base_url.as_str(),
            Duration::from_secs(config.gemini_timeout_secs),
        )
        .map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.without_url().to_string()))?;

        extract_text(body)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GeminiError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GeminiError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GeminiError::EmptyResponse)?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        return match candidate.finish_reason {
            Some(reason) if reason != "STOP" => Err(GeminiError::Blocked(reason)),
            _ => Err(GeminiError::EmptyResponse),
        };
    }

    Ok(parts.into_iter().filter_map(|p| p.text).collect())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

//! Upstream text generation: the `TextGenerator` seam and the Gemini
//! `generateContent` HTTP client behind it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::message::Turn;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid upstream response: {0}")]
    MalformedResponse(String),
}

/// The relay's view of the generation service: ordered turns in, text out.
/// One call per request; retries and model selection are not its concern.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, turns: &[Turn]) -> Result<String, GeneratorError>;
}

// generateContent request format
#[derive(Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

// generateContent response format
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Gemini API client.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    system_prompt: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        }
    }

    fn build_request(&self, turns: &[Turn]) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: self.system_prompt.as_ref().map(|text| SystemInstruction {
                parts: vec![Part { text: text.clone() }],
            }),
            contents: turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str().to_string(),
                    parts: vec![Part { text: turn.content.clone() }],
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, turns: &[Turn]) -> Result<String, GeneratorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, turns = turns.len(), "calling generateContent");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request(turns))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api { status: status.as_u16(), message });
        }

        let body: GenerateContentResponse = response.json().await?;
        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeneratorError::MalformedResponse("no candidates".to_string()))?;

        if candidate.content.parts.is_empty() {
            return Err(GeneratorError::MalformedResponse(
                "candidate has no parts".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();

        Ok(text.trim().to_string())
    }
}

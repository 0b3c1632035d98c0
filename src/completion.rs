//! Chat-completion client.
//!
//! [`CompletionClient`] is the seam the query handler talks to; [`OpenAiClient`]
//! implements it against any OpenAI-compatible `/chat/completions` endpoint.
//! One request per call, no retries.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use crate::{config::LlmSettings, prompt::ChatMessage};

const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid API key header value: {0}")]
    InvalidApiKey(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("response contained no choices")]
    EmptyChoices,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `messages` and returns the generated text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

pub struct OpenAiClient {
    client: reqwest::Client,
    url: String,
    settings: LlmSettings,
}

impl OpenAiClient {
    pub fn new(settings: LlmSettings) -> Self {
        let url = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            url,
            settings,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn headers(&self) -> Result<HeaderMap, CompletionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.settings.api_key))
            .map_err(|e| CompletionError::InvalidApiKey(e.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }

    /// Request plus full body read; the caller bounds the whole exchange.
    async fn send(&self, payload: &ChatCompletionRequest<'_>) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers()?)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(CompletionError::Status {
                status,
                body: error_summary(&body),
            });
        }

        let body = response.text().await?;
        parse_answer(&body)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        if self.settings.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let started = Instant::now();
        let payload = ChatCompletionRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            url = %self.url,
            model = %self.settings.model,
            temperature = self.settings.temperature,
            max_tokens = self.settings.max_tokens,
            "sending chat completion request"
        );

        let answer = timeout(
            Duration::from_millis(self.settings.timeout_ms),
            self.send(&payload),
        )
        .await
        .map_err(|_| CompletionError::Timeout(self.settings.timeout_ms))??;

        info!(
            model = %self.settings.model,
            latency = ?started.elapsed(),
            answer_len = answer.len(),
            "chat completion finished"
        );

        Ok(answer)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Text of the first choice, trimmed.
fn parse_answer(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Decode(e.to_string()))?;

    let first = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyChoices)?;

    first
        .message
        .content
        .map(|text| text.trim().to_string())
        .ok_or_else(|| CompletionError::Decode("first choice has no message content".to_string()))
}

/// Prefers the OpenAI error envelope message, else a truncated raw body.
fn error_summary(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

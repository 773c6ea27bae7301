//! Completion client: the single point of entry for calls to the external
//! chat-completions API.
//!
//! No other module talks to the completion API directly. Handlers depend on
//! the `CompletionProvider` trait so tests can swap in a canned answer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

const MAX_TOKENS: u32 = 2048;
/// Retries cover 5xx and connection failures only; 429 and timeouts surface at once.
const MAX_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion API key is not configured")]
    MissingApiKey,

    #[error("Completion API request timed out")]
    Timeout,

    #[error("Completion API rejected the credentials")]
    Unauthorized,

    #[error("Completion API rate limit exceeded")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Completion API returned empty content")]
    EmptyContent,
}

/// Anything that can turn a prompt into answer text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it has any non-blank content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
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

/// reqwest-backed client for an OpenAI-compatible chat-completions endpoint
/// with bearer-token auth.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.completion_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.completion_api_url.clone(),
            api_key: config.completion_api_key.clone(),
            model: config.completion_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes the raw call, returning the full response object.
    pub async fn call(&self, system: &str, prompt: &str) -> Result<ChatResponse, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let request_body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: prompts::SEARCH_TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut last_error: Option<CompletionError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Completion call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) if e.is_timeout() => return Err(CompletionError::Timeout),
                Err(e) if e.is_connect() => {
                    last_error = Some(CompletionError::Http(e));
                    continue;
                }
                Err(e) => return Err(CompletionError::Http(e)),
            };

            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!("Completion API returned {}: {}", status, body);
                let error = status_error(status, body);
                if status.is_server_error() {
                    last_error = Some(error);
                    continue;
                }
                return Err(error);
            }

            let body = match response.text().await {
                Ok(b) => b,
                Err(e) if e.is_timeout() => return Err(CompletionError::Timeout),
                Err(e) => return Err(CompletionError::Http(e)),
            };
            let chat_response: ChatResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "Completion call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(CompletionError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: format!("gave up after {MAX_RETRIES} retries"),
        }))
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let response = self.call(system, prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyContent)
    }
}

/// Maps a non-success status (and its body) onto the error taxonomy.
fn status_error(status: StatusCode, body: String) -> CompletionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => CompletionError::Timeout,
        _ => {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            CompletionError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_from_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "1. PM Scholarship Scheme"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("1. PM Scholarship Scheme"));
        assert_eq!(response.usage.unwrap().completion_tokens, 40);
    }

    #[test]
    fn test_response_text_blank_is_none() {
        let json = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new()),
            CompletionError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            CompletionError::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::GATEWAY_TIMEOUT, String::new()),
            CompletionError::Timeout
        ));
    }

    #[test]
    fn test_status_error_extracts_api_message() {
        let body = r#"{"error": {"message": "model not found", "type": "invalid_request"}}"#;
        match status_error(StatusCode::BAD_REQUEST, body.to_string()) {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let mut config = Config::for_tests();
        config.completion_api_key = None;
        config.completion_api_url = "http://127.0.0.1:9/unreachable".to_string();
        let client = CompletionClient::new(&config).unwrap();
        let err = client.complete("system", "prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }
}

//! AI client — the single point of entry for chat-completion calls.
//!
//! Speaks the OpenAI-compatible `/chat/completions` shape, which Perplexity
//! serves. No other module talks to the AI provider directly.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("AI returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any.
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

/// Sampling settings for one call.
#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Chat-completions client with retry logic and structured output helpers.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl AiClient {
    pub fn new(api_key: String, api_url: String, model: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
            model,
        })
    }

    /// Builds a client when an API key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Option<Self>> {
        config
            .ai_api_key
            .clone()
            .map(|key| Self::new(key, config.ai_api_url.clone(), config.ai_model.clone()))
            .transpose()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw chat-completions call, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
    ) -> Result<ChatResponse, AiError> {
        let request_body = ChatRequest {
            model: &self.model,
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
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let mut last_error: Option<AiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "AI call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI API returned {}: {}", status, body);
                last_error = Some(AiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

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

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "AI call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(AiError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model and deserializes its reply as JSON.
    /// The prompt must instruct the model to return a JSON object.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
    ) -> Result<T, AiError> {
        let response = self.call(prompt, system, options).await?;
        let text = response.text().ok_or(AiError::EmptyContent)?;
        parse_json_reply(text)
    }
}

/// Parses a model reply as JSON, tolerating code fences and prose around the object.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let stripped = strip_json_fences(text);
    match serde_json::from_str(stripped) {
        Ok(value) => Ok(value),
        Err(err) => match (stripped.find('{'), stripped.rfind('}')) {
            (Some(start), Some(end)) if start < end => {
                serde_json::from_str(&stripped[start..=end]).map_err(AiError::Parse)
            }
            _ => Err(AiError::Parse(err)),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::stub;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    const OPTIONS: CallOptions = CallOptions {
        max_tokens: 100,
        temperature: 0.0,
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        key: String,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), input);
    }

    #[test]
    fn test_parse_json_reply_with_surrounding_prose() {
        let reply = "Here is the analysis:\n{\"key\": \"value\"}\nLet me know if you need more.";
        let parsed: Sample = parse_json_reply(reply).unwrap();
        assert_eq!(parsed.key, "value");
    }

    #[test]
    fn test_parse_json_reply_rejects_non_json() {
        assert!(parse_json_reply::<Sample>("no json here").is_err());
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("résumé", 3), "rés");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_chat_response_text_skips_blank() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_call_retries_server_errors_then_succeeds() {
        let (url, hits) = stub::serve(vec![
            (StatusCode::SERVICE_UNAVAILABLE, json!({"error": {"message": "busy"}})),
            (StatusCode::OK, stub::completion(r#"{"key": "value"}"#)),
        ])
        .await;

        let parsed: Sample = stub::client(&url)
            .call_json("prompt", "system", OPTIONS)
            .await
            .unwrap();
        assert_eq!(parsed.key, "value");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_call_gives_up_after_max_retries() {
        let (url, hits) = stub::serve(vec![(StatusCode::TOO_MANY_REQUESTS, json!({}))]).await;

        let err = stub::client(&url).call("prompt", "system", OPTIONS).await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 429, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (url, hits) = stub::serve(vec![(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "invalid api key"}}),
        )])
        .await;

        let err = stub::client(&url).call("prompt", "system", OPTIONS).await.unwrap_err();
        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = Config::default();
        assert!(AiClient::from_config(&config).unwrap().is_none());
    }
}

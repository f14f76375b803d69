//! Chat-completions client for the remote completion endpoint.
//!
//! Non-streaming: one POST, one reply string. Transient transport failures
//! and 5xx responses get a bounded retry; credential and rate-limit errors
//! surface immediately so the orchestrator can report them.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use vendia_types::Message;

use crate::completion::{CompletionBackend, CompletionError, NO_REPLY_FALLBACK, wire_messages};
use crate::read_capped_error_body;

/// Model requested when the config does not override it.
pub const DEFAULT_MODEL_ID: &str = "deepseek/deepseek-chat-v3.1:free";

const COMPLETIONS_PATH: &str = "/chat/completions";
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    base_url: String,
    api_key: String,
    referer: String,
    app_title: String,
    model: String,
}

impl OpenRouterConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            referer: String::new(),
            app_title: "Vendia ERP".to_string(),
            model: DEFAULT_MODEL_ID.to_string(),
        }
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    #[must_use]
    pub fn with_app_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = app_title.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS * 2u64.pow(attempt.saturating_sub(1)))
}

impl OpenRouterClient {
    #[must_use]
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            config,
            client: crate::http_client().clone(),
        }
    }

    fn request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{COMPLETIONS_PATH}", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(body)
    }

    async fn complete_inner(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let body = json!({
            "model": self.config.model,
            "messages": wire_messages(messages),
        });

        let mut attempt = 1u32;
        loop {
            let sent = self.request(&body).send().await;

            let response = match sent {
                Ok(response) => response,
                Err(e) if attempt < MAX_ATTEMPTS && (e.is_connect() || e.is_timeout()) => {
                    tracing::warn!(attempt, "completion request failed to connect: {e}");
                    tokio::time::sleep(retry_delay(attempt)).await;
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(CompletionError::Transport(e)),
            };

            let status = response.status();
            if status.as_u16() == 401 {
                return Err(CompletionError::Unauthorized);
            }
            if status.as_u16() == 429 {
                return Err(CompletionError::RateLimited);
            }
            if status.is_server_error() && attempt < MAX_ATTEMPTS {
                tracing::warn!(attempt, status = status.as_u16(), "completion endpoint 5xx");
                tokio::time::sleep(retry_delay(attempt)).await;
                attempt += 1;
                continue;
            }
            if !status.is_success() {
                let body = read_capped_error_body(response).await;
                return Err(CompletionError::Http {
                    status: status.as_u16(),
                    body,
                });
            }

            return match response.json::<ChatResponse>().await {
                Ok(payload) => Ok(payload.into_reply().unwrap_or_else(|| {
                    tracing::warn!("completion payload had no content");
                    NO_REPLY_FALLBACK.to_string()
                })),
                Err(e) => {
                    tracing::warn!("malformed completion payload: {e}");
                    Ok(NO_REPLY_FALLBACK.to_string())
                }
            };
        }
    }
}

impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        self.complete_inner(messages).await
    }
}

//! Chat completion client for OpenAI-compatible endpoints.
//!
//! Both supported providers (OpenAI and Ollama) speak the same
//! `/chat/completions` wire format, so a single client covers both.

use std::time::Duration;

use async_trait::async_trait;
use maxibot_core::config::{LlmConfig, LlmProvider};
use maxibot_core::{Message, MessageRole};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm client configuration error: {0}")]
    Config(String),
    #[error("llm request failed: {0}")]
    Http(String),
    #[error("llm endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("llm response was malformed: {0}")]
    MalformedResponse(String),
}

/// Generates the assistant's next reply from composed instructions and the
/// recent conversation window.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, instructions: &str, window: &[Message]) -> Result<String, LlmError>;
}

#[derive(Debug)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_retries: u32,
}

impl OpenAiChatClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let value = format!("Bearer {}", api_key.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|err| LlmError::Config(format!("invalid api key header value: {err}")))?;
            value.set_sensitive(true);
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| LlmError::Config(format!("failed to build http client: {err}")))?;

        let base_url = match (&config.base_url, config.provider) {
            (Some(base_url), _) => base_url.trim_end_matches('/').to_string(),
            (None, LlmProvider::OpenAi) => OPENAI_BASE_URL.to_string(),
            (None, LlmProvider::Ollama) => {
                return Err(LlmError::Config(
                    "llm.base_url is required for the ollama provider".to_string(),
                ))
            }
        };

        Ok(Self { client, base_url, model: config.model.clone(), max_retries: config.max_retries })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for OpenAiChatClient {
    async fn generate(&self, instructions: &str, window: &[Message]) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(window.len() + 1);
        messages.push(ChatMessage { role: "system", content: instructions.to_string() });
        messages.extend(window.iter().map(|message| ChatMessage {
            role: match message.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            },
            content: message.text.clone(),
        }));

        let request = ChatCompletionRequest { model: &self.model, messages };
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying chat completion after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .json(&request)
                .send()
                .await
                .map_err(|err| LlmError::Http(err.to_string()))?;

            let status = response.status();
            debug!(status = %status, attempt, "chat completion response received");

            if status.is_success() {
                let body: ChatCompletionResponse = response
                    .json()
                    .await
                    .map_err(|err| LlmError::MalformedResponse(err.to_string()))?;

                return body
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .filter(|content| !content.trim().is_empty())
                    .ok_or_else(|| {
                        LlmError::MalformedResponse("response carried no completion".to_string())
                    });
            }

            let message = response.text().await.unwrap_or_default();
            let error = LlmError::Api { status: status.as_u16(), message };

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient chat completion error, will retry");
                last_error = Some(error);
                continue;
            }

            return Err(error);
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Http("chat completion retries exhausted".to_string())))
    }
}

fn is_transient_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
    )
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

//! OpenAI-compatible chat completion client.
//!
//! Talks to any endpoint that speaks the `/chat/completions` wire format,
//! which covers OpenAI itself and the usual self-hosted gateways. The
//! [`CompletionProvider`] trait is the seam the rest of the crate depends
//! on, so tests swap in scripted providers without touching the network.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RewriteError};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Tuning knobs for a single completion call.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Model override. `None` uses the client default.
    pub model: Option<String>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Completion length cap in tokens.
    pub max_tokens: u32,

    /// Stop sequences.
    pub stop: Vec<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 2048,
            stop: Vec::new(),
        }
    }
}

/// Anything that can turn a prompt into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete the prompt, returning the raw model output.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Debug)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: SecretString,
    api_base: String,
    default_model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    stop: &'a [String],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a client with the default API base and model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RewriteError::config("API key must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: SecretString::new(api_key),
            api_base: DEFAULT_API_BASE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the client at a different API base URL.
    pub fn with_base_url(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Change the model used when options carry no override.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn chat(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stop: &options.stop,
        };

        debug!(model, url = %url, "sending completion request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 => RewriteError::auth(message),
                429 => RewriteError::rate_limit(message),
                400 => RewriteError::invalid_request(message),
                code => RewriteError::server_error(code, message),
            });
        }

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RewriteError::invalid_response("response carried no choices"))?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        self.chat(prompt, options).await
    }
}

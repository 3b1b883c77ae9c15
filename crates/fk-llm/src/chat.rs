//! OpenAI-compatible chat provider.
//!
//! Speaks the `/chat/completions` wire shape, which covers OpenAI itself,
//! Qwen/DashScope's compatible mode, and local servers such as Ollama or
//! vLLM. Case generation binds the temperature to zero so repeated runs plan
//! the same case; replies and scoring run warmer.

use std::time::Duration;

use async_trait::async_trait;
use fk_core::RawScenario;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::{CaseGenerator, TextGenerator};
use crate::error::{GenerationError, GenerationResult};
use crate::prompt;

/// Sampling temperature for replies and scoring.
const TEMPERATURE_CHAT: f64 = 0.7;
/// Sampling temperature for case planning.
const TEMPERATURE_PLAN: f64 = 0.0;
/// Cap on the error body kept in [`GenerationError::Status`].
const ERROR_BODY_LIMIT: usize = 300;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL up to but excluding `/chat/completions`.
    pub base_url: String,
    /// Bearer token; `None` for keyless local endpoints.
    pub api_key: Option<String>,
    /// Model name passed through to the endpoint.
    pub model: String,
    /// Per-request timeout. A slow provider fails the call; the policies
    /// upstream fail open, so a turn is never stalled indefinitely.
    pub timeout: Duration,
}

impl ChatConfig {
    /// Settings for `base_url` and `model` with a 30 second timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Attach a bearer token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// A text/case generator backed by an OpenAI-compatible chat endpoint.
pub struct ChatProvider {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ChatProvider {
    /// Build a provider; fails only if the HTTP client cannot be constructed.
    pub fn new(config: ChatConfig) -> GenerationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
    ) -> GenerationResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %self.config.model, %url, "chat request");

        let mut call = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(ERROR_BODY_LIMIT);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for ChatProvider {
    async fn generate(&self, system_context: &str, user_message: &str) -> GenerationResult<String> {
        self.chat(system_context, user_message, TEMPERATURE_CHAT)
            .await
    }
}

#[async_trait]
impl CaseGenerator for ChatProvider {
    async fn generate_case(&self, requested_suspects: usize) -> GenerationResult<RawScenario> {
        let raw = self
            .chat(
                prompt::CASE_SYSTEM,
                &prompt::case_user(requested_suspects),
                TEMPERATURE_PLAN,
            )
            .await?;
        let stripped = prompt::strip_code_fences(&raw);
        Ok(RawScenario::from_json(stripped)?)
    }
}

//! OpenRouter chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::ProviderError;
use crate::git::GitContext;
use crate::message::{self, CommitMessage};
use crate::prompt::build_prompts;

use super::ProviderPort;

const PROVIDER_NAME: &str = "OpenRouter";
const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";

/// Low temperature favors deterministic replies for identical prompts.
const TEMPERATURE: f32 = 0.3;
/// A commit message fits comfortably in this many output tokens.
const MAX_TOKENS: u32 = 200;
/// Bounded wait for the remote API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// [`ProviderPort`] backed by the OpenRouter chat-completions API.
#[derive(Debug)]
pub struct OpenRouterProvider {
    http: reqwest::Client,
    api_url: String,
}

impl OpenRouterProvider {
    pub fn new() -> Self {
        Self::with_api_url(API_URL.to_string())
    }

    /// Point the provider at a different endpoint (used by tests).
    pub fn with_api_url(api_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
        }
    }

    /// Resolution order: explicit config value, then the environment.
    fn resolve_api_key(&self, config: &GenerationConfig) -> Result<String, ProviderError> {
        if let Some(key) = &config.api_key {
            return Ok(key.clone());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ProviderError::KeyNotFound {
                provider: PROVIDER_NAME.to_string(),
                env_var: API_KEY_ENV.to_string(),
            }),
        }
    }
}

impl Default for OpenRouterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderPort for OpenRouterProvider {
    async fn generate_commit_message(
        &self,
        context: &GitContext,
        config: &GenerationConfig,
    ) -> Result<CommitMessage, ProviderError> {
        // Key resolution happens before any network call.
        let api_key = self.resolve_api_key(config)?;

        let (system_prompt, user_prompt) = build_prompts(context, config);
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let request = ChatRequest {
            model,
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatRequestMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("Requesting commit message from {PROVIDER_NAME} model {model}");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&api_key)
            .header("HTTP-Referer", "https://github.com/quill-dev/quill")
            .header("X-Title", "quill")
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: PROVIDER_NAME.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::InvalidResponse(PROVIDER_NAME.to_string()))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse(PROVIDER_NAME.to_string()))?;

        message::validate_response(&content)?;
        Ok(message::parse_commit_message(&content, config.style)?)
    }
}

//! Groq service for chat completions
//!
//! Groq serves the OpenAI Chat Completions API, so requests and responses use
//! the types in [`crate::schemas::openai`]. One `GroqService` is built at
//! startup and shared by every request; `reqwest::Client` pools connections
//! internally and needs no locking.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::settings::DEFAULT_GROQ_BASE_URL;
use crate::config::Settings;
use crate::schemas::openai::{ChatCompletionRequest, ChatCompletionResponse, OpenAIErrorResponse};
use crate::services::provider::{CompletionProvider, ProviderError};

/// Configuration for Groq service
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,

    /// Base URL (default: api.groq.com/openai/v1)
    pub base_url: Option<String>,

    /// Request timeout in seconds; `None` keeps the client default
    pub timeout_seconds: Option<u64>,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_seconds: None,
        }
    }

    /// Build the provider config from validated settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(settings.provider_api_key()?)
            .with_base_url(settings.groq_base_url.clone())
            .with_optional_timeout(settings.provider_timeout_seconds))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    fn with_optional_timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Service for calling the Groq chat completions endpoint
#[derive(Clone)]
pub struct GroqService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GroqService {
    /// Create a new Groq service
    pub fn new(config: GroqConfig) -> Result<Self, ProviderError> {
        let api_key = config.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        tracing::info!(
            base_url = %base_url,
            timeout_seconds = ?config.timeout_seconds,
            "Initialized Groq completion service"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for GroqService {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = self.completions_url();

        tracing::debug!(
            model = %request.model,
            url = %url,
            message_count = request.messages.len(),
            "Calling Groq chat completions API"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            // Prefer the provider's own message when the body follows the OpenAI error shape
            let message = serde_json::from_str::<OpenAIErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Groq response");
            ProviderError::Decode(e.to_string())
        })
    }
}

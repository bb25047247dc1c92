//! Completion provider abstraction
//!
//! The tutor only needs "send a chat completion request, get a response".
//! Keeping that behind a trait lets the server hold one long-lived client
//! and lets tests substitute their own.

use async_trait::async_trait;
use thiserror::Error;

use crate::schemas::openai::{ChatCompletionRequest, ChatCompletionResponse};

/// Errors that can occur when calling the completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The provider answered but with no choice or no text in the first one
    #[error("completion provider returned no answer")]
    EmptyCompletion,

    #[error("Missing API key")]
    MissingApiKey,
}

impl ProviderError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Http(_) => "http",
            ProviderError::Api { .. } => "api",
            ProviderError::Decode(_) => "decode",
            ProviderError::EmptyCompletion => "empty_completion",
            ProviderError::MissingApiKey => "missing_api_key",
        }
    }
}

/// A chat completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Run one non-streaming chat completion
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}

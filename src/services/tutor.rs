//! Tutor service
//!
//! Combines the fixed prompt, the configured completion parameters, and a
//! [`CompletionProvider`] into the single "answer a question" operation.

use std::sync::Arc;
use std::time::Instant;

use crate::config::CompletionConfig;
use crate::schemas::openai::ChatCompletionRequest;
use crate::services::prompt::{build_prompt, Question};
use crate::services::provider::{CompletionProvider, ProviderError};

#[derive(Clone)]
pub struct TutorService {
    provider: Arc<dyn CompletionProvider>,
    completion: CompletionConfig,
}

impl TutorService {
    pub fn new(provider: Arc<dyn CompletionProvider>, completion: CompletionConfig) -> Self {
        Self {
            provider,
            completion,
        }
    }

    /// Build the provider request for a question
    pub fn build_request(&self, question: &Question) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.completion.model.clone(),
            messages: build_prompt(question),
            max_tokens: Some(self.completion.max_tokens),
            temperature: Some(self.completion.temperature),
        }
    }

    /// Ask the provider and return the first choice's text unmodified
    pub async fn answer(&self, question: &Question) -> Result<String, ProviderError> {
        let start = Instant::now();
        let request = self.build_request(question);

        tracing::info!(
            provider = %self.provider.name(),
            model = %request.model,
            question_chars = question.char_count(),
            "Forwarding question to completion provider"
        );

        let response = self.provider.complete(&request).await.map_err(|e| {
            tracing::error!(
                provider = %self.provider.name(),
                kind = e.kind(),
                error = %e,
                "Completion provider call failed"
            );
            e
        })?;

        let answer = match response.first_text() {
            Some(text) => text.to_string(),
            None => {
                tracing::error!(
                    provider = %self.provider.name(),
                    choices = response.choices.len(),
                    "Completion provider returned no answer text"
                );
                return Err(ProviderError::EmptyCompletion);
            }
        };

        tracing::info!(
            provider = %self.provider.name(),
            answer_chars = answer.chars().count(),
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0),
            duration_ms = %format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0),
            "Completion received"
        );

        Ok(answer)
    }
}

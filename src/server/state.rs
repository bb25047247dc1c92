//! Application state container
//!
//! Shared, read-only resources handed to every request handler via Axum's
//! state extraction.

use crate::config::Settings;
use crate::services::{CompletionProvider, GroqConfig, GroqService, TutorService};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Cheaply cloneable; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Tutor service wrapping the completion provider
    pub tutor: Arc<TutorService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create the state with the Groq provider described by `settings`
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        tracing::debug!("Creating Groq completion client");
        let groq = GroqService::new(GroqConfig::from_settings(&settings)?)?;

        Ok(Self::with_provider(settings, Arc::new(groq)))
    }

    /// Create the state around any completion provider
    pub fn with_provider(settings: Settings, provider: Arc<dyn CompletionProvider>) -> Self {
        let tutor = TutorService::new(provider, settings.completion.clone());

        tracing::info!(
            model = %settings.completion.model,
            max_tokens = settings.completion.max_tokens,
            temperature = settings.completion.temperature,
            "Application state initialized"
        );

        Self {
            settings: Arc::new(settings),
            tutor: Arc::new(tutor),
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

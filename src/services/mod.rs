//! Services module
//!
//! Contains the tutoring logic and the completion provider integration.

pub mod groq;
pub mod prompt;
pub mod provider;
pub mod tutor;

pub use groq::{GroqConfig, GroqService};
pub use prompt::{build_prompt, Question, ValidationError, SYSTEM_PROMPT};
pub use provider::{CompletionProvider, ProviderError};
pub use tutor::TutorService;

//! API schema definitions
//!
//! Contains the tutor's own request/response bodies and the chat completion
//! wire format spoken to the provider.

pub mod openai;
pub mod tutor;

pub use tutor::{AskRequest, AskResponse, HealthResponse};

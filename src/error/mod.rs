//! Error types
//!
//! `ApiError` is the single boundary between handler failures and the JSON
//! error payloads returned to callers.

pub mod types;

pub use types::{ApiError, ErrorResponse, NO_QUESTION_MESSAGE};

//! Maths tutor relay library
//!
//! Validates a student's question, wraps it in the fixed tutoring prompt,
//! relays it to a chat completion provider, and returns the answer as JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use error::ApiError;
pub use server::App;

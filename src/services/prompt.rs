//! Tutor prompt assembly
//!
//! Holds the fixed instructional text and turns a validated [`Question`]
//! into the two-message prompt sent to the completion provider.

use thiserror::Error;

use crate::schemas::openai::ChatMessage;

/// Instructions prepended to every question
pub const SYSTEM_PROMPT: &str = "You are a friendly and patient GCSE Maths tutor specialising in
Functional Skills Level 2 (UK standard). Your job is to help students
understand and solve maths problems.

When answering questions:
1. Always show step-by-step working out
2. Use simple, clear language suitable for a UK secondary school student
3. Explain WHY each step is done, not just HOW
4. Use UK English spelling (e.g. 'colour' not 'color')
5. Reference UK contexts where helpful (e.g. pounds sterling, metres)
6. Cover topics: Number, Fractions, Percentages, Ratio, Algebra,
   Geometry, Measures, Statistics, and Problem Solving
7. Always end with a tip or encouragement";

/// The question was missing or blank
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No question provided")]
pub struct ValidationError;

/// A student question, guaranteed non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate the raw `question` field of a request body
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(Self(text.to_string())),
            _ => Err(ValidationError),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, for logging without the content
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Build the ordered prompt: system instructions first, then the question
pub fn build_prompt(question: &Question) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(question.as_str()),
    ]
}

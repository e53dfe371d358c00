//! Generative model request/response types for relaychat.
//!
//! Provider-agnostic shapes for a single `generateContent`-style call:
//! the result text plus whatever metadata the provider reported, and the
//! error taxonomy for upstream failures.

use serde::{Deserialize, Serialize};

/// Token usage reported by the provider, when it reports any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The outcome of one successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Text of the first candidate's first text part.
    pub text: String,
    /// Model that produced the text (as reported, or as requested).
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl Generation {
    pub fn text(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            finish_reason: None,
            usage: None,
        }
    }
}

/// Errors from generative model operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("provider returned no candidates")]
    EmptyResponse,

    #[error("first candidate has no text part")]
    MissingText,

    #[error("provider blocked the prompt: {0}")]
    Blocked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_text_constructor() {
        let g = Generation::text("Hi there", "gemini-2.5-flash");
        assert_eq!(g.text, "Hi there");
        assert!(g.finish_reason.is_none());
        assert!(g.usage.is_none());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Status {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "provider returned HTTP 429: quota");
        assert_eq!(LlmError::EmptyResponse.to_string(), "provider returned no candidates");
    }
}

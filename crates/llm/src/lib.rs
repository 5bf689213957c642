//! Generative model integration for FIR synthesis
//!
//! Features:
//! - `ChatBackend` trait with a Groq (OpenAI-compatible) implementation
//! - Language-tagged prompt construction for the FIR record shape
//! - Four-stage JSON recovery for malformed model output

pub mod backend;
pub mod prompt;
pub mod recovery;

pub use backend::{ChatBackend, ChatRequest, GenerationResult, GroqBackend, GroqConfig};
pub use prompt::{fir_system_prompt, fir_user_message, reduced_fir_system_prompt, Message, Role};
pub use recovery::recover_json;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

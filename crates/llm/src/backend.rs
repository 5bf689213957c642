//! Chat backend implementations
//!
//! The synthesizer talks to the generative model through the `ChatBackend`
//! trait so the model call stays an opaque, swappable collaborator. The
//! production implementation targets the Groq OpenAI-compatible chat
//! completions API; tests swap in scripted mocks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::prompt::Message;
use crate::LlmError;

/// Configuration for the Groq backend
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API endpoint (OpenAI-compatible base URL)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Request timeout; a timed-out call surfaces as `LlmError::Timeout`
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GroqConfig {
    /// Create config with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set endpoint (for proxies or tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A single chat completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model id, chosen per request by the synthesizer
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// Result of a chat completion
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Completion tokens, when the API reports usage
    pub tokens: usize,
    /// Total round-trip time (ms)
    pub total_time_ms: u64,
}

/// Chat backend trait
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Execute a chat completion request
    async fn chat(&self, request: ChatRequest) -> Result<GenerationResult, LlmError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Groq backend (OpenAI-compatible chat completions)
pub struct GroqBackend {
    config: GroqConfig,
    client: Client,
}

impl GroqBackend {
    /// Create a new Groq backend
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "GROQ_API_KEY not set. Set it via environment or config.".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatBackend for GroqBackend {
    async fn chat(&self, request: ChatRequest) -> Result<GenerationResult, LlmError> {
        let start = std::time::Instant::now();

        let body = ChatCompletionRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: Some(request.temperature),
            max_tokens: Some(request.max_tokens),
            stream: Some(false),
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("HTTP {status}: {error_text}")));
            }
            return Err(LlmError::Api(format!("HTTP {status}: {error_text}")));
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        Ok(GenerationResult {
            text: choice.message.content,
            tokens: response.usage.map(|u| u.completion_tokens).unwrap_or(0),
            total_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &str {
        "groq"
    }
}

// Groq API types (OpenAI-compatible)

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    completion_tokens: usize,
}

//! Structured-record synthesis via the generative model
//!
//! Detects the dominant transcript language, sends the language-tagged
//! prompt to the matching model, and recovers a `FirRecord` from whatever
//! text comes back. Transport failures get exactly one retry against the
//! secondary model with the reduced prompt; parse failures do not retry,
//! the reconciler owns that fallback.

use std::sync::Arc;

use thiserror::Error;

use fir_intake_core::{FirRecord, Language};
use fir_intake_llm::{
    fir_system_prompt, fir_user_message, recover_json, reduced_fir_system_prompt, ChatBackend,
    ChatRequest, LlmError, Message,
};

/// Terminal synthesis failures, handed to the reconciler
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Model call failed after the secondary retry
    #[error("model transport failed: {0}")]
    Transport(#[from] LlmError),

    /// Model responded but no record could be recovered
    #[error("unrecoverable model output: {0}")]
    Parse(String),
}

/// Synthesizer configuration
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Model for Hindi-dominant transcripts (better multilingual handling)
    pub hindi_model: String,
    /// Model for English transcripts
    pub english_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output budget for the primary call
    pub primary_max_tokens: usize,
    /// Reduced output budget for the secondary retry
    pub fallback_max_tokens: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            hindi_model: "claude-3-haiku-20240307".to_string(),
            english_model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.5,
            primary_max_tokens: 1500,
            fallback_max_tokens: 1000,
        }
    }
}

/// Structured-record synthesizer
pub struct Synthesizer {
    backend: Arc<dyn ChatBackend>,
    config: SynthesisConfig,
}

impl Synthesizer {
    /// Create a new synthesizer
    pub fn new(backend: Arc<dyn ChatBackend>, config: SynthesisConfig) -> Self {
        Self { backend, config }
    }

    /// Synthesize a FIR record from a transcript.
    ///
    /// May suspend on network I/O. Returns a distinguishable error instead
    /// of fabricating a record; the reconciler decides how to degrade.
    pub async fn synthesize(&self, transcript: &str) -> Result<FirRecord, SynthesisError> {
        let language = Language::detect(transcript);
        let primary_model = self.primary_model(language);

        let primary = ChatRequest {
            model: primary_model.to_string(),
            messages: vec![
                Message::system(fir_system_prompt(language)),
                Message::user(fir_user_message(transcript)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.primary_max_tokens,
        };

        let text = match self.backend.chat(primary).await {
            Ok(result) => result.text,
            Err(err) => {
                let secondary_model = self.secondary_model(language);
                tracing::warn!(
                    error = %err,
                    model = primary_model,
                    fallback = secondary_model,
                    "primary model call failed, retrying with secondary model"
                );

                let secondary = ChatRequest {
                    model: secondary_model.to_string(),
                    messages: vec![
                        Message::system(reduced_fir_system_prompt(language)),
                        Message::user(fir_user_message(transcript)),
                    ],
                    temperature: self.config.temperature,
                    max_tokens: self.config.fallback_max_tokens,
                };

                self.backend.chat(secondary).await?.text
            }
        };

        let value = recover_json(&text).ok_or_else(|| {
            tracing::warn!(
                response_chars = text.chars().count(),
                "no JSON object recovered from model output"
            );
            SynthesisError::Parse("no JSON object found in model output".to_string())
        })?;

        serde_json::from_value(value).map_err(|e| SynthesisError::Parse(e.to_string()))
    }

    fn primary_model(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.config.hindi_model,
            Language::English => &self.config.english_model,
        }
    }

    fn secondary_model(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.config.english_model,
            Language::English => &self.config.hindi_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fir_intake_core::Priority;
    use fir_intake_llm::GenerationResult;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend that replays a scripted sequence of outcomes
    struct ScriptedBackend {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_log(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, request: ChatRequest) -> Result<GenerationResult, LlmError> {
            self.requests.lock().unwrap().push(request);
            let outcome = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::Api("script exhausted".to_string())));
            outcome.map(|text| GenerationResult {
                text,
                tokens: 0,
                total_time_ms: 1,
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn synthesizer(script: Vec<Result<String, LlmError>>) -> (Synthesizer, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend::new(script));
        (
            Synthesizer::new(backend.clone(), SynthesisConfig::default()),
            backend,
        )
    }

    #[tokio::test]
    async fn test_happy_path() {
        let (synth, backend) = synthesizer(vec![Ok(
            r#"{"fullName": "Raj Kumar", "priority": "high"}"#.to_string()
        )]);

        let record = synth.synthesize("My name is Raj Kumar").await.unwrap();
        assert_eq!(record.full_name, "Raj Kumar");
        assert_eq!(record.priority, Priority::High);

        let requests = backend.request_log();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "llama-3.3-70b-versatile");
        assert_eq!(requests[0].max_tokens, 1500);
    }

    #[tokio::test]
    async fn test_hindi_transcript_selects_hindi_model() {
        let (synth, backend) = synthesizer(vec![Ok(r#"{"title": "चोरी"}"#.to_string())]);

        synth.synthesize("मेरा नाम सुनील है").await.unwrap();
        assert_eq!(backend.request_log()[0].model, "claude-3-haiku-20240307");
    }

    #[tokio::test]
    async fn test_fenced_response_is_recovered() {
        let (synth, _) = synthesizer(vec![Ok(
            "```json\n{\"fullName\": \"Anita Desai\"}\n```".to_string()
        )]);

        let record = synth.synthesize("name is Anita Desai").await.unwrap();
        assert_eq!(record.full_name, "Anita Desai");
    }

    #[tokio::test]
    async fn test_transport_failure_retries_secondary_once() {
        let (synth, backend) = synthesizer(vec![
            Err(LlmError::Network("connection refused".to_string())),
            Ok(r#"{"title": "Theft"}"#.to_string()),
        ]);

        let record = synth.synthesize("my phone number is 9876543210").await.unwrap();
        assert_eq!(record.title, "Theft");

        let requests = backend.request_log();
        assert_eq!(requests.len(), 2);
        // English transcript: primary english model, secondary hindi model
        assert_eq!(requests[0].model, "llama-3.3-70b-versatile");
        assert_eq!(requests[1].model, "claude-3-haiku-20240307");
        // Secondary retry uses the reduced prompt and budget
        assert_eq!(requests[1].max_tokens, 1000);
        assert!(!requests[1].messages[0].content.contains("witnesses"));
    }

    #[tokio::test]
    async fn test_both_transports_fail() {
        let (synth, backend) = synthesizer(vec![
            Err(LlmError::Timeout),
            Err(LlmError::Network("connection refused".to_string())),
        ]);

        let result = synth.synthesize("some transcript").await;
        assert!(matches!(result, Err(SynthesisError::Transport(_))));
        assert_eq!(backend.request_log().len(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_does_not_retry() {
        let (synth, backend) = synthesizer(vec![Ok(
            "I am sorry, I cannot help with that.".to_string()
        )]);

        let result = synth.synthesize("some transcript").await;
        assert!(matches!(result, Err(SynthesisError::Parse(_))));
        // No secondary model call for parse failures
        assert_eq!(backend.request_log().len(), 1);
    }
}

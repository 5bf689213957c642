//! Application settings
//!
//! Priority: env vars (`FIR_` prefix) > config/{env}.yaml > config/default.yaml > defaults.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use fir_intake_llm::GroqConfig;
use fir_intake_pipeline::SynthesisConfig;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generative model configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enforce the configured CORS origin list
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; falls back to the GROQ_API_KEY environment variable
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Model for Hindi-dominant transcripts
    #[serde(default = "default_hindi_model")]
    pub hindi_model: String,

    /// Model for English transcripts
    #[serde(default = "default_english_model")]
    pub english_model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output budget for the primary call
    #[serde(default = "default_primary_max_tokens")]
    pub primary_max_tokens: usize,

    /// Output budget for the secondary retry
    #[serde(default = "default_fallback_max_tokens")]
    pub fallback_max_tokens: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            hindi_model: default_hindi_model(),
            english_model: default_english_model(),
            temperature: default_temperature(),
            primary_max_tokens: default_primary_max_tokens(),
            fallback_max_tokens: default_fallback_max_tokens(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Build the chat backend config from these settings
    pub fn groq_config(&self) -> GroqConfig {
        let api_key = if self.llm.api_key.is_empty() {
            // GroqConfig::default() reads GROQ_API_KEY from the environment
            GroqConfig::default().api_key
        } else {
            self.llm.api_key.clone()
        };

        GroqConfig::new(api_key)
            .with_endpoint(self.llm.endpoint.clone())
            .with_timeout(Duration::from_secs(self.llm.timeout_secs))
    }

    /// Build the synthesizer config from these settings
    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            hindi_model: self.llm.hindi_model.clone(),
            english_model: self.llm.english_model.clone(),
            temperature: self.llm.temperature,
            primary_max_tokens: self.llm.primary_max_tokens,
            fallback_max_tokens: self.llm.fallback_max_tokens,
        }
    }
}

/// Load settings from config files and environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env}")).required(false));
    }

    builder
        .add_source(Environment::with_prefix("FIR").separator("__"))
        .build()?
        .try_deserialize()
}

fn default_port() -> u16 {
    3001
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:8080".to_string(),
        "http://localhost:5000".to_string(),
    ]
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_hindi_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_english_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_primary_max_tokens() -> usize {
    1500
}

fn default_fallback_max_tokens() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3001);
        assert!(settings.server.cors_enabled);
        assert_eq!(settings.llm.english_model, "llama-3.3-70b-versatile");
        assert_eq!(settings.llm.timeout_secs, 30);
        assert_eq!(settings.observability.log_level, "info");
    }

    #[test]
    fn test_synthesis_config_mapping() {
        let settings = Settings::default();
        let config = settings.synthesis_config();
        assert_eq!(config.hindi_model, settings.llm.hindi_model);
        assert_eq!(config.primary_max_tokens, 1500);
        assert_eq!(config.fallback_max_tokens, 1000);
    }

    #[test]
    fn test_groq_config_mapping() {
        let mut settings = Settings::default();
        settings.llm.api_key = "gsk-from-file".to_string();
        settings.llm.timeout_secs = 5;

        let config = settings.groq_config();
        assert_eq!(config.api_key, "gsk-from-file");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.server.cors_enabled);
        assert_eq!(settings.llm.temperature, 0.5);
    }
}

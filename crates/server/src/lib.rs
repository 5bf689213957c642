//! HTTP intake boundary for the FIR pipeline
//!
//! A thin transport over the shared pipeline core: one intake route plus a
//! health check. Rendering, authentication and persistence live with
//! external collaborators.

pub mod http;
pub mod settings;

pub use http::{create_router, AppState};
pub use settings::{load_settings, LlmSettings, ObservabilityConfig, ServerConfig, Settings};

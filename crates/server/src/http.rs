//! HTTP endpoints
//!
//! REST API for the FIR intake pipeline.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fir_intake_core::FirRecord;
use fir_intake_pipeline::FirPipeline;

use crate::settings::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FirPipeline>,
}

/// Create the application router
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let cors_layer = build_cors_layer(&config.cors_origins, config.cors_enabled);

    Router::new()
        .route("/api/generate-fir", post(generate_fir))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// FIR generation request
#[derive(Debug, Deserialize)]
struct GenerateFirRequest {
    #[serde(default)]
    transcript: String,
}

/// Generate a FIR record from a transcript.
///
/// Always answers 200 with a structured record for a non-empty transcript;
/// a degraded record is distinguishable only by its contents.
async fn generate_fir(
    State(state): State<AppState>,
    Json(request): Json<GenerateFirRequest>,
) -> Result<Json<FirRecord>, (StatusCode, Json<serde_json::Value>)> {
    let transcript = request.transcript.trim();
    if transcript.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Transcript is required" })),
        ));
    }

    let record = state.pipeline.process(transcript).await;
    Ok(Json(record))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fir_intake_llm::{GroqBackend, GroqConfig};
    use fir_intake_pipeline::SynthesisConfig;

    fn test_state() -> AppState {
        let backend = GroqBackend::new(GroqConfig::new("test-key")).unwrap();
        AppState {
            pipeline: Arc::new(FirPipeline::new(
                Arc::new(backend),
                SynthesisConfig::default(),
            )),
        }
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(test_state(), &ServerConfig::default());
    }

    #[test]
    fn test_router_creation_with_cors_disabled() {
        let config = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        let _ = create_router(test_state(), &config);
    }

    #[test]
    fn test_invalid_origins_fall_back() {
        let _ = build_cors_layer(&["not a header value\u{0}".to_string()], true);
    }

    #[test]
    fn test_request_deserialization() {
        let request: GenerateFirRequest =
            serde_json::from_str(r#"{"transcript": "kal chori hui"}"#).unwrap();
        assert_eq!(request.transcript, "kal chori hui");

        let empty: GenerateFirRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.transcript.is_empty());
    }
}

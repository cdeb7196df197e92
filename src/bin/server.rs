//! covgap REST API server.
//!
//! Provides HTTP endpoints for coverage-gap analysis via the covgap engine.
//!
//! Run with: `cargo run --bin covgap-server --features server`
//!
//! Environment variables:
//! - `COVGAP_PORT` - Port to listen on (default: 8080)
//! - `COVGAP_HOST` - Host to bind to (default: 0.0.0.0)
//! - `COVGAP_API_TOKEN` - Bearer token for authentication (optional, if set all requests require it)

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covgap::orchestrator::{AnalysisConfig, analyze_bytes};
use covgap::output::json::{JsonOutput, Refusal};
use covgap::prioritize::PriorityWeights;
use covgap::suggest::TemplateGenerator;

/// Server configuration from environment.
#[derive(Clone)]
struct Config {
    port: u16,
    host: String,
    api_token: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            port: std::env::var("COVGAP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            host: std::env::var("COVGAP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_token: std::env::var("COVGAP_API_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "covgap=info,covgap_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|err| format!("invalid bind address {}:{}: {err}", config.host, config.port))?;

    if config.api_token.is_some() {
        tracing::info!("API token authentication enabled");
    } else {
        tracing::warn!("No COVGAP_API_TOKEN set - API is unauthenticated");
    }

    let app = Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .with_state(Arc::new(config))
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("covgap-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Query parameters of `POST /analyze`. Missing weights keep their defaults.
#[derive(Debug, Default, Deserialize)]
struct AnalyzeParams {
    impact: Option<f64>,
    difficulty: Option<f64>,
    dependency: Option<f64>,
    max_suggestions: Option<usize>,
    #[serde(default)]
    predict: bool,
    design_context: Option<String>,
}

impl AnalyzeParams {
    /// Same usage rule as `--max-suggestions`: zero is rejected.
    fn into_config(self) -> Result<AnalysisConfig, String> {
        if self.max_suggestions == Some(0) {
            return Err("max_suggestions must be >= 1".to_string());
        }
        let defaults = PriorityWeights::default();
        Ok(AnalysisConfig {
            weights: PriorityWeights::new(
                self.impact.unwrap_or(defaults.impact),
                self.difficulty.unwrap_or(defaults.difficulty),
                self.dependency.unwrap_or(defaults.dependency),
            ),
            max_suggestions: self.max_suggestions,
            enable_prediction: self.predict,
            design_context: self.design_context.filter(|s| !s.trim().is_empty()),
            ..AnalysisConfig::default()
        })
    }
}

/// Analyze a text coverage report sent as the request body.
///
/// Requires `Authorization: Bearer <token>` header if `COVGAP_API_TOKEN` is set.
async fn analyze(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(expected_token) = &config.api_token {
        if !bearer_matches(&headers, expected_token) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or missing bearer token".to_string(),
                }),
            )
                .into_response();
        }
    }

    let analysis_config = match params.into_config() {
        Ok(config) => config,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };
    let record = match analyze_bytes(&body, &analysis_config, &TemplateGenerator::new()) {
        Ok(analysis) => analysis.into_json(&analysis_config),
        Err(refusal) => {
            tracing::warn!(code = %refusal.code, "{}", refusal.message());
            let record = JsonOutput::refusal(Refusal::new(refusal.code, refusal.message()));
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(record)).into_response();
        }
    };
    (StatusCode::OK, Json(record)).into_response()
}

fn bearer_matches(headers: &HeaderMap, expected: &str) -> bool {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let provided = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .unwrap_or("");
    provided == expected
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn params_fill_missing_weights_with_defaults() {
        let params = AnalyzeParams {
            impact: Some(1.0),
            max_suggestions: Some(3),
            design_context: Some("  ".to_string()),
            ..AnalyzeParams::default()
        };
        let config = params.into_config().expect("valid params");
        assert_eq!(config.weights, PriorityWeights::new(1.0, 0.3, 0.2));
        assert_eq!(config.max_suggestions, Some(3));
        assert_eq!(config.design_context, None);
    }

    #[test]
    fn zero_max_suggestions_is_rejected() {
        let params = AnalyzeParams {
            max_suggestions: Some(0),
            ..AnalyzeParams::default()
        };
        let err = params.into_config().unwrap_err();
        assert!(err.contains("max_suggestions"));
    }

    #[test]
    fn bearer_token_check() {
        let mut headers = HeaderMap::new();
        assert!(!bearer_matches(&headers, "secret"));
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        assert!(bearer_matches(&headers, "secret"));
        assert!(!bearer_matches(&headers, "other"));
    }
}

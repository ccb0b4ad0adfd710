//! HTTP gateway (Axum) in front of the answer pipeline.
//!
//! Routes: `POST /ask`, `GET /health`, `GET /metrics`, `GET /`.

pub mod error;
pub mod handler;
pub mod metrics;
pub mod state;


use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{AskRequest, AskResponse, ask_handler};
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use state::GatewayState;

use crate::constants::PROCESS_TIME_HEADER;

/// Header carrying a per-request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub const SERVICE_NAME: &str = "warden";

pub fn create_router(state: GatewayState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/ask", post(ask_handler))
        .layer(cors)
        .layer(middleware::from_fn(timing_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS policy. `*` allows any origin without credentials; an explicit list allows
/// credentials and mirrors the requested methods and headers.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Stamps every response with its wall time (seconds, 3 decimals) and a request id.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let mut response = next.run(request).await;

    let elapsed = format!("{:.3}", started.elapsed().as_secs_f64());
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        headers.insert(PROCESS_TIME_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub store_size: usize,
    pub cache_enabled: bool,
    pub cache_size: usize,
    pub uptime_secs: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MetricsResponse {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate: f64,
    pub cache_enabled: bool,
}

#[tracing::instrument(skip(state))]
pub async fn health_handler(State(state): State<GatewayState>) -> Response {
    let body = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.to_string(),
        store_size: state.pipeline.corpus().len(),
        cache_enabled: state.pipeline.cache_enabled(),
        cache_size: state.pipeline.cache_len(),
        uptime_secs: state.uptime_secs(),
    };

    (StatusCode::OK, Json(body)).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn metrics_handler(State(state): State<GatewayState>) -> Response {
    let snapshot = state.metrics.snapshot();
    let body = MetricsResponse {
        total_requests: snapshot.total,
        successful_requests: snapshot.successful,
        failed_requests: snapshot.failed,
        success_rate: snapshot.success_rate(),
        cache_enabled: state.pipeline.cache_enabled(),
    };

    (StatusCode::OK, Json(body)).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn root_handler(State(state): State<GatewayState>) -> Response {
    let body = serde_json::json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Citation-guarded answers over policy documents",
        "provider": state.pipeline.generator().provider(),
        "started_at": state.started_at.to_rfc3339(),
        "health_url": "/health",
        "metrics_url": "/metrics",
    });

    (StatusCode::OK, Json(body)).into_response()
}

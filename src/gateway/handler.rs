use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::error::GatewayError;
use super::state::GatewayState;
use crate::constants::{MAX_QUERY_CHARS, MIN_QUERY_CHARS, WARDEN_CACHE_HEADER};
use crate::pipeline::AnswerResponse;

/// `POST /ask` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// `POST /ask` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(flatten)]
    pub answer: AnswerResponse,
    pub process_time_ms: f64,
}

/// Trims the query and checks its length in characters.
pub fn validate_query(raw: &str) -> Result<String, GatewayError> {
    let query = raw.trim();
    let chars = query.chars().count();

    if chars == 0 {
        return Err(GatewayError::Validation(
            "query cannot be empty or only whitespace".to_string(),
        ));
    }
    if chars < MIN_QUERY_CHARS {
        return Err(GatewayError::Validation(format!(
            "query must be at least {MIN_QUERY_CHARS} characters"
        )));
    }
    if chars > MAX_QUERY_CHARS {
        return Err(GatewayError::Validation(format!(
            "query must be at most {MAX_QUERY_CHARS} characters"
        )));
    }

    Ok(query.to_string())
}

#[instrument(skip(state, payload), fields(query_len = tracing::field::Empty))]
pub async fn ask_handler(
    State(state): State<GatewayState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();

    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        GatewayError::Validation(rejection.body_text())
    })?;
    let query = validate_query(&request.query)?;
    tracing::Span::current().record("query_len", query.chars().count());

    state.metrics.record_request();

    let outcome = match state.pipeline.ask(&query).await {
        Ok(outcome) => outcome,
        Err(err) => {
            state.metrics.record_failure();
            return Err(GatewayError::from_pipeline(
                err,
                state.config.environment.is_production(),
            ));
        }
    };

    let cache = outcome.cache_status(state.pipeline.cache_enabled());

    let answer = match outcome.into_response() {
        Ok(answer) => answer,
        Err(refusal) => {
            warn!(code = refusal.code(), reason = %refusal.reason, "Response rejected");
            state.metrics.record_failure();
            return Err(GatewayError::Refused {
                reason: refusal.reason,
                cache,
            });
        }
    };

    state.metrics.record_success();

    let process_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    info!(
        confidence = answer.confidence,
        cached = answer.cached,
        process_time_ms,
        "Request successful"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        WARDEN_CACHE_HEADER,
        HeaderValue::from_static(cache.as_header_value()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(AskResponse {
            answer,
            process_time_ms,
        }),
    )
        .into_response())
}

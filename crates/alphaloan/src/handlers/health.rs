//! health check endpoint handler.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio::time::timeout;

use crate::AppState;
use alphaloan_db::Database;

/// health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// content-type for health check responses per RFC 8040.
const HEALTH_CONTENT_TYPE: &str = "application/health+json; charset=utf-8";

/// timeout for the database ping.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// `GET /health` - health check endpoint.
///
/// checks database connectivity with a 1-second timeout. returns 200 with
/// `{"status": "pass"}` if healthy, 500 with `{"status": "fail"}` otherwise.
/// a hung connection counts as unhealthy, same as a failed ping.
pub async fn health(State(state): State<AppState>) -> Response {
    let healthy = matches!(timeout(PING_TIMEOUT, state.db.ping()).await, Ok(Ok(())));

    let (status_code, status) = if healthy {
        (StatusCode::OK, "pass")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "fail")
    };

    (
        status_code,
        [(header::CONTENT_TYPE, HEALTH_CONTENT_TYPE)],
        Json(HealthResponse { status }),
    )
        .into_response()
}

//! Liveness endpoint.

use axum::extract::State;
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthResponse};

/// `GET /health`
///
/// Answers 200 while the database responds to a ping, 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthResponse> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database ping failed");
            false
        }
    };

    let health = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    };

    let mut response = ApiResponse::success(health);
    if !database {
        response.code = 503;
    }
    response
}

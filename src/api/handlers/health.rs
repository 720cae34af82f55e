//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Round-trip through the link repository
/// 2. **Click Queue**: Checks if channel is open and reports capacity
/// 3. **Cache**: Pings the moderation verdict cache
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let queue_check = check_click_queue(&state);

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            click_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.links.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

/// Checks if the click tracking queue is operational.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_sender.capacity()))
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("{} cache available", backend))
    } else {
        CheckStatus::error(format!("{} cache unreachable", backend))
    }
}

//! Handler for the URL safety proxy.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::safety::{SafetyCheckRequest, SafetyCheckResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Looks a destination URL up in the threat list.
///
/// # Endpoint
///
/// `POST /api/safety/check`
///
/// # Response
///
/// ```json
/// { "isSafe": true, "status": "degraded", "degraded": true, "threats": [], "error": "..." }
/// ```
///
/// Malformed URLs are reported with `status: "invalid"` and no lookup.
pub async fn safety_check_handler(
    State(state): State<AppState>,
    Json(payload): Json<SafetyCheckRequest>,
) -> Result<Json<SafetyCheckResponse>, AppError> {
    payload.validate()?;

    let response = match state.safety_service.check(&payload.url).await {
        Ok(report) => report.into(),
        Err(e) => SafetyCheckResponse::invalid(e.to_string()),
    };

    Ok(Json(response))
}

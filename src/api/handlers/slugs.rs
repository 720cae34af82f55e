//! Handler for slug availability and moderation checks.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::slugs::{SlugCheckRequest, SlugCheckResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Checks whether a slug can be used.
///
/// # Endpoint
///
/// `POST /api/slugs/check`
///
/// # Checks
///
/// 1. Format (length, charset, lookalike characters)
/// 2. Availability among active links, on `domain` if given
/// 3. Moderation (blocked terms, then the toxicity API)
///
/// Moderation fails open: when the toxicity API is unavailable the slug is
/// reported safe with `moderation.status = "uncertain"`.
///
/// # Errors
///
/// Returns 500 if the availability lookup fails.
pub async fn slug_check_handler(
    State(state): State<AppState>,
    Json(payload): Json<SlugCheckRequest>,
) -> Result<Json<SlugCheckResponse>, AppError> {
    payload.validate()?;

    let check = state
        .slug_service
        .check(&payload.slug, payload.domain.as_deref())
        .await?;

    Ok(Json(check.into()))
}

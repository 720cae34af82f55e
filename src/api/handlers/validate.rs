//! Handlers for the domain and URL validators.

use axum::Json;
use validator::Validate;

use crate::api::dto::validate::{
    ValidateDomainRequest, ValidateDomainResponse, ValidateUrlRequest, ValidateUrlResponse,
};
use crate::error::AppError;
use crate::validation::{DomainOptions, validate_domain, validate_url};

/// Validates a custom domain.
///
/// # Endpoint
///
/// `POST /api/validate/domain`
///
/// # Request Body
///
/// ```json
/// { "domain": "links.example.com", "options": { "allowSubdomains": true } }
/// ```
///
/// A rejected domain is a normal `200` response with `isValid: false`;
/// only malformed requests return an error status.
pub async fn validate_domain_handler(
    Json(payload): Json<ValidateDomainRequest>,
) -> Result<Json<ValidateDomainResponse>, AppError> {
    payload.validate()?;

    let options: DomainOptions = payload.options.map(Into::into).unwrap_or_default();

    let response = match validate_domain(&payload.domain, &options) {
        Ok(sanitized) => ValidateDomainResponse {
            is_valid: true,
            error: None,
            sanitized: Some(sanitized),
        },
        Err(e) => ValidateDomainResponse {
            is_valid: false,
            error: Some(e.to_string()),
            sanitized: None,
        },
    };

    Ok(Json(response))
}

/// Validates a destination URL.
///
/// # Endpoint
///
/// `POST /api/validate/url`
pub async fn validate_url_handler(
    Json(payload): Json<ValidateUrlRequest>,
) -> Result<Json<ValidateUrlResponse>, AppError> {
    payload.validate()?;

    let response = match validate_url(&payload.url) {
        Ok(normalized) => ValidateUrlResponse {
            is_valid: true,
            error: None,
            normalized_url: Some(normalized),
        },
        Err(e) => ValidateUrlResponse {
            is_valid: false,
            error: Some(e.to_string()),
            normalized_url: None,
        },
    };

    Ok(Json(response))
}

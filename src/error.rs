//! Application error type and its HTTP representation.
//!
//! API handlers return [`AppError`], rendered as
//! `{"error": {"code", "message", "details"}}` with a matching status code.
//! The public redirect endpoint renders its own plain-text bodies instead
//! (see [`crate::api::handlers::redirect`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// PostgreSQL error codes that indicate a missing or outdated schema.
const UNDEFINED_TABLE: &str = "42P01";
const UNDEFINED_COLUMN: &str = "42703";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Configuration { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Configuration { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Configuration(source) = &e {
        tracing::error!("Database configuration error: {}", source);
        return AppError::configuration("Database is not configured", json!({}));
    }

    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if matches!(db.code().as_deref(), Some(UNDEFINED_TABLE | UNDEFINED_COLUMN)) {
            tracing::error!("Database schema error: {}", db.message());
            return AppError::configuration("Database schema is not set up", json!({}));
        }
    }

    tracing::error!("Database error: {}", e);
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = e
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}

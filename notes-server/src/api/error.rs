//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes. Auth failures funnel through the
//! [`ApiError::Auth`] variant so the status mapping lives in one place:
//! the OTP failure modes are deliberately surfaced with one shared code
//! and message, so callers cannot distinguish never-issued from expired.

use notes_auth::AuthError;
use notes_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Ownership violation (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Anything from the auth core; status depends on the variant
    #[error("Auth error: {source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        ApiError::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::Forbidden { message, .. } => (
                StatusCode::FORBIDDEN,
                ApiErrorBody {
                    code: "FORBIDDEN".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Auth { source, .. } => auth_error_body(source),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Map auth-core failures to wire responses.
fn auth_error_body(source: AuthError) -> (StatusCode, ApiErrorBody) {
    match source {
        AuthError::Validation { message, field, .. } => (
            StatusCode::BAD_REQUEST,
            ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
        ),
        // 400 rather than 404: login flows stay deliberately vague about
        // which emails exist
        AuthError::NotFound { .. } => (
            StatusCode::BAD_REQUEST,
            ApiErrorBody {
                code: "ACCOUNT_NOT_FOUND".into(),
                message: "Account not found or not verified.".into(),
                field: None,
            },
        ),
        // One response for every OTP failure mode; never-issued, expired,
        // and mismatched are indistinguishable to the caller
        AuthError::NoPendingOtp { .. }
        | AuthError::OtpExpired { .. }
        | AuthError::InvalidOtp { .. }
        | AuthError::AccountNotVerified { .. } => (
            StatusCode::BAD_REQUEST,
            ApiErrorBody {
                code: "OTP_INVALID".into(),
                message: "Invalid or expired OTP. Request a new one.".into(),
                field: None,
            },
        ),
        AuthError::Delivery { .. } => (
            StatusCode::BAD_GATEWAY,
            ApiErrorBody {
                code: "DELIVERY_FAILED".into(),
                message: "Failed to send verification email.".into(),
                field: None,
            },
        ),
        AuthError::MissingHeader { .. }
        | AuthError::InvalidScheme { .. }
        | AuthError::TokenExpired { .. }
        | AuthError::JwtDecode { .. }
        | AuthError::InvalidClaim { .. } => (
            StatusCode::UNAUTHORIZED,
            ApiErrorBody {
                code: "UNAUTHORIZED".into(),
                message: "Authentication required.".into(),
                field: None,
            },
        ),
        AuthError::Forbidden { .. } => (
            StatusCode::FORBIDDEN,
            ApiErrorBody {
                code: "FORBIDDEN".into(),
                message: "Admin access required.".into(),
                field: None,
            },
        ),
        AuthError::JwtEncode { .. } | AuthError::Hash { .. } | AuthError::Db { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: "Internal server error".into(),
                field: None,
            },
        ),
    }
}

/// Convert auth-core errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        ApiError::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

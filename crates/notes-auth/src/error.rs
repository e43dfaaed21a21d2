use std::panic::Location;

use error_location::ErrorLocation;
use notes_core::Role;
use notes_db::DbError;
use notes_mail::MailError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Account not found or not verified {location}")]
    NotFound { location: ErrorLocation },

    #[error("No pending OTP for this account {location}")]
    NoPendingOtp { location: ErrorLocation },

    #[error("OTP expired {location}")]
    OtpExpired { location: ErrorLocation },

    #[error("OTP does not match {location}")]
    InvalidOtp { location: ErrorLocation },

    #[error("Account is not verified {location}")]
    AccountNotVerified { location: ErrorLocation },

    #[error("OTP delivery failed: {source} {location}")]
    Delivery {
        #[source]
        source: MailError,
        location: ErrorLocation,
    },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Requires {required} role {location}")]
    Forbidden {
        required: Role,
        location: ErrorLocation,
    },

    #[error("Hashing failed: {message} {location}")]
    Hash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Db {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn hash<S: Into<String>>(message: S) -> Self {
        Self::Hash {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code used by the HTTP error body.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::NoPendingOtp { .. } => "NO_PENDING_OTP",
            Self::OtpExpired { .. } => "OTP_EXPIRED",
            Self::InvalidOtp { .. } => "OTP_INVALID",
            Self::AccountNotVerified { .. } => "ACCOUNT_NOT_VERIFIED",
            Self::Delivery { .. } => "DELIVERY_FAILED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Hash { .. } => "HASH_FAILED",
            Self::Db { .. } => "DATABASE_ERROR",
        }
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<MailError> for AuthError {
    #[track_caller]
    fn from(source: MailError) -> Self {
        Self::Delivery {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

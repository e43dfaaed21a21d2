//! Axum extractor for bearer-token authentication.
//!
//! This is the authenticate half of the gate; handlers that need a role
//! call `claims.require_role` after extraction, so authorization can never
//! run before authentication has succeeded.

use crate::{ApiError, AppState};

use notes_auth::{AuthError, Claims};

use std::future::Future;
use std::panic::Location;

use axum::http::header::AUTHORIZATION;
use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Validated claims of the calling user.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .ok_or(AuthError::MissingHeader {
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let value = header.to_str().map_err(|_| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?;

            let token = value
                .strip_prefix("Bearer ")
                .ok_or(AuthError::InvalidScheme {
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let claims = state.validator.validate(token)?;

            Ok(AuthUser(claims))
        }
    }
}

use crate::{AuthError, Claims, Result as AuthErrorResult, Session};

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use notes_core::User;

/// Mints signed HS256 session tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Mint a session for a verified user.
    ///
    /// Unverified accounts never receive a token; every caller goes
    /// through this check.
    #[track_caller]
    pub fn mint(&self, user: &User) -> AuthErrorResult<Session> {
        if !user.is_verified {
            return Err(AuthError::AccountNotVerified {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        Ok(Session {
            token,
            claims,
            user: user.clone(),
        })
    }
}

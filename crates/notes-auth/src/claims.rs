use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notes_core::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Account role at issuance time
    pub role: Role,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if Uuid::parse_str(&self.sub).is_err() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user id) is not a UUID".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// The authorization half of the gate: admits only `required`.
    /// Callers reach this only after `JwtValidator::validate` succeeded.
    #[track_caller]
    pub fn require_role(&self, required: Role) -> AuthErrorResult<()> {
        if self.role != required {
            return Err(AuthError::Forbidden {
                required,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Subject as a UUID. `validate()` guarantees this parses.
    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

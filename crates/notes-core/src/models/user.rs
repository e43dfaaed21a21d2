//! User account - the only persistent identity in the system.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account. Accounts are created by the first OTP request or the
/// first federated sign-in for an email address, and deleted only by
/// administrative action.
///
/// `otp_hash` and `otp_expires` are both present or both absent; the
/// schema enforces this with a CHECK constraint and the repository only
/// ever writes them as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lower-cased; UNIQUE across all accounts.
    pub email: String,
    /// Only set on legacy accounts that predate the OTP flow.
    pub password_hash: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    /// Argon2 hash of the pending one-time code, if any.
    pub otp_hash: Option<String>,
    pub otp_expires: Option<DateTime<Utc>>,
    /// External subject id for accounts created via federated sign-in.
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an unverified user, as the registration OTP flow does.
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            role: Role::User,
            is_verified: false,
            otp_hash: None,
            otp_expires: None,
            google_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a verified federated user. Role is always `user`;
    /// federated sign-in never grants privileges.
    pub fn new_federated(name: String, email: String, google_id: String) -> Self {
        let mut user = Self::new(name, email);
        user.is_verified = true;
        user.google_id = Some(google_id);
        user
    }

    /// Whether a one-time code is pending consumption.
    pub fn has_pending_otp(&self) -> bool {
        self.otp_hash.is_some() && self.otp_expires.is_some()
    }
}

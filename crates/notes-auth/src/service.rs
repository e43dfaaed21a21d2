//! OTP issuing, OTP verification, and federated sign-in.
//!
//! Every operation either returns a success value or a single categorized
//! [`AuthError`]; no partial success is reported. The pending-OTP write is
//! committed before the mail call, so a delivery failure leaves a valid
//! "pending OTP, no delivered message" state rather than corrupt fields.

use crate::{AuthError, OtpHasher, Result as AuthErrorResult, Session, TokenIssuer, otp};

use std::panic::Location;
use std::sync::Arc;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use notes_core::{User, is_valid_email, normalize_email};
use notes_db::UserRepository;
use notes_mail::Mailer;

pub struct AuthService {
    users: UserRepository,
    mailer: Arc<dyn Mailer>,
    hasher: OtpHasher,
    tokens: TokenIssuer,
    otp_ttl: Duration,
    otp_length: u32,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        mailer: Arc<dyn Mailer>,
        hasher: OtpHasher,
        tokens: TokenIssuer,
        otp_ttl_minutes: i64,
        otp_length: u32,
    ) -> Self {
        Self {
            users,
            mailer,
            hasher,
            tokens,
            otp_ttl: Duration::minutes(otp_ttl_minutes),
            otp_length,
        }
    }

    /// Registration step 1: create-or-reset the account and send a code.
    ///
    /// Re-running registration for an existing account overwrites the name
    /// and resets the verified flag; the previous verification state is
    /// deliberately invalidated.
    pub async fn request_otp(&self, email: &str, name: &str) -> AuthErrorResult<()> {
        let name = checked_name(name)?;
        let email = checked_email(email)?;

        let code = otp::generate_code(self.otp_length);
        let otp_hash = self.hasher.hash(&code)?;
        let otp_expires = Utc::now() + self.otp_ttl;

        match self.users.find_by_email(&email).await? {
            Some(user) => {
                self.users
                    .begin_registration(user.id, name, &otp_hash, otp_expires)
                    .await?;
            }
            None => {
                let mut user = User::new(name.to_string(), email.clone());
                user.otp_hash = Some(otp_hash);
                user.otp_expires = Some(otp_expires);
                self.users.create(&user).await?;
            }
        }

        log::info!("registration OTP issued for {}", email);

        // Pending state is already committed; a failure here aborts the
        // success response but is not rolled back.
        self.mailer.send_otp_email(&email, &code).await?;

        Ok(())
    }

    /// Login step 1: send a code to an existing verified account.
    /// Never creates accounts.
    pub async fn request_login_otp(&self, email: &str) -> AuthErrorResult<()> {
        let email = checked_email(email)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|u| u.is_verified)
            .ok_or_else(|| AuthError::NotFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let code = otp::generate_code(self.otp_length);
        let otp_hash = self.hasher.hash(&code)?;
        self.users
            .set_pending_otp(user.id, &otp_hash, Utc::now() + self.otp_ttl)
            .await?;

        log::info!("login OTP issued for {}", email);

        self.mailer.send_otp_email(&email, &code).await?;

        Ok(())
    }

    /// Registration step 2: consume the code, mark the account verified,
    /// and mint a session.
    pub async fn verify_registration(
        &self,
        email: &str,
        name: &str,
        code: &str,
    ) -> AuthErrorResult<Session> {
        let name = checked_name(name)?;
        let email = checked_email(email)?;

        let user = self.find_with_pending_otp(&email).await?;
        let matched_hash = self.check_code(&user, code)?;

        // CAS-guarded: a concurrent request_otp superseding this code makes
        // the update a no-op and the flow fails rather than consuming the
        // newer code.
        let consumed = self
            .users
            .complete_registration(user.id, name, &matched_hash)
            .await?;
        if !consumed {
            return Err(AuthError::NoPendingOtp {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        log::info!("registration verified for {}", email);

        let user = self.reload(user.id).await?;
        self.tokens.mint(&user)
    }

    /// Login step 2: consume the code and mint a session. Requires a
    /// verified account going in.
    pub async fn verify_login(&self, email: &str, code: &str) -> AuthErrorResult<Session> {
        let email = checked_email(email)?;

        let user = self.find_with_pending_otp(&email).await?;
        if !user.is_verified {
            return Err(AuthError::AccountNotVerified {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let matched_hash = self.check_code(&user, code)?;

        let consumed = self.users.clear_pending_otp(user.id, &matched_hash).await?;
        if !consumed {
            return Err(AuthError::NoPendingOtp {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        log::info!("login verified for {}", email);

        let user = self.reload(user.id).await?;
        self.tokens.mint(&user)
    }

    /// Federated sign-in with a caller-validated assertion.
    ///
    /// First sight of an email creates a verified account with the default
    /// role. An existing account is pure login: role, google_id, and
    /// verification state are never touched, whatever the caller sends.
    pub async fn sign_in_federated(
        &self,
        google_id: &str,
        email: &str,
        name: &str,
    ) -> AuthErrorResult<Session> {
        if google_id.trim().is_empty() {
            return Err(AuthError::validation(
                "Invalid federated sign-in data.",
                Some("google_id"),
            ));
        }
        let email = checked_email(email)?;

        match self.users.find_by_email(&email).await? {
            Some(user) => self.tokens.mint(&user),
            None => {
                let name = checked_name(name)?;
                let user = User::new_federated(
                    name.to_string(),
                    email.clone(),
                    google_id.trim().to_string(),
                );
                self.users.create(&user).await?;

                log::info!("federated account created for {}", email);

                self.tokens.mint(&user)
            }
        }
    }

    /// Lookup plus the shared pending-OTP precondition.
    async fn find_with_pending_otp(&self, email: &str) -> AuthErrorResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::NoPendingOtp {
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !user.has_pending_otp() {
            return Err(AuthError::NoPendingOtp {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(user)
    }

    /// Shared expiry + match check. Returns the hash that matched so the
    /// consuming update can guard on it.
    #[track_caller]
    fn check_code(&self, user: &User, code: &str) -> AuthErrorResult<String> {
        // find_with_pending_otp guarantees the pair is present
        let (otp_hash, otp_expires) = match (&user.otp_hash, user.otp_expires) {
            (Some(hash), Some(expires)) => (hash, expires),
            _ => {
                return Err(AuthError::NoPendingOtp {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if Utc::now() > otp_expires {
            return Err(AuthError::OtpExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !self.hasher.verify(code, otp_hash) {
            return Err(AuthError::InvalidOtp {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(otp_hash.clone())
    }

    async fn reload(&self, id: uuid::Uuid) -> AuthErrorResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::NotFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[track_caller]
fn checked_name(name: &str) -> AuthErrorResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::validation("Name is required.", Some("name")));
    }

    Ok(name)
}

#[track_caller]
fn checked_email(email: &str) -> AuthErrorResult<String> {
    let normalized = normalize_email(email);
    if !is_valid_email(&normalized) {
        return Err(AuthError::validation(
            "Please provide a valid email address.",
            Some("email"),
        ));
    }

    Ok(normalized)
}

use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_OTP_HASH_COST, DEFAULT_OTP_LENGTH,
    DEFAULT_OTP_TTL_MINUTES, DEFAULT_TOKEN_TTL_DAYS, MIN_JWT_SECRET_BYTES,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Required; rotating it logs everyone out.
    pub jwt_secret: Option<String>,
    /// Session lifetime in days.
    pub token_ttl_days: i64,
    /// OTP validity window in minutes.
    pub otp_ttl_minutes: i64,
    /// Argon2 time cost used when hashing one-time codes.
    pub otp_hash_cost: u32,
    /// Digits per one-time code.
    pub otp_length: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            otp_ttl_minutes: DEFAULT_OTP_TTL_MINUTES,
            otp_hash_cost: DEFAULT_OTP_HASH_COST,
            otp_length: DEFAULT_OTP_LENGTH,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set it in config.toml or NOTES_JWT_SECRET)",
                ));
            }
            Some(ref secret) if secret.len() < MIN_JWT_SECRET_BYTES => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} bytes, got {}",
                    MIN_JWT_SECRET_BYTES,
                    secret.len()
                )));
            }
            Some(_) => {}
        }

        if !(1..=90).contains(&self.token_ttl_days) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_days must be 1-90, got {}",
                self.token_ttl_days
            )));
        }

        if !(1..=120).contains(&self.otp_ttl_minutes) {
            return Err(ConfigError::auth(format!(
                "auth.otp_ttl_minutes must be 1-120, got {}",
                self.otp_ttl_minutes
            )));
        }

        if !(1..=10).contains(&self.otp_hash_cost) {
            return Err(ConfigError::auth(format!(
                "auth.otp_hash_cost must be 1-10, got {}",
                self.otp_hash_cost
            )));
        }

        if !(4..=9).contains(&self.otp_length) {
            return Err(ConfigError::auth(format!(
                "auth.otp_length must be 4-9, got {}",
                self.otp_length
            )));
        }

        Ok(())
    }
}

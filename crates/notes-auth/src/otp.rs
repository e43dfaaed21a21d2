//! One-time code generation and hashing.
//!
//! Codes are hashed with argon2id before storage; only the hash ever
//! touches the database. Verification goes through `verify_password`,
//! which compares in constant time.

use crate::{AuthError, Result as AuthErrorResult};

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};
use rand::Rng;

/// Generate a numeric code of `length` digits (clamped to 4..=9), uniform
/// over the full range; the leading digit is never zero.
pub fn generate_code(length: u32) -> String {
    let length = length.clamp(4, 9);
    let low = 10u32.pow(length - 1);
    let high = 10u32.pow(length) - 1;

    rand::rng().random_range(low..=high).to_string()
}

/// Argon2id hasher for one-time codes with a configurable time cost.
pub struct OtpHasher {
    params: Params,
}

impl OtpHasher {
    /// `t_cost` is the argon2 time cost (iterations); memory and
    /// parallelism stay at the argon2 defaults.
    pub fn new(t_cost: u32) -> AuthErrorResult<Self> {
        let params = Params::new(Params::DEFAULT_M_COST, t_cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::hash(e.to_string()))?;

        Ok(Self { params })
    }

    pub fn hash(&self, code: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::hash(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::hash(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let phc = argon2
            .hash_password(code.as_bytes(), &salt)
            .map_err(|e| AuthError::hash(e.to_string()))?
            .to_string();

        Ok(phc)
    }

    /// Constant-time comparison of a submitted code against a stored PHC
    /// string. Cost parameters come from the stored hash, so codes issued
    /// under an older work factor still verify.
    pub fn verify(&self, code: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(code.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

//! User repository.
//!
//! The pending-OTP pair (`otp_hash`, `otp_expires`) is only ever written by
//! single UPDATE statements, and cleared with a `WHERE otp_hash = ?` guard
//! so that a verification racing a newer OTP request cannot wipe the
//! superseding code. SQLite serializes writers, which gives each statement
//! the per-record atomicity the auth flows rely on.

use crate::{DbError, Result as DbErrorResult};

use notes_core::{Role, User};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, is_verified, \
     otp_hash, otp_expires, google_id, created_at, updated_at";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (
                    id, name, email, password_hash, role, is_verified,
                    otp_hash, otp_expires, google_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(&user.otp_hash)
        .bind(user.otp_expires.map(|dt| dt.timestamp_millis()))
        .bind(&user.google_id)
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    /// Lookup by email. Callers pass the normalized (lower-cased) form.
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user).collect()
    }

    pub async fn find_by_role(&self, role: Role) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY created_at DESC, id"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user).collect()
    }

    pub async fn count_by_role(&self, role: Role) -> DbErrorResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE role = ?")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;

        row.try_get("count")
            .map_err(|e| DbError::decode(format!("users count: {}", e)))
    }

    /// Registration-path OTP write: overwrites the display name, resets the
    /// verified flag, and installs the new pending pair in one statement.
    pub async fn begin_registration(
        &self,
        id: Uuid,
        name: &str,
        otp_hash: &str,
        otp_expires: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE users
                SET name = ?, is_verified = 0, otp_hash = ?, otp_expires = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(otp_hash)
        .bind(otp_expires.timestamp_millis())
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Login-path OTP write: installs the pending pair without touching the
    /// name or verified flag.
    pub async fn set_pending_otp(
        &self,
        id: Uuid,
        otp_hash: &str,
        otp_expires: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        sqlx::query("UPDATE users SET otp_hash = ?, otp_expires = ?, updated_at = ? WHERE id = ?")
            .bind(otp_hash)
            .bind(otp_expires.timestamp_millis())
            .bind(Utc::now().timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Consume a matched registration OTP: mark verified, take the final
    /// display name, and clear the pending pair. Guarded on the hash that
    /// was matched; returns false when a newer request superseded it.
    pub async fn complete_registration(
        &self,
        id: Uuid,
        name: &str,
        matched_hash: &str,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET name = ?, is_verified = 1, otp_hash = NULL, otp_expires = NULL, updated_at = ?
                WHERE id = ? AND otp_hash = ?
            "#,
        )
        .bind(name)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .bind(matched_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Consume a matched login OTP. Same guard as `complete_registration`.
    pub async fn clear_pending_otp(&self, id: Uuid, matched_hash: &str) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET otp_hash = NULL, otp_expires = NULL, updated_at = ?
                WHERE id = ? AND otp_hash = ?
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .bind(matched_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Out-of-band verification used by the admin tooling: marks the account
    /// verified and drops any legacy password hash.
    pub async fn force_verify(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = 1, password_hash = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DbError::decode(format!("user.id: {}", e)))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| DbError::decode(format!("user.role: {}", e)))?;
    let created_at: i64 = row
        .try_get("created_at")
        .map_err(|e| DbError::decode(format!("user.created_at: {}", e)))?;
    let updated_at: i64 = row
        .try_get("updated_at")
        .map_err(|e| DbError::decode(format!("user.updated_at: {}", e)))?;
    let otp_expires: Option<i64> = row
        .try_get("otp_expires")
        .map_err(|e| DbError::decode(format!("user.otp_expires: {}", e)))?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::decode(format!("user.id: {}", e)))?,
        name: row
            .try_get("name")
            .map_err(|e| DbError::decode(format!("user.name: {}", e)))?,
        email: row
            .try_get("email")
            .map_err(|e| DbError::decode(format!("user.email: {}", e)))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| DbError::decode(format!("user.password_hash: {}", e)))?,
        role: Role::from_str(&role).map_err(|e| DbError::decode(format!("user.role: {}", e)))?,
        is_verified: row
            .try_get("is_verified")
            .map_err(|e| DbError::decode(format!("user.is_verified: {}", e)))?,
        otp_hash: row
            .try_get("otp_hash")
            .map_err(|e| DbError::decode(format!("user.otp_hash: {}", e)))?,
        otp_expires: otp_expires
            .map(|ms| {
                DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| DbError::decode("user.otp_expires out of range"))
            })
            .transpose()?,
        google_id: row
            .try_get("google_id")
            .map_err(|e| DbError::decode(format!("user.google_id: {}", e)))?,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::decode("user.created_at out of range"))?,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| DbError::decode("user.updated_at out of range"))?,
    })
}

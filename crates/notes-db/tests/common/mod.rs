#![allow(dead_code)]

//! Shared fixtures for notes-db integration tests.

use notes_core::{Note, User};

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_user(email: &str) -> User {
    User::new("Test User".to_string(), email.to_string())
}

/// A note with a created_at offset so ordering assertions are stable
/// despite second-resolution timestamps.
pub fn test_note(user_id: Uuid, title: &str, age_secs: i64) -> Note {
    let mut note = Note::new(user_id, title.to_string(), format!("body of {}", title));
    note.created_at = Utc::now() - Duration::seconds(age_secs);
    note.updated_at = note.created_at;
    note
}

#![allow(dead_code)]

//! Test infrastructure for notes-server API tests

use notes_auth::{AuthService, JwtValidator, OtpHasher, TokenIssuer};
use notes_core::{Role, User};
use notes_db::UserRepository;
use notes_mail::{Mailer, Result as MailResult};
use notes_server::AppState;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789ab";

/// Captures dispatched codes instead of sending them.
pub struct MemoryMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn last_code(&self) -> String {
        self.sent.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> MailResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("../crates/notes-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing, with a capturing mailer
pub async fn create_test_state() -> (AppState, Arc<MemoryMailer>) {
    let pool = create_test_pool().await;
    let mailer = Arc::new(MemoryMailer::new());

    let auth = Arc::new(AuthService::new(
        UserRepository::new(pool.clone()),
        mailer.clone(),
        OtpHasher::new(1).expect("hasher params"),
        TokenIssuer::new(TEST_SECRET, 7),
        10,
        6,
    ));
    let validator = Arc::new(JwtValidator::with_hs256(TEST_SECRET));

    (
        AppState {
            pool,
            auth,
            validator,
        },
        mailer,
    )
}

/// Run the full OTP registration flow, returning a bearer token
pub async fn register_user(
    state: &AppState,
    mailer: &MemoryMailer,
    email: &str,
    name: &str,
) -> String {
    state.auth.request_otp(email, name).await.unwrap();
    let code = mailer.last_code();
    state
        .auth
        .verify_registration(email, name, &code)
        .await
        .unwrap()
        .token
}

/// Insert a pre-verified admin straight into the store (the notes-admin
/// path) and mint a token for it
pub async fn create_admin(state: &AppState, email: &str) -> String {
    let users = UserRepository::new(state.pool.clone());
    let mut admin = User::new("Root".to_string(), email.to_string());
    admin.role = Role::Admin;
    admin.is_verified = true;
    users.create(&admin).await.unwrap();

    TokenIssuer::new(TEST_SECRET, 7).mint(&admin).unwrap().token
}

/// Build a JSON request, optionally with a bearer token
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collect a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

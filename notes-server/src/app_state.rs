use std::sync::Arc;

use notes_auth::{AuthService, JwtValidator};
use sqlx::SqlitePool;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthService>,
    pub validator: Arc<JwtValidator>,
}

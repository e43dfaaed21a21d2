use crate::api::admin::admin as admin_handlers;
use crate::api::auth::auth as auth_handlers;
use crate::api::notes::notes as note_handlers;
use crate::{AppState, health};

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Auth endpoints (public)
        .route("/api/auth/request-otp", post(auth_handlers::request_otp))
        .route(
            "/api/auth/verify-registration",
            post(auth_handlers::verify_registration),
        )
        .route("/api/auth/send-login-otp", post(auth_handlers::send_login_otp))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/google", post(auth_handlers::google_login))
        // Note endpoints (bearer token)
        .route(
            "/api/notes",
            post(note_handlers::create_note).get(note_handlers::list_notes),
        )
        .route(
            "/api/notes/{id}",
            put(note_handlers::update_note).delete(note_handlers::delete_note),
        )
        // Admin endpoints (bearer token, admin role)
        .route("/api/admin/users", get(admin_handlers::list_users))
        .route("/api/admin/notes", get(admin_handlers::list_all_notes))
        .route(
            "/api/admin/notes/{id}",
            axum::routing::delete(admin_handlers::delete_any_note),
        )
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins, same as the UI expects)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

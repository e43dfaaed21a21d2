//! Integration tests for the admin handlers: the gate runs authenticate
//! first, authorize second.
mod common;

use crate::common::{body_json, create_admin, create_test_state, json_request, register_user};

use axum::http::StatusCode;
use notes_server::build_router;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_routes_reject_missing_token_before_role_check() {
    let (state, _mailer) = create_test_state().await;
    let app = build_router(state);

    // No token: authentication fails, authorization is never reached
    let response = app
        .oneshot(json_request("GET", "/api/admin/users", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_routes_reject_user_role() {
    let (state, mailer) = create_test_state().await;
    let token = register_user(&state, &mailer, "a@x.com", "Ann").await;
    let app = build_router(state);

    // Valid token, wrong role: authentication passes, authorization fails
    let response = app
        .oneshot(json_request("GET", "/api/admin/users", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_lists_users_without_sensitive_fields() {
    let (state, mailer) = create_test_state().await;
    register_user(&state, &mailer, "a@x.com", "Ann").await;
    let admin = create_admin(&state, "root@x.com").await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request("GET", "/api/admin/users", Some(&admin), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);

    for user in users {
        assert!(user.get("password_hash").is_none());
        assert!(user.get("otp_hash").is_none());
        assert!(user.get("otp_expires").is_none());
    }
}

#[tokio::test]
async fn test_admin_lists_all_notes_with_owner() {
    let (state, mailer) = create_test_state().await;
    let ann = register_user(&state, &mailer, "a@x.com", "Ann").await;
    let admin = create_admin(&state, "root@x.com").await;
    let app = build_router(state);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/notes",
            Some(&ann),
            Some(json!({"title": "groceries", "description": "milk"})),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/admin/notes", Some(&admin), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "groceries");
    assert_eq!(notes[0]["owner_name"], "Ann");
    assert_eq!(notes[0]["owner_email"], "a@x.com");
}

#[tokio::test]
async fn test_admin_deletes_any_note() {
    let (state, mailer) = create_test_state().await;
    let ann = register_user(&state, &mailer, "a@x.com", "Ann").await;
    let admin = create_admin(&state, "root@x.com").await;
    let app = build_router(state);

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/notes",
                Some(&ann),
                Some(json!({"title": "groceries", "description": "milk"})),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/notes/{}", id),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Note deleted by admin");

    // Gone for the owner too
    let response = app
        .oneshot(json_request("GET", "/api/notes", Some(&ann), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["notes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_delete_unknown_note_is_not_found() {
    let (state, _mailer) = create_test_state().await;
    let admin = create_admin(&state, "root@x.com").await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/notes/{}", uuid::Uuid::new_v4()),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_note_routes_are_not_admin_gated() {
    // An admin token also works on the plain note routes
    let (state, _mailer) = create_test_state().await;
    let admin = create_admin(&state, "root@x.com").await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request("GET", "/api/notes", Some(&admin), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

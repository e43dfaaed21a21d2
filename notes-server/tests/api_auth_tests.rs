//! Integration tests for the auth API handlers
mod common;

use crate::common::{body_json, create_test_state, json_request, register_user};

use axum::http::StatusCode;
use notes_db::UserRepository;
use notes_server::build_router;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_registration_flow_end_to_end() {
    let (state, mailer) = create_test_state().await;
    let users = UserRepository::new(state.pool.clone());
    let app = build_router(state.clone());

    // Step 1: request an OTP
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(json!({"email": "a@x.com", "name": "Ann"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The account exists, unverified, with a pending code
    let stored = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!stored.is_verified);
    assert!(stored.has_pending_otp());

    // Step 2: verify with the delivered code
    let code = mailer.last_code();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/verify-registration",
            None,
            Some(json!({"email": "a@x.com", "name": "Ann", "otp": code})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["email"], "a@x.com");
    let token = body["token"].as_str().unwrap().to_string();

    // Store settled: verified, OTP pair cleared
    let stored = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert!(!stored.has_pending_otp());

    // The token opens protected routes
    let response = app
        .oneshot(json_request("GET", "/api/notes", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_otp_rejects_malformed_email() {
    let (state, _mailer) = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(json!({"email": "not-an-email", "name": "Ann"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "email");
}

#[tokio::test]
async fn test_request_otp_rejects_blank_name() {
    let (state, _mailer) = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(json!({"email": "a@x.com", "name": "  "})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_send_login_otp_unknown_email_fails_neutrally() {
    let (state, _mailer) = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/send-login-otp",
            None,
            Some(json!({"email": "unknown@x.com"})),
        ))
        .await
        .unwrap();

    // 400 rather than 404, with a message that does not confirm whether
    // the address is registered
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "ACCOUNT_NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        "Account not found or not verified."
    );
}

#[tokio::test]
async fn test_login_flow_end_to_end() {
    let (state, mailer) = create_test_state().await;
    register_user(&state, &mailer, "a@x.com", "Ann").await;
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/send-login-otp",
            None,
            Some(json!({"email": "a@x.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let code = mailer.last_code();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "otp": code})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_otp_failures_share_one_response() {
    let (state, mailer) = create_test_state().await;
    register_user(&state, &mailer, "a@x.com", "Ann").await;
    let app = build_router(state);

    // Wrong code with a pending OTP
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/send-login-otp",
            None,
            Some(json!({"email": "a@x.com"})),
        ))
        .await
        .unwrap();

    let code = mailer.last_code();
    let wrong = if code == "000000" { "000001" } else { "000000" };
    let mismatch = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "otp": wrong})),
        ))
        .await
        .unwrap();

    // Consume the pending OTP, then replay: no pending code at all
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "otp": code})),
        ))
        .await
        .unwrap();
    let replay = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "otp": code})),
        ))
        .await
        .unwrap();

    // Mismatch and never-issued are indistinguishable on the wire
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
    let mismatch_body = body_json(mismatch).await;
    let replay_body = body_json(replay).await;
    assert_eq!(mismatch_body["error"]["code"], "OTP_INVALID");
    assert_eq!(mismatch_body, replay_body);
    assert_eq!(
        mismatch_body["error"]["message"],
        "Invalid or expired OTP. Request a new one."
    );
}

#[tokio::test]
async fn test_google_login_creates_verified_account() {
    let (state, _mailer) = create_test_state().await;
    let users = UserRepository::new(state.pool.clone());
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/google",
            None,
            Some(json!({"google_id": "google-sub-1", "email": "ann@x.com", "name": "Ann"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].as_str().is_some());

    let stored = users.find_by_email("ann@x.com").await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.google_id.as_deref(), Some("google-sub-1"));
}

#[tokio::test]
async fn test_google_login_rejects_missing_subject() {
    let (state, _mailer) = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/google",
            None,
            Some(json!({"google_id": "", "email": "ann@x.com", "name": "Ann"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

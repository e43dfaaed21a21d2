//! Authentication REST API handlers
//!
//! OTP registration and login, plus federated sign-in. All handlers are
//! public; sessions come out, never go in.

use crate::{
    ApiResult, AppState, AuthResponse, GoogleLoginRequest, LoginOtpRequest, LoginRequest,
    MessageResponse, RequestOtpRequest, VerifyRegistrationRequest,
};

use axum::{Json, extract::State, http::StatusCode};

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/request-otp
///
/// Registration step 1: create-or-reset the account, mail a code
pub async fn request_otp(
    State(state): State<AppState>,
    Json(req): Json<RequestOtpRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.request_otp(&req.email, &req.name).await?;

    Ok(Json(MessageResponse {
        message: "OTP sent to email. Proceed to verification.".to_string(),
    }))
}

/// POST /api/auth/verify-registration
///
/// Registration step 2: consume the code, mint a session
pub async fn verify_registration(
    State(state): State<AppState>,
    Json(req): Json<VerifyRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = state
        .auth
        .verify_registration(&req.email, &req.name, &req.otp)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_session(
            "Email verified & user registered successfully",
            session,
        )),
    ))
}

/// POST /api/auth/send-login-otp
///
/// Login step 1: mail a code to an existing verified account
pub async fn send_login_otp(
    State(state): State<AppState>,
    Json(req): Json<LoginOtpRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.request_login_otp(&req.email).await?;

    Ok(Json(MessageResponse {
        message: "Login OTP sent to email.".to_string(),
    }))
}

/// POST /api/auth/login
///
/// Login step 2: consume the code, mint a session
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.auth.verify_login(&req.email, &req.otp).await?;

    Ok(Json(AuthResponse::from_session("Login successful", session)))
}

/// POST /api/auth/google
///
/// Federated sign-in with a pre-validated assertion
pub async fn google_login(
    State(state): State<AppState>,
    Json(req): Json<GoogleLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state
        .auth
        .sign_in_federated(&req.google_id, &req.email, &req.name)
        .await?;

    Ok(Json(AuthResponse::from_session(
        "Google login successful",
        session,
    )))
}

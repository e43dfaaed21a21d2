use crate::{Role, User};

use chrono::Utc;

#[test]
fn test_user_new() {
    let user = User::new("Ann".to_string(), "ann@example.com".to_string());

    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "ann@example.com");
    assert_eq!(user.role, Role::User);
    assert!(!user.is_verified);
    assert!(user.password_hash.is_none());
    assert!(user.google_id.is_none());
    assert!(!user.has_pending_otp());
}

#[test]
fn test_user_new_federated_is_verified() {
    let user = User::new_federated(
        "Ann".to_string(),
        "ann@example.com".to_string(),
        "google-sub-1".to_string(),
    );

    assert!(user.is_verified);
    assert_eq!(user.google_id.as_deref(), Some("google-sub-1"));
    assert_eq!(user.role, Role::User);
}

#[test]
fn test_user_has_pending_otp() {
    let mut user = User::new("Ann".to_string(), "ann@example.com".to_string());
    assert!(!user.has_pending_otp());

    user.otp_hash = Some("$argon2id$...".to_string());
    user.otp_expires = Some(Utc::now());
    assert!(user.has_pending_otp());
}

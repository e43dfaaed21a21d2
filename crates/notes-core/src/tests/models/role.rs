use crate::{CoreError, Role};

use std::str::FromStr;

#[test]
fn test_role_round_trip() {
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_default_is_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_role_rejects_unknown_value() {
    let result = Role::from_str("superuser");
    assert!(matches!(result, Err(CoreError::InvalidRole { .. })));
}

use notes_core::{Role, User};

use serde::Serialize;

/// Public view of a user. Password hashes and OTP state never leave the
/// server.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: i64,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name,
            email: u.email,
            role: u.role,
            is_verified: u.is_verified,
            created_at: u.created_at.timestamp(),
        }
    }
}

use crate::UserDto;
use serde::Serialize;

/// List of all users
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
}

use crate::UserDto;

use notes_auth::Session;

use serde::Serialize;

/// Successful authentication: bearer token plus the user it belongs to
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserDto,
}

impl AuthResponse {
    pub fn from_session<S: Into<String>>(message: S, session: Session) -> Self {
        Self {
            message: message.into(),
            token: session.token,
            user: session.user.into(),
        }
    }
}

use crate::Claims;

use notes_core::User;

/// A freshly minted session: the bearer token, its decoded claims, and the
/// user it was issued to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
    pub user: User,
}

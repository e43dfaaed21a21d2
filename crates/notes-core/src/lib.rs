pub mod error;
pub mod models;
pub mod validate;

pub use error::{CoreError, Result};
pub use models::note::Note;
pub use models::role::Role;
pub use models::user::User;
pub use validate::{is_valid_email, normalize_email};

#[cfg(test)]
mod tests;

pub mod error;
pub mod http_mailer;
pub mod log_mailer;
pub mod mailer;

pub use error::{MailError, Result};
pub use http_mailer::HttpMailer;
pub use log_mailer::LogMailer;
pub use mailer::Mailer;

#[cfg(test)]
mod tests;

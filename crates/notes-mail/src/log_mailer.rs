use crate::{Mailer, Result as MailErrorResult};

use async_trait::async_trait;

/// Development fallback used when no mail API key is configured: prints the
/// code to the log instead of sending it. Never use outside local setups.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> MailErrorResult<()> {
        log::warn!("mail delivery disabled; OTP for {} is {}", to, code);
        Ok(())
    }
}

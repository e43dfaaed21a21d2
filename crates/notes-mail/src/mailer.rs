use crate::Result as MailErrorResult;

use async_trait::async_trait;

/// Out-of-band OTP delivery.
///
/// Implementations are constructed once at startup and injected into the
/// auth service; there is no process-wide transporter.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a plaintext one-time code to `to`.
    async fn send_otp_email(&self, to: &str, code: &str) -> MailErrorResult<()>;
}

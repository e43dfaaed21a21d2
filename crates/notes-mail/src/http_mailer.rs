use crate::{MailError, Mailer, Result as MailErrorResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::Client as ReqwestClient;
use serde_json::json;

/// Mailer backed by a JSON mail API (Resend/SendGrid-style endpoint).
pub struct HttpMailer {
    api_url: String,
    api_key: String,
    from: String,
    otp_ttl_minutes: i64,
    client: ReqwestClient,
}

impl HttpMailer {
    pub fn new(api_url: &str, api_key: &str, from: &str, otp_ttl_minutes: i64) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
            otp_ttl_minutes,
            client: ReqwestClient::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> MailErrorResult<()> {
        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": "Your Notes App Verification OTP",
            "text": format!(
                "Your verification code is {}. It expires in {} minutes.",
                code, self.otp_ttl_minutes
            ),
            "html": format!(
                "<p>Your verification code is <b>{}</b>. It expires in {} minutes.</p>",
                code, self.otp_ttl_minutes
            ),
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Recipient address never goes in the error; it may end up in a response body
            return Err(MailError::Delivery {
                message: format!("mail API returned {}", status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        log::debug!("OTP email dispatched to {}", to);
        Ok(())
    }
}

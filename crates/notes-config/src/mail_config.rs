use crate::{ConfigError, ConfigErrorResult, DEFAULT_MAIL_API_URL, DEFAULT_MAIL_FROM};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// JSON mail API endpoint.
    pub api_url: String,
    /// API key. Absent = development mode; codes go to the log instead.
    pub api_key: Option<String>,
    /// From header, e.g. `Notes App <no-reply@example.com>`.
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_MAIL_API_URL),
            api_key: None,
            from: String::from(DEFAULT_MAIL_FROM),
        }
    }
}

impl MailConfig {
    /// Whether real delivery is configured.
    pub fn delivery_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.delivery_enabled() {
            if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
                return Err(ConfigError::mail(format!(
                    "mail.api_url must be an http(s) URL, got {}",
                    self.api_url
                )));
            }

            if self.from.is_empty() {
                return Err(ConfigError::mail("mail.from cannot be empty"));
            }
        }

        Ok(())
    }
}

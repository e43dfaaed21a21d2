mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod mail_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use mail_config::MailConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "notes.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
const DEFAULT_OTP_TTL_MINUTES: i64 = 10;
const DEFAULT_OTP_HASH_COST: u32 = 2;
const DEFAULT_OTP_LENGTH: u32 = 6;
const MIN_JWT_SECRET_BYTES: usize = 32;
const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_MAIL_FROM: &str = "Notes App <no-reply@localhost>";

#[cfg(test)]
mod tests;

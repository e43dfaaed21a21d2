use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LogLevel, LoggingConfig,
    MailConfig, ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for NOTES_CONFIG_DIR env var, else use ./.notes/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply NOTES_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: NOTES_CONFIG_DIR env var > ./.notes/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("NOTES_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".notes"))
    }

    /// Environment overrides beat config.toml values.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("NOTES_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("NOTES_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("NOTES_PORT is not a valid port number, ignoring: {}", port),
            }
        }

        if let Ok(secret) = std::env::var("NOTES_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }

        if let Ok(url) = std::env::var("NOTES_MAIL_API_URL") {
            self.mail.api_url = url;
        }

        if let Ok(key) = std::env::var("NOTES_MAIL_API_KEY") {
            self.mail.api_key = Some(key);
        }

        if let Ok(from) = std::env::var("NOTES_MAIL_FROM") {
            self.mail.from = from;
        }

        if let Ok(level) = std::env::var("NOTES_LOG_LEVEL") {
            // FromStr never fails; unknown values fall back to info
            self.logging.level = LogLevel::from_str(&level).unwrap();
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.mail.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: token ttl {}d, otp window {}m, otp length {}",
            self.auth.token_ttl_days, self.auth.otp_ttl_minutes, self.auth.otp_length
        );
        info!(
            "  mail: {}",
            if self.mail.delivery_enabled() {
                "api delivery"
            } else {
                "log only (no api key)"
            }
        );
    }
}

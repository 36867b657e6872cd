//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TOPSIS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use topsis_ranker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing results to {}", config.storage.output_dir.display());
//! ```

mod email;
mod error;
mod server;
mod storage;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except `email`, which is optional: without it
/// the service still ranks and displays results but refuses email delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Result file storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TOPSIS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TOPSIS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TOPSIS__EMAIL__RESEND_API_KEY=re_...` -> `email.resend_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TOPSIS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        if let Some(email) = &self.email {
            email.validate()?;
        }
        Ok(())
    }

    /// Check if email delivery is configured
    pub fn email_enabled(&self) -> bool {
        self.email.is_some()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

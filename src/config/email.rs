//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Resend API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for one send request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EmailConfig {
    /// Creates a configuration with defaults for everything but the key
    pub fn new(resend_api_key: impl Into<String>) -> Self {
        Self {
            resend_api_key: SecretString::new(resend_api_key.into()),
            from_email: default_from_email(),
            from_name: default_from_name(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.resend_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidEmailApiUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_from_email() -> String {
    "noreply@topsis.local".to_string()
}

fn default_from_name() -> String {
    "TOPSIS Ranker".to_string()
}

fn default_api_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

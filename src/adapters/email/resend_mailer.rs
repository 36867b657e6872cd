//! Resend Mailer - Implementation of ResultMailer over the Resend HTTP API.
//!
//! Sends one `POST {api_base_url}/emails` per result, with the CSV attached
//! as base64 content.
//!
//! # Configuration
//!
//! ```ignore
//! let mailer = ResendMailer::from_config(&app_config.email.unwrap())?;
//! mailer.send_result(ResultEmail::topsis_result("user@example.com", csv)).await?;
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{MailError, ResultEmail, ResultMailer};

/// Resend API client for result emails.
pub struct ResendMailer {
    api_key: SecretString,
    from: String,
    base_url: String,
    client: Client,
}

impl ResendMailer {
    /// Builds a mailer from the email configuration section.
    pub fn from_config(config: &EmailConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.resend_api_key.clone(),
            from: config.from_header(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Builds the emails endpoint URL.
    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }

    /// Converts our message to Resend's request format.
    fn to_resend_request<'a>(&'a self, message: &'a ResultEmail) -> ResendRequest<'a> {
        ResendRequest {
            from: &self.from,
            to: vec![message.to.as_str()],
            subject: &message.subject,
            text: &message.body,
            attachments: vec![ResendAttachment {
                filename: &message.attachment_name,
                content: BASE64.encode(&message.attachment),
            }],
        }
    }

    /// Maps a non-success response to a MailError.
    async fn handle_response_status(response: Response) -> Result<(), MailError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(MailError::rejected(status.as_u16(), error_body))
    }
}

#[async_trait]
impl ResultMailer for ResendMailer {
    async fn send_result(&self, message: ResultEmail) -> Result<(), MailError> {
        if message.attachment.is_empty() {
            return Err(MailError::InvalidMessage("attachment is empty".to_string()));
        }

        let request = self.to_resend_request(&message);

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::transport("Request timed out")
                } else if e.is_connect() {
                    MailError::transport(format!("Connection failed: {}", e))
                } else {
                    MailError::transport(e.to_string())
                }
            })?;

        let result = Self::handle_response_status(response).await;
        match &result {
            Ok(()) => tracing::info!(to = %message.to, "result email sent"),
            Err(e) => tracing::warn!(to = %message.to, error = %e, "result email failed"),
        }
        result
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    attachments: Vec<ResendAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: String,
}

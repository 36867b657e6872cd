//! HTTP handlers for TOPSIS endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::application::handlers::{
    DeliverResultCommand, DeliverResultHandler, RankTableCommand, RankTableHandler, RankingError,
};
use crate::domain::foundation::ErrorCode;

use super::dto::{
    is_valid_email, DisplayResultResponse, ErrorResponse, MessageResponse, ResultOption,
    SubmitForm, UploadedFile,
};

/// Application state for TOPSIS endpoints.
#[derive(Clone)]
pub struct TopsisAppState {
    /// Validates and scores uploads
    pub rank_handler: Arc<RankTableHandler>,
    /// Saves and mails results
    pub deliver_handler: Arc<DeliverResultHandler>,
}

impl TopsisAppState {
    pub fn new(rank_handler: RankTableHandler, deliver_handler: DeliverResultHandler) -> Self {
        Self {
            rank_handler: Arc::new(rank_handler),
            deliver_handler: Arc::new(deliver_handler),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

/// POST /submit - Rank an uploaded table and display or email the result
///
/// Multipart fields: `file`, `weights`, `impacts`, `result_option`
/// (`email` | `display`) and `email` when delivering by email.
pub async fn submit(
    State(state): State<TopsisAppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, TopsisApiError> {
    let form = read_form(multipart).await?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(TopsisApiError::MissingParameters(missing));
    }

    let SubmitForm {
        file,
        weights,
        impacts,
        result_option,
        email,
    } = form;
    let file = file.unwrap_or_default();
    let email = email.unwrap_or_default().trim().to_string();

    if file.file_name.is_empty() {
        return Err(TopsisApiError::invalid(
            "No file selected. Please upload a CSV or Excel file.",
        ));
    }

    let option: ResultOption = result_option
        .unwrap_or_default()
        .parse()
        .map_err(|_| TopsisApiError::invalid("Invalid result option. Choose 'email' or 'display'"))?;

    if option == ResultOption::Email {
        if email.is_empty() {
            return Err(TopsisApiError::invalid("Email ID is required for email delivery"));
        }
        if !is_valid_email(&email) {
            return Err(TopsisApiError::invalid(format!(
                "Invalid email format: '{}'. Please use format: user@example.com",
                email
            )));
        }
    }

    info!(file_name = %file.file_name, size_bytes = file.content.len(), %option, "received submission");

    let scored = state.rank_handler.handle(RankTableCommand {
        file_name: file.file_name,
        content: file.content,
        weights: weights.unwrap_or_default(),
        impacts: impacts.unwrap_or_default(),
    })?;

    match option {
        ResultOption::Display => Ok(Json(DisplayResultResponse::from(&scored)).into_response()),
        ResultOption::Email => {
            state
                .deliver_handler
                .handle(DeliverResultCommand {
                    recipient: email,
                    scored,
                })
                .await?;
            Ok(Json(MessageResponse::success(
                "Result calculated and sent successfully to your email!",
            ))
            .into_response())
        }
    }
}

/// Collects the known multipart fields; unknown fields are skipped.
async fn read_form(mut multipart: Multipart) -> Result<SubmitForm, TopsisApiError> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TopsisApiError::invalid(format!("Malformed form data: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| TopsisApiError::invalid(format!("Error reading file: {}", e)))?;
                form.file = Some(UploadedFile {
                    file_name,
                    content: content.to_vec(),
                });
            }
            "weights" | "impacts" | "result_option" | "email" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| TopsisApiError::invalid(format!("Malformed field '{}': {}", name, e)))?;
                let slot = match name.as_str() {
                    "weights" => &mut form.weights,
                    "impacts" => &mut form.impacts,
                    "result_option" => &mut form.result_option,
                    _ => &mut form.email,
                };
                *slot = Some(value);
            }
            _ => {}
        }
    }

    Ok(form)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts request and ranking errors to HTTP responses.
#[derive(Debug)]
pub enum TopsisApiError {
    /// Required multipart fields were not sent.
    MissingParameters(Vec<&'static str>),
    /// The request is malformed before any ranking input is examined.
    InvalidRequest(String),
    /// Validation, scoring or delivery failed.
    Ranking(RankingError),
}

impl TopsisApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<RankingError> for TopsisApiError {
    fn from(err: RankingError) -> Self {
        Self::Ranking(err)
    }
}

impl IntoResponse for TopsisApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            TopsisApiError::MissingParameters(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details(
                    ErrorCode::MissingParameters.to_string(),
                    format!("Missing required parameters: {}", fields.join(", ")),
                    json!({ "missing": fields }),
                ),
            ),
            TopsisApiError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::InvalidRequest.to_string(), message.clone()),
            ),
            TopsisApiError::Ranking(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, ErrorResponse::new(err.code().to_string(), err.to_string()))
            }
        };

        if status.is_server_error() {
            error!(error_code = %body.error_code, message = %body.message, "submission failed");
        } else {
            warn!(error_code = %body.error_code, message = %body.message, "submission rejected");
        }

        (status, Json(body)).into_response()
    }
}

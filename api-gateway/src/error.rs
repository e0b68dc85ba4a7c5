//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Common(#[from] Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::ListingNotFound(_) => (StatusCode::NOT_FOUND, "listing_not_found", None),
                Error::InquiryNotFound(_) => (StatusCode::NOT_FOUND, "inquiry_not_found", None),
                Error::AppointmentNotFound(_) => (StatusCode::NOT_FOUND, "appointment_not_found", None),
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
                Error::Import(_) => (StatusCode::BAD_REQUEST, "import_error", None),
                Error::Csv(csv_error) => (
                    StatusCode::BAD_REQUEST,
                    "csv_error",
                    csv_error.position().map(|pos| serde_json::json!({ "line": pos.line() })),
                ),
                Error::AuthorizationError(_) => (StatusCode::UNAUTHORIZED, "authorization_error", None),

                // Server errors (5xx)
                Error::ConfigurationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", None),
                Error::Notification(_) => (StatusCode::BAD_GATEWAY, "notification_error", None),
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
                Error::Database(db_error) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(serde_json::json!({
                        "db_error": db_error.to_string(),
                        "code": db_error.as_database_error().map(|dbe| dbe.code().map(|c| c.to_string())),
                    })),
                ),
                Error::Migration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "migration_error", None),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        let (status, code, details) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("API Error [{}]: {:?}", request_id, &self);
        } else {
            tracing::warn!("API Error [{}]: {}", request_id, &self);
        }

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}

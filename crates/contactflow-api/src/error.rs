/// API Error types
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contactflow_core::ContactflowError;
use contactflow_core::constants::{
    MSG_METHOD_NOT_ALLOWED, MSG_PAYLOAD_TOO_LARGE, MSG_SERVER_FAILURE, MSG_SUBMISSION_REJECTED,
};
use contactflow_core::models::NotifyResponse;
use tracing::{error, warn};

/// API Error
///
/// Every variant renders as the `{success: false, message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field validation failed; the message lists every failing rule
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Spam or honeypot hit; carries no detail for the caller
    #[error("Submission rejected")]
    Rejected,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected => (StatusCode::BAD_REQUEST, MSG_SUBMISSION_REJECTED.to_string()),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                MSG_METHOD_NOT_ALLOWED.to_string(),
            ),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                MSG_PAYLOAD_TOO_LARGE.to_string(),
            ),
            ApiError::Internal(detail) => {
                error!("Contact form error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_FAILURE.to_string())
            }
        };

        (status, Json(NotifyResponse::rejected(message))).into_response()
    }
}

/// Body extraction failures keep the JSON envelope
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Request body over the size limit");
            ApiError::PayloadTooLarge
        } else {
            ApiError::Internal(rejection.body_text())
        }
    }
}

/// Convert contactflow-core errors to API errors
impl From<ContactflowError> for ApiError {
    fn from(err: ContactflowError) -> Self {
        if err.is_client_error() {
            warn!(error = %err, "Submission refused");
        }

        match err {
            ContactflowError::Validation(messages) => ApiError::BadRequest(messages.join(", ")),
            ContactflowError::Spam(_) => ApiError::Rejected,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

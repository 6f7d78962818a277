/// Contact form notification endpoint
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, header},
};
use contactflow_core::ContactflowError;
use contactflow_core::constants::MSG_SUBMISSION_ACCEPTED;
use contactflow_core::models::{ClientInfo, ContactPayload, NotifyResponse};
use std::sync::Arc;
use tracing::info;

use crate::{context::ApiContext, error::ApiError};

/// Accept a contact form submission
///
/// The body is parsed by hand so that malformed JSON lands in the same
/// generic failure envelope as every other server-side error. Oversized
/// bodies get the envelope with a 413.
pub async fn submit(
    State(ctx): State<Arc<ApiContext>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<NotifyResponse>, ApiError> {
    let body = body?;
    let payload: ContactPayload =
        serde_json::from_slice(&body).map_err(ContactflowError::from)?;

    let client = client_info(&headers);
    let message_id = ctx.notifications.process(&payload, client).await?;

    info!(message_id = %message_id, "Contact submission accepted");

    Ok(Json(NotifyResponse::accepted(MSG_SUBMISSION_ACCEPTED)))
}

/// Any method other than POST on the contact route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Extracts the caller's address and user agent from proxy headers
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let ip_address = header_value("x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .or_else(|| header_value("x-real-ip"))
        .unwrap_or("unknown")
        .to_string();

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    ClientInfo {
        ip_address,
        user_agent,
    }
}

/// Client error types
use crate::dispatcher::SubmissionState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint returned HTTP {0}")]
    Http(u16),

    #[error("Endpoint rejected submission: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Fallback error: {0}")]
    Fallback(String),

    #[error("Illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: SubmissionState,
        to: SubmissionState,
    },

    #[error("Form has been torn down")]
    TornDown,

    #[error("Form token mismatch")]
    Csrf,

    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

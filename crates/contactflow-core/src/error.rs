/// Error types for the contact flow
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactflowError {
    /// One or more submission fields failed validation; messages in display order
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Spam detected: {0}")]
    Spam(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Email composition error: {0}")]
    EmailComposition(String),

    #[error("SES error: {0}")]
    Ses(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ContactflowError {
    /// Whether the failure was caused by the submitter rather than by the service
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Spam(_) => true,
            Self::InvalidRequest(_) => false,
            Self::EmailComposition(_) => false,
            Self::Ses(_) => false,
            Self::Storage(_) => false,
            Self::Config(_) => false,
        }
    }
}

impl From<serde_json::Error> for ContactflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<std::io::Error> for ContactflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::env::VarError> for ContactflowError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

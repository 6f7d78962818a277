/// Configuration models
use crate::constants::{
    DEFAULT_LOG_PATH, NOTIFICATION_SUBJECT, RECIPIENT_EMAIL, SENDER_EMAIL,
    SERVER_MAX_MESSAGE_LENGTH,
};
use crate::utils::validation::validate_email_address;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Notification endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Mailbox that receives notifications
    pub to_email: String,
    /// Sender address of notifications
    pub from_email: String,
    pub subject: String,
    /// Server-side message cap in characters
    pub max_message_length: usize,
    /// Append-only submission log
    pub log_path: PathBuf,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            to_email: RECIPIENT_EMAIL.to_string(),
            from_email: SENDER_EMAIL.to_string(),
            subject: NOTIFICATION_SUBJECT.to_string(),
            max_message_length: SERVER_MAX_MESSAGE_LENGTH,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl NotificationConfig {
    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if validate_email_address(&self.to_email).is_err() {
            return Err(format!("Invalid recipient address: {}", self.to_email));
        }

        if validate_email_address(&self.from_email).is_err() {
            return Err(format!("Invalid sender address: {}", self.from_email));
        }

        if self.subject.trim().is_empty() {
            return Err("Notification subject must not be empty".to_string());
        }

        if self.max_message_length == 0 {
            return Err("max_message_length must be > 0".to_string());
        }

        if self.log_path.as_os_str().is_empty() {
            return Err("Submission log path not configured".to_string());
        }

        Ok(())
    }
}

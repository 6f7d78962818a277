/// Configuration service - loads config from environment variables
use crate::error::ContactflowError;
use crate::models::NotificationConfig;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn get_config(&self) -> Result<NotificationConfig, ContactflowError>;
}

/// Environment variable-based configuration provider
///
/// Every variable is optional; unset variables fall back to the built-in
/// constants.
pub struct EnvConfigProvider {
    config: NotificationConfig,
}

impl EnvConfigProvider {
    pub fn new() -> Result<Self, ContactflowError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ContactflowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = NotificationConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_message_length = match non_empty("CONTACT_MAX_MESSAGE_LENGTH") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ContactflowError::Config(format!("Invalid CONTACT_MAX_MESSAGE_LENGTH: {}", e))
            })?,
            None => defaults.max_message_length,
        };

        let config = NotificationConfig {
            to_email: non_empty("CONTACT_TO_EMAIL").unwrap_or(defaults.to_email),
            from_email: non_empty("CONTACT_FROM_EMAIL").unwrap_or(defaults.from_email),
            subject: non_empty("CONTACT_SUBJECT").unwrap_or(defaults.subject),
            max_message_length,
            log_path: non_empty("CONTACT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
        };

        // Validate configuration
        config
            .validate()
            .map_err(|e| ContactflowError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!(
            max_message_length = config.max_message_length,
            log_path = %config.log_path.display(),
            "Configuration validated successfully"
        );

        Ok(Self { config })
    }
}

#[async_trait]
impl ConfigProvider for EnvConfigProvider {
    async fn get_config(&self) -> Result<NotificationConfig, ContactflowError> {
        // Deploy-time configuration never changes while the process lives
        Ok(self.config.clone())
    }
}

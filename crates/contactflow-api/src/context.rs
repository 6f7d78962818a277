/// API Context - shared state for all API handlers
use contactflow_core::services::{
    ConfigProvider, EnvConfigProvider, FileSubmissionLog, NotificationService, SesEmailSender,
};
use lambda_http::Error;
use std::sync::Arc;

/// API Context contains shared resources for API handlers
pub struct ApiContext {
    /// Validate, sanitize, spam-check, send and log pipeline
    pub notifications: NotificationService,
}

impl ApiContext {
    /// Create a new API context from the process environment
    pub async fn new() -> Result<Arc<Self>, Error> {
        let provider = EnvConfigProvider::new()?;
        let config = provider.get_config().await?;

        let sender = Arc::new(SesEmailSender::from_env().await);
        let log = Arc::new(FileSubmissionLog::new(config.log_path.clone()));

        let notifications = NotificationService::new(config, sender, log)?;

        Ok(Self::with_service(notifications))
    }

    /// Wraps an already assembled pipeline
    pub fn with_service(notifications: NotificationService) -> Arc<Self> {
        Arc::new(Self { notifications })
    }
}

/// Delivery of a payload to the notification endpoint
use crate::error::ClientError;
use async_trait::async_trait;
use contactflow_core::models::{ContactPayload, NotifyResponse};
use tracing::debug;

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Posts the payload once; anything but a 2xx `{success: true}` is an error
    async fn send(&self, payload: &ContactPayload) -> Result<NotifyResponse, ClientError>;
}

/// JSON-over-HTTP transport
pub struct HttpNotificationTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotificationTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NotificationTransport for HttpNotificationTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<NotifyResponse, ClientError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), endpoint = %self.endpoint, "Notification endpoint answered");
        if !status.is_success() {
            return Err(ClientError::Http(status.as_u16()));
        }

        let body: NotifyResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Rejected(body.message));
        }

        Ok(body)
    }
}

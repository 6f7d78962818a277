/// SES email sending service
use crate::error::ContactflowError;
use async_trait::async_trait;

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends an already formatted RFC 5322 message, returning the provider message id
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, ContactflowError>;
}

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self::new(aws_sdk_ses::Client::new(&aws_config))
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, ContactflowError> {
        use aws_sdk_ses::primitives::Blob;

        let raw_message = aws_sdk_ses::types::RawMessage::builder()
            .data(Blob::new(raw_email))
            .build()
            .map_err(|e| ContactflowError::Ses(format!("Failed to build raw message: {}", e)))?;

        // Single attempt, no retry
        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .source(from)
            .set_destinations(Some(to.to_vec()))
            .send()
            .await
            .map_err(|e| ContactflowError::Ses(format!("SES send_raw_email failed: {}", e)))?;

        let message_id = response.message_id;

        tracing::info!(
            message_id = %message_id,
            recipients = to.len(),
            "Sent notification via SES"
        );
        Ok(message_id)
    }
}

/// Email composer using lettre crate
use crate::error::ContactflowError;
use crate::models::{NotificationConfig, SanitizedSubmission};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use std::str::FromStr;

/// Renders the fixed plain-text notification template
pub fn render_notification(submission: &SanitizedSubmission) -> String {
    format!(
        "
New Contact Form Submission - Pro Build Digital

Contact Information:
Name: {name}
Email: {email}
Phone: {phone}
Business Type: {business_type}

Services of Interest:
{services}

Message:
{message}

Submission Details:
Timestamp: {timestamp}
IP Address: {ip}
User Agent: {user_agent}

---
This message was sent from the Pro Build Digital contact form.
",
        name = submission.name,
        email = submission.email,
        phone = submission.phone,
        business_type = submission.business_type,
        services = submission.services_summary(),
        message = submission.message,
        timestamp = submission.timestamp(),
        ip = submission.client.ip_address,
        user_agent = submission.client.user_agent,
    )
}

pub trait EmailComposer: Send + Sync {
    /// Builds the raw notification message for a submission
    fn compose(&self, submission: &SanitizedSubmission) -> Result<Vec<u8>, ContactflowError>;
}

/// Composes `text/plain; charset=UTF-8` notifications addressed to the site owner
pub struct LettreEmailComposer {
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl LettreEmailComposer {
    pub fn new(config: &NotificationConfig) -> Result<Self, ContactflowError> {
        Ok(Self {
            from: Self::to_mailbox(&config.from_email)?,
            to: Self::to_mailbox(&config.to_email)?,
            subject: config.subject.clone(),
        })
    }

    fn to_mailbox(address: &str) -> Result<Mailbox, ContactflowError> {
        Mailbox::from_str(address).map_err(|e| {
            ContactflowError::EmailComposition(format!("Invalid email address: {}", e))
        })
    }
}

impl EmailComposer for LettreEmailComposer {
    fn compose(&self, submission: &SanitizedSubmission) -> Result<Vec<u8>, ContactflowError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        // Replies go straight to the submitter; skip the header if the address will not parse
        match Mailbox::from_str(&submission.email) {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(error = %e, "Submitter address unusable as Reply-To"),
        }

        let message = builder
            .body(render_notification(submission))
            .map_err(|e| {
                ContactflowError::EmailComposition(format!("Failed to build text message: {}", e))
            })?;

        Ok(message.formatted())
    }
}

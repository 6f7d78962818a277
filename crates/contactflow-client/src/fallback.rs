/// `mailto:` fallback used when the notification endpoint cannot be reached
use crate::error::ClientError;
use chrono::{DateTime, Local};
use contactflow_core::constants::LOG_TIMESTAMP_FORMAT;
use contactflow_core::models::FormFields;
use contactflow_core::utils::validation::validate_email_address;

/// Hands a `mailto:` URI to the user's mail client
pub trait MailClientLauncher: Send + Sync {
    fn open(&self, uri: &str) -> Result<(), ClientError>;
}

/// Plain-text summary placed in the mail body
pub fn render_mail_body(fields: &FormFields, submitted_at: DateTime<Local>) -> String {
    format!(
        "New Contact Form Submission\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Business Type: {}\n\
         Services of Interest: {}\n\
         \n\
         Message:\n\
         {}\n\
         \n\
         Submitted: {}",
        fields.name,
        fields.email,
        fields.phone,
        fields.business_type,
        fields.services_summary(),
        fields.message,
        submitted_at.format(LOG_TIMESTAMP_FORMAT),
    )
}

/// Builds `mailto:<recipient>?subject=<enc>&body=<enc>`
pub fn build_mailto(
    recipient: &str,
    fields: &FormFields,
    submitted_at: DateTime<Local>,
) -> Result<String, ClientError> {
    validate_email_address(recipient)
        .map_err(|_| ClientError::Fallback(format!("Invalid fallback recipient: {}", recipient)))?;

    let subject = format!("Contact Form Submission from {}", fields.name);
    let body = render_mail_body(fields, submitted_at);

    Ok(format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    ))
}

/// Notification pipeline: validate, sanitize, spam-check, send, log
use crate::constants::LOG_TARGET_AUDIT;
use crate::email::{EmailComposer, LettreEmailComposer};
use crate::error::ContactflowError;
use crate::models::{ClientInfo, ContactPayload, FormFields, NotificationConfig, SanitizedSubmission};
use crate::rules::validate_submission;
use crate::services::ses::EmailSender;
use crate::services::spam::SpamFilter;
use crate::services::submission_log::SubmissionLog;
use crate::utils::logging::safe_submission_context;
use crate::utils::sanitization::{sanitize_email, sanitize_text};
use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

pub struct NotificationService {
    config: NotificationConfig,
    composer: Arc<dyn EmailComposer>,
    sender: Arc<dyn EmailSender>,
    log: Arc<dyn SubmissionLog>,
    spam_filter: SpamFilter,
}

impl NotificationService {
    pub fn new(
        config: NotificationConfig,
        sender: Arc<dyn EmailSender>,
        log: Arc<dyn SubmissionLog>,
    ) -> Result<Self, ContactflowError> {
        let composer = Arc::new(LettreEmailComposer::new(&config)?);
        Ok(Self {
            config,
            composer,
            sender,
            log,
            spam_filter: SpamFilter::new()?,
        })
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Trims and escapes every free-text field; the client's own cleanup is not trusted
    pub fn sanitize(&self, fields: &FormFields, client: ClientInfo) -> SanitizedSubmission {
        SanitizedSubmission {
            name: sanitize_text(&fields.name),
            email: sanitize_email(&fields.email),
            phone: sanitize_text(&fields.phone),
            business_type: sanitize_text(&fields.business_type),
            services: fields.services.iter().map(|s| sanitize_text(s)).collect(),
            message: sanitize_text(&fields.message),
            received_at: Local::now(),
            client,
        }
    }

    /// Runs one submission through the pipeline, returning the mail provider's message id
    #[tracing::instrument(name = "notification.process", skip_all)]
    pub async fn process(
        &self,
        payload: &ContactPayload,
        client: ClientInfo,
    ) -> Result<String, ContactflowError> {
        validate_submission(&payload.fields, self.config.max_message_length)?;

        let submission = self.sanitize(&payload.fields, client);
        let context = safe_submission_context(&submission.name, &submission.email, &submission.message);

        self.spam_filter.check(
            &submission.name,
            &submission.message,
            payload.honeypot.as_deref(),
        )?;

        let raw_email = self.composer.compose(&submission)?;
        let message_id = self
            .sender
            .send_raw_email(
                &raw_email,
                &self.config.from_email,
                std::slice::from_ref(&self.config.to_email),
            )
            .await?;

        info!(
            target: LOG_TARGET_AUDIT,
            message_id = %message_id,
            submission = %context,
            "Contact submission delivered"
        );

        // Best effort once the mail is out
        if let Err(e) = self.log.append(&submission.record()).await {
            warn!(error = %e, "Failed to append submission log");
        }

        Ok(message_id)
    }
}

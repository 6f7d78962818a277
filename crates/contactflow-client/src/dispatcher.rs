/// Submission dispatcher
///
/// Drives one submission attempt through
/// `Idle -> Validating -> Submitting -> (Success | FallingBack | Error) -> Idle`.
/// Only one attempt is in flight per dispatcher; a submit that arrives while
/// another one runs is dropped, not queued.
use crate::error::ClientError;
use crate::fallback::{MailClientLauncher, build_mailto};
use crate::transport::NotificationTransport;
use crate::validator::FormValidator;
use crate::view::FormView;
use chrono::Local;
use contactflow_core::constants::{
    FALLBACK_NOTICE_DELAY_MS, MSG_ALL_PATHS_FAILED, MSG_FIX_ERRORS, MSG_MAILTO_OPENED,
    MSG_SUBMISSION_ACCEPTED, RECIPIENT_EMAIL, SOURCE_TAG,
};
use contactflow_core::models::{ContactPayload, FormFields};
use contactflow_core::utils::logging::redact_email;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    FallingBack,
    Error,
}

impl SubmissionState {
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Success)
                | (Submitting, FallingBack)
                | (Submitting, Error)
                | (FallingBack, Error)
                | (Success, Idle)
                | (FallingBack, Idle)
                | (Error, Idle)
        )
    }
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent
    Invalid,
    /// The endpoint accepted the submission
    Delivered,
    /// The endpoint failed and the mail client was opened with this URI
    FellBack { uri: String },
    /// The endpoint and the fallback both failed
    Failed { reason: String },
    /// Another attempt was already running
    Dropped,
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Mailbox used by the `mailto:` fallback
    pub recipient: String,
    /// Pause between opening the mail client and confirming it to the user
    pub fallback_delay: Duration,
    /// Source tag sent with every payload
    pub source: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            recipient: RECIPIENT_EMAIL.to_string(),
            fallback_delay: Duration::from_millis(FALLBACK_NOTICE_DELAY_MS),
            source: SOURCE_TAG.to_string(),
        }
    }
}

/// Single-flight submission driver
///
/// State only moves through [`Dispatcher::submit`]; callers cannot force a transition.
///
/// ```compile_fail
/// use contactflow_client::{Dispatcher, SubmissionState};
///
/// fn wedge(dispatcher: &Dispatcher) {
///     let _ = dispatcher.transition(SubmissionState::Validating);
/// }
/// ```
pub struct Dispatcher {
    config: DispatcherConfig,
    validator: FormValidator,
    transport: Arc<dyn NotificationTransport>,
    launcher: Arc<dyn MailClientLauncher>,
    state: Mutex<SubmissionState>,
}

/// Returns the dispatcher to `Idle` and clears the busy indicator on every exit
struct InFlight<'a> {
    dispatcher: &'a Dispatcher,
    view: &'a dyn FormView,
    loading: bool,
}

impl InFlight<'_> {
    fn start_loading(&mut self) {
        self.view.set_loading(true);
        self.loading = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.loading {
            self.view.set_loading(false);
        }
        *self.dispatcher.lock_state() = SubmissionState::Idle;
    }
}

impl Dispatcher {
    pub fn new(
        config: DispatcherConfig,
        validator: FormValidator,
        transport: Arc<dyn NotificationTransport>,
        launcher: Arc<dyn MailClientLauncher>,
    ) -> Self {
        Self {
            config,
            validator,
            transport,
            launcher,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Checked state change
    pub(crate) fn transition(&self, next: SubmissionState) -> Result<(), ClientError> {
        let mut state = self.lock_state();
        if !state.can_transition_to(next) {
            return Err(ClientError::IllegalTransition { from: *state, to: next });
        }
        *state = next;
        Ok(())
    }

    /// Claims the dispatcher for one attempt, or `None` when one is running
    fn begin<'a>(&'a self, view: &'a dyn FormView) -> Option<InFlight<'a>> {
        let mut state = self.lock_state();
        if *state != SubmissionState::Idle {
            return None;
        }
        *state = SubmissionState::Validating;
        Some(InFlight {
            dispatcher: self,
            view,
            loading: false,
        })
    }

    /// Runs one submission attempt for the given field values
    pub async fn submit(
        &self,
        fields: FormFields,
        view: &dyn FormView,
    ) -> Result<SubmitOutcome, ClientError> {
        let Some(mut guard) = self.begin(view) else {
            warn!("Submission already in progress, dropping submit");
            return Ok(SubmitOutcome::Dropped);
        };

        if !self.validator.validate_form(&fields, view) {
            view.show_error(MSG_FIX_ERRORS);
            self.transition(SubmissionState::Idle)?;
            return Ok(SubmitOutcome::Invalid);
        }

        let payload = ContactPayload::new(fields.trimmed(), self.config.source.clone());

        self.transition(SubmissionState::Submitting)?;
        guard.start_loading();

        match self.transport.send(&payload).await {
            Ok(_) => {
                self.transition(SubmissionState::Success)?;
                info!(email = %redact_email(&payload.fields.email), "Contact submission delivered");
                view.show_success(MSG_SUBMISSION_ACCEPTED);
                view.reset();
                Ok(SubmitOutcome::Delivered)
            }
            Err(e) => {
                warn!(error = %e, "Notification endpoint failed, falling back to mail client");
                self.transition(SubmissionState::FallingBack)?;
                self.fall_back(&payload.fields, view).await
            }
        }
    }

    async fn fall_back(
        &self,
        fields: &FormFields,
        view: &dyn FormView,
    ) -> Result<SubmitOutcome, ClientError> {
        let opened = build_mailto(&self.config.recipient, fields, Local::now())
            .and_then(|uri| self.launcher.open(&uri).map(|_| uri));

        match opened {
            Ok(uri) => {
                tokio::time::sleep(self.config.fallback_delay).await;
                view.hide_messages();
                view.show_success(MSG_MAILTO_OPENED);
                view.reset();
                Ok(SubmitOutcome::FellBack { uri })
            }
            Err(e) => {
                error!(error = %e, "All submission methods failed");
                self.transition(SubmissionState::Error)?;
                view.show_error(MSG_ALL_PATHS_FAILED);
                Ok(SubmitOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}

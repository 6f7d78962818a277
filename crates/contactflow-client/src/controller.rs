/// Contact form controller
///
/// Binds form events to input cleanup, inline validation and the dispatcher.
use crate::dispatcher::{Dispatcher, SubmitOutcome};
use crate::error::ClientError;
use crate::events::{EventKind, EventRegistry, FormEvent, HandlerId};
use crate::security::{
    SessionStore, SubmissionRateLimiter, format_phone_number, issue_csrf_token, sanitize_input,
};
use crate::view::FormView;
use contactflow_core::constants::{CONTACT_FORM_ID, MSG_RATE_LIMITED};
use contactflow_core::models::Field;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct ContactForm {
    view: Arc<dyn FormView>,
    dispatcher: Arc<Dispatcher>,
    events: EventRegistry,
    rate_limiter: SubmissionRateLimiter,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ContactForm {
    /// Attaches the controller to a view and registers its handlers
    ///
    /// With a session store, a fresh form token is issued and placed on the view.
    pub fn attach(
        view: Arc<dyn FormView>,
        dispatcher: Arc<Dispatcher>,
        session: Option<&dyn SessionStore>,
    ) -> Result<Arc<Self>, ClientError> {
        if let Some(store) = session {
            view.set_csrf_token(&issue_csrf_token(store));
        }

        let form = Arc::new(Self {
            view,
            dispatcher,
            events: EventRegistry::new(),
            rate_limiter: SubmissionRateLimiter::default(),
            pending: Mutex::new(Vec::new()),
        });
        form.register_handlers()?;

        info!("Contact form attached");
        Ok(form)
    }

    fn register_handlers(self: &Arc<Self>) -> Result<Vec<HandlerId>, ClientError> {
        let kinds = [
            EventKind::Input,
            EventKind::Blur,
            EventKind::ServiceToggled,
            EventKind::Submit,
        ];

        kinds
            .into_iter()
            .map(|kind| {
                let form: Weak<Self> = Arc::downgrade(self);
                self.events.register(kind, move |event| {
                    if let Some(form) = form.upgrade() {
                        form.handle(event);
                    }
                })
            })
            .collect()
    }

    pub fn view(&self) -> &Arc<dyn FormView> {
        &self.view
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Delivers an event to the registered handlers
    pub fn emit(&self, event: FormEvent) -> usize {
        self.events.emit(&event)
    }

    /// Detaches every handler and cancels submissions still in flight
    ///
    /// A cancelled submission only clears the loading state and returns the dispatcher to idle.
    pub fn teardown(&self) {
        self.events.teardown();
        let tasks = std::mem::take(&mut *self.pending());
        for task in &tasks {
            task.abort();
        }
        info!(cancelled = tasks.len(), "Contact form torn down");
    }

    fn pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submits the current values and waits for the outcome
    pub async fn submit(&self) -> Result<SubmitOutcome, ClientError> {
        self.dispatcher
            .submit(self.view.values(), self.view.as_ref())
            .await
    }

    /// Waits for every submission started by a `Submit` event
    pub async fn settle(&self) {
        let tasks = std::mem::take(&mut *self.pending());
        for task in tasks {
            match task.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!(error = %e, "Submission task failed"),
            }
        }
    }

    fn handle(self: Arc<Self>, event: &FormEvent) {
        match event {
            FormEvent::Input { field, value } => self.on_input(*field, value),
            FormEvent::Blur { field } => {
                let values = self.view.values();
                self.dispatcher
                    .validator()
                    .check_field(*field, &values, self.view.as_ref());
            }
            FormEvent::ServiceToggled { service, checked } => {
                self.on_service_toggled(service, *checked)
            }
            FormEvent::Submit => self.spawn_submit(),
        }
    }

    fn on_input(&self, field: Field, value: &str) {
        let value = match field {
            Field::Phone => format_phone_number(value),
            Field::Name | Field::Email | Field::Message => {
                sanitize_input(value).unwrap_or_else(|| value.to_string())
            }
            Field::BusinessType | Field::Services => value.to_string(),
        };
        self.view.set_value(field, &value);
        self.view.clear_field_error(field);
    }

    fn on_service_toggled(&self, service: &str, checked: bool) {
        let mut values = self.view.values();
        values.services.retain(|s| s != service);
        if checked {
            values.services.push(service.to_string());
        }
        self.view
            .set_value(Field::Services, &values.services.join(", "));
        self.dispatcher
            .validator()
            .check_field(Field::Services, &values, self.view.as_ref());
    }

    fn spawn_submit(self: Arc<Self>) {
        if self.rate_limiter.check_rate_limit(CONTACT_FORM_ID).is_err() {
            self.view.show_error(MSG_RATE_LIMITED);
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "No async runtime to run the submission on");
                return;
            }
        };

        let form = Arc::clone(&self);
        let task = runtime.spawn(async move {
            match form.submit().await {
                Ok(outcome) => info!(outcome = ?outcome, "Submission finished"),
                Err(e) => error!(error = %e, "Submission failed"),
            }
        });

        let mut pending = self.pending();
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }
}

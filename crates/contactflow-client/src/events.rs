/// Form event registration with explicit teardown
///
/// Handlers are registered per event kind and receive every emitted event of
/// that kind. After [`EventRegistry::teardown`] no handler runs again and new
/// registrations are refused.
use crate::error::ClientError;
use contactflow_core::models::Field;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Something the user did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Value typed into a field
    Input { field: Field, value: String },
    /// Field lost focus
    Blur { field: Field },
    /// Service checkbox changed
    ServiceToggled { service: String, checked: bool },
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Blur,
    ServiceToggled,
    Submit,
}

impl FormEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FormEvent::Input { .. } => EventKind::Input,
            FormEvent::Blur { .. } => EventKind::Blur,
            FormEvent::ServiceToggled { .. } => EventKind::ServiceToggled,
            FormEvent::Submit => EventKind::Submit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&FormEvent) + Send + Sync>;

#[derive(Default)]
struct Registrations {
    next_id: u64,
    handlers: Vec<(HandlerId, EventKind, Handler)>,
    torn_down: bool,
}

#[derive(Default)]
pub struct EventRegistry {
    inner: Mutex<Registrations>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registrations> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn register<F>(&self, kind: EventKind, handler: F) -> Result<HandlerId, ClientError>
    where
        F: Fn(&FormEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        if inner.torn_down {
            return Err(ClientError::TornDown);
        }

        inner.next_id += 1;
        let id = HandlerId(inner.next_id);
        inner.handlers.push((id, kind, Arc::new(handler)));
        Ok(id)
    }

    /// Removes one handler; returns whether it was registered
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut inner = self.lock();
        let before = inner.handlers.len();
        inner.handlers.retain(|(handler_id, _, _)| *handler_id != id);
        inner.handlers.len() != before
    }

    /// Runs every handler registered for the event's kind, returning how many ran
    pub fn emit(&self, event: &FormEvent) -> usize {
        let handlers: Vec<Handler> = {
            let inner = self.lock();
            if inner.torn_down {
                debug!(kind = ?event.kind(), "Event emitted after teardown, ignoring");
                return 0;
            }
            inner
                .handlers
                .iter()
                .filter(|(_, kind, _)| *kind == event.kind())
                .map(|(_, _, handler)| Arc::clone(handler))
                .collect()
        };

        // Lock is released before handlers run; they may re-enter the registry
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Drops every handler; later emits are no-ops
    pub fn teardown(&self) {
        let mut inner = self.lock();
        inner.torn_down = true;
        inner.handlers.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.lock().torn_down
    }

    pub fn len(&self) -> usize {
        self.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Shared fixtures for client integration tests
#![allow(dead_code)]

use contactflow_client::fallback::MailClientLauncher;
use contactflow_client::{
    ClientError, Dispatcher, DispatcherConfig, FormValidator, HttpNotificationTransport,
};
use contactflow_core::models::FormFields;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const FALLBACK_DELAY: Duration = Duration::from_millis(50);

/// Launcher that remembers every URI it was asked to open
#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl MailClientLauncher for RecordingLauncher {
    fn open(&self, uri: &str) -> Result<(), ClientError> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

pub fn valid_fields() -> FormFields {
    FormFields {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "(614) 555-0100".to_string(),
        business_type: "restaurant".to_string(),
        services: vec!["website".to_string()],
        message: "We need online ordering for our diner.".to_string(),
    }
}

pub fn dispatcher_for(endpoint: &str, launcher: Arc<RecordingLauncher>) -> Dispatcher {
    let config = DispatcherConfig {
        recipient: "owner@example.com".to_string(),
        fallback_delay: FALLBACK_DELAY,
        ..Default::default()
    };
    Dispatcher::new(
        config,
        FormValidator::new(),
        Arc::new(HttpNotificationTransport::new(endpoint)),
        launcher,
    )
}

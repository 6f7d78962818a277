//! Shared fixtures for endpoint integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use contactflow_api::ApiContext;
use contactflow_core::ContactflowError;
use contactflow_core::models::{NotificationConfig, SubmissionRecord};
use contactflow_core::services::{EmailSender, NotificationService, SubmissionLog};
use std::sync::{Arc, Mutex};

/// Mail sender that records every raw message instead of sending it
#[derive(Default)]
pub struct MockSender {
    pub sent: Mutex<Vec<Vec<u8>>>,
    pub fail: bool,
}

impl MockSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_message(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|raw| String::from_utf8_lossy(raw).to_string())
    }
}

#[async_trait]
impl EmailSender for MockSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        _from: &str,
        _to: &[String],
    ) -> Result<String, ContactflowError> {
        if self.fail {
            return Err(ContactflowError::Ses("service unavailable".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(raw_email.to_vec());
        Ok(format!("mock-{}", sent.len()))
    }
}

/// In-memory submission log
#[derive(Default)]
pub struct MockLog {
    pub lines: Mutex<Vec<String>>,
}

impl MockLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionLog for MockLog {
    async fn append(&self, record: &SubmissionRecord) -> Result<(), ContactflowError> {
        self.lines.lock().unwrap().push(record.to_log_line());
        Ok(())
    }
}

pub fn test_context(sender: Arc<MockSender>, log: Arc<MockLog>) -> Arc<ApiContext> {
    let config = NotificationConfig {
        log_path: std::env::temp_dir().join("contactflow-test.log"),
        ..Default::default()
    };
    let service = NotificationService::new(config, sender, log).unwrap();
    ApiContext::with_service(service)
}

pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Mary-Jane O'Brien",
        "email": "mj@example.com",
        "phone": "(614) 555-0100",
        "businessType": "restaurant",
        "services": ["website", "chatbot"],
        "message": "We would like a new website for our diner.",
        "timestamp": "2025-03-14T09:26:53Z",
        "source": "probuild-website"
    })
}

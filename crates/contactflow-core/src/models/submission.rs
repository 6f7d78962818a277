/// Server-side submission models
use crate::constants::LOG_TIMESTAMP_FORMAT;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Request metadata captured by the notification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            ip_address: "unknown".to_string(),
            user_agent: "unknown".to_string(),
        }
    }
}

/// Submission after trimming and HTML-escaping, ready for the mail template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub services: Vec<String>,
    pub message: String,
    pub received_at: DateTime<Local>,
    pub client: ClientInfo,
}

impl SanitizedSubmission {
    pub fn services_summary(&self) -> String {
        if self.services.is_empty() {
            "None selected".to_string()
        } else {
            self.services.join(", ")
        }
    }

    pub fn timestamp(&self) -> String {
        self.received_at.format(LOG_TIMESTAMP_FORMAT).to_string()
    }

    pub fn record(&self) -> SubmissionRecord {
        SubmissionRecord {
            timestamp: self.timestamp(),
            name: self.name.clone(),
            email: self.email.clone(),
            ip_address: self.client.ip_address.clone(),
        }
    }
}

/// One line of the append-only submission log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub ip_address: String,
}

impl SubmissionRecord {
    /// `<timestamp> - <name> (<email>) - <ip>\n`
    pub fn to_log_line(&self) -> String {
        format!(
            "{} - {} ({}) - {}\n",
            self.timestamp, self.name, self.email, self.ip_address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> SanitizedSubmission {
        SanitizedSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            business_type: String::new(),
            services: vec![],
            message: "Hello there, we need help.".to_string(),
            received_at: Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            client: ClientInfo {
                ip_address: "203.0.113.7".to_string(),
                user_agent: "curl/8.0".to_string(),
            },
        }
    }

    #[test]
    fn test_log_line_format() {
        let line = sample().record().to_log_line();
        assert_eq!(
            line,
            "2025-03-14 09:26:53 - Jane Doe (jane@example.com) - 203.0.113.7\n"
        );
    }

    #[test]
    fn test_services_summary_when_empty() {
        assert_eq!(sample().services_summary(), "None selected");
    }

    #[test]
    fn test_client_info_default() {
        let info = ClientInfo::default();
        assert_eq!(info.ip_address, "unknown");
        assert_eq!(info.user_agent, "unknown");
    }
}

/// Chat assistant webhook client
use crate::security::{SessionStore, random_base36};
use chrono::{SecondsFormat, Utc};
use contactflow_core::constants::{
    CHAT_DEFAULT_REPLY, CHAT_DEMO_REPLY, CHAT_ERROR_REPLY, CHAT_SESSION_KEY,
    CHAT_WEBHOOK_PLACEHOLDER, CHAT_WEBHOOK_URL,
};
use contactflow_core::utils::sanitization::escape_html;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Webhook request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub timestamp: String,
    pub page: String,
    pub user_agent: String,
    pub referrer: String,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub webhook_url: String,
    /// Path of the page the chat runs on
    pub page: String,
    pub user_agent: String,
    pub referrer: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: CHAT_WEBHOOK_URL.to_string(),
            page: "/".to_string(),
            user_agent: format!("contactflow/{}", contactflow_core::VERSION),
            referrer: String::new(),
        }
    }
}

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Text returned by the webhook
    Webhook,
    /// Webhook answered without any reply text
    Default,
    /// Webhook could not be reached or answered garbage
    Unavailable,
    /// Webhook URL is still the placeholder
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Reply text safe to insert into markup
    pub fn to_html(&self) -> String {
        escape_html(&self.text)
    }
}

/// Picks the reply text from a webhook answer: `response`, then `message`, then `output`
pub fn extract_reply(body: &serde_json::Value) -> Option<String> {
    ["response", "message", "output"].iter().find_map(|key| {
        body.get(key)
            .and_then(|value| value.as_str())
            .filter(|text| !text.is_empty())
            .map(String::from)
    })
}

pub struct ChatClient {
    client: reqwest::Client,
    config: ChatConfig,
    session: Arc<dyn SessionStore>,
}

impl ChatClient {
    pub fn new(config: ChatConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            session,
        }
    }

    /// Session id kept for the lifetime of the session store
    ///
    /// Format: `session_<millis>_<9 base36 chars>`.
    pub fn session_id(&self) -> String {
        if let Some(id) = self.session.get(CHAT_SESSION_KEY) {
            return id;
        }

        let id = format!(
            "session_{}_{}",
            Utc::now().timestamp_millis(),
            random_base36(9)
        );
        self.session.set(CHAT_SESSION_KEY, &id);
        id
    }

    /// Sends one chat message; blank messages are ignored and yield `None`
    pub async fn send(&self, message: &str) -> Option<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        if self.config.webhook_url == CHAT_WEBHOOK_PLACEHOLDER {
            return Some(ChatReply::new(CHAT_DEMO_REPLY, ReplySource::Demo));
        }

        let request = ChatRequest {
            message: message.to_string(),
            session_id: self.session_id(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            page: self.config.page.clone(),
            user_agent: self.config.user_agent.clone(),
            referrer: self.config.referrer.clone(),
        };

        match self.post(&request).await {
            Ok(body) => Some(match extract_reply(&body) {
                Some(text) => ChatReply::new(text, ReplySource::Webhook),
                None => ChatReply::new(CHAT_DEFAULT_REPLY, ReplySource::Default),
            }),
            Err(e) => {
                warn!(error = %e, "Chat webhook failed");
                Some(ChatReply::new(CHAT_ERROR_REPLY, ReplySource::Unavailable))
            }
        }
    }

    async fn post(&self, request: &ChatRequest) -> Result<serde_json::Value, reqwest::Error> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(request)
            .send()
            .await?;
        debug!(status = response.status().as_u16(), "Chat webhook answered");
        response.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::MemorySessionStore;
    use serde_json::json;

    #[test]
    fn test_extract_reply_priority() {
        assert_eq!(
            extract_reply(&json!({"output": "c", "message": "b", "response": "a"})).as_deref(),
            Some("a")
        );
        assert_eq!(
            extract_reply(&json!({"response": "", "output": "c"})).as_deref(),
            Some("c")
        );
        assert_eq!(extract_reply(&json!({"status": "ok"})), None);
    }

    #[test]
    fn test_session_id_is_stable() {
        let client = ChatClient::new(ChatConfig::default(), Arc::new(MemorySessionStore::new()));

        let id = client.session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);

        assert_eq!(client.session_id(), id);
    }

    #[test]
    fn test_reply_html_is_escaped() {
        let reply = ChatReply::new("<b>hi</b>", ReplySource::Webhook);
        assert_eq!(reply.to_html(), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let client = ChatClient::new(ChatConfig::default(), Arc::new(MemorySessionStore::new()));
        assert!(client.send("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_placeholder_url_gives_demo_reply() {
        let config = ChatConfig {
            webhook_url: CHAT_WEBHOOK_PLACEHOLDER.to_string(),
            ..Default::default()
        };
        let client = ChatClient::new(config, Arc::new(MemorySessionStore::new()));

        let reply = client.send("hello").await.unwrap();
        assert_eq!(reply.source, ReplySource::Demo);
        assert_eq!(reply.text, CHAT_DEMO_REPLY);
    }
}

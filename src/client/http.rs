//! HTTP transport for the assistant service (reqwest).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::WidgetConfig;
use crate::error::Error;
use crate::Result;

use super::{ChatTurn, SessionCreated, Transport};

/// Reqwest-backed transport speaking the assistant service REST API.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    assistant_id: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for the configured assistant.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            assistant_id: config.assistant_id.clone(),
            client: Client::new(),
        }
    }

    /// Same transport with a request timeout on the underlying client.
    ///
    /// The widget core enforces no timeout of its own; without this, a hung
    /// connection keeps the exchange in flight indefinitely.
    pub fn with_timeout(config: &WidgetConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            assistant_id: config.assistant_id.clone(),
            client,
        })
    }

    fn sessions_url(&self) -> String {
        format!(
            "{}/client/api/v1/assistants/{}/sessions",
            self.base_url, self.assistant_id
        )
    }

    fn chat_url(&self, session_id: &str) -> String {
        format!("{}/{}/chat", self.sessions_url(), session_id)
    }

    async fn post(&self, url: String, token: &str, body: Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ServerRejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn create_session(&self, token: &str) -> Result<SessionCreated> {
        debug!(url = %self.sessions_url(), "creating session");
        let response = self.post(self.sessions_url(), token, json!({})).await?;
        let created: SessionCreated = response.json().await?;
        Ok(created)
    }

    async fn send_chat(
        &self,
        token: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<ChatTurn>> {
        debug!(session_id, chars = message.len(), "sending chat message");
        let response = self
            .post(self.chat_url(session_id), token, json!({ "message": message }))
            .await?;
        let turns: Vec<ChatTurn> = response.json().await?;
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        let config = WidgetConfig::new("asst_42", "https://api.example.com");
        HttpTransport::new(&config)
    }

    #[test]
    fn test_sessions_url() {
        assert_eq!(
            transport().sessions_url(),
            "https://api.example.com/client/api/v1/assistants/asst_42/sessions"
        );
    }

    #[test]
    fn test_chat_url() {
        assert_eq!(
            transport().chat_url("sess_7"),
            "https://api.example.com/client/api/v1/assistants/asst_42/sessions/sess_7/chat"
        );
    }

    #[test]
    fn test_with_timeout_builds() {
        let config = WidgetConfig::new("asst_42", "https://api.example.com");
        assert!(HttpTransport::with_timeout(&config, Duration::from_secs(30)).is_ok());
    }
}

//! Outbound SMS notifications.
//!
//! Sends are fire-and-forget: callers hand a message to [`send_detached`] and
//! never wait for the gateway. The outcome only ends up in the logs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("network error: {0}")]
    Network(String),
    #[error("gateway rejected message: HTTP {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, message: &str) -> Result<(), SmsError>;
}

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    to: &'a str,
    from: &'a str,
    message: &'a str,
}

/// JSON-over-HTTP gateway client authenticated with a bearer API key.
pub struct HttpSmsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender_id: String,
}

impl HttpSmsClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            sender_id: sender_id.into(),
        }
    }
}

#[async_trait]
impl SmsSender for HttpSmsClient {
    async fn send(&self, to: &str, message: &str) -> Result<(), SmsError> {
        let payload = SmsPayload { to, from: &self.sender_id, message };
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SmsError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

/// Sender used when SMS is disabled; logs and drops the message.
#[derive(Default)]
pub struct NoopSmsSender;

#[async_trait]
impl SmsSender for NoopSmsSender {
    async fn send(&self, to: &str, _message: &str) -> Result<(), SmsError> {
        info!(%to, "sms disabled; message dropped");
        Ok(())
    }
}

/// Spawn the send on the current runtime and return immediately.
pub fn send_detached(sender: Arc<dyn SmsSender>, to: String, message: String) {
    tokio::spawn(async move {
        match sender.send(&to, &message).await {
            Ok(()) => info!(%to, event = "sms_sent", "sms delivered to gateway"),
            Err(e) => warn!(%to, event = "sms_failed", error = %e, "sms send failed"),
        }
    });
}

pub fn welcome_message(name: &str) -> String {
    format!("Welcome to AutoEase, {name}! Log in to start booking.")
}

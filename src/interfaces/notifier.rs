use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Delivers a short message to a user. Returns whether delivery succeeded.
///
/// Callers treat this as fire-and-forget: a `false` is logged, never surfaced.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient_id: i64, subject: &str, body: &str) -> bool;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, recipient_id: i64, subject: &str, _body: &str) -> bool {
        tracing::info!(recipient_id, subject, "Notification");
        true
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    recipient_id: i64,
    subject: &'a str,
    body: &'a str,
}

/// POSTs each notification as JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(WebhookNotifier {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, recipient_id: i64, subject: &str, body: &str) -> bool {
        let payload = WebhookPayload { recipient_id, subject, body };

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Notification webhook rejected delivery");
                false
            }
            Err(e) => {
                tracing::warn!("Notification webhook failed: {}", e);
                false
            }
        }
    }
}

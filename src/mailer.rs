use axum::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::MailConfig;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Posts messages to an HTTP mail relay.
#[derive(Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl RelayMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url: config.relay_url.clone(),
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.relay_url)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await?;
        res.error_for_status()?;
        debug!(to, subject, "email sent");
        Ok(())
    }
}

/// Used when no relay is configured; messages are dropped.
#[derive(Clone)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        debug!(to, subject, "mail relay not configured, dropping email");
        Ok(())
    }
}

/// Notification emails never affect the primary response: failures are logged
/// and swallowed.
pub async fn send_best_effort(mailer: &dyn Mailer, to: &str, subject: &str, body: &str) {
    if let Err(e) = mailer.send(to, subject, body).await {
        warn!(error = %e, to, subject, "notification email failed");
    }
}

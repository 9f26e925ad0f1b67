//! Slack incoming-webhook delivery.

use crate::types::{BeaconError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Incoming-webhook request body.
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    username: &'a str,
    text: &'a str,
}

/// Posts messages to a single Slack incoming webhook.
pub struct SlackWebhook {
    client: Client,
    url: Url,
}

impl SlackWebhook {
    /// Create a webhook client for `url`.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("beacon-emitter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(url, client)
    }

    /// Create a webhook client for `url` that sends through `client`.
    pub fn with_client(url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            url: Url::parse(url)?,
        })
    }

    /// Post `text` under the display name `username`.
    pub async fn post(&self, username: &str, text: &str) -> Result<()> {
        let body = WebhookMessage { username, text };

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Slack webhook accepted message");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Slack webhook rejected message: {} {}", status, body);
            Err(BeaconError::WebhookRejected { status, body })
        }
    }
}

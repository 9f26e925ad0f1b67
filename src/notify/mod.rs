//! Message delivery.
//!
//! This module handles:
//! - Resolving the sender name
//! - Posting to Slack incoming webhooks
//! - Verbose console echo

pub mod console;
pub mod slack;

pub use console::ConsoleOutput;
pub use slack::SlackWebhook;

use crate::config::{ApiType, NotificationConfig};
use crate::types::{BeaconError, Delivery, Result};
use tracing::{debug, error};

const UNKNOWN_USERNAME: &str = "unknown";

/// Sends text according to a resolved [`NotificationConfig`].
pub struct Notifier {
    config: NotificationConfig,
    console: ConsoleOutput,
}

impl Notifier {
    /// Create a notifier for one invocation.
    pub fn new(config: NotificationConfig) -> Self {
        let console = ConsoleOutput::new(config.verbose);
        Self { config, console }
    }

    /// Send `text`, returning whether it actually left the process.
    pub async fn send(&self, text: &str) -> Result<Delivery> {
        self.console.print_outgoing(text);

        if self.config.api_type == ApiType::Dummy {
            debug!("Dummy API type, skipping webhook");
            self.console.print_delivery(Delivery::Skipped, None);
            return Ok(Delivery::Skipped);
        }

        let url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or(BeaconError::MissingWebhookUrl)?;
        let username = resolve_username(self.config.username.as_deref());

        debug!("Posting {} bytes as {}", text.len(), username);
        SlackWebhook::new(url)?.post(&username, text).await?;

        self.console.print_delivery(Delivery::Posted, Some(&username));
        Ok(Delivery::Posted)
    }

    /// Send `text`, logging any failure instead of returning it.
    pub async fn notify(&self, text: &str) {
        if let Err(e) = self.send(text).await {
            error!("Failed to send notification: {}", e);
        }
    }
}

/// The configured username, or the hostname, or `"unknown"`.
pub fn resolve_username(configured: Option<&str>) -> String {
    match configured.filter(|u| !u.is_empty()) {
        Some(username) => username.to_string(),
        None => hostname().unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
    }
}

fn hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => name.into_string().ok().filter(|n| !n.is_empty()),
        Err(e) => {
            debug!("Failed to read hostname: {}", e);
            None
        }
    }
}

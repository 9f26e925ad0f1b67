//! beacon-emitter - forward text to Slack through an incoming webhook.
//!
//! Text can come from:
//! - Command arguments, joined with newlines
//! - Standard input, echoed as it is read
//! - A YAML report of the host's non-loopback interface addresses
//!
//! # Example
//!
//! ```no_run
//! use beacon_emitter::config::{ApiType, NotificationConfig};
//! use beacon_emitter::notify::Notifier;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NotificationConfig {
//!         api_type: ApiType::Webhook,
//!         webhook_url: Some("https://hooks.slack.com/services/T000/B000/XXXX".to_string()),
//!         ..Default::default()
//!     };
//!     Notifier::new(config).send("deploy finished").await.unwrap();
//! }
//! ```

pub mod config;
pub mod input;
pub mod notify;
pub mod report;
pub mod types;

pub use config::{Action, ApiType, Cli, Commands, FileConfig, FlagConfig, NotificationConfig};
pub use notify::Notifier;
pub use types::{BeaconError, Delivery, Result};

/// Version string, overridable at build time through `BEACON_EMITTER_VERSION`.
pub fn version() -> &'static str {
    option_env!("BEACON_EMITTER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

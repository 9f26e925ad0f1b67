//! Core types and errors for the notifier.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving configuration or delivering a message.
#[derive(Error, Debug)]
pub enum BeaconError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("System call failed: {0}")]
    SysError(#[from] nix::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("unknown api type: {0} (expected webhook or dummy)")]
    UnknownApiType(String),

    #[error("Webhook URL is not set")]
    MissingWebhookUrl,

    #[error("Webhook returned {status}: {body}")]
    WebhookRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("action is not set")]
    ActionNotSet,

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, BeaconError>;

/// Outcome of a notifier call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The webhook accepted the message.
    Posted,
    /// The dummy API type is configured; nothing left the process.
    Skipped,
}

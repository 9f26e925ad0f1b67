//! Configuration handling: CLI flags, the optional YAML file, and the merge of both.

use crate::types::{BeaconError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::str::FromStr;

/// Forward text and network reports to Slack.
#[derive(Parser, Debug, Clone)]
#[command(name = "beacon-emitter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub flags: FlagConfig,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print version information
    Version,
    /// Send the arguments, or standard input when none are given
    Send(SendArgs),
    /// Send a report of the host's non-loopback interface addresses
    Report,
    /// Run the action named in the config file
    Batch,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SendArgs {
    /// Message lines to send
    pub text: Vec<String>,
}

/// Settings given on the command line. Empty values count as not given.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagConfig {
    /// Slack API type (webhook or dummy)
    #[arg(long = "apiType", global = true)]
    pub api_type: Option<String>,

    /// Slack webhook URL
    #[arg(long = "webhookUrl", env = "BEACON_EMITTER_WEBHOOK_URL", global = true)]
    pub webhook_url: Option<String>,

    /// Slack webhook username (defaults to the hostname)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How messages leave the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiType {
    /// Post to a Slack incoming webhook.
    #[default]
    Webhook,
    /// Do nothing. Used for testing.
    Dummy,
}

/// The YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(rename = "slackApiType", default, deserialize_with = "api_type_or_blank")]
    pub api_type: Option<ApiType>,
    pub webhook_url: Option<String>,
    pub username: Option<String>,
    /// Accepted for compatibility; the CLI flag always decides verbosity.
    #[serde(default)]
    pub verbose: bool,
    pub action: Option<String>,
}

/// Effective settings for a single notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationConfig {
    pub api_type: ApiType,
    pub webhook_url: Option<String>,
    pub username: Option<String>,
    pub verbose: bool,
}

/// Output of [`resolve`]: the notifier settings plus the batch action, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub notification: NotificationConfig,
    pub action: Option<String>,
}

/// Commands `batch` can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Send,
    Report,
}

impl FromStr for Action {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "send" => Ok(Action::Send),
            "report" => Ok(Action::Report),
            other => Err(BeaconError::UnknownAction(other.to_string())),
        }
    }
}

impl Action {
    /// Parse the configured action, failing when it is missing.
    pub fn from_config(action: Option<&str>) -> Result<Self> {
        action.ok_or(BeaconError::ActionNotSet)?.parse()
    }
}

impl ApiType {
    /// Parse an API type name. Blank input means "not given".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>> {
        match value.filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(v) => <Self as ValueEnum>::from_str(v, true)
                .map(Some)
                .map_err(|_| BeaconError::UnknownApiType(v.to_string())),
        }
    }
}

fn api_type_or_blank<'de, D>(deserializer: D) -> std::result::Result<Option<ApiType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    ApiType::parse_optional(raw.as_deref()).map_err(|_| {
        serde::de::Error::unknown_variant(raw.as_deref().unwrap_or_default(), &["webhook", "dummy"])
    })
}

impl Cli {
    /// Load the config file, if one was given, and overlay the flags onto it.
    ///
    /// An empty `--config` means no file.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = self
            .config
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| load_file(Path::new(p)))
            .transpose()?;
        resolve(NotificationConfig::default(), file, &self.flags)
    }
}

/// Read and parse a YAML config file.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| BeaconError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|source| BeaconError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge defaults, file values, and flag values, in increasing precedence.
///
/// Only non-empty values override. `verbose` always comes from the flags.
/// Fails only when `--apiType` names an unknown type.
pub fn resolve(
    defaults: NotificationConfig,
    file: Option<FileConfig>,
    flags: &FlagConfig,
) -> Result<ResolvedConfig> {
    let mut config = defaults;
    let mut action = None;

    if let Some(file) = file {
        if let Some(api_type) = file.api_type {
            config.api_type = api_type;
        }
        overlay(&mut config.webhook_url, file.webhook_url);
        overlay(&mut config.username, file.username);
        action = non_empty(file.action);
    }

    if let Some(api_type) = ApiType::parse_optional(flags.api_type.as_deref())? {
        config.api_type = api_type;
    }
    overlay(&mut config.webhook_url, flags.webhook_url.clone());
    overlay(&mut config.username, flags.username.clone());
    config.verbose = flags.verbose;

    Ok(ResolvedConfig {
        notification: config,
        action,
    })
}

fn overlay(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = non_empty(value) {
        *slot = Some(value);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

//! Colored console output for outgoing messages.

use crate::types::Delivery;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

/// Console output handler, quiet unless verbose.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    verbose: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Echo the message about to be sent (only in verbose mode).
    pub fn print_outgoing(&self, text: &str) {
        if let Err(e) = self.write_outgoing(io::stdout().lock(), text) {
            debug!("Failed to echo outgoing message: {}", e);
        }
    }

    /// Write the outgoing message to `out` (only in verbose mode).
    pub fn write_outgoing<W: Write>(&self, mut out: W, text: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }

        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Print the delivery outcome (only in verbose mode).
    pub fn print_delivery(&self, delivery: Delivery, username: Option<&str>) {
        if !self.verbose {
            return;
        }

        println!("{}", format_delivery(delivery, username));
    }
}

fn format_delivery(delivery: Delivery, username: Option<&str>) -> String {
    match delivery {
        Delivery::Posted => format!(
            "{} Posted to Slack as {}",
            "[+]".green(),
            username.unwrap_or("unknown").bright_white()
        ),
        Delivery::Skipped => format!(
            "{} {}",
            "[.]".dimmed(),
            "Dummy API type, message not sent".dimmed()
        ),
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false)
    }
}

//! beacon-emitter - Slack webhook notifier.
//!
//! CLI entry point.

use beacon_emitter::config::{ResolvedConfig, SendArgs};
use beacon_emitter::{input, report, Action, Cli, Commands, Notifier};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries message echoes only.
    let filter = if cli.flags.verbose {
        EnvFilter::new("beacon_emitter=debug,info")
    } else {
        EnvFilter::new("beacon_emitter=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn run(cli: &Cli) -> Result<(), ExitCode> {
    match &cli.command {
        Commands::Version => println!("{}", beacon_emitter::version()),
        Commands::Send(args) => run_send(args, &Notifier::new(load(cli)?.notification)).await,
        Commands::Report => run_report(&Notifier::new(load(cli)?.notification)).await,
        Commands::Batch => run_batch(load(cli)?).await?,
    }

    Ok(())
}

fn load(cli: &Cli) -> Result<ResolvedConfig, ExitCode> {
    cli.resolve().map_err(|e| {
        error!("{}", e);
        ExitCode::FAILURE
    })
}

async fn run_send(args: &SendArgs, notifier: &Notifier) {
    let text = input::message_text(&args.text, io::stdin().lock(), io::stdout().lock());
    notifier.notify(&text).await;
}

async fn run_report(notifier: &Notifier) {
    let text = match report::build_report() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to build interface report: {}", e);
            return;
        }
    };

    notifier.notify(&text).await;
}

async fn run_batch(resolved: ResolvedConfig) -> Result<(), ExitCode> {
    let action = match Action::from_config(resolved.action.as_deref()) {
        Ok(a) => a,
        Err(e) => {
            error!("{}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let notifier = Notifier::new(resolved.notification);
    match action {
        Action::Send => run_send(&SendArgs { text: Vec::new() }, &notifier).await,
        Action::Report => run_report(&notifier).await,
    }

    Ok(())
}

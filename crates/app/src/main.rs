use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod qr;
mod source;

use config::Config;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

/// Read WiFi credentials off a photographed card and turn them into a
/// join-network QR code.
#[derive(Debug, Parser)]
#[command(name = "wifiscan", version)]
struct Cli {
    /// Config file (default: the per-user wifiscan/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// OCR a card image and extract its network name and password.
    Scan(commands::ScanArgs),
    /// Extract credentials from text that was already recognized.
    Extract(commands::ExtractArgs),
    /// Build a WiFi QR code from credentials typed in by hand.
    Qr(commands::QrArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<commands::Outcome> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Scan(args) => commands::scan(args, &config).await,
        Command::Extract(args) => commands::extract(args, &config).await,
        Command::Qr(args) => commands::qr(args, &config),
    }
}

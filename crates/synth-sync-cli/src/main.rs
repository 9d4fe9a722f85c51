//! synth-sync - Sync Synth Riders custom songs onto a headset
//!
//! Usage:
//!   synth-sync                      Pick a device interactively and sync
//!   synth-sync --device <serial>    Sync a specific device
//!   synth-sync --dry-run            Only list what is missing
//!   synth-sync --help               Show help

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;

use cli::{Cli, LogLevel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.log_level);
    cli::run(args).await
}

fn init_logging(level: LogLevel) {
    // Console output is for progress; logs go to stderr and stay quiet by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! Goalfolio CLI - goal performance summaries backed by a snapshot cache.
//!
//! # Usage
//!
//! ```bash
//! # Summarise two goals from a snapshot directory
//! goalfolio summary --data-dir ./snapshots --cache perf.redb --goal retirement --goal emergency
//!
//! # Force a reload once the cooldown has passed
//! goalfolio refresh --data-dir ./snapshots --cache perf.redb --goal retirement
//!
//! # Inspect or drop cached snapshots
//! goalfolio cache status --cache perf.redb --goal retirement
//! goalfolio cache clear --cache perf.redb --goal retirement
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref(), cli.demo)?;
    let format = cli.format;

    match cli.command {
        Commands::Summary(args) => commands::summary::execute(args, &config, format).await?,
        Commands::Refresh(args) => commands::refresh::execute(args, &config, format).await?,
        Commands::Cache(args) => commands::cache::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("goalfolio=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("goalfolio=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

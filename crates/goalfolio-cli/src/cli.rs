//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CacheArgs, SessionArgs};

/// Goalfolio - goal performance analytics with a persistent snapshot cache
#[derive(Parser)]
#[command(name = "goalfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(short, long, env = "GOALFOLIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Run in demo mode (stale snapshots are served when a fetch fails)
    #[arg(long, global = true)]
    pub demo: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve goals and print their combined performance
    Summary(SessionArgs),

    /// Clear cached snapshots and reload them, once the cooldown has passed
    Refresh(SessionArgs),

    /// Inspect or clear persisted snapshots
    Cache(CacheArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Rendezvous detector for agent check-in logs.
///
/// Reads a CSV of location check-ins and reports which pairs of agents
/// met within a time window of one another, and which of those meetings
/// exchanged the carried item.
#[derive(Debug, Parser)]
#[command(name = "rdz", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rendezvous window in seconds (overrides the configured value).
    #[arg(short = 'w', long, global = true)]
    pub window_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print completed exchanges in chronological order.
    Exchanges(ExchangesArgs),

    /// Print meetings where no exchange took place.
    Skipped(SkippedArgs),

    /// Print which agent holds which item after all exchanges.
    Holdings(HoldingsArgs),
}

/// Arguments for the `exchanges` subcommand.
#[derive(Debug, Args)]
pub struct ExchangesArgs {
    /// CSV file of agent check-ins.
    pub checkins: PathBuf,

    /// Output as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `skipped` subcommand.
#[derive(Debug, Args)]
pub struct SkippedArgs {
    /// CSV file of agent check-ins.
    pub checkins: PathBuf,
}

/// Arguments for the `holdings` subcommand.
#[derive(Debug, Args)]
pub struct HoldingsArgs {
    /// CSV file of agent check-ins.
    pub checkins: PathBuf,

    /// Show only the agent holding this item.
    #[arg(long)]
    pub item: Option<String>,
}

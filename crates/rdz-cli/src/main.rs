use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rdz_cli::commands::{exchanges, holdings, skipped};
use rdz_cli::loader::LoadError;
use rdz_cli::{Cli, Commands, Config, window_duration};
use rdz_core::DataError;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if let Err(err) = run(&cli) {
        report_failure(&err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let window = window_duration(cli.window_secs.unwrap_or(config.window_secs));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Some(Commands::Exchanges(args)) => exchanges::run(&mut out, args, window),
        Some(Commands::Skipped(args)) => skipped::run(&mut out, args, window),
        Some(Commands::Holdings(args)) => holdings::run(&mut out, args, window),
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Prints the failure, keeping the three user-facing categories
/// (unreadable input, malformed row, inconsistent data) distinct.
fn report_failure(err: &anyhow::Error) {
    if let Some(data) = err.downcast_ref::<DataError>() {
        eprintln!("inconsistent check-in data: {data}");
    } else if let Some(load) = err.downcast_ref::<LoadError>() {
        if load.is_resource() {
            eprintln!("error reading check-ins: {load}");
        } else {
            eprintln!("invalid check-ins file: {load}");
        }
    } else {
        eprintln!("error: {err:#}");
    }
}

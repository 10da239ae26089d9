//! Rendezvous detection CLI library.
//!
//! This crate provides the CLI interface for the rendezvous detector.

mod cli;
pub mod commands;
mod config;
pub mod loader;

pub use cli::{Cli, Commands, ExchangesArgs, HoldingsArgs, SkippedArgs};
pub use config::{Config, window_duration};

//! CLI subcommand implementations.

pub mod exchanges;
pub mod holdings;
pub mod skipped;

//! Holdings command: who carries what after all exchanges.
//!
//! Replays the rendezvous in chronological order, swapping the two
//! agents' items whenever an exchange completes (equal container
//! kinds), then reports the resulting manifest.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::Duration;

use crate::HoldingsArgs;
use crate::loader::{self, Manifest};

pub fn run<W: Write>(writer: &mut W, args: &HoldingsArgs, window: Duration) -> Result<()> {
    let (mut manifest, timeline) = loader::load_checkins(&args.checkins)?;

    for result in timeline.rendezvous(window) {
        let (a, b) = result?;
        if a.container == b.container {
            tracing::debug!(a = %a.agent, b = %b.agent, location = %a.location, "exchange");
            swap_items(&mut manifest, &a.agent, &b.agent);
        }
    }

    if let Some(item) = &args.item {
        let Some((agent, _)) = manifest.iter().find(|(_, held)| *held == item) else {
            bail!("no agent holds the {item}");
        };
        writeln!(writer, "{agent} has the {item}")?;
        return Ok(());
    }

    if manifest.is_empty() {
        writeln!(writer, "No items are being carried.")?;
        return Ok(());
    }

    let mut entries: Vec<_> = manifest.iter().collect();
    entries.sort();
    for (agent, item) in entries {
        writeln!(writer, "{agent}: {item}")?;
    }
    Ok(())
}

/// Swaps the manifest entries of two agents. An agent carrying nothing
/// hands over nothing; the counterpart's entry moves across.
fn swap_items(manifest: &mut Manifest, agent_a: &str, agent_b: &str) {
    let item_a = manifest.remove(agent_a);
    let item_b = manifest.remove(agent_b);
    if let Some(item) = item_b {
        manifest.insert(agent_a.to_string(), item);
    }
    if let Some(item) = item_a {
        manifest.insert(agent_b.to_string(), item);
    }
}

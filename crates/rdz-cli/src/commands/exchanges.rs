//! Exchanges command: print completed hand-offs.
//!
//! Two agents who rendezvous with the *same* kind of container can swap
//! them unnoticed, so equal container kinds mean an exchange happened.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::ExchangesArgs;
use crate::loader::{self, Manifest};

/// One completed exchange, for JSON output.
#[derive(Debug, Serialize)]
struct Exchange<'a> {
    agent_a: &'a str,
    agent_b: &'a str,
    item_a: &'a str,
    item_b: &'a str,
    location: &'a str,
    timestamp: DateTime<Utc>,
}

/// Item shown for an agent with no manifest entry.
const NOTHING: &str = "nothing";

pub fn run<W: Write>(writer: &mut W, args: &ExchangesArgs, window: Duration) -> Result<()> {
    let (manifest, timeline) = loader::load_checkins(&args.checkins)?;

    let mut exchanges = Vec::new();
    for result in timeline.rendezvous(window) {
        let (a, b) = result?;
        if a.container != b.container {
            continue;
        }
        exchanges.push(Exchange {
            agent_a: &a.agent,
            agent_b: &b.agent,
            item_a: carried(&manifest, &a.agent),
            item_b: carried(&manifest, &b.agent),
            location: &a.location,
            timestamp: a.timestamp,
        });
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &exchanges)?;
        writeln!(writer)?;
        return Ok(());
    }

    for exchange in &exchanges {
        writeln!(
            writer,
            "{} meets with {} to exchange {} for {}",
            exchange.agent_a, exchange.agent_b, exchange.item_a, exchange.item_b,
        )?;
    }
    Ok(())
}

fn carried<'a>(manifest: &'a Manifest, agent: &str) -> &'a str {
    manifest.get(agent).map_or(NOTHING, String::as_str)
}

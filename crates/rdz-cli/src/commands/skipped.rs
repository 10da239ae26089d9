//! Skipped command: print meetings where no exchange took place.
//!
//! Agents carrying different container kinds cannot swap without being
//! noticed, so those rendezvous come to nothing.

use std::io::Write;

use anyhow::Result;
use chrono::Duration;

use crate::SkippedArgs;
use crate::loader;

pub fn run<W: Write>(writer: &mut W, args: &SkippedArgs, window: Duration) -> Result<()> {
    let (_manifest, timeline) = loader::load_checkins(&args.checkins)?;

    for result in timeline.rendezvous(window) {
        let (a, b) = result?;
        if a.container == b.container {
            continue;
        }
        writeln!(
            writer,
            "{} (with {}) meets with {} (with {}), but nothing happened",
            a.agent, a.container, b.agent, b.container,
        )?;
    }
    Ok(())
}

//! CSV loader for agent check-in logs.
//!
//! Each row carries five ordered columns: agent name, container-kind
//! integer code, location, timestamp, and the item the agent initially
//! carried (empty for none). The fifth column feeds the [`Manifest`];
//! the first four construct a [`CheckIn`] for the [`Timeline`].
//!
//! Any malformed row aborts the whole load. There is no partial-load
//! recovery: a file either loads completely or not at all.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use rdz_core::{CheckIn, CheckInError, ContainerKind, Timeline};

/// Initially carried items, keyed by agent name.
pub type Manifest = HashMap<String, String>;

/// Errors raised while loading a check-ins file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The reader failed below the row level (encoding, mid-read I/O).
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A row did not have the expected five columns.
    #[error("row {line}: expected 5 columns, found {found}")]
    Row { line: u64, found: usize },

    /// A container-kind code was not an integer.
    #[error("row {line}: container kind code {value:?} is not an integer")]
    Code { line: u64, value: String },

    /// A check-in could not be constructed from a row.
    #[error("row {line}: {source}")]
    CheckIn {
        line: u64,
        #[source]
        source: CheckInError,
    },
}

impl LoadError {
    /// Returns true for resource-level failures, as opposed to rows
    /// that were read but could not be understood.
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Loads a check-ins CSV into an ownership manifest and a timeline.
pub fn load_checkins(path: &Path) -> Result<(Manifest, Timeline), LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut manifest = Manifest::new();
    let mut timeline = Timeline::new();
    let mut line: u64 = 0;

    for row in reader.records() {
        let row = row?;
        line += 1;

        if row.len() != 5 {
            return Err(LoadError::Row {
                line,
                found: row.len(),
            });
        }

        let code: u8 = row[1].parse().map_err(|_| LoadError::Code {
            line,
            value: row[1].to_string(),
        })?;
        let container =
            ContainerKind::try_from(code).map_err(|source| LoadError::CheckIn { line, source })?;
        let checkin = CheckIn::new(&row[0], container, &row[2], &row[3])
            .map_err(|source| LoadError::CheckIn { line, source })?;
        timeline.add(checkin);

        // Later rows overwrite earlier ones for the same agent.
        if !row[4].is_empty() {
            manifest.insert(row[0].to_string(), row[4].to_string());
        }
    }

    tracing::debug!(
        checkins = timeline.len(),
        carriers = manifest.len(),
        "loaded check-ins"
    );
    Ok((manifest, timeline))
}

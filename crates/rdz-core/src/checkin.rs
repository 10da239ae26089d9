//! Check-in records: one agent, one location, one instant.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// The kind of container an agent carries, as recorded on check-in.
///
/// Wire format is a small integer code (second column of the check-ins
/// file). Codes outside the known set are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Envelope,
    Satchel,
    Crate,
    Lockbox,
}

impl ContainerKind {
    /// Returns the integer wire code for this kind.
    pub const fn code(self) -> u8 {
        match self {
            Self::Envelope => 1,
            Self::Satchel => 2,
            Self::Crate => 3,
            Self::Lockbox => 4,
        }
    }
}

impl TryFrom<u8> for ContainerKind {
    type Error = CheckInError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Envelope),
            2 => Ok(Self::Satchel),
            3 => Ok(Self::Crate),
            4 => Ok(Self::Lockbox),
            other => Err(CheckInError::ContainerKind(other)),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Envelope => "envelope",
            Self::Satchel => "satchel",
            Self::Crate => "crate",
            Self::Lockbox => "lockbox",
        };
        write!(f, "{s}")
    }
}

/// Errors raised while constructing a [`CheckIn`].
#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    /// The timestamp text could not be parsed.
    #[error("invalid check-in timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// The container-kind code is not in the known set.
    #[error("unknown container kind code: {0}")]
    ContainerKind(u8),
}

/// A single check-in: an agent's presence at a location at an instant.
///
/// Immutable once constructed. Ordering comparisons (`<`, `<=`, `>`,
/// `>=`) consider the timestamp only; equality is whole-value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIn {
    /// Name of the agent who checked in. Not required to be unique.
    pub agent: String,
    /// The kind of container the agent carried.
    pub container: ContainerKind,
    /// Name of the location where the agent checked in.
    pub location: String,
    /// When the check-in happened.
    pub timestamp: DateTime<Utc>,
}

impl CheckIn {
    /// Builds a check-in from its raw parts, parsing the timestamp text.
    ///
    /// Accepts RFC 3339 (`2026-03-01T10:00:00Z`) or a bare
    /// `YYYY-MM-DD HH:MM:SS`, which is taken as UTC.
    pub fn new(
        agent: impl Into<String>,
        container: ContainerKind,
        location: impl Into<String>,
        time: &str,
    ) -> Result<Self, CheckInError> {
        let timestamp = parse_timestamp(time)?;
        Ok(Self {
            agent: agent.into(),
            container,
            location: location.into(),
            timestamp,
        })
    }
}

impl PartialOrd for CheckIn {
    /// Orders check-ins by timestamp alone.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.timestamp.cmp(&other.timestamp))
    }
}

impl fmt::Display for CheckIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checked in at {} with a {} at {}",
            self.agent,
            self.location,
            self.container,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CheckInError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|source| CheckInError::Timestamp {
            value: value.to_string(),
            source,
        })
}

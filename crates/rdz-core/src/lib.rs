//! Core domain logic for rendezvous detection.
//!
//! This crate contains the fundamental types and logic for:
//! - Check-ins: immutable agent/location/time records
//! - Timeline: the chronologically ordered collection of check-ins
//! - Windowing and rendezvous detection over the timeline

pub mod checkin;
pub mod timeline;

pub use checkin::{CheckIn, CheckInError, ContainerKind};
pub use timeline::{DataError, Rendezvous, Timeline, Windows};

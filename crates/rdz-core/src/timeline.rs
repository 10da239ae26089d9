//! Chronological timeline of check-ins and rendezvous detection.
//!
//! # Algorithm Summary
//!
//! 1. [`Timeline::add`] keeps the record list stably sorted by timestamp
//! 2. [`Timeline::windows`] slides an anchor over the sorted list,
//!    yielding the contiguous run of check-ins strictly less than one
//!    window size ahead of the anchor
//! 3. [`Timeline::rendezvous`] reduces each window to the anchor plus
//!    the later members at the anchor's location: one match is a
//!    rendezvous, two or more is inconsistent data

use chrono::{DateTime, Duration, Utc};

use crate::checkin::CheckIn;

/// Raised when a window holds three or more colocated agents.
///
/// The domain assumes at most two agents meet at once, so an oversized
/// group means the input data is semantically broken. This error is
/// terminal: the [`Rendezvous`] iterator that produced it yields
/// nothing further.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{agents} agents at {location} within one window of {timestamp}; at most two may rendezvous")]
pub struct DataError {
    /// The shared location of the oversized group.
    pub location: String,
    /// Timestamp of the window's anchor check-in.
    pub timestamp: DateTime<Utc>,
    /// How many agents were colocated, anchor included.
    pub agents: usize,
}

/// A timeline of check-ins, ordered from least to most recent.
///
/// The record list is re-sorted after every [`add`](Self::add), so
/// iteration always sees non-decreasing timestamps. The sort is stable:
/// check-ins with equal timestamps keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    checkins: Vec<CheckIn>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default rendezvous window: one hour.
    pub fn default_window() -> Duration {
        Duration::hours(1)
    }

    /// Adds a check-in, re-establishing ascending timestamp order.
    pub fn add(&mut self, checkin: CheckIn) {
        self.checkins.push(checkin);
        // Stable, and near-linear when the input arrives mostly sorted.
        self.checkins.sort_by_key(|c| c.timestamp);
    }

    /// Number of check-ins recorded.
    pub fn len(&self) -> usize {
        self.checkins.len()
    }

    /// Returns true if no check-ins have been recorded.
    pub fn is_empty(&self) -> bool {
        self.checkins.is_empty()
    }

    /// Iterates over check-ins in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, CheckIn> {
        self.checkins.iter()
    }

    /// Iterates over time windows, one per check-in.
    ///
    /// The window anchored at a check-in is the contiguous run of
    /// check-ins (anchor included) whose timestamps lie strictly less
    /// than `window_size` after the anchor. Every check-in anchors
    /// exactly one window, so a timeline of *n* records yields *n*
    /// windows, down to single-element windows for trailing records.
    ///
    /// Each call starts a fresh pass over the current timeline state.
    pub fn windows(&self, window_size: Duration) -> Windows<'_> {
        Windows {
            checkins: &self.checkins,
            start: 0,
            window_size,
        }
    }

    /// Iterates over rendezvous: pairs of agents who met at the same
    /// location within `window_size` of one another.
    ///
    /// Each item is `Ok((anchor, other))` in window order. Windows whose
    /// anchor has no colocated partner are skipped. A window with two or
    /// more colocated partners yields `Err(`[`DataError`]`)` and ends
    /// the iteration; pairs already yielded before the failure stand.
    pub fn rendezvous(&self, window_size: Duration) -> Rendezvous<'_> {
        Rendezvous {
            windows: self.windows(window_size),
            failed: false,
        }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a CheckIn;
    type IntoIter = std::slice::Iter<'a, CheckIn>;

    fn into_iter(self) -> Self::IntoIter {
        self.checkins.iter()
    }
}

/// Lazy iterator over the time windows of a [`Timeline`].
///
/// Yields one contiguous slice per check-in, in timeline order.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    checkins: &'a [CheckIn],
    start: usize,
    window_size: Duration,
}

impl<'a> Iterator for Windows<'a> {
    type Item = &'a [CheckIn];

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.checkins.get(self.start)?;
        let mut end = self.start + 1;
        // Sorted input: the first check-in at or past the bound ends
        // the window, and nothing after it can re-enter.
        while let Some(checkin) = self.checkins.get(end) {
            if checkin.timestamp - anchor.timestamp >= self.window_size {
                break;
            }
            end += 1;
        }
        let window = &self.checkins[self.start..end];
        self.start += 1;
        Some(window)
    }
}

/// Lazy iterator over the rendezvous of a [`Timeline`].
///
/// Fuses after yielding a [`DataError`].
#[derive(Debug, Clone)]
pub struct Rendezvous<'a> {
    windows: Windows<'a>,
    failed: bool,
}

impl<'a> Iterator for Rendezvous<'a> {
    type Item = Result<(&'a CheckIn, &'a CheckIn), DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let window = self.windows.next()?;
            // Windows always contain their anchor.
            let Some((anchor, rest)) = window.split_first() else {
                continue;
            };
            let mut colocated = rest.iter().filter(|c| c.location == anchor.location);
            let Some(partner) = colocated.next() else {
                continue;
            };
            let extras = colocated.count();
            if extras > 0 {
                self.failed = true;
                return Some(Err(DataError {
                    location: anchor.location.clone(),
                    timestamp: anchor.timestamp,
                    agents: extras + 2,
                }));
            }
            return Some(Ok((anchor, partner)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::ContainerKind;

    fn at(agent: &str, location: &str, time: &str) -> CheckIn {
        CheckIn::new(agent, ContainerKind::Envelope, location, time).expect("valid check-in")
    }

    fn timeline(checkins: impl IntoIterator<Item = CheckIn>) -> Timeline {
        let mut timeline = Timeline::new();
        for checkin in checkins {
            timeline.add(checkin);
        }
        timeline
    }

    fn hour() -> Duration {
        Timeline::default_window()
    }

    // Scenario 1: two agents at the same place within the hour
    #[test]
    fn two_colocated_agents_rendezvous() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 10:30:00"),
        ]);

        let pairs: Vec<_> = timeline
            .rendezvous(hour())
            .collect::<Result<_, _>>()
            .expect("no data error");
        assert_eq!(pairs.len(), 1);
        let (first, second) = pairs[0];
        assert_eq!(first.agent, "Alice");
        assert_eq!(second.agent, "Bob");
    }

    // Scenario 2: same hour, different places
    #[test]
    fn different_locations_do_not_rendezvous() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Cave", "2026-03-01 10:30:00"),
        ]);

        assert_eq!(timeline.rendezvous(hour()).count(), 0);
    }

    // Scenario 3: three agents colocated within one window
    #[test]
    fn oversized_group_is_a_data_error() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 10:30:00"),
            at("Carol", "Vault", "2026-03-01 10:45:00"),
        ]);

        let mut rendezvous = timeline.rendezvous(hour());
        let err = rendezvous
            .next()
            .expect("one item")
            .expect_err("should be a data error");
        assert_eq!(err.location, "Vault");
        assert_eq!(err.agents, 3);
        assert_eq!(
            err.timestamp,
            at("Alice", "Vault", "2026-03-01 10:00:00").timestamp
        );

        // Terminal: nothing after the failure, not even Bob/Carol's pair.
        assert!(rendezvous.next().is_none());
    }

    // Scenario 4: same place, 90 minutes apart
    #[test]
    fn meetings_outside_the_window_are_ignored() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 11:30:00"),
        ]);

        assert_eq!(timeline.rendezvous(hour()).count(), 0);
    }

    // Scenario 5: empty timeline
    #[test]
    fn empty_timeline_yields_nothing() {
        let timeline = Timeline::new();

        assert!(timeline.is_empty());
        assert_eq!(timeline.windows(hour()).count(), 0);
        assert_eq!(timeline.rendezvous(hour()).count(), 0);
    }

    // Scenario 6: a single check-in
    #[test]
    fn single_checkin_yields_one_window_and_no_pairs() {
        let timeline = timeline([at("Alice", "Vault", "2026-03-01 10:00:00")]);

        let windows: Vec<_> = timeline.windows(hour()).collect();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].len(), 1);
        assert_eq!(timeline.rendezvous(hour()).count(), 0);
    }

    #[test]
    fn add_keeps_timestamps_non_decreasing_regardless_of_insertion_order() {
        let timeline = timeline([
            at("Dana", "Cave", "2026-03-01 13:00:00"),
            at("Alice", "Vault", "2026-03-01 09:00:00"),
            at("Carol", "Pier", "2026-03-01 11:00:00"),
            at("Bob", "Vault", "2026-03-01 10:00:00"),
        ]);

        let times: Vec<_> = timeline.iter().map(|c| c.timestamp).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.add(at("Alice", "Vault", "2026-03-01 10:00:00"));
        timeline.add(at("Bob", "Cave", "2026-03-01 10:00:00"));
        // A later insert of an earlier record must not disturb the tie.
        timeline.add(at("Carol", "Pier", "2026-03-01 09:00:00"));

        let agents: Vec<_> = timeline.iter().map(|c| c.agent.as_str()).collect();
        assert_eq!(agents, ["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn windows_yields_one_window_per_checkin() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 10:30:00"),
            at("Carol", "Cave", "2026-03-01 12:00:00"),
        ]);

        for window_size in [Duration::seconds(1), hour(), Duration::days(2)] {
            assert_eq!(timeline.windows(window_size).count(), timeline.len());
        }
    }

    #[test]
    fn window_members_are_contiguous_and_within_bound() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Cave", "2026-03-01 10:20:00"),
            at("Carol", "Pier", "2026-03-01 10:59:59"),
            at("Dana", "Vault", "2026-03-01 11:00:00"),
        ]);

        let windows: Vec<_> = timeline.windows(hour()).collect();
        for window in &windows {
            let anchor = &window[0];
            for member in *window {
                assert!(member.timestamp >= anchor.timestamp);
                assert!(member.timestamp - anchor.timestamp < hour());
            }
        }

        // Alice's window stops just short of Dana, exactly one hour out.
        let agents: Vec<_> = windows[0].iter().map(|c| c.agent.as_str()).collect();
        assert_eq!(agents, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn window_bound_is_strict() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 11:00:00"),
        ]);

        // Exactly window_size apart: excluded.
        let windows: Vec<_> = timeline.windows(hour()).collect();
        assert_eq!(windows[0].len(), 1);
        assert_eq!(windows[1].len(), 1);
    }

    #[test]
    fn replaying_iterators_yields_identical_results() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 10:00:00"),
            at("Bob", "Vault", "2026-03-01 10:30:00"),
            at("Carol", "Cave", "2026-03-01 10:40:00"),
        ]);

        let first: Vec<Vec<&str>> = timeline
            .windows(hour())
            .map(|w| w.iter().map(|c| c.agent.as_str()).collect())
            .collect();
        let second: Vec<Vec<&str>> = timeline
            .windows(hour())
            .map(|w| w.iter().map(|c| c.agent.as_str()).collect())
            .collect();
        assert_eq!(first, second);

        let pairs = |timeline: &Timeline| -> Vec<(String, String)> {
            timeline
                .rendezvous(hour())
                .map(|r| r.expect("no data error"))
                .map(|(a, b)| (a.agent.clone(), b.agent.clone()))
                .collect()
        };
        assert_eq!(pairs(&timeline), pairs(&timeline));
    }

    #[test]
    fn pairs_before_a_failure_are_still_emitted() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 09:00:00"),
            at("Bob", "Vault", "2026-03-01 09:10:00"),
            at("Carol", "Cave", "2026-03-01 11:00:00"),
            at("Dana", "Cave", "2026-03-01 11:20:00"),
            at("Eve", "Cave", "2026-03-01 11:30:00"),
        ]);

        let mut rendezvous = timeline.rendezvous(hour());

        let (a, b) = rendezvous
            .next()
            .expect("first item")
            .expect("valid first pair");
        assert_eq!((a.agent.as_str(), b.agent.as_str()), ("Alice", "Bob"));

        // Bob's window holds only Bob; skipped. Carol's window fails.
        let err = rendezvous
            .next()
            .expect("second item")
            .expect_err("oversized group at the Cave");
        assert_eq!(err.location, "Cave");
        assert_eq!(err.agents, 3);
        assert!(rendezvous.next().is_none());
    }

    #[test]
    fn colocated_agents_in_later_windows_pair_independently() {
        let timeline = timeline([
            at("Alice", "Vault", "2026-03-01 09:00:00"),
            at("Bob", "Vault", "2026-03-01 09:30:00"),
            at("Carol", "Pier", "2026-03-01 12:00:00"),
            at("Dana", "Pier", "2026-03-01 12:15:00"),
        ]);

        let pairs: Vec<_> = timeline
            .rendezvous(hour())
            .collect::<Result<Vec<_>, _>>()
            .expect("no data error")
            .iter()
            .map(|(a, b)| (a.agent.clone(), b.agent.clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Alice".to_string(), "Bob".to_string()),
                ("Carol".to_string(), "Dana".to_string()),
            ]
        );
    }

    #[test]
    fn default_window_is_one_hour() {
        assert_eq!(Timeline::default_window(), Duration::minutes(60));
    }
}

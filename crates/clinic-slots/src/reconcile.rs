//! Availability reconciliation -- marks candidate slots that are already booked.
//!
//! This is a plain set-membership join. It knows nothing about working hours or
//! breaks, so booking data (which arrives separately from the availability API)
//! never has to be known to the slot generator. Booked slots stay in the output
//! flagged, so the UI can render the full daily grid with taken slots disabled.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock;

/// Start times already reserved on one date.
///
/// Entries that parse as times of day match by time, so `"10:30:00"` books the
/// `10:30` slot. Anything else is kept verbatim and only matches the identical
/// candidate string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct BookingState {
    booked: HashSet<NaiveTime>,
    opaque: HashSet<String>,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw strings returned by the availability API.
    ///
    /// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped. Blank entries are
    /// skipped.
    pub fn from_times<I, S>(times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::default();
        for raw in times {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            match clock::parse_time_lenient(raw) {
                Some(t) => {
                    state.booked.insert(t);
                }
                None => {
                    tracing::debug!(time = raw, "booked entry is not a time, matching verbatim");
                    state.opaque.insert(raw.to_string());
                }
            }
        }
        state
    }

    pub fn insert(&mut self, time: NaiveTime) -> bool {
        self.booked.insert(time)
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.booked.contains(&time)
    }

    /// Membership for a raw candidate string. Never fails: times match by
    /// value, anything else by exact (trimmed) text.
    pub fn contains_str(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        match clock::parse_time_lenient(candidate) {
            Some(t) => self.contains(t),
            None => self.opaque.contains(candidate),
        }
    }

    pub fn len(&self) -> usize {
        self.booked.len() + self.opaque.len()
    }

    pub fn is_empty(&self) -> bool {
        self.booked.is_empty() && self.opaque.is_empty()
    }
}

impl From<Vec<String>> for BookingState {
    fn from(times: Vec<String>) -> Self {
        Self::from_times(times)
    }
}

impl FromIterator<NaiveTime> for BookingState {
    fn from_iter<I: IntoIterator<Item = NaiveTime>>(iter: I) -> Self {
        Self {
            booked: iter.into_iter().collect(),
            opaque: HashSet::new(),
        }
    }
}

/// A candidate slot paired with its booking flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    #[serde(with = "clock::hhmm")]
    pub time: NaiveTime,
    pub is_booked: bool,
}

impl SlotAvailability {
    pub fn is_bookable(&self) -> bool {
        !self.is_booked
    }
}

/// Flag each candidate slot as booked or free, preserving input order and length.
///
/// `candidates` may be generated [`Slot`](crate::Slot)s or bare start times.
pub fn reconcile<I>(candidates: I, booked: &BookingState) -> Vec<SlotAvailability>
where
    I: IntoIterator,
    I::Item: Into<NaiveTime>,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let time: NaiveTime = candidate.into();
            SlotAvailability {
                time,
                is_booked: booked.contains(time),
            }
        })
        .collect()
}

/// Number of slots a patient can still book.
pub fn count_bookable(availability: &[SlotAvailability]) -> usize {
    availability.iter().filter(|s| s.is_bookable()).count()
}

/// A raw candidate string paired with its booking flag.
///
/// Used where candidates arrive as text (the JS bindings) and may not be
/// well-formed times; the string is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAvailability {
    pub time: String,
    pub is_booked: bool,
}

/// [`reconcile`] over raw candidate strings. Total: every candidate comes back,
/// in order, whether or not it parses as a time.
pub fn reconcile_times<I, S>(candidates: I, booked: &BookingState) -> Vec<TimeAvailability>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let time: String = candidate.into();
            let is_booked = booked.contains_str(&time);
            TimeAvailability { time, is_booked }
        })
        .collect()
}

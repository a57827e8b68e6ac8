//! Slot generation -- turns a day's schedule template into bookable start times.
//!
//! Slots are laid on a fixed grid that starts at opening time and advances by
//! the slot duration. A slot that would run past closing time is discarded, and
//! a slot touching the break is dropped whole. Dropping a break slot does not
//! shift the grid: the next candidate still starts one stride later.

use std::fmt;

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

use crate::clock::{self, minutes_since_midnight};
use crate::schedule::DaySchedule;

/// A single bookable unit: a start time and the duration of its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    start: NaiveTime,
    duration_minutes: u32,
}

impl Slot {
    pub fn new(start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the slot. Never past the schedule's `end_time` for generated slots.
    pub fn end(&self) -> NaiveTime {
        self.start + chrono::Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", clock::format_time(self.start))
    }
}

/// Slots serialize as their `HH:MM` start, the shape the booking UI consumes.
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Slot> for NaiveTime {
    fn from(slot: Slot) -> Self {
        slot.start
    }
}

impl From<&Slot> for NaiveTime {
    fn from(slot: &Slot) -> Self {
        slot.start
    }
}

/// Enumerate the bookable slots of one day, in ascending order.
///
/// Returns an empty list when the day is inactive, the window is empty, or the
/// slot duration is zero. The break is the half-open interval
/// `[break.start, break.end)`: a slot is excluded iff
/// `slot_start < break_end && slot_end > break_start`.
pub fn generate_slots(schedule: &DaySchedule) -> Vec<Slot> {
    if !schedule.is_active || schedule.slot_duration == 0 {
        return Vec::new();
    }

    let start = minutes_since_midnight(schedule.start_time);
    let end = minutes_since_midnight(schedule.end_time);
    let duration = schedule.slot_duration;

    let mut slots = Vec::new();
    let mut current = start;

    loop {
        let slot_end = match current.checked_add(duration) {
            Some(slot_end) if slot_end <= end => slot_end,
            _ => break,
        };

        let in_break = schedule
            .break_time
            .is_some_and(|b| b.overlaps(current, slot_end));

        if in_break {
            tracing::trace!(slot_start = current, slot_end, "slot overlaps break, skipped");
        } else if let Some(t) = clock::from_minutes(current) {
            slots.push(Slot::new(t, duration));
        }

        // Fixed stride, even across a skipped break slot.
        current = slot_end;
    }

    tracing::debug!(
        start = %clock::format_time(schedule.start_time),
        end = %clock::format_time(schedule.end_time),
        duration,
        count = slots.len(),
        "generated slots"
    );

    slots
}

/// [`generate_slots`] rendered as zero-padded `HH:MM` strings.
pub fn generate_slot_times(schedule: &DaySchedule) -> Vec<String> {
    generate_slots(schedule)
        .iter()
        .map(Slot::to_string)
        .collect()
}

//! Working-hours templates: one [`DaySchedule`] per weekday, grouped into a
//! [`WeeklySchedule`].
//!
//! Templates arrive as JSON from either local form state or the scheduling API:
//!
//! ```json
//! { "isActive": true, "startTime": "08:00", "endTime": "17:00",
//!   "breakTime": "12:00-13:00", "slotDuration": 30 }
//! ```
//!
//! The legacy `breakTime` string is parsed once here into a [`BreakInterval`];
//! nothing downstream splits strings.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::{self, minutes_since_midnight};
use crate::error::{Result, ScheduleError};
use crate::slots::{generate_slots, Slot};

/// Slot durations (minutes) offered by the schedule editor. The generator
/// accepts any positive duration.
pub const STANDARD_SLOT_DURATIONS: [u32; 5] = [15, 20, 30, 45, 60];

/// A break inside the working day, treated as the half-open interval
/// `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreakInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BreakInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse the `HH:MM-HH:MM` form used by the scheduling API.
    ///
    /// Returns `None` for an empty string and for anything malformed (missing
    /// `-`, non-numeric parts). A bad break never fails the whole schedule; it
    /// degrades to "no break".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let parsed = raw.split_once('-').and_then(|(start, end)| {
            let start = clock::parse_time(start).ok()?;
            let end = clock::parse_time(end).ok()?;
            Some(Self { start, end })
        });

        if parsed.is_none() {
            tracing::debug!(break_time = raw, "malformed break interval, treating as no break");
        }
        parsed
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.end)
    }

    /// Whether the slot `[slot_start, slot_end)` (minutes since midnight)
    /// intersects this break.
    ///
    /// A slot ending exactly at the break start, or starting exactly at the
    /// break end, does not overlap.
    pub fn overlaps(&self, slot_start: u32, slot_end: u32) -> bool {
        slot_start < self.end_minutes() && slot_end > self.start_minutes()
    }

    /// Zero-length breaks (e.g. the `"00:00-00:00"` placeholder) cover no time.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for BreakInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            clock::format_time(self.start),
            clock::format_time(self.end)
        )
    }
}

/// Serde adapter for the optional `breakTime` string.
///
/// Deserialization never fails on content: `null`, `""` and malformed strings
/// all become `None`. `None` serializes as `""`.
mod break_time {
    use super::BreakInterval;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<BreakInterval>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(interval) => serializer.collect_str(interval),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BreakInterval>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(BreakInterval::parse))
    }
}

/// One weekday's working-hours configuration.
///
/// Immutable input to the slot generator; a caller builds one per day of week
/// and drops it once the slot list has been produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Inactive days yield no slots regardless of the other fields.
    pub is_active: bool,
    #[serde(with = "clock::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, with = "break_time")]
    pub break_time: Option<BreakInterval>,
    /// Appointment length in minutes.
    pub slot_duration: u32,
}

impl DaySchedule {
    /// An active day with no break.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, slot_duration: u32) -> Self {
        Self {
            is_active: true,
            start_time,
            end_time,
            break_time: None,
            slot_duration,
        }
    }

    pub fn with_break(mut self, interval: BreakInterval) -> Self {
        self.break_time = Some(interval);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Build a schedule from the raw strings held by an editing form.
    ///
    /// `break_time` follows the lenient rules of [`BreakInterval::parse`].
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTime` if `start_time` or `end_time` is not
    /// a valid `HH:MM` value.
    pub fn parse(
        is_active: bool,
        start_time: &str,
        end_time: &str,
        break_time: &str,
        slot_duration: u32,
    ) -> Result<Self> {
        Ok(Self {
            is_active,
            start_time: clock::parse_time(start_time)?,
            end_time: clock::parse_time(end_time)?,
            break_time: BreakInterval::parse(break_time),
            slot_duration,
        })
    }

    /// Length of the working window in minutes (zero when inverted).
    pub fn window_minutes(&self) -> u32 {
        minutes_since_midnight(self.end_time).saturating_sub(minutes_since_midnight(self.start_time))
    }

    /// Check the configuration rules the schedule editor enforces.
    ///
    /// Inactive days always pass. Zero-length breaks are placeholders and are
    /// not required to sit inside the window.
    ///
    /// # Errors
    /// - `ScheduleError::ZeroSlotDuration` if `slot_duration` is 0.
    /// - `ScheduleError::EmptyWindow` if `start_time >= end_time`.
    /// - `ScheduleError::InvertedBreak` if the break ends before it starts.
    /// - `ScheduleError::BreakOutsideWindow` if the break leaves `[start_time, end_time]`.
    pub fn validate(&self) -> Result<()> {
        if !self.is_active {
            return Ok(());
        }
        if self.slot_duration == 0 {
            return Err(ScheduleError::ZeroSlotDuration);
        }
        if self.start_time >= self.end_time {
            return Err(ScheduleError::EmptyWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if let Some(interval) = self.break_time.filter(|b| !b.is_empty()) {
            if interval.start > interval.end {
                return Err(ScheduleError::InvertedBreak {
                    start: interval.start,
                    end: interval.end,
                });
            }
            if interval.start < self.start_time || interval.end > self.end_time {
                return Err(ScheduleError::BreakOutsideWindow {
                    start: interval.start,
                    end: interval.end,
                });
            }
        }
        Ok(())
    }
}

/// Working-hours templates for a whole week. Missing days are closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    pub monday: Option<DaySchedule>,
    pub tuesday: Option<DaySchedule>,
    pub wednesday: Option<DaySchedule>,
    pub thursday: Option<DaySchedule>,
    pub friday: Option<DaySchedule>,
    pub saturday: Option<DaySchedule>,
    pub sunday: Option<DaySchedule>,
}

impl WeeklySchedule {
    /// Parse a weekly schedule document keyed by lower-case day name.
    ///
    /// # Errors
    /// Returns `ScheduleError::Json` if the document is not valid JSON or a day
    /// record has an unparseable `startTime`/`endTime`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.slot_ref(weekday).as_ref()
    }

    pub fn set_day(&mut self, weekday: Weekday, schedule: DaySchedule) {
        *self.slot_mut(weekday) = Some(schedule);
    }

    /// The template that applies to a calendar date.
    pub fn day_for(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.day(date.weekday())
    }

    /// Candidate slots for a calendar date. Closed days yield an empty list.
    pub fn slots_for(&self, date: NaiveDate) -> Vec<Slot> {
        self.day_for(date).map(generate_slots).unwrap_or_default()
    }

    /// Validate every configured day, reporting the first failure.
    ///
    /// # Errors
    /// Propagates the first error from [`DaySchedule::validate`].
    pub fn validate(&self) -> Result<()> {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
        .into_iter()
        .flatten()
        .try_for_each(DaySchedule::validate)
    }

    fn slot_ref(&self, weekday: Weekday) -> &Option<DaySchedule> {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<DaySchedule> {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

//! Wall-clock helpers: `HH:MM` parsing/formatting and minute arithmetic.
//!
//! All slot arithmetic runs on minutes since midnight (`u32`). `NaiveTime` is
//! only used at the edges, where values are parsed from or rendered to strings.

use chrono::{NaiveTime, Timelike};

use crate::error::{Result, ScheduleError};

/// Format used for every time-of-day string crossing the crate boundary.
pub const HHMM: &str = "%H:%M";

/// Parse a strict `HH:MM` (24-hour) string.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns `ScheduleError::InvalidTime` if the string is not a valid time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), HHMM).map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

/// Parse `HH:MM` or `HH:MM:SS`, truncating to minute precision.
///
/// Booking APIs frequently return times with seconds (`"10:30:00"`); those must
/// still match the `10:30` slot.
pub fn parse_time_lenient(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, HHMM)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
}

/// Render a time as zero-padded `HH:MM`.
pub fn format_time(t: NaiveTime) -> String {
    t.format(HHMM).to_string()
}

pub fn minutes_since_midnight(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Inverse of [`minutes_since_midnight`]. `None` past 23:59.
pub fn from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Serde adapter for `NaiveTime` fields stored as `HH:MM` strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}


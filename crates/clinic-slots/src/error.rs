//! Error types for clinic-slots boundary parsing and validation.
//!
//! The engine functions themselves are total; these errors only surface when a
//! caller parses raw input (schedule JSON, `HH:MM` strings, RUT strings) or asks
//! for a schedule to be validated.

use chrono::NaiveTime;
use thiserror::Error;

/// Errors raised while parsing or validating schedule templates.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A wall-clock value was not a valid `HH:MM` time.
    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    /// The working window is empty or inverted.
    #[error(
        "Start time {} must be before end time {}",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    EmptyWindow { start: NaiveTime, end: NaiveTime },

    /// The slot duration is zero minutes.
    #[error("Slot duration must be a positive number of minutes")]
    ZeroSlotDuration,

    /// The break ends before it starts.
    #[error(
        "Break {}-{} ends before it starts",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    InvertedBreak { start: NaiveTime, end: NaiveTime },

    /// The break is not contained in the working window.
    #[error(
        "Break {}-{} lies outside the working hours",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    BreakOutsideWindow { start: NaiveTime, end: NaiveTime },

    /// The schedule document was not valid JSON for the expected shape.
    #[error("Schedule JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing a RUT.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RutError {
    /// The cleaned input is not 7-8 digits followed by a digit or `K`.
    #[error("Malformed RUT: {0:?}")]
    Malformed(String),

    /// The input is well formed but the check digit does not match the body.
    #[error("RUT check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: char, found: char },
}

/// Convenience alias used throughout clinic-slots.
pub type Result<T> = std::result::Result<T, ScheduleError>;

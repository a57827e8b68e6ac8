//! # clinic-slots
//!
//! Deterministic appointment-slot generation for clinic scheduling.
//!
//! Given a weekly working-hours template, the engine enumerates the bookable
//! slots of a day, reconciles them against the times already booked, and
//! validates the national ID (RUT) patients register with. Every function is
//! pure and synchronous; callers own all I/O.
//!
//! ## Quick start
//!
//! ```rust
//! use clinic_slots::{generate_slot_times, reconcile, BookingState, DaySchedule};
//!
//! let day = DaySchedule::parse(true, "08:00", "17:00", "12:00-13:00", 60).unwrap();
//! let times = generate_slot_times(&day);
//! assert_eq!(times.len(), 8);
//! assert!(!times.contains(&"12:00".to_string()));
//!
//! let slots = clinic_slots::generate_slots(&day);
//! let booked = BookingState::from_times(["10:00"]);
//! let availability = reconcile(&slots, &booked);
//! assert!(availability[2].is_booked);
//!
//! assert!(clinic_slots::is_valid_rut("12.345.678-5"));
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] — `DaySchedule` / `WeeklySchedule` templates and break parsing
//! - [`slots`] — Schedule template → ordered candidate slots
//! - [`reconcile`] — Candidate slots + booked times → per-slot availability
//! - [`rut`] — RUT canonicalization and modulo-11 check-digit validation
//! - [`clock`] — `HH:MM` parsing and minute arithmetic
//! - [`error`] — Error types

pub mod clock;
pub mod error;
pub mod reconcile;
pub mod rut;
pub mod schedule;
pub mod slots;

pub use error::{RutError, ScheduleError};
pub use reconcile::{
    count_bookable, reconcile, reconcile_times, BookingState, SlotAvailability, TimeAvailability,
};
pub use rut::{canonicalize, format_rut, is_valid_rut, Rut};
pub use schedule::{BreakInterval, DaySchedule, WeeklySchedule, STANDARD_SLOT_DURATIONS};
pub use slots::{generate_slot_times, generate_slots, Slot};

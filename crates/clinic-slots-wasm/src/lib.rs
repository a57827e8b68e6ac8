//! WASM bindings for clinic-slots.
//!
//! Exposes slot generation, booking reconciliation and RUT validation to the
//! web client via `wasm-bindgen`. Structured values cross the boundary as JSON
//! strings in the shapes the scheduling API already uses (`DaySchedule`
//! records, `"HH:MM"` arrays, `{time, isBooked}` objects).
//!
//! Each export is a thin wrapper over a `*_json` function that returns
//! `Result<String, String>`, so the JSON plumbing can be exercised natively.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p clinic-slots-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/clinic_slots_wasm.wasm
//! ```

use chrono::NaiveDate;
use clinic_slots::{BookingState, DaySchedule, WeeklySchedule};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON plumbing
// ---------------------------------------------------------------------------

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn parse_day_schedule(json: &str) -> Result<DaySchedule, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid schedule JSON: {}", e))
}

/// Slots of one day as a JSON array of `"HH:MM"` strings.
pub fn generate_slots_json(schedule_json: &str) -> Result<String, String> {
    let schedule = parse_day_schedule(schedule_json)?;
    to_json(&clinic_slots::generate_slot_times(&schedule))
}

/// Slots of a calendar date (`YYYY-MM-DD`) under a weekly schedule.
pub fn weekly_slots_json(weekly_json: &str, date: &str) -> Result<String, String> {
    let week = WeeklySchedule::from_json(weekly_json).map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", date, e))?;
    to_json(&week.slots_for(date))
}

/// `[{time, isBooked}]` for the candidates, flagged against the booked times.
///
/// Only malformed JSON fails. Candidate strings are echoed back as given; ones
/// that are not times of day match booked entries by exact text.
pub fn reconcile_json(candidates_json: &str, booked_json: &str) -> Result<String, String> {
    let candidates: Vec<String> = serde_json::from_str(candidates_json)
        .map_err(|e| format!("Invalid candidates JSON: {}", e))?;
    let booked: BookingState =
        serde_json::from_str(booked_json).map_err(|e| format!("Invalid booked JSON: {}", e))?;
    to_json(&clinic_slots::reconcile_times(candidates, &booked))
}

/// `Ok(())` when the day passes the schedule editor's rules.
pub fn validate_day_schedule_json(schedule_json: &str) -> Result<(), String> {
    parse_day_schedule(schedule_json)?
        .validate()
        .map_err(|e| e.to_string())
}

/// A RUT in `12.345.678-5` form, or the reason it was rejected.
pub fn format_rut_text(input: &str) -> Result<String, String> {
    clinic_slots::format_rut(input).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Enumerate the bookable slots of one day.
///
/// `schedule_json` is a `DaySchedule` record
/// (`{isActive, startTime, endTime, breakTime, slotDuration}`). Returns a JSON
/// array of `"HH:MM"` strings in ascending order.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(schedule_json: &str) -> Result<String, JsValue> {
    generate_slots_json(schedule_json).map_err(|e| JsValue::from_str(&e))
}

/// Enumerate the bookable slots of a calendar date.
///
/// `weekly_json` is an object keyed `monday` … `sunday`; `date` is `YYYY-MM-DD`.
#[wasm_bindgen(js_name = "weeklySlots")]
pub fn weekly_slots(weekly_json: &str, date: &str) -> Result<String, JsValue> {
    weekly_slots_json(weekly_json, date).map_err(|e| JsValue::from_str(&e))
}

/// Flag candidate slots that are already booked.
///
/// Both arguments are JSON arrays of strings. Returns a JSON array of
/// `{time, isBooked}` objects in candidate order; throws only on malformed JSON.
#[wasm_bindgen(js_name = "reconcile")]
pub fn reconcile(candidates_json: &str, booked_json: &str) -> Result<String, JsValue> {
    reconcile_json(candidates_json, booked_json).map_err(|e| JsValue::from_str(&e))
}

/// Check a `DaySchedule` record against the editor's rules. Throws the reason
/// when it fails.
#[wasm_bindgen(js_name = "validateDaySchedule")]
pub fn validate_day_schedule(schedule_json: &str) -> Result<(), JsValue> {
    validate_day_schedule_json(schedule_json).map_err(|e| JsValue::from_str(&e))
}

/// Whether the input is a RUT with a correct check digit. Never throws.
#[wasm_bindgen(js_name = "isValidRut")]
pub fn is_valid_rut(input: &str) -> bool {
    clinic_slots::is_valid_rut(input)
}

/// Format a RUT as `12.345.678-5`. Throws when the input is not a valid RUT.
#[wasm_bindgen(js_name = "formatRut")]
pub fn format_rut(input: &str) -> Result<String, JsValue> {
    format_rut_text(input).map_err(|e| JsValue::from_str(&e))
}

/// Slot durations offered by the schedule editor, in minutes.
#[wasm_bindgen(js_name = "standardSlotDurations")]
pub fn standard_slot_durations() -> Vec<u32> {
    clinic_slots::STANDARD_SLOT_DURATIONS.to_vec()
}

//! Property-based tests for slot generation, reconciliation and RUT validation
//! using proptest.
//!
//! These verify invariants that must hold for *any* schedule template, not just
//! the scenarios in `slots_tests.rs`.

use chrono::NaiveTime;
use clinic_slots::clock::{from_minutes, minutes_since_midnight};
use clinic_slots::rut::compute_check_digit;
use clinic_slots::{
    canonicalize, format_rut, generate_slots, is_valid_rut, reconcile, BookingState,
    BreakInterval, DaySchedule, Rut,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Opening and closing minute with `open < close` inside one day.
fn arb_window() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1380).prop_flat_map(|open| (Just(open), (open + 1)..1440))
}

fn arb_duration() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(15u32),
        Just(20u32),
        Just(30u32),
        Just(45u32),
        Just(60u32),
        1u32..=240,
    ]
}

/// A break fully inside `[open, close]`.
fn arb_break_within(open: u32, close: u32) -> impl Strategy<Value = (u32, u32)> {
    (open..=close).prop_flat_map(move |start| (Just(start), start..=close))
}

fn arb_schedule() -> impl Strategy<Value = DaySchedule> {
    (arb_window(), arb_duration())
        .prop_flat_map(|((open, close), duration)| {
            (
                Just(open),
                Just(close),
                Just(duration),
                proptest::option::of(arb_break_within(open, close)),
            )
        })
        .prop_map(|(open, close, duration, brk)| {
            let mut day = DaySchedule::new(t(open), t(close), duration);
            if let Some((bs, be)) = brk {
                day = day.with_break(BreakInterval::new(t(bs), t(be)));
            }
            day
        })
}

fn t(minutes: u32) -> NaiveTime {
    from_minutes(minutes).unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Without a break, count == floor(window / duration)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn count_matches_window_without_break(
        (open, close) in arb_window(),
        duration in arb_duration(),
    ) {
        let day = DaySchedule::new(t(open), t(close), duration);
        let slots = generate_slots(&day);

        prop_assert_eq!(slots.len() as u32, (close - open) / duration);
    }
}

// ---------------------------------------------------------------------------
// Property 2: No slot ends after closing time, none overlaps the break
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_stay_inside_window_and_out_of_break(day in arb_schedule()) {
        let close = minutes_since_midnight(day.end_time);

        for slot in generate_slots(&day) {
            let start = minutes_since_midnight(slot.start());
            let end = start + slot.duration_minutes();
            prop_assert!(end <= close, "slot {} ends after {}", slot, day.end_time);
            if let Some(b) = day.break_time {
                prop_assert!(!b.overlaps(start, end), "slot {} overlaps break {}", slot, b);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Slots are strictly ascending and on the opening-time grid
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_sorted_on_fixed_grid(day in arb_schedule()) {
        let open = minutes_since_midnight(day.start_time);
        let slots = generate_slots(&day);

        for pair in slots.windows(2) {
            prop_assert!(pair[0].start() < pair[1].start());
        }
        for slot in &slots {
            let offset = minutes_since_midnight(slot.start()) - open;
            prop_assert_eq!(offset % day.slot_duration, 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Inactive days never produce slots
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn inactive_day_is_always_empty(day in arb_schedule()) {
        prop_assert!(generate_slots(&day.inactive()).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Reconciliation preserves length and order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reconcile_preserves_candidates(
        day in arb_schedule(),
        booked_minutes in proptest::collection::vec(0u32..1440, 0..20),
    ) {
        let slots = generate_slots(&day);
        let booked: BookingState = booked_minutes.iter().map(|&m| t(m)).collect();

        let result = reconcile(&slots, &booked);

        prop_assert_eq!(result.len(), slots.len());
        for (availability, slot) in result.iter().zip(&slots) {
            prop_assert_eq!(availability.time, slot.start());
            prop_assert_eq!(availability.is_booked, booked.contains(slot.start()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: RUT validity is stable under canonicalization, and every body
// paired with its computed digit validates
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn rut_validity_is_idempotent_under_canonicalize(input in "[0-9kK .\\-]{0,14}") {
        prop_assert_eq!(is_valid_rut(&input), is_valid_rut(&canonicalize(&input)));
    }

    #[test]
    fn computed_check_digit_always_validates(body in 1_000_000u32..100_000_000) {
        let body = body.to_string();
        let dv = compute_check_digit(&body).unwrap();

        let dashed = format!("{}-{}", body, dv);
        let compact_lower = format!("{}{}", body, dv.to_ascii_lowercase());
        prop_assert!(is_valid_rut(&dashed));
        prop_assert!(is_valid_rut(&compact_lower));
    }
}

// ---------------------------------------------------------------------------
// Property 7: Formatting a valid RUT, zero-padded or not, yields a RUT that
// validates and canonicalizes back to the same digits
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn formatted_rut_round_trips(n in 0u32..100_000_000, width in 7usize..=8) {
        let body = format!("{:0width$}", n, width = width);
        let dv = compute_check_digit(&body).unwrap();
        let input = format!("{}-{}", body, dv);

        let formatted = format_rut(&input).unwrap();
        prop_assert!(is_valid_rut(&formatted), "{} formatted as {}", input, formatted);
        prop_assert_eq!(canonicalize(&formatted), canonicalize(&input));

        let rut: Rut = formatted.parse().unwrap();
        prop_assert_eq!(rut.canonical(), canonicalize(&input));
        prop_assert_eq!(rut.number(), n);
    }
}

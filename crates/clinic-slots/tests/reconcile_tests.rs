//! Tests for reconciling candidate slots against booked times.

use chrono::NaiveTime;
use clinic_slots::{
    count_bookable, generate_slots, reconcile, reconcile_times, BookingState, DaySchedule,
    SlotAvailability, TimeAvailability,
};

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn booked_slot_is_flagged_not_removed() {
    // Candidates 10:00, 10:30; booked {10:30}
    let booked = BookingState::from_times(["10:30"]);

    let result = reconcile(vec![hm(10, 0), hm(10, 30)], &booked);

    assert_eq!(
        result,
        vec![
            SlotAvailability {
                time: hm(10, 0),
                is_booked: false
            },
            SlotAvailability {
                time: hm(10, 30),
                is_booked: true
            },
        ]
    );
}

#[test]
fn generated_slots_feed_straight_in() {
    let day = DaySchedule::parse(true, "08:00", "17:00", "12:00-13:00", 60).unwrap();
    let slots = generate_slots(&day);
    let booked = BookingState::from_times(["09:00", "13:00", "16:00"]);

    let result = reconcile(&slots, &booked);

    assert_eq!(result.len(), slots.len());
    let flagged: Vec<bool> = result.iter().map(|s| s.is_booked).collect();
    assert_eq!(
        flagged,
        vec![false, true, false, false, true, false, false, true]
    );
    assert_eq!(count_bookable(&result), 5);
}

#[test]
fn order_is_preserved_even_when_unsorted() {
    let candidates = vec![hm(15, 0), hm(9, 0), hm(11, 30)];
    let booked = BookingState::from_times(["09:00"]);

    let result = reconcile(candidates.clone(), &booked);

    let times: Vec<NaiveTime> = result.iter().map(|s| s.time).collect();
    assert_eq!(times, candidates);
    assert!(result[1].is_booked);
}

#[test]
fn booked_times_outside_the_grid_are_ignored() {
    // 10:15 is not a candidate; it must not add or remove anything.
    let booked = BookingState::from_times(["10:15", "18:00"]);

    let result = reconcile(vec![hm(10, 0), hm(10, 30)], &booked);

    assert_eq!(result.len(), 2);
    assert_eq!(count_bookable(&result), 2);
}

#[test]
fn api_times_with_seconds_still_match() {
    let booked = BookingState::from_times(vec!["10:30:00".to_string()]);

    assert!(booked.contains(hm(10, 30)));
}

#[test]
fn unparseable_booked_entries_match_only_verbatim() {
    let booked = BookingState::from_times(["10:30", "soon", ""]);

    assert_eq!(booked.len(), 2, "blank entries are dropped");
    assert!(booked.contains_str("soon"));
    assert!(booked.contains_str(" soon "));
    assert!(!booked.contains_str("later"));
    assert!(booked.contains_str("10:30:00"));
}

#[test]
fn string_candidates_reconcile_without_failing() {
    // Candidates with seconds match by time; opaque strings match by text.
    let booked = BookingState::from_times(["10:30:00", "ten"]);
    let candidates = ["10:00", "10:30:00", "ten", "eleven"];

    let result = reconcile_times(candidates, &booked);

    assert_eq!(
        result,
        vec![
            TimeAvailability {
                time: "10:00".to_string(),
                is_booked: false
            },
            TimeAvailability {
                time: "10:30:00".to_string(),
                is_booked: true
            },
            TimeAvailability {
                time: "ten".to_string(),
                is_booked: true
            },
            TimeAvailability {
                time: "eleven".to_string(),
                is_booked: false
            },
        ]
    );
}

#[test]
fn empty_inputs() {
    let booked = BookingState::new();
    assert!(booked.is_empty());
    assert!(reconcile(Vec::<NaiveTime>::new(), &booked).is_empty());

    let result = reconcile(vec![hm(8, 0)], &booked);
    assert!(result[0].is_bookable());
}

#[test]
fn booking_state_collects_from_times() {
    let mut booked: BookingState = [hm(9, 0), hm(9, 0), hm(9, 30)].into_iter().collect();
    assert_eq!(booked.len(), 2);

    assert!(booked.insert(hm(10, 0)));
    assert!(!booked.insert(hm(10, 0)));
}

#[test]
fn booking_state_reads_json_array() {
    let booked: BookingState = serde_json::from_str(r#"["09:00","10:30:00"]"#).unwrap();

    assert!(booked.contains(hm(9, 0)));
    assert!(booked.contains(hm(10, 30)));
}

#[test]
fn availability_serializes_for_the_ui() {
    let booked = BookingState::from_times(["10:30"]);
    let result = reconcile(vec![hm(10, 0), hm(10, 30)], &booked);

    let json = serde_json::to_string(&result).unwrap();

    assert_eq!(
        json,
        r#"[{"time":"10:00","isBooked":false},{"time":"10:30","isBooked":true}]"#
    );
}

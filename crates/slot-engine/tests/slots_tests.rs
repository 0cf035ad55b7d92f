//! Tests for slot generation and slot labels.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use slot_engine::slots::{get_slots, start_of_day, Slot};
use slot_engine::SlotError;

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn labels(slots: &[Slot]) -> Vec<String> {
    slots.iter().map(Slot::label).collect()
}

// ── Boundaries ──────────────────────────────────────────────────────────────

#[test]
fn three_hour_range_yields_six_half_hour_slots() {
    let slots = get_slots(
        at("2014-08-04T09:30:00Z"),
        at("2014-08-04T12:30:00Z"),
        Duration::minutes(30),
    )
    .unwrap();

    assert_eq!(
        labels(&slots),
        vec!["9:30", "10:00", "10:30", "11:00", "11:30", "12:00"]
    );
    // 12:30 marks the end of the range, not a slot start.
    assert!(!slots.contains(&Slot::from(at("2014-08-04T12:30:00Z"))));
}

#[test]
fn slots_are_identified_by_start_instant() {
    let slots = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:30:00Z"),
        Duration::minutes(30),
    )
    .unwrap();

    assert_eq!(
        slots,
        vec![
            Slot::from(at("2014-08-04T09:00:00Z")),
            Slot::from(at("2014-08-04T09:30:00Z")),
            Slot::from(at("2014-08-04T10:00:00Z")),
        ]
    );
}

#[test]
fn empty_range_yields_no_slots() {
    let t = at("2014-08-04T09:00:00Z");
    assert!(get_slots(t, t, Duration::minutes(30)).unwrap().is_empty());
}

#[test]
fn range_shorter_than_half_a_slot_yields_no_slots() {
    let slots = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T09:10:00Z"),
        Duration::minutes(30),
    )
    .unwrap();
    assert!(slots.is_empty());
}

#[test]
fn trailing_fragment_under_half_a_slot_is_dropped() {
    // Last candidate start 10:00 is after 10:10 - 15min = 09:55.
    let slots = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:10:00Z"),
        Duration::minutes(30),
    )
    .unwrap();
    assert_eq!(labels(&slots), vec!["9:00", "9:30"]);
}

#[test]
fn trailing_fragment_of_half_a_slot_starts_a_slot() {
    let slots = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:15:00Z"),
        Duration::minutes(30),
    )
    .unwrap();
    assert_eq!(labels(&slots), vec!["9:00", "9:30", "10:00"]);
}

#[test]
fn one_day_slots_cover_each_day_of_a_week() {
    let start = start_of_day(NaiveDate::from_ymd_opt(2014, 8, 10).unwrap());
    let end = start_of_day(NaiveDate::from_ymd_opt(2014, 8, 17).unwrap());

    let days: Vec<NaiveDate> = get_slots(start, end, Duration::days(1))
        .unwrap()
        .iter()
        .map(Slot::date)
        .collect();

    let expected: Vec<NaiveDate> = (10..=16)
        .map(|d| NaiveDate::from_ymd_opt(2014, 8, d).unwrap())
        .collect();
    assert_eq!(days, expected);
}

#[test]
fn slots_are_strictly_increasing() {
    let slots = get_slots(
        at("2014-08-04T00:00:00Z"),
        at("2014-08-06T00:00:00Z"),
        Duration::minutes(15),
    )
    .unwrap();

    assert_eq!(slots.len(), 2 * 24 * 4);
    for pair in slots.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[1].key() - pair[0].key(), 15 * 60);
    }
}

// ── Preconditions ───────────────────────────────────────────────────────────

#[test]
fn zero_duration_is_rejected() {
    let result = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:00:00Z"),
        Duration::zero(),
    );
    assert!(matches!(result, Err(SlotError::InvalidDuration(_))));
}

#[test]
fn negative_duration_is_rejected() {
    let result = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:00:00Z"),
        Duration::minutes(-30),
    );
    assert!(matches!(result, Err(SlotError::InvalidDuration(_))));
}

#[test]
fn sub_second_duration_is_rejected() {
    let result = get_slots(
        at("2014-08-04T09:00:00Z"),
        at("2014-08-04T10:00:00Z"),
        Duration::milliseconds(1500),
    );
    assert!(matches!(result, Err(SlotError::InvalidDuration(_))));
}

#[test]
fn reversed_range_is_rejected() {
    let start = at("2014-08-04T12:30:00Z");
    let end = at("2014-08-04T09:30:00Z");

    let result = get_slots(start, end, Duration::minutes(30));
    assert_eq!(
        result,
        Err(SlotError::InvalidRange {
            starts_at: start,
            ends_at: end,
        })
    );
}

// ── Slot accessors ──────────────────────────────────────────────────────────

#[test]
fn labels_drop_the_leading_zero_of_the_hour() {
    assert_eq!(Slot::from(at("2014-08-04T00:00:00Z")).label(), "0:00");
    assert_eq!(Slot::from(at("2014-08-04T09:30:00Z")).label(), "9:30");
    assert_eq!(Slot::from(at("2014-08-04T23:00:00Z")).label(), "23:00");
}

#[test]
fn slot_date_is_the_utc_calendar_date() {
    let slot = Slot::from(at("2014-08-04T23:30:00Z"));
    assert_eq!(slot.date(), NaiveDate::from_ymd_opt(2014, 8, 4).unwrap());
}

#[test]
fn slot_keys_ignore_sub_second_precision() {
    let whole = Utc.with_ymd_and_hms(2014, 8, 4, 9, 30, 0).unwrap();
    let fractional = whole + Duration::milliseconds(500);

    assert_eq!(Slot::from(whole), Slot::from(fractional));
    assert_eq!(Slot::from(fractional).starts_at(), whole);
}

#[test]
fn slots_at_the_end_of_the_calendar_keep_their_start() {
    let end = DateTime::<Utc>::MAX_UTC;
    let start = end - Duration::hours(1);

    let slots = get_slots(start, end, Duration::minutes(30)).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].starts_at(), Slot::from(start).starts_at());
    assert_eq!(slots[1].starts_at(), slots[0].starts_at() + Duration::minutes(30));
    for slot in &slots {
        assert_eq!(slot.starts_at().timestamp(), slot.key());
    }
}

//! Scheduler integration tests: day ranges, day filter and slot expansion.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use wikimedic_core::models::Appointment;
use wikimedic_core::schedule::{
    agenda_for_day, appointments_on_day, day_range, dose_slots, dose_times, is_active_on,
    local_date, month_grid, week_from, MonthCursor,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

// ----------------------------------------------------------------------------
// Scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_week_crosses_month_boundary() {
    let week = week_from(date(2024, 3, 30));
    let numbers: Vec<u32> = week.iter().map(|d| d.day_number).collect();
    assert_eq!(numbers, vec![30, 31, 1, 2, 3, 4, 5]);
    assert_eq!(week[0].day_name, "Sáb");
    assert_eq!(week[1].day_name, "Dom");
}

#[test]
fn test_three_day_treatment_middle_day() {
    let appt = Appointment::new("a1", utc(2024, 3, 1, 0, 0), utc(2024, 3, 3, 0, 0), 8);
    assert_eq!(
        dose_times(&appt, date(2024, 3, 2), &Utc),
        vec!["00:00", "08:00", "16:00"]
    );
    assert_eq!(dose_times(&appt, date(2024, 3, 3), &Utc), vec!["00:00"]);
    assert!(dose_times(&appt, date(2024, 3, 4), &Utc).is_empty());
}

#[test]
fn test_day_filter_scenario() {
    let appts = vec![
        Appointment::new("a", utc(2024, 3, 1, 9, 0), utc(2024, 3, 5, 9, 0), 12),
        Appointment::new("b", utc(2024, 3, 6, 9, 0), utc(2024, 3, 8, 9, 0), 12),
        Appointment::new("c", utc(2024, 2, 20, 9, 0), utc(2024, 3, 1, 0, 0), 24),
    ];

    let ids: Vec<&str> = appointments_on_day(&appts, date(2024, 3, 1), &Utc)
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn test_single_dose_when_not_repeating() {
    let appt = Appointment::new("a1", utc(2024, 3, 2, 9, 30), utc(2024, 3, 9, 9, 30), 0);
    assert_eq!(dose_times(&appt, date(2024, 3, 2), &Utc), vec!["09:30"]);
    assert!(dose_times(&appt, date(2024, 3, 3), &Utc).is_empty());
}

#[test]
fn test_labels_follow_caller_zone() {
    let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    // 02:00Z is 23:00 of the previous day in BRT
    let appt = Appointment::new("a1", utc(2024, 3, 2, 2, 0), utc(2024, 3, 3, 2, 0), 12);

    assert_eq!(dose_times(&appt, date(2024, 3, 1), &brt), vec!["23:00"]);
    assert_eq!(dose_times(&appt, date(2024, 3, 2), &brt), vec!["11:00", "23:00"]);
}

#[test]
fn test_agenda_merges_appointments() {
    let appts = vec![
        Appointment::new("b", utc(2024, 3, 2, 6, 0), utc(2024, 3, 2, 22, 0), 12),
        Appointment::new("a", utc(2024, 3, 2, 0, 0), utc(2024, 3, 3, 0, 0), 6),
    ];
    let agenda = agenda_for_day(&appts, date(2024, 3, 2), &Utc);
    let lines: Vec<(String, &str)> = agenda
        .iter()
        .map(|e| (e.slot.label.clone(), e.appointment.id.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("00:00".to_string(), "a"),
            ("06:00".to_string(), "a"),
            ("06:00".to_string(), "b"),
            ("12:00".to_string(), "a"),
            ("18:00".to_string(), "a"),
            ("18:00".to_string(), "b"),
        ]
    );
}

#[test]
fn test_month_grid_leap_february() {
    let grid = month_grid(2024, 2);
    let blanks = grid.iter().take_while(|c| c.is_none()).count();
    assert_eq!(blanks, 4); // 2024-02-01 was a Thursday
    assert_eq!(grid.iter().flatten().count(), 29);
    assert_eq!(MonthCursor::new(2024, 2).unwrap().title(), "Fevereiro 2024");
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
}

fn any_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn any_zone() -> impl Strategy<Value = FixedOffset> {
    (-12 * 60i32..=14 * 60).prop_map(|min| FixedOffset::east_opt(min * 60).unwrap())
}

proptest! {
    #[test]
    fn prop_day_range_is_consecutive(start in any_date(), count in 0usize..60) {
        let days = day_range(start, count);
        prop_assert_eq!(days.len(), count);
        if let Some(first) = days.first() {
            prop_assert_eq!(first.full_date, start);
        }
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1].full_date - pair[0].full_date, Duration::days(1));
        }
    }

    #[test]
    fn prop_filter_is_inclusive_range(
        start in any_instant(),
        span_hours in 0i64..2000,
        probe_offset in -100i64..100,
        tz in any_zone(),
    ) {
        let end = start + Duration::hours(span_hours);
        let appt = Appointment::new("p", start, end, 8);
        let day = local_date(&start, &tz) + Duration::days(probe_offset);

        let expected = local_date(&start, &tz) <= day && day <= local_date(&end, &tz);
        prop_assert_eq!(is_active_on(&appt, day, &tz), expected);
    }

    #[test]
    fn prop_slots_spaced_by_repetition(
        start in any_instant(),
        span_hours in 0i64..500,
        repetition in 1i64..48,
        day_offset in 0i64..25,
        tz in any_zone(),
    ) {
        let appt = Appointment::new("p", start, start + Duration::hours(span_hours), repetition);
        let day = local_date(&start, &tz) + Duration::days(day_offset);
        let slots = dose_slots(&appt, day, &tz);

        for slot in &slots {
            prop_assert_eq!(local_date(&slot.at, &tz), day);
            prop_assert!(slot.at >= appt.start_time && slot.at <= appt.end_time);
            prop_assert_eq!(slot.label.len(), 5);
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[1].at - pair[0].at, Duration::hours(repetition));
        }
    }

    #[test]
    fn prop_expansion_is_idempotent(
        start in any_instant(),
        span_hours in 0i64..200,
        repetition in -5i64..30,
        day_offset in 0i64..10,
    ) {
        let appt = Appointment::new("p", start, start + Duration::hours(span_hours), repetition);
        let day = local_date(&start, &Utc) + Duration::days(day_offset);
        prop_assert_eq!(dose_times(&appt, day, &Utc), dose_times(&appt, day, &Utc));
    }

    #[test]
    fn prop_non_positive_repetition_single_slot(
        start in any_instant(),
        span_hours in 0i64..200,
        repetition in -100i64..=0,
        day_offset in -2i64..3,
    ) {
        let appt = Appointment::new("p", start, start + Duration::hours(span_hours), repetition);
        let day = local_date(&start, &Utc) + Duration::days(day_offset);
        let slots = dose_slots(&appt, day, &Utc);

        prop_assert!(slots.len() <= 1);
        if day_offset == 0 {
            prop_assert_eq!(slots.len(), 1);
            prop_assert_eq!(slots[0].at, start);
        }
    }

    #[test]
    fn prop_inverted_window_yields_nothing(
        end in any_instant(),
        gap_hours in 1i64..200,
        repetition in 1i64..24,
        day_offset in -2i64..10,
    ) {
        let start = end + Duration::hours(gap_hours);
        let appt = Appointment::new("p", start, end, repetition);
        let day = local_date(&end, &Utc) + Duration::days(day_offset);
        prop_assert!(dose_slots(&appt, day, &Utc).is_empty());
    }
}

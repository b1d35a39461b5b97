//! Time-slot expansion.

use std::fmt::Display;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use super::filter::local_date;
use crate::models::Appointment;

/// Format of a slot's time-of-day label.
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// A concrete dose time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseSlot {
    pub at: DateTime<Utc>,
    /// Wall-clock time in the caller's zone, "HH:MM"
    pub label: String,
}

/// Walk the appointment's dose instants from `start_time` while the cursor
/// is not past `end_time`.
///
/// `keep_going` sees each instant and returns `false` to stop early. A
/// non-positive repetition yields the start instant at most once.
fn walk(appointment: &Appointment, mut keep_going: impl FnMut(DateTime<Utc>) -> bool) {
    let step = appointment.interval_hours().and_then(Duration::try_hours);
    let mut cursor = appointment.start_time;

    while cursor <= appointment.end_time {
        if !keep_going(cursor) {
            break;
        }
        let Some(step) = step else {
            break;
        };
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }
}

/// Dose instants falling on `day` in `tz`, ascending.
pub fn slot_instants<Tz: TimeZone>(
    appointment: &Appointment,
    day: NaiveDate,
    tz: &Tz,
) -> Vec<DateTime<Utc>> {
    let mut found = Vec::new();
    walk(appointment, |cursor| {
        let date = local_date(&cursor, tz);
        if date == day {
            found.push(cursor);
        }
        // Instants only move forward; nothing past the target day can match.
        date <= day
    });
    found
}

/// Dose slots on `day`, with labels rendered in `tz`.
pub fn dose_slots<Tz>(appointment: &Appointment, day: NaiveDate, tz: &Tz) -> Vec<DoseSlot>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    slot_instants(appointment, day, tz)
        .into_iter()
        .map(|at| DoseSlot {
            label: at.with_timezone(tz).format(TIME_LABEL_FORMAT).to_string(),
            at,
        })
        .collect()
}

/// Just the "HH:MM" labels of [`dose_slots`].
pub fn dose_times<Tz>(appointment: &Appointment, day: NaiveDate, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dose_slots(appointment, day, tz)
        .into_iter()
        .map(|slot| slot.label)
        .collect()
}

/// Every dose instant whose local date lies in `from..=to`.
pub fn slots_between<Tz: TimeZone>(
    appointment: &Appointment,
    from: NaiveDate,
    to: NaiveDate,
    tz: &Tz,
) -> Vec<DateTime<Utc>> {
    let mut found = Vec::new();
    walk(appointment, |cursor| {
        let date = local_date(&cursor, tz);
        if date >= from && date <= to {
            found.push(cursor);
        }
        date <= to
    });
    found
}

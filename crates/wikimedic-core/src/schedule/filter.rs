//! Appointment-day filter.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::Appointment;

/// Calendar date of an instant in `tz`.
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Whether `day` lies within the appointment's window, both ends truncated
/// to midnight and inclusive.
///
/// An inverted window contains no day.
pub fn is_active_on<Tz: TimeZone>(appointment: &Appointment, day: NaiveDate, tz: &Tz) -> bool {
    let first = local_date(&appointment.start_time, tz);
    let last = local_date(&appointment.end_time, tz);
    day >= first && day <= last
}

/// Appointments active on `day`, in input order.
pub fn appointments_on_day<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appointment| is_active_on(appointment, day, tz))
        .collect()
}

//! Adherence summary: doses taken versus doses scheduled over a period.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{slots_between, MonthCursor};
use crate::models::{Appointment, DoseIntake};

/// Per-appointment adherence over a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdherenceEntry {
    pub appointment_id: String,
    pub medicine_id: Option<String>,
    /// Chart slice color, carried from the appointment
    pub color: String,
    pub scheduled: u32,
    pub taken: u32,
}

impl AdherenceEntry {
    /// Fraction of scheduled doses taken, 0.0 when nothing was scheduled.
    pub fn ratio(&self) -> f64 {
        if self.scheduled == 0 {
            0.0
        } else {
            f64::from(self.taken) / f64::from(self.scheduled)
        }
    }

    /// Legend text, e.g. "10 / 30".
    pub fn label(&self) -> String {
        format!("{} / {}", self.taken, self.scheduled)
    }
}

/// First and last date of a month; `None` only for out-of-range years.
pub fn month_bounds(cursor: MonthCursor) -> Option<(NaiveDate, NaiveDate)> {
    Some((cursor.first_day()?, cursor.last_day()?))
}

/// UTC instants spanning the local dates `from..=to` in `tz`, both ends
/// inclusive.
pub fn utc_window<Tz: TimeZone>(
    from: NaiveDate,
    to: NaiveDate,
    tz: &Tz,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz
        .from_local_datetime(&from.and_time(NaiveTime::MIN))
        .earliest()?;
    let after = tz
        .from_local_datetime(&to.succ_opt()?.and_time(NaiveTime::MIN))
        .earliest()?;
    let end = after
        .with_timezone(&Utc)
        .checked_sub_signed(Duration::nanoseconds(1))?;
    Some((start.with_timezone(&Utc), end))
}

/// Adherence for every appointment with at least one dose in `from..=to`.
///
/// Intakes count only when they match a scheduled slot of the same
/// appointment; duplicate confirmations of one slot count once.
pub fn adherence_summary<Tz: TimeZone>(
    appointments: &[Appointment],
    intakes: &[DoseIntake],
    from: NaiveDate,
    to: NaiveDate,
    tz: &Tz,
) -> Vec<AdherenceEntry> {
    appointments
        .iter()
        .filter_map(|appointment| {
            let slots: HashSet<DateTime<Utc>> =
                slots_between(appointment, from, to, tz).into_iter().collect();
            if slots.is_empty() {
                return None;
            }

            let taken: HashSet<DateTime<Utc>> = intakes
                .iter()
                .filter(|intake| intake.appointment_id == appointment.id)
                .map(|intake| intake.scheduled_at)
                .filter(|at| slots.contains(at))
                .collect();

            Some(AdherenceEntry {
                appointment_id: appointment.id.clone(),
                medicine_id: appointment.medicine_id.clone(),
                color: appointment.color.clone(),
                scheduled: slots.len() as u32,
                taken: taken.len() as u32,
            })
        })
        .collect()
}

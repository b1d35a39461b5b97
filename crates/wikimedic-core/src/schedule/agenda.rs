//! Day agenda: filtered appointments expanded into a single time-ordered list.

use std::fmt::Display;

use chrono::{NaiveDate, TimeZone};

use super::{appointments_on_day, dose_slots, DoseSlot};
use crate::models::Appointment;

/// One line of the agenda: a dose of a given appointment at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry<'a> {
    pub appointment: &'a Appointment,
    pub slot: DoseSlot,
}

/// All doses on `day`, ordered by time then appointment id.
///
/// Empty means "nothing scheduled", not an error.
pub fn agenda_for_day<'a, Tz>(
    appointments: &'a [Appointment],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<AgendaEntry<'a>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut entries: Vec<AgendaEntry<'a>> = appointments_on_day(appointments, day, tz)
        .into_iter()
        .flat_map(|appointment| {
            dose_slots(appointment, day, tz)
                .into_iter()
                .map(move |slot| AgendaEntry { appointment, slot })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.slot
            .at
            .cmp(&b.slot.at)
            .then_with(|| a.appointment.id.cmp(&b.appointment.id))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_interleaves_appointments_by_time() {
        let list = vec![
            Appointment::new("dipirona", at(2024, 3, 2, 6), at(2024, 3, 2, 23), 6),
            Appointment::new("amoxil", at(2024, 3, 1, 8), at(2024, 3, 5, 8), 8),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        let agenda = agenda_for_day(&list, day, &Utc);
        let lines: Vec<_> = agenda
            .iter()
            .map(|e| (e.slot.label.as_str(), e.appointment.id.as_str()))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("00:00", "amoxil"),
                ("06:00", "dipirona"),
                ("08:00", "amoxil"),
                ("12:00", "dipirona"),
                ("16:00", "amoxil"),
                ("18:00", "dipirona"),
            ]
        );
    }

    #[test]
    fn test_nothing_scheduled() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert!(agenda_for_day(&[], day, &Utc).is_empty());
    }
}

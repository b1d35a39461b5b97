//! New-appointment form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use super::{required, FormError, FormResult};
use crate::api::{AppointmentPayload, CreateAppointmentRequest};
use crate::models::{Medicine, REPEAT_UNIT_HOURS};

/// Reminder color palette.
pub const AVAILABLE_COLORS: [&str; 8] = [
    "#FF4D4D", "#FFB347", "#FFFF66", "#66FF66", "#4DFFFF", "#4D4DFF", "#E04DFF", "#FFCC00",
];

pub const DEFAULT_COLOR: &str = AVAILABLE_COLORS[5];
pub const DEFAULT_DOSAGE_UNIT: &str = "cp";
pub const DEFAULT_INTERVAL_HOURS: i64 = 8;
pub const MIN_INTERVAL_HOURS: i64 = 1;
pub const MAX_INTERVAL_HOURS: i64 = 24;

/// Editable state of the new-appointment form.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub medicine_name: String,
    /// Set only when a suggestion was picked
    pub medicine_id: Option<String>,
    /// Raw text of the quantity input
    pub amount: String,
    pub dosage_unit: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub interval_hours: i64,
    /// "Continuous treatment" checkbox; sent as `all_days`
    pub treatment: bool,
    pub color: String,
}

impl AppointmentDraft {
    /// Fresh form: today for both dates, the current minute for both times.
    pub fn new(today: NaiveDate, now: NaiveTime) -> Self {
        let now = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
        Self {
            medicine_name: String::new(),
            medicine_id: None,
            amount: "1".to_string(),
            dosage_unit: DEFAULT_DOSAGE_UNIT.to_string(),
            start_date: today,
            start_time: now,
            end_date: today,
            end_time: now,
            interval_hours: DEFAULT_INTERVAL_HOURS,
            treatment: false,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Typing in the name box drops any previously picked medicine.
    pub fn set_medicine_name(&mut self, text: &str) {
        self.medicine_name = text.to_string();
        self.medicine_id = None;
    }

    pub fn select_medicine(&mut self, medicine: &Medicine) {
        self.medicine_name = medicine.commercial_name.clone();
        self.medicine_id = Some(medicine.id.clone());
    }

    pub fn set_interval(&mut self, hours: i64) {
        self.interval_hours = hours.clamp(MIN_INTERVAL_HOURS, MAX_INTERVAL_HOURS);
    }

    pub fn increment_interval(&mut self) {
        self.set_interval(self.interval_hours + 1);
    }

    pub fn decrement_interval(&mut self) {
        self.set_interval(self.interval_hours - 1);
    }

    /// Pick a palette color; colors outside the palette are ignored.
    pub fn select_color(&mut self, color: &str) -> bool {
        match AVAILABLE_COLORS.iter().find(|c| c.eq_ignore_ascii_case(color)) {
            Some(c) => {
                self.color = c.to_string();
                true
            }
            None => false,
        }
    }

    /// Parsed quantity; accepts a comma as decimal separator.
    pub fn parsed_amount(&self) -> FormResult<f64> {
        let raw = required(&self.amount, "amount")?;
        let value: f64 = raw
            .replace(',', ".")
            .parse()
            .map_err(|_| FormError::InvalidAmount(raw.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(FormError::InvalidAmount(raw.to_string()));
        }
        Ok(value)
    }

    /// Check required fields in the order the form shows them.
    pub fn validate(&self) -> FormResult<()> {
        required(&self.medicine_name, "medicine_name")?;
        required(&self.amount, "amount")?;
        required(&self.dosage_unit, "dosage_unit")?;
        self.parsed_amount()?;
        Ok(())
    }

    /// Build the create payload, composing dates and times in `tz`.
    pub fn compose<Tz: TimeZone>(
        &self,
        user_id: Option<&str>,
        tz: &Tz,
    ) -> FormResult<CreateAppointmentRequest> {
        self.validate()?;
        let amount = self.parsed_amount()?;
        let start_time = to_utc(self.start_date.and_time(self.start_time), tz)?;
        let end_time = to_utc(self.end_date.and_time(self.end_time), tz)?;

        Ok(CreateAppointmentRequest {
            appointment: AppointmentPayload {
                all_days: self.treatment,
                start_time,
                end_time,
                repetition: self.interval_hours,
                repeat_unit: REPEAT_UNIT_HOURS.to_string(),
                amount,
                dosage_unit: self.dosage_unit.trim().to_string(),
                color: self.color.clone(),
                user_id: user_id.unwrap_or_default().to_string(),
                medicine_id: self.medicine_id.clone().unwrap_or_default(),
            },
        })
    }
}

/// Resolve a wall-clock time in `tz`; on a DST overlap the earlier instant wins.
fn to_utc<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> FormResult<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| FormError::InvalidTimestamp(local.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn draft() -> AppointmentDraft {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let now = NaiveTime::from_hms_opt(8, 0, 42).unwrap();
        let mut draft = AppointmentDraft::new(today, now);
        draft.set_medicine_name("Dipirona");
        draft.end_date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        draft
    }

    #[test]
    fn test_defaults() {
        let d = draft();
        assert_eq!(d.amount, "1");
        assert_eq!(d.dosage_unit, "cp");
        assert_eq!(d.interval_hours, 8);
        assert_eq!(d.color, "#4D4DFF");
        assert_eq!(d.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_compose_payload() {
        let mut d = draft();
        d.amount = "2,5".into();
        d.treatment = true;
        let medicine = Medicine {
            id: "med-7".into(),
            commercial_name: "Dipirona 500mg".into(),
            description: String::new(),
            image: None,
            categories: vec![],
        };
        d.select_medicine(&medicine);

        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let request = d.compose(Some("42"), &brt).unwrap();
        let p = &request.appointment;

        assert_eq!(p.start_time, Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap());
        assert_eq!(p.end_time, Utc.with_ymd_and_hms(2024, 3, 3, 11, 0, 0).unwrap());
        assert_eq!(p.amount, 2.5);
        assert_eq!(p.repeat_unit, "HOURS");
        assert_eq!(p.repetition, 8);
        assert!(p.all_days);
        assert_eq!(p.user_id, "42");
        assert_eq!(p.medicine_id, "med-7");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["appointment"]["start_time"], "2024-03-01T11:00:00Z");
    }

    #[test]
    fn test_typing_clears_selected_medicine() {
        let mut d = draft();
        d.medicine_id = Some("med-7".into());
        d.set_medicine_name("Dip");
        assert_eq!(d.medicine_id, None);

        let request = d.compose(None, &Utc).unwrap();
        assert_eq!(request.appointment.medicine_id, "");
        assert_eq!(request.appointment.user_id, "");
    }

    #[test]
    fn test_validation_errors() {
        let mut d = draft();
        d.set_medicine_name("   ");
        assert_eq!(d.validate(), Err(FormError::MissingField("medicine_name")));

        let mut d = draft();
        d.dosage_unit = String::new();
        assert_eq!(d.validate(), Err(FormError::MissingField("dosage_unit")));

        let mut d = draft();
        d.amount = "abc".into();
        assert_eq!(d.validate(), Err(FormError::InvalidAmount("abc".into())));

        d.amount = "0".into();
        assert!(matches!(d.validate(), Err(FormError::InvalidAmount(_))));
    }

    #[test]
    fn test_interval_stepper_clamps() {
        let mut d = draft();
        d.set_interval(1);
        d.decrement_interval();
        assert_eq!(d.interval_hours, 1);
        d.set_interval(24);
        d.increment_interval();
        assert_eq!(d.interval_hours, 24);
        d.set_interval(-5);
        assert_eq!(d.interval_hours, 1);
    }

    #[test]
    fn test_color_palette_only() {
        let mut d = draft();
        assert!(d.select_color("#ff4d4d"));
        assert_eq!(d.color, "#FF4D4D");
        assert!(!d.select_color("#000000"));
        assert_eq!(d.color, "#FF4D4D");
    }
}

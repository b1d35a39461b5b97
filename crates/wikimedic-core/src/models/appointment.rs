//! Treatment (appointment) records as served by the remote API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{id_from_string_or_number, optional_id};

/// Only repeat unit the service understands.
pub const REPEAT_UNIT_HOURS: &str = "HOURS";

fn default_repeat_unit() -> String {
    REPEAT_UNIT_HOURS.to_string()
}

/// A scheduled recurring medication record.
///
/// Owned by the remote service; the client only ever holds a read-only copy
/// that is replaced wholesale on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Opaque identifier
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// First dose instant
    pub start_time: DateTime<Utc>,
    /// Last instant a dose may fall on
    pub end_time: DateTime<Utc>,
    /// Hours between doses; zero or negative means a single dose
    #[serde(default)]
    pub repetition: i64,
    /// Unit of `repetition`, always "HOURS" in practice
    #[serde(default = "default_repeat_unit")]
    pub repeat_unit: String,
    /// Quantity per dose (display only)
    #[serde(default)]
    pub amount: f64,
    /// Unit of `amount`, e.g. "cp", "ml" (display only)
    #[serde(default)]
    pub dosage_unit: String,
    /// Referenced medicine
    #[serde(default, deserialize_with = "optional_id")]
    pub medicine_id: Option<String>,
    /// Display tag (hex or named color)
    #[serde(default)]
    pub color: String,
    /// Continuous treatment flag; informational only
    #[serde(default)]
    pub all_days: bool,
    /// Owning user
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    /// Free text entered on creation
    #[serde(default)]
    pub description: Option<String>,
}

impl Appointment {
    /// Create an appointment with the fields the scheduler needs.
    pub fn new(
        id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        repetition: i64,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            repetition,
            repeat_unit: default_repeat_unit(),
            amount: 1.0,
            dosage_unit: String::new(),
            medicine_id: None,
            color: String::new(),
            all_days: false,
            user_id: None,
            description: None,
        }
    }

    /// Whether the active window is non-inverted.
    pub fn is_well_formed(&self) -> bool {
        self.start_time <= self.end_time
    }

    /// Step between doses, if the treatment repeats at all.
    pub fn interval_hours(&self) -> Option<i64> {
        (self.repetition > 0).then_some(self.repetition)
    }

    /// Human readable dose, e.g. "3 cp" or "2.5 ml".
    pub fn dose_label(&self) -> String {
        let amount = if self.amount.fract() == 0.0 {
            format!("{}", self.amount as i64)
        } else {
            format!("{}", self.amount)
        };
        if self.dosage_unit.is_empty() {
            amount
        } else {
            format!("{} {}", amount, self.dosage_unit)
        }
    }
}

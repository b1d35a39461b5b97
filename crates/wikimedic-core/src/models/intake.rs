//! Local dose intake log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record that the dose scheduled at `scheduled_at` was taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseIntake {
    /// Local UUID
    pub intake_id: String,
    /// Appointment the slot belongs to
    pub appointment_id: String,
    /// Slot instant, as produced by the slot expander
    pub scheduled_at: DateTime<Utc>,
    /// When the user confirmed the dose
    pub taken_at: DateTime<Utc>,
}

impl DoseIntake {
    /// New intake confirmed now.
    pub fn new(appointment_id: String, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            intake_id: uuid::Uuid::new_v4().to_string(),
            appointment_id,
            scheduled_at,
            taken_at: Utc::now(),
        }
    }
}

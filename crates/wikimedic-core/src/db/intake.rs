//! Dose intake log operations.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::DoseIntake;

/// Fixed-width nanosecond text, so lexical order matches time order and
/// stored slots compare equal to freshly expanded ones.
fn encode(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp(raw.to_string()))
}

type IntakeRow = (String, String, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<IntakeRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_intake((intake_id, appointment_id, scheduled_at, taken_at): IntakeRow) -> DbResult<DoseIntake> {
    Ok(DoseIntake {
        intake_id,
        appointment_id,
        scheduled_at: decode(&scheduled_at)?,
        taken_at: decode(&taken_at)?,
    })
}

impl Database {
    /// Record a taken dose. A slot is logged once; recording it again
    /// returns the existing entry.
    pub fn record_intake(&self, intake: &DoseIntake) -> DbResult<DoseIntake> {
        let scheduled_at = encode(&intake.scheduled_at);
        let inserted = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO dose_intakes (intake_id, appointment_id, scheduled_at, taken_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                intake.intake_id,
                intake.appointment_id,
                scheduled_at,
                encode(&intake.taken_at),
            ],
        )?;

        if inserted == 0 {
            tracing::debug!(
                appointment_id = %intake.appointment_id,
                scheduled_at = %scheduled_at,
                "intake already recorded"
            );
        }

        self.get_intake_for_slot(&intake.appointment_id, &intake.scheduled_at)?
            .ok_or_else(|| DbError::NotFound(intake.intake_id.clone()))
    }

    pub fn get_intake_for_slot(
        &self,
        appointment_id: &str,
        scheduled_at: &DateTime<Utc>,
    ) -> DbResult<Option<DoseIntake>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT intake_id, appointment_id, scheduled_at, taken_at
                FROM dose_intakes
                WHERE appointment_id = ? AND scheduled_at = ?
                "#,
                params![appointment_id, encode(scheduled_at)],
                read_row,
            )
            .optional()?;
        row.map(into_intake).transpose()
    }

    /// All intakes of one appointment, oldest slot first.
    pub fn list_intakes_for_appointment(&self, appointment_id: &str) -> DbResult<Vec<DoseIntake>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT intake_id, appointment_id, scheduled_at, taken_at
            FROM dose_intakes
            WHERE appointment_id = ?
            ORDER BY scheduled_at
            "#,
        )?;
        let rows = stmt
            .query_map([appointment_id], read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_intake).collect()
    }

    /// Intakes whose slot lies in `from..=to`.
    pub fn list_intakes_between(
        &self,
        from: &DateTime<Utc>,
        to: &DateTime<Utc>,
    ) -> DbResult<Vec<DoseIntake>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT intake_id, appointment_id, scheduled_at, taken_at
            FROM dose_intakes
            WHERE scheduled_at >= ? AND scheduled_at <= ?
            ORDER BY scheduled_at, appointment_id
            "#,
        )?;
        let rows = stmt
            .query_map(params![encode(from), encode(to)], read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_intake).collect()
    }

    /// Undo a confirmation.
    pub fn delete_intake(&self, intake_id: &str) -> DbResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM dose_intakes WHERE intake_id = ?", [intake_id])?;
        Ok(rows > 0)
    }
}

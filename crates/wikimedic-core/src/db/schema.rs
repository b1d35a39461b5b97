//! SQLite schema definition.

/// Complete database schema for the WikiMedic core.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key/value storage (session user, favorites)
-- ============================================================================

CREATE TABLE IF NOT EXISTS key_value (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON document
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Dose intake log
-- ============================================================================

CREATE TABLE IF NOT EXISTS dose_intakes (
    intake_id TEXT PRIMARY KEY,
    appointment_id TEXT NOT NULL,
    scheduled_at TEXT NOT NULL,                   -- RFC 3339, UTC, nanosecond precision
    taken_at TEXT NOT NULL,
    UNIQUE (appointment_id, scheduled_at)
);

CREATE INDEX IF NOT EXISTS idx_intakes_scheduled ON dose_intakes(scheduled_at);
"#;

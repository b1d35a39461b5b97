//! Recurring dosage scheduler.
//!
//! Pipeline used by the agenda and new-appointment screens:
//!
//! ```text
//! Day-Range Generator ──► selected day ──► Appointment-Day Filter ──► Time-Slot Expander
//!   (week strip / month grid)                (inclusive date range)      (walk start..=end by r hours)
//! ```
//!
//! Everything here is pure: inputs are borrowed, outputs are fresh values,
//! nothing fails. Malformed records (inverted window, non-positive
//! repetition) degrade to empty or single-slot results.
//!
//! Instants are `DateTime<Utc>`; "which day" and "what time" are answered in
//! the caller's zone.

mod adherence;
mod agenda;
mod days;
mod filter;
mod slots;

pub use adherence::*;
pub use agenda::*;
pub use days::*;
pub use filter::*;
pub use slots::*;

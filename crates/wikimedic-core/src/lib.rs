//! WikiMedic Core Library
//!
//! Shared logic behind the WikiMedic medication app: the recurring dosage
//! scheduler, form composition for the remote API, and on-device state.
//!
//! # Architecture
//!
//! ```text
//!   appointments (API)           today / selected month
//!          │                              │
//!          │                     ┌────────▼────────┐
//!          │                     │  Day generator  │  week strip, month grid
//!          │                     └────────┬────────┘
//!          │                              │ selected day
//!          └──────────────┬───────────────┘
//!                ┌────────▼────────┐
//!                │   Day filter    │  start ≤ day ≤ end (local dates)
//!                └────────┬────────┘
//!                ┌────────▼────────┐
//!                │  Slot expander  │  "00:00", "08:00", "16:00"
//!                └────────┬────────┘
//!                   agenda │ adherence (+ local intake log)
//! ```
//!
//! The shells own HTTP and rendering. They hand response bodies in and get
//! request bodies and display-ready records out.
//!
//! # Modules
//!
//! - [`schedule`]: day ranges, appointment filter, slot expansion, agenda, adherence
//! - [`models`]: Domain types (Appointment, Medicine, User, DoseIntake)
//! - [`api`]: Endpoint paths and response parsing
//! - [`forms`]: Appointment, sign-up and profile forms
//! - [`search`]: Medicine suggestions
//! - [`context`]: Session and favorites
//! - [`db`]: SQLite storage
//! - [`config`]: Core configuration

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod forms;
pub mod models;
pub mod schedule;
pub mod search;

// Re-export commonly used types
pub use config::CoreConfig;
pub use context::{FavoritesContext, SessionContext};
pub use db::Database;
pub use models::{
    Appointment, DoseIntake, FavoriteMedicine, Medicine, MedicineCategory, MedicineDetail, User,
    UserProfile,
};
pub use schedule::{
    agenda_for_day, appointments_on_day, day_range, dose_times, month_grid, week_from,
    DayDescriptor, MonthCursor,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WikiMedicError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for WikiMedicError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => WikiMedicError::NotFound(what),
            other => WikiMedicError::DatabaseError(other.to_string()),
        }
    }
}

impl From<api::ApiError> for WikiMedicError {
    fn from(e: api::ApiError) -> Self {
        match e {
            api::ApiError::Json(err) => WikiMedicError::SerializationError(err.to_string()),
            server @ api::ApiError::Server { .. } => WikiMedicError::ServerError(server.to_string()),
        }
    }
}

impl From<forms::FormError> for WikiMedicError {
    fn from(e: forms::FormError) -> Self {
        WikiMedicError::ValidationError(e.to_string())
    }
}

impl From<config::ConfigError> for WikiMedicError {
    fn from(e: config::ConfigError) -> Self {
        WikiMedicError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for WikiMedicError {
    fn from(e: serde_json::Error) -> Self {
        WikiMedicError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for WikiMedicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        WikiMedicError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Input parsing
// =========================================================================

/// Zone of the device, given as minutes east of UTC.
fn zone(offset_minutes: i32) -> Result<FixedOffset, WikiMedicError> {
    offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            WikiMedicError::InvalidInput(format!("UTC offset out of range: {} min", offset_minutes))
        })
}

fn parse_date(value: &str) -> Result<NaiveDate, WikiMedicError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| WikiMedicError::InvalidInput(format!("expected YYYY-MM-DD, got {:?}", value)))
}

fn parse_time(value: &str) -> Result<NaiveTime, WikiMedicError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| WikiMedicError::InvalidInput(format!("expected HH:MM, got {:?}", value)))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, WikiMedicError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| WikiMedicError::InvalidInput(format!("expected RFC 3339, got {:?}", value)))
}

fn to_appointments(items: Vec<FfiAppointment>) -> Result<Vec<Appointment>, WikiMedicError> {
    items.into_iter().map(Appointment::try_from).collect()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

fn build_core(db: Database, config_json: Option<String>) -> Result<Arc<WikiMedicCore>, WikiMedicError> {
    let config = match config_json {
        Some(json) => CoreConfig::from_json(&json)?,
        None => CoreConfig::default(),
    };
    Ok(Arc::new(WikiMedicCore {
        db: Arc::new(Mutex::new(db)),
        config,
    }))
}

/// Open or create a database at the given path.
///
/// `config_json` overrides the defaults; missing fields keep their default.
#[uniffi::export]
pub fn open_database(
    path: String,
    config_json: Option<String>,
) -> Result<Arc<WikiMedicCore>, WikiMedicError> {
    let db = Database::open(&path)?;
    build_core(db, config_json)
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<WikiMedicCore>, WikiMedicError> {
    let db = Database::open_in_memory()?;
    build_core(db, None)
}

// =========================================================================
// Calendar Functions (exported to FFI)
// =========================================================================

/// Seven consecutive days starting at `today` (YYYY-MM-DD).
#[uniffi::export]
pub fn week_days(today: String) -> Result<Vec<FfiDay>, WikiMedicError> {
    let today = parse_date(&today)?;
    Ok(week_from(today).into_iter().map(Into::into).collect())
}

/// Today's date in the device zone.
#[uniffi::export]
pub fn today(offset_minutes: i32) -> Result<String, WikiMedicError> {
    let tz = zone(offset_minutes)?;
    Ok(schedule::today_in(&tz).format("%Y-%m-%d").to_string())
}

/// Month calendar cells; `None` cells are leading blanks before day 1.
#[uniffi::export]
pub fn month_calendar(year: i32, month: u32) -> Vec<Option<FfiDay>> {
    month_grid(year, month)
        .into_iter()
        .map(|cell| cell.map(Into::into))
        .collect()
}

/// Move `delta` months from the given one.
#[uniffi::export]
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<FfiMonth, WikiMedicError> {
    let cursor = MonthCursor::new(year, month)
        .ok_or_else(|| WikiMedicError::InvalidInput(format!("no such month: {}", month)))?;
    cursor
        .shift(delta)
        .map(Into::into)
        .ok_or_else(|| WikiMedicError::InvalidInput(format!("month shift out of range: {}", delta)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe core for FFI.
#[derive(uniffi::Object)]
pub struct WikiMedicCore {
    db: Arc<Mutex<Database>>,
    config: CoreConfig,
}

#[uniffi::export]
impl WikiMedicCore {
    // =========================================================================
    // API Contract
    // =========================================================================

    pub fn api_settings(&self) -> FfiApiSettings {
        FfiApiSettings {
            base_url: self.config.api.base_url.clone(),
            timeout_ms: self.config.api.timeout_ms,
            medicine_page_size: self.config.api.medicine_page_size,
        }
    }

    /// Method and absolute URL for an endpoint.
    pub fn request_target(&self, endpoint: FfiEndpoint) -> FfiRequestTarget {
        let endpoint: api::Endpoint = endpoint.into();
        FfiRequestTarget {
            method: endpoint.method().as_str().to_string(),
            url: self.config.api.url(&endpoint),
        }
    }

    /// Turn a non-2xx response into an error carrying the body.
    pub fn check_response(&self, status: u16, body: String) -> Result<(), WikiMedicError> {
        api::check_status(status, &body)?;
        Ok(())
    }

    // =========================================================================
    // Medicine Operations
    // =========================================================================

    pub fn parse_medicines(&self, body: String) -> Result<Vec<FfiMedicine>, WikiMedicError> {
        let medicines = api::parse_medicines(&body)?;
        Ok(medicines.into_iter().map(Into::into).collect())
    }

    pub fn parse_medicine_detail(&self, body: String) -> Result<FfiMedicineDetail, WikiMedicError> {
        let detail = api::parse_medicine_detail(&body)?;
        Ok(detail.into())
    }

    /// Ranked suggestions for the appointment form's name box.
    pub fn suggest_medicines(
        &self,
        medicines: Vec<FfiMedicine>,
        query: String,
        limit: Option<u32>,
    ) -> Vec<FfiMedicine> {
        let medicines: Vec<Medicine> = medicines.into_iter().map(Into::into).collect();
        let limit = limit.map_or(search::DEFAULT_SUGGESTION_LIMIT, |l| l as usize);
        search::suggest_medicines(&medicines, &query, limit)
            .into_iter()
            .map(|s| s.medicine.clone().into())
            .collect()
    }

    pub fn medicines_in_category(
        &self,
        medicines: Vec<FfiMedicine>,
        category: FfiCategory,
    ) -> Vec<FfiMedicine> {
        let medicines: Vec<Medicine> = medicines.into_iter().map(Into::into).collect();
        search::medicines_in_category(&medicines, category.into())
            .into_iter()
            .map(|m| m.clone().into())
            .collect()
    }

    pub fn category_style(&self, name: String) -> FfiCategoryStyle {
        MedicineCategory::from_name(&name).into()
    }

    // =========================================================================
    // Schedule Operations
    // =========================================================================

    pub fn parse_appointments(&self, body: String) -> Result<Vec<FfiAppointment>, WikiMedicError> {
        let appointments = api::parse_appointments(&body)?;
        Ok(appointments.into_iter().map(Into::into).collect())
    }

    /// Appointments active on `day` (YYYY-MM-DD) in the device zone.
    pub fn appointments_for_day(
        &self,
        appointments: Vec<FfiAppointment>,
        day: String,
        offset_minutes: i32,
    ) -> Result<Vec<FfiAppointment>, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let day = parse_date(&day)?;
        let appointments = to_appointments(appointments)?;
        Ok(appointments_on_day(&appointments, day, &tz)
            .into_iter()
            .map(|a| a.clone().into())
            .collect())
    }

    /// "HH:MM" dose times of one appointment on `day`.
    pub fn dose_times(
        &self,
        appointment: FfiAppointment,
        day: String,
        offset_minutes: i32,
    ) -> Result<Vec<String>, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let day = parse_date(&day)?;
        let appointment = Appointment::try_from(appointment)?;
        Ok(dose_times(&appointment, day, &tz))
    }

    /// Every dose on `day`, time-ordered, with its intake state.
    pub fn agenda(
        &self,
        appointments: Vec<FfiAppointment>,
        day: String,
        offset_minutes: i32,
    ) -> Result<Vec<FfiAgendaEntry>, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let day = parse_date(&day)?;
        let appointments = to_appointments(appointments)?;
        let db = self.db.lock()?;

        agenda_for_day(&appointments, day, &tz)
            .into_iter()
            .map(|entry| -> Result<FfiAgendaEntry, WikiMedicError> {
                let taken = db
                    .get_intake_for_slot(&entry.appointment.id, &entry.slot.at)?
                    .is_some();
                Ok(FfiAgendaEntry {
                    appointment_id: entry.appointment.id.clone(),
                    medicine_id: entry.appointment.medicine_id.clone(),
                    dose: entry.appointment.dose_label(),
                    color: entry.appointment.color.clone(),
                    scheduled_at: entry.slot.at.to_rfc3339(),
                    time: entry.slot.label,
                    taken,
                })
            })
            .collect()
    }

    /// Confirm the dose scheduled at `scheduled_at` (RFC 3339).
    pub fn record_intake(
        &self,
        appointment_id: String,
        scheduled_at: String,
    ) -> Result<FfiIntake, WikiMedicError> {
        let scheduled_at = parse_instant(&scheduled_at)?;
        let db = self.db.lock()?;
        let intake = db.record_intake(&DoseIntake::new(appointment_id, scheduled_at))?;
        Ok(intake.into())
    }

    /// Confirmed doses of one appointment, oldest slot first.
    pub fn intake_history(&self, appointment_id: String) -> Result<Vec<FfiIntake>, WikiMedicError> {
        let db = self.db.lock()?;
        let intakes = db.list_intakes_for_appointment(&appointment_id)?;
        Ok(intakes.into_iter().map(Into::into).collect())
    }

    pub fn undo_intake(&self, intake_id: String) -> Result<bool, WikiMedicError> {
        let db = self.db.lock()?;
        Ok(db.delete_intake(&intake_id)?)
    }

    /// Taken versus scheduled doses per appointment for a month.
    pub fn adherence_for_month(
        &self,
        appointments: Vec<FfiAppointment>,
        year: i32,
        month: u32,
        offset_minutes: i32,
    ) -> Result<Vec<FfiAdherence>, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let (from, to) = MonthCursor::new(year, month)
            .and_then(schedule::month_bounds)
            .ok_or_else(|| WikiMedicError::InvalidInput(format!("no such month: {}-{}", year, month)))?;
        let appointments = to_appointments(appointments)?;

        let (window_start, window_end) = schedule::utc_window(from, to, &tz)
            .ok_or_else(|| WikiMedicError::InvalidInput(format!("no such month: {}-{}", year, month)))?;

        let db = self.db.lock()?;
        let intakes = db.list_intakes_between(&window_start, &window_end)?;

        Ok(
            schedule::adherence_summary(&appointments, &intakes, from, to, &tz)
                .into_iter()
                .map(Into::into)
                .collect(),
        )
    }

    // =========================================================================
    // Appointment Form
    // =========================================================================

    /// A blank form for the current moment in the device zone.
    pub fn new_appointment_draft(
        &self,
        offset_minutes: i32,
    ) -> Result<FfiAppointmentDraft, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let now = Utc::now().with_timezone(&tz);
        Ok(forms::AppointmentDraft::new(now.date_naive(), now.time()).into())
    }

    pub fn available_colors(&self) -> Vec<String> {
        forms::AVAILABLE_COLORS.iter().map(|c| c.to_string()).collect()
    }

    /// JSON body for `POST appointments/`, owned by the signed-in user.
    pub fn compose_appointment(
        &self,
        draft: FfiAppointmentDraft,
        offset_minutes: i32,
    ) -> Result<String, WikiMedicError> {
        let tz = zone(offset_minutes)?;
        let draft = forms::AppointmentDraft::try_from(draft)?;

        let db = self.db.lock()?;
        let session = SessionContext::load(&db, &self.config.storage.user)?;
        let user_id = session.current().map(|u| u.id.as_str());

        let request = draft.compose(user_id, &tz)?;
        Ok(serde_json::to_string(&request)?)
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// JSON body for `POST users/`.
    pub fn compose_registration(&self, form: FfiRegistration) -> Result<String, WikiMedicError> {
        let request = forms::RegistrationForm::from(form).compose()?;
        Ok(serde_json::to_string(&request)?)
    }

    /// Parse the sign-up response and start the session with it.
    pub fn complete_sign_up(&self, body: String) -> Result<FfiUser, WikiMedicError> {
        let user = api::parse_sign_up(&body)?;
        let db = self.db.lock()?;
        let mut session = SessionContext::load(&db, &self.config.storage.user)?;
        session.sign_in(user.clone())?;
        Ok(user.into())
    }

    pub fn sign_in(&self, user: FfiUser) -> Result<(), WikiMedicError> {
        let db = self.db.lock()?;
        let mut session = SessionContext::load(&db, &self.config.storage.user)?;
        session.sign_in(user.into())?;
        Ok(())
    }

    /// End the session; favorites belong to the session and go with it.
    pub fn sign_out(&self) -> Result<(), WikiMedicError> {
        let db = self.db.lock()?;
        SessionContext::load(&db, &self.config.storage.user)?.sign_out()?;
        FavoritesContext::load(&db, &self.config.storage.favorites)?.clear()?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<FfiUser>, WikiMedicError> {
        let db = self.db.lock()?;
        let session = SessionContext::load(&db, &self.config.storage.user)?;
        Ok(session.current().cloned().map(Into::into))
    }

    pub fn parse_user_profile(&self, body: String) -> Result<FfiUserProfile, WikiMedicError> {
        Ok(api::parse_user_profile(&body)?.into())
    }

    /// JSON body for `PATCH users/{id}` from an edited profile.
    pub fn compose_profile_update(&self, profile: FfiUserProfile) -> Result<String, WikiMedicError> {
        let form = forms::ProfileForm::from_profile(&profile.into());
        let request = form.compose()?;
        Ok(serde_json::to_string(&request)?)
    }

    /// Reflect a saved profile in the session user.
    pub fn apply_profile_update(&self, profile: FfiUserProfile) -> Result<FfiUser, WikiMedicError> {
        let form = forms::ProfileForm::from_profile(&profile.into());
        let db = self.db.lock()?;
        let mut session = SessionContext::load(&db, &self.config.storage.user)?;
        let current = session
            .current()
            .cloned()
            .ok_or_else(|| WikiMedicError::NotFound("signed-in user".into()))?;

        let updated = form.updated_user(&current);
        session.sign_in(updated.clone())?;
        Ok(updated.into())
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Add or remove; returns whether the medicine is now a favorite.
    pub fn toggle_favorite(&self, medicine: FfiMedicine) -> Result<bool, WikiMedicError> {
        let db = self.db.lock()?;
        let mut favorites = FavoritesContext::load(&db, &self.config.storage.favorites)?;
        let medicine: Medicine = medicine.into();
        Ok(favorites.toggle(FavoriteMedicine::from(&medicine))?)
    }

    pub fn is_favorite(&self, medicine_id: String) -> Result<bool, WikiMedicError> {
        let db = self.db.lock()?;
        let favorites = FavoritesContext::load(&db, &self.config.storage.favorites)?;
        Ok(favorites.is_favorite(&medicine_id))
    }

    pub fn list_favorites(&self) -> Result<Vec<FfiMedicine>, WikiMedicError> {
        let db = self.db.lock()?;
        let favorites = FavoritesContext::load(&db, &self.config.storage.favorites)?;
        Ok(favorites.list().iter().cloned().map(Into::into).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe calendar day.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDay {
    pub day_number: u32,
    pub day_name: String,
    /// YYYY-MM-DD
    pub full_date: String,
}

impl From<DayDescriptor> for FfiDay {
    fn from(day: DayDescriptor) -> Self {
        Self {
            day_number: day.day_number,
            day_name: day.day_name.to_string(),
            full_date: day.full_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// FFI-safe month with its title.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonth {
    pub year: i32,
    pub month: u32,
    pub title: String,
}

impl From<MonthCursor> for FfiMonth {
    fn from(cursor: MonthCursor) -> Self {
        Self {
            year: cursor.year,
            month: cursor.month,
            title: cursor.title(),
        }
    }
}

/// FFI-safe appointment. Instants are RFC 3339 strings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub repetition: i64,
    pub amount: f64,
    pub dosage_unit: String,
    pub medicine_id: Option<String>,
    pub color: String,
    pub all_days: bool,
    pub user_id: Option<String>,
    pub description: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            start_time: a.start_time.to_rfc3339(),
            end_time: a.end_time.to_rfc3339(),
            repetition: a.repetition,
            amount: a.amount,
            dosage_unit: a.dosage_unit,
            medicine_id: a.medicine_id,
            color: a.color,
            all_days: a.all_days,
            user_id: a.user_id,
            description: a.description,
        }
    }
}

impl TryFrom<FfiAppointment> for Appointment {
    type Error = WikiMedicError;

    fn try_from(a: FfiAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: a.id,
            start_time: parse_instant(&a.start_time)?,
            end_time: parse_instant(&a.end_time)?,
            repetition: a.repetition,
            repeat_unit: models::REPEAT_UNIT_HOURS.to_string(),
            amount: a.amount,
            dosage_unit: a.dosage_unit,
            medicine_id: a.medicine_id,
            color: a.color,
            all_days: a.all_days,
            user_id: a.user_id,
            description: a.description,
        })
    }
}

/// FFI-safe agenda line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAgendaEntry {
    pub appointment_id: String,
    pub medicine_id: Option<String>,
    /// e.g. "1 cp"
    pub dose: String,
    pub color: String,
    /// RFC 3339; pass back to `record_intake`
    pub scheduled_at: String,
    /// "HH:MM"
    pub time: String,
    pub taken: bool,
}

/// FFI-safe intake record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIntake {
    pub intake_id: String,
    pub appointment_id: String,
    pub scheduled_at: String,
    pub taken_at: String,
}

impl From<DoseIntake> for FfiIntake {
    fn from(intake: DoseIntake) -> Self {
        Self {
            intake_id: intake.intake_id,
            appointment_id: intake.appointment_id,
            scheduled_at: intake.scheduled_at.to_rfc3339(),
            taken_at: intake.taken_at.to_rfc3339(),
        }
    }
}

/// FFI-safe adherence slice.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAdherence {
    pub appointment_id: String,
    pub medicine_id: Option<String>,
    pub color: String,
    pub scheduled: u32,
    pub taken: u32,
    pub ratio: f64,
    pub label: String,
}

impl From<schedule::AdherenceEntry> for FfiAdherence {
    fn from(entry: schedule::AdherenceEntry) -> Self {
        Self {
            ratio: entry.ratio(),
            label: entry.label(),
            appointment_id: entry.appointment_id,
            medicine_id: entry.medicine_id,
            color: entry.color,
            scheduled: entry.scheduled,
            taken: entry.taken,
        }
    }
}

/// FFI-safe catalog medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicine {
    pub id: String,
    pub commercial_name: String,
    pub description: String,
    pub image: Option<String>,
    pub categories: Vec<String>,
}

impl From<Medicine> for FfiMedicine {
    fn from(m: Medicine) -> Self {
        Self {
            id: m.id,
            commercial_name: m.commercial_name,
            description: m.description,
            image: m.image,
            categories: m.categories,
        }
    }
}

impl From<FfiMedicine> for Medicine {
    fn from(m: FfiMedicine) -> Self {
        Medicine {
            id: m.id,
            commercial_name: m.commercial_name,
            description: m.description,
            image: m.image,
            categories: m.categories,
        }
    }
}

impl From<FavoriteMedicine> for FfiMedicine {
    fn from(f: FavoriteMedicine) -> Self {
        Self {
            id: f.id,
            commercial_name: f.commercial_name,
            description: f.description,
            image: f.image,
            categories: f.categories,
        }
    }
}

/// FFI-safe leaflet section.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLeafletSection {
    pub title: String,
    /// Markdown
    pub body: String,
}

/// FFI-safe medicine detail with rendered leaflet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicineDetail {
    pub id: String,
    pub commercial_name: String,
    pub description: String,
    pub registry_code: String,
    pub image: Option<String>,
    pub categories: Vec<String>,
    pub sections: Vec<FfiLeafletSection>,
}

impl From<MedicineDetail> for FfiMedicineDetail {
    fn from(detail: MedicineDetail) -> Self {
        let sections = detail
            .leaflet_sections()
            .into_iter()
            .map(|s| FfiLeafletSection {
                title: s.title.to_string(),
                body: s.body,
            })
            .collect();
        Self {
            id: detail.id,
            commercial_name: detail.commercial_name,
            description: detail.description,
            registry_code: detail.registry_code,
            image: detail.image,
            categories: detail.categories,
            sections,
        }
    }
}

/// FFI-safe medicine category.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiCategory {
    Antibiotic,
    Analgesic,
    Homeopathic,
    Antacid,
    Pediatric,
    Other,
}

impl From<FfiCategory> for MedicineCategory {
    fn from(c: FfiCategory) -> Self {
        match c {
            FfiCategory::Antibiotic => MedicineCategory::Antibiotic,
            FfiCategory::Analgesic => MedicineCategory::Analgesic,
            FfiCategory::Homeopathic => MedicineCategory::Homeopathic,
            FfiCategory::Antacid => MedicineCategory::Antacid,
            FfiCategory::Pediatric => MedicineCategory::Pediatric,
            FfiCategory::Other => MedicineCategory::Other,
        }
    }
}

/// FFI-safe category styling.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCategoryStyle {
    pub label: String,
    pub tone: String,
    pub icon: String,
}

impl From<MedicineCategory> for FfiCategoryStyle {
    fn from(category: MedicineCategory) -> Self {
        let style = category.style();
        Self {
            label: style.label.to_string(),
            tone: style.tone.as_str().to_string(),
            icon: style.icon.to_string(),
        }
    }
}

/// FFI-safe endpoint selector.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiEndpoint {
    Medicines { page: u32, page_size: u32 },
    Medicine { id: String },
    Appointments { user_id: String, page: u32, page_size: u32 },
    CreateAppointment,
    CreateUser,
    User { id: String },
    UpdateUser { id: String },
}

impl From<FfiEndpoint> for api::Endpoint {
    fn from(e: FfiEndpoint) -> Self {
        match e {
            FfiEndpoint::Medicines { page, page_size } => api::Endpoint::Medicines { page, page_size },
            FfiEndpoint::Medicine { id } => api::Endpoint::Medicine { id },
            FfiEndpoint::Appointments {
                user_id,
                page,
                page_size,
            } => api::Endpoint::Appointments {
                user_id,
                page,
                page_size,
            },
            FfiEndpoint::CreateAppointment => api::Endpoint::CreateAppointment,
            FfiEndpoint::CreateUser => api::Endpoint::CreateUser,
            FfiEndpoint::User { id } => api::Endpoint::User { id },
            FfiEndpoint::UpdateUser { id } => api::Endpoint::UpdateUser { id },
        }
    }
}

/// FFI-safe request target.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRequestTarget {
    pub method: String,
    pub url: String,
}

/// FFI-safe HTTP client settings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiApiSettings {
    pub base_url: String,
    pub timeout_ms: u64,
    pub medicine_page_size: u32,
}

/// FFI-safe appointment form. Dates are YYYY-MM-DD, times HH:MM.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentDraft {
    pub medicine_name: String,
    pub medicine_id: Option<String>,
    pub amount: String,
    pub dosage_unit: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub interval_hours: i64,
    pub treatment: bool,
    pub color: String,
}

impl From<forms::AppointmentDraft> for FfiAppointmentDraft {
    fn from(d: forms::AppointmentDraft) -> Self {
        Self {
            medicine_name: d.medicine_name,
            medicine_id: d.medicine_id,
            amount: d.amount,
            dosage_unit: d.dosage_unit,
            start_date: d.start_date.format("%Y-%m-%d").to_string(),
            start_time: d.start_time.format("%H:%M").to_string(),
            end_date: d.end_date.format("%Y-%m-%d").to_string(),
            end_time: d.end_time.format("%H:%M").to_string(),
            interval_hours: d.interval_hours,
            treatment: d.treatment,
            color: d.color,
        }
    }
}

impl TryFrom<FfiAppointmentDraft> for forms::AppointmentDraft {
    type Error = WikiMedicError;

    fn try_from(d: FfiAppointmentDraft) -> Result<Self, Self::Error> {
        let start_date = parse_date(&d.start_date)?;
        let start_time = parse_time(&d.start_time)?;
        let mut draft = forms::AppointmentDraft::new(start_date, start_time);
        draft.medicine_name = d.medicine_name;
        draft.medicine_id = d.medicine_id;
        draft.amount = d.amount;
        draft.dosage_unit = d.dosage_unit;
        draft.end_date = parse_date(&d.end_date)?;
        draft.end_time = parse_time(&d.end_time)?;
        draft.set_interval(d.interval_hours);
        draft.treatment = d.treatment;
        if !draft.select_color(&d.color) {
            return Err(WikiMedicError::InvalidInput(format!(
                "color outside the palette: {}",
                d.color
            )));
        }
        Ok(draft)
    }
}

/// FFI-safe sign-up form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl From<FfiRegistration> for forms::RegistrationForm {
    fn from(r: FfiRegistration) -> Self {
        forms::RegistrationForm {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            password: r.password,
            confirm_password: r.confirm_password,
            terms_accepted: r.terms_accepted,
        }
    }
}

/// FFI-safe session user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub token: Option<String>,
}

impl From<User> for FfiUser {
    fn from(u: User) -> Self {
        Self {
            first_name: u.first_name().to_string(),
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            token: u.token,
        }
    }
}

impl From<FfiUser> for User {
    fn from(u: FfiUser) -> Self {
        User {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            token: u.token,
        }
    }
}

/// FFI-safe profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: Option<String>,
}

impl From<UserProfile> for FfiUserProfile {
    fn from(p: UserProfile) -> Self {
        Self {
            name: p.name,
            email: p.email,
            phone: p.phone,
            created_at: p.created_at,
        }
    }
}

impl From<FfiUserProfile> for UserProfile {
    fn from(p: FfiUserProfile) -> Self {
        UserProfile {
            name: p.name,
            email: p.email,
            phone: p.phone,
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: &str, start: &str, end: &str, repetition: i64) -> FfiAppointment {
        FfiAppointment {
            id: id.into(),
            start_time: start.into(),
            end_time: end.into(),
            repetition,
            amount: 1.0,
            dosage_unit: "cp".into(),
            medicine_id: Some("m1".into()),
            color: "#4D4DFF".into(),
            all_days: false,
            user_id: None,
            description: None,
        }
    }

    fn ana() -> FfiUser {
        FfiUser {
            id: "7".into(),
            name: "Ana Souza".into(),
            first_name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "119".into(),
            token: None,
        }
    }

    #[test]
    fn test_zone_bounds() {
        assert!(zone(-180).is_ok());
        assert!(zone(0).is_ok());
        assert!(matches!(zone(24 * 60), Err(WikiMedicError::InvalidInput(_))));
        assert!(matches!(zone(i32::MAX), Err(WikiMedicError::InvalidInput(_))));
    }

    #[test]
    fn test_calendar_exports() {
        let week = week_days("2024-03-30".into()).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[2].full_date, "2024-04-01");

        let march = month_calendar(2024, 3);
        assert_eq!(march.iter().filter(|c| c.is_none()).count(), 5);

        let next = shift_month(2024, 12, 1).unwrap();
        assert_eq!((next.year, next.month), (2025, 1));
        assert!(shift_month(2024, 13, 1).is_err());
        assert!(week_days("30/03/2024".into()).is_err());
    }

    #[test]
    fn test_agenda_and_intake() {
        let core = open_database_in_memory().unwrap();
        let appts = vec![appointment(
            "a1",
            "2024-03-01T00:00:00Z",
            "2024-03-03T00:00:00Z",
            8,
        )];

        let times = core
            .dose_times(appts[0].clone(), "2024-03-02".into(), 0)
            .unwrap();
        assert_eq!(times, vec!["00:00", "08:00", "16:00"]);

        let agenda = core.agenda(appts.clone(), "2024-03-02".into(), 0).unwrap();
        assert_eq!(agenda.len(), 3);
        assert!(agenda.iter().all(|e| !e.taken));

        core.record_intake("a1".into(), agenda[1].scheduled_at.clone())
            .unwrap();
        let agenda = core.agenda(appts.clone(), "2024-03-02".into(), 0).unwrap();
        assert!(agenda[1].taken);

        let adherence = core.adherence_for_month(appts, 2024, 3, 0).unwrap();
        assert_eq!(adherence.len(), 1);
        assert_eq!(adherence[0].scheduled, 7);
        assert_eq!(adherence[0].label, "1 / 7");

        let history = core.intake_history("a1".into()).unwrap();
        assert_eq!(history.len(), 1);
        assert!(core.undo_intake(history[0].intake_id.clone()).unwrap());
        assert!(core.intake_history("a1".into()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_instant_rejected() {
        let core = open_database_in_memory().unwrap();
        let bad = appointment("a1", "yesterday", "2024-03-03T00:00:00Z", 8);
        let result = core.dose_times(bad, "2024-03-02".into(), 0);
        assert!(matches!(result, Err(WikiMedicError::InvalidInput(_))));
    }

    #[test]
    fn test_compose_appointment_uses_session_user() {
        let core = open_database_in_memory().unwrap();
        core.sign_in(ana()).unwrap();

        let mut draft = core.new_appointment_draft(-180).unwrap();
        draft.medicine_name = "Dipirona".into();
        draft.start_date = "2024-03-01".into();
        draft.start_time = "08:00".into();
        draft.end_date = "2024-03-03".into();
        draft.end_time = "08:00".into();

        let body = core.compose_appointment(draft, -180).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["appointment"]["user_id"], "7");
        assert_eq!(json["appointment"]["start_time"], "2024-03-01T11:00:00Z");
        assert_eq!(json["appointment"]["repeat_unit"], "HOURS");
    }

    #[test]
    fn test_compose_appointment_rejects_foreign_color() {
        let core = open_database_in_memory().unwrap();
        let mut draft = core.new_appointment_draft(0).unwrap();
        draft.medicine_name = "Dipirona".into();
        draft.color = "#000000".into();
        assert!(matches!(
            core.compose_appointment(draft, 0),
            Err(WikiMedicError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sign_out_clears_favorites() {
        let core = open_database_in_memory().unwrap();
        core.sign_in(ana()).unwrap();
        let medicine = FfiMedicine {
            id: "m1".into(),
            commercial_name: "Dipirona".into(),
            description: String::new(),
            image: None,
            categories: vec![],
        };
        assert!(core.toggle_favorite(medicine).unwrap());
        assert!(core.is_favorite("m1".into()).unwrap());

        core.sign_out().unwrap();
        assert!(core.current_user().unwrap().is_none());
        assert!(core.list_favorites().unwrap().is_empty());
    }

    #[test]
    fn test_sign_up_and_profile_update() {
        let core = open_database_in_memory().unwrap();
        let user = core
            .complete_sign_up(r#"{"userId": 9, "name": "Ana Souza", "email": "a@x.com", "phone": "119"}"#.into())
            .unwrap();
        assert_eq!(user.id, "9");
        assert_eq!(user.first_name, "Ana");

        let profile = FfiUserProfile {
            name: "Ana Lima".into(),
            email: "a@x.com".into(),
            phone: "119".into(),
            created_at: Some("2024-01-01T00:00:00Z".into()),
        };
        let body = core.compose_profile_update(profile.clone()).unwrap();
        assert!(body.contains(r#""created_at":"2024-01-01T00:00:00Z""#));

        let updated = core.apply_profile_update(profile).unwrap();
        assert_eq!(updated.id, "9");
        assert_eq!(core.current_user().unwrap().unwrap().name, "Ana Lima");
    }

    #[test]
    fn test_error_mapping() {
        let core = open_database_in_memory().unwrap();
        assert!(matches!(
            core.check_response(500, "boom".into()),
            Err(WikiMedicError::ServerError(_))
        ));
        assert!(matches!(
            core.parse_medicines("not json".into()),
            Err(WikiMedicError::SerializationError(_))
        ));

        let registration = FfiRegistration {
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "a@x.com".into(),
            phone: "119".into(),
            password: "curta".into(),
            confirm_password: "curta".into(),
            terms_accepted: true,
        };
        assert!(matches!(
            core.compose_registration(registration),
            Err(WikiMedicError::ValidationError(_))
        ));
    }

    #[test]
    fn test_request_target() {
        let core = open_database_in_memory().unwrap();
        let target = core.request_target(FfiEndpoint::Medicines {
            page: 1,
            page_size: core.api_settings().medicine_page_size,
        });
        assert_eq!(target.method, "GET");
        assert_eq!(
            target.url,
            "https://wikimedic-api.onrender.com/medicines?page=1&pageSize=100"
        );
    }

    #[test]
    fn test_fractional_start_counts_in_adherence() {
        let core = open_database_in_memory().unwrap();
        let appts = vec![appointment(
            "a1",
            "2024-03-01T08:00:00.250Z",
            "2024-03-02T08:00:00.250Z",
            8,
        )];

        let agenda = core.agenda(appts.clone(), "2024-03-01".into(), 0).unwrap();
        core.record_intake("a1".into(), agenda[0].scheduled_at.clone())
            .unwrap();

        let agenda = core.agenda(appts.clone(), "2024-03-01".into(), 0).unwrap();
        assert!(agenda[0].taken);

        let adherence = core.adherence_for_month(appts, 2024, 3, 0).unwrap();
        assert_eq!(adherence[0].label, "1 / 4");
    }

    #[test]
    fn test_month_shift_overflow_is_an_error() {
        assert!(matches!(
            shift_month(2024, 1, i32::MAX),
            Err(WikiMedicError::InvalidInput(_))
        ));

        let core = open_database_in_memory().unwrap();
        let appts = vec![appointment(
            "a1",
            "2024-03-01T00:00:00Z",
            "2024-03-03T00:00:00Z",
            8,
        )];
        assert!(matches!(
            core.adherence_for_month(appts, i32::MAX, 12, 0),
            Err(WikiMedicError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_suggestion_limit_defaults() {
        let core = open_database_in_memory().unwrap();
        let medicines: Vec<FfiMedicine> = (0..30)
            .map(|i| FfiMedicine {
                id: i.to_string(),
                commercial_name: format!("Dipirona {}", i),
                description: String::new(),
                image: None,
                categories: vec![],
            })
            .collect();

        let all = core.suggest_medicines(medicines.clone(), "dipirona".into(), None);
        assert_eq!(all.len(), search::DEFAULT_SUGGESTION_LIMIT);
        let few = core.suggest_medicines(medicines, "dipirona".into(), Some(3));
        assert_eq!(few.len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let db = Database::open_in_memory().unwrap();
        let result = build_core(db, Some(r#"{"api": {"base_url": "ftp://x"}}"#.into()));
        assert!(matches!(result, Err(WikiMedicError::ConfigError(_))));
    }
}

//! Request payloads and response envelopes of the remote API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{id_from_string_or_number, Appointment, Medicine, MedicineDetail, User, UserProfile};

/// `GET medicines?page=&pageSize=`
#[derive(Debug, Clone, Deserialize)]
pub struct MedicinesPage {
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

/// `GET medicines/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MedicineEnvelope {
    pub medicine: MedicineDetail,
}

/// `GET appointments?...`; older deployments return a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AppointmentsResponse {
    Wrapped { appointments: Vec<Appointment> },
    Bare(Vec<Appointment>),
}

impl AppointmentsResponse {
    pub fn into_vec(self) -> Vec<Appointment> {
        match self {
            AppointmentsResponse::Wrapped { appointments } => appointments,
            AppointmentsResponse::Bare(appointments) => appointments,
        }
    }
}

/// `GET users/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

/// `POST users/` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    #[serde(rename = "userId", deserialize_with = "id_from_string_or_number")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<SignUpResponse> for User {
    fn from(resp: SignUpResponse) -> Self {
        User {
            id: resp.user_id,
            name: resp.name,
            email: resp.email,
            phone: resp.phone,
            token: None,
        }
    }
}

/// `POST appointments/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAppointmentRequest {
    pub appointment: AppointmentPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentPayload {
    pub all_days: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub repetition: i64,
    pub repeat_unit: String,
    pub amount: f64,
    pub dosage_unit: String,
    pub color: String,
    /// Empty when no session is active
    pub user_id: String,
    /// Empty when the name was typed rather than picked from suggestions
    pub medicine_id: String,
}

/// `POST users/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUserRequest {
    pub user: NewUserPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUserPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// `PATCH users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    pub fields: ProfileFields,
}

/// The backend requires `created_at` to be echoed back on every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

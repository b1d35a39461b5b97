//! Contract with the remote WikiMedic HTTP API.
//!
//! The shells own the transport. This module tells them where to send
//! requests ([`Endpoint`]) and turns raw response bodies into domain types.
//! Pagination is accepted on the way out, but the full returned list is
//! always consumed as one flat sequence.

mod wire;

pub use wire::*;

use thiserror::Error;

use crate::models::{Appointment, Medicine, MedicineDetail, User, UserProfile};

/// API contract errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server responded {status}: {body}")]
    Server { status: u16, body: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Every endpoint the app calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Medicines { page: u32, page_size: u32 },
    Medicine { id: String },
    Appointments { user_id: String, page: u32, page_size: u32 },
    CreateAppointment,
    CreateUser,
    User { id: String },
    UpdateUser { id: String },
}

impl Endpoint {
    /// Path relative to the base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Medicines { page, page_size } => {
                format!("medicines?page={}&pageSize={}", page, page_size)
            }
            Endpoint::Medicine { id } => format!("medicines/{}", id),
            Endpoint::Appointments {
                user_id,
                page,
                page_size,
            } => format!(
                "appointments?userId={}&page={}&pageSize={}",
                user_id, page, page_size
            ),
            Endpoint::CreateAppointment => "appointments/".to_string(),
            Endpoint::CreateUser => "users/".to_string(),
            Endpoint::User { id } | Endpoint::UpdateUser { id } => format!("users/{}", id),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateAppointment | Endpoint::CreateUser => Method::Post,
            Endpoint::UpdateUser { .. } => Method::Patch,
            _ => Method::Get,
        }
    }
}

/// Map a non-2xx status to [`ApiError::Server`], keeping the body verbatim.
pub fn check_status(status: u16, body: &str) -> ApiResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Server {
            status,
            body: body.to_string(),
        })
    }
}

pub fn parse_medicines(body: &str) -> ApiResult<Vec<Medicine>> {
    let page: MedicinesPage = serde_json::from_str(body)?;
    Ok(page.medicines)
}

pub fn parse_medicine_detail(body: &str) -> ApiResult<MedicineDetail> {
    let envelope: MedicineEnvelope = serde_json::from_str(body)?;
    Ok(envelope.medicine)
}

pub fn parse_appointments(body: &str) -> ApiResult<Vec<Appointment>> {
    let response: AppointmentsResponse = serde_json::from_str(body)?;
    Ok(response.into_vec())
}

pub fn parse_user_profile(body: &str) -> ApiResult<UserProfile> {
    let envelope: UserEnvelope = serde_json::from_str(body)?;
    Ok(envelope.user)
}

pub fn parse_sign_up(body: &str) -> ApiResult<User> {
    let response: SignUpResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

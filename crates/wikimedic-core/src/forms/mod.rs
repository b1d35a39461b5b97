//! Form state, validation and request composition.

mod account;
mod appointment;

pub use account::*;
pub use appointment::*;

use thiserror::Error;

/// Form validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("Password must have at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Local time does not exist: {0}")]
    InvalidTimestamp(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Trimmed value, or `MissingField` when blank.
pub(crate) fn required<'a>(value: &'a str, field: &'static str) -> FormResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

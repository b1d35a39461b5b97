//! Sign-up and profile-edit forms.

use super::{required, FormError, FormResult};
use crate::api::{CreateUserRequest, NewUserPayload, ProfileFields, UpdateProfileRequest};
use crate::models::{User, UserProfile};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Sign-up form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl RegistrationForm {
    pub fn validate(&self) -> FormResult<()> {
        required(&self.first_name, "first_name")?;
        required(&self.last_name, "last_name")?;
        required(&self.email, "email")?;
        required(&self.phone, "phone")?;
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if !self.terms_accepted {
            return Err(FormError::TermsNotAccepted);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }

    /// Only the joined name's outer whitespace is trimmed; everything else
    /// is sent as typed.
    pub fn compose(&self) -> FormResult<CreateUserRequest> {
        self.validate()?;
        Ok(CreateUserRequest {
            user: NewUserPayload {
                name: format!("{} {}", self.first_name, self.last_name)
                    .trim()
                    .to_string(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                password: self.password.clone(),
            },
        })
    }
}

/// Profile-edit form, seeded from the fetched profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    created_at: Option<String>,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            created_at: profile.created_at.clone(),
        }
    }

    pub fn compose(&self) -> FormResult<UpdateProfileRequest> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        let created_at = self
            .created_at
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(FormError::MissingField("created_at"))?;

        Ok(UpdateProfileRequest {
            fields: ProfileFields {
                name: name.to_string(),
                email: email.to_string(),
                phone: self.phone.trim().to_string(),
                created_at: created_at.to_string(),
            },
        })
    }

    /// Session user after a successful update; id and token are kept.
    pub fn updated_user(&self, current: &User) -> User {
        User {
            id: current.id.clone(),
            token: current.token.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

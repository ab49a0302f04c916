//! Session and credential domain models.
//!
//! A [`Session`] pairs the bearer token returned by the auth API with the
//! identity fields cached for display. [`Credentials`] and [`SignupForm`]
//! carry the user-entered fields and own the client-side validation rules;
//! a form that fails validation must never reach the network.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockinError};

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Represents an authenticated session: the bearer token plus the identity
/// fields cached alongside it for display purposes only.
///
/// A session is considered authenticated if and only if its token is a
/// non-empty string. No local expiry checking is performed; expiry is
/// discovered only via a server rejection (HTTP 401).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
    /// Creation timestamp (ISO 8601 format). Informational only.
    pub created_at: String,
}

impl Session {
    /// Creates a session stamped with the current time.
    pub fn new(
        access_token: impl Into<String>,
        user_email: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            user_email,
            user_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns true if this session carries a usable token.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

/// Login credentials entered by the user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validates that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns `StockinError::Validation` with a user-facing message if
    /// either field is empty.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(StockinError::validation(
                "Please enter both email and password.",
            ));
        }
        Ok(())
    }
}

/// Signup form fields, including the password confirmation.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validates the form: non-empty fields, matching confirmation, and
    /// minimum password length.
    ///
    /// # Errors
    ///
    /// Returns `StockinError::Validation` with the user-facing message for
    /// the first failing rule.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(StockinError::validation(
                "Please enter both email and password.",
            ));
        }
        if self.password != self.confirm_password {
            return Err(StockinError::validation("Passwords do not match"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(StockinError::validation(
                "Password must be at least 6 characters",
            ));
        }
        Ok(())
    }

    /// Returns the credentials portion of the form.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

//! Sign-in and registration form state.
//!
//! # Design
//! - Inputs stay as raw strings until submit.
//! - Validation mirrors the browser's `required` checks so the request is
//!   never sent with an obviously empty field.

use skyvault_api_models::{LoginRequest, RegisterRequest};

/// Sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Whether the password is shown in clear text.
    pub show_password: bool,
    /// A request is in flight.
    pub busy: bool,
    /// Message from the last failed attempt.
    pub error: Option<String>,
}

impl LoginForm {
    /// Build the request, or explain what is missing.
    ///
    /// # Errors
    /// Returns a user-facing message when a required field is blank.
    pub fn request(&self) -> Result<LoginRequest, String> {
        let email = required("Email", &self.email)?;
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }

    /// Submit button label.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.busy { "Signing in…" } else { "Sign in" }
    }
}

/// Registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Optional display name.
    pub full_name: String,
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Whether the password is shown in clear text.
    pub show_password: bool,
    /// A request is in flight.
    pub busy: bool,
    /// Message from the last failed attempt.
    pub error: Option<String>,
}

impl RegisterForm {
    /// Build the request; a blank name is sent as `null`.
    ///
    /// # Errors
    /// Returns a user-facing message when a required field is blank.
    pub fn request(&self) -> Result<RegisterRequest, String> {
        let email = required("Email", &self.email)?;
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(RegisterRequest::new(
            email,
            self.password.clone(),
            &self.full_name,
        ))
    }

    /// Submit button label.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.busy {
            "Creating account…"
        } else {
            "Create account"
        }
    }
}

fn required(label: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

//! Input validation for the registration form
//!
//! Failures are reported before anything is sent to the backend.

use common::{ValidationError, ValidationErrors};
use regex::Regex;
use std::sync::OnceLock;

use crate::models::RegistrationForm;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::new("username", "Username is required"));
    }

    if username.len() < 3 {
        return Err(ValidationError::new(
            "username",
            "Username must be at least 3 characters long",
        ));
    }

    if username.len() > 32 {
        return Err(ValidationError::new(
            "username",
            "Username must be at most 32 characters long",
        ));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(ValidationError::new(
            "username",
            "Username can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new(
            "email",
            "Email must be at most 254 characters long",
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(ValidationError::new("email", "Invalid email format"));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }

    if password.len() < 8 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters long",
        ));
    }

    if password.len() > 128 {
        return Err(ValidationError::new(
            "password",
            "Password must be at most 128 characters long",
        ));
    }

    Ok(())
}

/// Validate the whole registration form, collecting every failed field
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_username(&form.username));
    errors.check(validate_email(&form.email));
    errors.check(validate_password(&form.password));

    if form.password != form.password_confirm {
        errors.add("password_confirm", "Passwords do not match");
    }

    errors.into_result()
}

//! Request-body validation rules shared by the HTTP layer.
//!
//! Field rules mirror the public API contract: requests are rejected at the
//! boundary with field-level errors before any handler logic runs.

use crate::response::FieldError;
use std::borrow::Cow;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Username is required"));
    }
    if value.chars().count() < 3 {
        return Err(error("min", "Username must be at least 3 characters"));
    }
    if value.chars().count() > 30 {
        return Err(error("max", "Username must not exceed 30 characters"));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(error(
            "charset",
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email_field(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Email is required"));
    }
    if !value.validate_email() {
        return Err(error("email", "Please enter a valid email"));
    }
    if value.chars().count() > 100 {
        return Err(error("max", "Email must not exceed 100 characters"));
    }
    Ok(())
}

fn password_rules(
    value: &str,
    required: &'static str,
    min: &'static str,
    max: &'static str,
    complexity: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", required));
    }
    if value.chars().count() < 6 {
        return Err(error("min", min));
    }
    if value.chars().count() > 50 {
        return Err(error("max", max));
    }
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(error("complexity", complexity));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    password_rules(
        value,
        "Password is required",
        "Password must be at least 6 characters",
        "Password must not exceed 50 characters",
        "Password must contain at least one lowercase letter, one uppercase letter, and one number",
    )
}

pub fn validate_new_password(value: &str) -> Result<(), ValidationError> {
    password_rules(
        value,
        "New password is required",
        "New password must be at least 6 characters",
        "New password must not exceed 50 characters",
        "New password must contain at least one lowercase letter, one uppercase letter, and one number",
    )
}

pub fn validate_current_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Current password is required"));
    }
    Ok(())
}

pub fn validate_login_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Password is required"));
    }
    Ok(())
}

pub fn validate_reset_token(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Reset token is required"));
    }
    Ok(())
}

/// Run derive-based validation, flattening failures into `{field, message}`
/// pairs with wire-format (camelCase) field names.
pub fn check<T: Validate>(value: &T) -> Result<(), Vec<FieldError>> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(field_errors(&errors)),
    }
}

pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            out.push(FieldError::new(snake_to_camel(&field.to_string()), message));
        }
    }
    out
}

fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

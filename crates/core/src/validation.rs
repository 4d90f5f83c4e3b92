//! Shared input validation helpers.
//!
//! Request DTOs derive [`validator::Validate`]; [`validate_request`] turns
//! the collected field errors into a single [`CoreError::Validation`] whose
//! message names every failing field.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Email shape accepted everywhere: something, `@`, something, `.`, something.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Minimum password length for admin and donor accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Run derived validation and flatten the result.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), CoreError> {
    req.validate()
        .map_err(|errs| CoreError::Validation(describe(&errs)))
}

fn describe(errs: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errs
        .field_errors()
        .into_iter()
        .map(|(field, list)| {
            list.iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"))
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Lower-case and trim an email address before storage or lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Please provide a valid email".to_string(),
        ))
    }
}

/// Reject `None`, empty, and whitespace-only values.
pub fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate `value` against a fixed set, naming the field in the error.
pub fn validate_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation rules.
//!
//! Rules accumulate: every violated rule contributes one [`FieldError`] and
//! callers decide how to report the whole list.
use crate::users::NewUser;
use tenantry_common::FieldError;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const EMAIL_IN_USE: &str = "Email is already in use";
pub const NAME_REQUIRED: &str = "Name is required";
pub const USER_ID_REQUIRED: &str = "User ID is required";

/// Blank means empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Presence rules for a registration, in reporting order.
///
/// Uniqueness of the email is checked separately against the store and only
/// when the email is present.
pub fn validate_registration(input: &NewUser) -> Vec<FieldError> {
    let rules = [
        ("firstName", input.first_name.as_str(), FIRST_NAME_REQUIRED),
        ("lastName", input.last_name.as_str(), LAST_NAME_REQUIRED),
        ("email", input.email.as_str(), EMAIL_REQUIRED),
        ("password", input.password.as_str(), PASSWORD_REQUIRED),
    ];

    rules
        .into_iter()
        .filter(|(_, value, _)| is_blank(value))
        .map(|(field, _, message)| FieldError::new(field, message))
        .collect()
}

pub fn duplicate_email() -> FieldError {
    FieldError::new("email", EMAIL_IN_USE)
}

pub fn validate_organization_name(name: &str) -> Vec<FieldError> {
    if is_blank(name) {
        vec![FieldError::new("name", NAME_REQUIRED)]
    } else {
        Vec::new()
    }
}

/// The trimmed value of a required field, or its field error.
pub fn required<'a>(
    field: &str,
    value: Option<&'a str>,
    message: &str,
) -> Result<&'a str, FieldError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FieldError::new(field, message)),
    }
}

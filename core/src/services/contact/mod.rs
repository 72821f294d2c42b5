//! Contact-shape validators
//!
//! Syntax-only classification of email addresses and phone numbers.
//! The `&str` validators cover typed callers; the `serde_json::Value`
//! variants cover loosely-typed payload boundaries where a non-string
//! can still arrive at runtime.

use serde_json::Value;

use ak_shared::utils::{phone, validation};

use crate::errors::{ContactError, DomainResult};

/// Validate the shape of an email address
///
/// Local part 2-64 chars, domain 2-257 chars, TLD 2-64 chars, no
/// embedded whitespace. No existence check.
pub fn validate_email(email: &str) -> DomainResult<()> {
    if !validation::is_valid_email(email) {
        return Err(ContactError::InvalidEmail {
            email: validation::mask_email(email),
        }
        .into());
    }
    Ok(())
}

/// Validate the shape of a phone number (10 digits, leading 9)
pub fn validate_phone(phone_number: &str) -> DomainResult<()> {
    if !phone::is_valid_phone(phone_number) {
        return Err(ContactError::InvalidPhone {
            phone: phone::mask_phone(phone_number),
        }
        .into());
    }
    Ok(())
}

/// Validate an email arriving as a loosely-typed JSON value
pub fn validate_email_value(value: &Value) -> DomainResult<()> {
    match value.as_str() {
        Some(email) => validate_email(email),
        None => Err(ContactError::NotText { found: json_type_name(value).to_string() }.into()),
    }
}

/// Validate a phone number arriving as a loosely-typed JSON value
pub fn validate_phone_value(value: &Value) -> DomainResult<()> {
    match value.as_str() {
        Some(phone_number) => validate_phone(phone_number),
        None => Err(ContactError::NotText { found: json_type_name(value).to_string() }.into()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

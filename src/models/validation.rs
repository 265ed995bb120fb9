//! Field validators shared by the request schemas.
//!
//! The `validator` derive covers lengths, ranges and emails; the pattern
//! checks below cover the rest.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

static MOBILE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?[0-9]{10,15}$").expect("valid phone pattern"));

pub const PASSWORD_MIN_LEN: usize = 4;
pub const PASSWORD_MAX_LEN: usize = 12;

/// Field names in declaration order across all schemas. Unknown keys
/// (such as struct-level `__all__`) sort after these.
const FIELD_ORDER: &[&str] = &[
    "mobile_phone",
    "email",
    "name",
    "password",
    "new_password",
    "is_active",
    "father",
    "mother",
    "child",
    "pet",
    "first_name",
    "middle_name",
    "last_name",
    "gender",
    "pet_type",
    "breed",
    "color",
    "birth_year",
    "birth_month",
    "birth_day",
];

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// `+`, an optional country code `1`, then 10 to 15 digits.
pub fn validate_mobile_phone(value: &str) -> Result<(), ValidationError> {
    if MOBILE_PHONE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("mobile_phone", "Invalid mobile phone number format"))
    }
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(invalid(
            "password_length",
            "Password must be at least 4 characters long",
        ));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(invalid(
            "password_length",
            "Password must be at most 12 characters long",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(
            "password_charset",
            "Password can only contain letters and numbers",
        ));
    }
    Ok(())
}

/// Letters and spaces. Emptiness is left to the length check.
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        Ok(())
    } else {
        Err(invalid("name_charset", "Names must contain only letters and spaces"))
    }
}

/// Letters, digits and spaces.
pub fn validate_pet_text(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
    {
        Ok(())
    } else {
        Err(invalid(
            "pet_charset",
            "Pet information must contain only letters, numbers, and spaces",
        ))
    }
}

/// Reject dates such as April 31 that pass the individual range checks.
pub fn validate_calendar_date(year: i32, month: u32, day: u32) -> Result<(), ValidationError> {
    match chrono::NaiveDate::from_ymd_opt(year, month, day) {
        Some(_) => Ok(()),
        // Out-of-range parts are reported by their own field checks.
        None if !(1..=12).contains(&month) || !(1..=31).contains(&day) => Ok(()),
        None => Err(invalid("birth_date", "Birth date is not a valid calendar date")),
    }
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|known| *known == field)
        .unwrap_or(FIELD_ORDER.len())
}

/// Describe the first failing field, e.g. `father.birth_year: ...`.
pub fn first_failure(errors: &ValidationErrors) -> String {
    first_failure_at(errors, "").unwrap_or_else(|| "Invalid request".to_string())
}

fn first_failure_at(errors: &ValidationErrors, prefix: &str) -> Option<String> {
    let mut entries: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    entries.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)).then_with(|| a.cmp(b)));

    for (field, kind) in entries {
        let path = if field == "__all__" {
            prefix.trim_end_matches('.').to_string()
        } else {
            format!("{prefix}{field}")
        };

        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                if path.is_empty() {
                    message
                } else {
                    format!("{path}: {message}")
                }
            }),
            ValidationErrorsKind::Struct(inner) => first_failure_at(inner, &format!("{path}.")),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, inner)| first_failure_at(inner, &format!("{path}[{index}]."))),
        };

        if found.is_some() {
            return found;
        }
    }

    None
}

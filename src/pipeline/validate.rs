//! Validation rules for a single person record.

use crate::error::ValidationFailure;

/// Youngest accepted age (inclusive).
pub const MIN_AGE: i64 = 18;
/// Oldest accepted age (inclusive).
pub const MAX_AGE: i64 = 60;

/// Check a record's fields in the fixed order name → email → age.
///
/// The first failing rule wins. `age` is `None` when the age cell was not numeric; `raw_age` is
/// then reported in [`ValidationFailure::InvalidAgeFormat`].
pub fn validate_record(
    name: &str,
    email: &str,
    age: Option<i64>,
    raw_age: &str,
) -> Result<i64, ValidationFailure> {
    if name.trim().is_empty() {
        return Err(ValidationFailure::NameRequired);
    }
    if !email.contains('@') {
        return Err(ValidationFailure::InvalidEmailFormat);
    }
    let age = age.ok_or_else(|| ValidationFailure::InvalidAgeFormat {
        raw: raw_age.to_string(),
    })?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationFailure::AgeOutOfRange { age });
    }
    Ok(age)
}

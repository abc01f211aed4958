//! Field-by-field input checks shared by the request structs.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

/// Messages keyed by the offending field, returned to the client so it can re-present its form.
#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, AppError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// Trimmed text that must be non-empty and at most `max` characters.
pub fn required_text(errors: &mut FieldErrors, field: &str, raw: &str, max: usize) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters."),
        );
    }
    value.to_string()
}

/// Trimmed optional text; blank input becomes `None`.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
    max: usize,
) -> Option<String> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters."),
        );
    }
    Some(value.to_string())
}

pub fn non_negative<T>(errors: &mut FieldErrors, field: &str, value: i64) -> T
where
    T: TryFrom<i64> + Default,
{
    if value < 0 {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
        return T::default();
    }
    match T::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            errors.add(field, "Ensure this value is within the supported range.");
            T::default()
        }
    }
}

pub fn non_negative_float(errors: &mut FieldErrors, field: &str, value: f64) -> f64 {
    if !value.is_finite() {
        errors.add(field, "Enter a number.");
        return 0.0;
    }
    if value < 0.0 {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
        return 0.0;
    }
    value
}

/// Parse `raw` as one of a fixed set of choices, recording an error when it is not one.
pub fn choice<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        errors.add(
            field,
            format!(
                "Select a valid choice. {} is not one of the available choices.",
                raw.trim()
            ),
        );
    }
    parsed
}

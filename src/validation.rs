//! Field checks shared by every form. Each returns the cleaned value or a
//! [`ValidationError`] tagged with the offending field.

use crate::error::ValidationError;

pub fn required(field: &'static str, label: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

/// Counts Unicode scalar values, not bytes.
pub fn max_chars(
    field: &'static str,
    label: &str,
    value: &str,
    limit: usize,
) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count > limit {
        return Err(ValidationError::new(
            field,
            format!(
                "{} must be at most {} characters (currently {})",
                label, limit, count
            ),
        ));
    }
    Ok(())
}

pub fn min_len(
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    }
    Ok(())
}

fn parse_number(field: &'static str, label: &str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::new(field, format!("{} must be a number", label)))
}

pub fn positive_number(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<f64, ValidationError> {
    let n = parse_number(field, label, value)?;
    if n <= 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{} must be greater than 0", label),
        ));
    }
    Ok(n)
}

pub fn matching(
    field: &'static str,
    value: &str,
    confirmation: &str,
    message: &str,
) -> Result<(), ValidationError> {
    if value != confirmation {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// At least 8 characters with an uppercase letter, a digit and a symbol.
pub fn password_strength(field: &'static str, value: &str) -> Result<(), ValidationError> {
    min_len(field, "Password", value, 8)?;
    let problem = if !value.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain an uppercase letter")
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain a number")
    } else if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        Some("Password must contain a special character")
    } else {
        None
    };
    match problem {
        Some(message) => Err(ValidationError::new(field, message)),
        None => Ok(()),
    }
}

/// Blank input becomes `None`.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

//! Write-time bounds checks shared by every construction path
//!
//! The same rules are repeated as table constraints in the `migration` crate;
//! these are the in-process layer and run before anything reaches the store.

use crate::codec::{
    FIRST_ROW, Format, MAX_BOTTOM_ROW, MAX_RIGHT_COLUMN, PREFIX_MAX_LENGTH, SEPARATOR,
};
use crate::common::errors::{LabwareError, LabwareResult, ValidationError};
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Check a format's shape, collecting every violation instead of stopping at
/// the first one.
pub fn validate_format_bounds(
    bottom_row: &str,
    right_column: i32,
    prefix: &str,
) -> Result<(), Vec<ValidationError>> {
    let mut violations = Vec::new();

    let mut rows = bottom_row.chars();
    match (rows.next(), rows.next()) {
        (Some(row), None) => {
            if !(FIRST_ROW..=MAX_BOTTOM_ROW).contains(&row) {
                violations.push(ValidationError::new(
                    "bottom_row",
                    format!("'{row}' must be between '{FIRST_ROW}' and '{MAX_BOTTOM_ROW}'"),
                ));
            }
        }
        _ => violations.push(ValidationError::new(
            "bottom_row",
            format!("'{bottom_row}' must be exactly one letter"),
        )),
    }

    if !(1..=i32::from(MAX_RIGHT_COLUMN)).contains(&right_column) {
        violations.push(ValidationError::new(
            "right_column",
            format!("{right_column} must be between 1 and {MAX_RIGHT_COLUMN}"),
        ));
    }

    if prefix.contains(SEPARATOR) {
        violations.push(ValidationError::new(
            "prefix",
            format!("'{prefix}' must not contain '{SEPARATOR}'"),
        ));
    }
    // Multi-byte characters would throw off the fixed code width
    if !prefix.is_ascii() {
        violations.push(ValidationError::new(
            "prefix",
            format!("'{prefix}' must be ASCII"),
        ));
    }
    if prefix.len() > PREFIX_MAX_LENGTH {
        violations.push(ValidationError::new(
            "prefix",
            format!("'{prefix}' must be at most {PREFIX_MAX_LENGTH} characters"),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// A format's purpose describes how contents should be interpreted and may not
/// be blank.
pub fn validate_purpose(purpose: &str) -> Result<(), ValidationError> {
    if purpose.trim().is_empty() {
        return Err(ValidationError::new("purpose", "must not be blank"));
    }
    Ok(())
}

/// Check that a well position lies inside its container's format.
pub fn validate_well_bounds(row: char, column: i32, format: &Format) -> LabwareResult<()> {
    if !(FIRST_ROW..=format.bottom_row()).contains(&row) {
        return Err(LabwareError::range("row", row, FIRST_ROW, format.bottom_row()));
    }
    if !(1..=i32::from(format.right_column())).contains(&column) {
        return Err(LabwareError::range(
            "column",
            column,
            1,
            format.right_column(),
        ));
    }
    Ok(())
}

/// Reject a candidate identifier that is already taken.
pub fn validate_uniqueness<T, S>(
    resource: &'static str,
    field: &'static str,
    candidate: &T,
    existing: &HashSet<T, S>,
) -> LabwareResult<()>
where
    T: Eq + Hash + ToString,
    S: BuildHasher,
{
    if existing.contains(candidate) {
        tracing::warn!("Duplicate {resource} {field}: {}", candidate.to_string());
        return Err(LabwareError::Uniqueness {
            resource,
            field,
            value: candidate.to_string(),
        });
    }
    Ok(())
}

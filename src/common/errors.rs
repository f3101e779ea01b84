use sea_orm::{DbErr, SqlErr};
use std::fmt;
use thiserror::Error;

/// One violated rule, reported alongside every other violation found for the
/// same record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors raised while encoding, validating, or storing labware records.
///
/// All variants are recoverable and meant to be shown to whoever is creating
/// the record.
#[derive(Debug, Error)]
pub enum LabwareError {
    /// Input does not match the identifier grammar
    #[error("cannot parse '{input}' as {expected}")]
    Parse {
        input: String,
        expected: &'static str,
    },
    /// Well-formed value outside the bounds declared by its format
    #[error("{field} {value} is outside {min}..={max}")]
    Range {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    /// Every violated rule of a format or well
    #[error("validation failed: {}", Violations(.0))]
    Validation(Vec<ValidationError>),
    /// Generated or supplied identifier collides with an existing one
    #[error("{resource} with {field} '{value}' already exists")]
    Uniqueness {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    /// No number left that fits the digits reserved for a format
    #[error("format {format_key} has no sequence numbers left: {width} digits hold at most {max}")]
    Exhausted {
        format_key: String,
        width: usize,
        max: u64,
    },
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

struct Violations<'a>(&'a [ValidationError]);

impl fmt::Display for Violations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl LabwareError {
    pub fn range(
        field: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::Range {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn parse(input: impl Into<String>, expected: &'static str) -> Self {
        Self::Parse {
            input: input.into(),
            expected,
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Violations carried by this error, if it is a validation failure.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }
}

/// Extension trait mapping store rejections onto the same errors the
/// in-process checks raise.
pub trait DbErrorExt {
    fn to_labware_error(self, resource: &'static str, field: &'static str, value: &str)
    -> LabwareError;
}

impl DbErrorExt for DbErr {
    fn to_labware_error(
        self,
        resource: &'static str,
        field: &'static str,
        value: &str,
    ) -> LabwareError {
        match self.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => LabwareError::Uniqueness {
                resource,
                field,
                value: value.to_string(),
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                LabwareError::Validation(vec![ValidationError::new(field, message)])
            }
            _ => {
                let message = self.to_string();
                if message.contains("CHECK constraint") || message.contains("check constraint") {
                    LabwareError::Validation(vec![ValidationError::new(field, message)])
                } else {
                    LabwareError::Database(self)
                }
            }
        }
    }
}

/// Result type alias for labware operations
pub type LabwareResult<T> = Result<T, LabwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_violation() {
        let err = LabwareError::Validation(vec![
            ValidationError::new("bottom_row", "must be one letter"),
            ValidationError::new("prefix", "must not contain '.'"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: bottom_row must be one letter; prefix must not contain '.'"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_range_error_message() {
        let err = LabwareError::range("row", 'Q', 'A', 'H');
        assert_eq!(err.to_string(), "row Q is outside A..=H");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_unknown_db_error_stays_database() {
        let err = DbErr::Custom("connection reset".to_string()).to_labware_error(
            "container",
            "code",
            "H12f00000000001",
        );
        assert!(matches!(err, LabwareError::Database(_)));
    }

    #[test]
    fn test_check_constraint_db_error_becomes_validation() {
        let err = DbErr::Custom("CHECK constraint failed: row_letter".to_string())
            .to_labware_error("well", "row_letter", "Q");
        assert!(matches!(err, LabwareError::Validation(ref v) if v[0].field == "row_letter"));
    }
}

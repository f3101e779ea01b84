//! Fixed-width, sortable identifiers for formats, containers, and wells
//!
//! Every number in an identifier is zero padded to a fixed width so that
//! ordering the identifiers as plain strings orders them numerically.
//!
//! | identifier     | example            |
//! |----------------|--------------------|
//! | format key     | `H12f`             |
//! | container code | `H12f00000000001`  |
//! | well label     | `A01`              |
//! | well key       | `H12f00000000001.A01` |

use crate::common::errors::{LabwareError, LabwareResult};
use crate::validation::validate_format_bounds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top row of every container
pub const FIRST_ROW: char = 'A';
/// Bottom row of a 16 * 24 == 384-well plate
pub const MAX_BOTTOM_ROW: char = 'P';
/// Right column of a 16 * 24 == 384-well plate
pub const MAX_RIGHT_COLUMN: u8 = 24;
/// Digits of the column number in a well label
pub const LABEL_COLUMN_WIDTH: usize = 2;
/// Separates a container code from a well label
pub const SEPARATOR: char = '.';
/// Longest prefix a format may carry; leaves at least one sequence digit
pub const PREFIX_MAX_LENGTH: usize = 11;
/// Bottom row, two column digits, then prefix and sequence digits
pub const CONTAINER_CODE_LENGTH: usize = 1 + LABEL_COLUMN_WIDTH + PREFIX_MAX_LENGTH + 1;

/// Rows, columns, and prefix of a class of containers.
///
/// Only constructible through [`Format::new`], so a value of this type always
/// satisfies the format bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Format {
    bottom_row: char,
    right_column: u8,
    prefix: String,
}

impl Format {
    /// Validate the bounds and build a format, reporting every violation.
    pub fn new(bottom_row: &str, right_column: i32, prefix: &str) -> LabwareResult<Self> {
        validate_format_bounds(bottom_row, right_column, prefix)
            .map_err(LabwareError::Validation)?;

        let bottom_row = bottom_row
            .chars()
            .next()
            .ok_or_else(|| LabwareError::parse(bottom_row, "a bottom row letter"))?;
        let right_column = u8::try_from(right_column)
            .map_err(|_| LabwareError::range("right_column", right_column, 1, MAX_RIGHT_COLUMN))?;

        Ok(Self {
            bottom_row,
            right_column,
            prefix: prefix.to_string(),
        })
    }

    pub fn bottom_row(&self) -> char {
        self.bottom_row
    }

    pub fn right_column(&self) -> u8 {
        self.right_column
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Derived key: bottom row, zero-padded right column, prefix (`H12f`)
    pub fn key(&self) -> String {
        format!(
            "{}{:0width$}{}",
            self.bottom_row,
            self.right_column,
            self.prefix,
            width = LABEL_COLUMN_WIDTH
        )
    }

    /// Digits left for the container number once the key is in place
    pub fn sequence_width(&self) -> usize {
        CONTAINER_CODE_LENGTH - self.key().len()
    }

    /// Largest container number that fits [`Format::sequence_width`]
    pub fn max_sequence(&self) -> u64 {
        max_for_width(self.sequence_width())
    }

    pub fn rows(&self) -> impl Iterator<Item = char> + use<> {
        FIRST_ROW..=self.bottom_row
    }

    pub fn contains(&self, row: char, column: u8) -> bool {
        (FIRST_ROW..=self.bottom_row).contains(&row) && (1..=self.right_column).contains(&column)
    }

    /// Number of wells in a container of this format
    pub fn capacity(&self) -> usize {
        self.rows().count() * usize::from(self.right_column)
    }

    /// Every well label of this format, row by row (`A01`, `A02`, ..., `B01`, ...).
    pub fn labels(&self) -> impl Iterator<Item = (char, u8)> + use<> {
        let right_column = self.right_column;
        self.rows()
            .flat_map(move |row| (1..=right_column).map(move |column| (row, column)))
    }

    /// Container code for the given number under this format.
    pub fn container_code(&self, number: u64) -> LabwareResult<String> {
        encode_container_code(&self.key(), number, self.sequence_width())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Largest number whose decimal representation fits `width` digits.
pub fn max_for_width(width: usize) -> u64 {
    u32::try_from(width)
        .ok()
        .and_then(|width| 10u64.checked_pow(width))
        .map_or(u64::MAX, |limit| limit - 1)
}

/// Encode a well position in Battleship notation (`A01`).
pub fn encode_well_label(row: char, column: u8) -> LabwareResult<String> {
    if !(FIRST_ROW..=MAX_BOTTOM_ROW).contains(&row) {
        return Err(LabwareError::range("row", row, FIRST_ROW, MAX_BOTTOM_ROW));
    }
    let max_column = max_for_width(LABEL_COLUMN_WIDTH);
    if column == 0 || u64::from(column) > max_column {
        return Err(LabwareError::range("column", column, 1, max_column));
    }
    Ok(format!("{row}{column:0width$}", width = LABEL_COLUMN_WIDTH))
}

/// Parse a label like `A01` (or unpadded `A1`) and check it against `format`.
pub fn decode_well_label(label: &str, format: &Format) -> LabwareResult<(char, u8)> {
    let (row, column) = parse_well_label(label)?;
    crate::validation::validate_well_bounds(row, i32::from(column), format)?;
    Ok((row, column))
}

/// Split a label into row letter and column number without any bounds check.
///
/// The column takes one or two digits.
pub fn parse_well_label(label: &str) -> LabwareResult<(char, u8)> {
    let mut chars = label.chars();
    let row = chars
        .next()
        .filter(char::is_ascii_uppercase)
        .ok_or_else(|| LabwareError::parse(label, "a well label like 'A01'"))?;
    let digits = chars.as_str();
    if digits.is_empty()
        || digits.len() > LABEL_COLUMN_WIDTH
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(LabwareError::parse(label, "a well label like 'A01'"));
    }
    let column: u8 = digits
        .parse()
        .map_err(|_| LabwareError::range("column", digits, 1, MAX_RIGHT_COLUMN))?;
    Ok((row, column))
}

/// Concatenate a format key with `number` zero padded to `width` digits.
pub fn encode_container_code(format_key: &str, number: u64, width: usize) -> LabwareResult<String> {
    if format_key.contains(SEPARATOR) {
        return Err(LabwareError::Validation(vec![
            crate::common::errors::ValidationError::new(
                "format_key",
                format!("must not contain '{SEPARATOR}'"),
            ),
        ]));
    }
    let max = max_for_width(width);
    if number > max {
        return Err(LabwareError::range("sequence number", number, 0, max));
    }
    Ok(format!("{format_key}{number:0width$}"))
}

/// Recover the number from a container code built by [`encode_container_code`].
pub fn decode_container_code(code: &str, format_key: &str) -> LabwareResult<u64> {
    let digits = code
        .strip_prefix(format_key)
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| LabwareError::parse(code, "a container code of its format"))?;
    digits
        .parse()
        .map_err(|_| LabwareError::parse(code, "a container code of its format"))
}

/// Well key: container code, separator, well label.
pub fn compose_key(container_code: &str, well_label: &str) -> String {
    format!("{container_code}{SEPARATOR}{well_label}")
}

/// Split a well key back into container code and well label.
pub fn split_key(key: &str) -> LabwareResult<(&str, &str)> {
    match key.split_once(SEPARATOR) {
        Some((code, label))
            if !code.is_empty() && !label.is_empty() && !label.contains(SEPARATOR) =>
        {
            Ok((code, label))
        }
        _ => Err(LabwareError::parse(key, "a well key like 'H12f00000000001.A01'")),
    }
}

/// Container code without its leading bottom row and right column (`f00000000001`).
pub fn short_code(code: &str) -> &str {
    code.get(1 + LABEL_COLUMN_WIDTH..).unwrap_or(code)
}

#[cfg(test)]
mod tests;

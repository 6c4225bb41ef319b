//! Spreadsheet cell values and their coercion rules.
//!
//! A [`Cell`] is one heterogeneous, possibly missing value read from a row of
//! the tabular source. Records never store cells directly: each field is
//! coerced exactly once at marshalling time through [`Cell::to_text`],
//! [`Cell::to_integer`] or [`cardinality_is_one`].
//!
//! # Example
//!
//! ```
//! use dmcar_core::cell::Cell;
//!
//! assert_eq!(Cell::Null.to_text(), "");
//! assert_eq!(Cell::Float(2.0).to_text(), "2.0");
//! assert_eq!(Cell::from("12").to_integer().unwrap(), 12);
//! assert!(Cell::from("twelve").to_integer().is_err());
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// A single value read from a tabular source.
///
/// Missing values are [`Cell::Null`]. Spreadsheet exports that mark missing
/// numbers as `NaN` are treated as missing too.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A missing value.
    #[default]
    Null,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A text value.
    Text(String),
}

/// Error raised when a cell cannot be coerced to an integer.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert `{value}` to an integer")]
pub struct CoerceError {
    value: String,
}

impl CoerceError {
    fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The offending value, as text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Cell {
    /// Returns `true` for missing values.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Coerces the cell to text.
    ///
    /// Missing values become the empty string, text is returned unchanged and
    /// every other scalar uses its textual representation. Whole floats keep a
    /// trailing `.0`, so `2.0` stays `"2.0"`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) if value.is_nan() => String::new(),
            Cell::Float(value) => format_float(*value),
            Cell::Text(value) => value.clone(),
        }
    }

    /// Coerces the cell to an integer.
    ///
    /// Missing values and blank text become `0`. Text must hold an integer,
    /// floats are truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] for non-numeric text and for infinite floats.
    pub fn to_integer(&self) -> Result<i64, CoerceError> {
        match self {
            Cell::Null => Ok(0),
            Cell::Bool(value) => Ok(i64::from(*value)),
            Cell::Int(value) => Ok(*value),
            Cell::Float(value) if value.is_nan() => Ok(0),
            Cell::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
            Cell::Float(value) => Err(CoerceError::new(value.to_string())),
            Cell::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| CoerceError::new(value.as_str()))
            }
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Derives the "cardinality is one" flag from a cardinality cell.
///
/// The comparison is case-insensitive: `one`, `1`, `none` and a missing or
/// blank value mean one; anything else means many.
pub fn cardinality_is_one(cell: &Cell) -> bool {
    let text = cell.to_text();
    let text = text.trim();
    text.is_empty()
        || text.eq_ignore_ascii_case("one")
        || text == "1"
        || text.eq_ignore_ascii_case("none")
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

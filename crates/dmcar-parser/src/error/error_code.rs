//! Error codes for the DMCAR diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input errors
//! - `E1xx` - Marshalling errors
//! - `E2xx` - Resolution warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (E0xx)
    // =========================================================================
    /// Missing required column.
    ///
    /// The table header does not contain one of the required columns.
    /// Column names are case-sensitive.
    E001,

    /// Malformed delimited text.
    ///
    /// The CSV input could not be split into rows and fields, usually
    /// because of an unterminated quoted field.
    E002,

    /// Malformed JSON input.
    ///
    /// JSON input must be an array of objects mapping column names to
    /// null, boolean, number or string values.
    E003,

    /// Ragged row.
    ///
    /// A CSV row has more fields than the header has columns.
    E004,

    // =========================================================================
    // Marshalling Errors (E1xx)
    // =========================================================================
    /// Malformed numeric field.
    ///
    /// A field that must hold an integer, such as `Sequence`, holds
    /// non-numeric text.
    E100,

    // =========================================================================
    // Resolution Warnings (E2xx)
    // =========================================================================
    /// Unresolved parent domain.
    ///
    /// A domain names a parent domain that does not exist in its namespace.
    /// The domain is placed directly under the root.
    E200,

    /// Unresolved class domain.
    ///
    /// A class names a domain that does not exist in its namespace.
    E201,

    /// Unresolved attribute class.
    ///
    /// An attribute names a class that does not exist in its namespace.
    E202,

    /// Unresolved relationship class.
    ///
    /// A relationship end names a class that does not exist in its namespace.
    E203,

    /// Unresolved relationship attribute.
    ///
    /// A relationship end names an attribute that does not exist on its class.
    /// The end is treated as unlinked.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Input errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Marshalling errors
            ErrorCode::E100 => "E100",
            // Resolution warnings
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Input errors
            ErrorCode::E001 => "missing required column",
            ErrorCode::E002 => "malformed delimited text",
            ErrorCode::E003 => "malformed JSON input",
            ErrorCode::E004 => "ragged row",
            // Marshalling errors
            ErrorCode::E100 => "malformed numeric field",
            // Resolution warnings
            ErrorCode::E200 => "unresolved parent domain",
            ErrorCode::E201 => "unresolved class domain",
            ErrorCode::E202 => "unresolved attribute class",
            ErrorCode::E203 => "unresolved relationship class",
            ErrorCode::E204 => "unresolved relationship attribute",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "missing required column");
        assert_eq!(ErrorCode::E100.description(), "malformed numeric field");
        assert_eq!(
            ErrorCode::E204.description(),
            "unresolved relationship attribute"
        );
    }
}

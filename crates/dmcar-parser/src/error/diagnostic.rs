//! The core diagnostic type for the DMCAR error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, source row, and help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message about the tabular input.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - An optional 1-based data row number (the header is not counted)
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E100]: malformed Sequence value `first` (row 4)
///    = help: Sequence must be a whole number
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    row: Option<usize>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use dmcar_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("malformed Sequence value `first`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_row(4)
    ///     .with_help("Sequence must be a whole number");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the data row number, if any.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the 1-based data row the diagnostic points at.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            row: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message (row 3)" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(row) = self.row {
            write!(f, " (row {row})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.row().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builders() {
        let diag = Diagnostic::warning("unresolved class")
            .with_code(ErrorCode::E201)
            .with_row(7)
            .with_help("add the domain");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.row(), Some(7));
        assert_eq!(diag.help(), Some("add the domain"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("missing column `Domain`").with_code(ErrorCode::E001);
        assert_eq!(diag.to_string(), "error[E001]: missing column `Domain`");

        let diag = Diagnostic::warning("no such class").with_row(3);
        assert_eq!(diag.to_string(), "warning: no such class (row 3)");
    }
}

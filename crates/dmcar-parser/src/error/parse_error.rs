//! The ParseError type returned when a table cannot become a model.
//!
//! [`ParseError`] wraps the error [`Diagnostic`]s collected while reading
//! the input or marshalling its rows.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for the input and marshalling phases.
///
/// Always holds at least one error diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_display_single() {
        let err: ParseError = Diagnostic::error("missing column `Class`")
            .with_code(ErrorCode::E001)
            .into();

        assert_eq!(err.to_string(), "error[E001]: missing column `Class`");
    }

    #[test]
    fn test_display_counts_the_rest() {
        let err = ParseError::new(vec![
            Diagnostic::error("bad sequence").with_row(2),
            Diagnostic::error("bad sequence").with_row(5),
        ]);

        assert_eq!(err.to_string(), "error: bad sequence (row 2) (+1 more)");
    }
}

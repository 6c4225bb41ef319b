//! Collector for accumulating diagnostics during a processing phase.
//!
//! The [`DiagnosticCollector`] lets a phase report every problem it finds
//! instead of stopping at the first one.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
///
/// Unlike a plain error list, warnings are kept: [`DiagnosticCollector::finish`]
/// hands them back on success so callers can report data-quality issues.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ParseError)` with the error diagnostics.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            let errors = self
                .diagnostics
                .into_iter()
                .filter(|diag| diag.severity().is_error())
                .collect();
            Err(ParseError::new(errors))
        } else {
            Ok(self.diagnostics)
        }
    }

    /// Hands back everything emitted, for phases that only ever warn.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_empty_collector_finishes_ok() {
        let collector = DiagnosticCollector::new();
        assert_eq!(collector.finish().unwrap(), Vec::new());
    }

    #[test]
    fn test_warnings_are_returned() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("first").with_code(ErrorCode::E200));
        collector.emit(Diagnostic::warning("second").with_code(ErrorCode::E204));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message(), "first");
    }

    #[test]
    fn test_errors_fail_and_drop_warnings() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("a warning"));
        collector.emit(Diagnostic::error("bad sequence").with_code(ErrorCode::E100));
        collector.emit(Diagnostic::error("bad sequence again").with_code(ErrorCode::E100));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "bad sequence");
    }

    #[test]
    fn test_into_diagnostics_keeps_emission_order() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("Finance unassigned for domain Billing"));
        collector.emit(Diagnostic::warning("Ledger unassigned for class Invoice"));

        let messages: Vec<String> = collector
            .into_diagnostics()
            .iter()
            .map(|diag| diag.message().to_string())
            .collect();
        assert_eq!(
            messages,
            [
                "Finance unassigned for domain Billing",
                "Ledger unassigned for class Invoice"
            ]
        );
    }
}

//! Error and diagnostic system for the DMCAR parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Severity levels separating fatal errors from data-quality warnings
//! - A diagnostic collector that keeps going after the first problem
//!
//! # Example
//!
//! ```
//! # use dmcar_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("Sales unassigned for class Order")
//!     .with_code(ErrorCode::E201)
//!     .with_help("add a row defining domain `Sales`");
//! assert_eq!(diag.code(), Some(ErrorCode::E201));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;

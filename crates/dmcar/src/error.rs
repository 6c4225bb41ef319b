//! Error types for DMCAR operations.
//!
//! This module provides the main error type [`DmcarError`] which wraps
//! the failures of each processing stage.

use std::io;

use thiserror::Error;

use dmcar_parser::error::ParseError;

use crate::{attribution::AttributionError, structure::StructureError};

/// The main error type for DMCAR operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic produced while reading and
/// marshalling the table, each with its code and row where known.
#[derive(Debug, Error)]
pub enum DmcarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("Attribution error: {0}")]
    Attribution(#[from] AttributionError),
}

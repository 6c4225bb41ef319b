//! Export of resolved models into text diagram formats.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Table
//!     ↓ parse
//! Resolved Model
//!     ↓ export (this module)
//! Diagram Text
//! ```
//!
//! # Available Backends
//!
//! - [`mermaid`]: Mermaid `erDiagram` output via [`mermaid::MermaidExporter`]

pub mod mermaid;

use dmcar_core::model::Model;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders the whole model as diagram text.
    ///
    /// Unresolved references never fail an export: a backend renders what
    /// it can from the raw records.
    fn export_model(&self, model: &Model) -> String;
}

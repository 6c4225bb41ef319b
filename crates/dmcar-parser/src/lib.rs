//! DMCAR Parser
//!
//! Turns a DMCAR table (Domains, Classes, Attributes, Relationships in one
//! wide sheet) into a resolved [`Model`](dmcar_core::model::Model).
//!
//! # Pipeline
//!
//! ```text
//! Source text → Table → Records → Resolution
//! ```
//!
//! 1. **Reading** ([`table`]): CSV or JSON rows, checked for required columns
//! 2. **Marshalling** ([`marshal`]): coerced, deduplicated records
//! 3. **Resolution** ([`resolve`]): parent links, with warnings for failed lookups
//!
//! Reading and marshalling fail with a [`ParseError`](error::ParseError).
//! Resolution never fails: unresolved references are kept in the model and
//! reported as warnings.
//!
//! # Example
//!
//! ```
//! use dmcar_parser::{InputFormat, parse_source};
//!
//! let source = r#"[{
//!     "Namespace": "shop", "Domain": "Sales", "DomainLabel": null,
//!     "DomainDescription": null, "ParentDomain": null, "Class": "Order",
//!     "ClassLabel": "Order", "ClassDescription": null, "Attribute": "id",
//!     "AttributeLabel": null, "AttributeDescription": null, "Sequence": 1,
//!     "DataType": "int", "Nulls": "No", "IsPK": "Yes", "Relationship": null,
//!     "RelationshipLabel": null, "RelationshipDescription": null,
//!     "RelationshipType": null, "FromNamespace": null, "FromClass": null,
//!     "FromAttribute": null, "FromCardinality": null, "ToNamespace": null,
//!     "ToClass": null, "ToAttribute": null, "ToCardinality": null
//! }]"#;
//!
//! let resolution = parse_source(source, InputFormat::Json).unwrap();
//! assert_eq!(resolution.model().classes_count(), 1);
//! assert!(resolution.diagnostics().is_empty());
//! ```

pub mod error;
pub mod marshal;
pub mod resolve;
pub mod table;

mod csv;

pub use marshal::marshal;
pub use resolve::{Resolution, resolve};
pub use table::{Column, InputFormat, Row, Table};

use log::{debug, info};

use error::ParseError;

/// Marshals and resolves an already read table.
///
/// # Errors
///
/// Returns a [`ParseError`] if any row holds a malformed numeric field.
pub fn parse(table: &Table) -> Result<Resolution, ParseError> {
    info!(rows = table.len(); "Marshalling rows");
    let records = marshal(table)?;

    info!("Resolving references");
    let resolution = resolve(&records);
    debug!(warnings = resolution.diagnostics().len(); "Resolution finished");

    Ok(resolution)
}

/// Reads `source` in the given format, then marshals and resolves it.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed input, missing columns or
/// malformed numeric fields.
pub fn parse_source(source: &str, format: InputFormat) -> Result<Resolution, ParseError> {
    debug!(format:? = format; "Reading table");
    let table = Table::parse(source, format)?;
    parse(&table)
}

//! DMCAR - turn Domain/Class/Attribute/Relationship tables into diagrams.
//!
//! Reading, resolution, structure building, domain attribution and Mermaid
//! rendering for DMCAR data-model tables.

pub mod attribution;
pub mod config;
pub mod export;
pub mod structure;

mod error;

#[cfg(test)]
mod test_utils;

pub use dmcar_core::{cell, model, record};
pub use dmcar_parser::{InputFormat, Resolution};

pub use attribution::{AttributionError, Attribution};
pub use error::DmcarError;
pub use structure::StructureError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, mermaid::MermaidExporter};
use model::Model;
use structure::{DomainHierarchy, FullModelGraph};

/// Builder for parsing, rendering and attributing DMCAR models.
///
/// # Examples
///
/// ```rust,no_run
/// use dmcar::{DiagramBuilder, InputFormat, config::AppConfig};
///
/// let source = std::fs::read_to_string("model.csv").expect("Failed to read");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to a resolved model
/// let resolution = builder.parse(&source, InputFormat::Csv)
///     .expect("Failed to parse");
///
/// // Render the model as a Mermaid ER diagram
/// let diagram = builder.render_mermaid(resolution.model());
///
/// // Attribute every relationship to a domain
/// let attribution = builder.attribute_domains(resolution.model())
///     .expect("Failed to attribute");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration with render and hierarchy settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a table into a resolved model.
    ///
    /// This reads the table in `format`, marshals its rows into records and
    /// resolves every cross-reference. Unresolved references do not fail
    /// parsing; they are returned as warnings in the [`Resolution`].
    ///
    /// # Errors
    ///
    /// Returns `DmcarError::Parse` for malformed input, missing columns or
    /// malformed numeric fields.
    pub fn parse(&self, source: &str, format: InputFormat) -> Result<Resolution, DmcarError> {
        info!(format:% = format; "Parsing table");

        let resolution = dmcar_parser::parse_source(source, format)?;

        let model = resolution.model();
        debug!(
            domains = model.domains_count(),
            classes = model.classes_count(),
            attributes = model.attributes_count(),
            relationships = model.relationships_count(),
            warnings = resolution.diagnostics().len();
            "Table parsed successfully"
        );
        trace!(model:?; "Resolved model");

        Ok(resolution)
    }

    /// Render a resolved model as Mermaid `erDiagram` text.
    pub fn render_mermaid(&self, model: &Model) -> String {
        info!(classes = model.classes_count(); "Rendering Mermaid diagram");
        let exporter = MermaidExporter::new(self.config.render().clone());
        exporter.export_model(model)
    }

    /// Build the domain hierarchy of a resolved model.
    ///
    /// # Errors
    ///
    /// Returns `DmcarError::Structure` for a domain parent cycle or a class
    /// without a resolved domain.
    pub fn build_hierarchy(&self, model: &Model) -> Result<DomainHierarchy, DmcarError> {
        info!("Building domain hierarchy");
        let hierarchy = DomainHierarchy::build(model, self.config.hierarchy().root_name())?;
        Ok(hierarchy)
    }

    /// Attribute every relationship to the deepest domain containing both ends.
    ///
    /// # Errors
    ///
    /// Returns `DmcarError::Structure` if the model cannot be turned into
    /// graphs (see [`DiagramBuilder::build_hierarchy`] and
    /// [`ModelGraph::full`](structure::ModelGraph::full)), or
    /// `DmcarError::Attribution` if a class cannot be placed.
    pub fn attribute_domains(&self, model: &Model) -> Result<Attribution, DmcarError> {
        let hierarchy = self.build_hierarchy(model)?;

        info!("Building model graph");
        let graph = FullModelGraph::full(model)?;

        let attribution = attribution::attribute_relationships(model, &hierarchy, &graph)?;
        debug!(
            domains = attribution.by_domain().len(),
            relationships = attribution.by_relationship().len();
            "Relationships attributed"
        );
        Ok(attribution)
    }
}

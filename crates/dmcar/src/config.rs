//! Configuration types for DMCAR processing.
//!
//! This module provides configuration structures that control how diagrams
//! are rendered and how the domain hierarchy is built. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`RenderConfig`] - Options for the Mermaid renderer.
//! - [`HierarchyConfig`] - Options for the domain hierarchy.
//!
//! # Example
//!
//! ```
//! # use dmcar::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.hierarchy().root_name(), "RootDomain");
//! assert!(!config.render().include_descriptions());
//! ```

use serde::Deserialize;

/// Name given to the synthetic root of the domain hierarchy by default.
pub const DEFAULT_ROOT_NAME: &str = "RootDomain";

/// Top-level application configuration.
///
/// Groups [`RenderConfig`] and [`HierarchyConfig`] into a single
/// configuration root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Hierarchy configuration section.
    #[serde(default)]
    hierarchy: HierarchyConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, hierarchy: HierarchyConfig) -> Self {
        Self { render, hierarchy }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the hierarchy configuration.
    pub fn hierarchy(&self) -> &HierarchyConfig {
        &self.hierarchy
    }
}

/// Mermaid renderer options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Emit attribute descriptions as quoted comments.
    #[serde(default)]
    include_descriptions: bool,
}

impl RenderConfig {
    pub fn new(include_descriptions: bool) -> Self {
        Self {
            include_descriptions,
        }
    }

    /// Whether attribute lines carry their description.
    pub fn include_descriptions(&self) -> bool {
        self.include_descriptions
    }
}

/// Domain hierarchy options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    /// Name of the synthetic root domain.
    #[serde(default = "default_root_name")]
    root_name: String,
}

impl HierarchyConfig {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
        }
    }

    /// Name reported for relationships attributed to the root.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME)
    }
}

fn default_root_name() -> String {
    DEFAULT_ROOT_NAME.to_string()
}

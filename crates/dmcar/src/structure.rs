//! Graph structures built from a resolved model.
//!
//! Two graphs are derived from a [`Model`](dmcar_core::model::Model):
//! - **Domain hierarchy** ([`DomainHierarchy`]): a tree of domains and
//!   classes under a synthetic root, with edges pointing from child to parent
//! - **Model graph** ([`ModelGraph`]): classes as nodes and relationships as
//!   directed edges from the `From` class to the `To` class

use thiserror::Error;

use dmcar_core::record::End;

mod hierarchy;
mod model_graph;

pub use hierarchy::{DomainHierarchy, HierarchyNode, HierarchyNodeKind};
pub use model_graph::{ClassNode, FullModelGraph, ModelGraph, ReducedModelGraph};

/// Failures while building a graph from the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A class whose domain did not resolve cannot be placed in a graph.
    #[error("class `{class}` has no domain: {reason}")]
    UnplacedClass { class: String, reason: String },

    /// Following parent links from `domain` leads back to `domain`.
    #[error("domain `{domain}` is part of a parent cycle")]
    DomainCycle { domain: String },

    /// A relationship end names a class that did not resolve.
    #[error("relationship `{relationship}` has no {end} class: {reason}")]
    DanglingEndpoint {
        relationship: String,
        end: End,
        reason: String,
    },
}

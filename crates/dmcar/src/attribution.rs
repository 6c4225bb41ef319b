//! Relationship attribution by lowest common ancestor.
//!
//! A relationship belongs to the deepest domain that contains both of its
//! classes. Each class's root path is looked up in the [`DomainHierarchy`]
//! and the two paths are compared from the root down; the last shared node
//! that is a domain (or the root) wins. When both ends are the same class the
//! shared prefix ends at that class, so the class's own domain is used.

use std::collections::{HashMap, hash_map::Entry};

use indexmap::IndexMap;
use log::{debug, info};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use thiserror::Error;

use dmcar_core::model::{ClassId, Model};

use crate::structure::{ClassNode, DomainHierarchy, FullModelGraph};

/// Failures while attributing relationships.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributionError {
    #[error("class `{class}` is not in the domain hierarchy")]
    ClassNotInHierarchy { class: String },

    #[error("class `{class}` has no path to the root domain")]
    NoPathToRoot { class: String },
}

/// Relationships grouped by owning domain, plus the reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribution {
    #[serde(rename = "domains")]
    by_domain: IndexMap<String, Vec<String>>,
    #[serde(rename = "relationships")]
    by_relationship: IndexMap<String, String>,
}

impl Attribution {
    /// Domain name to relationship names, in first-attributed order.
    pub fn by_domain(&self) -> &IndexMap<String, Vec<String>> {
        &self.by_domain
    }

    /// Relationship name to domain name, in relationship order.
    pub fn by_relationship(&self) -> &IndexMap<String, String> {
        &self.by_relationship
    }

    pub fn domain_of(&self, relationship: &str) -> Option<&str> {
        self.by_relationship.get(relationship).map(String::as_str)
    }

    fn insert(&mut self, relationship: String, domain: String) {
        self.by_domain
            .entry(domain.clone())
            .or_default()
            .push(relationship.clone());
        self.by_relationship.insert(relationship, domain);
    }
}

/// Attributes every edge of `graph` to a domain of `hierarchy`.
///
/// `graph` and `hierarchy` must be built from `model`.
///
/// # Errors
///
/// Returns an [`AttributionError`] when an edge endpoint is missing from the
/// hierarchy or cannot reach its root.
pub fn attribute_relationships(
    model: &Model,
    hierarchy: &DomainHierarchy,
    graph: &FullModelGraph,
) -> Result<Attribution, AttributionError> {
    info!(relationships = graph.edges_count(); "Attributing relationships");

    let mut paths = RootPaths::new(hierarchy);
    let mut attribution = Attribution::default();

    for (from, to, relationship) in graph.edges() {
        let from_path = paths.get(from)?;
        let to_path = paths.get(to)?;
        let ancestor = deepest_shared_domain(hierarchy, &from_path, &to_path);

        let name = model.relationship(*relationship).name();
        let domain = hierarchy.node(ancestor).name();
        debug!(relationship = name, from = from.name(), to = to.name(), domain = domain; "Relationship attributed");

        attribution.insert(name.to_string(), domain.to_string());
    }

    Ok(attribution)
}

/// Deepest domain node containing both `from` and `to`.
///
/// # Errors
///
/// Returns [`AttributionError::ClassNotInHierarchy`] if either class has no
/// node in `hierarchy`.
pub fn lowest_common_ancestor(
    model: &Model,
    hierarchy: &DomainHierarchy,
    from: ClassId,
    to: ClassId,
) -> Result<NodeIndex, AttributionError> {
    let from_path = root_path(hierarchy, from, &class_name(model, from))?;
    let to_path = root_path(hierarchy, to, &class_name(model, to))?;
    Ok(deepest_shared_domain(hierarchy, &from_path, &to_path))
}

/// Display name of `class`, or its index when `model` does not know it.
fn class_name(model: &Model, class: ClassId) -> String {
    model
        .get_class(class)
        .map(|class| class.name().to_string())
        .unwrap_or_else(|| format!("#{}", class.index()))
}

/// Memoized root paths, one lookup per class.
struct RootPaths<'h> {
    hierarchy: &'h DomainHierarchy,
    cache: HashMap<ClassId, Vec<NodeIndex>>,
}

impl<'h> RootPaths<'h> {
    fn new(hierarchy: &'h DomainHierarchy) -> Self {
        Self {
            hierarchy,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, class: &ClassNode) -> Result<Vec<NodeIndex>, AttributionError> {
        match self.cache.entry(class.class()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let path = root_path(self.hierarchy, class.class(), class.name())?;
                Ok(entry.insert(path).clone())
            }
        }
    }
}

/// Path from the root down to `class`.
fn root_path(
    hierarchy: &DomainHierarchy,
    class: ClassId,
    name: &str,
) -> Result<Vec<NodeIndex>, AttributionError> {
    let node = hierarchy
        .class_node(class)
        .ok_or_else(|| AttributionError::ClassNotInHierarchy {
            class: name.to_string(),
        })?;
    let mut path = hierarchy
        .path_to_root(node)
        .ok_or_else(|| AttributionError::NoPathToRoot {
            class: name.to_string(),
        })?;
    path.reverse();
    Ok(path)
}

fn deepest_shared_domain(
    hierarchy: &DomainHierarchy,
    from_path: &[NodeIndex],
    to_path: &[NodeIndex],
) -> NodeIndex {
    from_path
        .iter()
        .zip(to_path)
        .take_while(|(from, to)| from == to)
        .map(|(node, _)| *node)
        .filter(|node| hierarchy.node(*node).is_domain())
        .last()
        .unwrap_or_else(|| hierarchy.root())
}

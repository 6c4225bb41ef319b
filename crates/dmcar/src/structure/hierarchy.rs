//! Domain hierarchy: domains and classes under a synthetic root.
//!
//! Every edge points from a child to its parent: class to domain, domain to
//! parent domain, top-level domain to root. Domains whose parent did not
//! resolve hang off the root as well, so every node reaches the root once
//! cycles are ruled out.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction, algo,
    graph::{DiGraph, NodeIndex},
};

use dmcar_core::model::{ClassId, DomainId, Model, Reference};

use super::StructureError;

/// What a hierarchy node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HierarchyNodeKind {
    Root,
    Domain,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    kind: HierarchyNodeKind,
    name: String,
}

impl HierarchyNode {
    fn new(kind: HierarchyNodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> HierarchyNodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root and domain nodes are the ones a relationship can be attributed to.
    pub fn is_domain(&self) -> bool {
        matches!(
            self.kind,
            HierarchyNodeKind::Root | HierarchyNodeKind::Domain
        )
    }
}

/// Containment tree of a model.
#[derive(Debug)]
pub struct DomainHierarchy {
    graph: DiGraph<HierarchyNode, ()>,
    root: NodeIndex,
    domains: HashMap<DomainId, NodeIndex>,
    classes: HashMap<ClassId, NodeIndex>,
}

impl DomainHierarchy {
    /// Builds the hierarchy of `model` under a root called `root_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::DomainCycle`] if parent links loop, and
    /// [`StructureError::UnplacedClass`] for a class whose domain did not
    /// resolve.
    pub fn build(model: &Model, root_name: &str) -> Result<Self, StructureError> {
        let mut graph = DiGraph::new();
        let root = graph.add_node(HierarchyNode::new(HierarchyNodeKind::Root, root_name));

        let domains: HashMap<DomainId, NodeIndex> = model
            .domains()
            .map(|(id, domain)| {
                let node =
                    graph.add_node(HierarchyNode::new(HierarchyNodeKind::Domain, domain.name()));
                (id, node)
            })
            .collect();

        for (id, domain) in model.domains() {
            let parent = match domain.parent() {
                Some(Reference::Resolved(parent)) => domains[parent],
                Some(Reference::Unresolved(unresolved)) => {
                    debug!(
                        domain = domain.name(),
                        missing = unresolved.missing();
                        "Attaching domain with unknown parent to root"
                    );
                    root
                }
                None => root,
            };
            graph.add_edge(domains[&id], parent, ());
        }

        if let Err(cycle) = algo::toposort(&graph, None) {
            return Err(StructureError::DomainCycle {
                domain: graph[cycle.node_id()].name().to_string(),
            });
        }

        let mut classes = HashMap::with_capacity(model.classes_count());
        for (id, class) in model.classes() {
            let domain = class
                .domain()
                .ok()
                .map_err(|unresolved| StructureError::UnplacedClass {
                    class: class.name().to_string(),
                    reason: unresolved.to_string(),
                })?;
            let node = graph.add_node(HierarchyNode::new(HierarchyNodeKind::Class, class.name()));
            graph.add_edge(node, domains[&domain], ());
            classes.insert(id, node);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Domain hierarchy built"
        );
        trace!(graph:?; "Domain hierarchy");

        Ok(Self {
            graph,
            root,
            domains,
            classes,
        })
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` does not belong to this hierarchy.
    pub fn node(&self, idx: NodeIndex) -> &HierarchyNode {
        &self.graph[idx]
    }

    pub fn domain_node(&self, domain: DomainId) -> Option<NodeIndex> {
        self.domains.get(&domain).copied()
    }

    pub fn class_node(&self, class: ClassId) -> Option<NodeIndex> {
        self.classes.get(&class).copied()
    }

    /// The direct parent of `idx`; `None` for the root.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
    }

    /// Shortest path from `idx` up to the root, both ends included.
    ///
    /// Returns `None` if the root is unreachable, which cannot happen for a
    /// hierarchy returned by [`DomainHierarchy::build`].
    pub fn path_to_root(&self, idx: NodeIndex) -> Option<Vec<NodeIndex>> {
        algo::astar(
            &self.graph,
            idx,
            |node| node == self.root,
            |_| 1_usize,
            |_| 0_usize,
        )
        .map(|(_, path)| path)
    }

    /// For every domain name, the classes placed directly in it.
    ///
    /// Both domains and classes keep model order; domains without classes map
    /// to an empty list.
    pub fn domain_contents(&self) -> IndexMap<String, Vec<String>> {
        let mut contents: IndexMap<String, Vec<String>> = self
            .nodes_of_kind(HierarchyNodeKind::Domain)
            .map(|idx| (self.graph[idx].name().to_string(), Vec::new()))
            .collect();

        for idx in self.nodes_of_kind(HierarchyNodeKind::Class) {
            if let Some(domain) = self.parent(idx) {
                contents
                    .entry(self.graph[domain].name().to_string())
                    .or_default()
                    .push(self.graph[idx].name().to_string());
            }
        }
        contents
    }

    pub fn nodes_count(&self) -> usize {
        self.graph.node_count()
    }

    fn nodes_of_kind(&self, kind: HierarchyNodeKind) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |idx| self.graph[*idx].kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::ModelBuilder;

    fn names(hierarchy: &DomainHierarchy, path: &[NodeIndex]) -> Vec<String> {
        path.iter()
            .map(|idx| hierarchy.node(*idx).name().to_string())
            .collect()
    }

    #[test]
    fn test_paths_climb_to_root() {
        let model = ModelBuilder::new()
            .domain("A", "")
            .domain("B", "A")
            .class("Order", "B")
            .build();
        let hierarchy = DomainHierarchy::build(&model, "RootDomain").unwrap();

        let order = hierarchy.class_node(ClassId::new(0)).unwrap();
        let path = hierarchy.path_to_root(order).unwrap();
        assert_eq!(names(&hierarchy, &path), vec!["Order", "B", "A", "RootDomain"]);
        assert_eq!(hierarchy.parent(hierarchy.root()), None);
    }

    #[test]
    fn test_unknown_parent_attaches_to_root() {
        let model = ModelBuilder::new().domain("Billing", "Finance").build();
        let hierarchy = DomainHierarchy::build(&model, "Top").unwrap();

        let billing = hierarchy.domain_node(DomainId::new(0)).unwrap();
        assert_eq!(hierarchy.parent(billing), Some(hierarchy.root()));
        assert_eq!(hierarchy.node(hierarchy.root()).name(), "Top");
        assert_eq!(
            hierarchy.node(hierarchy.root()).kind(),
            HierarchyNodeKind::Root
        );
    }

    #[test]
    fn test_unplaced_class_is_rejected() {
        let model = ModelBuilder::new().class("Stray", "Nowhere").build();
        let err = DomainHierarchy::build(&model, "RootDomain").unwrap_err();

        assert_eq!(
            err,
            StructureError::UnplacedClass {
                class: "Stray".to_string(),
                reason: "Nowhere unassigned for class Stray".to_string(),
            }
        );
    }

    #[test]
    fn test_parent_cycles_are_rejected() {
        let model = ModelBuilder::new()
            .domain("A", "B")
            .domain("B", "A")
            .build();
        let err = DomainHierarchy::build(&model, "RootDomain").unwrap_err();
        assert!(matches!(err, StructureError::DomainCycle { .. }));

        let model = ModelBuilder::new().domain("Loop", "Loop").build();
        let err = DomainHierarchy::build(&model, "RootDomain").unwrap_err();
        assert_eq!(
            err,
            StructureError::DomainCycle {
                domain: "Loop".to_string()
            }
        );
    }

    #[test]
    fn test_domain_contents() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .domain("Empty", "Sales")
            .class("Order", "Sales")
            .class("OrderLine", "Sales")
            .build();
        let hierarchy = DomainHierarchy::build(&model, "RootDomain").unwrap();

        let contents = hierarchy.domain_contents();
        assert_eq!(
            contents.get("Sales"),
            Some(&vec!["Order".to_string(), "OrderLine".to_string()])
        );
        assert_eq!(contents.get("Empty"), Some(&Vec::new()));
        assert_eq!(contents.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_every_class_reaches_root(parents in prop::collection::vec(prop::option::of(0usize..8), 1..8)) {
            let names: Vec<String> = (0..parents.len()).map(|idx| format!("D{idx}")).collect();
            let mut builder = ModelBuilder::new();
            for (idx, parent) in parents.iter().enumerate() {
                let parent = parent.map(|parent| format!("D{parent}")).unwrap_or_default();
                builder = builder.domain(&names[idx], &parent);
            }
            for name in &names {
                builder = builder.class(&format!("C{name}"), name);
            }
            let model = builder.build();

            match DomainHierarchy::build(&model, "RootDomain") {
                Ok(hierarchy) => {
                    for (id, _) in model.classes() {
                        let node = hierarchy.class_node(id).unwrap();
                        let path = hierarchy.path_to_root(node).unwrap();
                        prop_assert_eq!(path.last().copied(), Some(hierarchy.root()));
                        prop_assert!(path.len() <= model.domains_count() + 2);
                    }
                }
                Err(err) => {
                    let is_cycle = matches!(err, StructureError::DomainCycle { .. });
                    prop_assert!(is_cycle, "unexpected error: {}", err);
                }
            }
        }
    }
}

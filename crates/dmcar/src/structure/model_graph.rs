//! Class multigraph with relationships as directed edges.
//!
//! Parallel edges are kept: two relationships between the same pair of classes
//! become two edges. The full variant carries the [`RelationshipId`] on each
//! edge; the reduced variant carries nothing.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};

use dmcar_core::{
    model::{ClassId, Model, RelationshipId},
    record::End,
};

use super::StructureError;

/// Class node with the data needed for grouping and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    class: ClassId,
    name: String,
    label: String,
    domain: String,
}

impl ClassNode {
    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label from the class record.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the domain the class belongs to.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Multigraph whose edges carry `E`.
#[derive(Debug)]
pub struct ModelGraph<E> {
    graph: DiGraph<ClassNode, E>,
    nodes: HashMap<ClassId, NodeIndex>,
}

/// Edges know their relationship; used for attribution.
pub type FullModelGraph = ModelGraph<RelationshipId>;

/// Edges carry no payload.
pub type ReducedModelGraph = ModelGraph<()>;

impl ModelGraph<RelationshipId> {
    /// Builds the graph with relationship ids on the edges.
    ///
    /// # Errors
    ///
    /// See [`ModelGraph::reduced`].
    pub fn full(model: &Model) -> Result<Self, StructureError> {
        Self::build(model, |id| id)
    }
}

impl ModelGraph<()> {
    /// Builds the graph without edge payloads.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnplacedClass`] for a class without a
    /// resolved domain and [`StructureError::DanglingEndpoint`] for a
    /// relationship end whose class did not resolve.
    pub fn reduced(model: &Model) -> Result<Self, StructureError> {
        Self::build(model, |_| ())
    }
}

impl<E> ModelGraph<E> {
    fn build(model: &Model, payload: impl Fn(RelationshipId) -> E) -> Result<Self, StructureError> {
        let mut graph = DiGraph::with_capacity(model.classes_count(), model.relationships_count());
        let mut nodes = HashMap::with_capacity(model.classes_count());

        for (id, class) in model.classes() {
            let domain = class
                .domain()
                .ok()
                .map_err(|unresolved| StructureError::UnplacedClass {
                    class: class.name().to_string(),
                    reason: unresolved.to_string(),
                })?;
            let node = graph.add_node(ClassNode {
                class: id,
                name: class.name().to_string(),
                label: class.label().to_string(),
                domain: model.domain(domain).name().to_string(),
            });
            nodes.insert(id, node);
        }

        for (id, relationship) in model.relationships() {
            let endpoint = |end: End| {
                relationship
                    .end(end)
                    .class()
                    .ok()
                    .map(|class| nodes[&class])
                    .map_err(|unresolved| StructureError::DanglingEndpoint {
                        relationship: relationship.name().to_string(),
                        end,
                        reason: unresolved.to_string(),
                    })
            };
            let source = endpoint(End::From)?;
            let target = endpoint(End::To)?;
            graph.add_edge(source, target, payload(id));
        }

        debug!(
            classes = graph.node_count(),
            relationships = graph.edge_count();
            "Model graph built"
        );

        Ok(Self { graph, nodes })
    }

    pub fn class_node(&self, class: ClassId) -> Option<NodeIndex> {
        self.nodes.get(&class).copied()
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` does not belong to this graph.
    pub fn node(&self, idx: NodeIndex) -> &ClassNode {
        &self.graph[idx]
    }

    /// Class nodes in model order.
    pub fn nodes(&self) -> impl Iterator<Item = &ClassNode> {
        self.graph.node_weights()
    }

    /// Edges as `(from, to, payload)` in relationship order.
    pub fn edges(&self) -> impl Iterator<Item = (&ClassNode, &ClassNode, &E)> {
        self.graph.edge_indices().filter_map(|edge| {
            let (source, target) = self.graph.edge_endpoints(edge)?;
            Some((&self.graph[source], &self.graph[target], &self.graph[edge]))
        })
    }

    pub fn nodes_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edges_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ModelBuilder;

    fn model() -> Model {
        ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .class("Customer", "Sales")
            .relationship("placed_by", ("Order", "", "Many"), ("Customer", "", "One"))
            .relationship("billed_to", ("Order", "", "Many"), ("Customer", "", "One"))
            .relationship("follows", ("Order", "", "One"), ("Order", "", "One"))
            .build()
    }

    #[test]
    fn test_full_graph_keeps_parallel_edges() {
        let model = model();
        let graph = FullModelGraph::full(&model).unwrap();

        assert_eq!(graph.nodes_count(), 2);
        assert_eq!(graph.edges_count(), 3);

        let edges: Vec<(&str, &str, &str)> = graph
            .edges()
            .map(|(from, to, id)| (from.name(), to.name(), model.relationship(*id).name()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("Order", "Customer", "placed_by"),
                ("Order", "Customer", "billed_to"),
                ("Order", "Order", "follows"),
            ]
        );
    }

    #[test]
    fn test_reduced_graph_matches_shape() {
        let model = model();
        let graph = ReducedModelGraph::reduced(&model).unwrap();

        assert_eq!(graph.edges_count(), 3);
        let order = graph.class_node(ClassId::new(0)).unwrap();
        let node = graph.node(order);
        assert_eq!(node.label(), "Order");
        assert_eq!(node.domain(), "Sales");
        assert_eq!(
            graph.nodes().map(ClassNode::name).collect::<Vec<_>>(),
            vec!["Order", "Customer"]
        );
    }

    #[test]
    fn test_dangling_endpoint_is_rejected() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .relationship("ships_to", ("Order", "", "Many"), ("Address", "", "One"))
            .build();

        let err = FullModelGraph::full(&model).unwrap_err();
        assert_eq!(
            err,
            StructureError::DanglingEndpoint {
                relationship: "ships_to".to_string(),
                end: End::To,
                reason: "to: Address unassigned for relationship ships_to".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "relationship `ships_to` has no to class: to: Address unassigned for relationship ships_to"
        );
    }
}

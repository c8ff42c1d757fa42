//! Connection graph between components.
//!
//! A component `A` is connected to `B` when one of `B`'s inputs is `A`'s
//! port identifier (its output, or its instance guid when it publishes no
//! output). The graph is directed and may contain cycles, self-loops and
//! disconnected parts. Each ordered `(source, target)` pair gets a single
//! edge no matter how often the identifier is repeated in the inputs.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use treehopper_core::semantic::Component;

use crate::error::TreehopperError;

/// Directed graph of components and the connections inferred between them.
#[derive(Debug)]
pub struct ComponentGraph<'a> {
    graph: DiGraph<&'a Component, ()>,
}

impl<'a> ComponentGraph<'a> {
    /// Builds the graph over `components`, keeping their order for node indices.
    pub fn new(components: &'a [Component]) -> Self {
        let mut graph = DiGraph::with_capacity(components.len(), components.len());

        let nodes: Vec<NodeIndex> = components
            .iter()
            .map(|component| graph.add_node(component))
            .collect();

        let mut ports: HashMap<&str, Vec<NodeIndex>> = HashMap::new();
        for (component, &idx) in components.iter().zip(&nodes) {
            ports.entry(component.port_id()).or_default().push(idx);
        }

        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        for (component, &target) in components.iter().zip(&nodes) {
            for input in component.inputs() {
                let Some(sources) = ports.get(input.as_str()) else {
                    debug!(component = component.guid(), input = input.as_str(); "Input has no producer");
                    continue;
                };

                for &source in sources {
                    if seen.insert((source, target)) {
                        trace!(from = source.index(), to = target.index(); "Connection");
                        graph.add_edge(source, target, ());
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Component graph built"
        );

        Self { graph }
    }

    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Components in document order.
    pub fn components(&self) -> impl Iterator<Item = &'a Component> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    /// Connections as `(source, target)` pairs, in the order they were inferred.
    ///
    /// # Errors
    ///
    /// Returns [`TreehopperError::Graph`] if an edge lost its endpoints.
    pub fn connections(&self) -> Result<Vec<(&'a Component, &'a Component)>, TreehopperError> {
        self.graph
            .edge_indices()
            .map(|edge| self.endpoints(edge))
            .collect()
    }

    fn endpoints(&self, edge: EdgeIndex) -> Result<(&'a Component, &'a Component), TreehopperError> {
        let (source, target) = self.graph.edge_endpoints(edge).ok_or_else(|| {
            TreehopperError::Graph(format!("edge {} has no endpoints", edge.index()))
        })?;
        Ok((self.graph[source], self.graph[target]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(index: usize, guid: &str) -> Component {
        Component::new(index, (0, 0), (10, 10), guid, guid)
    }

    fn guids<'a>(pairs: &[(&'a Component, &'a Component)]) -> Vec<(&'a str, &'a str)> {
        pairs
            .iter()
            .map(|(source, target)| (source.guid(), target.guid()))
            .collect()
    }

    #[test]
    fn test_connection_through_output() {
        let components = vec![
            component(0, "add").with_output(Some("o1".to_string())),
            component(1, "mul").with_inputs(vec!["o1".to_string()]),
        ];
        let graph = ComponentGraph::new(&components);

        assert_eq!(graph.component_count(), 2);
        assert_eq!(guids(&graph.connections().unwrap()), vec![("add", "mul")]);
    }

    #[test]
    fn test_connection_through_guid() {
        let components = vec![
            component(0, "slider"),
            component(1, "panel").with_inputs(vec!["slider".to_string()]),
        ];
        let graph = ComponentGraph::new(&components);
        assert_eq!(guids(&graph.connections().unwrap()), vec![("slider", "panel")]);
    }

    #[test]
    fn test_output_hides_guid() {
        let components = vec![
            component(0, "add").with_output(Some("o1".to_string())),
            component(1, "mul").with_inputs(vec!["add".to_string()]),
        ];
        let graph = ComponentGraph::new(&components);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_repeated_input_gives_one_edge() {
        let components = vec![
            component(0, "a"),
            component(1, "b").with_inputs(vec!["a".to_string(), "a".to_string()]),
        ];
        let graph = ComponentGraph::new(&components);
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_cycle_keeps_both_directions() {
        let components = vec![
            component(0, "a").with_inputs(vec!["b".to_string()]),
            component(1, "b").with_inputs(vec!["a".to_string()]),
            component(2, "lonely").with_inputs(vec!["missing".to_string()]),
        ];
        let graph = ComponentGraph::new(&components);

        assert_eq!(
            guids(&graph.connections().unwrap()),
            vec![("b", "a"), ("a", "b")]
        );
        assert_eq!(graph.connection_count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = ComponentGraph::new(&[]);
        assert_eq!(graph.component_count(), 0);
        assert!(graph.connections().unwrap().is_empty());
        assert_eq!(graph.components().count(), 0);
    }
}

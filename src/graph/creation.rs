// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for creating [`GridGraph`] instances from given nodes and links.

use petgraph::stable_graph::StableUnGraph;

use crate::node_kind::KindPredicates;
use crate::{Error, GridConfig, GridGraph, GridNode, NodeId};

use super::{NextIds, NodeIndexMap};

/// `GridGraph` instantiation.
impl GridGraph {
    /// Creates a new [`GridGraph`] from the given nodes and links.
    ///
    /// Returns an error if the config is invalid, if a node carries impossible
    /// values, or if a link is invalid.
    pub fn try_new<NodeIterator, LinkIterator>(
        nodes: NodeIterator,
        links: LinkIterator,
        config: GridConfig,
    ) -> Result<Self, Error>
    where
        NodeIterator: IntoIterator<Item = GridNode>,
        LinkIterator: IntoIterator<Item = (NodeId, NodeId)>,
    {
        config.validate()?;

        let mut gg = Self::empty(config);
        for node in nodes {
            gg.insert_node(node)?;
        }
        gg.add_links(links)?;
        gg.validate()?;

        Ok(gg)
    }

    /// Creates an empty graph with the given config.
    pub(crate) fn empty(config: GridConfig) -> Self {
        Self {
            graph: StableUnGraph::default(),
            node_indices: NodeIndexMap::new(),
            next_ids: NextIds::default(),
            config,
        }
    }

    /// Adds a node with a caller-chosen id.
    pub(crate) fn insert_node(&mut self, node: GridNode) -> Result<NodeId, Error> {
        let id = node.id();
        if self.node_indices.contains_key(&id) {
            return Err(Error::invalid_graph(format!(
                "Duplicate node ID found: {id}"
            )));
        }
        if id.is_main() && (node.production() != 0.0 || node.demand() != 0.0 || node.storage() != 0.0)
        {
            return Err(Error::invalid_node(format!(
                "Main {id} can't have production, demand or storage."
            )));
        }
        for (name, value) in [
            ("production", node.production()),
            ("demand", node.demand()),
            ("storage", node.storage()),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_node(format!(
                    "Node {id} has an invalid {name}: {value}"
                )));
            }
        }
        if node.storage() > self.config.storage_capacity {
            return Err(Error::invalid_node(format!(
                "Node {id} stores {} which exceeds the storage capacity of {}.",
                node.storage(),
                self.config.storage_capacity
            )));
        }

        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        self.next_ids.reserve(id);
        Ok(id)
    }

    fn add_links(&mut self, links: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<(), Error> {
        for (a, b) in links {
            self.connect(a, b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::GridBuilder;
    use crate::Position;

    fn nodes_and_links() -> (Vec<GridNode>, Vec<(NodeId, NodeId)>) {
        let nodes = vec![
            GridNode::main(0, Position::new(40.0, -74.0)),
            GridNode::main(1, Position::new(40.0, -74.01)),
            GridNode::location(0, Position::new(40.001, -74.0)).with_demand(100.0),
            GridNode::location(1, Position::new(40.001, -74.01)).with_production(200.0),
        ];
        let links = vec![
            (NodeId::main(0), NodeId::main(1)),
            (NodeId::location(0), NodeId::main(0)),
            (NodeId::main(1), NodeId::location(1)),
        ];
        (nodes, links)
    }

    #[test]
    fn test_node_validation() {
        let config = GridConfig::default();
        let (mut nodes, links) = nodes_and_links();

        assert!(GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_ok());

        nodes.push(GridNode::location(1, None));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone())
                .is_err_and(|e| e == Error::invalid_graph("Duplicate node ID found: L1"))
        );

        nodes.pop();
        nodes.push(GridNode::main(2, None).with_demand(5.0));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_err_and(|e| e
                == Error::invalid_node("Main M2 can't have production, demand or storage."))
        );

        nodes.pop();
        nodes.push(GridNode::location(2, None).with_production(-1.0));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_err_and(
                |e| e == Error::invalid_node("Node L2 has an invalid production: -1")
            )
        );

        nodes.pop();
        nodes.push(GridNode::location(2, None).with_storage(1500.0));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_err_and(|e| e
                == Error::invalid_node(
                    "Node L2 stores 1500 which exceeds the storage capacity of 1000."
                ))
        );

        nodes.pop();
        assert!(GridGraph::try_new(nodes, links, config).is_ok());
    }

    #[test]
    fn test_link_validation() {
        let config = GridConfig::default();
        let (nodes, mut links) = nodes_and_links();

        links.push((NodeId::location(0), NodeId::location(0)));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_err_and(|e| e
                == Error::invalid_connection("Link:(L0, L0) Can't connect a node to itself."))
        );

        links.pop();
        links.push((NodeId::location(0), NodeId::main(9)));
        assert!(
            GridGraph::try_new(nodes.clone(), links.clone(), config.clone()).is_err_and(|e| e
                == Error::invalid_connection("Link:(L0, M9) Can't find a node with ID M9"))
        );

        links.pop();
        assert!(GridGraph::try_new(nodes, links, config).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let (nodes, links) = nodes_and_links();
        let config = GridConfig {
            max_neighbors: 0,
            ..Default::default()
        };
        assert!(GridGraph::try_new(nodes, links, config).is_err_and(|e| e
            == Error::invalid_config("`max neighbors` must be a positive integer, got 0.")));
    }

    #[test]
    fn test_fresh_ids_follow_given_ids() -> Result<(), Error> {
        let mut builder = GridBuilder::new();
        builder.main_at(0.0, 0.0);
        let mut graph = builder.build(None)?;

        graph.insert_node(GridNode::location(41, None))?;
        assert_eq!(graph.next_ids.take(crate::NodeKind::Location), NodeId::location(42));
        assert_eq!(graph.next_ids.take(crate::NodeKind::Main), NodeId::main(1));
        Ok(())
    }
}

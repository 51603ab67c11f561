// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for retrieving nodes and links from a [`GridGraph`].

use petgraph::graph::NodeIndex;

use crate::iterators::{Connections, Neighbors, Nodes};
use crate::node_kind::KindPredicates;
use crate::{Error, GridConfig, GridGraph, GridNode, NodeId};

/// `Node` and `Link` retrieval.
impl GridGraph {
    /// Returns the node with the given `id`, if it exists.
    pub fn node(&self, id: NodeId) -> Result<&GridNode, Error> {
        self.index(id).map(|i| &self.graph[i])
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut GridNode, Error> {
        let index = self.index(id)?;
        Ok(&mut self.graph[index])
    }

    pub(crate) fn index(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.node_indices
            .get(&id)
            .copied()
            .ok_or_else(|| Error::node_not_found(format!("Node with id {id} not found.")))
    }

    /// Returns `true` if a node with the given `id` exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_indices.contains_key(&id)
    }

    /// Returns an iterator over all nodes in the graph, mains first, each kind
    /// in ascending id order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            graph: &self.graph,
            iter: self.node_indices.values(),
        }
    }

    /// Returns an iterator over the mains in the graph.
    pub fn mains(&self) -> impl Iterator<Item = &GridNode> + '_ {
        self.nodes().filter(|n| n.is_main())
    }

    /// Returns an iterator over the locations in the graph.
    pub fn locations(&self) -> impl Iterator<Item = &GridNode> + '_ {
        self.nodes().filter(|n| n.is_location())
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.node_indices.len()
    }

    /// Returns an iterator over the links in the graph.
    pub fn connections(&self) -> Connections<'_> {
        Connections {
            graph: &self.graph,
            iter: self.graph.edge_indices(),
        }
    }

    /// Returns an iterator over the neighbors of the node with the given `id`.
    ///
    /// Returns an error if the given `id` does not exist.
    pub fn neighbors(&self, id: NodeId) -> Result<Neighbors<'_>, Error> {
        self.index(id).map(|index| Neighbors {
            graph: &self.graph,
            iter: self.graph.neighbors(index),
        })
    }

    /// Returns the ids of the neighbors of the node with the given `id`, in
    /// ascending order.
    pub fn neighbor_ids(&self, id: NodeId) -> Result<Vec<NodeId>, Error> {
        let mut ids = self.neighbors(id)?.map(|n| n.id()).collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }

    /// Returns the config the graph was created with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

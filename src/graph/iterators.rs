// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Iterators over nodes and links in a `GridGraph`.

use std::collections::btree_map;

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::{EdgeIndices, StableUnGraph};

use crate::{GridNode, NodeId};

/// An iterator over the nodes in a `GridGraph`, in id order.
pub struct Nodes<'a> {
    pub(crate) graph: &'a StableUnGraph<GridNode, ()>,
    pub(crate) iter: btree_map::Values<'a, NodeId, NodeIndex>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a GridNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[*i])
    }
}

/// An iterator over the links in a `GridGraph`.
///
/// Every link is reported once, as a pair of node ids with the smaller id
/// first.
pub struct Connections<'a> {
    pub(crate) graph: &'a StableUnGraph<GridNode, ()>,
    pub(crate) iter: EdgeIndices<'a, ()>,
}

impl Iterator for Connections<'_> {
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.iter.next()?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        let (a, b) = (self.graph[a].id(), self.graph[b].id());
        Some(if a <= b { (a, b) } else { (b, a) })
    }
}

/// An iterator over the neighbors of a node in a `GridGraph`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a StableUnGraph<GridNode, ()>,
    pub(crate) iter: petgraph::stable_graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a GridNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}

// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module.
//!
//! - the `GridBuilder`, which can declaratively build grid configurations for
//!   use in tests.

use crate::{Error, GridConfig, GridGraph, GridNode, NodeId, NodeKind, Position};

/// A builder for creating grid configurations easily, for use in tests.
pub(crate) struct GridBuilder {
    nodes: Vec<GridNode>,
    links: Vec<(NodeId, NodeId)>,
    next_main: u64,
    next_location: u64,
}

impl GridBuilder {
    /// Creates a new `GridBuilder`.
    pub(crate) fn new() -> Self {
        GridBuilder {
            nodes: Vec::new(),
            links: Vec::new(),
            next_main: 0,
            next_location: 0,
        }
    }

    fn next_id(&mut self, kind: NodeKind) -> u64 {
        let next = match kind {
            NodeKind::Main => &mut self.next_main,
            NodeKind::Location => &mut self.next_location,
        };
        let id = *next;
        *next += 1;
        id
    }

    /// Adds a main at the given position and returns its id.
    pub(crate) fn main_at(&mut self, lat: f64, lng: f64) -> NodeId {
        let id = self.next_id(NodeKind::Main);
        self.nodes.push(GridNode::main(id, Position::new(lat, lng)));
        NodeId::main(id)
    }

    /// Adds a main without a position and returns its id.
    pub(crate) fn main(&mut self) -> NodeId {
        let id = self.next_id(NodeKind::Main);
        self.nodes.push(GridNode::main(id, None));
        NodeId::main(id)
    }

    /// Adds a location built by `f` from a blank location and returns its id.
    pub(crate) fn location_with(
        &mut self,
        position: Option<Position>,
        f: impl FnOnce(GridNode) -> GridNode,
    ) -> NodeId {
        let id = self.next_id(NodeKind::Location);
        self.nodes.push(f(GridNode::location(id, position)));
        NodeId::location(id)
    }

    /// Adds an idle location at the given position and returns its id.
    pub(crate) fn location_at(&mut self, lat: f64, lng: f64) -> NodeId {
        self.location_with(Some(Position::new(lat, lng)), |n| n)
    }

    /// Adds a location that only consumes, and returns its id.
    pub(crate) fn consumer_at(&mut self, lat: f64, lng: f64, demand: f64) -> NodeId {
        self.location_with(Some(Position::new(lat, lng)), |n| n.with_demand(demand))
    }

    /// Adds a location that only produces, and returns its id.
    pub(crate) fn producer_at(&mut self, lat: f64, lng: f64, production: f64) -> NodeId {
        self.location_with(Some(Position::new(lat, lng)), |n| {
            n.with_production(production)
        })
    }

    /// Adds a consumer without a position and returns its id.
    pub(crate) fn consumer(&mut self, demand: f64) -> NodeId {
        self.location_with(None, |n| n.with_demand(demand))
    }

    /// Adds a producer without a position and returns its id.
    pub(crate) fn producer(&mut self, production: f64) -> NodeId {
        self.location_with(None, |n| n.with_production(production))
    }

    /// Links two nodes in the graph.
    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.links.push((a, b));
        self
    }

    /// Links the given nodes into a chain, in order.
    pub(crate) fn chain(&mut self, ids: &[NodeId]) -> &mut Self {
        for pair in ids.windows(2) {
            self.connect(pair[0], pair[1]);
        }
        self
    }

    /// Builds and returns the grid graph from the nodes and links added to the
    /// builder.
    pub(crate) fn build(&self, config: Option<GridConfig>) -> Result<GridGraph, Error> {
        GridGraph::try_new(
            self.nodes.clone(),
            self.links.clone(),
            config.unwrap_or_default(),
        )
    }
}

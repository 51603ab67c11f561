// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for placing, linking and removing nodes of a [`GridGraph`].

use crate::{Error, GridGraph, GridNode, NodeId, NodeKind, Position};

/// The result of placing a node on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// A new node was created.
    Created(NodeId),
    /// A node of the same kind already sat at the requested position, and the
    /// placement was merged into it.
    Merged(NodeId),
}

impl Placement {
    /// Returns the id of the created or merged-into node.
    pub fn id(&self) -> NodeId {
        match self {
            Placement::Created(id) | Placement::Merged(id) => *id,
        }
    }
}

/// Node placement and link editing.
impl GridGraph {
    /// Places a main at the given position and links it to `neighbors`.
    ///
    /// If a main already exists within the merge radius, no node is created:
    /// the neighbors are linked to the existing main instead.
    pub fn place_main(
        &mut self,
        position: Position,
        neighbors: &[NodeId],
    ) -> Result<Placement, Error> {
        self.place(NodeKind::Main, position, neighbors)
    }

    /// Places a location at the given position and links it to `neighbors`.
    ///
    /// New locations produce nothing and have the configured base demand.  If a
    /// location already exists within the merge radius, no node is created:
    /// the neighbors are linked to the existing location instead.
    pub fn place_location(
        &mut self,
        position: Position,
        neighbors: &[NodeId],
    ) -> Result<Placement, Error> {
        self.place(NodeKind::Location, position, neighbors)
    }

    fn place(
        &mut self,
        kind: NodeKind,
        position: Position,
        neighbors: &[NodeId],
    ) -> Result<Placement, Error> {
        for neighbor in neighbors {
            if !self.node_indices.contains_key(neighbor) {
                return Err(Error::node_not_found(format!(
                    "Node with id {neighbor} not found."
                )));
            }
        }

        let radius = self.config.merge_radius;
        let existing = self
            .nodes()
            .filter(|n| n.id().kind == kind)
            .find(|n| n.position().is_some_and(|p| p.within(&position, radius)))
            .map(|n| n.id());

        let placement = match existing {
            Some(id) => {
                tracing::debug!("Merging placement at {:?} into {}.", position, id);
                Placement::Merged(id)
            }
            None => {
                let id = self.next_ids.take(kind);
                let mut node = GridNode::new(id, Some(position));
                if kind == NodeKind::Location {
                    node.set_demand(self.config.base_demand);
                }
                self.insert_node(node)?;
                Placement::Created(id)
            }
        };

        for neighbor in neighbors {
            if *neighbor != placement.id() {
                self.connect(placement.id(), *neighbor)?;
            }
        }

        Ok(placement)
    }

    /// Links two nodes.
    ///
    /// Returns `false` if they were already linked.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<bool, Error> {
        if a == b {
            return Err(Error::invalid_connection(format!(
                "Link:({a}, {b}) Can't connect a node to itself."
            )));
        }
        for id in [a, b] {
            if !self.node_indices.contains_key(&id) {
                return Err(Error::invalid_connection(format!(
                    "Link:({a}, {b}) Can't find a node with ID {id}"
                )));
            }
        }

        let a_idx = self.node_indices[&a];
        let b_idx = self.node_indices[&b];
        if self.graph.find_edge(a_idx, b_idx).is_some() {
            return Ok(false);
        }
        self.graph.add_edge(a_idx, b_idx, ());
        Ok(true)
    }

    /// Removes the link between two nodes.
    ///
    /// Returns `false` if they weren't linked.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> Result<bool, Error> {
        let a_idx = self.index(a)?;
        let b_idx = self.index(b)?;
        Ok(self
            .graph
            .find_edge(a_idx, b_idx)
            .and_then(|edge| self.graph.remove_edge(edge))
            .is_some())
    }

    /// Removes a node and all its links, and returns it.
    ///
    /// The id of a removed node is never handed out again.
    pub fn remove_node(&mut self, id: NodeId) -> Result<GridNode, Error> {
        let idx = self.index(id)?;
        self.node_indices.remove(&id);
        self.graph.remove_node(idx).ok_or_else(|| {
            Error::internal(format!("Node {id} was indexed but not in the graph."))
        })
    }
}

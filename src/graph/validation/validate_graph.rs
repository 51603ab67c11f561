// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for validating the index, the links and the figures of a
//! [`GridGraph`].

use std::collections::BTreeSet;

use crate::node_kind::KindPredicates;
use crate::Error;

use super::GridGraphValidator;

impl GridGraphValidator<'_> {
    /// Validates that the id index and the graph agree.
    pub(super) fn validate_index(&self) -> Result<(), Error> {
        if self.gg.node_indices.len() != self.gg.graph.node_count() {
            return Err(Error::internal(format!(
                "Index has {} entries, but the graph has {} nodes.",
                self.gg.node_indices.len(),
                self.gg.graph.node_count()
            )));
        }
        for (id, index) in &self.gg.node_indices {
            match self.gg.graph.node_weight(*index) {
                Some(node) if node.id() == *id => {}
                _ => {
                    return Err(Error::internal(format!(
                        "Index entry for {id} points to another node."
                    )))
                }
            }
        }
        Ok(())
    }

    /// Validates that no node is linked to itself, and that no two nodes are
    /// linked twice.
    pub(super) fn validate_links(&self) -> Result<(), Error> {
        for node in self.gg.nodes() {
            let mut seen = BTreeSet::new();
            for neighbor in self.gg.neighbors(node.id())? {
                if neighbor.id() == node.id() {
                    return Err(Error::invalid_graph(format!(
                        "{} is linked to itself.",
                        node.id()
                    )));
                }
                if !seen.insert(neighbor.id()) {
                    return Err(Error::invalid_graph(format!(
                        "{} and {} are linked more than once.",
                        node.id(),
                        neighbor.id()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validates that mains carry no energy, and that no location stores more
    /// than the storage capacity.
    pub(super) fn validate_quantities(&self) -> Result<(), Error> {
        let capacity = self.gg.config.storage_capacity;
        for node in self.gg.nodes() {
            if node.is_main() && (node.production() != 0.0 || node.demand() != 0.0) {
                return Err(Error::invalid_node(format!(
                    "Main {} can't have production, demand or storage.",
                    node.id()
                )));
            }
            if node.storage() > capacity {
                return Err(Error::invalid_node(format!(
                    "Node {} stores {} which exceeds the storage capacity of {}.",
                    node.id(),
                    node.storage(),
                    capacity
                )));
            }
        }
        Ok(())
    }
}

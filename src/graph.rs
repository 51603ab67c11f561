// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! A graph representation of the mains and locations of a distribution
//! network, and the links between them.

mod backbone;
mod connectivity;
mod creation;
mod editing;
mod placement;
mod retrieval;
mod snapshot;
mod validation;

mod optimizer;
pub mod iterators;
mod traversal;

#[cfg(test)]
mod test_utils;

pub use editing::Quantity;
pub use optimizer::{Interrupt, Ledger, Optimization, Outcome, TransferKind, TransferRecord};
pub use placement::Placement;
pub use snapshot::{GraphSnapshot, NodeRecord};
pub use traversal::Route;

use crate::{GridConfig, GridNode, NodeId, NodeKind};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableUnGraph;
use std::collections::BTreeMap;

/// `GridNode`s stored in a `StableUnGraph` instance can be addressed with
/// `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any `NodeId`, so that
/// nodes can be retrieved from their ids.  It is ordered, so that every walk
/// over the nodes visits them in the same order.
pub(crate) type NodeIndexMap = BTreeMap<NodeId, NodeIndex>;

/// A graph representation of a distribution network.
///
/// Links are undirected: if `a` is a neighbor of `b`, `b` is a neighbor of `a`.
/// Cloning a `GridGraph` produces an independent snapshot.
#[derive(Clone, Debug)]
pub struct GridGraph {
    graph: StableUnGraph<GridNode, ()>,
    node_indices: NodeIndexMap,
    next_ids: NextIds,
    config: GridConfig,
}

/// The numbers handed to the next main and the next location.
///
/// They only ever grow, so ids of removed nodes are never reused.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NextIds {
    main: u64,
    location: u64,
}

impl NextIds {
    /// Makes sure `id` is never handed out again.
    pub(crate) fn reserve(&mut self, id: NodeId) {
        let next = match id.kind {
            NodeKind::Main => &mut self.main,
            NodeKind::Location => &mut self.location,
        };
        *next = (*next).max(id.value.saturating_add(1));
    }

    /// Returns a fresh id of the given kind.
    pub(crate) fn take(&mut self, kind: NodeKind) -> NodeId {
        let next = match kind {
            NodeKind::Main => &mut self.main,
            NodeKind::Location => &mut self.location,
        };
        let id = NodeId { kind, value: *next };
        *next += 1;
        id
    }
}

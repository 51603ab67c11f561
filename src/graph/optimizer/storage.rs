// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Use of the local storage of locations, before and after matching.

use std::collections::BTreeMap;

use crate::{Error, GridGraph, NodeId};

/// What happened to the leftover surplus of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct Rebalance {
    pub(super) stored: f64,
    pub(super) curtailed: f64,
    /// The surplus each location gave up, before storage losses.
    pub(super) drained: BTreeMap<NodeId, f64>,
}

impl GridGraph {
    /// Covers deficits from the local storage of each location, as far as
    /// the stored energy goes.
    pub(super) fn draw_from_storage(&mut self) -> Result<(), Error> {
        let drawing = self
            .locations()
            .filter(|n| n.is_deficit() && n.storage() > 0.0)
            .map(|n| n.id())
            .collect::<Vec<NodeId>>();

        for id in drawing {
            let node = self.node_mut(id)?;
            let drawn = node.storage().min(node.deficit());
            node.set_storage(node.storage() - drawn);
            node.set_production(node.production() + drawn);
            tracing::debug!("{} drew {} from storage.", id, drawn);
        }
        Ok(())
    }

    /// Drains the surplus left at each location into its storage, minus the
    /// storage losses, up to the storage capacity.  Whatever doesn't fit is
    /// curtailed.  Every location ends up producing exactly its demand.
    pub(super) fn store_surplus(&mut self) -> Result<Rebalance, Error> {
        let efficiency = self.config.storage_efficiency;
        let capacity = self.config.storage_capacity;
        let storing = self
            .locations()
            .filter(|n| n.is_surplus())
            .map(|n| n.id())
            .collect::<Vec<NodeId>>();

        let mut rebalance = Rebalance::default();
        for id in storing {
            let node = self.node_mut(id)?;
            let surplus = node.surplus();
            let offered = surplus * efficiency;
            let stored = offered.min((capacity - node.storage()).max(0.0));
            node.set_storage(node.storage() + stored);
            node.set_production(node.demand());

            rebalance.stored += stored;
            rebalance.curtailed += offered - stored;
            rebalance.drained.insert(id, surplus);
        }
        Ok(rebalance)
    }
}

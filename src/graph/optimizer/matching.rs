// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Donor search and the execution of a single transfer.

use std::collections::BTreeSet;

use crate::graph::Route;
use crate::node_kind::KindPredicates;
use crate::{Error, GridGraph, GridNode, NodeId};

use super::{TransferKind, TransferRecord};

/// Losses never exceed this share of the transferred amount.
const MAX_LOSS: f64 = 0.95;

/// Transfers of at most this amount are delivered without losses.
const LOSSLESS_AMOUNT: f64 = 1.0;

fn is_donor(node: &GridNode) -> bool {
    node.is_location() && node.is_surplus()
}

/// Matching of deficits with surpluses.
impl GridGraph {
    /// Returns the route from the closest donor to `target`, if there is one
    /// within `max_path_hops`.  Donors in `passed_over` are not considered.
    ///
    /// The locations that are directly or indirectly linked to the target
    /// without going through a main are searched first.  If none of them has
    /// a surplus, the search continues over the whole grid, mains included.
    pub(super) fn find_donor(
        &self,
        target: NodeId,
        passed_over: &BTreeSet<NodeId>,
    ) -> Result<Option<Route>, Error> {
        let max_hops = self.config.max_path_hops;
        let is_candidate = |n: &GridNode| is_donor(n) && !passed_over.contains(&n.id());

        let local = self.find_within(target, max_hops, |n| n.is_location(), &is_candidate)?;
        if let Some(route) = local {
            return Ok(Some(route.reversed()));
        }
        let route = self.find_within(target, max_hops, |_| true, &is_candidate)?;
        Ok(route.map(Route::reversed))
    }

    /// Moves energy along `route`, from its first node to its last, and
    /// returns the record of the transfer.
    ///
    /// Returns `None` without changing anything if nothing would arrive.
    pub(super) fn transfer(&mut self, route: Route) -> Result<Option<TransferRecord>, Error> {
        let (Some(start), Some(end)) = (route.start(), route.end()) else {
            return Err(Error::internal("Can't transfer along an empty route."));
        };

        let donor = self.node(start)?;
        let (surplus, donor_demand, donor_production) =
            (donor.surplus(), donor.demand(), donor.production());
        let deficit = self.node(end)?.deficit();

        let amount = surplus.min(deficit);
        let received = self.received(amount, route.hops());
        if received <= 0.0 {
            return Ok(None);
        }

        // An exhausted donor is left exactly at its demand.
        let remaining = if amount >= surplus {
            donor_demand
        } else {
            donor_production - amount
        };
        self.node_mut(start)?.set_production(remaining);

        let target = self.node_mut(end)?;
        target.set_production(target.production() + received);

        let kind = if route.crosses_backbone() {
            TransferKind::GridTransfer
        } else {
            TransferKind::LocalTransfer
        };
        Ok(Some(TransferRecord {
            start,
            end,
            path: route.into_path(),
            transferred: amount,
            received,
            kind,
        }))
    }

    /// Returns how much of `amount` arrives after `hops` links.
    fn received(&self, amount: f64, hops: usize) -> f64 {
        let loss = if amount <= LOSSLESS_AMOUNT {
            0.0
        } else {
            (hops as f64 * self.config.transmission_loss_factor).min(MAX_LOSS)
        };
        (amount * (1.0 - loss)).round().clamp(0.0, amount)
    }
}

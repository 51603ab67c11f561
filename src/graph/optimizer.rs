// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Load balancing between the locations of a grid.
//!
//! The optimizer works on a copy of the graph.  It first lets each location
//! in deficit draw from its own storage, then repeatedly matches the most
//! urgent deficit with the closest surplus and moves energy between them,
//! and finally drains the remaining surpluses into storage.

mod ledger;
mod matching;
mod storage;

pub use ledger::{Ledger, TransferKind, TransferRecord};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{Error, GridGraph, NodeId};

/// A way to stop an optimization run early.
///
/// Both the flag and the deadline are checked once per iteration, so a run
/// stops at the latest one transfer after it was interrupted.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Interrupt {
    /// Creates an interrupt that never fires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the run once `flag` is set.
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Stops the run once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the run once `timeout` has passed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    fn check(&self) -> Option<Outcome> {
        if self.flag.as_ref().is_some_and(|f| f.load(Ordering::Relaxed)) {
            return Some(Outcome::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Outcome::DeadlineExceeded);
        }
        None
    }
}

/// How an optimization run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every deficit was either served or has no reachable donor.
    Converged,
    /// The run stopped after `max_iterations` transfers.
    IterationCapReached,
    /// The interrupt flag was set.
    Cancelled,
    /// The deadline passed.
    DeadlineExceeded,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Converged => write!(f, "converged"),
            Outcome::IterationCapReached => write!(f, "iteration cap reached"),
            Outcome::Cancelled => write!(f, "cancelled"),
            Outcome::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// The result of an optimization run.
#[derive(Clone, Debug)]
pub struct Optimization {
    /// The transfers that were made, in order.
    pub ledger: Ledger,
    /// The graph after all transfers.  The graph the optimizer was called on
    /// is never changed.
    pub data: GridGraph,
    pub outcome: Outcome,
    /// The locations left in deficit that no donor fully covered, in id
    /// order.
    pub unserved: Vec<NodeId>,
    /// The leftover surplus that went into storage.
    pub stored: f64,
    /// The leftover surplus that didn't fit into storage.
    pub curtailed: f64,
    /// The leftover surplus each location gave up at the end of the run,
    /// before storage losses.  Together with the ledger, it accounts for every
    /// change in production.
    pub drained: BTreeMap<NodeId, f64>,
}

/// Optimization.
impl GridGraph {
    /// Balances production and demand across the grid, and returns the
    /// balanced copy of the graph together with the transfers made.
    pub fn optimize(&self) -> Result<Optimization, Error> {
        self.optimize_with(&Interrupt::default())
    }

    /// Like [`optimize`][Self::optimize], but stops early when `interrupt`
    /// fires.  The transfers made until then are still returned, and the
    /// leftover surplus is not stored.
    pub fn optimize_with(&self, interrupt: &Interrupt) -> Result<Optimization, Error> {
        let mut data = self.clone();
        data.draw_from_storage()?;

        let mut ledger = Ledger::default();
        let mut served = BTreeSet::new();
        let mut settled = BTreeSet::new();
        let mut passed_over = BTreeMap::<NodeId, BTreeSet<NodeId>>::new();
        let mut iterations = 0;

        let outcome = loop {
            if let Some(outcome) = interrupt.check() {
                break outcome;
            }
            let Some(target) = data.next_target(&settled) else {
                break Outcome::Converged;
            };
            if !data.locations().any(|n| n.is_surplus()) {
                break Outcome::Converged;
            }
            if iterations >= self.config.max_iterations {
                tracing::warn!(
                    "Stopping after {} iterations with deficits left.",
                    iterations
                );
                break Outcome::IterationCapReached;
            }
            iterations += 1;

            let skipped = passed_over.entry(target).or_default();
            let Some(route) = data.find_donor(target, skipped)? else {
                tracing::debug!("No donor found for {}.", target);
                settled.insert(target);
                continue;
            };

            let deficit = data.node(target)?.deficit();
            let donor = route.start();
            let Some(record) = data.transfer(route)? else {
                if let Some(donor) = donor {
                    tracing::debug!("Nothing from {} would reach {}.", donor, target);
                    skipped.insert(donor);
                }
                continue;
            };

            tracing::debug!(
                "{} sent {} to {}, {} arrived over {} hops.",
                record.start,
                record.transferred,
                record.end,
                record.received,
                record.path.len().saturating_sub(1)
            );
            if record.transferred >= deficit {
                settled.insert(target);
                served.insert(target);
            }
            ledger.push(record);
        };

        let rebalance = match outcome {
            Outcome::Converged | Outcome::IterationCapReached => data.store_surplus()?,
            Outcome::Cancelled | Outcome::DeadlineExceeded => Default::default(),
        };

        let unserved = data
            .locations()
            .filter(|n| n.is_deficit() && !served.contains(&n.id()))
            .map(|n| n.id())
            .collect::<Vec<_>>();

        tracing::info!(
            "Optimization {} with {} transfers, {} locations unserved.",
            outcome,
            ledger.len(),
            unserved.len()
        );

        Ok(Optimization {
            ledger,
            data,
            outcome,
            unserved,
            stored: rebalance.stored,
            curtailed: rebalance.curtailed,
            drained: rebalance.drained,
        })
    }

    /// Returns the location in deficit to serve next: the most urgent one,
    /// then the one with the smaller deficit, then the one with the lower id.
    fn next_target(&self, settled: &BTreeSet<NodeId>) -> Option<NodeId> {
        self.locations()
            .filter(|n| n.is_deficit() && !settled.contains(&n.id()))
            .min_by(|a, b| {
                a.priority()
                    .cmp_urgency(&b.priority())
                    .then(a.deficit().total_cmp(&b.deficit()))
            })
            .map(|n| n.id())
    }
}

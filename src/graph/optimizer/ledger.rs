// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! The record of the transfers made by an optimization run.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Whether a transfer stayed among locations or went over the backbone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    GridTransfer,
    LocalTransfer,
}

/// A single transfer of energy from a donor to a target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// The donor.
    pub start: NodeId,
    /// The target.
    pub end: NodeId,
    /// The nodes the energy went through, from `start` to `end`.
    pub path: Vec<NodeId>,
    /// The amount taken from the donor.
    pub transferred: f64,
    /// The amount that reached the target, after transmission losses.
    pub received: f64,
    pub kind: TransferKind,
}

impl TransferRecord {
    /// The amount lost on the way.
    pub fn lost(&self) -> f64 {
        self.transferred - self.received
    }
}

/// The transfers of an optimization run, in the order they were made.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(Vec<TransferRecord>);

impl Ledger {
    pub(crate) fn push(&mut self, record: TransferRecord) {
        self.0.push(record);
    }

    /// The total amount taken from donors.
    pub fn total_transferred(&self) -> f64 {
        self.0.iter().map(|r| r.transferred).sum()
    }

    /// The total amount delivered to targets.
    pub fn total_received(&self) -> f64 {
        self.0.iter().map(|r| r.received).sum()
    }

    /// The total amount the node with the given `id` gave away.
    pub fn sent_by(&self, id: NodeId) -> f64 {
        self.0
            .iter()
            .filter(|r| r.start == id)
            .map(|r| r.transferred)
            .sum()
    }

    /// The total amount delivered to the node with the given `id`.
    pub fn received_by(&self, id: NodeId) -> f64 {
        self.0
            .iter()
            .filter(|r| r.end == id)
            .map(|r| r.received)
            .sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransferRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TransferRecord;
    type IntoIter = std::slice::Iter<'a, TransferRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Ledger {
    type Item = TransferRecord;
    type IntoIter = std::vec::IntoIter<TransferRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Validation of the neighbor lists of a [`GraphSnapshot`].
//!
//! Links are physical and undirected, so every neighbor list entry must be
//! mirrored by the other node.  A one-sided entry is a data-integrity bug in
//! the producer of the snapshot and is rejected rather than repaired.

use std::collections::BTreeMap;

use crate::graph::{GraphSnapshot, NodeRecord};
use crate::{Error, NodeId};

/// Validates that in the given snapshot:
///  - every record is stored under its own id,
///  - no record lists itself as a neighbor,
///  - every listed neighbor exists,
///  - every listed neighbor lists the record back.
pub(crate) fn validate_snapshot(snapshot: &GraphSnapshot) -> Result<(), Error> {
    let mut records = BTreeMap::<NodeId, &NodeRecord>::new();
    for (id, key, record) in snapshot.records() {
        if key != record.id {
            return Err(Error::invalid_node(format!(
                "Record under key {key} in `{}` has id {}.",
                id.kind.snapshot_key(),
                record.id
            )));
        }
        records.insert(id, record);
    }

    for (id, record) in &records {
        for neighbor in &record.neighbors {
            if neighbor == id {
                return Err(Error::invalid_graph(format!(
                    "{id} lists itself as a neighbor."
                )));
            }
            let Some(other) = records.get(neighbor) else {
                return Err(Error::invalid_graph(format!(
                    "{id} lists {neighbor} as a neighbor, but {neighbor} doesn't exist."
                )));
            };
            if !other.neighbors.contains(id) {
                return Err(Error::invalid_graph(format!(
                    "{id} lists {neighbor} as a neighbor, but {neighbor} doesn't list {id}."
                )));
            }
        }
    }

    Ok(())
}

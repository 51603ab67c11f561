// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for validating a [`GridGraph`] and the snapshots it is loaded
//! from.

mod validate_graph;
mod validate_neighbors;

pub(crate) use validate_neighbors::validate_snapshot;

use crate::{Error, GridGraph};

pub(crate) struct GridGraphValidator<'a> {
    gg: &'a GridGraph,
}

impl GridGraph {
    /// Checks the internal consistency of the graph.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let validator = GridGraphValidator { gg: self };

        validator.validate_index()?;
        validator.validate_links()?;
        validator.validate_quantities()?;

        Ok(())
    }
}

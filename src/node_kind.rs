// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! This module defines the `NodeKind` enum, which tells backbone nodes apart
//! from demand/supply nodes.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the kind of a node in the grid.
///
/// Mains form the long-haul backbone and carry no production or demand of
/// their own.  Locations are the buildings and generators that produce,
/// consume and store energy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Main,
    Location,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Main => write!(f, "Main"),
            NodeKind::Location => write!(f, "Location"),
        }
    }
}

/// Types that know which kind of grid node they are, or refer to.
pub(crate) trait HasKind {
    fn kind(&self) -> NodeKind;
}

/// Predicates for checking the kind of a node.
pub(crate) trait KindPredicates: HasKind {
    fn is_main(&self) -> bool {
        self.kind() == NodeKind::Main
    }

    fn is_location(&self) -> bool {
        self.kind() == NodeKind::Location
    }
}

/// Implement the `KindPredicates` trait for all types that implement the
/// `HasKind` trait.
impl<T: HasKind> KindPredicates for T {}

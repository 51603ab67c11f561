// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! The node types stored in a [`GridGraph`][crate::GridGraph]: ids, positions,
//! priorities and the per-node energy figures.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

use crate::node_kind::{HasKind, NodeKind};
use crate::Error;

/// Approximate length of one degree of latitude, in kilometres.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Distance reported for a node without usable coordinates.
///
/// It is large enough to sort behind every real candidate but stays finite, so
/// costs derived from it remain comparable.
pub const UNREACHABLE_DISTANCE: f64 = 1.0e9;

/// Identifies a node in the grid.
///
/// Mains and locations are numbered independently, so the kind is part of the
/// id.  This keeps both kinds addressable through a single lookup without any
/// risk of collisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub kind: NodeKind,
    pub value: u64,
}

impl NodeId {
    /// Returns the id of the main with the given number.
    pub const fn main(value: u64) -> Self {
        Self {
            kind: NodeKind::Main,
            value,
        }
    }

    /// Returns the id of the location with the given number.
    pub const fn location(value: u64) -> Self {
        Self {
            kind: NodeKind::Location,
            value,
        }
    }
}

impl HasKind for NodeId {
    fn kind(&self) -> NodeKind {
        self.kind
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NodeKind::Main => write!(f, "M{}", self.value),
            NodeKind::Location => write!(f, "L{}", self.value),
        }
    }
}

/// A latitude/longitude pair, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Euclidean distance in degrees, or [`UNREACHABLE_DISTANCE`] if either
    /// position has non-finite coordinates.
    pub fn distance_deg(&self, other: &Position) -> f64 {
        if !self.is_finite() || !other.is_finite() {
            return UNREACHABLE_DISTANCE;
        }
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }

    /// Approximate distance in kilometres.
    pub fn distance_km(&self, other: &Position) -> f64 {
        let deg = self.distance_deg(other);
        if deg >= UNREACHABLE_DISTANCE {
            return UNREACHABLE_DISTANCE;
        }
        deg * KM_PER_DEGREE
    }

    /// Returns `true` if both coordinates differ by at most `radius` degrees.
    pub(crate) fn within(&self, other: &Position, radius: f64) -> bool {
        (self.lat - other.lat).abs() <= radius && (self.lng - other.lng).abs() <= radius
    }
}

/// Distance in kilometres between two optional positions.
///
/// A missing position is treated like an unusable one.
pub(crate) fn distance_km(a: Option<&Position>, b: Option<&Position>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.distance_km(b),
        _ => UNREACHABLE_DISTANCE,
    }
}

/// The urgency of a location.
///
/// Lower numbers are more urgent: a location with priority `1` is served before
/// one with priority `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Priority(u32);

impl Priority {
    /// The most urgent priority, used for emergency services and generators.
    pub const MOST_URGENT: Priority = Priority(1);

    /// Creates a new priority.  Zero is not a valid priority.
    pub fn new(value: u32) -> Result<Self, Error> {
        if value == 0 {
            return Err(Error::invalid_value("Priority must be a positive integer."));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Orders priorities so that the most urgent one comes first.
    pub fn cmp_urgency(&self, other: &Priority) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(5)
    }
}

impl TryFrom<u32> for Priority {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Priority::new(value)
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the grid.
///
/// Quantities are in energy units per tick.  Mains always report zero
/// production, demand and storage.
#[derive(Clone, Debug, PartialEq)]
pub struct GridNode {
    id: NodeId,
    position: Option<Position>,
    production: f64,
    demand: f64,
    storage: f64,
    priority: Priority,
}

impl GridNode {
    /// Creates a main with the given number.
    pub fn main(value: u64, position: impl Into<Option<Position>>) -> Self {
        Self::new(NodeId::main(value), position.into())
    }

    /// Creates a location with the given number.  Its production, demand and
    /// storage start at zero.
    pub fn location(value: u64, position: impl Into<Option<Position>>) -> Self {
        Self::new(NodeId::location(value), position.into())
    }

    pub(crate) fn new(id: NodeId, position: Option<Position>) -> Self {
        Self {
            id,
            position,
            production: 0.0,
            demand: 0.0,
            storage: 0.0,
            priority: Priority::default(),
        }
    }

    pub fn with_production(mut self, production: f64) -> Self {
        self.production = production;
        self
    }

    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_storage(mut self, storage: f64) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn production(&self) -> f64 {
        self.production
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn storage(&self) -> f64 {
        self.storage
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Production in excess of demand, or zero.
    pub fn surplus(&self) -> f64 {
        (self.production - self.demand).max(0.0)
    }

    /// Demand not covered by production, or zero.
    pub fn deficit(&self) -> f64 {
        (self.demand - self.production).max(0.0)
    }

    pub fn is_surplus(&self) -> bool {
        self.production > self.demand
    }

    pub fn is_deficit(&self) -> bool {
        self.demand > self.production
    }

    pub(crate) fn set_production(&mut self, production: f64) {
        self.production = production;
    }

    pub(crate) fn set_demand(&mut self, demand: f64) {
        self.demand = demand;
    }

    pub(crate) fn set_storage(&mut self, storage: f64) {
        self.storage = storage;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }
}

impl HasKind for GridNode {
    fn kind(&self) -> NodeKind {
        self.id.kind
    }
}

// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Conversion between a [`GridGraph`] and the plain `{mains, loc}` mappings
//! exchanged with the map layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::node_kind::KindPredicates;
use crate::{Error, GridConfig, GridGraph, GridNode, NodeId, NodeKind, Position, Priority};

/// A node as the map layer stores it.
///
/// Every figure is optional, since records built from GeoJSON features are
/// often incomplete.  The GeoJSON property names `prod`, `dem` and `store` are
/// accepted as aliases.  Figures may also be given as numeric strings; any
/// other value is loaded as `NaN` and replaced when the graph is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub neighbors: Vec<NodeId>,
    #[serde(
        default,
        alias = "prod",
        deserialize_with = "deserialize_figure",
        skip_serializing_if = "Option::is_none"
    )]
    pub production: Option<f64>,
    #[serde(
        default,
        alias = "dem",
        deserialize_with = "deserialize_figure",
        skip_serializing_if = "Option::is_none"
    )]
    pub demand: Option<f64>,
    #[serde(
        default,
        alias = "store",
        deserialize_with = "deserialize_figure",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// A figure as found in map data.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFigure {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_figure<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFigure>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawFigure::Number(value) => value,
        RawFigure::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        RawFigure::Other(_) => f64::NAN,
    }))
}

/// The mains and locations of a grid, keyed by their number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub mains: BTreeMap<u64, NodeRecord>,
    #[serde(default)]
    pub loc: BTreeMap<u64, NodeRecord>,
}

impl GraphSnapshot {
    /// Returns the records of both kinds, with their ids, mains first.
    pub(crate) fn records(&self) -> impl Iterator<Item = (NodeId, u64, &NodeRecord)> + '_ {
        let mains = self.mains.iter().map(|(k, r)| (NodeId::main(r.id), *k, r));
        let locs = self.loc.iter().map(|(k, r)| (NodeId::location(r.id), *k, r));
        mains.chain(locs)
    }
}

/// Snapshot conversion.
impl GridGraph {
    /// Creates a [`GridGraph`] from the map layer's mappings.
    ///
    /// Malformed figures are replaced with safe values and logged.  Broken
    /// neighbor lists, including one-sided links, are rejected.
    pub fn try_from_snapshot(snapshot: &GraphSnapshot, config: GridConfig) -> Result<Self, Error> {
        config.validate()?;
        super::validation::validate_snapshot(snapshot)?;

        let mut gg = Self::empty(config);
        for (id, _, record) in snapshot.records() {
            let node = sanitize(id, record, &gg.config);
            gg.insert_node(node)?;
        }
        for (id, _, record) in snapshot.records() {
            for neighbor in &record.neighbors {
                if id < *neighbor {
                    gg.connect(id, *neighbor)?;
                }
            }
        }
        gg.validate()?;

        Ok(gg)
    }

    /// Returns the graph as the map layer's mappings.  Neighbor lists are
    /// sorted.
    pub fn snapshot(&self) -> Result<GraphSnapshot, Error> {
        let mut snapshot = GraphSnapshot::default();
        for node in self.nodes() {
            let id = node.id();
            let mut record = NodeRecord {
                id: id.value,
                lat: node.position().map(|p| p.lat),
                lng: node.position().map(|p| p.lng),
                neighbors: self.neighbor_ids(id)?,
                ..Default::default()
            };
            if node.is_location() {
                record.production = Some(node.production());
                record.demand = Some(node.demand());
                record.storage = Some(node.storage());
                record.priority = Some(node.priority().value());
                snapshot.loc.insert(id.value, record);
            } else {
                snapshot.mains.insert(id.value, record);
            }
        }
        Ok(snapshot)
    }
}

fn sanitize(id: NodeId, record: &NodeRecord, config: &GridConfig) -> GridNode {
    let position = match (record.lat, record.lng) {
        (Some(lat), Some(lng)) => Some(Position::new(lat, lng)),
        _ => {
            tracing::warn!("Node {} has no coordinates; it can't be auto-connected.", id);
            None
        }
    };
    let mut node = GridNode::new(id, position);

    if id.is_main() {
        if record.production.is_some() || record.demand.is_some() || record.storage.is_some() {
            tracing::warn!("Ignoring production, demand and storage of main {}.", id);
        }
        return node;
    }

    node.set_production(quantity(id, "production", record.production, 0.0));
    node.set_demand(quantity(id, "demand", record.demand, config.base_demand));

    let storage = quantity(id, "storage", record.storage, 0.0);
    if storage > config.storage_capacity {
        tracing::warn!(
            "Node {} stores {} which exceeds the capacity of {}; clamping.",
            id,
            storage,
            config.storage_capacity
        );
    }
    node.set_storage(storage.min(config.storage_capacity));

    let priority = match record.priority.map(Priority::new) {
        Some(Ok(priority)) => priority,
        Some(Err(_)) => {
            tracing::warn!("Node {} has priority 0; using the default priority.", id);
            Priority::default()
        }
        None => Priority::default(),
    };
    node.set_priority(priority);

    node
}

fn quantity(id: NodeId, name: &str, value: Option<f64>, missing: f64) -> f64 {
    match value {
        None => missing,
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            tracing::warn!("Node {} has an invalid {} of {}; using 0.", id, name, v);
            0.0
        }
    }
}

impl NodeKind {
    /// The key of this kind's mapping in a [`GraphSnapshot`].
    pub(crate) fn snapshot_key(&self) -> &'static str {
        match self {
            NodeKind::Main => "mains",
            NodeKind::Location => "loc",
        }
    }
}

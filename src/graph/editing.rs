// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Methods for editing the figures of a location, as done from the
//! inspector panel.

use std::fmt::Display;

use crate::node_kind::KindPredicates;
use crate::{Error, GridGraph, NodeId, Priority};

/// The editable figures of a location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Quantity {
    Production,
    Demand,
    Storage,
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Production => write!(f, "production"),
            Quantity::Demand => write!(f, "demand"),
            Quantity::Storage => write!(f, "storage"),
        }
    }
}

/// Location editing.
impl GridGraph {
    /// Sets a figure of a location, and returns the value that was stored.
    ///
    /// Only finite, positive values are accepted.  They are rounded to three
    /// significant digits, and storage is clamped to the storage capacity.
    pub fn set_location_value(
        &mut self,
        id: NodeId,
        quantity: Quantity,
        value: f64,
    ) -> Result<f64, Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::invalid_value(format!(
                "The {quantity} of {id} must be a positive number, got {value}."
            )));
        }
        let capacity = self.config.storage_capacity;
        let node = self.location_mut(id)?;

        let value = round_significant(value, 3);
        let stored = match quantity {
            Quantity::Production => {
                node.set_production(value);
                value
            }
            Quantity::Demand => {
                node.set_demand(value);
                value
            }
            Quantity::Storage => {
                let value = value.min(capacity);
                node.set_storage(value);
                value
            }
        };
        Ok(stored)
    }

    /// Sets the priority of a location.
    pub fn set_priority(&mut self, id: NodeId, priority: Priority) -> Result<(), Error> {
        self.location_mut(id)?.set_priority(priority);
        Ok(())
    }

    fn location_mut(&mut self, id: NodeId) -> Result<&mut crate::GridNode, Error> {
        if !id.is_location() {
            return Err(Error::invalid_node(format!(
                "{id} is a main; only locations can be edited."
            )));
        }
        self.node_mut(id)
    }
}

/// Rounds `value` to the given number of significant digits.
fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits - 1 - magnitude;
    if exponent >= 0 {
        let scale = 10f64.powi(exponent);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-exponent);
        (value / scale).round() * scale
    }
}

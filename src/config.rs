// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! This module contains the configuration options for the `GridGraph`.

use crate::Error;

/// Configuration options for the `GridGraph`.
///
/// The options are read by the connectivity builder, the backbone builder and
/// the optimizer.  They can be loaded from named entries with
/// [`try_from_entries`][GridConfig::try_from_entries], which uses the same
/// key names as the map tool's configuration file.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Multiplier on the cost of a link between two locations.
    pub location_resistance: f64,

    /// Multiplier on the cost of a link touching a main.
    pub main_resistance: f64,

    /// Number of neighbors the connectivity builder tries to give every
    /// location.  Locations that already have more keep them.
    pub max_neighbors: usize,

    /// Penalty weight on a candidate location's distance to its closest main.
    /// Biases links away from locations that are far from the backbone.
    pub closest_main_weight: f64,

    /// Fraction of a transfer lost per hop.
    pub transmission_loss_factor: f64,

    /// Fraction of a surplus that is retained when it is put into storage.
    pub storage_efficiency: f64,

    /// Reserved for cost-scoring extensions.
    pub priority_weight: f64,

    /// Reserved for cost-scoring extensions.
    pub distance_weight: f64,

    /// Demand assumed for locations that don't specify one.
    pub base_demand: f64,

    /// Upper bound of every location's storage.
    pub storage_capacity: f64,

    /// Maximum number of matching rounds in one optimization run.
    pub max_iterations: usize,

    /// Maximum length, in hops, of a transfer path.
    pub max_path_hops: usize,

    /// Maximum length, in km, of a link created by the connectivity builder.
    pub connection_range_km: f64,

    /// Nodes of the same kind placed within this many degrees of each other
    /// are merged.
    pub merge_radius: f64,

    /// Spacing, in degrees, between mains placed along a road.
    pub main_spacing: f64,

    /// Mains closer than this many degrees to an earlier main are dropped.
    pub main_merge_radius: f64,

    /// Mains are only linked to mains within this many degrees.
    pub main_link_range: f64,

    /// Number of nearest mains every main tries to link to.
    pub main_link_count: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            location_resistance: 2.5,
            main_resistance: 1.2,
            max_neighbors: 3,
            closest_main_weight: 0.15,
            transmission_loss_factor: 0.05,
            storage_efficiency: 0.9,
            priority_weight: 10.0,
            distance_weight: 1.0,
            base_demand: 50.0,
            storage_capacity: 1000.0,
            max_iterations: 1000,
            max_path_hops: 500,
            connection_range_km: f64::INFINITY,
            merge_radius: 0.0001,
            main_spacing: 0.0005,
            main_merge_radius: 0.001,
            main_link_range: 0.01,
            main_link_count: 2,
        }
    }
}

impl GridConfig {
    /// Creates a config from named entries, starting from the defaults.
    ///
    /// Unknown keys and invalid values are rejected.
    pub fn try_from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, Error> {
        let mut config = Self::default();
        for (key, value) in entries {
            config.set(key, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn set(&mut self, key: &str, value: f64) -> Result<(), Error> {
        match key {
            "location resistance" => self.location_resistance = value,
            "main resistance" => self.main_resistance = value,
            "max neighbors" => self.max_neighbors = Self::count(key, value)?,
            "closest main weight" => self.closest_main_weight = value,
            "transmission loss factor" => self.transmission_loss_factor = value,
            "storage efficiency" => self.storage_efficiency = value,
            "priority weight" => self.priority_weight = value,
            "distance weight" => self.distance_weight = value,
            "base demand" => self.base_demand = value,
            "storage capacity" => self.storage_capacity = value,
            "max iterations" => self.max_iterations = Self::count(key, value)?,
            "max path hops" => self.max_path_hops = Self::count(key, value)?,
            "connection range" => self.connection_range_km = value,
            "merge radius" => self.merge_radius = value,
            "main spacing" => self.main_spacing = value,
            "main merge radius" => self.main_merge_radius = value,
            "main link range" => self.main_link_range = value,
            "main link count" => self.main_link_count = Self::count(key, value)?,
            _ => {
                return Err(Error::invalid_config(format!(
                    "Unknown configuration key: `{key}`."
                )))
            }
        }
        Ok(())
    }

    fn count(key: &str, value: f64) -> Result<usize, Error> {
        if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
            return Err(Error::invalid_config(format!(
                "`{key}` must be a positive integer, got {value}."
            )));
        }
        Ok(value as usize)
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("location resistance", self.location_resistance),
            ("main resistance", self.main_resistance),
            ("storage capacity", self.storage_capacity),
            ("connection range", self.connection_range_km),
            ("merge radius", self.merge_radius),
            ("main spacing", self.main_spacing),
            ("main merge radius", self.main_merge_radius),
            ("main link range", self.main_link_range),
        ];
        for (key, value) in positive {
            // `connection range` may be unbounded.
            if value.is_nan() || value <= 0.0 || (value.is_infinite() && key != "connection range")
            {
                return Err(Error::invalid_config(format!(
                    "`{key}` must be a positive number, got {value}."
                )));
            }
        }

        let non_negative = [
            ("closest main weight", self.closest_main_weight),
            ("transmission loss factor", self.transmission_loss_factor),
            ("priority weight", self.priority_weight),
            ("distance weight", self.distance_weight),
            ("base demand", self.base_demand),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(format!(
                    "`{key}` must be a non-negative number, got {value}."
                )));
            }
        }

        if !(self.storage_efficiency > 0.0 && self.storage_efficiency <= 1.0) {
            return Err(Error::invalid_config(format!(
                "`storage efficiency` must be in (0, 1], got {}.",
                self.storage_efficiency
            )));
        }

        let counts = [
            ("max neighbors", self.max_neighbors),
            ("max iterations", self.max_iterations),
            ("max path hops", self.max_path_hops),
            ("main link count", self.main_link_count),
        ];
        for (key, value) in counts {
            if value == 0 {
                return Err(Error::invalid_config(format!(
                    "`{key}` must be a positive integer, got 0."
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_from_entries() -> Result<(), Error> {
        let config = GridConfig::try_from_entries([
            ("location resistance", 3.0),
            ("max neighbors", 4.0),
            ("transmission loss factor", 0.1),
        ])?;
        assert_eq!(config.location_resistance, 3.0);
        assert_eq!(config.max_neighbors, 4);
        assert_eq!(config.transmission_loss_factor, 0.1);
        assert_eq!(config.main_resistance, 1.2);
        Ok(())
    }

    #[test]
    fn test_invalid_entries() {
        assert_eq!(
            GridConfig::try_from_entries([("voltage", 230.0)]),
            Err(Error::invalid_config("Unknown configuration key: `voltage`."))
        );
        assert_eq!(
            GridConfig::try_from_entries([("main resistance", -1.2)]),
            Err(Error::invalid_config(
                "`main resistance` must be a positive number, got -1.2."
            ))
        );
        assert_eq!(
            GridConfig::try_from_entries([("location resistance", 0.0)]),
            Err(Error::invalid_config(
                "`location resistance` must be a positive number, got 0."
            ))
        );
        assert_eq!(
            GridConfig::try_from_entries([("max neighbors", 2.5)]),
            Err(Error::invalid_config(
                "`max neighbors` must be a positive integer, got 2.5."
            ))
        );
        assert_eq!(
            GridConfig::try_from_entries([("storage efficiency", 1.5)]),
            Err(Error::invalid_config(
                "`storage efficiency` must be in (0, 1], got 1.5."
            ))
        );
        assert_eq!(
            GridConfig::try_from_entries([("transmission loss factor", -0.05)]),
            Err(Error::invalid_config(
                "`transmission loss factor` must be a non-negative number, got -0.05."
            ))
        );
    }
}

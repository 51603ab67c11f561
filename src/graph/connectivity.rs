// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Automatic linking of locations to nearby mains and locations.

use std::collections::BTreeMap;

use crate::node::{distance_km, UNREACHABLE_DISTANCE};
use crate::node_kind::KindPredicates;
use crate::{Error, GridGraph, NodeId, Position};

/// A node a location could be linked to, and what the link would cost.
struct Candidate {
    id: NodeId,
    cost: f64,
}

/// Auto-connection.
impl GridGraph {
    /// Links every location to its cheapest candidates until it has at least
    /// `max_neighbors` neighbors, and returns the number of links added.
    ///
    /// A link to a main costs `distance * main_resistance`.  A link to another
    /// location costs `distance * location_resistance`, plus the candidate's
    /// distance to its own closest main times `closest_main_weight`.
    ///
    /// Existing links are never removed, and locations that already have enough
    /// neighbors are left alone.  Nodes without usable coordinates, and nodes
    /// further away than the connection range, are never linked.
    pub fn build_connections(&mut self) -> Result<usize, Error> {
        let positions = self
            .nodes()
            .map(|n| (n.id(), n.position().copied()))
            .collect::<BTreeMap<_, _>>();
        let penalties = self.closest_main_penalties(&positions);

        let mut added = 0;
        for location in positions.keys().filter(|id| id.is_location()).copied() {
            let current = self.neighbors(location)?.count();
            let wanted = self.config.max_neighbors.max(current);
            if current >= wanted {
                continue;
            }

            let mut count = current;
            for candidate in self.candidates(location, &positions, &penalties) {
                if count >= wanted {
                    break;
                }
                if self.connect(location, candidate.id)? {
                    tracing::debug!(
                        "Linked {} to {} at cost {:.3}.",
                        location,
                        candidate.id,
                        candidate.cost
                    );
                    count += 1;
                    added += 1;
                }
            }
            if count < wanted {
                tracing::debug!(
                    "{} has {} of the {} wanted neighbors.",
                    location,
                    count,
                    wanted
                );
            }
        }

        tracing::debug!("Auto-connection added {} links.", added);
        Ok(added)
    }

    /// Returns the reachable candidates for `location`, cheapest first.
    fn candidates(
        &self,
        location: NodeId,
        positions: &BTreeMap<NodeId, Option<Position>>,
        penalties: &BTreeMap<NodeId, f64>,
    ) -> Vec<Candidate> {
        let origin = positions.get(&location).copied().flatten();
        let mut candidates = positions
            .iter()
            .filter(|(id, _)| **id != location)
            .filter_map(|(id, position)| {
                let distance = distance_km(origin.as_ref(), position.as_ref());
                if distance >= UNREACHABLE_DISTANCE || distance > self.config.connection_range_km {
                    return None;
                }
                let cost = if id.is_main() {
                    distance * self.config.main_resistance
                } else {
                    distance * self.config.location_resistance
                        + penalties.get(id).copied().unwrap_or(0.0)
                };
                Some(Candidate { id: *id, cost })
            })
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost).then(a.id.cmp(&b.id)));
        candidates
    }

    /// Returns, for every location, the distance to its closest main times
    /// `closest_main_weight`.  Without mains there is no penalty.
    fn closest_main_penalties(
        &self,
        positions: &BTreeMap<NodeId, Option<Position>>,
    ) -> BTreeMap<NodeId, f64> {
        let mains = positions
            .iter()
            .filter(|(id, _)| id.is_main())
            .map(|(_, p)| *p)
            .collect::<Vec<_>>();
        if mains.is_empty() {
            return BTreeMap::new();
        }

        positions
            .iter()
            .filter(|(id, _)| id.is_location())
            .map(|(id, position)| {
                let closest = mains
                    .iter()
                    .map(|main| distance_km(main.as_ref(), position.as_ref()))
                    .fold(UNREACHABLE_DISTANCE, f64::min);
                (*id, closest * self.config.closest_main_weight)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::GridBuilder;
    use crate::GridConfig;

    fn config(max_neighbors: usize) -> GridConfig {
        GridConfig {
            max_neighbors,
            ..Default::default()
        }
    }

    fn assert_symmetric(graph: &GridGraph) -> Result<(), Error> {
        for node in graph.nodes() {
            for neighbor in graph.neighbor_ids(node.id())? {
                assert!(graph.neighbor_ids(neighbor)?.contains(&node.id()));
            }
        }
        Ok(())
    }

    /// A few mains of the lower Manhattan backbone, and the power sources
    /// around them.
    fn manhattan() -> GridBuilder {
        let mut builder = GridBuilder::new();
        let mains = [
            builder.main_at(40.72046126415034, -74.01205133801675),
            builder.main_at(40.718704858576665, -74.012652628157),
            builder.main_at(40.71711104304284, -74.01286737463566),
            builder.main_at(40.715159380215596, -74.01333981688872),
            builder.main_at(40.71346789281921, -74.01376930984607),
        ];
        builder.chain(&mains);
        builder.producer_at(40.7162289, -74.014699, 400.0);
        builder.producer_at(40.712587, -74.0034475, 250.0);
        builder.consumer_at(40.6921502, -74.0122472, 120.0);
        builder.consumer_at(40.7128018, -74.0062233, 90.0);
        builder.consumer_at(40.7126138, -74.005849, 60.0);
        builder
    }

    #[test]
    fn test_links_are_symmetric_and_never_dropped() -> Result<(), Error> {
        let mut graph = manhattan().build(None)?;
        let before = graph
            .nodes()
            .map(|n| -> Result<(NodeId, usize), Error> {
                Ok((n.id(), graph.neighbors(n.id())?.count()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let added = graph.build_connections()?;
        assert!(added > 0);
        assert_symmetric(&graph)?;

        for (id, count) in before {
            let after = graph.neighbors(id)?.count();
            assert!(after >= count, "{id} lost neighbors");
            if id.is_location() {
                assert!(after >= 3, "{id} has only {after} neighbors");
            }
        }

        // Mains only get links to locations, never new backbone links.
        for (a, b) in graph.connections() {
            if a.is_main() && b.is_main() {
                assert_eq!(b.value, a.value + 1);
            }
        }

        // Running again adds nothing.
        assert_eq!(graph.build_connections()?, 0);
        Ok(())
    }

    #[test]
    fn test_prefers_cheaper_mains() -> Result<(), Error> {
        let mut builder = GridBuilder::new();
        let m0 = builder.main_at(0.0, 0.01);
        let l0 = builder.location_at(0.0, 0.0);
        let l1 = builder.location_at(0.0, 0.006);
        let mut graph = builder.build(Some(config(1)))?;

        assert_eq!(graph.build_connections()?, 2);
        assert_eq!(graph.neighbor_ids(m0)?, vec![l0, l1]);
        assert_eq!(graph.neighbor_ids(l0)?, vec![m0]);
        assert_eq!(graph.neighbor_ids(l1)?, vec![m0]);
        Ok(())
    }

    #[test]
    fn test_closest_main_weight() -> Result<(), Error> {
        let build = |weight: f64| -> Result<(GridGraph, Vec<NodeId>), Error> {
            let mut builder = GridBuilder::new();
            builder.main_at(0.0, 0.0);
            let l0 = builder.location_at(0.01, 0.0);
            let near_l0 = builder.location_at(0.02, 0.0);
            let near_main = builder.location_at(0.01, 0.0105);
            builder.connect(near_l0, near_main);
            let config = GridConfig {
                max_neighbors: 1,
                main_resistance: 100.0,
                closest_main_weight: weight,
                ..Default::default()
            };
            Ok((builder.build(Some(config))?, vec![l0, near_l0, near_main]))
        };

        // Without the penalty, the closest location wins.
        let (mut graph, ids) = build(0.0)?;
        graph.build_connections()?;
        assert_eq!(graph.neighbor_ids(ids[0])?, vec![ids[1]]);

        // With it, the location closer to the backbone wins.
        let (mut graph, ids) = build(1.0)?;
        graph.build_connections()?;
        assert_eq!(graph.neighbor_ids(ids[0])?, vec![ids[2]]);
        Ok(())
    }

    #[test]
    fn test_isolated_and_out_of_range_nodes() -> Result<(), Error> {
        let mut builder = GridBuilder::new();
        let m0 = builder.main_at(0.0, 0.0);
        let l0 = builder.location_at(0.0, 0.001);
        let lost = builder.consumer(10.0);
        let far = builder.location_at(5.0, 5.0);
        let config = GridConfig {
            connection_range_km: 50.0,
            ..Default::default()
        };
        let mut graph = builder.build(Some(config))?;

        graph.build_connections()?;
        assert_eq!(graph.neighbor_ids(l0)?, vec![m0]);
        assert!(graph.neighbor_ids(lost)?.is_empty());
        assert!(graph.neighbor_ids(far)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_existing_links_above_the_cap_are_kept() -> Result<(), Error> {
        let mut builder = GridBuilder::new();
        let m0 = builder.main_at(0.0, 0.0);
        let m1 = builder.main_at(0.0, 0.002);
        let l0 = builder.location_at(0.001, 0.001);
        let l1 = builder.location_at(0.002, 0.001);
        builder.connect(l0, m0).connect(l0, m1).connect(l0, l1);
        let mut graph = builder.build(Some(config(2)))?;

        graph.build_connections()?;
        assert_eq!(graph.neighbor_ids(l0)?, vec![m0, m1, l1]);
        // L1 already had one neighbor and takes one more.
        assert_eq!(graph.neighbors(l1)?.count(), 2);
        Ok(())
    }
}

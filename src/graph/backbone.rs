// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! Placement of mains along road geometry.

use std::collections::BTreeSet;

use crate::{Error, GridGraph, GridNode, NodeId, NodeKind, Position};

/// Backbone construction.
impl GridGraph {
    /// Places mains along the given road polylines and links them into a
    /// backbone.  Returns the ids of the new mains.
    ///
    /// Along every road, a main is placed each time the walked distance reaches
    /// `main_spacing`.  Mains closer than `main_merge_radius` to an earlier
    /// main are dropped.  Each new main is then linked to its
    /// `main_link_count` nearest new mains within `main_link_range`, unless
    /// the two already share a neighbor, so that the backbone has no
    /// triangles.
    ///
    /// Existing nodes are left untouched.
    pub fn add_backbone<Ways, Way>(&mut self, ways: Ways) -> Result<Vec<NodeId>, Error>
    where
        Ways: IntoIterator<Item = Way>,
        Way: AsRef<[Position]>,
    {
        let mut positions = Vec::new();
        for way in ways {
            positions.extend(self.sample_way(way.as_ref()));
        }
        let positions = self.merge_close(positions);

        let mut mains = Vec::with_capacity(positions.len());
        for position in positions {
            let id = self.next_ids.take(NodeKind::Main);
            self.insert_node(GridNode::new(id, Some(position)))?;
            mains.push((id, position));
        }

        let mut links = 0;
        for (id, position) in &mains {
            let mut candidates = mains
                .iter()
                .filter(|(other, _)| other != id)
                .map(|(other, p)| (*other, position.distance_deg(p)))
                .collect::<Vec<_>>();
            candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

            for (other, distance) in candidates.into_iter().take(self.config.main_link_count) {
                if distance >= self.config.main_link_range {
                    break;
                }
                if self.shares_neighbor(*id, other)? {
                    continue;
                }
                if self.connect(*id, other)? {
                    links += 1;
                }
            }
        }

        tracing::info!("Placed {} mains with {} backbone links.", mains.len(), links);
        Ok(mains.into_iter().map(|(id, _)| id).collect())
    }

    /// Returns the points along `way` where mains should be placed.
    fn sample_way(&self, way: &[Position]) -> Vec<Position> {
        let vertices = way
            .iter()
            .filter(|p| p.lat.is_finite() && p.lng.is_finite())
            .collect::<Vec<_>>();
        if vertices.len() < way.len() {
            tracing::warn!(
                "Skipping {} road vertices without usable coordinates.",
                way.len() - vertices.len()
            );
        }

        let mut placed = Vec::new();
        let mut walked = 0.0;
        for pair in vertices.windows(2) {
            walked += pair[0].distance_deg(pair[1]);
            if walked >= self.config.main_spacing {
                placed.push(*pair[1]);
                walked = 0.0;
            }
        }
        placed
    }

    /// Drops every position that is within the merge radius of an earlier
    /// kept position.
    fn merge_close(&self, positions: Vec<Position>) -> Vec<Position> {
        let mut kept: Vec<Position> = Vec::with_capacity(positions.len());
        for position in positions {
            if kept
                .iter()
                .all(|k| k.distance_deg(&position) >= self.config.main_merge_radius)
            {
                kept.push(position);
            }
        }
        kept
    }

    fn shares_neighbor(&self, a: NodeId, b: NodeId) -> Result<bool, Error> {
        let a_neighbors = self.neighbor_ids(a)?.into_iter().collect::<BTreeSet<_>>();
        Ok(self.neighbors(b)?.any(|n| a_neighbors.contains(&n.id())))
    }
}

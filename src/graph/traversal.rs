// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! This module contains methods that help with graph traversal.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::graph::NodeIndex;

use crate::node_kind::KindPredicates;
use crate::{Error, GridGraph, GridNode, NodeId};

/// A path through the grid, from its first node to its last.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    path: Vec<NodeId>,
}

impl Route {
    pub(crate) fn new(path: Vec<NodeId>) -> Self {
        Self { path }
    }

    /// The nodes on the route, including both ends.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn into_path(self) -> Vec<NodeId> {
        self.path
    }

    /// The number of links on the route.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Returns `true` if the route passes through a main.
    pub fn crosses_backbone(&self) -> bool {
        self.path.iter().any(|id| id.is_main())
    }

    /// Returns the route walked from the other end.
    pub(crate) fn reversed(mut self) -> Route {
        self.path.reverse();
        self
    }
}

/// Traversal methods.
impl GridGraph {
    /// Walks the graph breadth-first from `from`, and returns the route to the
    /// closest node that satisfies `goal`.
    ///
    /// Only nodes that satisfy `traversable` are walked through; goal nodes
    /// don't need to be traversable.  Routes longer than `max_hops` are not
    /// considered.  The start node is never a goal.  Neighbors are visited in
    /// id order, so ties are broken the same way on every run.
    pub fn find_within(
        &self,
        from: NodeId,
        max_hops: usize,
        traversable: impl FnMut(&GridNode) -> bool,
        goal: impl FnMut(&GridNode) -> bool,
    ) -> Result<Option<Route>, Error> {
        self.bounded_bfs(from, max_hops, &BTreeSet::new(), traversable, goal)
    }

    /// Returns the route to the closest location with a surplus.
    pub fn find_surplus(&self, from: NodeId, max_hops: usize) -> Result<Option<Route>, Error> {
        self.find_within(from, max_hops, |_| true, |n| n.is_location() && n.is_surplus())
    }

    /// Returns the route to the closest main.
    pub fn nearest_main(&self, from: NodeId, max_hops: usize) -> Result<Option<Route>, Error> {
        self.find_within(from, max_hops, |_| true, |n| n.is_main())
    }

    /// Like [`find_within`][Self::find_within], but never enters the nodes in
    /// `excluded`.
    pub(crate) fn bounded_bfs(
        &self,
        from: NodeId,
        max_hops: usize,
        excluded: &BTreeSet<NodeId>,
        mut traversable: impl FnMut(&GridNode) -> bool,
        mut goal: impl FnMut(&GridNode) -> bool,
    ) -> Result<Option<Route>, Error> {
        let start = self.index(from)?;
        let mut parents = HashMap::<NodeIndex, NodeIndex>::new();
        let mut queue = VecDeque::from([(start, 0usize)]);
        parents.insert(start, start);

        while let Some((index, depth)) = queue.pop_front() {
            if depth >= max_hops {
                continue;
            }

            let mut neighbors = self.graph.neighbors(index).collect::<Vec<_>>();
            neighbors.sort_by_key(|i| self.graph[*i].id());

            for next in neighbors {
                let node = &self.graph[next];
                if parents.contains_key(&next) || excluded.contains(&node.id()) {
                    continue;
                }
                parents.insert(next, index);

                if goal(node) {
                    return Ok(Some(self.route_to(next, &parents)));
                }
                if traversable(node) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        Ok(None)
    }

    fn route_to(&self, end: NodeIndex, parents: &HashMap<NodeIndex, NodeIndex>) -> Route {
        let mut path = vec![self.graph[end].id()];
        let mut current = end;
        while let Some(&parent) = parents.get(&current) {
            if parent == current {
                break;
            }
            path.push(self.graph[parent].id());
            current = parent;
        }
        path.reverse();
        Route::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::GridBuilder;

    /// A ring of four mains with two locations hanging off it, and a small
    /// cluster of locations attached to M0.
    ///
    /// ```text
    ///   L2 - L1 - M0 - M1
    ///             |     |
    ///             M3 - M2 - L3(producer)
    ///             |
    ///             L0(producer)
    /// ```
    fn ring() -> Result<(GridGraph, Vec<NodeId>), Error> {
        let mut builder = GridBuilder::new();
        let m0 = builder.main();
        let m1 = builder.main();
        let m2 = builder.main();
        let m3 = builder.main();
        let l0 = builder.producer(100.0);
        let l1 = builder.consumer(10.0);
        let l2 = builder.consumer(10.0);
        let l3 = builder.producer(50.0);
        builder
            .chain(&[m0, m1, m2, m3, m0])
            .chain(&[l2, l1, m0])
            .connect(m3, l0)
            .connect(m2, l3);
        let graph = builder.build(None)?;
        Ok((graph, vec![m0, m1, m2, m3, l0, l1, l2, l3]))
    }

    #[test]
    fn test_find_surplus() -> Result<(), Error> {
        let (graph, ids) = ring()?;
        let [m0, _m1, _m2, m3, l0, l1, l2, _l3] = ids[..] else {
            panic!()
        };

        let route = graph.find_surplus(l2, 10)?.unwrap();
        assert_eq!(route.path(), &[l2, l1, m0, m3, l0]);
        assert_eq!(route.hops(), 4);
        assert!(route.crosses_backbone());

        assert_eq!(graph.find_surplus(l2, 3)?, None);
        assert_eq!(graph.find_surplus(l2, 0)?, None);
        Ok(())
    }

    #[test]
    fn test_ties_are_broken_by_id() -> Result<(), Error> {
        let (graph, ids) = ring()?;
        let [_m0, m1, m2, _m3, _l0, _l1, _l2, l3] = ids[..] else {
            panic!()
        };

        // L3 is two hops away through M2.  L0 is three hops away either way
        // round the ring.
        let route = graph.find_surplus(m1, 2)?.unwrap();
        assert_eq!(route.path(), &[m1, m2, l3]);
        Ok(())
    }

    #[test]
    fn test_nearest_main() -> Result<(), Error> {
        let (graph, ids) = ring()?;
        let [m0, _m1, _m2, _m3, _l0, l1, l2, _l3] = ids[..] else {
            panic!()
        };

        let route = graph.nearest_main(l2, 5)?.unwrap();
        assert_eq!(route.path(), &[l2, l1, m0]);
        assert_eq!(graph.nearest_main(l2, 1)?, None);
        Ok(())
    }

    #[test]
    fn test_traversable_limits_the_walk() -> Result<(), Error> {
        let (graph, ids) = ring()?;
        let [_m0, _m1, _m2, _m3, _l0, l1, l2, _l3] = ids[..] else {
            panic!()
        };

        // Only locations can be walked through, and the cluster of L1 and L2
        // holds no producer.
        let route = graph.find_within(
            l2,
            10,
            |n| n.is_location(),
            |n| n.is_location() && n.is_surplus(),
        )?;
        assert_eq!(route, None);

        // A goal doesn't need to be traversable.
        let route = graph.find_within(l2, 10, |n| n.is_location(), |n| n.is_main())?;
        assert_eq!(route.map(|r| r.hops()), Some(2));
        assert!(graph
            .find_within(l1, 10, |n| n.is_location(), |n| n.is_main())?
            .is_some_and(|r| r.path() == [l1, NodeId::main(0)]));
        Ok(())
    }

    #[test]
    fn test_excluded_nodes() -> Result<(), Error> {
        let (graph, ids) = ring()?;
        let [m0, m1, m2, m3, _l0, _l1, _l2, l3] = ids[..] else {
            panic!()
        };

        // With M3 excluded, the route from M0 goes around the other side.
        let excluded = BTreeSet::from([m3]);
        let route = graph
            .bounded_bfs(m0, 10, &excluded, |_| true, |n| n.is_surplus())?
            .unwrap();
        assert_eq!(route.path(), &[m0, m1, m2, l3]);
        Ok(())
    }

    #[test]
    fn test_unknown_start() -> Result<(), Error> {
        let (graph, _) = ring()?;
        assert!(graph
            .find_surplus(NodeId::location(99), 3)
            .is_err_and(|e| e == Error::node_not_found("Node with id L99 not found.")));
        Ok(())
    }
}

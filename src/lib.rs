// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

/*!
# Grid Flow Graph

This is a library for representing a small electrical distribution network,
laid over geographic data, as an undirected graph, and for balancing energy
between its nodes.

The network has two kinds of nodes: mains, which form the long-haul backbone,
and locations, which are the buildings and generators that produce, consume
and store energy.

## Building a graph

The main struct is [`GridGraph`].  Instances can be created from nodes and
links with [`try_new`][GridGraph::try_new], or loaded from a
[`GraphSnapshot`] with [`try_from_snapshot`][GridGraph::try_from_snapshot].

Nodes can then be added interactively:

- [`place_main`][GridGraph::place_main] and
  [`place_location`][GridGraph::place_location] add a node at a position,
  merging it with an existing node of the same kind at that spot.
- [`add_backbone`][GridGraph::add_backbone] places and links mains along road
  polylines.
- [`build_connections`][GridGraph::build_connections] links every location
  to its cheapest neighbors, weighing distance with the resistance settings
  of the [`GridConfig`].

## Validation

Links are always symmetric.  Loading a snapshot checks that:

- every record is stored under its own id,
- every listed neighbor exists and lists the record back,
- no node lists itself.

If any of these checks fail, an [`Error`] is returned.  Malformed figures,
like a negative demand or an overfull storage, are instead replaced with safe
values and logged as warnings.

## Optimization

[`optimize`][GridGraph::optimize] balances production and demand on a copy of
the graph.  Each location first draws from its own storage.  Then deficits
are served, most urgent first, from the closest surplus: first among the
locations of the same cluster, then over the backbone.  Every transfer loses
a share of its amount per hop.  Finally, the remaining surpluses go into
storage.

The result is an [`Optimization`], holding the balanced graph and a
[`Ledger`] of the transfers.  Runs can be stopped early with an
[`Interrupt`].
*/

mod config;
pub use config::GridConfig;

mod error;
pub use error::Error;

mod graph;
pub use graph::{
    iterators, GraphSnapshot, GridGraph, Interrupt, Ledger, NodeRecord, Optimization, Outcome,
    Placement, Quantity, Route, TransferKind, TransferRecord,
};

mod node;
pub use node::{GridNode, NodeId, Position, Priority, KM_PER_DEGREE, UNREACHABLE_DISTANCE};

mod node_kind;
pub use node_kind::NodeKind;

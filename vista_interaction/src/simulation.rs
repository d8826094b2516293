// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout-simulation collaborator.

use hashbrown::HashMap;
use kurbo::Point;

/// Whether a node is held in place, and where.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinStatus {
    /// The simulation must not move the node.
    pub pinned: bool,
    /// World position to hold the node at, when pinned.
    pub position: Option<Point>,
}

impl PinStatus {
    /// Holds a node at `position`.
    #[must_use]
    pub const fn pinned_at(position: Point) -> Self {
        Self {
            pinned: true,
            position: Some(position),
        }
    }

    /// Returns a node to the simulation.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            pinned: false,
            position: None,
        }
    }
}

/// A running layout simulation that owns node positions.
pub trait Simulation<K> {
    /// Current world position of `id`, if the simulation knows the node.
    fn node_position(&self, id: &K) -> Option<Point>;

    /// Pins or releases the given nodes. Nodes not mentioned are unaffected.
    fn pin_nodes(&mut self, pins: HashMap<K, PinStatus>);
}

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The positioned-graph collaborator consumed by the navigation engines.
//!
//! Engines only need node positions, which node (if any) is the logical
//! cursor, and which edges connect nodes. Synthetic edges (for example ones
//! added to keep disconnected components together) are flagged as virtual
//! and ignored when measuring neighbor distances.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;

/// A node as seen by the navigation engines.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode<K> {
    /// Node id.
    pub id: K,
    /// World-space position.
    pub position: Point,
    /// Whether this node is the logical cursor.
    pub is_cursor: bool,
}

/// An edge as seen by the navigation engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge<K> {
    /// Parent endpoint.
    pub source: K,
    /// Child endpoint.
    pub target: K,
    /// Synthetic edge that does not represent a real relationship.
    pub is_virtual: bool,
}

impl<K: PartialEq> GraphEdge<K> {
    /// The endpoint opposite `id`, if `id` is one of the endpoints.
    pub fn other_endpoint(&self, id: &K) -> Option<&K> {
        if self.source == *id {
            Some(&self.target)
        } else if self.target == *id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A graph whose nodes have world positions.
pub trait PositionedGraph<K> {
    /// All nodes, in any order.
    fn nodes(&self) -> impl Iterator<Item = GraphNode<K>>;

    /// All edges, in any order.
    fn edges(&self) -> impl Iterator<Item = GraphEdge<K>>;

    /// The cursor node, if one is marked.
    fn cursor(&self) -> Option<K> {
        self.nodes().find(|node| node.is_cursor).map(|node| node.id)
    }

    /// World position of `id`.
    fn position(&self, id: &K) -> Option<Point>
    where
        K: PartialEq,
    {
        self.nodes()
            .find(|node| node.id == *id)
            .map(|node| node.position)
    }
}

/// A simple owned graph snapshot with indexed position lookup.
///
/// ```
/// use kurbo::Point;
/// use vista_navigation::{GraphSnapshot, PositionedGraph};
///
/// let mut graph = GraphSnapshot::new();
/// graph.add_node("a", Point::new(0.0, 0.0));
/// graph.add_node("b", Point::new(100.0, 0.0));
/// graph.add_edge("a", "b");
/// graph.set_cursor(Some("a"));
///
/// assert_eq!(graph.cursor(), Some("a"));
/// assert_eq!(graph.position(&"b"), Some(Point::new(100.0, 0.0)));
/// ```
#[derive(Clone, Debug)]
pub struct GraphSnapshot<K> {
    nodes: Vec<(K, Point)>,
    edges: Vec<GraphEdge<K>>,
    index: HashMap<K, usize>,
    cursor: Option<K>,
}

impl<K> Default for GraphSnapshot<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
            cursor: None,
        }
    }
}

impl<K: Clone + Eq + Hash> GraphSnapshot<K> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node, or moves it if it already exists.
    pub fn add_node(&mut self, id: K, position: Point) {
        self.set_position(id, position);
    }

    /// Sets the position of a node, inserting it if needed.
    pub fn set_position(&mut self, id: K, position: Point) {
        if let Some(&i) = self.index.get(&id) {
            self.nodes[i].1 = position;
        } else {
            self.index.insert(id.clone(), self.nodes.len());
            self.nodes.push((id, position));
        }
    }

    /// Adds a real edge.
    pub fn add_edge(&mut self, source: K, target: K) {
        self.edges.push(GraphEdge {
            source,
            target,
            is_virtual: false,
        });
    }

    /// Adds a synthetic edge, ignored by neighbor-distance calculations.
    pub fn add_virtual_edge(&mut self, source: K, target: K) {
        self.edges.push(GraphEdge {
            source,
            target,
            is_virtual: true,
        });
    }

    /// Marks `cursor` as the cursor node, or clears the marker.
    pub fn set_cursor(&mut self, cursor: Option<K>) {
        self.cursor = cursor;
    }
}

impl<K: Clone + Eq + Hash> PositionedGraph<K> for GraphSnapshot<K> {
    fn nodes(&self) -> impl Iterator<Item = GraphNode<K>> {
        self.nodes.iter().map(|(id, position)| GraphNode {
            id: id.clone(),
            position: *position,
            is_cursor: self.cursor.as_ref() == Some(id),
        })
    }

    fn edges(&self) -> impl Iterator<Item = GraphEdge<K>> {
        self.edges.iter().cloned()
    }

    fn cursor(&self) -> Option<K> {
        self.cursor
            .as_ref()
            .filter(|id| self.index.contains_key(*id))
            .cloned()
    }

    fn position(&self, id: &K) -> Option<Point> {
        self.index.get(id).map(|&i| self.nodes[i].1)
    }
}

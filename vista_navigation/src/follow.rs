// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera that keeps the cursor node and its direct neighbors in view.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use log::debug;
use vista_view2d::{bounding_rect, fit_bounds};

use crate::graph::PositionedGraph;
use crate::state::{CameraView, EngineId, FrameInput, NavigationState};

/// Neighbor distances at or below this are treated as coincident.
const MIN_NEIGHBOR_DISTANCE: f64 = 1e-9;

/// Tuning for [`CursorFollowNavigation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFollowConfig {
    /// How many neighbor distances fit across the viewport's short side.
    pub margin_multiplier: f64,
    /// Neighbor distance assumed when the cursor has no real neighbors.
    pub default_neighbor_distance: f64,
    /// Center smoothing rate, per second.
    pub center_rate: f64,
    /// Scale smoothing rate, per second.
    pub scale_rate: f64,
    /// Screen padding kept around the graph when fitting all nodes.
    pub fit_padding: f64,
    /// Smallest target scale.
    pub min_scale: f64,
    /// Largest target scale.
    pub max_scale: f64,
}

impl Default for CursorFollowConfig {
    fn default() -> Self {
        Self {
            margin_multiplier: 3.0,
            default_neighbor_distance: 200.0,
            center_rate: 6.0,
            scale_rate: 4.0,
            fit_padding: 40.0,
            min_scale: 0.05,
            max_scale: 20.0,
        }
    }
}

/// Automatic camera centered on the graph's cursor node.
///
/// Each frame the target center is the cursor's world position and the
/// target scale fits `margin_multiplier` times the farthest direct neighbor
/// distance across the viewport's short side. With no cursor, the target fits
/// every node. Center and scale approach their targets exponentially at
/// independent rates; rotation is left as found.
///
/// When the cursor node goes from having no neighbors to having some, the
/// scale snaps to its new target instead of animating. Moving the cursor to
/// another node, or selecting one after none, always animates.
#[derive(Debug)]
pub struct CursorFollowNavigation<K> {
    id: EngineId,
    config: CursorFollowConfig,
    view: Option<CameraView>,
    last_cursor: Option<K>,
    last_neighbor_count: Option<usize>,
    destroyed: bool,
}

impl<K> Default for CursorFollowNavigation<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CursorFollowNavigation<K> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CursorFollowConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: CursorFollowConfig) -> Self {
        Self {
            id: EngineId::next(),
            config,
            view: None,
            last_cursor: None,
            last_neighbor_count: None,
            destroyed: false,
        }
    }

    /// This engine's owner marker.
    #[must_use]
    pub fn id(&self) -> EngineId {
        self.id
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CursorFollowConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: CursorFollowConfig) {
        self.config = config;
    }

    /// Cursor seen on the last frame.
    #[must_use]
    pub fn cursor(&self) -> Option<&K> {
        self.last_cursor.as_ref()
    }

    /// Current world center, once the engine has produced a frame.
    #[must_use]
    pub fn center(&self) -> Option<Point> {
        self.view.map(|v| v.center)
    }

    /// Current scale, once the engine has produced a frame.
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.view.map(|v| v.scale)
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Forgets the current view and cursor history.
    pub fn reset(&mut self) {
        self.view = None;
        self.last_cursor = None;
        self.last_neighbor_count = None;
    }

    /// Releases all state; `step` echoes its input afterwards.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            debug!("cursor-follow navigation destroyed");
        }
        self.reset();
        self.destroyed = true;
    }

    /// Produces the next frame.
    pub fn step<G>(&mut self, input: &FrameInput<'_, G>, prev: &NavigationState) -> NavigationState
    where
        K: PartialEq,
        G: PositionedGraph<K>,
    {
        if self.destroyed {
            return *prev;
        }
        let viewport = input.viewport;
        let mut view = match self.view {
            Some(view) if prev.is_owned_by(self.id) => view,
            stale => {
                if stale.is_some() {
                    debug!("cursor-follow navigation displaced; resyncing from incoming view");
                }
                CameraView::from_transform(&prev.transform, viewport)
            }
        };

        if input.is_dragging_node || viewport.is_empty() {
            self.view = Some(view);
            return NavigationState::owned(prev.transform, self.id);
        }

        let graph = input.graph;
        let cursor = graph
            .cursor()
            .and_then(|id| graph.position(&id).map(|pos| (id, pos)));

        let (target_center, target_scale, snap_scale) = if let Some((id, pos)) = cursor {
            let (count, max_distance) = neighbor_extent(graph, &id, pos);
            let distance = if count == 0 || max_distance <= MIN_NEIGHBOR_DISTANCE {
                self.config.default_neighbor_distance
            } else {
                max_distance
            };
            let world_size = self.config.margin_multiplier * distance;
            let target_scale = if world_size.is_finite() && world_size > 0.0 {
                self.clamp_scale(viewport.min_dimension() / world_size)
            } else {
                view.scale
            };
            let snap = count > 0
                && self.last_neighbor_count == Some(0)
                && self.last_cursor.as_ref() == Some(&id);
            self.last_cursor = Some(id);
            self.last_neighbor_count = Some(count);
            (pos, target_scale, snap)
        } else {
            self.last_cursor = None;
            self.last_neighbor_count = None;
            let bounds = bounding_rect(graph.nodes().map(|node| node.position));
            match bounds.and_then(|b| fit_bounds(b, viewport, self.config.fit_padding)) {
                Some((center, scale)) => (center, self.clamp_scale(scale), false),
                None => {
                    self.view = Some(view);
                    return NavigationState::owned(prev.transform, self.id);
                }
            }
        };

        let dt = input.dt();
        view.center = view
            .center
            .lerp(target_center, blend(self.config.center_rate, dt));
        view.scale = if snap_scale {
            target_scale
        } else {
            view.scale + (target_scale - view.scale) * blend(self.config.scale_rate, dt)
        };

        self.view = Some(view);
        NavigationState::owned(view.to_transform(viewport), self.id)
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.config.min_scale, self.config.max_scale)
    }
}

/// Fraction of the remaining distance covered in `dt` at `rate` per second.
fn blend(rate: f64, dt: f64) -> f64 {
    1.0 - (-rate.max(0.0) * dt).exp()
}

/// Number of positioned direct neighbors over real edges, and the farthest
/// neighbor distance.
fn neighbor_extent<K, G>(graph: &G, cursor: &K, position: Point) -> (usize, f64)
where
    K: PartialEq,
    G: PositionedGraph<K>,
{
    let mut count = 0;
    let mut max_distance = 0.0_f64;
    for edge in graph.edges().filter(|edge| !edge.is_virtual) {
        let Some(other) = edge.other_endpoint(cursor) else {
            continue;
        };
        if other == cursor {
            continue;
        }
        if let Some(p) = graph.position(other) {
            count += 1;
            max_distance = max_distance.max(p.distance(position));
        }
    }
    (count, max_distance)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use vista_view2d::{ViewTransform, ViewportInfo};

    use super::{CursorFollowNavigation, neighbor_extent};
    use crate::{FrameInput, GraphSnapshot, NavigationState, PositionedGraph};

    const VIEWPORT: ViewportInfo = ViewportInfo::new(900.0, 600.0);

    fn settle(
        follow: &mut CursorFollowNavigation<u32>,
        graph: &GraphSnapshot<u32>,
        frames: usize,
    ) -> NavigationState {
        let mut state = NavigationState::new(ViewTransform::IDENTITY);
        for _ in 0..frames {
            state = follow.step(&FrameInput::new(graph, VIEWPORT, 0.016), &state);
        }
        state
    }

    fn star(distance: f64) -> GraphSnapshot<u32> {
        let mut graph = GraphSnapshot::new();
        graph.add_node(0, Point::new(10.0, 20.0));
        graph.add_node(1, Point::new(10.0 + distance, 20.0));
        graph.add_node(2, Point::new(10.0, 20.0 + distance / 2.0));
        graph.add_edge(0, 1);
        graph.add_edge(2, 0);
        graph.set_cursor(Some(0));
        graph
    }

    #[test]
    fn neighbor_extent_ignores_virtual_edges() {
        let mut graph = star(100.0);
        graph.add_node(3, Point::new(1000.0, 0.0));
        graph.add_virtual_edge(0, 3);
        let (count, max) = neighbor_extent(&graph, &0, Point::new(10.0, 20.0));
        assert_eq!(count, 2);
        assert!((max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn converges_on_neighbor_fit() {
        let graph = star(150.0);
        let mut follow = CursorFollowNavigation::new();
        let state = settle(&mut follow, &graph, 600);

        // 600 / (3 * 150)
        assert!((state.transform.scale() - 600.0 / 450.0).abs() < 1e-6);
        let center = state.transform.view_center(VIEWPORT);
        assert!((center - Point::new(10.0, 20.0)).length() < 1e-6);
    }

    #[test]
    fn doubling_distance_halves_scale() {
        let mut near = CursorFollowNavigation::new();
        let mut far = CursorFollowNavigation::new();
        let near_scale = settle(&mut near, &star(120.0), 600).transform.scale();
        let far_scale = settle(&mut far, &star(240.0), 600).transform.scale();
        assert!((near_scale / far_scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn no_cursor_fits_all_nodes() {
        let mut graph = star(100.0);
        graph.set_cursor(None);
        let mut follow = CursorFollowNavigation::new();
        let state = settle(&mut follow, &graph, 600);
        for node in [0, 1, 2] {
            let p = state.transform.world_to_screen(graph.position(&node).unwrap());
            assert!(p.x >= 39.0 && p.x <= 861.0, "node {node} outside: {p:?}");
            assert!(p.y >= 39.0 && p.y <= 561.0, "node {node} outside: {p:?}");
        }
    }

    #[test]
    fn empty_graph_echoes() {
        let graph = GraphSnapshot::<u32>::new();
        let mut follow = CursorFollowNavigation::new();
        let prev = NavigationState::new(ViewTransform::from_translation(Vec2::new(3.0, 4.0)));
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.016), &prev);
        assert_eq!(state.transform, prev.transform);
        assert!(state.is_owned_by(follow.id()));
    }

    #[test]
    fn freezes_while_dragging_a_node() {
        let graph = star(100.0);
        let mut follow = CursorFollowNavigation::new();
        let prev = settle(&mut follow, &graph, 3);
        let input = FrameInput::new(&graph, VIEWPORT, 0.016).with_dragging_node(true);
        let state = follow.step(&input, &prev);
        assert_eq!(state.transform, prev.transform);
        assert!(state.is_owned_by(follow.id()));
    }

    #[test]
    fn first_frame_continues_from_incoming_view() {
        let graph = star(100.0);
        let mut follow = CursorFollowNavigation::new();
        let prev = NavigationState::new(ViewTransform::from_view(
            Point::new(-300.0, 50.0),
            0.7,
            0.3,
            VIEWPORT,
        ));
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.0), &prev);
        assert!(state.transform.approx_eq(&prev.transform, 1e-9));
        assert!((state.transform.rotation() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn displacement_triggers_resync() {
        let graph = star(100.0);
        let mut follow = CursorFollowNavigation::new();
        settle(&mut follow, &graph, 10);

        let foreign = NavigationState::new(ViewTransform::from_view(
            Point::new(5000.0, 5000.0),
            2.0,
            0.0,
            VIEWPORT,
        ));
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.0), &foreign);
        assert!(state.transform.approx_eq(&foreign.transform, 1e-6));
    }

    #[test]
    fn gaining_first_neighbor_snaps_scale() {
        let mut graph = GraphSnapshot::new();
        graph.add_node(0_u32, Point::ORIGIN);
        graph.set_cursor(Some(0));
        let mut follow = CursorFollowNavigation::new();
        let state = settle(&mut follow, &graph, 2);

        graph.add_node(1, Point::new(100.0, 0.0));
        graph.add_edge(0, 1);
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.016), &state);

        // 600 / (3 * 100), applied at once; the center still animates.
        assert!((state.transform.scale() - 2.0).abs() < 1e-12);
        assert!(state.transform.view_center(VIEWPORT).distance(Point::ORIGIN) > 1.0);
    }

    #[test]
    fn first_cursor_selection_does_not_snap() {
        let mut graph = star(100.0);
        graph.set_cursor(None);
        let mut follow = CursorFollowNavigation::new();
        let state = settle(&mut follow, &graph, 2);
        let before = state.transform.scale();

        graph.set_cursor(Some(0));
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.016), &state);
        let target = 600.0 / 300.0;
        let after = state.transform.scale();
        assert!((after - target).abs() > 1e-3, "scale snapped to {after}");
        assert!((after - before).abs() < (target - before).abs());
    }

    #[test]
    fn moving_from_a_leaf_to_a_connected_node_does_not_snap() {
        let mut graph = star(100.0);
        graph.add_node(9, Point::new(-500.0, 0.0));
        graph.set_cursor(Some(9));
        let mut follow = CursorFollowNavigation::new();
        let state = settle(&mut follow, &graph, 2);
        let before = state.transform.scale();

        graph.set_cursor(Some(0));
        let state = follow.step(&FrameInput::new(&graph, VIEWPORT, 0.016), &state);
        let target = 600.0 / 300.0;
        let after = state.transform.scale();
        assert!((after - target).abs() > 1e-3, "scale snapped to {after}");
        assert!((after - before).abs() < (target - before).abs());
    }
}

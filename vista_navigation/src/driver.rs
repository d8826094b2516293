// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side frame driver.

use core::mem;

use log::debug;
use vista_view2d::{ViewTransform, ViewportInfo};

use crate::engine::NavigationEngine;
use crate::fly::FlyNavigation;
use crate::graph::PositionedGraph;
use crate::manual::ManualControl;
use crate::state::{FrameInput, NavigationState};

/// Owns the active engine and the last frame it produced.
///
/// Each [`step`](Self::step) hands the previous frame back to the engine, so
/// hosts never have to thread [`NavigationState`] themselves. Swapping
/// engines is synchronous: the outgoing engine is destroyed immediately and
/// the incoming one sees exactly the last state on its first frame.
///
/// ```
/// use kurbo::Vec2;
/// use vista_navigation::{FlyNavigation, GraphSnapshot, ManualNavigation, Navigator};
/// use vista_view2d::{ViewTransform, ViewportInfo};
///
/// let graph = GraphSnapshot::<u32>::new();
/// let viewport = ViewportInfo::new(800.0, 600.0);
/// let mut nav: Navigator<u32> =
///     Navigator::new(ManualNavigation::new(), ViewTransform::IDENTITY);
///
/// if let Some(manual) = nav.manual() {
///     manual.pan(Vec2::new(30.0, 0.0));
/// }
/// let before = nav.step(&graph, viewport, 0.016, false);
///
/// let old = nav.set_engine(FlyNavigation::new());
/// assert!(old.is_destroyed());
///
/// // Nothing is held, so flight starts exactly where manual left off.
/// let after = nav.step(&graph, viewport, 0.016, false);
/// assert!(after.transform.approx_eq(&before.transform, 1e-9));
/// ```
#[derive(Debug)]
pub struct Navigator<K> {
    engine: NavigationEngine<K>,
    state: NavigationState,
}

impl<K> Navigator<K> {
    /// Creates a driver starting from `initial`.
    pub fn new(engine: impl Into<NavigationEngine<K>>, initial: ViewTransform) -> Self {
        Self {
            engine: engine.into(),
            state: NavigationState::new(initial),
        }
    }

    /// The last produced state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The last produced transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.state.transform
    }

    /// Replaces the view from outside any engine.
    ///
    /// The active engine treats this as a displacement and resyncs.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.state = NavigationState::new(transform);
    }

    /// The active engine.
    #[must_use]
    pub fn engine(&self) -> &NavigationEngine<K> {
        &self.engine
    }

    /// The active engine, mutably.
    pub fn engine_mut(&mut self) -> &mut NavigationEngine<K> {
        &mut self.engine
    }

    /// Destroys the active engine and installs `engine` in its place.
    ///
    /// Returns the destroyed engine.
    pub fn set_engine(&mut self, engine: impl Into<NavigationEngine<K>>) -> NavigationEngine<K> {
        let mut old = mem::replace(&mut self.engine, engine.into());
        debug!(
            "navigation engine swapped {:?} -> {:?}",
            old.kind(),
            self.engine.kind()
        );
        old.destroy();
        old
    }

    /// Direct-manipulation handle of the active engine, if it has one.
    pub fn manual(&mut self) -> Option<&mut dyn ManualControl> {
        self.engine.manual_control()
    }

    /// Flight handle of the active engine, if it is a fly engine.
    pub fn fly(&mut self) -> Option<&mut FlyNavigation<K>> {
        self.engine.fly()
    }

    /// Advances one frame and returns the new state.
    pub fn step<G>(
        &mut self,
        graph: &G,
        viewport: ViewportInfo,
        delta_time: f64,
        is_dragging_node: bool,
    ) -> NavigationState
    where
        K: Clone + PartialEq,
        G: PositionedGraph<K>,
    {
        let input =
            FrameInput::new(graph, viewport, delta_time).with_dragging_node(is_dragging_node);
        self.state = self.engine.step(&input, &self.state);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use vista_view2d::{ViewTransform, ViewportInfo};

    use super::Navigator;
    use crate::{
        CursorFollowNavigation, EngineKind, GraphSnapshot, ManualNavigation, NavigationState,
    };

    const VIEWPORT: ViewportInfo = ViewportInfo::new(900.0, 600.0);

    #[test]
    fn swap_hands_over_the_last_state() {
        let mut graph = GraphSnapshot::new();
        graph.add_node(1_u32, Point::new(500.0, 500.0));
        graph.set_cursor(Some(1));

        let mut nav: Navigator<u32> =
            Navigator::new(ManualNavigation::new(), ViewTransform::IDENTITY);
        if let Some(manual) = nav.manual() {
            manual.zoom(Point::new(100.0, 100.0), 1.5);
        }
        let last = nav.step(&graph, VIEWPORT, 0.016, false);

        nav.set_engine(CursorFollowNavigation::new());
        assert_eq!(nav.engine().kind(), EngineKind::CursorFollow);
        assert_eq!(*nav.state(), last);

        // A zero-length first frame reproduces the handed-over view.
        let first = nav.step(&graph, VIEWPORT, 0.0, false);
        assert!(first.transform.approx_eq(&last.transform, 1e-9));
    }

    #[test]
    fn external_transform_displaces_engine() {
        let graph = GraphSnapshot::<u32>::new();
        let mut nav: Navigator<u32> =
            Navigator::new(ManualNavigation::new(), ViewTransform::IDENTITY);
        nav.step(&graph, VIEWPORT, 0.016, false);
        if let Some(manual) = nav.manual() {
            manual.set_velocity(Vec2::new(400.0, 0.0));
        }

        let jump = ViewTransform::from_translation(Vec2::new(-50.0, 0.0));
        nav.set_transform(jump);
        assert_eq!(*nav.state(), NavigationState::new(jump));
        let state = nav.step(&graph, VIEWPORT, 0.016, false);
        assert_eq!(state.transform, jump);
    }
}

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switching between manual control and cursor following.

use kurbo::{Point, Vec2};
use log::debug;
use vista_view2d::ViewTransform;

use crate::follow::CursorFollowNavigation;
use crate::graph::PositionedGraph;
use crate::manual::{ManualControl, ManualNavigation};
use crate::state::{FrameInput, NavigationState};

/// Which sub-engine [`AutoNavigation`] is driving with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoMode {
    /// Direct manipulation through [`ManualControl`].
    Manual,
    /// Following the cursor node.
    #[default]
    Follow,
}

/// Cursor following that yields to the user.
///
/// Any pan, zoom or rotate switches to manual control. Selecting a cursor
/// when none was selected switches back to following. Momentum calls reach
/// the manual engine without changing mode, since momentum continues a
/// manual gesture. The engine being switched to is always reset first, so it
/// picks up from the current view instead of where it last left off.
#[derive(Debug)]
pub struct AutoNavigation<K> {
    manual: ManualNavigation,
    follow: CursorFollowNavigation<K>,
    mode: AutoMode,
    last_cursor: Option<K>,
    destroyed: bool,
}

impl<K> Default for AutoNavigation<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AutoNavigation<K> {
    /// Creates an engine from default-configured sub-engines.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(ManualNavigation::new(), CursorFollowNavigation::new())
    }

    /// Creates an engine from configured sub-engines, starting in
    /// [`AutoMode::Follow`].
    #[must_use]
    pub fn from_parts(manual: ManualNavigation, follow: CursorFollowNavigation<K>) -> Self {
        Self {
            manual,
            follow,
            mode: AutoMode::default(),
            last_cursor: None,
            destroyed: false,
        }
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> AutoMode {
        self.mode
    }

    /// Switches mode, resetting the entering sub-engine if it changes.
    pub fn set_mode(&mut self, mode: AutoMode) {
        if self.destroyed || self.mode == mode {
            return;
        }
        debug!("auto navigation switching {:?} -> {:?}", self.mode, mode);
        match mode {
            AutoMode::Manual => self.manual.reset(),
            AutoMode::Follow => self.follow.reset(),
        }
        self.mode = mode;
    }

    /// The manual sub-engine.
    #[must_use]
    pub fn manual(&self) -> &ManualNavigation {
        &self.manual
    }

    /// The cursor-follow sub-engine.
    #[must_use]
    pub fn follow(&self) -> &CursorFollowNavigation<K> {
        &self.follow
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroys both sub-engines; `step` echoes its input afterwards.
    pub fn destroy(&mut self) {
        self.manual.destroy();
        self.follow.destroy();
        self.last_cursor = None;
        self.destroyed = true;
    }

    /// Produces the next frame with the active sub-engine.
    pub fn step<G>(&mut self, input: &FrameInput<'_, G>, prev: &NavigationState) -> NavigationState
    where
        K: PartialEq,
        G: PositionedGraph<K>,
    {
        if self.destroyed {
            return *prev;
        }
        let cursor = input.graph.cursor();
        if self.last_cursor.is_none() && cursor.is_some() {
            self.set_mode(AutoMode::Follow);
        }
        self.last_cursor = cursor;

        match self.mode {
            AutoMode::Manual => self.manual.step(input, prev),
            AutoMode::Follow => self.follow.step(input, prev),
        }
    }
}

impl<K> ManualControl for AutoNavigation<K> {
    fn pan(&mut self, delta: Vec2) {
        self.set_mode(AutoMode::Manual);
        self.manual.pan(delta);
    }

    fn zoom(&mut self, center: Point, factor: f64) {
        self.set_mode(AutoMode::Manual);
        self.manual.zoom(center, factor);
    }

    fn rotate(&mut self, center: Point, angle: f64) {
        self.set_mode(AutoMode::Manual);
        self.manual.rotate(center, angle);
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.manual.set_velocity(velocity);
    }

    fn stop_momentum(&mut self) {
        self.manual.stop_momentum();
    }

    fn apply_screen_transform(&mut self, transform: ViewTransform) {
        self.set_mode(AutoMode::Manual);
        self.manual.apply_screen_transform(transform);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use vista_view2d::{ViewTransform, ViewportInfo};

    use super::{AutoMode, AutoNavigation};
    use crate::{FrameInput, GraphSnapshot, ManualControl, NavigationState};

    const VIEWPORT: ViewportInfo = ViewportInfo::new(900.0, 600.0);

    fn graph() -> GraphSnapshot<u32> {
        let mut graph = GraphSnapshot::new();
        graph.add_node(0, Point::new(0.0, 0.0));
        graph.add_node(1, Point::new(100.0, 0.0));
        graph.add_edge(0, 1);
        graph
    }

    fn step(
        auto: &mut AutoNavigation<u32>,
        graph: &GraphSnapshot<u32>,
        prev: &NavigationState,
    ) -> NavigationState {
        auto.step(&FrameInput::new(graph, VIEWPORT, 0.016), prev)
    }

    #[test]
    fn starts_following() {
        let auto = AutoNavigation::<u32>::new();
        assert_eq!(auto.mode(), AutoMode::Follow);
    }

    #[test]
    fn manual_calls_take_over() {
        let graph = graph();
        let mut auto = AutoNavigation::new();
        let state = step(&mut auto, &graph, &NavigationState::new(ViewTransform::IDENTITY));

        auto.pan(Vec2::new(25.0, 0.0));
        assert_eq!(auto.mode(), AutoMode::Manual);

        // The manual engine continues from the follow engine's last frame.
        let next = step(&mut auto, &graph, &state);
        assert!((next.transform.tx - (state.transform.tx + 25.0)).abs() < 1e-9);
        assert!(next.is_owned_by(auto.manual().id()));
    }

    #[test]
    fn momentum_does_not_change_mode() {
        let mut auto = AutoNavigation::<u32>::new();
        auto.set_velocity(Vec2::new(100.0, 0.0));
        assert_eq!(auto.mode(), AutoMode::Follow);
        auto.stop_momentum();
        assert_eq!(auto.mode(), AutoMode::Follow);
    }

    #[test]
    fn new_cursor_resumes_following() {
        let mut graph = graph();
        let mut auto = AutoNavigation::new();
        let mut state = step(&mut auto, &graph, &NavigationState::new(ViewTransform::IDENTITY));

        auto.zoom(Point::new(10.0, 10.0), 2.0);
        state = step(&mut auto, &graph, &state);
        assert_eq!(auto.mode(), AutoMode::Manual);

        graph.set_cursor(Some(0));
        let next = step(&mut auto, &graph, &state);
        assert_eq!(auto.mode(), AutoMode::Follow);
        assert!(next.is_owned_by(auto.follow().id()));

        // Same cursor on later frames is not a new selection.
        auto.pan(Vec2::new(1.0, 0.0));
        step(&mut auto, &graph, &next);
        assert_eq!(auto.mode(), AutoMode::Manual);
    }

    #[test]
    fn entering_engine_starts_from_current_view() {
        let graph = graph();
        let mut auto = AutoNavigation::new();
        let start = NavigationState::new(ViewTransform::IDENTITY);

        auto.set_velocity(Vec2::new(1000.0, 0.0));
        auto.pan(Vec2::new(5.0, 0.0));
        let state = step(&mut auto, &graph, &start);

        // Entering manual mode reset it, so the earlier velocity is gone.
        assert_eq!(auto.manual().velocity(), Vec2::ZERO);
        assert!((state.transform.tx - 5.0).abs() < 1e-9);
    }

    #[test]
    fn destroyed_engine_echoes() {
        let graph = graph();
        let mut auto = AutoNavigation::new();
        auto.destroy();
        auto.pan(Vec2::new(5.0, 0.0));
        assert_eq!(auto.mode(), AutoMode::Follow);
        let prev = NavigationState::new(ViewTransform::IDENTITY);
        assert_eq!(step(&mut auto, &graph, &prev), prev);
        assert!(auto.is_destroyed());
    }
}

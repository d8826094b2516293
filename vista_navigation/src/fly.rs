// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free flight driven by held direction and zoom keys.

use alloc::boxed::Box;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;
use log::debug;

use crate::graph::PositionedGraph;
use crate::state::{CameraView, EngineId, FrameInput, NavigationState, bounded_scale};

bitflags::bitflags! {
    /// Held flight controls.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FlyForces: u8 {
        /// Move the camera up the screen.
        const UP       = 0b0000_0001;
        /// Move the camera down the screen.
        const DOWN     = 0b0000_0010;
        /// Move the camera left.
        const LEFT     = 0b0000_0100;
        /// Move the camera right.
        const RIGHT    = 0b0000_1000;
        /// Zoom in.
        const ZOOM_IN  = 0b0001_0000;
        /// Zoom out.
        const ZOOM_OUT = 0b0010_0000;
    }
}

impl FlyForces {
    /// Unit screen-space direction of the held movement keys.
    ///
    /// Opposite keys cancel; diagonals are normalized.
    #[must_use]
    pub fn direction(self) -> Vec2 {
        let axis = |pos: Self, neg: Self| f64::from(u8::from(self.contains(pos)))
            - f64::from(u8::from(self.contains(neg)));
        let dir = Vec2::new(axis(Self::RIGHT, Self::LEFT), axis(Self::DOWN, Self::UP));
        if dir == Vec2::ZERO {
            dir
        } else {
            dir.normalize()
        }
    }

    /// `1.0` for zoom in, `-1.0` for zoom out, `0.0` for neither or both.
    #[must_use]
    pub fn zoom_direction(self) -> f64 {
        f64::from(u8::from(self.contains(Self::ZOOM_IN)))
            - f64::from(u8::from(self.contains(Self::ZOOM_OUT)))
    }
}

/// Tuning for [`FlyNavigation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlyConfig {
    /// Screen-space acceleration while a direction is held, px/s².
    pub pan_accel: f64,
    /// Pan velocity damping rate, per second.
    pub pan_damping: f64,
    /// Log-scale acceleration while a zoom key is held, per second².
    pub zoom_accel: f64,
    /// Zoom velocity damping rate, per second.
    pub zoom_damping: f64,
    /// Smallest scale.
    pub min_scale: f64,
    /// Largest scale.
    pub max_scale: f64,
}

impl Default for FlyConfig {
    fn default() -> Self {
        Self {
            pan_accel: 3000.0,
            pan_damping: 5.0,
            zoom_accel: 4.0,
            zoom_damping: 5.0,
            min_scale: 0.05,
            max_scale: 20.0,
        }
    }
}

/// Callback fired when auto-selection picks a different node.
pub type CursorChangeCallback<K> = Box<dyn FnMut(&K)>;

/// Keyboard-style flight over the graph.
///
/// Velocity lives in screen pixels per second and is converted to world
/// units through the current scale, so flight speed looks the same at every
/// zoom level. Zoom is integrated in log space. After moving, the node
/// nearest the view center becomes the selection; the callback only fires
/// when that node changes.
pub struct FlyNavigation<K> {
    id: EngineId,
    config: FlyConfig,
    forces: FlyForces,
    view: Option<CameraView>,
    velocity: Vec2,
    zoom_velocity: f64,
    selected: Option<K>,
    auto_select_paused: bool,
    on_cursor_change: Option<CursorChangeCallback<K>>,
    destroyed: bool,
}

impl<K: fmt::Debug> fmt::Debug for FlyNavigation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlyNavigation")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("forces", &self.forces)
            .field("view", &self.view)
            .field("velocity", &self.velocity)
            .field("zoom_velocity", &self.zoom_velocity)
            .field("selected", &self.selected)
            .field("auto_select_paused", &self.auto_select_paused)
            .field("on_cursor_change", &self.on_cursor_change.is_some())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<K> Default for FlyNavigation<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FlyNavigation<K> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FlyConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: FlyConfig) -> Self {
        Self {
            id: EngineId::next(),
            config,
            forces: FlyForces::empty(),
            view: None,
            velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            selected: None,
            auto_select_paused: false,
            on_cursor_change: None,
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
    pub fn config(&self) -> &FlyConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: FlyConfig) {
        self.config = config;
    }

    /// Currently held controls.
    #[must_use]
    pub fn forces(&self) -> FlyForces {
        self.forces
    }

    /// Presses or releases `forces`.
    pub fn set_force(&mut self, forces: FlyForces, pressed: bool) {
        if !self.destroyed {
            self.forces.set(forces, pressed);
        }
    }

    /// Replaces the whole set of held controls.
    pub fn set_forces(&mut self, forces: FlyForces) {
        if !self.destroyed {
            self.forces = forces;
        }
    }

    /// Screen-space velocity in px/s.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Log-scale zoom velocity, per second.
    #[must_use]
    pub fn zoom_velocity(&self) -> f64 {
        self.zoom_velocity
    }

    /// Node last picked by auto-selection.
    #[must_use]
    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    /// Installs the callback fired when auto-selection changes.
    pub fn set_on_cursor_change(&mut self, callback: impl FnMut(&K) + 'static) {
        if !self.destroyed {
            self.on_cursor_change = Some(Box::new(callback));
        }
    }

    /// Suspends or resumes auto-selection.
    pub fn set_auto_select_paused(&mut self, paused: bool) {
        self.auto_select_paused = paused;
    }

    /// Returns `true` while auto-selection is suspended.
    #[must_use]
    pub fn is_auto_select_paused(&self) -> bool {
        self.auto_select_paused
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drops the view, velocities and selection; held controls stay held.
    pub fn reset(&mut self) {
        self.view = None;
        self.velocity = Vec2::ZERO;
        self.zoom_velocity = 0.0;
        self.selected = None;
    }

    /// Releases all state and the callback; `step` echoes its input afterwards.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            debug!("fly navigation destroyed");
        }
        self.reset();
        self.forces = FlyForces::empty();
        self.on_cursor_change = None;
        self.destroyed = true;
    }

    /// Produces the next frame.
    pub fn step<G>(&mut self, input: &FrameInput<'_, G>, prev: &NavigationState) -> NavigationState
    where
        K: Clone + PartialEq,
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
                    debug!("fly navigation displaced; resyncing from incoming view");
                    self.velocity = Vec2::ZERO;
                    self.zoom_velocity = 0.0;
                }
                CameraView::from_transform(&prev.transform, viewport)
            }
        };
        let dt = input.dt();
        let cfg = self.config;

        let accel = self.forces.direction() * cfg.pan_accel;
        self.velocity = (self.velocity + accel * dt) * damping(cfg.pan_damping, dt);
        let world_velocity = unrotate(self.velocity, view.rotation) / view.scale;
        view.center += world_velocity * dt;

        let zoom_accel = self.forces.zoom_direction() * cfg.zoom_accel;
        self.zoom_velocity = (self.zoom_velocity + zoom_accel * dt) * damping(cfg.zoom_damping, dt);
        let scale = view.scale * (self.zoom_velocity * dt).exp();
        let bounded = bounded_scale(view.scale, scale, cfg.min_scale, cfg.max_scale);
        if bounded != scale {
            self.zoom_velocity = 0.0;
        }
        view.scale = bounded;

        self.view = Some(view);
        if !self.auto_select_paused {
            self.auto_select(input.graph, view);
        }
        NavigationState::owned(view.to_transform(viewport), self.id)
    }

    fn auto_select<G>(&mut self, graph: &G, view: CameraView)
    where
        K: Clone + PartialEq,
        G: PositionedGraph<K>,
    {
        let mut nearest: Option<(K, f64)> = None;
        for node in graph.nodes() {
            let d2 = (node.position - view.center).hypot2();
            if nearest.as_ref().is_none_or(|(_, best)| d2 < *best) {
                nearest = Some((node.id, d2));
            }
        }
        let Some((id, _)) = nearest else {
            return;
        };
        if self.selected.as_ref() == Some(&id) {
            return;
        }
        debug!("fly navigation auto-selected a new cursor");
        if let Some(callback) = self.on_cursor_change.as_mut() {
            callback(&id);
        }
        self.selected = Some(id);
    }
}

fn damping(rate: f64, dt: f64) -> f64 {
    (-rate.max(0.0) * dt).exp()
}

/// Rotates a screen-space vector into world axes for a view rotated by `angle`.
fn unrotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = (angle.sin(), angle.cos());
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

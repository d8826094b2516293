// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direct pan/zoom/rotate navigation with release momentum.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use log::debug;
use smallvec::SmallVec;
use vista_view2d::ViewTransform;

use crate::state::{EngineId, FrameInput, NavigationState, bounded_scale};

/// Tuning for [`ManualNavigation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManualConfig {
    /// Smallest scale zooming or pinching may reach.
    pub min_scale: f64,
    /// Largest scale zooming or pinching may reach.
    pub max_scale: f64,
    /// Momentum decay rate, per second.
    pub friction: f64,
    /// Momentum below this speed (px/s) stops outright.
    pub min_velocity: f64,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.05,
            max_scale: 20.0,
            friction: 4.0,
            min_velocity: 5.0,
        }
    }
}

impl ManualConfig {
    fn bound(&self, current: f64, proposed: f64) -> f64 {
        bounded_scale(current, proposed, self.min_scale, self.max_scale)
    }
}

/// The direct-manipulation surface shared by [`ManualNavigation`] and
/// [`AutoNavigation`](crate::AutoNavigation).
///
/// All view operations are in screen space.
pub trait ManualControl {
    /// Pans by a screen-space delta.
    fn pan(&mut self, delta: Vec2);

    /// Zooms by `factor` around a screen point, clamped to the configured
    /// scale range.
    fn zoom(&mut self, center: Point, factor: f64);

    /// Rotates by `angle` radians around a screen point.
    fn rotate(&mut self, center: Point, angle: f64);

    /// Sets the momentum velocity in screen pixels per second.
    fn set_velocity(&mut self, velocity: Vec2);

    /// Zeroes the momentum velocity.
    fn stop_momentum(&mut self);

    /// Left-multiplies an arbitrary screen-space transform onto the view.
    ///
    /// The resulting scale is clamped like [`zoom`](Self::zoom), about the
    /// transform's fixed point.
    fn apply_screen_transform(&mut self, transform: ViewTransform);
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PendingOp {
    Pan(Vec2),
    Zoom { center: Point, factor: f64 },
    Rotate { center: Point, angle: f64 },
    Transform(ViewTransform),
}

impl PendingOp {
    fn apply(self, transform: ViewTransform, config: &ManualConfig) -> ViewTransform {
        match self {
            Self::Pan(delta) => transform.translate(delta),
            Self::Zoom { center, factor } => {
                let scale = transform.scale();
                if !scale.is_finite() || scale <= 0.0 {
                    return transform;
                }
                let target = config.bound(scale, scale * factor);
                transform.scale_around(center, target / scale)
            }
            Self::Rotate { center, angle } => transform.rotate_around(center, angle),
            Self::Transform(m) => {
                let next = m * transform;
                let scale = transform.scale();
                let next_scale = next.scale();
                if !scale.is_finite() || scale <= 0.0 {
                    return next;
                }
                if !next_scale.is_finite() || next_scale <= 0.0 {
                    return transform;
                }
                let target = config.bound(scale, next_scale);
                if target == next_scale {
                    return next;
                }
                // Undo the excess about the point the gesture zoomed around.
                let anchor = m.fixed_point().unwrap_or(Point::ORIGIN);
                next.scale_around(anchor, target / next_scale)
            }
        }
    }
}

/// Navigation driven entirely by explicit calls.
///
/// Operations issued between frames are queued and replayed, in order, onto
/// the incoming transform at the next [`step`](Self::step). After that the
/// momentum velocity, if any, is integrated and decayed.
///
/// ```
/// use kurbo::Point;
/// use vista_navigation::{
///     FrameInput, GraphSnapshot, ManualControl, ManualNavigation, NavigationState,
/// };
/// use vista_view2d::{ViewTransform, ViewportInfo};
///
/// let graph = GraphSnapshot::<u32>::new();
/// let input = FrameInput::new(&graph, ViewportInfo::new(800.0, 600.0), 0.016);
///
/// let mut manual = ManualNavigation::new();
/// manual.zoom(Point::new(100.0, 100.0), 2.0);
/// let state = manual.step(&input, &NavigationState::new(ViewTransform::IDENTITY));
///
/// assert_eq!(state.transform.scale(), 2.0);
/// assert_eq!(
///     state.transform.world_to_screen(Point::new(100.0, 100.0)),
///     Point::new(100.0, 100.0),
/// );
/// ```
#[derive(Debug)]
pub struct ManualNavigation {
    id: EngineId,
    config: ManualConfig,
    last: Option<ViewTransform>,
    pending: SmallVec<[PendingOp; 4]>,
    velocity: Vec2,
    destroyed: bool,
}

impl Default for ManualNavigation {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualNavigation {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ManualConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: ManualConfig) -> Self {
        Self {
            id: EngineId::next(),
            config,
            last: None,
            pending: SmallVec::new(),
            velocity: Vec2::ZERO,
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
    pub fn config(&self) -> &ManualConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ManualConfig) {
        self.config = config;
    }

    /// Current momentum velocity in px/s.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// The last produced transform with queued operations applied.
    ///
    /// `None` before the first frame.
    #[must_use]
    pub fn transform(&self) -> Option<ViewTransform> {
        self.last.map(|t| {
            self.pending
                .iter()
                .fold(t, |t, op| op.apply(t, &self.config))
        })
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drops queued operations, momentum, and the remembered view.
    ///
    /// The next frame starts over from the incoming state.
    pub fn reset(&mut self) {
        self.last = None;
        self.pending.clear();
        self.velocity = Vec2::ZERO;
    }

    /// Releases all state; later calls are ignored and `step` echoes its input.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            debug!("manual navigation destroyed");
        }
        self.reset();
        self.destroyed = true;
    }

    /// Produces the next frame.
    pub fn step<G>(
        &mut self,
        input: &FrameInput<'_, G>,
        prev: &NavigationState,
    ) -> NavigationState {
        if self.destroyed {
            return *prev;
        }
        if self.last.is_some() && !prev.is_owned_by(self.id) {
            debug!("manual navigation displaced; resyncing from incoming view");
            self.velocity = Vec2::ZERO;
        }

        let mut transform = prev.transform;
        for op in self.pending.drain(..) {
            transform = op.apply(transform, &self.config);
        }
        transform = self.integrate_momentum(transform, input.dt());

        self.last = Some(transform);
        NavigationState::owned(transform, self.id)
    }

    fn integrate_momentum(&mut self, transform: ViewTransform, dt: f64) -> ViewTransform {
        if self.velocity == Vec2::ZERO {
            return transform;
        }
        let moved = transform.translate(self.velocity * dt);
        self.velocity *= (-self.config.friction.max(0.0) * dt).exp();
        if self.velocity.length() < self.config.min_velocity {
            self.velocity = Vec2::ZERO;
        }
        moved
    }

    fn push(&mut self, op: PendingOp) {
        if !self.destroyed {
            self.pending.push(op);
        }
    }
}

impl ManualControl for ManualNavigation {
    fn pan(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.push(PendingOp::Pan(delta));
        }
    }

    fn zoom(&mut self, center: Point, factor: f64) {
        if factor.is_finite() && factor > 0.0 && center.is_finite() {
            self.push(PendingOp::Zoom { center, factor });
        }
    }

    fn rotate(&mut self, center: Point, angle: f64) {
        if angle.is_finite() && center.is_finite() {
            self.push(PendingOp::Rotate { center, angle });
        }
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if !self.destroyed && velocity.is_finite() {
            self.velocity = velocity;
        }
    }

    fn stop_momentum(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    fn apply_screen_transform(&mut self, transform: ViewTransform) {
        if transform.is_finite() && !transform.is_degenerate() {
            self.push(PendingOp::Transform(transform));
        }
    }
}

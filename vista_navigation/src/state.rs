// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame navigation state and engine inputs.

use core::sync::atomic::{AtomicUsize, Ordering};

use kurbo::Point;
use vista_view2d::{ViewTransform, ViewportInfo};

/// Largest frame delta, in seconds, that the integrators will consume.
///
/// A host that stalls (a hidden tab, a debugger pause) would otherwise feed
/// one enormous step into momentum and flight, throwing the view far away.
pub const MAX_DELTA_TIME: f64 = 0.25;

/// Identity of one engine instance.
///
/// Every engine stamps its id on the [`NavigationState`] it returns. On the
/// next frame it compares the incoming state's owner with its own id: a
/// mismatch means another engine drove the view in between (or this is the
/// first frame), and the engine must re-derive its internal view from the
/// incoming transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(usize);

impl EngineId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The view produced by a navigation engine for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationState {
    /// World-to-screen transform to render with.
    pub transform: ViewTransform,
    /// Engine that produced this state, if any.
    pub owner: Option<EngineId>,
}

impl NavigationState {
    /// A state not produced by any engine, such as the initial view.
    #[must_use]
    pub const fn new(transform: ViewTransform) -> Self {
        Self {
            transform,
            owner: None,
        }
    }

    /// Returns `true` if `id` produced this state.
    #[must_use]
    pub fn is_owned_by(&self, id: EngineId) -> bool {
        self.owner == Some(id)
    }

    pub(crate) const fn owned(transform: ViewTransform, id: EngineId) -> Self {
        Self {
            transform,
            owner: Some(id),
        }
    }
}

/// Everything an engine reads from the host for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a, G> {
    /// The positioned graph.
    pub graph: &'a G,
    /// Size of the rendering surface.
    pub viewport: ViewportInfo,
    /// Seconds since the previous frame.
    pub delta_time: f64,
    /// A node drag is in progress; auto-moving engines hold still.
    pub is_dragging_node: bool,
}

impl<'a, G> FrameInput<'a, G> {
    /// Creates an input with no node drag in progress.
    pub fn new(graph: &'a G, viewport: ViewportInfo, delta_time: f64) -> Self {
        Self {
            graph,
            viewport,
            delta_time,
            is_dragging_node: false,
        }
    }

    /// Sets [`FrameInput::is_dragging_node`].
    #[must_use]
    pub fn with_dragging_node(mut self, dragging: bool) -> Self {
        self.is_dragging_node = dragging;
        self
    }

    /// The frame delta clamped into `[0, MAX_DELTA_TIME]`; NaN becomes zero.
    #[must_use]
    pub fn dt(&self) -> f64 {
        if self.delta_time.is_nan() {
            0.0
        } else {
            self.delta_time.clamp(0.0, MAX_DELTA_TIME)
        }
    }
}

/// Clamps a proposed scale into `[min, max]`, widened to include `current`.
///
/// A view that is already out of range is never pulled to the bound in one
/// step. It may move back toward the range or stay put, but not further out.
pub(crate) fn bounded_scale(current: f64, proposed: f64, min: f64, max: f64) -> f64 {
    let lo = min.min(current);
    let hi = max.max(current).max(lo);
    proposed.clamp(lo, hi)
}

/// Camera parameters that engines integrate instead of raw coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CameraView {
    /// World point at the viewport center.
    pub(crate) center: Point,
    pub(crate) scale: f64,
    pub(crate) rotation: f64,
}

impl CameraView {
    /// Reads the view out of a transform; a collapsed scale reads as `1.0`.
    pub(crate) fn from_transform(transform: &ViewTransform, viewport: ViewportInfo) -> Self {
        let scale = transform.scale();
        Self {
            center: transform.view_center(viewport),
            scale: if scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            },
            rotation: transform.rotation(),
        }
    }

    pub(crate) fn to_transform(self, viewport: ViewportInfo) -> ViewTransform {
        ViewTransform::from_view(self.center, self.scale, self.rotation, viewport)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use vista_view2d::{ViewTransform, ViewportInfo};

    use super::{CameraView, EngineId, FrameInput, MAX_DELTA_TIME, NavigationState, bounded_scale};

    #[test]
    fn engine_ids_are_unique() {
        let a = EngineId::next();
        let b = EngineId::next();
        assert_ne!(a, b);

        let state = NavigationState::owned(ViewTransform::IDENTITY, a);
        assert!(state.is_owned_by(a));
        assert!(!state.is_owned_by(b));
        assert!(!NavigationState::new(ViewTransform::IDENTITY).is_owned_by(a));
    }

    #[test]
    fn delta_time_is_sanitized() {
        let vp = ViewportInfo::new(10.0, 10.0);
        assert_eq!(FrameInput::new(&(), vp, -1.0).dt(), 0.0);
        assert_eq!(FrameInput::new(&(), vp, f64::NAN).dt(), 0.0);
        assert_eq!(FrameInput::new(&(), vp, 10.0).dt(), MAX_DELTA_TIME);
        assert_eq!(FrameInput::new(&(), vp, 0.016).dt(), 0.016);
    }

    #[test]
    fn camera_view_round_trips() {
        let vp = ViewportInfo::new(640.0, 480.0);
        let t = ViewTransform::from_view(Point::new(12.0, -7.0), 1.5, 0.25, vp);
        let view = CameraView::from_transform(&t, vp);
        assert!((view.center - Point::new(12.0, -7.0)).length() < 1e-9);
        assert!((view.scale - 1.5).abs() < 1e-12);
        assert!((view.rotation - 0.25).abs() < 1e-12);
        assert!(view.to_transform(vp).approx_eq(&t, 1e-9));

        let collapsed = ViewTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(CameraView::from_transform(&collapsed, vp).scale, 1.0);
    }

    #[test]
    fn out_of_range_scale_never_jumps_to_the_bound() {
        // In range: a plain clamp.
        assert_eq!(bounded_scale(1.0, 30.0, 0.05, 20.0), 20.0);
        assert_eq!(bounded_scale(1.0, 0.01, 0.05, 20.0), 0.05);
        // Above the range: holding or heading back is allowed, going further is not.
        assert_eq!(bounded_scale(40.0, 40.0, 0.05, 20.0), 40.0);
        assert_eq!(bounded_scale(40.0, 40.08, 0.05, 20.0), 40.0);
        assert_eq!(bounded_scale(40.0, 30.0, 0.05, 20.0), 30.0);
        // Below the range.
        assert_eq!(bounded_scale(0.01, 0.005, 0.05, 20.0), 0.01);
        assert_eq!(bounded_scale(0.01, 0.02, 0.05, 20.0), 0.02);
    }
}

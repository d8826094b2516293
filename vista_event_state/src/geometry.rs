// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-finger geometry: centroid, spread, and angle of a set of touch points.

use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Spreads below this are too small to derive a scale ratio from.
const MIN_SPREAD: f64 = 1e-6;

/// Geometric summary of two or more fingers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerGeometry {
    /// Mean position of all fingers.
    pub centroid: Point,
    /// Mean distance of the fingers from the centroid.
    pub spread: f64,
    /// Angle in radians of the vector from the first finger to the second.
    pub angle: f64,
}

/// Change between two [`FingerGeometry`] snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryDelta {
    /// Centroid movement.
    pub translation: Vec2,
    /// Spread ratio, `1.0` when unchanged or undefined.
    pub scale: f64,
    /// Angle change wrapped into `(-π, π]`.
    pub rotation: f64,
}

impl GeometryDelta {
    /// No movement, no scaling, no rotation.
    pub const NONE: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    };
}

impl FingerGeometry {
    /// Computes the geometry of `points`, which must hold at least two fingers
    /// in a stable order.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let sum = points
            .iter()
            .fold(Vec2::ZERO, |acc, pt| acc + pt.to_vec2());
        let centroid = (sum / n).to_point();
        let spread = points
            .iter()
            .map(|pt| (*pt - centroid).hypot())
            .sum::<f64>()
            / n;
        let axis = points[1] - points[0];
        Some(Self {
            centroid,
            spread,
            angle: axis.y.atan2(axis.x),
        })
    }

    /// Change from `previous` to `self`.
    #[must_use]
    pub fn delta_from(&self, previous: &Self) -> GeometryDelta {
        let scale = if previous.spread > MIN_SPREAD && self.spread > MIN_SPREAD {
            self.spread / previous.spread
        } else {
            1.0
        };
        GeometryDelta {
            translation: self.centroid - previous.centroid,
            scale,
            rotation: wrap_angle(self.angle - previous.angle),
        }
    }
}

/// Wraps an angle into `(-π, π]`.
fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle % TAU;
    if wrapped <= -PI {
        wrapped += TAU;
    } else if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

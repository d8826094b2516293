// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Mul;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

use crate::ViewportInfo;

/// Determinants with a magnitude below this are treated as singular.
pub const DET_EPSILON: f64 = 1e-10;

/// 2D affine view transform mapping world coordinates to screen coordinates.
///
/// The six coefficients describe
///
/// ```text
/// screen = | a  c | · world + | tx |
///          | b  d |           | ty |
/// ```
///
/// which is the same coefficient order as [`kurbo::Affine`]. Composition
/// helpers ([`scale_around`](Self::scale_around),
/// [`rotate_around`](Self::rotate_around), [`translate`](Self::translate))
/// operate in screen space and are left-multiplied onto the existing
/// transform, so any pan, zoom or rotation already present is preserved.
///
/// Scale and rotation queries assume a uniform, non-skewed transform, which
/// is all the navigation engines ever produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// X component of the world X axis in screen space.
    pub a: f64,
    /// Y component of the world X axis in screen space.
    pub b: f64,
    /// X component of the world Y axis in screen space.
    pub c: f64,
    /// Y component of the world Y axis in screen space.
    pub d: f64,
    /// Screen-space X translation.
    pub tx: f64,
    /// Screen-space Y translation.
    pub ty: f64,
}

impl ViewTransform {
    /// The identity transform: world and screen coordinates coincide.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a transform from its six coefficients.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a pure screen-space translation.
    #[must_use]
    pub const fn from_translation(delta: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, delta.x, delta.y)
    }

    /// Converts from a [`kurbo::Affine`].
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self { a, b, c, d, tx, ty }
    }

    /// Converts into a [`kurbo::Affine`].
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::new([self.a, self.b, self.c, self.d, self.tx, self.ty])
    }

    /// Builds the transform that shows `center` (a world point) in the middle of
    /// `viewport`, at the given uniform `scale` and `rotation` (radians).
    #[must_use]
    pub fn from_view(center: Point, scale: f64, rotation: f64, viewport: ViewportInfo) -> Self {
        let affine = Affine::translate(viewport.center().to_vec2())
            * Affine::rotate(rotation)
            * Affine::scale(scale)
            * Affine::translate(-center.to_vec2());
        Self::from_affine(affine)
    }

    /// Returns `a·d − b·c`.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns `true` if the transform cannot be inverted reliably.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let det = self.determinant();
        !det.is_finite() || det.abs() < DET_EPSILON
    }

    /// Returns `true` if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }

    /// Maps a world-space point into screen space.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        Point::new(
            self.a * pt.x + self.c * pt.y + self.tx,
            self.b * pt.x + self.d * pt.y + self.ty,
        )
    }

    /// Maps a screen-space point back into world space.
    ///
    /// Returns the world origin when the transform is degenerate, so callers
    /// never observe NaN or infinite coordinates.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        if self.is_degenerate() {
            return Point::ORIGIN;
        }
        let inv_det = 1.0 / self.determinant();
        let x = pt.x - self.tx;
        let y = pt.y - self.ty;
        Point::new(
            (self.d * x - self.c * y) * inv_det,
            (-self.b * x + self.a * y) * inv_det,
        )
    }

    /// Composes two transforms: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        Self::from_affine(self.to_affine() * other.to_affine())
    }

    /// Pans by a screen-space delta.
    #[must_use]
    pub fn translate(self, delta: Vec2) -> Self {
        Self {
            tx: self.tx + delta.x,
            ty: self.ty + delta.y,
            ..self
        }
    }

    /// Scales by `factor` around a screen-space `center`.
    ///
    /// `center` maps to the same screen point before and after. Non-finite or
    /// non-positive factors leave the transform unchanged.
    #[must_use]
    pub fn scale_around(self, center: Point, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        let about = Affine::translate(center.to_vec2())
            * Affine::scale(factor)
            * Affine::translate(-center.to_vec2());
        Self::from_affine(about) * self
    }

    /// Rotates by `angle` radians around a screen-space `center`.
    #[must_use]
    pub fn rotate_around(self, center: Point, angle: f64) -> Self {
        if !angle.is_finite() {
            return self;
        }
        let about = Affine::translate(center.to_vec2())
            * Affine::rotate(angle)
            * Affine::translate(-center.to_vec2());
        Self::from_affine(about) * self
    }

    /// The screen point this transform leaves in place, if there is exactly one.
    ///
    /// Pure translations (and the identity) have none.
    #[must_use]
    pub fn fixed_point(&self) -> Option<Point> {
        let det = (1.0 - self.a) * (1.0 - self.d) - self.b * self.c;
        if !det.is_finite() || det.abs() < DET_EPSILON {
            return None;
        }
        Some(Point::new(
            ((1.0 - self.d) * self.tx + self.c * self.ty) / det,
            (self.b * self.tx + (1.0 - self.a) * self.ty) / det,
        ))
    }

    /// Uniform scale factor, `√(a² + b²)`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Rotation angle in radians, `atan2(b, a)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.b.atan2(self.a)
    }

    /// World point currently shown at the center of `viewport`.
    #[must_use]
    pub fn view_center(&self, viewport: ViewportInfo) -> Point {
        self.screen_to_world(viewport.center())
    }

    /// Returns `true` if every coefficient differs by less than `eps`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.a - other.a).abs() < eps
            && (self.b - other.b).abs() < eps
            && (self.c - other.c).abs() < eps
            && (self.d - other.d).abs() < eps
            && (self.tx - other.tx).abs() < eps
            && (self.ty - other.ty).abs() < eps
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for ViewTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl From<Affine> for ViewTransform {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl From<ViewTransform> for Affine {
    fn from(transform: ViewTransform) -> Self {
        transform.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Point, Vec2};

    use super::ViewTransform;
    use crate::ViewportInfo;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn world_screen_roundtrip_through_composed_ops() {
        let t = ViewTransform::IDENTITY
            .translate(Vec2::new(30.0, -12.0))
            .scale_around(Point::new(100.0, 50.0), 2.5)
            .rotate_around(Point::new(-20.0, 40.0), 0.7)
            .scale_around(Point::new(3.0, 3.0), 0.4);

        for p in [
            Point::new(0.0, 0.0),
            Point::new(10.0, -5.0),
            Point::new(-1234.5, 987.25),
        ] {
            let back = t.screen_to_world(t.world_to_screen(p));
            assert!(close(back, p), "roundtrip drifted: {p:?} -> {back:?}");
        }
    }

    #[test]
    fn zoom_at_point_on_identity() {
        let center = Point::new(100.0, 100.0);
        let before = ViewTransform::IDENTITY.world_to_screen(center);
        let t = ViewTransform::IDENTITY.scale_around(center, 2.0);

        assert_eq!(t.a, 2.0);
        assert_eq!(t.d, 2.0);
        assert!(close(before, center));
        assert!(close(t.world_to_screen(center), center));
    }

    #[test]
    fn scale_around_keeps_anchor_fixed() {
        let t = ViewTransform::IDENTITY
            .translate(Vec2::new(40.0, 10.0))
            .rotate_around(Point::ORIGIN, 0.3);
        let anchor = Point::new(250.0, 120.0);
        let world_under_anchor = t.screen_to_world(anchor);

        for factor in [0.1, 0.5, 1.0, 3.0, 17.0] {
            let scaled = t.scale_around(anchor, factor);
            assert!(close(scaled.world_to_screen(world_under_anchor), anchor));
            assert!((scaled.scale() - t.scale() * factor).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_factors_are_ignored() {
        let t = ViewTransform::IDENTITY.translate(Vec2::new(5.0, 5.0));
        assert_eq!(t.scale_around(Point::ORIGIN, 0.0), t);
        assert_eq!(t.scale_around(Point::ORIGIN, -2.0), t);
        assert_eq!(t.scale_around(Point::ORIGIN, f64::NAN), t);
        assert_eq!(t.rotate_around(Point::ORIGIN, f64::INFINITY), t);
    }

    #[test]
    fn rotate_around_keeps_center_and_reports_angle() {
        let center = Point::new(50.0, 50.0);
        let t = ViewTransform::IDENTITY.rotate_around(center, FRAC_PI_2);
        assert!(close(t.world_to_screen(center), center));
        assert!((t.rotation() - FRAC_PI_2).abs() < 1e-12);
        assert!((t.scale() - 1.0).abs() < 1e-12);
        // A point to the right of the center ends up below it.
        assert!(close(t.world_to_screen(Point::new(60.0, 50.0)), Point::new(50.0, 60.0)));
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let scale = ViewTransform::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let shift = ViewTransform::from_translation(Vec2::new(10.0, 0.0));
        let p = Point::new(1.0, 1.0);

        assert!(close((shift * scale).world_to_screen(p), Point::new(12.0, 2.0)));
        assert!(close((scale * shift).world_to_screen(p), Point::new(22.0, 2.0)));
    }

    #[test]
    fn fixed_point_of_anchored_ops() {
        let center = Point::new(120.0, -40.0);
        let zoom = ViewTransform::IDENTITY.scale_around(center, 0.5);
        assert!(close(zoom.fixed_point().unwrap(), center));

        let spin = ViewTransform::IDENTITY
            .rotate_around(center, 0.7)
            .scale_around(center, 3.0);
        assert!(close(spin.fixed_point().unwrap(), center));

        assert_eq!(ViewTransform::IDENTITY.fixed_point(), None);
        let pan = ViewTransform::from_translation(Vec2::new(5.0, 5.0));
        assert_eq!(pan.fixed_point(), None);
    }

    #[test]
    fn degenerate_transform_maps_to_origin() {
        let collapsed = ViewTransform::new(0.0, 0.0, 0.0, 0.0, 10.0, 10.0);
        assert!(collapsed.is_degenerate());
        assert_eq!(collapsed.screen_to_world(Point::new(3.0, 4.0)), Point::ORIGIN);

        let nan = ViewTransform::new(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(nan.screen_to_world(Point::new(3.0, 4.0)), Point::ORIGIN);
    }

    #[test]
    fn from_view_centers_world_point() {
        let viewport = ViewportInfo::new(800.0, 600.0);
        let center = Point::new(-40.0, 25.0);
        let t = ViewTransform::from_view(center, 1.5, 0.25, viewport);

        assert!(close(t.world_to_screen(center), viewport.center()));
        assert!(close(t.view_center(viewport), center));
        assert!((t.scale() - 1.5).abs() < 1e-12);
        assert!((t.rotation() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn affine_conversion_preserves_coefficients() {
        let t = ViewTransform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(ViewTransform::from_affine(t.to_affine()), t);
    }
}

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Size of the rendering surface in device-independent pixels.
///
/// Hosts read this fresh from their container every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportInfo {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportInfo {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// The smaller of width and height.
    #[must_use]
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Returns `true` if either dimension is not a positive finite number.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

impl From<Size> for ViewportInfo {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Computes the axis-aligned bounding rectangle of a set of points.
///
/// Returns `None` for an empty iterator.
pub fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut rect = Rect::from_points(first, first);
    for pt in iter {
        rect = rect.union_pt(pt);
    }
    Some(rect)
}

/// Fits a world-space rectangle into `viewport`, preserving aspect ratio.
///
/// `padding` is reserved on every side of the viewport. Returns the world
/// center and uniform scale to use, or `None` when the viewport is empty.
/// A zero-size rectangle (for example a single node) is centered at scale
/// `1.0`.
#[must_use]
pub fn fit_bounds(bounds: Rect, viewport: ViewportInfo, padding: f64) -> Option<(Point, f64)> {
    if viewport.is_empty() {
        return None;
    }
    let center = bounds.center();
    if bounds.width() <= 0.0 && bounds.height() <= 0.0 {
        return Some((center, 1.0));
    }

    let padding = padding.max(0.0);
    let avail_w = (viewport.width - 2.0 * padding).max(1.0);
    let avail_h = (viewport.height - 2.0 * padding).max(1.0);

    // A degenerate axis (all points on a line) only constrains the other one.
    let sx = if bounds.width() > 0.0 {
        avail_w / bounds.width()
    } else {
        f64::INFINITY
    };
    let sy = if bounds.height() > 0.0 {
        avail_h / bounds.height()
    } else {
        f64::INFINITY
    };
    Some((center, sx.min(sy)))
}

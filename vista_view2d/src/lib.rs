// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vista_view2d --heading-base-level=0

//! Vista View 2D: the transform algebra underneath Vista's navigation engines.
//!
//! This crate provides a small, headless model of the 2D view transform that
//! maps world space (where a graph layout lives) into screen space (pixels of
//! the rendering surface). It focuses on:
//! - [`ViewTransform`]: a full 2D affine view (pan, uniform zoom, rotation)
//!   with world ↔ screen conversion and anchored zoom/rotation.
//! - [`ViewportInfo`]: the size of the rendering surface.
//! - [`fit_bounds`] / [`bounding_rect`]: fit-to-content helpers.
//!
//! It does **not** own any scene graph, simulation, or rendering backend.
//! Engines that animate the view live in `vista_navigation`; gesture
//! interpretation lives in `vista_event_state` and `vista_interaction`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use vista_view2d::ViewTransform;
//!
//! // Zoom 2x around a screen point; the world point under it stays put.
//! let anchor = Point::new(100.0, 100.0);
//! let view = ViewTransform::IDENTITY.scale_around(anchor, 2.0);
//! assert_eq!(view.world_to_screen(anchor), anchor);
//!
//! // Convert a pointer position back into world space for hit testing.
//! let world = view.screen_to_world(Point::new(300.0, 100.0));
//! assert_eq!(world, Point::new(200.0, 100.0));
//! ```
//!
//! ## Design notes
//!
//! - Transforms are plain `Copy` values; every operation returns a new one.
//! - Screen-space operations are left-multiplied, so they compose with
//!   whatever pan/zoom/rotation the transform already carries.
//! - Inverting a near-singular transform yields the world origin rather than
//!   NaN, so per-frame callers never have to handle failure.
//!
//! This crate is `no_std`.

#![no_std]

mod transform;
mod viewport;

pub use transform::{DET_EPSILON, ViewTransform};
pub use viewport::{ViewportInfo, bounding_rect, fit_bounds};

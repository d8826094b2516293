// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vista_navigation --heading-base-level=0

//! Vista Navigation: frame-driven camera engines for graph views.
//!
//! A navigation engine turns a positioned graph, a viewport and a frame delta
//! into the next [`ViewTransform`](vista_view2d::ViewTransform). Four engines
//! share one per-frame protocol:
//!
//! - [`ManualNavigation`]: explicit pan, zoom and rotate, with release
//!   momentum that decays exponentially and stops below a minimum speed.
//! - [`CursorFollowNavigation`]: centers the cursor node and zooms so its
//!   direct neighbors fit, or fits the whole graph when there is no cursor.
//! - [`FlyNavigation`]: held direction and zoom keys accelerate a damped
//!   camera; the node nearest the view center is auto-selected.
//! - [`AutoNavigation`]: follows the cursor until a manual call takes over,
//!   and returns to following when a cursor is selected.
//!
//! ## Continuity
//!
//! Every frame an engine receives the previous [`NavigationState`] and
//! returns the next one stamped with its own [`EngineId`]. If the incoming
//! state carries another owner (or none), something else drove the view since
//! the engine last ran, so the engine rebuilds its internal view from the
//! incoming transform instead of jumping back to stale state. Switching
//! engines therefore never causes a visual jump.
//!
//! [`Navigator`] packages this for hosts: it owns the active engine and the
//! last state, and swaps engines synchronously.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use vista_navigation::{CursorFollowNavigation, GraphSnapshot, Navigator};
//! use vista_view2d::{ViewTransform, ViewportInfo};
//!
//! let mut graph = GraphSnapshot::new();
//! graph.add_node(1_u32, Point::new(0.0, 0.0));
//! graph.add_node(2, Point::new(150.0, 0.0));
//! graph.add_edge(1, 2);
//! graph.set_cursor(Some(1));
//!
//! let viewport = ViewportInfo::new(900.0, 600.0);
//! let mut nav: Navigator<u32> =
//!     Navigator::new(CursorFollowNavigation::new(), ViewTransform::IDENTITY);
//! for _ in 0..600 {
//!     nav.step(&graph, viewport, 1.0 / 60.0, false);
//! }
//!
//! // Three neighbor distances span the short side of the viewport.
//! assert!((nav.transform().scale() - 600.0 / 450.0).abs() < 1e-6);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod auto;
mod driver;
mod engine;
mod fly;
mod follow;
mod graph;
mod manual;
mod state;

pub use auto::{AutoMode, AutoNavigation};
pub use driver::Navigator;
pub use engine::{EngineKind, NavigationEngine};
pub use fly::{CursorChangeCallback, FlyConfig, FlyForces, FlyNavigation};
pub use follow::{CursorFollowConfig, CursorFollowNavigation};
pub use graph::{GraphEdge, GraphNode, GraphSnapshot, PositionedGraph};
pub use manual::{ManualConfig, ManualControl, ManualNavigation};
pub use state::{EngineId, FrameInput, MAX_DELTA_TIME, NavigationState};

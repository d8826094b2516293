// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vista_interaction --heading-base-level=0

//! Vista Interaction: gesture handling for graph views.
//!
//! [`InteractionController`] sits between the input normalizer and the two
//! collaborators that own mutable state:
//!
//! - a [`Simulation`], which owns node positions and honors pins, and
//! - a [`NavigationEngine`](vista_navigation::NavigationEngine), which owns
//!   the camera.
//!
//! Both are borrowed for each call through an [`InteractionContext`], so the
//! controller never holds references between frames.
//!
//! ## Usage
//!
//! ```rust
//! use hashbrown::HashMap;
//! use kurbo::Point;
//! use vista_event_state::{InteractionTarget, PointerKind, UiEvent};
//! use vista_interaction::{InteractionContext, InteractionController, PinStatus, Simulation};
//! use vista_navigation::{ManualNavigation, NavigationEngine};
//! use vista_view2d::ViewTransform;
//!
//! #[derive(Default)]
//! struct Layout {
//!     positions: HashMap<u32, Point>,
//!     pins: HashMap<u32, PinStatus>,
//! }
//!
//! impl Simulation<u32> for Layout {
//!     fn node_position(&self, id: &u32) -> Option<Point> {
//!         self.positions.get(id).copied()
//!     }
//!
//!     fn pin_nodes(&mut self, pins: HashMap<u32, PinStatus>) {
//!         self.pins.extend(pins);
//!     }
//! }
//!
//! let mut layout = Layout::default();
//! layout.positions.insert(7, Point::new(100.0, 100.0));
//! let mut engine: NavigationEngine<u32> = ManualNavigation::new().into();
//!
//! let mut controller = InteractionController::new();
//! let mut ctx = InteractionContext::new(&mut layout, &mut engine);
//! controller.on_frame(ViewTransform::IDENTITY, &mut ctx);
//!
//! // Grab the node slightly off-center, then move the pointer.
//! controller.handle(
//!     UiEvent::DragStart {
//!         position: Point::new(105.0, 100.0),
//!         target: InteractionTarget::Node(7),
//!         pointer: PointerKind::Mouse,
//!         time_ms: 0.0,
//!     },
//!     &mut ctx,
//! );
//! controller.handle(
//!     UiEvent::DragMove {
//!         position: Point::new(205.0, 100.0),
//!         delta: kurbo::Vec2::new(100.0, 0.0),
//!         target: InteractionTarget::Node(7),
//!         pointer: PointerKind::Mouse,
//!         time_ms: 16.0,
//!     },
//!     &mut ctx,
//! );
//! assert!(controller.is_dragging_node());
//!
//! // The grab offset is preserved.
//! assert_eq!(layout.pins[&7], PinStatus::pinned_at(Point::new(200.0, 100.0)));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod controller;
mod simulation;

pub use controller::{ControllerConfig, InteractionContext, InteractionController, pinch_matrix};
pub use simulation::{PinStatus, Simulation};

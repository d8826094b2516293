// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vista_event_state --heading-base-level=0

//! Vista Event State: gesture state managers for graph-view interaction.
//!
//! This crate turns raw pointer, touch, and wheel input into semantic gesture
//! events, and provides the small stateful helpers those gestures need:
//!
//! - [`normalizer`]: [`InputNormalizer`] converts [`RawEvent`]s into
//!   [`UiEvent`]s (drag, click, tap, long-press, wheel zoom, multi-finger
//!   transform).
//! - [`drag`]: press tracking with threshold promotion and movement deltas.
//! - [`geometry`]: centroid/spread/angle of N touch points and the delta
//!   between two snapshots.
//! - [`velocity`]: a bounded window of pointer samples for release velocity.
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Headless**: no platform event types; hosts translate their own events
//!   into [`RawEvent`] and attach the target their hit testing resolved.
//! - **Frame-driven**: the only timer (long-press) is an owned deadline that
//!   fires from [`InputNormalizer::poll`], so nothing can outlive teardown.
//! - **Generic**: node and edge ids are an application-specific type `K`.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use vista_event_state::{
//!     InputNormalizer, InteractionTarget, MouseButton, RawEvent, UiEvent,
//! };
//!
//! let mut input = InputNormalizer::<u32>::new();
//!
//! input.handle(RawEvent::MouseDown {
//!     client: Point::new(50.0, 50.0),
//!     button: MouseButton::Primary,
//!     target: InteractionTarget::Node(7),
//!     time_ms: 0.0,
//! });
//! let events = input.handle(RawEvent::MouseMove {
//!     client: Point::new(60.0, 50.0),
//!     time_ms: 16.0,
//! });
//!
//! // Crossing the threshold yields a drag start on the pressed node,
//! // followed by the first move.
//! assert!(matches!(
//!     events[0],
//!     UiEvent::DragStart { target: InteractionTarget::Node(7), .. }
//! ));
//! assert!(matches!(events[1], UiEvent::DragMove { .. }));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod drag;
pub mod event;
pub mod geometry;
pub mod normalizer;
pub mod velocity;

pub use event::{
    InteractionTarget, MouseButton, PointerKind, RawEvent, TouchPhase, TouchPoint, UiEvent,
    WheelDeltaMode,
};
pub use geometry::{FingerGeometry, GeometryDelta};
pub use normalizer::{InputNormalizer, NormalizerConfig, UiEvents};
pub use velocity::{VELOCITY_WINDOW, VelocitySample, VelocityTracker};

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: press tracking, threshold promotion, and movement deltas.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on press with the initial position and time.
//! 2) On each move, check [`DragState::exceeds_threshold`]; once it returns
//!    `true`, call [`DragState::promote`] to turn the press into a drag.
//! 3) Call [`DragState::update`] to get the movement delta since the last update.
//! 4) End the press with [`DragState::end`] to reset state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use vista_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(50.0, 50.0), 0.0);
//!
//! // 4px is still a click with a 5px threshold.
//! assert!(!drag.exceeds_threshold(Point::new(54.0, 50.0), 5.0));
//!
//! // 10px promotes the press to a drag.
//! let pos = Point::new(60.0, 50.0);
//! assert!(drag.exceeds_threshold(pos, 5.0));
//! drag.promote();
//! let delta = drag.update(pos).unwrap();
//! assert_eq!(delta.x, 10.0);
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pressed pointer from press to release.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Position where the press started.
    pub start_pos: Option<Point>,
    /// Last recorded position during the press.
    pub last_pos: Option<Point>,
    /// Timestamp of the press in milliseconds.
    pub start_time_ms: f64,
    promoted: bool,
}

impl DragState {
    /// Start tracking a new press from the given position.
    pub fn start(&mut self, pos: Point, time_ms: f64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.start_time_ms = time_ms;
        self.promoted = false;
    }

    /// Returns `true` if `pos` is strictly farther than `threshold` from the press.
    #[must_use]
    pub fn exceeds_threshold(&self, pos: Point, threshold: f64) -> bool {
        self.start_pos
            .is_some_and(|start| (pos - start).hypot2() > threshold * threshold)
    }

    /// Marks the press as a drag. Has no effect when nothing is tracked.
    pub fn promote(&mut self) {
        if self.start_pos.is_some() {
            self.promoted = true;
        }
    }

    /// Returns `true` once the press has been promoted to a drag.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    /// Update with a new position, returning the movement delta since the last update.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Get total offset from the press position.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// End the current press and reset state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a press is being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}

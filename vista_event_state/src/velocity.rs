// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation from a bounded window of pointer samples.
//!
//! Only the two most recent samples contribute to the estimate, so the result
//! reflects the instantaneous speed at release rather than the average over
//! the whole gesture. A release that happens long after the last movement
//! (the pointer paused, then lifted) yields zero velocity.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use vista_event_state::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! tracker.record(Point::new(0.0, 0.0), 0.0);
//! tracker.record(Point::new(10.0, 0.0), 16.0);
//!
//! // Released right after the last move: 10px over 16ms.
//! let v = tracker.release_velocity(20.0, 100.0);
//! assert_eq!(v, Vec2::new(625.0, 0.0));
//!
//! // Released after a pause: no fling.
//! assert_eq!(tracker.release_velocity(500.0, 100.0), Vec2::ZERO);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Number of samples kept in the window.
pub const VELOCITY_WINDOW: usize = 8;

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Pointer position in screen space.
    pub position: Point,
    /// Timestamp in milliseconds.
    pub timestamp_ms: f64,
}

/// Bounded sliding window of pointer samples.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[VelocitySample; VELOCITY_WINDOW]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sample, dropping the oldest once the window is full.
    pub fn record(&mut self, position: Point, timestamp_ms: f64) {
        if self.samples.len() == VELOCITY_WINDOW {
            self.samples.remove(0);
        }
        self.samples.push(VelocitySample {
            position,
            timestamp_ms,
        });
    }

    /// Recorded samples, oldest first.
    #[must_use]
    pub fn samples(&self) -> &[VelocitySample] {
        &self.samples
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Estimated velocity in pixels per second at `now_ms`.
    ///
    /// Returns zero with fewer than two samples, when the last two samples
    /// share a timestamp, or when more than `max_idle_ms` passed since the
    /// last sample.
    #[must_use]
    pub fn release_velocity(&self, now_ms: f64, max_idle_ms: f64) -> Vec2 {
        let [.., previous, last] = self.samples.as_slice() else {
            return Vec2::ZERO;
        };
        if now_ms - last.timestamp_ms > max_idle_ms {
            return Vec2::ZERO;
        }
        let dt_ms = last.timestamp_ms - previous.timestamp_ms;
        if dt_ms <= 0.0 || !dt_ms.is_finite() {
            return Vec2::ZERO;
        }
        (last.position - previous.position) * (1000.0 / dt_ms)
    }
}

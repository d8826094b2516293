// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalizer: raw mouse/touch/wheel events in, semantic gestures out.
//!
//! The normalizer is headless. Hosts feed it [`RawEvent`]s with client
//! coordinates and millisecond timestamps, keep the render target's bounding
//! rectangle current with [`InputNormalizer::set_bounds`], and call
//! [`InputNormalizer::poll`] once per frame so the long-press timer can fire.
//!
//! ## Gesture rules
//!
//! - Mouse: a press becomes a drag once it moves strictly farther than
//!   [`NormalizerConfig::drag_threshold`]; otherwise the release is a click.
//! - Wheel: deltas are normalized to pixels and reported as [`UiEvent::Zoom`].
//! - One finger: tap, long-press, or drag, by the same threshold.
//! - Two or more fingers: incremental [`UiEvent::TouchTransform`] events,
//!   each relative to the previous frame's geometry. Finger-count changes
//!   re-baseline; dropping to one finger ends the transform and lets the
//!   remaining finger pan.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use vista_event_state::{InputNormalizer, InteractionTarget, MouseButton, RawEvent, UiEvent};
//!
//! let mut input = InputNormalizer::<u32>::new();
//!
//! input.handle(RawEvent::MouseDown {
//!     client: Point::new(50.0, 50.0),
//!     button: MouseButton::Primary,
//!     target: InteractionTarget::Canvas,
//!     time_ms: 0.0,
//! });
//! input.handle(RawEvent::MouseMove { client: Point::new(54.0, 50.0), time_ms: 10.0 });
//! let events = input.handle(RawEvent::MouseUp { client: Point::new(54.0, 50.0), time_ms: 20.0 });
//!
//! assert_eq!(events.len(), 1);
//! assert!(matches!(events[0], UiEvent::Click { .. }));
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::drag::DragState;
use crate::event::{
    InteractionTarget, MouseButton, PointerKind, RawEvent, TouchPhase, TouchPoint, UiEvent,
    WheelDeltaMode,
};
use crate::geometry::FingerGeometry;

/// Events produced by a single raw event.
pub type UiEvents<K> = SmallVec<[UiEvent<K>; 4]>;

/// Tunable thresholds for gesture recognition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizerConfig {
    /// Distance in pixels a press must exceed to become a drag.
    pub drag_threshold: f64,
    /// Longest touch, in milliseconds, that still counts as a tap.
    pub tap_max_duration_ms: f64,
    /// Hold time in milliseconds before a still finger fires a long-press.
    pub long_press_delay_ms: f64,
    /// Pixels per wheel line.
    pub wheel_line_height: f64,
    /// Pixels per wheel page.
    pub wheel_page_height: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            tap_max_duration_ms: 300.0,
            long_press_delay_ms: 500.0,
            wheel_line_height: 16.0,
            wheel_page_height: 800.0,
        }
    }
}

#[derive(Clone, Debug)]
struct MousePress<K> {
    drag: DragState,
    target: InteractionTarget<K>,
}

#[derive(Clone, Debug)]
struct Finger<K> {
    id: u64,
    position: Point,
    target: InteractionTarget<K>,
}

#[derive(Clone, Debug)]
enum TouchMode<K> {
    Idle,
    Single {
        finger_id: u64,
        drag: DragState,
        target: InteractionTarget<K>,
        /// Cleared once the touch can no longer become a tap or long-press.
        tap_eligible: bool,
    },
    Multi {
        geometry: FingerGeometry,
    },
}

/// Pending long-press: an owned deadline, cleared on movement, extra fingers,
/// release, and teardown.
#[derive(Clone, Debug)]
struct LongPressTimer<K> {
    deadline_ms: f64,
    position: Point,
    target: InteractionTarget<K>,
}

/// Converts raw pointer, touch, and wheel events into [`UiEvent`]s.
#[derive(Clone, Debug)]
pub struct InputNormalizer<K> {
    config: NormalizerConfig,
    origin: Vec2,
    mouse: Option<MousePress<K>>,
    fingers: SmallVec<[Finger<K>; 4]>,
    touch: TouchMode<K>,
    long_press: Option<LongPressTimer<K>>,
    destroyed: bool,
}

impl<K: Clone> Default for InputNormalizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> InputNormalizer<K> {
    /// Creates a normalizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NormalizerConfig::default())
    }

    /// Creates a normalizer with the given configuration.
    #[must_use]
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self {
            config,
            origin: Vec2::ZERO,
            mouse: None,
            fingers: SmallVec::new(),
            touch: TouchMode::Idle,
            long_press: None,
            destroyed: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Replaces the configuration. Gestures in progress keep running.
    pub fn set_config(&mut self, config: NormalizerConfig) {
        self.config = config;
    }

    /// Sets the render target's bounding rectangle in client coordinates.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.origin = bounds.origin().to_vec2();
    }

    /// Returns `true` while a long-press timer is armed.
    #[must_use]
    pub fn has_pending_long_press(&self) -> bool {
        self.long_press.is_some()
    }

    /// Number of fingers currently down.
    #[must_use]
    pub fn active_fingers(&self) -> usize {
        self.fingers.len()
    }

    /// Returns `true` once [`InputNormalizer::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drops all tracking state and timers. Later events are ignored.
    pub fn destroy(&mut self) {
        self.mouse = None;
        self.fingers.clear();
        self.touch = TouchMode::Idle;
        self.long_press = None;
        self.destroyed = true;
    }

    /// Fires the long-press timer if its deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<UiEvent<K>> {
        if self.destroyed {
            return None;
        }
        let timer = self.long_press.take_if(|timer| now_ms >= timer.deadline_ms)?;
        match &mut self.touch {
            TouchMode::Single {
                drag, tap_eligible, ..
            } if !drag.is_promoted() => {
                *tap_eligible = false;
                log::trace!("long-press fired");
                Some(UiEvent::LongPress {
                    position: timer.position,
                    target: timer.target,
                })
            }
            _ => None,
        }
    }

    /// Interprets one raw event.
    pub fn handle(&mut self, event: RawEvent<K>) -> UiEvents<K> {
        let mut out = UiEvents::new();
        if self.destroyed {
            return out;
        }
        match event {
            RawEvent::MouseDown {
                client,
                button,
                target,
                time_ms,
            } => self.mouse_down(client, button, target, time_ms, &mut out),
            RawEvent::MouseMove { client, time_ms } => self.mouse_move(client, time_ms, &mut out),
            RawEvent::MouseUp { client, time_ms } => self.mouse_up(client, time_ms, &mut out),
            RawEvent::PointerCancel { time_ms } => {
                if let Some(press) = self.mouse.take() {
                    if press.drag.is_promoted() {
                        out.push(UiEvent::DragCancel {
                            target: press.target,
                            pointer: PointerKind::Mouse,
                            time_ms,
                        });
                    }
                }
            }
            RawEvent::Wheel {
                client,
                delta_y,
                mode,
            } => {
                let delta = match mode {
                    WheelDeltaMode::Pixel => delta_y,
                    WheelDeltaMode::Line => delta_y * self.config.wheel_line_height,
                    WheelDeltaMode::Page => delta_y * self.config.wheel_page_height,
                };
                if delta.is_finite() && delta != 0.0 {
                    out.push(UiEvent::Zoom {
                        position: self.to_local(client),
                        delta,
                    });
                }
            }
            RawEvent::TouchStart { changed, time_ms } => {
                self.touch_start(changed, time_ms, &mut out);
            }
            RawEvent::TouchMove { changed, time_ms } => {
                self.touch_move(changed, time_ms, &mut out);
            }
            RawEvent::TouchEnd { changed, time_ms } => {
                self.touch_end(changed, time_ms, &mut out);
            }
            RawEvent::TouchCancel { time_ms } => self.touch_cancel(time_ms, &mut out),
        }
        out
    }

    fn to_local(&self, client: Point) -> Point {
        client - self.origin
    }

    fn mouse_down(
        &mut self,
        client: Point,
        button: MouseButton,
        target: InteractionTarget<K>,
        time_ms: f64,
        out: &mut UiEvents<K>,
    ) {
        if button != MouseButton::Primary {
            return;
        }
        // A press without a matching release (pointer left the window, say).
        if let Some(stale) = self.mouse.take() {
            if stale.drag.is_promoted() {
                out.push(UiEvent::DragCancel {
                    target: stale.target,
                    pointer: PointerKind::Mouse,
                    time_ms,
                });
            }
        }
        let mut drag = DragState::default();
        drag.start(self.to_local(client), time_ms);
        self.mouse = Some(MousePress { drag, target });
    }

    fn mouse_move(&mut self, client: Point, time_ms: f64, out: &mut UiEvents<K>) {
        let position = self.to_local(client);
        let threshold = self.config.drag_threshold;
        let Some(press) = self.mouse.as_mut() else {
            return;
        };
        drive_drag(
            &mut press.drag,
            &press.target,
            position,
            threshold,
            PointerKind::Mouse,
            time_ms,
            out,
        );
    }

    fn mouse_up(&mut self, client: Point, time_ms: f64, out: &mut UiEvents<K>) {
        let position = self.to_local(client);
        let Some(mut press) = self.mouse.take() else {
            return;
        };
        if press.drag.is_promoted() {
            if let Some(delta) = press.drag.update(position) {
                if delta != Vec2::ZERO {
                    out.push(UiEvent::DragMove {
                        position,
                        delta,
                        target: press.target.clone(),
                        pointer: PointerKind::Mouse,
                        time_ms,
                    });
                }
            }
            out.push(UiEvent::DragEnd {
                position,
                target: press.target,
                pointer: PointerKind::Mouse,
                time_ms,
            });
        } else {
            out.push(UiEvent::Click {
                position,
                target: press.target,
            });
        }
    }

    fn touch_start(
        &mut self,
        changed: Vec<TouchPoint<K>>,
        time_ms: f64,
        out: &mut UiEvents<K>,
    ) {
        for touch in changed {
            let position = self.to_local(touch.client);
            if let Some(finger) = self.fingers.iter_mut().find(|f| f.id == touch.id) {
                finger.position = position;
                finger.target = touch.target;
            } else {
                self.fingers.push(Finger {
                    id: touch.id,
                    position,
                    target: touch.target,
                });
            }
        }

        match self.fingers.len() {
            0 => {}
            1 => {
                if matches!(self.touch, TouchMode::Idle) {
                    let finger = &self.fingers[0];
                    let mut drag = DragState::default();
                    drag.start(finger.position, time_ms);
                    self.long_press = Some(LongPressTimer {
                        deadline_ms: time_ms + self.config.long_press_delay_ms,
                        position: finger.position,
                        target: finger.target.clone(),
                    });
                    self.touch = TouchMode::Single {
                        finger_id: finger.id,
                        drag,
                        target: finger.target.clone(),
                        tap_eligible: true,
                    };
                }
            }
            _ => self.enter_multi(time_ms, out),
        }
    }

    fn enter_multi(&mut self, time_ms: f64, out: &mut UiEvents<K>) {
        self.long_press = None;
        let Some(geometry) = self.geometry() else {
            return;
        };
        match core::mem::replace(&mut self.touch, TouchMode::Multi { geometry }) {
            TouchMode::Multi { .. } => {
                log::trace!("finger count changed to {}; re-baselining", self.fingers.len());
            }
            previous => {
                if let TouchMode::Single { drag, target, .. } = previous {
                    if drag.is_promoted() {
                        out.push(UiEvent::DragCancel {
                            target,
                            pointer: PointerKind::Touch,
                            time_ms,
                        });
                    }
                }
                out.push(UiEvent::TouchTransform {
                    phase: TouchPhase::Start,
                    center: geometry.centroid,
                    translation: Vec2::ZERO,
                    scale: 1.0,
                    rotation: 0.0,
                });
            }
        }
    }

    fn touch_move(
        &mut self,
        changed: Vec<TouchPoint<K>>,
        time_ms: f64,
        out: &mut UiEvents<K>,
    ) {
        for touch in changed {
            let position = self.to_local(touch.client);
            if let Some(finger) = self.fingers.iter_mut().find(|f| f.id == touch.id) {
                finger.position = position;
            }
        }

        let threshold = self.config.drag_threshold;
        let next_geometry = self.geometry();
        match &mut self.touch {
            TouchMode::Idle => {}
            TouchMode::Single {
                finger_id,
                drag,
                target,
                tap_eligible,
            } => {
                let Some(position) = self
                    .fingers
                    .iter()
                    .find(|f| f.id == *finger_id)
                    .map(|f| f.position)
                else {
                    return;
                };
                if drag.exceeds_threshold(position, threshold) {
                    self.long_press = None;
                    *tap_eligible = false;
                }
                drive_drag(
                    drag,
                    target,
                    position,
                    threshold,
                    PointerKind::Touch,
                    time_ms,
                    out,
                );
            }
            TouchMode::Multi { geometry } => {
                let Some(next) = next_geometry else {
                    return;
                };
                let delta = next.delta_from(geometry);
                out.push(UiEvent::TouchTransform {
                    phase: TouchPhase::Change,
                    center: geometry.centroid,
                    translation: delta.translation,
                    scale: delta.scale,
                    rotation: delta.rotation,
                });
                *geometry = next;
            }
        }
    }

    fn touch_end(
        &mut self,
        changed: Vec<TouchPoint<K>>,
        time_ms: f64,
        out: &mut UiEvents<K>,
    ) {
        let mut last_position = None;
        for touch in changed {
            if let Some(index) = self.fingers.iter().position(|f| f.id == touch.id) {
                let finger = self.fingers.remove(index);
                last_position = Some(finger.position);
            }
        }
        let Some(last_position) = last_position else {
            return;
        };

        match core::mem::replace(&mut self.touch, TouchMode::Idle) {
            TouchMode::Idle => {}
            TouchMode::Single {
                finger_id,
                drag,
                target,
                tap_eligible,
            } => {
                if self.fingers.iter().any(|f| f.id == finger_id) {
                    // Some other finger lifted; keep tracking this one.
                    self.touch = TouchMode::Single {
                        finger_id,
                        drag,
                        target,
                        tap_eligible,
                    };
                    return;
                }
                self.long_press = None;
                let position = drag.last_pos.unwrap_or(last_position);
                if drag.is_promoted() {
                    out.push(UiEvent::DragEnd {
                        position,
                        target,
                        pointer: PointerKind::Touch,
                        time_ms,
                    });
                } else if tap_eligible
                    && time_ms - drag.start_time_ms <= self.config.tap_max_duration_ms
                {
                    log::trace!("tap");
                    out.push(UiEvent::Tap { position, target });
                }
            }
            TouchMode::Multi { geometry } => match self.fingers.len() {
                0 => out.push(transform_end(TouchPhase::End, geometry.centroid)),
                1 => {
                    out.push(transform_end(TouchPhase::End, geometry.centroid));
                    // The remaining finger may keep panning but never taps.
                    let finger = &self.fingers[0];
                    let mut drag = DragState::default();
                    drag.start(finger.position, time_ms);
                    self.touch = TouchMode::Single {
                        finger_id: finger.id,
                        drag,
                        target: InteractionTarget::Canvas,
                        tap_eligible: false,
                    };
                }
                _ => {
                    self.touch = TouchMode::Multi { geometry };
                    self.enter_multi(time_ms, out);
                }
            },
        }
    }

    fn touch_cancel(&mut self, time_ms: f64, out: &mut UiEvents<K>) {
        self.fingers.clear();
        self.long_press = None;
        match core::mem::replace(&mut self.touch, TouchMode::Idle) {
            TouchMode::Idle => {}
            TouchMode::Single { drag, target, .. } => {
                if drag.is_promoted() {
                    out.push(UiEvent::DragCancel {
                        target,
                        pointer: PointerKind::Touch,
                        time_ms,
                    });
                }
            }
            TouchMode::Multi { geometry } => {
                out.push(transform_end(TouchPhase::Cancel, geometry.centroid));
            }
        }
    }

    fn geometry(&self) -> Option<FingerGeometry> {
        let points: SmallVec<[Point; 4]> = self.fingers.iter().map(|f| f.position).collect();
        FingerGeometry::from_points(&points)
    }
}

/// Advances a press: promotes it past the threshold, then reports movement.
fn drive_drag<K: Clone>(
    drag: &mut DragState,
    target: &InteractionTarget<K>,
    position: Point,
    threshold: f64,
    pointer: PointerKind,
    time_ms: f64,
    out: &mut UiEvents<K>,
) {
    if !drag.is_promoted() {
        if !drag.exceeds_threshold(position, threshold) {
            return;
        }
        drag.promote();
        let Some(start) = drag.start_pos else {
            return;
        };
        log::trace!("press promoted to drag at {start:?}");
        out.push(UiEvent::DragStart {
            position: start,
            target: target.clone(),
            pointer,
            time_ms,
        });
    }
    if let Some(delta) = drag.update(position) {
        out.push(UiEvent::DragMove {
            position,
            delta,
            target: target.clone(),
            pointer,
            time_ms,
        });
    }
}

fn transform_end<K>(phase: TouchPhase, center: Point) -> UiEvent<K> {
    UiEvent::TouchTransform {
        phase,
        center,
        translation: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    }
}

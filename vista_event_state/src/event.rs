// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input primitives and the semantic gesture events produced from them.
//!
//! Raw events carry client coordinates, a millisecond timestamp, and the
//! target resolved by the host's hit testing at the time of the event.
//! Semantic events carry positions local to the render target.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// What a pointer landed on, resolved once per raw event by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InteractionTarget<K> {
    /// A graph node.
    Node(K),
    /// A graph edge.
    Edge(K),
    /// Empty canvas.
    #[default]
    Canvas,
}

impl<K> InteractionTarget<K> {
    /// Returns the node id if this target is a node.
    pub fn node(&self) -> Option<&K> {
        match self {
            Self::Node(id) => Some(id),
            _ => None,
        }
    }

    /// Returns `true` for [`InteractionTarget::Canvas`].
    pub fn is_canvas(&self) -> bool {
        matches!(self, Self::Canvas)
    }
}

/// Mouse button reported with a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the wheel button.
    Auxiliary,
    /// Any other button, by index.
    Other(u16),
}

/// Units of a wheel delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    /// Delta is already in pixels.
    #[default]
    Pixel,
    /// Delta counts lines.
    Line,
    /// Delta counts pages.
    Page,
}

/// One finger in a touch event.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchPoint<K> {
    /// Stable identifier of the finger for the duration of its contact.
    pub id: u64,
    /// Position in client coordinates.
    pub client: Point,
    /// What the finger is over.
    pub target: InteractionTarget<K>,
}

impl<K> TouchPoint<K> {
    /// Creates a touch point.
    pub fn new(id: u64, client: Point, target: InteractionTarget<K>) -> Self {
        Self { id, client, target }
    }
}

/// A raw pointer, touch, or wheel event as delivered by the host platform.
///
/// Touch events list only the fingers that changed, like DOM `changedTouches`.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent<K> {
    /// A mouse button was pressed.
    MouseDown {
        /// Position in client coordinates.
        client: Point,
        /// Which button.
        button: MouseButton,
        /// What was under the pointer.
        target: InteractionTarget<K>,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// The mouse moved.
    MouseMove {
        /// Position in client coordinates.
        client: Point,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// A mouse button was released.
    MouseUp {
        /// Position in client coordinates.
        client: Point,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// The platform aborted the mouse interaction (focus loss, pointer capture lost).
    PointerCancel {
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// The wheel (or trackpad scroll) moved.
    Wheel {
        /// Position in client coordinates.
        client: Point,
        /// Vertical delta in `mode` units; positive scrolls down.
        delta_y: f64,
        /// Units of `delta_y`.
        mode: WheelDeltaMode,
    },
    /// Fingers touched down.
    TouchStart {
        /// The fingers that went down.
        changed: Vec<TouchPoint<K>>,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// Fingers moved.
    TouchMove {
        /// The fingers that moved.
        changed: Vec<TouchPoint<K>>,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// Fingers lifted.
    TouchEnd {
        /// The fingers that lifted.
        changed: Vec<TouchPoint<K>>,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// The platform cancelled every active touch.
    TouchCancel {
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
}

/// Which kind of pointer produced a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// A mouse or pen.
    Mouse,
    /// A single finger.
    Touch,
}

/// Phase of a multi-finger transform gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// Two or more fingers established a baseline.
    Start,
    /// The fingers moved; deltas are relative to the previous event.
    Change,
    /// The gesture finished normally.
    End,
    /// The platform cancelled the gesture.
    Cancel,
}

/// A semantic gesture event, in coordinates local to the render target.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent<K> {
    /// A press moved past the drag threshold. `position` is the press position.
    DragStart {
        /// Press position.
        position: Point,
        /// Target under the press.
        target: InteractionTarget<K>,
        /// Pointer kind.
        pointer: PointerKind,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// A drag moved.
    DragMove {
        /// Current position.
        position: Point,
        /// Movement since the previous drag event.
        delta: Vec2,
        /// Target under the original press.
        target: InteractionTarget<K>,
        /// Pointer kind.
        pointer: PointerKind,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// A drag was released normally.
    DragEnd {
        /// Release position.
        position: Point,
        /// Target under the original press.
        target: InteractionTarget<K>,
        /// Pointer kind.
        pointer: PointerKind,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// A drag was aborted; consumers must not apply release side effects.
    DragCancel {
        /// Target under the original press.
        target: InteractionTarget<K>,
        /// Pointer kind.
        pointer: PointerKind,
        /// Timestamp in milliseconds.
        time_ms: f64,
    },
    /// A mouse press released without crossing the drag threshold.
    Click {
        /// Release position.
        position: Point,
        /// Target under the press.
        target: InteractionTarget<K>,
    },
    /// A short single-finger touch without movement.
    Tap {
        /// Touch position.
        position: Point,
        /// Target under the finger.
        target: InteractionTarget<K>,
    },
    /// A single finger held still past the long-press delay.
    LongPress {
        /// Touch position.
        position: Point,
        /// Target under the finger.
        target: InteractionTarget<K>,
    },
    /// Wheel zoom request.
    Zoom {
        /// Pointer position.
        position: Point,
        /// Wheel delta in pixels; positive means zoom out.
        delta: f64,
    },
    /// Incremental multi-finger pan/pinch/rotate.
    TouchTransform {
        /// Gesture phase.
        phase: TouchPhase,
        /// Finger centroid of the previous event (the baseline).
        center: Point,
        /// Movement of the centroid since the previous event.
        translation: Vec2,
        /// Spread ratio relative to the previous event.
        scale: f64,
        /// Rotation in radians relative to the previous event.
        rotation: f64,
    },
}

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding gesture events to the simulation and the navigation engine.

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};
use log::debug;
use vista_event_state::{InteractionTarget, TouchPhase, UiEvent, VelocityTracker};
use vista_navigation::NavigationEngine;
use vista_view2d::ViewTransform;

use crate::simulation::{PinStatus, Simulation};

/// Tuning for [`InteractionController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Wheel zoom factor is `e^(-delta · wheel_zoom_speed)` per pixel of delta.
    pub wheel_zoom_speed: f64,
    /// A pan released later than this after its last movement has no momentum.
    pub release_max_idle_ms: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_speed: 0.002,
            release_max_idle_ms: 100.0,
        }
    }
}

/// The collaborators a controller acts on, borrowed for one call.
#[derive(Debug)]
pub struct InteractionContext<'a, K, S> {
    /// Layout simulation owning node positions and pins.
    pub simulation: &'a mut S,
    /// Active navigation engine.
    pub navigation: &'a mut NavigationEngine<K>,
}

impl<'a, K, S> InteractionContext<'a, K, S> {
    /// Bundles the collaborators.
    pub fn new(simulation: &'a mut S, navigation: &'a mut NavigationEngine<K>) -> Self {
        Self {
            simulation,
            navigation,
        }
    }
}

#[derive(Debug)]
enum Gesture<K> {
    Idle,
    /// Dragging a node; `offset` is node minus pointer, in world space.
    NodeDrag {
        id: K,
        offset: Vec2,
        pointer: Point,
    },
    CanvasPan {
        samples: VelocityTracker,
    },
    MultiTouch,
    /// The rest of this gesture is ignored.
    Ignored,
}

type NodeCallback<K> = Box<dyn FnMut(&K)>;
type CanvasCallback = Box<dyn FnMut(Point)>;

/// Turns semantic gestures into node drags, camera moves and callbacks.
///
/// - Dragging a node pins it under the pointer, keeping the offset between
///   the node and the point where it was grabbed. The pin is refreshed on
///   every move and every frame, since both the simulation and the view keep
///   changing during the drag.
/// - Dragging the canvas pans the view; releasing it hands the pointer's
///   instantaneous speed to the engine as momentum.
/// - Multi-finger transforms pan, zoom and rotate the view as one matrix.
/// - Clicks and taps are routed to callbacks.
pub struct InteractionController<K> {
    config: ControllerConfig,
    transform: ViewTransform,
    gesture: Gesture<K>,
    text_input_focused: bool,
    on_node_click: Option<NodeCallback<K>>,
    on_node_long_press: Option<NodeCallback<K>>,
    on_canvas_tap: Option<CanvasCallback>,
    destroyed: bool,
}

impl<K: fmt::Debug> fmt::Debug for InteractionController<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("gesture", &self.gesture)
            .field("text_input_focused", &self.text_input_focused)
            .field("on_node_click", &self.on_node_click.is_some())
            .field("on_node_long_press", &self.on_node_long_press.is_some())
            .field("on_canvas_tap", &self.on_canvas_tap.is_some())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<K> Default for InteractionController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InteractionController<K> {
    /// Creates a controller with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Creates a controller with the given configuration.
    #[must_use]
    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            config,
            transform: ViewTransform::IDENTITY,
            gesture: Gesture::Idle,
            text_input_focused: false,
            on_node_click: None,
            on_node_long_press: None,
            on_canvas_tap: None,
            destroyed: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ControllerConfig) {
        self.config = config;
    }

    /// The view transform used to un-project pointer positions.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Updates the view transform without touching any gesture.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    /// Returns `true` while a node is being dragged.
    #[must_use]
    pub fn is_dragging_node(&self) -> bool {
        matches!(self.gesture, Gesture::NodeDrag { .. })
    }

    /// The node being dragged.
    #[must_use]
    pub fn dragged_node(&self) -> Option<&K> {
        match &self.gesture {
            Gesture::NodeDrag { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Tells the controller whether a text field holds keyboard focus.
    ///
    /// Canvas taps are suppressed while it does.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    /// Called with the node id when a node is clicked or tapped.
    pub fn set_on_node_click(&mut self, callback: impl FnMut(&K) + 'static) {
        if !self.destroyed {
            self.on_node_click = Some(Box::new(callback));
        }
    }

    /// Called with the node id when a node is long-pressed.
    pub fn set_on_node_long_press(&mut self, callback: impl FnMut(&K) + 'static) {
        if !self.destroyed {
            self.on_node_long_press = Some(Box::new(callback));
        }
    }

    /// Called with the local position when empty canvas is clicked or tapped.
    pub fn set_on_canvas_tap(&mut self, callback: impl FnMut(Point) + 'static) {
        if !self.destroyed {
            self.on_canvas_tap = Some(Box::new(callback));
        }
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl<K: Clone + Eq + Hash> InteractionController<K> {
    /// Handles one semantic event.
    pub fn handle<S: Simulation<K>>(
        &mut self,
        event: UiEvent<K>,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        if self.destroyed {
            return;
        }
        match event {
            UiEvent::DragStart {
                position,
                target,
                time_ms,
                ..
            } => self.drag_start(position, target, time_ms, ctx),
            UiEvent::DragMove {
                position,
                delta,
                time_ms,
                ..
            } => self.drag_move(position, delta, time_ms, ctx),
            UiEvent::DragEnd { time_ms, .. } => self.drag_end(Some(time_ms), ctx),
            UiEvent::DragCancel { .. } => self.drag_end(None, ctx),
            UiEvent::Click { position, target } | UiEvent::Tap { position, target } => {
                self.tap(position, target);
            }
            UiEvent::LongPress { target, .. } => {
                if let (InteractionTarget::Node(id), Some(callback)) =
                    (&target, self.on_node_long_press.as_mut())
                {
                    callback(id);
                }
            }
            UiEvent::Zoom { position, delta } => {
                let factor = (-delta * self.config.wheel_zoom_speed).exp();
                if let Some(manual) = ctx.navigation.manual_control() {
                    manual.zoom(position, factor);
                }
            }
            UiEvent::TouchTransform {
                phase,
                center,
                translation,
                scale,
                rotation,
            } => self.touch_transform(phase, center, translation, scale, rotation, ctx),
        }
    }

    /// Handles a batch of events in order.
    pub fn handle_all<S: Simulation<K>>(
        &mut self,
        events: impl IntoIterator<Item = UiEvent<K>>,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        for event in events {
            self.handle(event, ctx);
        }
    }

    /// Records the frame's transform and re-pins a dragged node under the
    /// pointer.
    pub fn on_frame<S: Simulation<K>>(
        &mut self,
        transform: ViewTransform,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        if self.destroyed {
            return;
        }
        self.transform = transform;
        if let Gesture::NodeDrag { id, offset, pointer } = &self.gesture {
            let position = self.transform.screen_to_world(*pointer) + *offset;
            pin(&mut *ctx.simulation, id.clone(), PinStatus::pinned_at(position));
        }
    }

    /// Ends every gesture, releases any pinned node, stops momentum, and
    /// turns all further calls into no-ops.
    pub fn destroy<S: Simulation<K>>(&mut self, ctx: &mut InteractionContext<'_, K, S>) {
        if self.destroyed {
            return;
        }
        debug!("interaction controller destroyed");
        if let Gesture::NodeDrag { id, .. } = core::mem::replace(&mut self.gesture, Gesture::Idle)
        {
            pin(&mut *ctx.simulation, id, PinStatus::released());
        }
        if let Some(manual) = ctx.navigation.manual_control() {
            manual.stop_momentum();
        }
        set_fly_paused(&mut *ctx.navigation, false);
        self.on_node_click = None;
        self.on_node_long_press = None;
        self.on_canvas_tap = None;
        self.destroyed = true;
    }

    fn drag_start<S: Simulation<K>>(
        &mut self,
        position: Point,
        target: InteractionTarget<K>,
        time_ms: f64,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        self.release_node(ctx);
        match target {
            InteractionTarget::Node(id) => {
                let Some(node) = ctx.simulation.node_position(&id) else {
                    debug!("node drag aborted: node has no position");
                    self.gesture = Gesture::Ignored;
                    return;
                };
                debug!("node drag started");
                let offset = node - self.transform.screen_to_world(position);
                pin(&mut *ctx.simulation, id.clone(), PinStatus::pinned_at(node));
                set_fly_paused(&mut *ctx.navigation, true);
                self.gesture = Gesture::NodeDrag {
                    id,
                    offset,
                    pointer: position,
                };
            }
            InteractionTarget::Edge(_) | InteractionTarget::Canvas => {
                if let Some(manual) = ctx.navigation.manual_control() {
                    manual.stop_momentum();
                }
                let mut samples = VelocityTracker::new();
                samples.record(position, time_ms);
                self.gesture = Gesture::CanvasPan { samples };
            }
        }
    }

    fn drag_move<S: Simulation<K>>(
        &mut self,
        position: Point,
        delta: Vec2,
        time_ms: f64,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        match &mut self.gesture {
            Gesture::NodeDrag {
                id,
                offset,
                pointer,
            } => {
                *pointer = position;
                let world = self.transform.screen_to_world(position) + *offset;
                pin(&mut *ctx.simulation, id.clone(), PinStatus::pinned_at(world));
            }
            Gesture::CanvasPan { samples } => {
                if let Some(manual) = ctx.navigation.manual_control() {
                    manual.pan(delta);
                }
                samples.record(position, time_ms);
            }
            Gesture::Idle | Gesture::MultiTouch | Gesture::Ignored => {}
        }
    }

    /// `released_at` is `None` for a cancel, which never produces momentum.
    fn drag_end<S: Simulation<K>>(
        &mut self,
        released_at: Option<f64>,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        match core::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::NodeDrag { id, .. } => {
                debug!("node drag ended");
                pin(&mut *ctx.simulation, id, PinStatus::released());
                set_fly_paused(&mut *ctx.navigation, false);
            }
            Gesture::CanvasPan { samples } => {
                let Some(now_ms) = released_at else {
                    return;
                };
                let velocity = samples.release_velocity(now_ms, self.config.release_max_idle_ms);
                if velocity != Vec2::ZERO
                    && let Some(manual) = ctx.navigation.manual_control()
                {
                    manual.set_velocity(velocity);
                }
            }
            // A multi-finger transform is not ended by a drag event.
            Gesture::MultiTouch => self.gesture = Gesture::MultiTouch,
            Gesture::Idle | Gesture::Ignored => {}
        }
    }

    fn touch_transform<S: Simulation<K>>(
        &mut self,
        phase: TouchPhase,
        center: Point,
        translation: Vec2,
        scale: f64,
        rotation: f64,
        ctx: &mut InteractionContext<'_, K, S>,
    ) {
        match phase {
            TouchPhase::Start => {
                self.release_node(ctx);
                if let Some(manual) = ctx.navigation.manual_control() {
                    manual.stop_momentum();
                }
                self.gesture = Gesture::MultiTouch;
            }
            TouchPhase::Change => {
                if !matches!(self.gesture, Gesture::MultiTouch) {
                    return;
                }
                let m = pinch_matrix(center, translation, scale, rotation);
                if let Some(manual) = ctx.navigation.manual_control() {
                    manual.apply_screen_transform(m);
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if matches!(self.gesture, Gesture::MultiTouch) {
                    self.gesture = Gesture::Idle;
                }
            }
        }
    }

    fn tap(&mut self, position: Point, target: InteractionTarget<K>) {
        match target {
            InteractionTarget::Node(id) => {
                if let Some(callback) = self.on_node_click.as_mut() {
                    callback(&id);
                }
            }
            InteractionTarget::Canvas => {
                if self.text_input_focused {
                    return;
                }
                if let Some(callback) = self.on_canvas_tap.as_mut() {
                    callback(position);
                }
            }
            InteractionTarget::Edge(_) => {}
        }
    }

    fn release_node<S: Simulation<K>>(&mut self, ctx: &mut InteractionContext<'_, K, S>) {
        if let Gesture::NodeDrag { id, .. } = core::mem::replace(&mut self.gesture, Gesture::Idle)
        {
            debug!("node drag superseded by a new gesture");
            pin(&mut *ctx.simulation, id, PinStatus::released());
            set_fly_paused(&mut *ctx.navigation, false);
        }
    }
}

/// The screen-space matrix for one incremental pinch frame: rotate and scale
/// about the previous centroid, then move it by the centroid's translation.
#[must_use]
pub fn pinch_matrix(center: Point, translation: Vec2, scale: f64, rotation: f64) -> ViewTransform {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let rotation = if rotation.is_finite() { rotation } else { 0.0 };
    let translation = if translation.is_finite() {
        translation
    } else {
        Vec2::ZERO
    };
    let affine = Affine::translate(center.to_vec2() + translation)
        * Affine::rotate(rotation)
        * Affine::scale(scale)
        * Affine::translate(-center.to_vec2());
    ViewTransform::from_affine(affine)
}

fn pin<K: Eq + Hash, S: Simulation<K>>(simulation: &mut S, id: K, status: PinStatus) {
    let mut pins = HashMap::with_capacity(1);
    pins.insert(id, status);
    simulation.pin_nodes(pins);
}

fn set_fly_paused<K>(navigation: &mut NavigationEngine<K>, paused: bool) {
    if let Some(fly) = navigation.fly() {
        fly.set_auto_select_paused(paused);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::pinch_matrix;

    #[test]
    fn pinch_moves_center_by_translation() {
        let center = Point::new(100.0, 50.0);
        let m = pinch_matrix(center, Vec2::new(10.0, -5.0), 2.0, 0.3);
        let moved = m.world_to_screen(center);
        assert!((moved - Point::new(110.0, 45.0)).length() < 1e-9);
        assert!((m.scale() - 2.0).abs() < 1e-12);
        assert!((m.rotation() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn pinch_ignores_bad_factors() {
        let m = pinch_matrix(Point::new(5.0, 5.0), Vec2::ZERO, f64::NAN, f64::INFINITY);
        assert!(m.approx_eq(&vista_view2d::ViewTransform::IDENTITY, 1e-12));
        let m = pinch_matrix(Point::new(5.0, 5.0), Vec2::ZERO, -1.0, 0.0);
        assert!(m.approx_eq(&vista_view2d::ViewTransform::IDENTITY, 1e-12));
    }
}

// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of navigation engines.

use crate::auto::AutoNavigation;
use crate::fly::FlyNavigation;
use crate::follow::CursorFollowNavigation;
use crate::graph::PositionedGraph;
use crate::manual::{ManualControl, ManualNavigation};
use crate::state::{FrameInput, NavigationState};

/// Discriminant of a [`NavigationEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// [`ManualNavigation`].
    Manual,
    /// [`CursorFollowNavigation`].
    CursorFollow,
    /// [`FlyNavigation`].
    Fly,
    /// [`AutoNavigation`].
    Auto,
}

/// One of the navigation strategies.
///
/// Every variant follows the same per-frame protocol: it receives the state
/// produced on the previous frame (by itself or by whatever engine was active
/// before it) and returns the next one, stamped with its own owner marker.
#[derive(Debug)]
pub enum NavigationEngine<K> {
    /// Direct pan/zoom/rotate with momentum.
    Manual(ManualNavigation),
    /// Follows the cursor node.
    CursorFollow(CursorFollowNavigation<K>),
    /// Keyboard-style flight with auto-selection.
    Fly(FlyNavigation<K>),
    /// Manual control that hands back to cursor following.
    Auto(AutoNavigation<K>),
}

impl<K> NavigationEngine<K> {
    /// Which strategy this is.
    #[must_use]
    pub fn kind(&self) -> EngineKind {
        match self {
            Self::Manual(_) => EngineKind::Manual,
            Self::CursorFollow(_) => EngineKind::CursorFollow,
            Self::Fly(_) => EngineKind::Fly,
            Self::Auto(_) => EngineKind::Auto,
        }
    }

    /// Produces the next frame.
    pub fn step<G>(&mut self, input: &FrameInput<'_, G>, prev: &NavigationState) -> NavigationState
    where
        K: Clone + PartialEq,
        G: PositionedGraph<K>,
    {
        match self {
            Self::Manual(engine) => engine.step(input, prev),
            Self::CursorFollow(engine) => engine.step(input, prev),
            Self::Fly(engine) => engine.step(input, prev),
            Self::Auto(engine) => engine.step(input, prev),
        }
    }

    /// Releases the engine's state; it echoes its input from then on.
    pub fn destroy(&mut self) {
        match self {
            Self::Manual(engine) => engine.destroy(),
            Self::CursorFollow(engine) => engine.destroy(),
            Self::Fly(engine) => engine.destroy(),
            Self::Auto(engine) => engine.destroy(),
        }
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        match self {
            Self::Manual(engine) => engine.is_destroyed(),
            Self::CursorFollow(engine) => engine.is_destroyed(),
            Self::Fly(engine) => engine.is_destroyed(),
            Self::Auto(engine) => engine.is_destroyed(),
        }
    }

    /// The direct-manipulation handle, for engines that accept one.
    pub fn manual_control(&mut self) -> Option<&mut dyn ManualControl> {
        match self {
            Self::Manual(engine) => Some(engine),
            Self::Auto(engine) => Some(engine),
            Self::CursorFollow(_) | Self::Fly(_) => None,
        }
    }

    /// The flight handle, when this is a fly engine.
    pub fn fly(&mut self) -> Option<&mut FlyNavigation<K>> {
        match self {
            Self::Fly(engine) => Some(engine),
            _ => None,
        }
    }
}

impl<K> From<ManualNavigation> for NavigationEngine<K> {
    fn from(engine: ManualNavigation) -> Self {
        Self::Manual(engine)
    }
}

impl<K> From<CursorFollowNavigation<K>> for NavigationEngine<K> {
    fn from(engine: CursorFollowNavigation<K>) -> Self {
        Self::CursorFollow(engine)
    }
}

impl<K> From<FlyNavigation<K>> for NavigationEngine<K> {
    fn from(engine: FlyNavigation<K>) -> Self {
        Self::Fly(engine)
    }
}

impl<K> From<AutoNavigation<K>> for NavigationEngine<K> {
    fn from(engine: AutoNavigation<K>) -> Self {
        Self::Auto(engine)
    }
}

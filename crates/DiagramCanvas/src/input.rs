//! # Input Protocol
//!
//! This module defines the pointer events the host application feeds into the Surface.
//! Positions are absolute, in the coordinate space the surface is embedded in; the
//! Surface converts them to surface-local coordinates itself.
//!
//! Pointer-up should be forwarded from anywhere (document level), not only from
//! inside the surface, so that gestures always terminate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The kind of pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Pointer moved, pressed or not.
    Move,
    /// Primary button released.
    Up,
    /// Pointer entered the surface.
    Enter,
    /// Pointer left the surface.
    Leave,
}

/// A single pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position in the embedding coordinate space (pixels).
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn down(position: Vec2) -> Self {
        Self::new(PointerKind::Down, position)
    }

    pub fn moved(position: Vec2) -> Self {
        Self::new(PointerKind::Move, position)
    }

    pub fn up(position: Vec2) -> Self {
        Self::new(PointerKind::Up, position)
    }

    pub fn enter(position: Vec2) -> Self {
        Self::new(PointerKind::Enter, position)
    }

    pub fn leave(position: Vec2) -> Self {
        Self::new(PointerKind::Leave, position)
    }
}

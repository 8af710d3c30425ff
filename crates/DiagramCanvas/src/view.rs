//! # Viewport System
//!
//! Converts between the embedding coordinate space (where pointer events come from)
//! and surface-local coordinates (where shapes live).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Placement of the surface inside its embedding coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Top-left corner of the surface in the embedding space.
    pub origin: Vec2,
    /// Size of the drawable area in pixels.
    pub size: Vec2,
}

impl View {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Converts an absolute position to **surface-local** coordinates.
    ///
    /// Formula: `Local = Absolute - Origin`
    pub fn to_local(&self, absolute: Vec2) -> Vec2 {
        absolute - self.origin
    }

    /// Converts a surface-local position back to the embedding space.
    ///
    /// Formula: `Absolute = Local + Origin`
    pub fn to_absolute(&self, local: Vec2) -> Vec2 {
        local + self.origin
    }

    /// True if a surface-local point is inside the drawable area.
    pub fn contains_local(&self, local: Vec2) -> bool {
        local.cmpge(Vec2::ZERO).all() && local.cmple(self.size).all()
    }
}

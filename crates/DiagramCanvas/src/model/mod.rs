//! # Core Data Models
//!
//! This module defines the data model of a diagram: shapes, the lines that
//! connect them, and the connection points that glue line ends to shape borders.
//!
//! Shapes and lines live in flat arenas (`SlotMap`) inside a [`Diagram`]; they refer
//! to each other by key, so "is this the same shape" is a key comparison.

pub mod diagram;
pub mod line;
pub mod shape;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

pub use diagram::Diagram;
pub use line::{Line, LinePatch};
pub use shape::{FillMode, Geometry, Shape};
pub use uuid::Uuid;

new_key_type! {
    /// Unique identifier for a registered Shape.
    pub struct ShapeId;
    /// Unique identifier for a registered Line.
    pub struct LineId;
}

bitflags! {
    /// Bitflags representing the boolean visual states of a Shape.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ShapeFlags: u8 {
        /// The pointer is over the shape.
        const HIGHLIGHTED = 1 << 0;
        /// The shape is part of the current multi-selection.
        const SELECTED = 1 << 1;
        /// The shape is skipped when painting and hit testing.
        const HIDDEN = 1 << 2;
    }
}

impl Serialize for ShapeFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ShapeFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// One of the four border edges of a rectangular shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderDirection {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderDirection {
    /// Every direction, in the order the border classification tests them.
    pub const ALL: [BorderDirection; 4] = [
        BorderDirection::Top,
        BorderDirection::Right,
        BorderDirection::Bottom,
        BorderDirection::Left,
    ];
}

/// A position on a shape's border that a line end is attached to.
///
/// The position is stored together with its anchor formula: the owning shape's
/// reference point (`origin`) and a fixed displacement (`offset`) captured when the
/// connection was made. Whenever the shape moves, `resync` recomputes the position
/// so the line end follows the shape rigidly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    /// Current position; always `origin + offset`.
    pub position: Vec2,
    /// Reference point of the owning shape when last synchronized.
    pub origin: Vec2,
    /// Displacement from `origin` to `position`.
    pub offset: Vec2,
}

impl ConnectionPoint {
    pub fn anchored(origin: Vec2, offset: Vec2) -> Self {
        Self {
            position: origin + offset,
            origin,
            offset,
        }
    }

    /// Moves the anchor to `origin`, keeping the offset.
    pub fn resync(&mut self, origin: Vec2) {
        self.origin = origin;
        self.position = origin + self.offset;
    }
}

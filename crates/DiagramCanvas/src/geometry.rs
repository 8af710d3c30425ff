//! # Geometry Kernel
//!
//! Pure hit-testing primitives shared by shapes, lines and the surface.
//! Nothing in here keeps state; every function only reads its arguments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A position in surface-local coordinates.
pub type Point = Vec2;

/// Returns true if `point` lies inside the rectangle spanned by `origin`, `width` and `height`.
///
/// All four edges count as inside. A negative extent contains nothing.
pub fn point_in_rect(point: Point, origin: Point, width: f32, height: f32) -> bool {
    origin.x <= point.x
        && point.x <= origin.x + width
        && origin.y <= point.y
        && point.y <= origin.y + height
}

/// Classifies `point` against the right triangle with legs `width` (x axis) and `height` (y axis).
///
/// The triangle is the one under the line from `(0, 0)` to `(width, height)`, mirrored
/// across `x = width` so that a single formula covers the isosceles triangle whose base
/// runs from `(0, 0)` to `(2 * width, 0)`. Four of these (one per rotated frame) quarter
/// a rectangle into its top, right, bottom and left border regions.
///
/// ```text
///             *
///   (p2)  * *   *
///       *   h   *
///     *   *(p1)   *
///   * * * * * * * * *
/// ```
pub fn point_in_right_triangle(point: Point, width: f32, height: f32) -> bool {
    if width <= 0.0 {
        return false;
    }

    let x = if point.x > width {
        2.0 * width - point.x
    } else {
        point.x
    };

    point.y < x * height / width
}

/// Returns true if `point` is within `radius` of `center` (boundary inclusive).
pub fn point_in_circle(point: Point, center: Point, radius: f32) -> bool {
    // A shrunk content radius can go negative for thick borders.
    if radius < 0.0 {
        return false;
    }
    point.distance_squared(center) <= radius * radius
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f32 {
    p1.distance(p2)
}

/// Axis-aligned rectangle used for bounds, marquee selection and group dragging.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Builds the rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let size = self.size();
        point_in_rect(p, self.min, size.x, size.y)
    }

    /// Overlap test. Rectangles that only touch along an edge intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn union(&self, other: &Rect) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

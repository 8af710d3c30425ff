use glam::Vec2;
use uuid::Uuid;

use super::ShapeId;
use crate::capability::{Drawable, Selectable};
use crate::config::{Color, LineCap, LineStyle, PaintStyle};
use crate::geometry::{self, Point};
use crate::render::{DrawingSurface, Stroke};

/// A straight connector between two optional shape endpoints.
///
/// `head` is the shape the line starts at, `tail` the shape it ends at. A line with a
/// head but no tail is in flight: a connect gesture is still stretching it.
#[derive(Clone, Debug)]
pub struct Line {
    /// Stable identity.
    pub uuid: Uuid,
    /// Visual style.
    pub style: LineStyle,
    start: Vec2,
    end: Vec2,
    head: Option<ShapeId>,
    tail: Option<ShapeId>,
}

/// A partial update for a [`Line`]. Unset fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct LinePatch {
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
    pub head: Option<ShapeId>,
    pub tail: Option<ShapeId>,
    pub stroke_style: Option<Color>,
    pub line_width: Option<f32>,
    pub line_cap: Option<LineCap>,
}

impl Line {
    /// A free-standing segment from `start` to `end`.
    pub fn straight(start: Vec2, end: Vec2, style: LineStyle) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            style: style.normalized(),
            start,
            end,
            head: None,
            tail: None,
        }
    }

    /// A zero-length line anchored on `head` at `start`, ready to be stretched.
    pub fn anchored(head: ShapeId, start: Vec2, style: LineStyle) -> Self {
        Self {
            head: Some(head),
            ..Self::straight(start, start, style)
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// The shape the line starts at.
    pub fn head(&self) -> Option<ShapeId> {
        self.head
    }

    /// The shape the line ends at.
    pub fn tail(&self) -> Option<ShapeId> {
        self.tail
    }

    /// True while a connect gesture has not attached the tail yet.
    pub fn is_in_flight(&self) -> bool {
        self.head.is_some() && self.tail.is_none()
    }

    /// True if `shape` is either end of the line.
    pub fn touches(&self, shape: ShapeId) -> bool {
        self.head == Some(shape) || self.tail == Some(shape)
    }

    /// Moves the end point to `point`.
    pub fn stretch(&mut self, point: Point) {
        self.end = point;
    }

    /// Merges the set fields of `patch` into the line.
    pub fn update(&mut self, patch: LinePatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(head) = patch.head {
            self.head = Some(head);
        }
        if let Some(tail) = patch.tail {
            self.tail = Some(tail);
        }
        if let Some(color) = patch.stroke_style {
            self.style.stroke_style = color;
        }
        if let Some(width) = patch.line_width.filter(|w| w.is_finite() && *w > 0.0) {
            self.style.line_width = width;
        }
        if let Some(cap) = patch.line_cap {
            self.style.line_cap = cap;
        }
    }
}

impl Selectable for Line {
    /// Hit box is a `line_width` tall rectangle starting half a width above and left of
    /// the start point and extending the segment's length along the x axis. It is not
    /// rotated to the segment, so diagonal lines are only hit near their start.
    fn is_selected(&self, point: Point) -> bool {
        let half = self.style.line_width / 2.0;
        let origin = self.start - Vec2::splat(half);
        let width = geometry::distance(self.start, self.end);

        geometry::point_in_rect(point, origin, width, self.style.line_width)
    }
}

impl Drawable for Line {
    fn draw(&self, surface: &mut dyn DrawingSurface, overrides: Option<&PaintStyle>) {
        let color = overrides
            .and_then(|o| o.stroke_style)
            .unwrap_or(self.style.stroke_style);

        surface.begin_path();
        surface.move_to(self.start);
        surface.line_to(self.end);
        surface.stroke(&Stroke {
            color,
            width: self.style.line_width,
            cap: self.style.line_cap,
            dash: self.style.dash_segments.clone(),
        });
    }
}

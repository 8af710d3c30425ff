use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BorderDirection, ConnectionPoint, LineId, ShapeFlags};
use crate::capability::{Connectable, Drawable, Selectable};
use crate::config::{LineCap, PaintStyle, ShapeStyle};
use crate::geometry::{self, Point, Rect};
use crate::render::{DrawingSurface, Stroke};

/// Smallest radius of a hover-slot marker, in pixels.
pub const MIN_HOVER_SLOT_RADIUS: f32 = 4.0;

/// Offsets closer than this are considered the same border slot.
const SLOT_EPSILON: f32 = 1e-3;

/// The outline of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned rectangle; `origin` is its top-left corner.
    Rect {
        origin: Vec2,
        width: f32,
        height: f32,
    },
    /// Circle around `center`.
    Circle { center: Vec2, radius: f32 },
}

/// How the interior of a shape is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMode {
    /// Fill the interior, then stroke the border.
    #[default]
    Filled,
    /// Stroke the border only.
    Hollow,
}

/// A drawable, selectable, connectable diagram element.
#[derive(Debug)]
pub struct Shape {
    /// Stable identity, distinct for every constructed or duplicated shape.
    pub uuid: Uuid,
    /// Visual style.
    pub style: ShapeStyle,
    /// Draw strategy.
    pub fill_mode: FillMode,
    /// State flags.
    pub flags: ShapeFlags,
    geometry: Geometry,
    /// Vector from the reference point to the pointer at gesture start.
    offset: Vec2,
    connections: HashMap<LineId, ConnectionPoint>,
    hover_slot: Option<Box<Shape>>,
}

impl Shape {
    fn with_geometry(geometry: Geometry, style: ShapeStyle, fill_mode: FillMode) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            style: style.normalized(),
            fill_mode,
            flags: ShapeFlags::empty(),
            geometry,
            offset: Vec2::ZERO,
            connections: HashMap::new(),
            hover_slot: None,
        }
    }

    /// A filled rectangle. Negative extents are clamped to zero.
    pub fn rect(origin: Vec2, width: f32, height: f32, style: ShapeStyle) -> Self {
        Self::with_geometry(
            Geometry::Rect {
                origin,
                width: width.max(0.0),
                height: height.max(0.0),
            },
            style,
            FillMode::Filled,
        )
    }

    /// A filled circle.
    pub fn circle(center: Vec2, radius: f32, style: ShapeStyle) -> Self {
        Self::with_geometry(
            Geometry::Circle {
                center,
                radius: radius.max(0.0),
            },
            style,
            FillMode::Filled,
        )
    }

    /// A circle drawn as an outline only.
    pub fn hollow_circle(center: Vec2, radius: f32, style: ShapeStyle) -> Self {
        Self::with_geometry(
            Geometry::Circle {
                center,
                radius: radius.max(0.0),
            },
            style,
            FillMode::Hollow,
        )
    }

    /// An independent copy with the same geometry and style.
    ///
    /// The copy gets a fresh uuid and carries no connections, flags, offset or hover slot.
    pub fn duplicate(&self) -> Shape {
        Self::with_geometry(self.geometry, self.style.clone(), self.fill_mode)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The point the shape is positioned by: the top-left corner of a rectangle,
    /// the center of a circle.
    pub fn reference_point(&self) -> Vec2 {
        match self.geometry {
            Geometry::Rect { origin, .. } => origin,
            Geometry::Circle { center, .. } => center,
        }
    }

    /// The current drag offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Outer bounds, including half of the border on every side.
    pub fn bounds(&self) -> Rect {
        let half = self.style.half_line_width();
        match self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => Rect::new(origin, Vec2::new(width, height)).expand(half),
            Geometry::Circle { center, radius } => {
                Rect::from_corners(center, center).expand(radius + half)
            }
        }
    }

    /// Records the vector from the reference point to `point`.
    ///
    /// Must be called at gesture start, before `move_to`.
    pub fn set_offset_by_mouse_point(&mut self, point: Point) {
        self.offset = point - self.reference_point();
    }

    pub fn clear_offset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// Moves the shape so that its reference point is `point - offset`.
    ///
    /// Connection points are resynchronized; the caller pushes them into the lines
    /// (see [`crate::model::Diagram::move_shape`]).
    pub fn move_to(&mut self, point: Point) {
        self.place(point - self.offset);
    }

    /// Moves the reference point to `reference` and resynchronizes connection points.
    pub fn place(&mut self, reference: Vec2) {
        let delta = reference - self.reference_point();
        match &mut self.geometry {
            Geometry::Rect { origin, .. } => *origin = reference,
            Geometry::Circle { center, .. } => *center = reference,
        }

        for point in self.connections.values_mut() {
            point.resync(reference);
        }

        if let Some(slot) = self.hover_slot.as_mut() {
            let slot_reference = slot.reference_point() + delta;
            slot.place(slot_reference);
        }
    }

    /// Stretches the shape towards `point`.
    ///
    /// Rectangles take `point` as their bottom-right corner, clamping width and height
    /// to zero. Circles take the distance to `point` as their radius. Existing connection
    /// points keep their offsets.
    pub fn resize(&mut self, point: Point) {
        match &mut self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => {
                *width = (point.x - origin.x).max(0.0);
                *height = (point.y - origin.y).max(0.0);
            }
            Geometry::Circle { center, radius } => {
                *radius = geometry::distance(*center, point);
            }
        }
    }

    /// The anchored connection point at the midpoint of `direction`.
    ///
    /// Circles have no border anchors.
    pub fn border_anchor(&self, direction: BorderDirection) -> Option<ConnectionPoint> {
        let Geometry::Rect {
            origin,
            width,
            height,
        } = self.geometry
        else {
            return None;
        };

        let offset = match direction {
            BorderDirection::Top => Vec2::new(width / 2.0, 0.0),
            BorderDirection::Right => Vec2::new(width, height / 2.0),
            BorderDirection::Bottom => Vec2::new(width / 2.0, height),
            BorderDirection::Left => Vec2::new(0.0, height / 2.0),
        };

        Some(ConnectionPoint::anchored(origin, offset))
    }

    /// Computes the hover-slot marker for `point`.
    ///
    /// Returns a small circle centered on the border midpoint nearest to `point`, or
    /// `None` if `point` is not on the border or a line is already attached there.
    pub fn calc_hover_slot(&self, point: Point) -> Option<Shape> {
        let anchor = self.calc_connection_point(point)?;

        let occupied = self
            .connections
            .values()
            .any(|existing| existing.offset.abs_diff_eq(anchor.offset, SLOT_EPSILON));
        if occupied {
            return None;
        }

        let radius = self.style.line_width.max(MIN_HOVER_SLOT_RADIUS);
        let style = ShapeStyle {
            fill_style: self.style.hover_slot.fill_style,
            stroke_style: self.style.hover_slot.stroke_style,
            line_width: 1.0,
            ..Default::default()
        };

        Some(Shape::circle(anchor.position, radius, style))
    }

    /// Recomputes the hover slot for `point`, or clears it when `point` is `None`.
    ///
    /// Returns true if the marker appeared, disappeared or moved.
    pub fn toggle_hover_slot(&mut self, point: Option<Point>) -> bool {
        let before = self.hover_slot.as_ref().map(|slot| slot.reference_point());
        self.hover_slot = point.and_then(|p| self.calc_hover_slot(p)).map(Box::new);
        let after = self.hover_slot.as_ref().map(|slot| slot.reference_point());
        before != after
    }

    pub fn clear_hover_slot(&mut self) {
        self.hover_slot = None;
    }

    pub fn hover_slot(&self) -> Option<&Shape> {
        self.hover_slot.as_deref()
    }

    pub fn highlight(&mut self) {
        self.flags.insert(ShapeFlags::HIGHLIGHTED);
    }

    pub fn cancel_highlight(&mut self) {
        self.flags.remove(ShapeFlags::HIGHLIGHTED);
    }

    pub fn is_highlighted(&self) -> bool {
        self.flags.contains(ShapeFlags::HIGHLIGHTED)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ShapeFlags::HIDDEN)
    }

    /// Lines attached to this shape and where they attach.
    pub fn connections(&self) -> impl Iterator<Item = (LineId, &ConnectionPoint)> {
        self.connections.iter().map(|(id, point)| (*id, point))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn trace_path(&self, surface: &mut dyn DrawingSurface) {
        match self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => surface.rect(origin, Vec2::new(width, height)),
            Geometry::Circle { center, radius } => surface.arc(center, radius, 0.0, TAU),
        }
    }

    // Border regions are classified in the frame of the outer bounds, one triangle
    // per edge, each rotated so the edge lies on its x axis.
    fn in_border_triangle(&self, point: Point, direction: BorderDirection) -> bool {
        let bounds = self.bounds();
        let size = bounds.size();
        let local = point - bounds.min;
        let (half_w, half_h) = (size.x / 2.0, size.y / 2.0);

        match direction {
            BorderDirection::Top => geometry::point_in_right_triangle(local, half_w, half_h),
            BorderDirection::Right => geometry::point_in_right_triangle(
                Vec2::new(local.y, size.x - local.x),
                half_h,
                half_w,
            ),
            BorderDirection::Bottom => geometry::point_in_right_triangle(
                Vec2::new(local.x, size.y - local.y),
                half_w,
                half_h,
            ),
            BorderDirection::Left => geometry::point_in_right_triangle(
                Vec2::new(size.y - local.y, local.x),
                half_h,
                half_w,
            ),
        }
    }
}

impl Selectable for Shape {
    fn is_selected(&self, point: Point) -> bool {
        if self.is_hidden() {
            return false;
        }

        let half = self.style.half_line_width();
        match self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => geometry::point_in_rect(
                point,
                origin - Vec2::splat(half),
                width + self.style.line_width,
                height + self.style.line_width,
            ),
            Geometry::Circle { center, radius } => {
                geometry::point_in_circle(point, center, radius + half)
            }
        }
    }
}

impl Connectable for Shape {
    fn is_selected_content(&self, point: Point) -> bool {
        if self.is_hidden() {
            return false;
        }

        let half = self.style.half_line_width();
        match self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => geometry::point_in_rect(
                point,
                origin + Vec2::splat(half),
                width - self.style.line_width,
                height - self.style.line_width,
            ),
            Geometry::Circle { center, radius } => {
                geometry::point_in_circle(point, center, radius - half)
            }
        }
    }

    fn selected_border(&self, point: Point) -> Option<BorderDirection> {
        if !matches!(self.geometry, Geometry::Rect { .. }) || !self.is_selected_border(point) {
            return None;
        }

        BorderDirection::ALL
            .into_iter()
            .find(|&direction| self.in_border_triangle(point, direction))
    }

    fn calc_connection_point(&self, point: Point) -> Option<ConnectionPoint> {
        self.selected_border(point)
            .and_then(|direction| self.border_anchor(direction))
    }

    fn register_connection_point(&mut self, line: LineId, point: ConnectionPoint) {
        self.connections.entry(line).or_insert(point);
    }

    fn unregister_connection_point(&mut self, line: LineId) -> Option<ConnectionPoint> {
        self.connections.remove(&line)
    }

    fn connection_point(&self, line: LineId) -> Option<&ConnectionPoint> {
        self.connections.get(&line)
    }
}

impl Drawable for Shape {
    fn draw(&self, surface: &mut dyn DrawingSurface, overrides: Option<&PaintStyle>) {
        if self.is_hidden() {
            return;
        }

        let highlighted = self
            .flags
            .intersects(ShapeFlags::HIGHLIGHTED | ShapeFlags::SELECTED);
        let paint = self.style.resolve(highlighted, overrides);

        surface.begin_path();
        self.trace_path(surface);

        if self.fill_mode == FillMode::Filled
            && let Some(color) = paint.fill_style
        {
            surface.fill(color);
        }

        if let Some(color) = paint.stroke_style {
            surface.stroke(&Stroke {
                color,
                width: self.style.line_width,
                cap: LineCap::Butt,
                dash: self.style.dash_segments.clone(),
            });
        }

        if let Some(slot) = &self.hover_slot {
            slot.draw(surface, None);
        }
    }
}

use glam::Vec2;
use slotmap::SlotMap;

use super::{BorderDirection, Line, LineId, LinePatch, Shape, ShapeId};
use crate::capability::{Connectable, Drawable, Selectable};
use crate::config::LineStyle;
use crate::geometry::{Point, Rect};
use crate::render::DrawingSurface;

/// The registry of everything on a surface.
///
/// Shapes and lines are stored in separate arenas. Each arena has an order vector:
/// later entries are on top. Hit testing walks the order back to front so the topmost
/// element wins; painting walks it front to back so the topmost element paints last.
#[derive(Debug, Default)]
pub struct Diagram {
    shapes: SlotMap<ShapeId, Shape>,
    lines: SlotMap<LineId, Line>,
    shape_order: Vec<ShapeId>,
    line_order: Vec<LineId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape on top of every existing shape.
    pub fn register_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.shape_order.push(id);
        id
    }

    /// Removes a shape and hands it back.
    ///
    /// Every line attached to the shape is unregistered as well, so no line is left
    /// pointing at a shape that is gone.
    pub fn unregister_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let attached: Vec<LineId> = self.shapes.get(id)?.connections().map(|(l, _)| l).collect();
        for line in attached {
            self.unregister_line(line);
        }

        self.shape_order.retain(|&s| s != id);
        let mut shape = self.shapes.remove(id)?;
        shape.clear_hover_slot();
        tracing::debug!(shape = ?id, "Unregistered shape");
        Some(shape)
    }

    /// Adds a line after every existing line.
    pub fn register_line(&mut self, line: Line) -> LineId {
        let id = self.lines.insert(line);
        self.line_order.push(id);
        id
    }

    /// Removes a line and detaches it from its head and tail shapes.
    pub fn unregister_line(&mut self, id: LineId) -> Option<Line> {
        let line = self.lines.remove(id)?;
        self.line_order.retain(|&l| l != id);

        for end in [line.head(), line.tail()].into_iter().flatten() {
            if let Some(shape) = self.shapes.get_mut(end) {
                shape.unregister_connection_point(id);
            }
        }

        Some(line)
    }

    /// Connects two shapes with a completed line, as a successful connect gesture would.
    ///
    /// Returns `None` if either shape is unknown, both are the same shape, or a border
    /// has no anchor (circles).
    pub fn connect(
        &mut self,
        from: ShapeId,
        from_border: BorderDirection,
        to: ShapeId,
        to_border: BorderDirection,
        style: LineStyle,
    ) -> Option<LineId> {
        if from == to {
            return None;
        }
        let start = self.shapes.get(from)?.border_anchor(from_border)?;
        let end = self.shapes.get(to)?.border_anchor(to_border)?;

        let mut line = Line::anchored(from, start.position, style);
        line.update(LinePatch {
            end: Some(end.position),
            tail: Some(to),
            ..Default::default()
        });
        let id = self.register_line(line);

        self.shapes[from].register_connection_point(id, start);
        self.shapes[to].register_connection_point(id, end);
        Some(id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(id)
    }

    /// Shapes bottom to top.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shape_order
            .iter()
            .filter_map(|&id| self.shapes.get(id).map(|shape| (id, shape)))
    }

    /// Lines in registration order.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.line_order
            .iter()
            .filter_map(|&id| self.lines.get(id).map(|line| (id, line)))
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The topmost shape under `point`.
    pub fn select_shape(&self, point: Point) -> Option<ShapeId> {
        self.shape_order
            .iter()
            .rev()
            .copied()
            .find(|&id| self.shapes.get(id).is_some_and(|s| s.is_selected(point)))
    }

    /// The topmost line under `point`.
    pub fn select_line(&self, point: Point) -> Option<LineId> {
        self.line_order
            .iter()
            .rev()
            .copied()
            .find(|&id| self.lines.get(id).is_some_and(|l| l.is_selected(point)))
    }

    /// Every shape whose outer bounds intersect `area`, bottom to top.
    pub fn shapes_intersecting(&self, area: &Rect) -> Vec<ShapeId> {
        self.shapes()
            .filter(|(_, shape)| !shape.is_hidden() && shape.bounds().intersects(area))
            .map(|(id, _)| id)
            .collect()
    }

    /// Drags a shape to `point` (see [`Shape::move_to`]) and keeps its lines attached.
    pub fn move_shape(&mut self, id: ShapeId, point: Point) {
        let Some(shape) = self.shapes.get_mut(id) else {
            tracing::warn!(shape = ?id, "Cannot move unknown shape");
            return;
        };
        shape.move_to(point);
        self.sync_connections(id);
    }

    /// Moves a shape's reference point to `reference` and keeps its lines attached.
    pub fn place_shape(&mut self, id: ShapeId, reference: Vec2) {
        let Some(shape) = self.shapes.get_mut(id) else {
            tracing::warn!(shape = ?id, "Cannot place unknown shape");
            return;
        };
        shape.place(reference);
        self.sync_connections(id);
    }

    /// Pushes a shape's connection points into the ends of its attached lines.
    fn sync_connections(&mut self, id: ShapeId) {
        let Some(shape) = self.shapes.get(id) else {
            return;
        };

        for (line_id, point) in shape.connections() {
            let Some(line) = self.lines.get_mut(line_id) else {
                tracing::warn!(shape = ?id, line = ?line_id, "Connection refers to unknown line");
                continue;
            };

            let mut patch = LinePatch::default();
            if line.head() == Some(id) {
                patch.start = Some(point.position);
            }
            if line.tail() == Some(id) {
                patch.end = Some(point.position);
            }
            line.update(patch);
        }
    }

    /// Paints every shape bottom to top, then every line.
    pub fn draw(&self, surface: &mut dyn DrawingSurface) {
        for (_, shape) in self.shapes() {
            shape.draw(surface, None);
        }
        for (_, line) in self.lines() {
            line.draw(surface, None);
        }
    }
}

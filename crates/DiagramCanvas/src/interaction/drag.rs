//! Draggable behavior: pointer-down on a shape's content region moves the shape.

use glam::Vec2;

use super::{DragTarget, Gesture, SurfaceEvent, request_repaint};
use crate::capability::Connectable;
use crate::geometry::Point;
use crate::model::{Diagram, ShapeId};

/// Starts dragging the topmost shape if `point` is on its content region.
///
/// Points on the border band are left to the connect behavior.
pub(crate) fn begin(diagram: &mut Diagram, point: Point) -> Option<Gesture> {
    let id = diagram.select_shape(point)?;
    let shape = diagram.shape_mut(id)?;
    if !shape.is_selected_content(point) {
        return None;
    }

    shape.set_offset_by_mouse_point(point);
    tracing::debug!(shape = ?id, at = ?point, "Drag started");

    Some(Gesture::Dragging {
        target: DragTarget::Shape(id),
        start: point,
        last: point,
    })
}

pub(crate) fn update(diagram: &mut Diagram, id: ShapeId, point: Point) {
    diagram.move_shape(id, point);
}

/// Ends the drag. `delta` is the total pointer displacement of the gesture.
pub(crate) fn end(diagram: &mut Diagram, id: ShapeId, delta: Vec2, events: &mut Vec<SurfaceEvent>) {
    if let Some(shape) = diagram.shape_mut(id) {
        shape.clear_offset();
    }
    tracing::debug!(shape = ?id, ?delta, "Drag ended");

    if delta != Vec2::ZERO {
        events.push(SurfaceEvent::ShapesMoved {
            ids: vec![id],
            delta,
        });
        request_repaint(events);
    }
}

//! Hoverable behavior: the shape under the pointer is highlighted and shows a
//! hover-slot marker on the border midpoint it is closest to.

use super::{SurfaceEvent, request_repaint};
use crate::geometry::Point;
use crate::model::{Diagram, ShapeId};

/// Re-evaluates hover for a pointer at `point`.
///
/// Events are only emitted when something visible changed.
pub(crate) fn update(
    hovered: &mut Option<ShapeId>,
    diagram: &mut Diagram,
    point: Point,
    events: &mut Vec<SurfaceEvent>,
) {
    let Some(id) = diagram.select_shape(point) else {
        leave(hovered, diagram, events);
        return;
    };

    let entered = *hovered != Some(id);
    if entered {
        if let Some(previous) = *hovered
            && let Some(shape) = diagram.shape_mut(previous)
        {
            shape.cancel_highlight();
            shape.clear_hover_slot();
        }
        *hovered = Some(id);
        tracing::trace!(shape = ?id, "Hover entered");
        events.push(SurfaceEvent::HoverChanged { shape: Some(id) });
    }

    let Some(shape) = diagram.shape_mut(id) else {
        return;
    };
    shape.highlight();
    let slot_changed = shape.toggle_hover_slot(Some(point));

    if entered || slot_changed {
        request_repaint(events);
    }
}

/// Clears hover state, if any.
pub(crate) fn leave(
    hovered: &mut Option<ShapeId>,
    diagram: &mut Diagram,
    events: &mut Vec<SurfaceEvent>,
) {
    let Some(previous) = hovered.take() else {
        return;
    };

    if let Some(shape) = diagram.shape_mut(previous) {
        shape.cancel_highlight();
        shape.clear_hover_slot();
    }
    tracing::trace!(shape = ?previous, "Hover left");
    events.push(SurfaceEvent::HoverChanged { shape: None });
    request_repaint(events);
}

//! Pickable behavior: pointer-down on a shape drags a ghost copy of it, pointer-up
//! reports where the copy was dropped. The diagram itself is left untouched.

use super::{Gesture, SurfaceEvent, request_repaint};
use crate::capability::Connectable;
use crate::geometry::Point;
use crate::model::{Diagram, Shape, ShapeId};

pub(crate) fn begin(diagram: &Diagram, point: Point) -> Option<Gesture> {
    let source = diagram.select_shape(point)?;
    let shape = diagram.shape(source)?;
    if !shape.is_selected_content(point) {
        return None;
    }

    let mut ghost = shape.duplicate();
    ghost.set_offset_by_mouse_point(point);
    tracing::debug!(source = ?source, "Pick started");

    Some(Gesture::Picking {
        source,
        ghost: Box::new(ghost),
    })
}

pub(crate) fn end(source: ShapeId, ghost: Shape, events: &mut Vec<SurfaceEvent>) {
    let position = ghost.reference_point();
    tracing::debug!(source = ?source, ?position, "Shape picked");

    events.push(SurfaceEvent::ShapePicked { source, position });
    request_repaint(events);
}

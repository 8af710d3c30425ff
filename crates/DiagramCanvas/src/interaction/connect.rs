//! Connectable behavior: lines are drawn from one shape border to another.
//!
//! The in-flight line is registered as soon as the gesture starts so it paints while
//! being stretched. A failed gesture removes it again, leaving the diagram exactly as
//! it was before pointer-down.

use super::{Gesture, SurfaceEvent, request_repaint};
use crate::capability::Connectable;
use crate::config::LineStyle;
use crate::geometry::Point;
use crate::model::{Diagram, Line, LineId, LinePatch, ShapeId};

/// Starts a connection if `point` is on the border of the topmost shape and the
/// border offers a connection point there.
pub(crate) fn begin(diagram: &mut Diagram, point: Point, style: &LineStyle) -> Option<Gesture> {
    let start_shape = diagram.select_shape(point)?;
    let anchor = diagram.shape(start_shape)?.calc_connection_point(point)?;

    let line = diagram.register_line(Line::anchored(start_shape, anchor.position, style.clone()));
    diagram
        .shape_mut(start_shape)?
        .register_connection_point(line, anchor);

    tracing::debug!(shape = ?start_shape, line = ?line, at = ?anchor.position, "Connect started");
    Some(Gesture::Connecting { line, start_shape })
}

/// Stretches the in-flight line to `point`.
pub(crate) fn update(diagram: &mut Diagram, line: LineId, point: Point) {
    match diagram.line_mut(line) {
        Some(line) => line.stretch(point),
        None => tracing::warn!(line = ?line, "In-flight line is gone"),
    }
}

/// Completes the connection if `point` is on the border of a shape other than the
/// start shape; otherwise rolls it back.
pub(crate) fn end(
    diagram: &mut Diagram,
    line: LineId,
    start_shape: ShapeId,
    point: Point,
    events: &mut Vec<SurfaceEvent>,
) {
    let target = diagram
        .select_shape(point)
        .filter(|&id| id != start_shape)
        .and_then(|id| {
            let anchor = diagram.shape(id)?.calc_connection_point(point)?;
            Some((id, anchor))
        });

    let Some((end_shape, anchor)) = target else {
        rollback(diagram, line, start_shape, events);
        return;
    };

    let Some(in_flight) = diagram.line_mut(line) else {
        tracing::warn!(line = ?line, "In-flight line is gone, nothing to complete");
        return;
    };
    in_flight.update(LinePatch {
        end: Some(anchor.position),
        tail: Some(end_shape),
        ..Default::default()
    });

    if let Some(shape) = diagram.shape_mut(end_shape) {
        shape.register_connection_point(line, anchor);
        shape.clear_hover_slot();
    }

    tracing::debug!(from = ?start_shape, to = ?end_shape, line = ?line, "Connected");
    events.push(SurfaceEvent::Connected {
        line,
        from: start_shape,
        to: end_shape,
    });
    request_repaint(events);
}

/// Removes the in-flight line and the start shape's entry for it.
pub(crate) fn rollback(
    diagram: &mut Diagram,
    line: LineId,
    start_shape: ShapeId,
    events: &mut Vec<SurfaceEvent>,
) {
    if diagram.unregister_line(line).is_none()
        && let Some(shape) = diagram.shape_mut(start_shape)
    {
        shape.unregister_connection_point(line);
    }

    tracing::debug!(shape = ?start_shape, line = ?line, "Connect cancelled");
    events.push(SurfaceEvent::ConnectionCancelled { line });
    request_repaint(events);
}

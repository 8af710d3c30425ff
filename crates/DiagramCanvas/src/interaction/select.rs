//! Multi-select behavior.
//!
//! Pointer-down on empty space starts a rubber band. On pointer-up every shape whose
//! outer bounds touch the band joins a [`ShapeGroup`]. Pointer-down inside the group's
//! bounds then drags all members together; pointer-down anywhere else dissolves it.

use glam::Vec2;

use super::{SurfaceEvent, request_repaint};
use crate::config::ShapeStyle;
use crate::geometry::{Point, Rect};
use crate::model::{Diagram, Shape, ShapeFlags, ShapeId};

/// A transient proxy that moves several shapes as one.
///
/// Members keep their position relative to the group origin (the top-left of the
/// union of their bounds), so a group drag is a rigid translation.
#[derive(Clone, Debug)]
pub struct ShapeGroup {
    origin: Vec2,
    offset: Vec2,
    bounds: Rect,
    members: Vec<(ShapeId, Vec2)>,
}

impl ShapeGroup {
    /// Groups every visible shape whose outer bounds intersect `area`.
    ///
    /// Returns `None` when the area touches nothing.
    pub fn collect(diagram: &Diagram, area: &Rect) -> Option<Self> {
        let ids = diagram.shapes_intersecting(area);
        let bounds = ids
            .iter()
            .filter_map(|&id| diagram.shape(id))
            .map(|shape| shape.bounds())
            .reduce(|a, b| a.union(&b))?;

        let origin = bounds.min;
        let members = ids
            .iter()
            .filter_map(|&id| {
                diagram
                    .shape(id)
                    .map(|shape| (id, shape.reference_point() - origin))
            })
            .collect();

        Some(Self {
            origin,
            offset: Vec2::ZERO,
            bounds,
            members,
        })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Union of the members' outer bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn members(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.members.iter().map(|(id, _)| *id)
    }

    pub fn has_member(&self, id: ShapeId) -> bool {
        self.members.iter().any(|(member, _)| *member == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Records the vector from the group origin to `point`.
    pub fn set_offset_by_mouse_point(&mut self, point: Point) {
        self.offset = point - self.origin;
    }

    /// Moves the group so its origin is `point - offset`, carrying every member and
    /// its attached lines along.
    pub fn move_to(&mut self, diagram: &mut Diagram, point: Point) {
        let origin = point - self.offset;
        self.bounds = self.bounds.translate(origin - self.origin);
        self.origin = origin;

        for &(id, relative) in &self.members {
            diagram.place_shape(id, origin + relative);
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.offset = Vec2::ZERO;
    }
}

/// The rubber-band rectangle between `anchor` and `current`, ready to paint.
pub fn selection_mask(anchor: Point, current: Point, style: &ShapeStyle) -> Shape {
    let area = Rect::from_corners(anchor, current);
    let mut mask = Shape::rect(area.min, 0.0, 0.0, style.clone());
    mask.resize(area.max);
    mask
}

/// Ends the rubber band, returning the group it selected.
pub(crate) fn end(
    diagram: &mut Diagram,
    anchor: Point,
    point: Point,
    events: &mut Vec<SurfaceEvent>,
) -> Option<ShapeGroup> {
    request_repaint(events);

    let area = Rect::from_corners(anchor, point);
    let group = ShapeGroup::collect(diagram, &area)?;

    let ids: Vec<ShapeId> = group.members().collect();
    for &id in &ids {
        if let Some(shape) = diagram.shape_mut(id) {
            shape.flags.insert(ShapeFlags::SELECTED);
        }
    }

    tracing::debug!(members = ids.len(), "Selection made");
    events.push(SurfaceEvent::SelectionChanged { ids });
    Some(group)
}

/// Dissolves the group and unmarks its members.
pub(crate) fn dissolve(mut group: ShapeGroup, diagram: &mut Diagram, events: &mut Vec<SurfaceEvent>) {
    for id in group.members() {
        if let Some(shape) = diagram.shape_mut(id) {
            shape.flags.remove(ShapeFlags::SELECTED);
        }
    }
    group.clear();

    events.push(SurfaceEvent::SelectionChanged { ids: Vec::new() });
    request_repaint(events);
}

/// Ends a group drag. The group is dissolved afterwards.
pub(crate) fn end_drag(
    group: ShapeGroup,
    diagram: &mut Diagram,
    delta: Vec2,
    events: &mut Vec<SurfaceEvent>,
) {
    tracing::debug!(members = group.len(), ?delta, "Group drag ended");
    if delta != Vec2::ZERO {
        events.push(SurfaceEvent::ShapesMoved {
            ids: group.members().collect(),
            delta,
        });
    }
    dissolve(group, diagram, events);
}

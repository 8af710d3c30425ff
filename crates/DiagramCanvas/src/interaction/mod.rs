//! # Interaction State Machine
//!
//! Pointer events are sequenced into gestures: a pointer-down may start one, the
//! following moves are scoped to it, and the pointer-up ends it. At most one gesture
//! is active at a time, which is what keeps dragging and connecting mutually
//! exclusive.
//!
//! Each behavior lives in its own submodule and can be mounted or unmounted
//! independently through [`Behaviors`]:
//! - `connect`: pointer-down on a shape border starts a line, pointer-up on another
//!   shape border completes it, anything else rolls it back.
//! - `drag`: pointer-down on a shape's content region moves the shape.
//! - `hover`: every move highlights the shape under the pointer and shows its hover slot.
//! - `select`: pointer-down on empty space draws a rubber band; the shapes it touches
//!   become a group that the next drag moves together.
//! - `pick`: pointer-down on a shape's content drags a ghost copy of it.
//!
//! On pointer-down, connect is tried first and drag only if connect declined.

pub mod connect;
pub mod drag;
pub mod hover;
pub mod pick;
pub mod select;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SurfaceConfig;
use crate::geometry::Point;
use crate::input::PointerKind;
use crate::model::{Diagram, LineId, Shape, ShapeId};

pub use select::ShapeGroup;

bitflags! {
    /// Interaction behaviors mounted on a Surface.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Behaviors: u8 {
        /// Move shapes by their content region.
        const DRAG = 1 << 0;
        /// Connect shapes by their borders.
        const CONNECT = 1 << 1;
        /// Highlight the shape under the pointer.
        const HOVER = 1 << 2;
        /// Rubber-band selection and group dragging.
        const MULTI_SELECT = 1 << 3;
        /// Drag ghost copies of shapes out of the surface.
        const PICK = 1 << 4;
    }
}

impl Default for Behaviors {
    /// Everything an editable diagram needs; picking is for palette surfaces.
    fn default() -> Self {
        Self::DRAG | Self::CONNECT | Self::HOVER | Self::MULTI_SELECT
    }
}

impl Serialize for Behaviors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Behaviors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

bitflags! {
    /// Read-only summary of the active gesture.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModeFlags: u8 {
        const CONNECTING = 1 << 0;
        const DRAGGING = 1 << 1;
        const PICKING = 1 << 2;
        const MULTI = 1 << 3;
    }
}

/// What a drag gesture moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// A single shape.
    Shape(ShapeId),
    /// The current multi-selection group.
    Group,
}

/// The gesture in progress.
#[derive(Debug, Default)]
pub enum Gesture {
    /// No active gesture.
    #[default]
    Idle,
    /// Moving a shape or the selection group.
    Dragging {
        target: DragTarget,
        /// Pointer position at pointer-down (surface-local).
        start: Vec2,
        /// Last pointer position seen by the gesture (surface-local).
        last: Vec2,
    },
    /// Stretching an in-flight line out of `start_shape`.
    Connecting { line: LineId, start_shape: ShapeId },
    /// Dragging a ghost copy of `source`.
    Picking { source: ShapeId, ghost: Box<Shape> },
    /// Drawing the rubber band from `anchor` to `current`.
    MultiSelecting { anchor: Vec2, current: Vec2 },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// Events emitted by the interaction logic to the host application.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A connect gesture completed.
    Connected {
        line: LineId,
        from: ShapeId,
        to: ShapeId,
    },
    /// A connect gesture failed; the in-flight line was removed.
    ConnectionCancelled { line: LineId },
    /// A drag gesture ended after moving these shapes.
    ShapesMoved {
        ids: Vec<ShapeId>,
        /// Total pointer displacement of the gesture.
        delta: Vec2,
    },
    /// The multi-selection changed. Empty when it was dissolved.
    SelectionChanged { ids: Vec<ShapeId> },
    /// A pick gesture dropped a ghost of `source` with its reference point at `position`.
    ShapePicked { source: ShapeId, position: Vec2 },
    /// The pointer moved onto another shape, or off every shape.
    HoverChanged { shape: Option<ShapeId> },
    /// The visual state changed and the surface should be repainted.
    RepaintNeeded,
}

/// Pushes a repaint request unless one is already queued.
pub(crate) fn request_repaint(events: &mut Vec<SurfaceEvent>) {
    if !events.contains(&SurfaceEvent::RepaintNeeded) {
        events.push(SurfaceEvent::RepaintNeeded);
    }
}

/// Transient interaction state of a Surface.
#[derive(Debug, Default)]
pub struct Interaction {
    /// The gesture in progress.
    pub gesture: Gesture,
    /// The shape under the pointer, as tracked by the hover behavior.
    pub hovered: Option<ShapeId>,
    /// The group produced by the last rubber-band selection.
    pub selection: Option<ShapeGroup>,
}

impl Interaction {
    /// The active gesture as mode flags.
    pub fn mode(&self) -> ModeFlags {
        match &self.gesture {
            Gesture::Idle => ModeFlags::empty(),
            Gesture::Dragging {
                target: DragTarget::Group,
                ..
            } => ModeFlags::DRAGGING | ModeFlags::MULTI,
            Gesture::Dragging { .. } => ModeFlags::DRAGGING,
            Gesture::Connecting { .. } => ModeFlags::CONNECTING,
            Gesture::Picking { .. } => ModeFlags::PICKING,
            Gesture::MultiSelecting { .. } => ModeFlags::MULTI,
        }
    }

    /// Ends every piece of state that refers to `shape`, which is about to be removed.
    pub(crate) fn forget_shape(
        &mut self,
        shape: ShapeId,
        diagram: &mut Diagram,
        events: &mut Vec<SurfaceEvent>,
    ) {
        let involved = match &self.gesture {
            Gesture::Dragging {
                target: DragTarget::Shape(id),
                ..
            } => *id == shape,
            Gesture::Dragging {
                target: DragTarget::Group,
                ..
            } => self.selection.as_ref().is_some_and(|g| g.has_member(shape)),
            Gesture::Connecting { start_shape, .. } => *start_shape == shape,
            Gesture::Picking { source, .. } => *source == shape,
            Gesture::Idle | Gesture::MultiSelecting { .. } => false,
        };
        if involved {
            self.abort_gesture(diagram, events);
        }

        if self.hovered == Some(shape) {
            self.hovered = None;
        }

        if self.selection.as_ref().is_some_and(|g| g.has_member(shape))
            && let Some(group) = self.selection.take()
        {
            select::dissolve(group, diagram, events);
        }
    }

    /// Drops the gesture if it is stretching `line`, which is about to be removed.
    pub(crate) fn forget_line(&mut self, line: LineId) {
        if matches!(self.gesture, Gesture::Connecting { line: l, .. } if l == line) {
            tracing::debug!(line = ?line, "In-flight line removed, connect gesture dropped");
            self.gesture = Gesture::Idle;
        }
    }

    /// Ends the active gesture without completing it.
    ///
    /// A connect gesture is rolled back; drags keep the distance already travelled.
    pub(crate) fn abort_gesture(&mut self, diagram: &mut Diagram, events: &mut Vec<SurfaceEvent>) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Dragging {
                target: DragTarget::Shape(id),
                start,
                last,
            } => drag::end(diagram, id, last - start, events),
            Gesture::Dragging {
                target: DragTarget::Group,
                start,
                last,
            } => {
                if let Some(group) = self.selection.take() {
                    select::end_drag(group, diagram, last - start, events);
                }
            }
            Gesture::Connecting { line, start_shape } => {
                connect::rollback(diagram, line, start_shape, events);
            }
            Gesture::Picking { source, .. } => {
                tracing::debug!(source = ?source, "Pick gesture aborted");
                request_repaint(events);
            }
            Gesture::MultiSelecting { .. } => request_repaint(events),
        }
    }

    /// Tears down what the behaviors in `removed` own.
    pub(crate) fn unmount(
        &mut self,
        removed: Behaviors,
        diagram: &mut Diagram,
        events: &mut Vec<SurfaceEvent>,
    ) {
        let owner = match &self.gesture {
            Gesture::Idle => Behaviors::empty(),
            Gesture::Dragging {
                target: DragTarget::Group,
                ..
            } => Behaviors::DRAG | Behaviors::MULTI_SELECT,
            Gesture::Dragging { .. } => Behaviors::DRAG,
            Gesture::Connecting { .. } => Behaviors::CONNECT,
            Gesture::Picking { .. } => Behaviors::PICK,
            Gesture::MultiSelecting { .. } => Behaviors::MULTI_SELECT,
        };
        if removed.intersects(owner) {
            self.abort_gesture(diagram, events);
        }

        if removed.contains(Behaviors::MULTI_SELECT)
            && let Some(group) = self.selection.take()
        {
            select::dissolve(group, diagram, events);
        }

        if removed.contains(Behaviors::HOVER) {
            hover::leave(&mut self.hovered, diagram, events);
        }
    }
}

/// Feeds one pointer event into the state machines.
///
/// `point` is already in surface-local coordinates. Significant outcomes are pushed
/// onto `events`.
pub fn handle_pointer(
    interaction: &mut Interaction,
    behaviors: Behaviors,
    config: &SurfaceConfig,
    kind: PointerKind,
    point: Point,
    diagram: &mut Diagram,
    events: &mut Vec<SurfaceEvent>,
) {
    match kind {
        PointerKind::Down => handle_down(interaction, behaviors, config, point, diagram, events),
        PointerKind::Move => {
            handle_move(interaction, point, diagram, events);
            if behaviors.contains(Behaviors::HOVER) {
                hover::update(&mut interaction.hovered, diagram, point, events);
            }
        }
        PointerKind::Up => handle_up(interaction, point, diagram, events),
        PointerKind::Enter => {
            if behaviors.contains(Behaviors::HOVER) {
                hover::update(&mut interaction.hovered, diagram, point, events);
            }
        }
        PointerKind::Leave => {
            if behaviors.contains(Behaviors::HOVER) {
                hover::leave(&mut interaction.hovered, diagram, events);
            }
        }
    }
}

/// Handles pointer-down while deciding which gesture, if any, starts.
///
/// Order: connect, group drag, drag, pick, rubber band.
fn handle_down(
    interaction: &mut Interaction,
    behaviors: Behaviors,
    config: &SurfaceConfig,
    point: Point,
    diagram: &mut Diagram,
    events: &mut Vec<SurfaceEvent>,
) {
    if !interaction.gesture.is_idle() {
        tracing::debug!(mode = ?interaction.mode(), "Pointer down ignored, gesture in progress");
        return;
    }

    if behaviors.contains(Behaviors::CONNECT)
        && let Some(gesture) = connect::begin(diagram, point, &config.connection_style)
    {
        interaction.gesture = gesture;
        request_repaint(events);
        return;
    }

    let group_hit = interaction
        .selection
        .as_ref()
        .is_some_and(|group| group.contains(point));
    if group_hit
        && behaviors.contains(Behaviors::DRAG)
        && let Some(group) = interaction.selection.as_mut()
    {
        group.set_offset_by_mouse_point(point);
        tracing::debug!(members = group.len(), "Group drag started");
        interaction.gesture = Gesture::Dragging {
            target: DragTarget::Group,
            start: point,
            last: point,
        };
        return;
    }

    if let Some(group) = interaction.selection.take() {
        select::dissolve(group, diagram, events);
    }

    if behaviors.contains(Behaviors::DRAG)
        && let Some(gesture) = drag::begin(diagram, point)
    {
        interaction.gesture = gesture;
        return;
    }

    if behaviors.contains(Behaviors::PICK)
        && let Some(gesture) = pick::begin(diagram, point)
    {
        interaction.gesture = gesture;
        request_repaint(events);
        return;
    }

    if behaviors.contains(Behaviors::MULTI_SELECT) && diagram.select_shape(point).is_none() {
        tracing::debug!(anchor = ?point, "Rubber band started");
        interaction.gesture = Gesture::MultiSelecting {
            anchor: point,
            current: point,
        };
        request_repaint(events);
    }
}

fn handle_move(
    interaction: &mut Interaction,
    point: Point,
    diagram: &mut Diagram,
    events: &mut Vec<SurfaceEvent>,
) {
    match &mut interaction.gesture {
        Gesture::Idle => return,
        Gesture::Dragging { target, last, .. } => {
            *last = point;
            match target {
                DragTarget::Shape(id) => drag::update(diagram, *id, point),
                DragTarget::Group => {
                    if let Some(group) = interaction.selection.as_mut() {
                        group.move_to(diagram, point);
                    }
                }
            }
        }
        Gesture::Connecting { line, .. } => connect::update(diagram, *line, point),
        Gesture::Picking { ghost, .. } => ghost.move_to(point),
        Gesture::MultiSelecting { current, .. } => *current = point,
    }
    request_repaint(events);
}

fn handle_up(
    interaction: &mut Interaction,
    point: Point,
    diagram: &mut Diagram,
    events: &mut Vec<SurfaceEvent>,
) {
    match std::mem::take(&mut interaction.gesture) {
        Gesture::Idle => {}
        Gesture::Dragging {
            target: DragTarget::Shape(id),
            start,
            last,
        } => drag::end(diagram, id, last - start, events),
        Gesture::Dragging {
            target: DragTarget::Group,
            start,
            last,
        } => {
            if let Some(group) = interaction.selection.take() {
                select::end_drag(group, diagram, last - start, events);
            }
        }
        Gesture::Connecting { line, start_shape } => {
            connect::end(diagram, line, start_shape, point, events);
        }
        Gesture::Picking { source, ghost } => pick::end(source, *ghost, events),
        Gesture::MultiSelecting { anchor, .. } => {
            interaction.selection = select::end(diagram, anchor, point, events);
        }
    }
}

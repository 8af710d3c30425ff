//! # Capabilities
//!
//! Shapes and lines are composed from small capability traits rather than a
//! class hierarchy. A line is `Drawable + Selectable`; a shape is additionally
//! `Connectable`.

use crate::config::PaintStyle;
use crate::geometry::Point;
use crate::model::{BorderDirection, ConnectionPoint, LineId};
use crate::render::DrawingSurface;

/// Something that can paint itself onto a drawing surface.
pub trait Drawable {
    /// Paints the element. `overrides` take precedence over every other style source.
    fn draw(&self, surface: &mut dyn DrawingSurface, overrides: Option<&PaintStyle>);
}

/// Something that can be hit by the pointer.
pub trait Selectable {
    /// True if `point` falls anywhere on the element.
    fn is_selected(&self, point: Point) -> bool;
}

/// Something lines can attach to.
///
/// The selectable area is split into a content region (used for dragging) and a
/// border band as thick as the border stroke (used for connecting).
pub trait Connectable: Selectable {
    /// True if `point` is inside the content region, i.e. not on the border band.
    fn is_selected_content(&self, point: Point) -> bool;

    /// True if `point` is on the border band.
    fn is_selected_border(&self, point: Point) -> bool {
        self.is_selected(point) && !self.is_selected_content(point)
    }

    /// Which border edge `point` is closest to, if it is on the border at all.
    fn selected_border(&self, point: Point) -> Option<BorderDirection>;

    /// The anchored connection point for `point`, if a line may attach there.
    fn calc_connection_point(&self, point: Point) -> Option<ConnectionPoint>;

    /// Records where `line` attaches. Registering an already known line is a no-op.
    fn register_connection_point(&mut self, line: LineId, point: ConnectionPoint);

    /// Forgets `line`, returning where it was attached.
    fn unregister_connection_point(&mut self, line: LineId) -> Option<ConnectionPoint>;

    /// Where `line` is attached, if it is.
    fn connection_point(&self, line: LineId) -> Option<&ConnectionPoint>;
}

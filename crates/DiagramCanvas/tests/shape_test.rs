use diagram_canvas::capability::{Connectable, Drawable, Selectable};
use diagram_canvas::config::{PaintStyle, ShapeStyle};
use diagram_canvas::geometry::Point;
use diagram_canvas::model::shape::MIN_HOVER_SLOT_RADIUS;
use diagram_canvas::model::{BorderDirection, FillMode, Geometry, LineId, Shape, ShapeFlags};
use diagram_canvas::render::{DrawCommand, RenderList};
use glam::{Vec2, Vec4};
use proptest::prelude::*;
use slotmap::KeyData;

fn test_rect() -> Shape {
    // Outer bounds (99, 99) - (201, 151), content (101, 101) - (199, 149)
    Shape::rect(Vec2::new(100.0, 100.0), 100.0, 50.0, ShapeStyle::default())
}

fn line_key(n: u64) -> LineId {
    LineId::from(KeyData::from_ffi(n))
}

#[test]
fn test_rect_regions() {
    let shape = test_rect();

    let center = Vec2::new(150.0, 125.0);
    assert!(shape.is_selected(center));
    assert!(shape.is_selected_content(center));
    assert!(!shape.is_selected_border(center));

    let on_border = Vec2::new(150.0, 100.0);
    assert!(shape.is_selected(on_border));
    assert!(!shape.is_selected_content(on_border));
    assert!(shape.is_selected_border(on_border));

    assert!(!shape.is_selected(Vec2::new(150.0, 160.0)));
}

#[test]
fn test_rect_border_classification() {
    let shape = test_rect();

    assert_eq!(
        shape.selected_border(Vec2::new(150.0, 100.0)),
        Some(BorderDirection::Top)
    );
    assert_eq!(
        shape.selected_border(Vec2::new(200.0, 125.0)),
        Some(BorderDirection::Right)
    );
    assert_eq!(
        shape.selected_border(Vec2::new(150.0, 150.0)),
        Some(BorderDirection::Bottom)
    );
    assert_eq!(
        shape.selected_border(Vec2::new(100.0, 125.0)),
        Some(BorderDirection::Left)
    );
    assert_eq!(shape.selected_border(Vec2::new(150.0, 125.0)), None);
}

#[test]
fn test_connection_points_are_border_midpoints() {
    let shape = test_rect();

    let top = shape.calc_connection_point(Vec2::new(130.0, 100.0)).unwrap();
    assert_eq!(top.position, Vec2::new(150.0, 100.0));
    assert_eq!(top.offset, Vec2::new(50.0, 0.0));

    let right = shape.calc_connection_point(Vec2::new(200.0, 120.0)).unwrap();
    assert_eq!(right.position, Vec2::new(200.0, 125.0));

    assert!(shape.calc_connection_point(Vec2::new(150.0, 125.0)).is_none());
}

#[test]
fn test_circle_has_no_connection_points() {
    let circle = Shape::circle(Vec2::new(50.0, 50.0), 20.0, ShapeStyle::default());

    assert!(circle.is_selected(Vec2::new(70.0, 50.0)));
    assert!(circle.is_selected_border(Vec2::new(70.0, 50.0)));
    assert!(circle.is_selected_content(Vec2::new(50.0, 50.0)));
    assert!(circle.calc_connection_point(Vec2::new(70.0, 50.0)).is_none());
    assert!(circle.calc_hover_slot(Vec2::new(70.0, 50.0)).is_none());
}

#[test]
fn test_move_keeps_connection_offsets() {
    let mut shape = test_rect();
    let line = line_key(1);
    let point = shape.border_anchor(BorderDirection::Right).unwrap();
    shape.register_connection_point(line, point);

    shape.set_offset_by_mouse_point(Vec2::new(150.0, 125.0));
    assert_eq!(shape.offset(), Vec2::new(50.0, 25.0));

    shape.move_to(Vec2::new(200.0, 225.0));
    assert_eq!(shape.reference_point(), Vec2::new(150.0, 200.0));

    let moved = shape.connection_point(line).unwrap();
    assert_eq!(moved.position, Vec2::new(250.0, 225.0));
    assert_eq!(moved.origin, Vec2::new(150.0, 200.0));
}

#[test]
fn test_register_connection_point_is_idempotent() {
    let mut shape = test_rect();
    let line = line_key(1);
    let top = shape.border_anchor(BorderDirection::Top).unwrap();
    let left = shape.border_anchor(BorderDirection::Left).unwrap();

    shape.register_connection_point(line, top);
    shape.register_connection_point(line, left);

    assert_eq!(shape.connection_count(), 1);
    assert_eq!(shape.connection_point(line), Some(&top));

    assert_eq!(shape.unregister_connection_point(line), Some(top));
    assert_eq!(shape.unregister_connection_point(line), None);
}

#[test]
fn test_hover_slot() {
    let mut shape = test_rect();

    assert!(shape.toggle_hover_slot(Some(Vec2::new(130.0, 100.0))));
    let slot = shape.hover_slot().unwrap();
    assert_eq!(
        slot.geometry(),
        &Geometry::Circle {
            center: Vec2::new(150.0, 100.0),
            radius: MIN_HOVER_SLOT_RADIUS,
        }
    );

    // Same border slot, nothing changes
    assert!(!shape.toggle_hover_slot(Some(Vec2::new(160.0, 100.0))));

    // Content region clears the marker
    assert!(shape.toggle_hover_slot(Some(Vec2::new(150.0, 125.0))));
    assert!(shape.hover_slot().is_none());
}

#[test]
fn test_hover_slot_hidden_when_occupied() {
    let mut shape = test_rect();
    let top = shape.border_anchor(BorderDirection::Top).unwrap();
    shape.register_connection_point(line_key(1), top);

    assert!(shape.calc_hover_slot(Vec2::new(150.0, 100.0)).is_none());
    assert!(shape.calc_hover_slot(Vec2::new(200.0, 125.0)).is_some());
}

#[test]
fn test_duplicate_is_independent() {
    let mut shape = test_rect();
    shape.register_connection_point(
        line_key(1),
        shape.border_anchor(BorderDirection::Top).unwrap(),
    );
    shape.highlight();

    let copy = shape.duplicate();
    assert_ne!(copy.uuid, shape.uuid);
    assert_eq!(copy.geometry(), shape.geometry());
    assert_eq!(copy.style, shape.style);
    assert_eq!(copy.connection_count(), 0);
    assert!(!copy.is_highlighted());
}

#[test]
fn test_negative_extents_are_clamped() {
    let mut shape = Shape::rect(Vec2::ZERO, -10.0, 20.0, ShapeStyle::default());
    assert_eq!(
        shape.geometry(),
        &Geometry::Rect {
            origin: Vec2::ZERO,
            width: 0.0,
            height: 20.0,
        }
    );

    shape.resize(Vec2::new(30.0, -5.0));
    assert_eq!(
        shape.geometry(),
        &Geometry::Rect {
            origin: Vec2::ZERO,
            width: 30.0,
            height: 0.0,
        }
    );
}

#[test]
fn test_style_resolution_precedence() {
    let base = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let highlight = Vec4::new(0.0, 1.0, 0.0, 1.0);
    let forced = Vec4::new(0.0, 0.0, 1.0, 1.0);
    let style = ShapeStyle {
        fill_style: Some(base),
        highlight: PaintStyle {
            fill_style: Some(highlight),
            stroke_style: None,
        },
        ..Default::default()
    };

    assert_eq!(style.resolve(false, None).fill_style, Some(base));
    assert_eq!(style.resolve(true, None).fill_style, Some(highlight));
    // Unset highlight stroke falls through to the base stroke
    assert_eq!(style.resolve(true, None).stroke_style, style.stroke_style);

    let overrides = PaintStyle {
        fill_style: Some(forced),
        stroke_style: None,
    };
    assert_eq!(style.resolve(true, Some(&overrides)).fill_style, Some(forced));
}

#[test]
fn test_invalid_line_width_uses_default() {
    let style = ShapeStyle {
        line_width: -3.0,
        ..Default::default()
    };
    let shape = Shape::rect(Vec2::ZERO, 10.0, 10.0, style);
    assert_eq!(shape.style.line_width, 2.0);
}

#[test]
fn test_draw_strategies() {
    let style = ShapeStyle {
        fill_style: Some(Vec4::ONE),
        ..Default::default()
    };
    let filled = Shape::circle(Vec2::new(10.0, 10.0), 5.0, style.clone());
    let hollow = Shape::hollow_circle(Vec2::new(10.0, 10.0), 5.0, style);
    assert_eq!(hollow.fill_mode, FillMode::Hollow);

    let mut list = RenderList::new(Vec2::new(100.0, 100.0));
    filled.draw(&mut list, None);
    assert!(list.take().iter().any(|c| matches!(c, DrawCommand::Fill(_))));

    hollow.draw(&mut list, None);
    let commands = list.take();
    assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Fill(_))));
    assert!(commands.iter().any(|c| matches!(c, DrawCommand::Stroke(_))));
}

#[test]
fn test_hidden_shape_is_inert() {
    let mut shape = test_rect();
    shape.flags.insert(ShapeFlags::HIDDEN);

    assert!(!shape.is_selected(Vec2::new(150.0, 125.0)));

    let mut list = RenderList::new(Vec2::new(300.0, 300.0));
    shape.draw(&mut list, None);
    assert!(list.commands().is_empty());
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (50.0f32..250.0, 50.0f32..200.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn selectable_area_partitions_into_content_and_border(point in point_strategy()) {
        let shape = test_rect();
        let content = shape.is_selected_content(point);
        let border = shape.is_selected_border(point);

        prop_assert!(!(content && border));
        prop_assert_eq!(shape.is_selected(point), content || border);
    }

    #[test]
    fn classified_points_lie_on_the_border(point in point_strategy()) {
        let shape = test_rect();
        if shape.selected_border(point).is_some() {
            prop_assert!(shape.is_selected_border(point));
        }
    }
}

use diagram_canvas::capability::Connectable;
use diagram_canvas::config::{LineStyle, ShapeStyle};
use diagram_canvas::geometry::Rect;
use diagram_canvas::model::{BorderDirection, Diagram, Line, Shape, ShapeId};
use glam::Vec2;

fn rect_at(x: f32, y: f32) -> Shape {
    Shape::rect(Vec2::new(x, y), 100.0, 50.0, ShapeStyle::default())
}

/// Asserts every line attached to `shape` ends exactly on its connection point.
fn assert_glued(diagram: &Diagram, shape: ShapeId) {
    let s = diagram.shape(shape).unwrap();
    for (line_id, point) in s.connections() {
        let line = diagram.line(line_id).unwrap();
        let end = if line.head() == Some(shape) {
            line.start()
        } else {
            line.end()
        };
        assert_eq!(end, point.position, "line {line_id:?} came loose");
        assert_eq!(point.position, s.reference_point() + point.offset);
    }
}

#[test]
fn test_topmost_shape_wins() {
    let mut diagram = Diagram::new();
    let bottom = diagram.register_shape(rect_at(100.0, 100.0));
    let top = diagram.register_shape(rect_at(150.0, 120.0));

    // Overlap
    assert_eq!(diagram.select_shape(Vec2::new(160.0, 130.0)), Some(top));
    // Only the bottom shape
    assert_eq!(diagram.select_shape(Vec2::new(110.0, 110.0)), Some(bottom));
    assert_eq!(diagram.select_shape(Vec2::new(10.0, 10.0)), None);
}

#[test]
fn test_connect_registers_both_ends() {
    let mut diagram = Diagram::new();
    let a = diagram.register_shape(rect_at(100.0, 100.0));
    let b = diagram.register_shape(rect_at(300.0, 100.0));

    let line = diagram
        .connect(a, BorderDirection::Right, b, BorderDirection::Left, LineStyle::default())
        .unwrap();

    let l = diagram.line(line).unwrap();
    assert_eq!(l.head(), Some(a));
    assert_eq!(l.tail(), Some(b));
    assert_eq!(l.start(), Vec2::new(200.0, 125.0));
    assert_eq!(l.end(), Vec2::new(300.0, 125.0));
    assert!(diagram.shape(a).unwrap().connection_point(line).is_some());
    assert!(diagram.shape(b).unwrap().connection_point(line).is_some());
}

#[test]
fn test_connect_rejects_invalid_targets() {
    let mut diagram = Diagram::new();
    let a = diagram.register_shape(rect_at(100.0, 100.0));
    let circle = diagram.register_shape(Shape::circle(
        Vec2::new(400.0, 400.0),
        30.0,
        ShapeStyle::default(),
    ));

    assert!(
        diagram
            .connect(a, BorderDirection::Top, a, BorderDirection::Left, LineStyle::default())
            .is_none()
    );
    assert!(
        diagram
            .connect(a, BorderDirection::Top, circle, BorderDirection::Left, LineStyle::default())
            .is_none()
    );
    assert_eq!(diagram.line_count(), 0);
}

#[test]
fn test_moving_keeps_lines_glued() {
    let mut diagram = Diagram::new();
    let hub = diagram.register_shape(rect_at(300.0, 300.0));
    let east = diagram.register_shape(rect_at(500.0, 300.0));
    let south = diagram.register_shape(rect_at(300.0, 500.0));
    let north = diagram.register_shape(rect_at(300.0, 100.0));
    let style = LineStyle::default();

    diagram.connect(hub, BorderDirection::Right, east, BorderDirection::Left, style.clone());
    diagram.connect(hub, BorderDirection::Bottom, south, BorderDirection::Top, style.clone());
    diagram.connect(north, BorderDirection::Bottom, hub, BorderDirection::Top, style);
    assert_eq!(diagram.shape(hub).unwrap().connection_count(), 3);

    diagram.place_shape(hub, Vec2::new(120.0, 260.0));
    for id in [hub, east, south, north] {
        assert_glued(&diagram, id);
    }

    diagram.shape_mut(east).unwrap().set_offset_by_mouse_point(Vec2::new(550.0, 325.0));
    diagram.move_shape(east, Vec2::new(700.0, 400.0));
    assert_eq!(
        diagram.shape(east).unwrap().reference_point(),
        Vec2::new(650.0, 375.0)
    );
    for id in [hub, east, south, north] {
        assert_glued(&diagram, id);
    }
}

#[test]
fn test_unregister_shape_removes_attached_lines() {
    let mut diagram = Diagram::new();
    let a = diagram.register_shape(rect_at(100.0, 100.0));
    let b = diagram.register_shape(rect_at(300.0, 100.0));
    let c = diagram.register_shape(rect_at(300.0, 300.0));
    let style = LineStyle::default();
    diagram.connect(a, BorderDirection::Right, b, BorderDirection::Left, style.clone());
    let kept = diagram
        .connect(b, BorderDirection::Bottom, c, BorderDirection::Top, style)
        .unwrap();

    let removed = diagram.unregister_shape(a).unwrap();
    assert_eq!(removed.connection_count(), 0);
    assert_eq!(diagram.line_count(), 1);
    assert!(diagram.line(kept).is_some());
    assert_eq!(diagram.shape(b).unwrap().connection_count(), 1);
    assert!(diagram.unregister_shape(a).is_none());
}

#[test]
fn test_unregister_line_detaches_ends() {
    let mut diagram = Diagram::new();
    let a = diagram.register_shape(rect_at(100.0, 100.0));
    let b = diagram.register_shape(rect_at(300.0, 100.0));
    let line = diagram
        .connect(a, BorderDirection::Right, b, BorderDirection::Left, LineStyle::default())
        .unwrap();

    assert!(diagram.unregister_line(line).is_some());
    assert_eq!(diagram.shape(a).unwrap().connection_count(), 0);
    assert_eq!(diagram.shape(b).unwrap().connection_count(), 0);
    assert!(diagram.unregister_line(line).is_none());
}

#[test]
fn test_select_line() {
    let mut diagram = Diagram::new();
    let line = diagram.register_line(Line::straight(
        Vec2::new(0.0, 50.0),
        Vec2::new(200.0, 50.0),
        LineStyle::default(),
    ));

    assert_eq!(diagram.select_line(Vec2::new(100.0, 51.0)), Some(line));
    assert_eq!(diagram.select_line(Vec2::new(100.0, 80.0)), None);
}

#[test]
fn test_shapes_intersecting() {
    let mut diagram = Diagram::new();
    let a = diagram.register_shape(rect_at(100.0, 100.0));
    let b = diagram.register_shape(rect_at(300.0, 100.0));
    diagram.register_shape(rect_at(100.0, 400.0));

    let area = Rect::from_corners(Vec2::new(150.0, 50.0), Vec2::new(320.0, 120.0));
    assert_eq!(diagram.shapes_intersecting(&area), vec![a, b]);
}

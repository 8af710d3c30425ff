use std::time::{Duration, Instant};

use diagram_canvas::model::BorderDirection;
use diagram_canvas::render::DrawCommand;
use diagram_canvas::{PointerEvent, RenderList, Shape, ShapeStyle, Surface, SurfaceConfig};
use glam::{Vec2, Vec4};

fn create_surface() -> Surface<RenderList> {
    Surface::new(RenderList::new(Vec2::new(640.0, 480.0)), SurfaceConfig::default()).unwrap()
}

#[test]
fn test_paint_order() {
    let mut surface = create_surface();
    let style = ShapeStyle {
        fill_style: Some(Vec4::new(1.0, 1.0, 1.0, 1.0)),
        ..Default::default()
    };
    let a = surface.register_shape(Shape::rect(Vec2::new(10.0, 10.0), 50.0, 50.0, style));
    let b = surface.register_shape(Shape::circle(
        Vec2::new(200.0, 200.0),
        25.0,
        ShapeStyle::default(),
    ));
    let c = surface.register_shape(Shape::rect(
        Vec2::new(300.0, 10.0),
        50.0,
        50.0,
        ShapeStyle::default(),
    ));
    surface
        .connect(a, BorderDirection::Right, c, BorderDirection::Left)
        .unwrap();
    assert!(surface.diagram().shape(b).is_some());

    surface.draw();
    let commands = surface.backend().commands();

    assert_eq!(
        commands[0],
        DrawCommand::ClearRect {
            pos: Vec2::ZERO,
            size: Vec2::new(640.0, 480.0),
        }
    );
    assert_eq!(
        commands[2],
        DrawCommand::Rect {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(50.0, 50.0),
        }
    );
    assert!(matches!(commands[3], DrawCommand::Fill(_)));

    let circle = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Arc { .. }))
        .unwrap();
    let last_rect = commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Rect { .. }))
        .unwrap();
    let line = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::MoveTo(_)))
        .unwrap();

    // Shapes bottom to top, lines over every shape
    assert!(circle < last_rect);
    assert!(last_rect < line);
    assert_eq!(commands[line], DrawCommand::MoveTo(Vec2::new(60.0, 35.0)));
    assert_eq!(surface.backend().paint_count(), 1);
}

#[test]
fn test_rubber_band_overlay() {
    let mut surface = create_surface();

    surface.handle_event(PointerEvent::down(Vec2::new(100.0, 100.0)));
    surface.handle_event(PointerEvent::moved(Vec2::new(40.0, 160.0)));
    surface.draw();

    let commands = surface.backend().commands();
    assert!(commands.contains(&DrawCommand::Rect {
        pos: Vec2::new(40.0, 100.0),
        size: Vec2::new(60.0, 60.0),
    }));
    let dashed = commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Stroke(s) if s.dash == vec![10.0, 10.0]));
    assert!(dashed);
}

#[test]
fn test_redraw_is_coalesced() {
    let mut surface = create_surface();
    let t0 = Instant::now();

    // Nothing requested yet
    assert!(!surface.flush(t0));

    surface.register_shape(Shape::rect(Vec2::ZERO, 10.0, 10.0, ShapeStyle::default()));
    assert!(surface.needs_redraw());
    assert!(surface.flush(t0));
    assert!(!surface.needs_redraw());

    // A burst of moves inside one batch window paints once
    for x in 0..50 {
        surface.handle_event(PointerEvent::moved(Vec2::new(x as f32 % 10.0, 5.0)));
        surface.request_redraw();
    }
    assert!(!surface.flush(t0 + Duration::from_millis(5)));
    assert!(surface.flush(t0 + Duration::from_millis(20)));
    assert!(!surface.flush(t0 + Duration::from_millis(40)));

    assert_eq!(surface.backend().paint_count(), 2);
}

#[test]
fn test_every_paint_clears_first() {
    let mut surface = create_surface();
    surface.register_shape(Shape::rect(Vec2::ZERO, 10.0, 10.0, ShapeStyle::default()));

    surface.draw();
    surface.backend_mut().take();
    surface.draw();

    let commands = surface.backend().commands();
    assert!(matches!(commands[0], DrawCommand::ClearRect { .. }));
    assert_eq!(surface.backend().paint_count(), 1);
}

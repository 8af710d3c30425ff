use diagram_canvas::model::BorderDirection;
use diagram_canvas::{
    PointerEvent, RenderList, Shape, ShapeStyle, Surface, SurfaceConfig, SurfaceEvent,
};
use glam::{Vec2, Vec4};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== DiagramCanvas Headless Demo ===");

    // 1. Bind a surface to a recording backend (simulating a 1280x720 canvas)
    let backend = RenderList::new(Vec2::new(1280.0, 720.0));
    let mut surface = match Surface::new(backend, SurfaceConfig::default()) {
        Ok(surface) => surface,
        Err(err) => {
            eprintln!("Failed to create surface: {err}");
            return;
        }
    };

    // 2. Populate the diagram
    let red = ShapeStyle {
        fill_style: Some(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        highlight: diagram_canvas::config::PaintStyle {
            fill_style: Some(Vec4::new(1.0, 0.5, 0.5, 1.0)),
            stroke_style: None,
        },
        ..Default::default()
    };
    let a = surface.register_shape(Shape::rect(Vec2::new(100.0, 100.0), 150.0, 100.0, red));
    let b = surface.register_shape(Shape::rect(
        Vec2::new(400.0, 200.0),
        150.0,
        100.0,
        ShapeStyle::default(),
    ));
    let c = surface.register_shape(Shape::rect(
        Vec2::new(400.0, 450.0),
        150.0,
        100.0,
        ShapeStyle::default(),
    ));
    surface.connect(b, BorderDirection::Bottom, c, BorderDirection::Top);
    println!("Registered {} shapes", surface.diagram().shape_count());

    // 3. Connect A's right border to B's left border with the pointer
    let gesture = [
        PointerEvent::moved(Vec2::new(175.0, 150.0)),
        PointerEvent::down(Vec2::new(250.0, 150.0)),
        PointerEvent::moved(Vec2::new(320.0, 220.0)),
        PointerEvent::moved(Vec2::new(400.0, 250.0)),
        PointerEvent::up(Vec2::new(400.0, 250.0)),
    ];
    for event in gesture {
        for outcome in surface.handle_event(event) {
            if let SurfaceEvent::Connected { from, to, .. } = outcome {
                println!("Connected {from:?} -> {to:?}");
            }
        }
    }

    // 4. Drag A around; its line follows
    for event in [
        PointerEvent::down(Vec2::new(175.0, 150.0)),
        PointerEvent::moved(Vec2::new(200.0, 400.0)),
        PointerEvent::up(Vec2::new(200.0, 400.0)),
    ] {
        for outcome in surface.handle_event(event) {
            if let SurfaceEvent::ShapesMoved { ids, delta } = outcome {
                println!("Moved {} shape(s) by {delta}", ids.len());
            }
        }
    }
    if let Some(shape) = surface.diagram().shape(a) {
        println!("Shape A is now at {}", shape.reference_point());
    }

    // 5. Paint
    surface.draw();
    let commands = surface.backend_mut().take();
    println!("Generated {} draw commands", commands.len());
    match serde_json::to_string_pretty(&commands[..commands.len().min(4)]) {
        Ok(json) => println!("First commands:\n{json}"),
        Err(err) => eprintln!("Failed to serialize commands: {err}"),
    }
}

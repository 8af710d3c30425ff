//! # DiagramCanvas
//!
//! `diagram_canvas` is an interactive 2D diagram surface. Rectangles and circles
//! can be dragged, hovered, and connected to each other with straight lines that
//! stay glued to their borders while shapes move.
//!
//! Painting is delegated to the host through the [`DrawingSurface`] trait; input is
//! fed in as [`PointerEvent`]s and significant outcomes come back as
//! [`SurfaceEvent`]s.
//!
//! ## Core Architecture
//! - **Model (`src/model`)**: Shapes and lines in flat arenas (SlotMap), plus connection points.
//! - **Interaction (`src/interaction`)**: One gesture state machine for drag, connect, hover, multi-select and pick.
//! - **Painter (`src/painter.rs`)**: Full clear-and-repaint of the diagram and gesture overlays.
//! - **Redraw (`src/redraw.rs`)**: Coalesces repaint requests into batches.

pub mod capability;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod model;
pub mod painter;
pub mod redraw;
pub mod render;
pub mod view;

use std::time::{Duration, Instant};

use glam::Vec2;

use geometry::Point;
use interaction::{Gesture, Interaction, ModeFlags, ShapeGroup};
use model::{LineId, ShapeId};
use redraw::RedrawScheduler;
use view::View;

// Re-exports for convenience
pub use capability::{Connectable, Drawable, Selectable};
pub use config::{LineStyle, ShapeStyle, SurfaceConfig};
pub use error::SurfaceError;
pub use input::{PointerEvent, PointerKind};
pub use interaction::{Behaviors, SurfaceEvent};
pub use model::{Diagram, Line, Shape};
pub use render::{DrawingSurface, RenderList};

/// The main entry point for the library.
///
/// A `Surface` owns the drawing backend, the diagram registry and the interaction
/// state. Pointer positions handed to it are in the embedding coordinate space and
/// are converted to surface-local coordinates using the configured origin.
pub struct Surface<B: DrawingSurface> {
    /// Configuration settings.
    pub config: SurfaceConfig,
    backend: B,
    view: View,
    diagram: Diagram,
    interaction: Interaction,
    behaviors: Behaviors,
    redraw: RedrawScheduler,
}

impl<B: DrawingSurface> Surface<B> {
    /// Binds a surface to a drawing backend.
    ///
    /// Fails if the backend has no usable drawing area or the configuration is invalid.
    pub fn new(backend: B, config: SurfaceConfig) -> Result<Self, SurfaceError> {
        config.validate()?;

        let size = backend.size();
        if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(SurfaceError::InvalidSurfaceSize {
                width: size.x,
                height: size.y,
            });
        }

        tracing::info!(
            width = size.x,
            height = size.y,
            behaviors = ?config.behaviors,
            "Surface created"
        );

        Ok(Self {
            view: View::new(config.origin, size),
            behaviors: config.behaviors,
            redraw: RedrawScheduler::new(Duration::from_millis(config.redraw_interval_ms)),
            diagram: Diagram::new(),
            interaction: Interaction::default(),
            backend,
            config,
        })
    }

    // --- Registry ---

    /// Adds a shape on top of the others and schedules a repaint.
    pub fn register_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.diagram.register_shape(shape);
        self.redraw.request();
        id
    }

    /// Removes a shape together with its attached lines.
    ///
    /// A gesture involving the shape is aborted first; hover and selection forget it.
    pub fn unregister_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let mut events = Vec::new();
        self.interaction
            .forget_shape(id, &mut self.diagram, &mut events);
        let shape = self.diagram.unregister_shape(id)?;
        self.redraw.request();
        Some(shape)
    }

    pub fn register_line(&mut self, line: Line) -> LineId {
        let id = self.diagram.register_line(line);
        self.redraw.request();
        id
    }

    pub fn unregister_line(&mut self, id: LineId) -> Option<Line> {
        self.interaction.forget_line(id);
        let line = self.diagram.unregister_line(id)?;
        self.redraw.request();
        Some(line)
    }

    /// Connects two shapes programmatically. See [`Diagram::connect`].
    pub fn connect(
        &mut self,
        from: ShapeId,
        from_border: model::BorderDirection,
        to: ShapeId,
        to_border: model::BorderDirection,
    ) -> Option<LineId> {
        let style = self.config.connection_style.clone();
        let id = self.diagram.connect(from, from_border, to, to_border, style)?;
        self.redraw.request();
        Some(id)
    }

    /// Moves a shape's reference point to `reference`, carrying its lines along.
    pub fn place_shape(&mut self, id: ShapeId, reference: Vec2) {
        self.diagram.place_shape(id, reference);
        self.redraw.request();
    }

    /// The topmost shape under a surface-local point.
    pub fn select_shape(&self, point: Point) -> Option<ShapeId> {
        self.diagram.select_shape(point)
    }

    /// The topmost line under a surface-local point.
    pub fn select_line(&self, point: Point) -> Option<LineId> {
        self.diagram.select_line(point)
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Mutable access to a shape, e.g. to restyle it. Schedules a repaint.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.redraw.request();
        self.diagram.shape_mut(id)
    }

    /// Mutable access to a line, e.g. to restyle it. Schedules a repaint.
    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.redraw.request();
        self.diagram.line_mut(id)
    }

    // --- Painting ---

    /// Repaints the whole surface immediately.
    pub fn draw(&mut self) {
        self.paint(Instant::now());
    }

    /// Repaints if a repaint is pending and the batch interval has elapsed.
    ///
    /// Meant to be called from the host's frame loop. Returns true if it painted.
    pub fn flush(&mut self, now: Instant) -> bool {
        if !self.redraw.is_due(now) {
            return false;
        }
        self.paint(now);
        true
    }

    pub fn request_redraw(&mut self) {
        self.redraw.request();
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.is_dirty()
    }

    fn paint(&mut self, now: Instant) {
        painter::Painter::paint(
            &mut self.backend,
            &self.diagram,
            &self.interaction,
            &self.config,
        );
        self.redraw.mark_painted(now);
    }

    // --- Behaviors ---

    /// Enables the given behaviors.
    pub fn mount(&mut self, behaviors: Behaviors) {
        self.behaviors.insert(behaviors);
        tracing::info!(behaviors = ?self.behaviors, "Behaviors mounted");
    }

    /// Disables the given behaviors.
    ///
    /// A gesture owned by a removed behavior ends immediately; an in-flight connection
    /// is rolled back.
    pub fn unmount(&mut self, behaviors: Behaviors) -> Vec<SurfaceEvent> {
        let removed = self.behaviors & behaviors;
        self.behaviors.remove(behaviors);
        tracing::info!(behaviors = ?self.behaviors, "Behaviors unmounted");

        let mut events = Vec::new();
        self.interaction
            .unmount(removed, &mut self.diagram, &mut events);
        self.absorb(&events);
        events
    }

    /// Mounts or unmounts `behaviors`.
    pub fn change_mode(&mut self, behaviors: Behaviors, enabled: bool) -> Vec<SurfaceEvent> {
        if enabled {
            self.mount(behaviors);
            Vec::new()
        } else {
            self.unmount(behaviors)
        }
    }

    pub fn behaviors(&self) -> Behaviors {
        self.behaviors
    }

    /// Which gesture, if any, is in progress.
    pub fn mode(&self) -> ModeFlags {
        self.interaction.mode()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.interaction.gesture
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.interaction.hovered
    }

    pub fn selection(&self) -> Option<&ShapeGroup> {
        self.interaction.selection.as_ref()
    }

    // --- Input ---

    /// Feeds one pointer event through the mounted behaviors.
    ///
    /// Returns what happened; repaints are scheduled internally and also reported as
    /// a single `RepaintNeeded`.
    pub fn handle_event(&mut self, event: PointerEvent) -> Vec<SurfaceEvent> {
        let point = self.view.to_local(event.position);
        let mut events = Vec::new();

        interaction::handle_pointer(
            &mut self.interaction,
            self.behaviors,
            &self.config,
            event.kind,
            point,
            &mut self.diagram,
            &mut events,
        );

        self.absorb(&events);
        events
    }

    fn absorb(&mut self, events: &[SurfaceEvent]) {
        if events.contains(&SurfaceEvent::RepaintNeeded) {
            self.redraw.request();
        }
    }

    // --- View ---

    /// Moves the surface within the embedding coordinate space.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.view.origin = origin;
        self.config.origin = origin;
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

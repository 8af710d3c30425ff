//! # Rendering System
//!
//! The Surface never rasterizes anything itself. It paints through the
//! `DrawingSurface` trait, a minimal 2D path API that the host implements on top
//! of whatever backend it has (HTML canvas, tiny-skia, wgpu, ...).
//!
//! `RenderList` is the bundled implementation: it records a display list of
//! `DrawCommand`s that the host can replay, and it is what the tests inspect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{Color, LineCap};

/// Parameters of a stroke operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color (RGBA, 0.0 - 1.0).
    pub color: Color,
    /// Thickness in pixels.
    pub width: f32,
    /// End cap style.
    pub cap: LineCap,
    /// Dash pattern; empty for a solid stroke.
    pub dash: Vec<f32>,
}

/// The drawing backend consumed by the Surface.
///
/// Coordinates are surface-local pixels. Paths follow the usual canvas model:
/// `begin_path` starts a new path, path segments are appended, and `fill` /
/// `stroke` paint the current path.
pub trait DrawingSurface {
    /// Size of the drawable area in pixels.
    fn size(&self) -> Vec2;
    /// Clears a rectangular region to transparent.
    fn clear_rect(&mut self, pos: Vec2, size: Vec2);
    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);
    /// Appends a closed rectangle to the current path.
    fn rect(&mut self, pos: Vec2, size: Vec2);
    /// Appends a circular arc (angles in radians, clockwise) to the current path.
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);
    /// Starts a new sub-path at `point`.
    fn move_to(&mut self, point: Vec2);
    /// Appends a straight segment to `point`.
    fn line_to(&mut self, point: Vec2);
    /// Fills the current path.
    fn fill(&mut self, color: Color);
    /// Strokes the current path.
    fn stroke(&mut self, stroke: &Stroke);
}

/// A single recorded drawing primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    ClearRect { pos: Vec2, size: Vec2 },
    BeginPath,
    Rect { pos: Vec2, size: Vec2 },
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    MoveTo(Vec2),
    LineTo(Vec2),
    Fill(Color),
    Stroke(Stroke),
}

/// A `DrawingSurface` that records every call as a `DrawCommand`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RenderList {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RenderList {
    /// Creates an empty list for a surface of the given size.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last `take`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands, e.g. once per frame after replaying them.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `ClearRect` commands recorded, i.e. full repaints.
    pub fn paint_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::ClearRect { .. }))
            .count()
    }
}

impl DrawingSurface for RenderList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::ClearRect { pos, size });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn rect(&mut self, pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect { pos, size });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn move_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.commands.push(DrawCommand::Stroke(stroke.clone()));
    }
}

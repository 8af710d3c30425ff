//! # Configuration
//!
//! This module defines the style options accepted by shapes and lines, and the
//! configuration struct for the Surface.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::interaction::Behaviors;

/// RGBA color, each channel in `0.0 - 1.0`.
pub type Color = Vec4;

/// Default border width of a shape in pixels.
pub const DEFAULT_SHAPE_LINE_WIDTH: f32 = 2.0;
/// Default stroke width of a line in pixels.
pub const DEFAULT_LINE_WIDTH: f32 = 6.0;

/// How the ends of a stroked line are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// A pair of optional fill/stroke colors.
///
/// Used for the highlight and hover-slot substitutions and for draw-time overrides.
/// An unset field falls through to the next style in line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintStyle {
    pub fill_style: Option<Color>,
    pub stroke_style: Option<Color>,
}

/// Visual style of a Shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Fill color. `None` leaves the interior transparent.
    pub fill_style: Option<Color>,
    /// Border color. `None` skips the border stroke.
    pub stroke_style: Option<Color>,
    /// Border width in pixels. Default: 2.0.
    pub line_width: f32,
    /// Colors used instead of the base ones while the shape is highlighted.
    pub highlight: PaintStyle,
    /// Colors of the hover-slot marker.
    pub hover_slot: PaintStyle,
    /// Dash pattern for the border. Empty means solid.
    pub dash_segments: Vec<f32>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_style: None,
            stroke_style: Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            line_width: DEFAULT_SHAPE_LINE_WIDTH,
            highlight: PaintStyle::default(),
            hover_slot: PaintStyle {
                fill_style: Some(Vec4::new(1.0, 1.0, 1.0, 1.0)),
                stroke_style: Some(Vec4::new(0.2, 0.5, 1.0, 1.0)),
            },
            dash_segments: Vec::new(),
        }
    }
}

impl ShapeStyle {
    /// Replaces unusable widths with the default.
    pub fn normalized(mut self) -> Self {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            self.line_width = DEFAULT_SHAPE_LINE_WIDTH;
        }
        self.dash_segments.retain(|s| s.is_finite() && *s >= 0.0);
        self
    }

    pub fn half_line_width(&self) -> f32 {
        self.line_width / 2.0
    }

    /// Resolves the fill and stroke colors to paint with.
    ///
    /// Precedence is override > highlight > base, field by field.
    pub fn resolve(&self, highlighted: bool, overrides: Option<&PaintStyle>) -> PaintStyle {
        let highlight = if highlighted {
            self.highlight
        } else {
            PaintStyle::default()
        };

        PaintStyle {
            fill_style: overrides
                .and_then(|o| o.fill_style)
                .or(highlight.fill_style)
                .or(self.fill_style),
            stroke_style: overrides
                .and_then(|o| o.stroke_style)
                .or(highlight.stroke_style)
                .or(self.stroke_style),
        }
    }
}

/// Visual style of a Line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Stroke color.
    pub stroke_style: Color,
    /// Stroke width in pixels. Default: 6.0.
    pub line_width: f32,
    /// Cap style. Default: round.
    pub line_cap: LineCap,
    /// Dash pattern. Empty means solid.
    pub dash_segments: Vec<f32>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke_style: Vec4::new(0.0, 0.0, 0.0, 1.0),
            line_width: DEFAULT_LINE_WIDTH,
            line_cap: LineCap::Round,
            dash_segments: Vec::new(),
        }
    }
}

impl LineStyle {
    /// Replaces unusable widths with the default.
    pub fn normalized(mut self) -> Self {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            self.line_width = DEFAULT_LINE_WIDTH;
        }
        self.dash_segments.retain(|s| s.is_finite() && *s >= 0.0);
        self
    }
}

/// Configuration parameters for the Surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Top-left of the surface in the embedding coordinate space.
    /// Subtracted from every pointer position. Default: (0, 0).
    pub origin: Vec2,
    /// Minimum time between two coalesced repaints. Default: 16ms.
    pub redraw_interval_ms: u64,
    /// Interaction behaviors mounted at construction.
    pub behaviors: Behaviors,
    /// Style of lines created by connect gestures.
    pub connection_style: LineStyle,
    /// Style of the rubber-band rectangle drawn during multi-select.
    pub selection_mask: ShapeStyle,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            redraw_interval_ms: 16,
            behaviors: Behaviors::default(),
            connection_style: LineStyle::default(),
            selection_mask: ShapeStyle {
                fill_style: Some(Vec4::new(1.0, 1.0, 1.0, 0.7)),
                stroke_style: Some(Vec4::new(0.4, 0.4, 0.8, 1.0)),
                line_width: 1.0,
                dash_segments: vec![10.0, 10.0],
                ..Default::default()
            },
        }
    }
}

impl SurfaceConfig {
    /// Parses a configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SurfaceError> {
        let config: SurfaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the surface cannot work with.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if !self.origin.is_finite() {
            return Err(SurfaceError::InvalidConfig(format!(
                "origin must be finite, got {}",
                self.origin
            )));
        }
        if !(self.connection_style.line_width.is_finite()
            && self.connection_style.line_width > 0.0)
        {
            return Err(SurfaceError::InvalidConfig(format!(
                "connection_style.line_width must be positive, got {}",
                self.connection_style.line_width
            )));
        }
        Ok(())
    }
}

use glam::Vec2;

use crate::capability::Drawable;
use crate::config::SurfaceConfig;
use crate::interaction::{Gesture, Interaction, select};
use crate::model::Diagram;
use crate::render::DrawingSurface;

/// Paints a whole surface.
///
/// Every paint is a full clear-and-repaint, in this order:
/// - Clear the full drawing area
/// - Shapes, bottom to top (each with its hover slot)
/// - Lines, in registration order
/// - Gesture overlays: the rubber band, then the pick ghost
pub struct Painter;

impl Painter {
    pub fn paint(
        surface: &mut dyn DrawingSurface,
        diagram: &Diagram,
        interaction: &Interaction,
        config: &SurfaceConfig,
    ) {
        let size = surface.size();
        surface.clear_rect(Vec2::ZERO, size);

        diagram.draw(surface);

        Self::draw_overlays(surface, interaction, config);
    }

    fn draw_overlays(
        surface: &mut dyn DrawingSurface,
        interaction: &Interaction,
        config: &SurfaceConfig,
    ) {
        match &interaction.gesture {
            Gesture::MultiSelecting { anchor, current } => {
                select::selection_mask(*anchor, *current, &config.selection_mask)
                    .draw(surface, None);
            }
            Gesture::Picking { ghost, .. } => ghost.draw(surface, None),
            _ => {}
        }
    }
}

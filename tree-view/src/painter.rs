//! Raster backend drawing branches with an [`egui::Painter`].

use glam::DVec2;
use tree_core::{Canvas, Rgb, Segment};

/// Maps tree coordinates to screen coordinates.
///
/// Tree coordinates already have `y` growing downward, so no flip is
/// applied. `focus` is the tree point shown at the center of `rect` when
/// `pan` is zero.
#[derive(Clone, Copy, Debug)]
pub struct ScreenTransform {
    pub rect: egui::Rect,
    pub focus: DVec2,
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl ScreenTransform {
    pub fn world_to_screen(&self, p: DVec2) -> egui::Pos2 {
        let center = self.rect.center();
        let local = (p - self.focus).as_vec2();
        egui::pos2(
            center.x + local.x * self.zoom + self.pan.x,
            center.y + local.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`ScreenTransform::world_to_screen`] up to rounding.
    pub fn screen_to_world(&self, p: egui::Pos2) -> DVec2 {
        let center = self.rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (p.y - center.y - self.pan.y) / self.zoom;
        self.focus + DVec2::new(x as f64, y as f64)
    }
}

/// A [`Canvas`] over an egui painter; stroke widths scale with zoom.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    transform: ScreenTransform,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, transform: ScreenTransform) -> Self {
        Self { painter, transform }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn draw_segment(&mut self, segment: Segment, color: Rgb, thickness: f64) {
        let a = self.transform.world_to_screen(segment.start);
        let b = self.transform.world_to_screen(segment.end);
        let width = (thickness as f32 * self.transform.zoom).max(1.0);
        self.painter.line_segment(
            [a, b],
            egui::Stroke::new(width, egui::Color32::from_rgb(color.r, color.g, color.b)),
        );
    }
}

//! [`Surface`] implementation over an egui painter.

use egui::{Align2, CornerRadius, FontId, Painter, Stroke, StrokeKind, Vec2, pos2};
use gridpaint_core::geometry::{Point, Rect, Size};
use gridpaint_core::{Color, Icon, ImageRef, Surface};

use crate::textures::TextureCache;
use crate::{icons, to_color32, to_egui_rect, to_pos2};

/// Draws editor output into an egui painter, shifted by `offset`.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    textures: &'a mut TextureCache,
    offset: Vec2,
}

impl<'a> EguiSurface<'a> {
    /// `offset` is the screen position of the editor's origin.
    pub fn new(painter: &'a Painter, textures: &'a mut TextureCache, offset: Vec2) -> Self {
        Self {
            painter,
            textures,
            offset,
        }
    }

    fn rect(&self, rect: Rect) -> egui::Rect {
        to_egui_rect(rect).translate(self.offset)
    }
}

impl Surface for EguiSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter.rect_filled(self.rect(rect), CornerRadius::ZERO, to_color32(color));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.painter.rect_stroke(
            self.rect(rect),
            CornerRadius::ZERO,
            Stroke::new(width as f32, to_color32(color)),
            StrokeKind::Inside,
        );
    }

    fn draw_image(&mut self, image: ImageRef<'_>, rect: Rect) {
        let id = self.textures.texture_id(self.painter.ctx(), image);
        let uv = egui::Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter.image(id, self.rect(rect), uv, egui::Color32::WHITE);
    }

    fn draw_icon(&mut self, icon: Icon, rect: Rect, tint: Color) {
        icons::paint_icon(self.painter, icon, self.rect(rect), to_color32(tint));
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Color) {
        self.painter.text(
            to_pos2(position) + self.offset,
            Align2::LEFT_TOP,
            text,
            FontId::proportional(font_size as f32),
            to_color32(color),
        );
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(font_size as f32),
            egui::Color32::PLACEHOLDER,
        );
        let size = galley.size();
        Size::new(size.x as f64, size.y as f64)
    }
}


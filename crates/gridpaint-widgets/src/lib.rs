//! egui backend for the GridPaint widgets.
//!
//! - **Surface**: [`EguiSurface`] implements the core `Surface` trait on top of an egui painter
//! - **Textures**: [`TextureCache`] keeps canvas and cursor bitmaps uploaded between frames
//! - **Icons**: vector glyphs for the tool buttons and cursors

pub mod icons;
pub mod surface;
pub mod textures;

pub use icons::paint_icon;
pub use surface::EguiSurface;
pub use textures::TextureCache;

use gridpaint_core::Color;
use gridpaint_core::geometry::{Point, Rect};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Stroke width of icon outlines
    pub const ICON_STROKE: f32 = 1.5;
}

/// Convert a canvas colour to egui's.
pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn to_pos2(point: Point) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

pub fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.x0 as f32, rect.y0 as f32),
        egui::pos2(rect.x1 as f32, rect.y1 as f32),
    )
}

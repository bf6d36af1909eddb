//! Rendering surface abstraction.
//!
//! Widgets draw through the [`Surface`] trait so layout and hit-testing can
//! be exercised without a window. The egui implementation lives in the
//! widgets crate; [`RecordingSurface`] is a headless implementation that
//! keeps a list of the issued commands.

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Built-in glyphs used for tool buttons and cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Pencil,
    Marker,
    Eraser,
    ColorPicker,
}

/// A bitmap handed to [`Surface::draw_image`].
///
/// `key` names the image across frames and `revision` changes whenever its
/// pixels do, so GPU-backed surfaces can cache uploads.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pub key: &'a str,
    pub revision: u64,
    pub pixels: &'a RgbaImage,
}

/// Trait for drawing backends.
pub trait Surface {
    /// Fill a rectangle with a solid colour.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle, stroke drawn inside its bounds.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color);

    /// Draw a bitmap stretched over `rect`.
    fn draw_image(&mut self, image: ImageRef<'_>, rect: Rect);

    /// Draw a built-in icon fitted to `rect`.
    fn draw_icon(&mut self, icon: Icon, rect: Rect, tint: Color);

    /// Draw a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Color);

    /// Measure a single line of text.
    fn measure_text(&self, text: &str, font_size: f64) -> Size;
}

/// A command captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, width: f64, color: Color },
    Image { key: String, revision: u64, rect: Rect },
    Icon { icon: Icon, rect: Rect },
    Text { text: String, position: Point },
}

/// Headless surface that records draw calls.
///
/// Text is measured with a fixed advance of `0.6 * font_size` per character.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since creation or the last [`clear`](Self::clear).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn draw_image(&mut self, image: ImageRef<'_>, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            key: image.key.to_string(),
            revision: image.revision,
            rect,
        });
    }

    fn draw_icon(&mut self, icon: Icon, rect: Rect, _tint: Color) {
        self.commands.push(DrawCommand::Icon { icon, rect });
    }

    fn draw_text(&mut self, text: &str, position: Point, _font_size: f64, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
        });
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        Size::new(text.chars().count() as f64 * font_size * 0.6, font_size)
    }
}

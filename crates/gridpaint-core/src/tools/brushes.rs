//! The concrete drawing tools.

use super::cursor::{CursorAffordance, eraser_ring};
use super::{DrawingTool, StrokeSample, ToolKind, ToolSize};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::surface::Icon;
use kurbo::Point;

/// Call `stamp` at every integer position along the segment from the
/// previous sample to the current one, so fast drags leave no gaps.
fn stamp_segment(canvas: &mut Canvas, sample: &StrokeSample, mut stamp: impl FnMut(&mut Canvas, i64, i64)) {
    let to = sample.point;
    let from = sample.previous.unwrap_or(to);
    let steps = (to - from).hypot().ceil().max(1.0) as usize;
    for i in 0..=steps {
        let p = from.lerp(to, i as f64 / steps as f64);
        stamp(canvas, p.x.floor() as i64, p.y.floor() as i64);
    }
}

/// Hard-edged square dabs.
#[derive(Debug, Clone)]
pub struct Pencil {
    size: ToolSize,
    cursor: CursorAffordance,
}

impl Default for Pencil {
    fn default() -> Self {
        Self {
            size: ToolSize::Small,
            cursor: CursorAffordance::Icon(Icon::Pencil),
        }
    }
}

impl DrawingTool for Pencil {
    fn kind(&self) -> ToolKind {
        ToolKind::Pencil
    }

    fn size(&self) -> ToolSize {
        self.size
    }

    fn set_size(&mut self, size: ToolSize) {
        self.size = size;
    }

    fn cursor(&self) -> &CursorAffordance {
        &self.cursor
    }

    fn begin_or_continue_stroke(&mut self, canvas: &mut Canvas, sample: &StrokeSample) {
        let side = self.size.px() as i64;
        let half = (side - 1) / 2;
        let color = sample.color();
        stamp_segment(canvas, sample, |c, x, y| c.fill_block(x - half, y - half, side, side, color));
    }
}

/// Round dabs, twice the pencil's width.
#[derive(Debug, Clone)]
pub struct Marker {
    size: ToolSize,
    cursor: CursorAffordance,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            size: ToolSize::Medium,
            cursor: CursorAffordance::Icon(Icon::Marker),
        }
    }
}

impl DrawingTool for Marker {
    fn kind(&self) -> ToolKind {
        ToolKind::Marker
    }

    fn size(&self) -> ToolSize {
        self.size
    }

    fn set_size(&mut self, size: ToolSize) {
        self.size = size;
    }

    fn cursor(&self) -> &CursorAffordance {
        &self.cursor
    }

    fn begin_or_continue_stroke(&mut self, canvas: &mut Canvas, sample: &StrokeSample) {
        let radius = self.size.px() as i64;
        let color = sample.color();
        stamp_segment(canvas, sample, |c, x, y| c.fill_disc(x, y, radius, color));
    }
}

/// Paints the canvas background; its cursor outlines the footprint.
#[derive(Debug, Clone)]
pub struct Eraser {
    size: ToolSize,
    cursor: CursorAffordance,
}

impl Default for Eraser {
    fn default() -> Self {
        let size = ToolSize::Medium;
        Self {
            size,
            cursor: CursorAffordance::Bitmap(eraser_ring(size)),
        }
    }
}

impl DrawingTool for Eraser {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn size(&self) -> ToolSize {
        self.size
    }

    /// Also regenerates the ring cursor, which is read right after.
    fn set_size(&mut self, size: ToolSize) {
        self.size = size;
        self.cursor = CursorAffordance::Bitmap(eraser_ring(size));
    }

    fn cursor(&self) -> &CursorAffordance {
        &self.cursor
    }

    fn begin_or_continue_stroke(&mut self, canvas: &mut Canvas, sample: &StrokeSample) {
        let side = self.size.eraser_side() as i64;
        let half = side / 2;
        let background = canvas.background();
        stamp_segment(canvas, sample, |c, x, y| {
            c.fill_block(x - half, y - half, side, side, background)
        });
    }
}

/// Samples the canvas under the pointer.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    picked: Option<Color>,
    cursor: CursorAffordance,
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self {
            picked: None,
            cursor: CursorAffordance::Icon(Icon::ColorPicker),
        }
    }
}

impl ColorPicker {
    /// Colour under the pointer at the last stroke sample.
    pub fn picked_color(&self) -> Option<Color> {
        self.picked
    }

    pub fn clear_pick(&mut self) {
        self.picked = None;
    }
}

impl DrawingTool for ColorPicker {
    fn kind(&self) -> ToolKind {
        ToolKind::ColorPicker
    }

    fn is_sizeable(&self) -> bool {
        false
    }

    fn size(&self) -> ToolSize {
        ToolSize::Small
    }

    fn set_size(&mut self, _size: ToolSize) {}

    fn cursor(&self) -> &CursorAffordance {
        &self.cursor
    }

    fn mutates_canvas(&self) -> bool {
        false
    }

    fn begin_or_continue_stroke(&mut self, canvas: &mut Canvas, sample: &StrokeSample) {
        let Point { x, y } = sample.point;
        if let Some(color) = canvas.pixel(x.floor() as i64, y.floor() as i64) {
            self.picked = Some(color);
        }
    }
}

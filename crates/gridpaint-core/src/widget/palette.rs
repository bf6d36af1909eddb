//! Colour palette: a fixed grid of colour swatches plus a preview cell.

use super::layout::{GridLayout, GridMetrics, grid_cells, wrap_index};
use super::{BoundsCache, CellPos, GridWidget, SelectionState, theme};
use crate::color::{Color, WHITE, rgb};
use crate::geometry::{Point, Rect, Size, Vec2};
use crate::surface::Surface;

/// The classic 28-colour paint palette, two rows of fourteen.
pub fn classic_colors() -> Vec<Color> {
    vec![
        rgb(0, 0, 0),
        rgb(128, 128, 128),
        rgb(128, 0, 0),
        rgb(128, 128, 0),
        rgb(0, 128, 0),
        rgb(0, 128, 128),
        rgb(0, 0, 128),
        rgb(128, 0, 128),
        rgb(128, 128, 64),
        rgb(0, 64, 64),
        rgb(0, 128, 255),
        rgb(0, 64, 128),
        rgb(64, 0, 255),
        rgb(128, 64, 0),
        rgb(255, 255, 255),
        rgb(192, 192, 192),
        rgb(255, 0, 0),
        rgb(255, 255, 0),
        rgb(0, 255, 0),
        rgb(0, 255, 255),
        rgb(0, 0, 255),
        rgb(255, 0, 255),
        rgb(255, 255, 128),
        rgb(0, 255, 128),
        rgb(128, 255, 255),
        rgb(128, 128, 255),
        rgb(255, 0, 128),
        rgb(255, 128, 64),
    ]
}

/// Computed palette layout: preview cell, swatch grid and outer box.
struct PaletteLayout {
    preview: Rect,
    grid: GridLayout,
}

/// A rectangular grid of colour swatches.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Vec<Color>>,
    metrics: GridMetrics,
    primary: Color,
    secondary: Color,
    picked: Option<Color>,
    cache: BoundsCache,
    selection: SelectionState<CellPos>,
}

impl Palette {
    /// Build a palette from a flat list wrapped at `row_len`.
    ///
    /// A short final row is padded with white so the grid stays rectangular.
    pub fn new(colors: &[Color], row_len: usize, metrics: GridMetrics) -> Self {
        let row_len = row_len.max(1);
        let mut rows: Vec<Vec<Color>> = Vec::new();
        for (i, &color) in colors.iter().enumerate() {
            let (row, _) = wrap_index(i, row_len);
            if row == rows.len() {
                rows.push(Vec::with_capacity(row_len));
            }
            rows[row].push(color);
        }
        if let Some(last) = rows.last_mut() {
            if last.len() < row_len {
                log::warn!(
                    "Palette has {} colours, padding the last row to {}",
                    colors.len(),
                    row_len
                );
                last.resize(row_len, WHITE);
            }
        }

        Self {
            colors: rows,
            metrics,
            primary: colors.first().copied().unwrap_or(WHITE),
            secondary: WHITE,
            picked: None,
            cache: BoundsCache::new(),
            selection: SelectionState::new(),
        }
    }

    /// The classic 2x14 palette.
    pub fn classic(metrics: GridMetrics) -> Self {
        Self::new(&classic_colors(), 14, metrics)
    }

    pub fn rows(&self) -> usize {
        self.colors.len()
    }

    pub fn cols(&self) -> usize {
        self.colors.first().map_or(0, Vec::len)
    }

    pub fn color_at(&self, pos: CellPos) -> Option<Color> {
        self.colors.get(pos.row)?.get(pos.col).copied()
    }

    /// Colour of the most recently selected swatch.
    pub fn last_selected(&self) -> Option<Color> {
        self.selection.last_selected().and_then(|pos| self.color_at(pos))
    }

    pub fn last_selected_cell(&self) -> Option<CellPos> {
        self.selection.last_selected()
    }

    /// Cached on-screen rectangle of a swatch.
    pub fn cell_bounds(&self, pos: CellPos) -> Option<Rect> {
        self.cache.get(pos)
    }

    /// Colours shown in the preview cell.
    pub fn set_preview(&mut self, primary: Color, secondary: Color) {
        self.primary = primary;
        self.secondary = secondary;
    }

    /// Colour currently sampled by the picker, shown inside the preview.
    pub fn set_picked(&mut self, picked: Option<Color>) {
        self.picked = picked;
    }

    pub fn picked(&self) -> Option<Color> {
        self.picked
    }

    fn layout(&self, origin: Point) -> PaletteLayout {
        let m = &self.metrics;
        let gap = m.gap();
        let side = (self.rows() as f64 * m.step().y - gap).max(m.cell().height);
        let preview = Rect::from_origin_size(origin + Vec2::new(gap, gap), Size::new(side, side));

        let mut grid = grid_cells(Point::new(preview.x1, origin.y), self.rows(), self.cols(), m);
        grid.outer = grid
            .outer
            .union(Rect::new(origin.x, origin.y, preview.x1 + gap, preview.y1 + gap));
        PaletteLayout { preview, grid }
    }

    fn draw_preview(&self, preview: Rect, surface: &mut dyn Surface) {
        // Secondary swatch sits behind and below-right of the primary.
        let w = preview.width() * 0.6;
        let h = preview.height() * 0.6;
        let primary = Rect::from_origin_size(preview.origin(), Size::new(w, h));
        let secondary = Rect::from_origin_size(
            Point::new(preview.x1 - w, preview.y1 - h),
            Size::new(w, h),
        );
        surface.fill_rect(secondary, self.secondary);
        surface.stroke_rect(secondary, 1.0, theme::BORDER);
        surface.fill_rect(primary, self.primary);
        surface.stroke_rect(primary, 1.0, theme::BORDER);

        if let Some(picked) = self.picked {
            let inset = primary.inset(-w * 0.25);
            surface.fill_rect(inset, picked);
            surface.stroke_rect(inset, 1.0, theme::TEXT);
        }
    }
}

impl GridWidget for Palette {
    type Cell = CellPos;
    type Payload = Color;

    fn render(&mut self, origin: Point, surface: &mut dyn Surface) {
        let layout = self.layout(origin);
        self.cache.refresh(origin, &layout.grid);

        surface.fill_rect(layout.grid.outer, theme::PANEL_BG);
        self.draw_preview(layout.preview, surface);

        for (row, (colors, rects)) in self.colors.iter().zip(&layout.grid.cells).enumerate() {
            for (col, (&color, &rect)) in colors.iter().zip(rects).enumerate() {
                surface.fill_rect(rect, color);
                if self.selection.is_selected(CellPos::new(row, col)) {
                    surface.stroke_rect(rect, 2.0, theme::ACCENT);
                } else {
                    surface.stroke_rect(rect, 1.0, theme::BORDER);
                }
            }
        }
    }

    fn hit_test(&mut self, point: Point) -> Option<Color> {
        let pos = self.cache.hit(point)?;
        let color = self.color_at(pos)?;
        self.selection.select(pos);
        Some(color)
    }

    fn select(&mut self, cell: CellPos) {
        assert!(
            cell.row < self.rows() && cell.col < self.cols(),
            "palette cell {} out of range for {}x{} grid",
            cell,
            self.rows(),
            self.cols()
        );
        self.selection.select(cell);
    }

    fn outer_bounds(&self) -> Size {
        self.cache.outer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn palette() -> Palette {
        Palette::classic(GridMetrics::square(16.0, 2.0, 1.0))
    }

    fn center(rect: Rect) -> Point {
        rect.center()
    }

    #[test]
    fn test_classic_is_two_by_fourteen() {
        let p = palette();
        assert_eq!((p.rows(), p.cols()), (2, 14));
    }

    #[test]
    fn test_hit_cell_returns_its_color() {
        let mut p = palette();
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);

        let target = CellPos::new(1, 3);
        let rect = p.cell_bounds(target).unwrap();
        assert_eq!(p.hit_test(center(rect)), Some(rgb(255, 255, 0)));
        assert_eq!(p.last_selected(), Some(rgb(255, 255, 0)));
        assert_eq!(p.last_selected_cell(), Some(target));
    }

    #[test]
    fn test_hit_is_inclusive_on_edges() {
        let mut p = palette();
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);

        let target = CellPos::new(0, 5);
        let rect = p.cell_bounds(target).unwrap();
        for corner in [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ] {
            assert_eq!(p.hit_test(corner), p.color_at(target));
            assert_eq!(p.last_selected_cell(), Some(target));
        }
    }

    #[test]
    fn test_miss_keeps_selection() {
        let mut p = palette();
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);

        p.select(CellPos::new(0, 2));
        let outside = Point::new(-50.0, -50.0);
        assert_eq!(p.hit_test(outside), None);
        // The gap between two swatches is outside every cell.
        let a = p.cell_bounds(CellPos::new(0, 0)).unwrap();
        assert_eq!(p.hit_test(Point::new(a.x1 + 1.0, a.center().y)), None);
        assert_eq!(p.last_selected_cell(), Some(CellPos::new(0, 2)));
    }

    #[test]
    fn test_hit_before_render_misses() {
        let mut p = palette();
        assert_eq!(p.hit_test(Point::new(30.0, 10.0)), None);
        assert_eq!(p.outer_bounds(), Size::ZERO);
        assert_eq!(p.last_selected(), None);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut p = palette();
        let origin = Point::new(12.0, 40.0);
        let mut first = RecordingSurface::new();
        p.render(origin, &mut first);
        let bounds: Vec<_> = (0..2)
            .flat_map(|r| (0..14).map(move |c| CellPos::new(r, c)))
            .map(|pos| p.cell_bounds(pos))
            .collect();
        let outer = p.outer_bounds();

        let mut second = RecordingSurface::new();
        p.render(origin, &mut second);
        let again: Vec<_> = (0..2)
            .flat_map(|r| (0..14).map(move |c| CellPos::new(r, c)))
            .map(|pos| p.cell_bounds(pos))
            .collect();

        assert_eq!(bounds, again);
        assert_eq!(outer, p.outer_bounds());
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn test_moving_origin_moves_cells() {
        let mut p = palette();
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);
        let before = p.cell_bounds(CellPos::new(0, 0)).unwrap();
        p.render(Point::new(100.0, 0.0), &mut surface);
        let after = p.cell_bounds(CellPos::new(0, 0)).unwrap();
        assert_eq!(after.x0 - before.x0, 100.0);
    }

    #[test]
    fn test_short_preset_is_padded() {
        let p = Palette::new(&[rgb(1, 1, 1), rgb(2, 2, 2), rgb(3, 3, 3)], 2, GridMetrics::square(10.0, 1.0, 1.0));
        assert_eq!((p.rows(), p.cols()), (2, 2));
        assert_eq!(p.color_at(CellPos::new(1, 1)), Some(WHITE));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_out_of_range_panics() {
        let mut p = palette();
        p.select(CellPos::new(2, 0));
    }

    #[test]
    fn test_preview_shows_picked_color() {
        let mut p = palette();
        p.set_preview(rgb(1, 2, 3), rgb(4, 5, 6));
        p.set_picked(Some(rgb(7, 8, 9)));
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);
        let fills: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                crate::surface::DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert!(fills.contains(&rgb(1, 2, 3)));
        assert!(fills.contains(&rgb(4, 5, 6)));
        assert!(fills.contains(&rgb(7, 8, 9)));
    }

    #[test]
    fn test_outer_bounds_cover_preview_and_grid() {
        let mut p = palette();
        let mut surface = RecordingSurface::new();
        p.render(Point::ZERO, &mut surface);
        let last = p.cell_bounds(CellPos::new(1, 13)).unwrap();
        let outer = p.outer_bounds();
        assert!(outer.width >= last.x1);
        assert!(outer.height >= last.y1);
    }
}

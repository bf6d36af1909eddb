//! Tool box: a column-major grid of tools with a size selector beneath it.

use super::layout::{GridLayout, GridMetrics, column_strip, grid_cells};
use super::{BoundsCache, CellPos, GridWidget, SelectionState, theme};
use crate::geometry::{Point, Rect, RectExt, Size};
use crate::surface::Surface;
use crate::tools::{ToolKind, ToolSize};

/// Vertical strip of size buttons shown for sizeable tools.
#[derive(Debug, Clone, Default)]
struct SizeSelector {
    /// Set on every render from the selected tool.
    visible: bool,
    rects: Vec<Rect>,
    selection: SelectionState<ToolSize>,
}

/// Grid of tool buttons filled column by column.
#[derive(Debug, Clone)]
pub struct ToolBox {
    columns: Vec<Vec<ToolKind>>,
    max_column_len: usize,
    metrics: GridMetrics,
    cache: BoundsCache,
    selection: SelectionState<CellPos>,
    selector: SizeSelector,
}

impl ToolBox {
    /// Create an empty tool box whose columns hold at most `max_column_len` tools.
    pub fn new(max_column_len: usize, metrics: GridMetrics) -> Self {
        Self {
            columns: Vec::new(),
            max_column_len: max_column_len.max(1),
            metrics,
            cache: BoundsCache::new(),
            selection: SelectionState::new(),
            selector: SizeSelector::default(),
        }
    }

    /// Tool box holding every tool kind.
    pub fn with_tools(tools: &[ToolKind], max_column_len: usize, metrics: GridMetrics) -> Self {
        let mut toolbox = Self::new(max_column_len, metrics);
        for &kind in tools {
            toolbox.add_tool(kind);
        }
        toolbox
    }

    /// Append a tool to the last column, opening a new column once it is full.
    ///
    /// Returns the cell the tool landed in.
    pub fn add_tool(&mut self, kind: ToolKind) -> CellPos {
        let needs_column = self
            .columns
            .last()
            .is_none_or(|col| col.len() >= self.max_column_len);
        if needs_column {
            self.columns.push(Vec::with_capacity(self.max_column_len));
        }
        let col = self.columns.len() - 1;
        let column = &mut self.columns[col];
        column.push(kind);
        let pos = CellPos::new(column.len() - 1, col);

        self.cache.invalidate();
        log::debug!("Added {} at {}", kind.name(), pos);
        pos
    }

    pub fn rows(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn tool_at(&self, pos: CellPos) -> Option<ToolKind> {
        self.columns.get(pos.col)?.get(pos.row).copied()
    }

    /// Cell holding `kind`, scanning row-major like hit-testing does.
    pub fn position_of(&self, kind: ToolKind) -> Option<CellPos> {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| CellPos::new(row, col)))
            .find(|&pos| self.tool_at(pos) == Some(kind))
    }

    /// Select the button of `kind`, if present.
    pub fn select_tool(&mut self, kind: ToolKind) -> Option<CellPos> {
        let pos = self.position_of(kind)?;
        self.selection.select(pos);
        Some(pos)
    }

    pub fn selected_tool(&self) -> Option<ToolKind> {
        self.selection.last_selected().and_then(|pos| self.tool_at(pos))
    }

    pub fn cell_bounds(&self, pos: CellPos) -> Option<Rect> {
        self.cache.get(pos)
    }

    /// Whether the size selector is on screen: laid out by the last render
    /// and the selected tool still takes a size.
    pub fn selector_visible(&self) -> bool {
        self.selector.visible && self.selected_tool().is_some_and(ToolKind::is_sizeable)
    }

    /// Highlight a size in the selector.
    pub fn selector_select(&mut self, size: ToolSize) {
        self.selector.selection.select(size);
    }

    pub fn selector_selected(&self) -> Option<ToolSize> {
        self.selector.selection.last_selected()
    }

    /// Cached rectangle of a size button, if the selector has been laid out.
    pub fn selector_bounds(&self, size: ToolSize) -> Option<Rect> {
        self.selector.rects.get(size.index()).copied()
    }

    /// Map a point to a size button. Always a miss while the selector is hidden.
    pub fn selector_hit_test(&mut self, point: Point) -> Option<ToolSize> {
        if !self.selector_visible() {
            return None;
        }
        let index = self
            .selector
            .rects
            .iter()
            .position(|rect| rect.contains_inclusive(point))?;
        let size = ToolSize::ALL[index];
        self.selector.selection.select(size);
        Some(size)
    }

    fn layout(&self, origin: Point) -> GridLayout {
        let mut layout = grid_cells(origin, self.rows(), self.cols(), &self.metrics);
        // Rows past the end of a short trailing column have no cell.
        for (row, cells) in layout.cells.iter_mut().enumerate() {
            let filled = self.columns.iter().take_while(|col| row < col.len()).count();
            cells.truncate(filled);
        }
        layout
    }

    fn selector_layout(&self, grid: &GridLayout) -> Vec<Rect> {
        let gap = self.metrics.gap();
        let cell = Size::new(
            (grid.outer.width() - 2.0 * gap).max(0.0),
            self.metrics.cell().height / 2.0,
        );
        column_strip(Point::new(grid.outer.x0, grid.outer.y1), ToolSize::ALL.len(), cell, gap)
    }

    fn draw_selector(&self, surface: &mut dyn Surface) {
        for (&size, &rect) in ToolSize::ALL.iter().zip(&self.selector.rects) {
            let selected = self.selector.selection.is_selected(size);
            let bg = if selected { theme::SELECTED_BG } else { theme::BUTTON_BG };
            surface.fill_rect(rect, bg);
            surface.stroke_rect(rect, 1.0, if selected { theme::ACCENT } else { theme::BORDER });

            // Bar as thick as the stroke, clamped to the button.
            let thickness = (size.px() as f64 * self.metrics.scale)
                .min(rect.height() - 2.0)
                .max(1.0);
            let mid = rect.center().y;
            let bar = Rect::new(
                rect.x0 + rect.width() * 0.2,
                mid - thickness / 2.0,
                rect.x1 - rect.width() * 0.2,
                mid + thickness / 2.0,
            );
            surface.fill_rect(bar, theme::TEXT);
        }
    }
}

impl GridWidget for ToolBox {
    type Cell = CellPos;
    type Payload = ToolKind;

    fn render(&mut self, origin: Point, surface: &mut dyn Surface) {
        let mut layout = self.layout(origin);
        self.selector.visible = self.selected_tool().is_some_and(ToolKind::is_sizeable);
        self.selector.rects = self.selector_layout(&layout);
        if self.selector.visible {
            if let Some(last) = self.selector.rects.last() {
                layout.outer = layout.outer.union(Rect::new(
                    origin.x,
                    origin.y,
                    layout.outer.x1,
                    last.y1 + self.metrics.gap(),
                ));
            }
        }
        self.cache.refresh(origin, &layout);

        surface.fill_rect(layout.outer, theme::PANEL_BG);
        for (row, rects) in layout.cells.iter().enumerate() {
            for (col, &rect) in rects.iter().enumerate() {
                let pos = CellPos::new(row, col);
                let Some(kind) = self.tool_at(pos) else {
                    continue;
                };
                let selected = self.selection.is_selected(pos);
                surface.fill_rect(rect, if selected { theme::SELECTED_BG } else { theme::BUTTON_BG });
                surface.stroke_rect(rect, 1.0, if selected { theme::ACCENT } else { theme::BORDER });
                surface.draw_icon(kind.icon(), rect.inset(-rect.width() * 0.15), theme::TEXT);
            }
        }

        if self.selector.visible {
            self.draw_selector(surface);
        }
    }

    fn hit_test(&mut self, point: Point) -> Option<ToolKind> {
        let pos = self.cache.hit(point)?;
        let kind = self.tool_at(pos)?;
        self.selection.select(pos);
        Some(kind)
    }

    fn select(&mut self, cell: CellPos) {
        assert!(
            self.tool_at(cell).is_some(),
            "tool box cell {} out of range",
            cell
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
    use crate::surface::{DrawCommand, RecordingSurface};

    fn metrics() -> GridMetrics {
        GridMetrics::square(24.0, 2.0, 1.0)
    }

    fn rendered(toolbox: &mut ToolBox) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        toolbox.render(Point::new(0.0, 50.0), &mut surface);
        surface
    }

    #[test]
    fn test_ninth_tool_opens_second_column() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        let mut pos = CellPos::new(0, 0);
        for _ in ToolKind::ALL.len()..8 {
            pos = tb.add_tool(ToolKind::Pencil);
        }
        assert_eq!(pos, CellPos::new(7, 0));
        assert_eq!(tb.add_tool(ToolKind::Marker), CellPos::new(0, 1));
        assert_eq!(tb.cols(), 2);
        assert_eq!(tb.rows(), 8);
    }

    #[test]
    fn test_add_invalidates_bounds() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        rendered(&mut tb);
        assert!(tb.cell_bounds(CellPos::new(0, 0)).is_some());
        tb.add_tool(ToolKind::Eraser);
        assert_eq!(tb.cell_bounds(CellPos::new(0, 0)), None);

        rendered(&mut tb);
        assert!(tb.cell_bounds(CellPos::new(4, 0)).is_some());
    }

    #[test]
    fn test_columns_fill_top_to_bottom() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 2, metrics());
        rendered(&mut tb);
        assert_eq!(tb.tool_at(CellPos::new(1, 0)), Some(ToolKind::Marker));
        assert_eq!(tb.tool_at(CellPos::new(0, 1)), Some(ToolKind::Eraser));

        let eraser = tb.cell_bounds(CellPos::new(0, 1)).unwrap();
        assert_eq!(tb.hit_test(eraser.center()), Some(ToolKind::Eraser));
        assert_eq!(tb.selected_tool(), Some(ToolKind::Eraser));
    }

    #[test]
    fn test_short_trailing_column_has_no_phantom_cells() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL[..3], 2, metrics());
        rendered(&mut tb);
        assert_eq!(tb.cell_bounds(CellPos::new(1, 1)), None);
        // Where the missing cell would be, nothing matches.
        let below = tb.cell_bounds(CellPos::new(0, 1)).unwrap();
        let phantom = below.center() + crate::geometry::Vec2::new(0.0, metrics().step().y);
        assert_eq!(tb.hit_test(phantom), None);
    }

    #[test]
    fn test_selector_hidden_for_picker() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        tb.select_tool(ToolKind::Pencil);
        rendered(&mut tb);
        assert!(tb.selector_visible());
        let small = tb.selector_bounds(ToolSize::Small).unwrap();
        let visible_height = tb.outer_bounds().height;

        tb.select_tool(ToolKind::ColorPicker);
        rendered(&mut tb);
        assert!(!tb.selector_visible());
        // Stale rectangles are still cached, but nothing matches.
        assert_eq!(tb.selector_hit_test(small.center()), None);
        assert!(tb.outer_bounds().height < visible_height);
    }

    #[test]
    fn test_selecting_picker_hides_selector_before_next_render() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        tb.select_tool(ToolKind::Pencil);
        rendered(&mut tb);
        let small = tb.selector_bounds(ToolSize::Small).unwrap();
        assert!(tb.selector_visible());

        let picker = tb.position_of(ToolKind::ColorPicker).unwrap();
        tb.select(picker);
        assert!(!tb.selector_visible());
        assert_eq!(tb.selector_hit_test(small.center()), None);

        // Hitting the picker button has the same effect.
        tb.select_tool(ToolKind::Marker);
        assert_eq!(tb.selector_hit_test(small.center()), Some(ToolSize::Small));
        let picker_rect = tb.cell_bounds(picker).unwrap();
        assert_eq!(tb.hit_test(picker_rect.center()), Some(ToolKind::ColorPicker));
        assert_eq!(tb.selector_hit_test(small.center()), None);
        assert_eq!(tb.selector_selected(), Some(ToolSize::Small));
    }

    #[test]
    fn test_selector_hit_selects_size() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        tb.select_tool(ToolKind::Marker);
        rendered(&mut tb);
        let large = tb.selector_bounds(ToolSize::Large).unwrap();
        assert_eq!(tb.selector_hit_test(large.center()), Some(ToolSize::Large));
        assert_eq!(tb.selector_selected(), Some(ToolSize::Large));
        assert_eq!(tb.selector_hit_test(Point::new(-10.0, -10.0)), None);
        assert_eq!(tb.selector_selected(), Some(ToolSize::Large));
    }

    #[test]
    fn test_selector_sits_below_grid() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        tb.select_tool(ToolKind::Pencil);
        rendered(&mut tb);
        let last_tool = tb.cell_bounds(CellPos::new(3, 0)).unwrap();
        let small = tb.selector_bounds(ToolSize::Small).unwrap();
        assert!(small.y0 > last_tool.y1);
        let huge = tb.selector_bounds(ToolSize::Huge).unwrap();
        assert!(huge.y0 > small.y1);
    }

    #[test]
    fn test_hidden_selector_is_not_drawn() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 8, metrics());
        tb.select_tool(ToolKind::ColorPicker);
        let surface = rendered(&mut tb);
        let icons = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Icon { .. }))
            .count();
        assert_eq!(icons, 4);
        // Background, then fill + stroke per tool, no selector buttons.
        assert_eq!(surface.commands().len(), 1 + 4 * 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL, 3, metrics());
        tb.select_tool(ToolKind::Eraser);
        let first = rendered(&mut tb);
        let outer = tb.outer_bounds();
        let second = rendered(&mut tb);
        assert_eq!(first.commands(), second.commands());
        assert_eq!(outer, tb.outer_bounds());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_empty_cell_panics() {
        let mut tb = ToolBox::with_tools(&ToolKind::ALL[..3], 2, metrics());
        tb.select(CellPos::new(1, 1));
    }
}

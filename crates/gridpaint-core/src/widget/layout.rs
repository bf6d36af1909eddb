//! Pure layout functions: grid shape and scale in, cell rectangles out.
//!
//! Nothing here draws. Widgets compute a layout, store it in their bounds
//! cache and then hand the same rectangles to the surface.

use crate::geometry::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Unscaled cell size and spacing plus the scale applied to both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub cell_size: Size,
    pub gap: f64,
    pub scale: f64,
}

impl GridMetrics {
    pub fn new(cell_size: Size, gap: f64, scale: f64) -> Self {
        Self {
            cell_size,
            gap,
            scale,
        }
    }

    /// Square cells.
    pub fn square(cell: f64, gap: f64, scale: f64) -> Self {
        Self::new(Size::new(cell, cell), gap, scale)
    }

    /// On-screen cell size.
    pub fn cell(&self) -> Size {
        Size::new(self.cell_size.width * self.scale, self.cell_size.height * self.scale)
    }

    /// On-screen gap.
    pub fn gap(&self) -> f64 {
        self.gap * self.scale
    }

    /// Cursor advance from one cell to the next: `cell*scale + gap*scale`.
    pub fn step(&self) -> Vec2 {
        let cell = self.cell();
        Vec2::new(cell.width + self.gap(), cell.height + self.gap())
    }
}

/// Computed cell rectangles, indexed `[row][col]`, and the outer box.
///
/// Rows may be shorter than the widest row when the grid has a partially
/// filled trailing column.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cells: Vec<Vec<Rect>>,
    pub outer: Rect,
}

impl GridLayout {
    /// Outer width and height.
    pub fn size(&self) -> Size {
        self.outer.size()
    }

    /// Row lengths, used to detect shape changes.
    pub fn shape(&self) -> Vec<usize> {
        self.cells.iter().map(Vec::len).collect()
    }
}

/// Row and column of the `index`-th cell when wrapping at `row_len`.
///
/// A zero row length is treated as one cell per row.
pub fn wrap_index(index: usize, row_len: usize) -> (usize, usize) {
    let row_len = row_len.max(1);
    (index / row_len, index % row_len)
}

/// Lay out a `rows` x `cols` grid of uniform cells.
///
/// The first cell sits one gap in from `origin`; the outer box keeps one gap
/// of margin on every side.
pub fn grid_cells(origin: Point, rows: usize, cols: usize, metrics: &GridMetrics) -> GridLayout {
    let gap = metrics.gap();
    let cell = metrics.cell();
    let step = metrics.step();

    let cells = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let min = origin
                        + Vec2::new(gap + col as f64 * step.x, gap + row as f64 * step.y);
                    Rect::from_origin_size(min, cell)
                })
                .collect()
        })
        .collect();

    let outer = Size::new(gap + cols as f64 * step.x, gap + rows as f64 * step.y);
    GridLayout {
        cells,
        outer: Rect::from_origin_size(origin, outer),
    }
}

/// Lay out a single row of cells with individual widths and a shared height.
pub fn row_strip(origin: Point, widths: &[f64], height: f64, gap: f64) -> GridLayout {
    let mut cursor = origin.x + gap;
    let row: Vec<Rect> = widths
        .iter()
        .map(|&width| {
            let rect = Rect::from_origin_size(
                Point::new(cursor, origin.y + gap),
                Size::new(width, height),
            );
            cursor += width + gap;
            rect
        })
        .collect();

    let outer = Rect::new(origin.x, origin.y, cursor, origin.y + height + 2.0 * gap);
    GridLayout {
        cells: vec![row],
        outer,
    }
}

/// Lay out `count` cells of equal size stacked vertically.
pub fn column_strip(origin: Point, count: usize, cell: Size, gap: f64) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let min = origin + Vec2::new(gap, gap + i as f64 * (cell.height + gap));
            Rect::from_origin_size(min, cell)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_places_cells_row_major() {
        let l = 14;
        for i in 0..40 {
            assert_eq!(wrap_index(i, l), (i / l, i % l));
        }
        assert_eq!(wrap_index(17, 14), (1, 3));
        assert_eq!(wrap_index(5, 0), (5, 0));
    }

    #[test]
    fn test_grid_advances_by_scaled_step() {
        let metrics = GridMetrics::square(20.0, 2.0, 2.0);
        let layout = grid_cells(Point::new(10.0, 5.0), 2, 3, &metrics);

        assert_eq!(layout.cells.len(), 2);
        assert_eq!(layout.cells[0].len(), 3);
        // step = 20*2 + 2*2 = 44, first cell inset by one gap (4)
        assert_eq!(layout.cells[0][0], Rect::new(14.0, 9.0, 54.0, 49.0));
        assert_eq!(layout.cells[1][2], Rect::new(102.0, 53.0, 142.0, 93.0));
        assert_eq!(layout.size(), Size::new(4.0 + 3.0 * 44.0, 4.0 + 2.0 * 44.0));
    }

    #[test]
    fn test_empty_grid_is_degenerate_not_an_error() {
        let metrics = GridMetrics::square(20.0, 2.0, 1.0);
        let layout = grid_cells(Point::ZERO, 0, 0, &metrics);
        assert!(layout.cells.is_empty());
        assert_eq!(layout.size(), Size::new(2.0, 2.0));
    }

    #[test]
    fn test_negative_scale_still_lays_out() {
        let metrics = GridMetrics::square(20.0, 2.0, -1.0);
        let layout = grid_cells(Point::ZERO, 1, 2, &metrics);
        assert_eq!(layout.cells[0].len(), 2);
    }

    #[test]
    fn test_row_strip_grows_with_widths() {
        let layout = row_strip(Point::new(0.0, 0.0), &[30.0, 50.0], 20.0, 4.0);
        let row = &layout.cells[0];
        assert_eq!(row[0], Rect::new(4.0, 4.0, 34.0, 24.0));
        assert_eq!(row[1], Rect::new(38.0, 4.0, 88.0, 24.0));
        assert_eq!(layout.outer, Rect::new(0.0, 0.0, 92.0, 28.0));
    }

    #[test]
    fn test_column_strip_stacks() {
        let rects = column_strip(Point::new(0.0, 100.0), 3, Size::new(40.0, 10.0), 2.0);
        assert_eq!(rects[0], Rect::new(2.0, 102.0, 42.0, 112.0));
        assert_eq!(rects[2], Rect::new(2.0, 126.0, 42.0, 136.0));
    }
}

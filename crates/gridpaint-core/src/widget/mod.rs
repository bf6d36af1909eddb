//! Grid widgets: palette, tool box and ribbon.
//!
//! All three follow the same pattern:
//! - layout is computed from the cell grid, metrics and origin on every render
//! - the on-screen rectangle of every cell is cached so pointer coordinates
//!   map back to a cell without re-deriving layout
//! - a single-selection register is set by pointer hit or directly
//! - the outer bounds of the last render are exposed for placing siblings

pub mod layout;
mod palette;
mod ribbon;
mod selection;
mod toolbox;

pub use layout::{GridLayout, GridMetrics};
pub use palette::{Palette, classic_colors};
pub use ribbon::{Ribbon, RibbonButton};
pub use selection::SelectionState;
pub use toolbox::ToolBox;

use crate::geometry::{Point, Rect, RectExt, Size};
use crate::surface::Surface;
use std::fmt;

/// Row/column address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Common contract of the grid widgets.
pub trait GridWidget {
    /// How a cell is addressed for direct selection.
    type Cell: Copy;
    /// What a hit cell carries.
    type Payload;

    /// Lay out and draw at `origin`, refreshing the bounds cache.
    fn render(&mut self, origin: Point, surface: &mut dyn Surface);

    /// Map a point to the first cell containing it, selecting that cell.
    ///
    /// A miss leaves the selection untouched. Before the first render there
    /// are no bounds and every point misses.
    fn hit_test(&mut self, point: Point) -> Option<Self::Payload>;

    /// Select a cell directly.
    ///
    /// # Panics
    /// If `cell` does not address a cell of the grid.
    fn select(&mut self, cell: Self::Cell);

    /// Width and height of the most recent render, zero before any render.
    fn outer_bounds(&self) -> Size;
}

/// Last-rendered screen rectangles of a widget's cells.
#[derive(Debug, Clone, Default)]
pub struct BoundsCache {
    origin: Option<Point>,
    cells: Vec<Vec<Rect>>,
    outer: Size,
}

impl BoundsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a render has populated the cache.
    pub fn is_valid(&self) -> bool {
        self.origin.is_some()
    }

    /// Store a fresh layout.
    ///
    /// Cell rectangles are only overwritten when the origin or the grid
    /// shape changed since the last store; the outer size is always updated.
    pub fn refresh(&mut self, origin: Point, layout: &GridLayout) {
        self.outer = layout.size();
        if self.origin == Some(origin) && self.shape_matches(layout) {
            return;
        }
        log::debug!("Rebuilding bounds cache at ({}, {})", origin.x, origin.y);
        self.origin = Some(origin);
        self.cells = layout.cells.clone();
    }

    /// Drop cached rectangles, e.g. after the grid grew.
    pub fn invalidate(&mut self) {
        self.origin = None;
        self.cells.clear();
    }

    pub fn outer(&self) -> Size {
        self.outer
    }

    pub fn get(&self, pos: CellPos) -> Option<Rect> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Row-major scan for the first rectangle containing `point`, edges included.
    pub fn hit(&self, point: Point) -> Option<CellPos> {
        if !self.is_valid() {
            log::warn!("Hit test before first render; treating as no match");
            return None;
        }
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|rect| rect.contains_inclusive(point))
                .map(|col| CellPos::new(row, col))
        })
    }

    fn shape_matches(&self, layout: &GridLayout) -> bool {
        self.cells.iter().map(Vec::len).eq(layout.shape())
    }
}

/// Colours shared by the widget renderers.
pub mod theme {
    use crate::color::{Color, rgb};

    /// Panel background
    pub const PANEL_BG: Color = rgb(240, 240, 242);
    /// Cell border
    pub const BORDER: Color = rgb(160, 160, 165);
    /// Selection highlight
    pub const ACCENT: Color = rgb(59, 130, 246);
    /// Selected button background
    pub const SELECTED_BG: Color = rgb(219, 234, 254);
    /// Button background
    pub const BUTTON_BG: Color = rgb(250, 250, 250);
    /// Text and icon colour
    pub const TEXT: Color = rgb(60, 60, 60);
}

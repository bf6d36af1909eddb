//! Command ribbon: one row of text buttons sized to their labels.

use super::layout::{GridMetrics, row_strip};
use super::{BoundsCache, CellPos, GridWidget, SelectionState, theme};
use crate::action::EditorAction;
use crate::geometry::{Point, Rect, Size};
use crate::surface::Surface;

/// A labelled ribbon button.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonButton {
    pub label: String,
    pub action: EditorAction,
}

impl RibbonButton {
    pub fn new(label: impl Into<String>, action: EditorAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Button labelled with the action's own name.
    pub fn for_action(action: EditorAction) -> Self {
        Self::new(action.label(), action)
    }
}

/// Horizontal strip of buttons. The strip grows to fit; labels never wrap.
#[derive(Debug, Clone)]
pub struct Ribbon {
    buttons: Vec<RibbonButton>,
    /// Button height comes from `cell_size.height`; the width is measured.
    metrics: GridMetrics,
    font_size: f64,
    padding: f64,
    cache: BoundsCache,
    selection: SelectionState<usize>,
}

impl Ribbon {
    pub fn new(buttons: Vec<RibbonButton>, metrics: GridMetrics, font_size: f64, padding: f64) -> Self {
        Self {
            buttons,
            metrics,
            font_size,
            padding,
            cache: BoundsCache::new(),
            selection: SelectionState::new(),
        }
    }

    /// New, Open, Save and Undo.
    pub fn with_default_buttons(metrics: GridMetrics, font_size: f64, padding: f64) -> Self {
        let buttons = [
            EditorAction::New,
            EditorAction::Open,
            EditorAction::Save,
            EditorAction::Undo,
        ]
        .into_iter()
        .map(RibbonButton::for_action)
        .collect();
        Self::new(buttons, metrics, font_size, padding)
    }

    pub fn buttons(&self) -> &[RibbonButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Index of the most recently pressed button.
    pub fn last_selected(&self) -> Option<usize> {
        self.selection.last_selected()
    }

    pub fn button_bounds(&self, index: usize) -> Option<Rect> {
        self.cache.get(CellPos::new(0, index))
    }

    fn font_size(&self) -> f64 {
        self.font_size * self.metrics.scale
    }
}

impl GridWidget for Ribbon {
    type Cell = usize;
    type Payload = EditorAction;

    fn render(&mut self, origin: Point, surface: &mut dyn Surface) {
        let font_size = self.font_size();
        let padding = self.padding * self.metrics.scale;
        let label_sizes: Vec<Size> = self
            .buttons
            .iter()
            .map(|b| surface.measure_text(&b.label, font_size))
            .collect();
        let widths: Vec<f64> = label_sizes.iter().map(|s| s.width + 2.0 * padding).collect();

        let layout = row_strip(origin, &widths, self.metrics.cell().height, self.metrics.gap());
        self.cache.refresh(origin, &layout);

        surface.fill_rect(layout.outer, theme::PANEL_BG);
        let row = layout.cells.first().map(Vec::as_slice).unwrap_or_default();
        for (i, ((button, &rect), label)) in self.buttons.iter().zip(row).zip(&label_sizes).enumerate() {
            let selected = self.selection.is_selected(i);
            surface.fill_rect(rect, if selected { theme::SELECTED_BG } else { theme::BUTTON_BG });
            surface.stroke_rect(rect, 1.0, if selected { theme::ACCENT } else { theme::BORDER });
            let text_pos = Point::new(rect.x0 + padding, rect.center().y - label.height / 2.0);
            surface.draw_text(&button.label, text_pos, font_size, theme::TEXT);
        }
    }

    fn hit_test(&mut self, point: Point) -> Option<EditorAction> {
        let pos = self.cache.hit(point)?;
        let action = self.buttons.get(pos.col)?.action;
        self.selection.select(pos.col);
        Some(action)
    }

    fn select(&mut self, index: usize) {
        assert!(
            index < self.buttons.len(),
            "ribbon button {} out of range for {} buttons",
            index,
            self.buttons.len()
        );
        self.selection.select(index);
    }

    fn outer_bounds(&self) -> Size {
        self.cache.outer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn ribbon() -> Ribbon {
        Ribbon::with_default_buttons(GridMetrics::new(Size::new(0.0, 24.0), 4.0, 1.0), 10.0, 6.0)
    }

    #[test]
    fn test_widths_follow_labels() {
        let mut r = ribbon();
        let mut surface = RecordingSurface::new();
        r.render(Point::ZERO, &mut surface);

        // "Open" is 4 chars at 6px each plus 2 * 6 padding.
        let open = r.button_bounds(1).unwrap();
        assert_eq!(open.width(), 4.0 * 6.0 + 12.0);
        let new = r.button_bounds(0).unwrap();
        assert_eq!(new.width(), 3.0 * 6.0 + 12.0);
        assert_eq!(open.x0, new.x1 + 4.0);
        assert_eq!(surface.texts(), vec!["New", "Open", "Save", "Undo"]);
    }

    #[test]
    fn test_total_width_grows_with_buttons() {
        let mut r = ribbon();
        let mut surface = RecordingSurface::new();
        r.render(Point::ZERO, &mut surface);
        let short = r.outer_bounds().width;

        let mut buttons = r.buttons().to_vec();
        buttons.push(RibbonButton::new("A much longer label", EditorAction::New));
        let mut longer = Ribbon::new(buttons, GridMetrics::new(Size::new(0.0, 24.0), 4.0, 1.0), 10.0, 6.0);
        longer.render(Point::ZERO, &mut surface);
        assert!(longer.outer_bounds().width > short);
        assert_eq!(longer.outer_bounds().height, r.outer_bounds().height);
    }

    #[test]
    fn test_hit_returns_action() {
        let mut r = ribbon();
        let mut surface = RecordingSurface::new();
        r.render(Point::new(10.0, 10.0), &mut surface);
        let undo = r.button_bounds(3).unwrap();
        assert_eq!(r.hit_test(undo.center()), Some(EditorAction::Undo));
        assert_eq!(r.last_selected(), Some(3));
        assert_eq!(r.hit_test(Point::new(0.0, 0.0)), None);
        assert_eq!(r.last_selected(), Some(3));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut r = ribbon();
        let mut first = RecordingSurface::new();
        r.render(Point::ZERO, &mut first);
        let bounds = r.button_bounds(2);
        let mut second = RecordingSurface::new();
        r.render(Point::ZERO, &mut second);
        assert_eq!(bounds, r.button_bounds(2));
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn test_empty_ribbon_renders() {
        let mut r = Ribbon::new(Vec::new(), GridMetrics::new(Size::new(0.0, 24.0), 4.0, 1.0), 10.0, 6.0);
        let mut surface = RecordingSurface::new();
        r.render(Point::ZERO, &mut surface);
        assert!(r.is_empty());
        assert_eq!(r.outer_bounds(), Size::new(4.0, 32.0));
        assert_eq!(r.hit_test(Point::new(2.0, 2.0)), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_out_of_range_panics() {
        ribbon().select(4);
    }
}

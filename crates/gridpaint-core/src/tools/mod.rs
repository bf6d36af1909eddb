//! Tool system: the drawing tools and the state machine that dispatches
//! pointer input to the active one.

mod brushes;
mod cursor;

pub use brushes::{ColorPicker, Eraser, Marker, Pencil};
pub use cursor::{CursorAffordance, CursorBitmap, eraser_ring};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::input::MouseButton;
use crate::surface::Icon;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pencil,
    Marker,
    Eraser,
    ColorPicker,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pencil,
        ToolKind::Marker,
        ToolKind::Eraser,
        ToolKind::ColorPicker,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Marker => "Marker",
            ToolKind::Eraser => "Eraser",
            ToolKind::ColorPicker => "Color Picker",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            ToolKind::Pencil => Icon::Pencil,
            ToolKind::Marker => Icon::Marker,
            ToolKind::Eraser => Icon::Eraser,
            ToolKind::ColorPicker => Icon::ColorPicker,
        }
    }

    /// Whether tools of this kind take a [`ToolSize`].
    pub fn is_sizeable(self) -> bool {
        !matches!(self, ToolKind::ColorPicker)
    }
}

/// Discrete stroke sizes, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ToolSize {
    #[default]
    Small,
    Medium,
    Large,
    Huge,
}

impl ToolSize {
    pub const ALL: [ToolSize; 4] = [ToolSize::Small, ToolSize::Medium, ToolSize::Large, ToolSize::Huge];

    /// Stroke width in canvas pixels.
    pub fn px(self) -> u32 {
        match self {
            ToolSize::Small => 1,
            ToolSize::Medium => 3,
            ToolSize::Large => 6,
            ToolSize::Huge => 12,
        }
    }

    /// Side of the square the eraser clears.
    pub fn eraser_side(self) -> u32 {
        self.px() * 2 + 2
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next larger size, saturating.
    pub fn larger(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next smaller size, saturating.
    pub fn smaller(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

/// The primary and secondary drawing colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeColors {
    pub primary: Color,
    pub secondary: Color,
}

impl StrokeColors {
    pub fn new(primary: Color, secondary: Color) -> Self {
        Self { primary, secondary }
    }

    /// The colour a button draws with: right uses secondary, others primary.
    pub fn for_button(&self, button: MouseButton) -> Color {
        match button {
            MouseButton::Right => self.secondary,
            MouseButton::Left | MouseButton::Middle => self.primary,
        }
    }

    /// Assign the slot a button draws with.
    pub fn set_for_button(&mut self, button: MouseButton, color: Color) {
        match button {
            MouseButton::Right => self.secondary = color,
            MouseButton::Left | MouseButton::Middle => self.primary = color,
        }
    }
}

/// One pointer sample of a stroke, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub point: Point,
    /// Previous sample of the same stroke, if it was over the canvas.
    pub previous: Option<Point>,
    pub colors: StrokeColors,
    pub button: MouseButton,
}

impl StrokeSample {
    /// The colour selected by the held button.
    pub fn color(&self) -> Color {
        self.colors.for_button(self.button)
    }
}

/// Capability interface every tool implements.
pub trait DrawingTool {
    fn kind(&self) -> ToolKind;

    fn is_sizeable(&self) -> bool {
        true
    }

    fn size(&self) -> ToolSize;

    /// Change the size. Tools may regenerate derived state here; it must be
    /// ready by the time this returns.
    fn set_size(&mut self, size: ToolSize);

    fn cursor(&self) -> &CursorAffordance;

    fn icon(&self) -> Icon {
        self.kind().icon()
    }

    /// Whether strokes change canvas pixels (and so need an undo entry).
    fn mutates_canvas(&self) -> bool {
        true
    }

    /// Called once per pointer sample while a button is held over the canvas.
    fn begin_or_continue_stroke(&mut self, canvas: &mut Canvas, sample: &StrokeSample);

    /// Called on pointer release.
    fn complete_stroke(&mut self, _canvas: &mut Canvas, _sample: &StrokeSample) {}
}

/// A registered tool.
#[derive(Debug, Clone)]
pub enum Tool {
    Pencil(Pencil),
    Marker(Marker),
    Eraser(Eraser),
    ColorPicker(ColorPicker),
}

impl Tool {
    /// Create a tool with its default settings.
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Pencil => Tool::Pencil(Pencil::default()),
            ToolKind::Marker => Tool::Marker(Marker::default()),
            ToolKind::Eraser => Tool::Eraser(Eraser::default()),
            ToolKind::ColorPicker => Tool::ColorPicker(ColorPicker::default()),
        }
    }

    pub fn as_dyn(&self) -> &dyn DrawingTool {
        match self {
            Tool::Pencil(t) => t,
            Tool::Marker(t) => t,
            Tool::Eraser(t) => t,
            Tool::ColorPicker(t) => t,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn DrawingTool {
        match self {
            Tool::Pencil(t) => t,
            Tool::Marker(t) => t,
            Tool::Eraser(t) => t,
            Tool::ColorPicker(t) => t,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.as_dyn().kind()
    }

    pub fn is_sizeable(&self) -> bool {
        self.as_dyn().is_sizeable()
    }

    pub fn size(&self) -> ToolSize {
        self.as_dyn().size()
    }

    pub fn cursor(&self) -> &CursorAffordance {
        self.as_dyn().cursor()
    }

    pub fn mutates_canvas(&self) -> bool {
        self.as_dyn().mutates_canvas()
    }

    /// Output of the colour picker; `None` for every other tool.
    pub fn picked_color(&self) -> Option<Color> {
        match self {
            Tool::ColorPicker(picker) => picker.picked_color(),
            _ => None,
        }
    }
}

/// State of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A button is held; `last` is the previous sample over the canvas.
    Active {
        button: MouseButton,
        last: Option<Point>,
    },
}

/// Owns the tool registry and routes strokes to the active tool.
#[derive(Debug, Clone)]
pub struct ToolManager {
    tools: Vec<Tool>,
    /// Index into `tools`; the registry is never empty.
    active: usize,
    /// Tool picked while a stroke was held; takes over on release.
    pending: Option<usize>,
    state: StrokeState,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            tools: ToolKind::ALL.into_iter().map(Tool::new).collect(),
            active: 0,
            pending: None,
            state: StrokeState::Idle,
        }
    }
}

impl ToolManager {
    /// Create a manager with every tool registered and the pencil active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool of the same kind.
    pub fn register(&mut self, tool: Tool) {
        match self.tools.iter().position(|t| t.kind() == tool.kind()) {
            Some(i) => self.tools[i] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn tool(&self, kind: ToolKind) -> Option<&Tool> {
        self.tools.iter().find(|t| t.kind() == kind)
    }

    pub fn active(&self) -> &Tool {
        &self.tools[self.active]
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active().kind()
    }

    /// Switch tools. While a stroke is held the switch waits for its release,
    /// so the stroke finishes with the tool that started it.
    ///
    /// Returns false if no tool of that kind is registered.
    pub fn set_active(&mut self, kind: ToolKind) -> bool {
        let Some(index) = self.tools.iter().position(|t| t.kind() == kind) else {
            log::warn!("No {} tool registered", kind.name());
            return false;
        };
        if self.is_stroking() {
            log::debug!("{} queued until the stroke ends", kind.name());
            self.pending = (index != self.active).then_some(index);
            return true;
        }
        self.switch_to(index);
        true
    }

    fn switch_to(&mut self, index: usize) {
        if index != self.active {
            log::debug!("Active tool: {}", self.tools[index].kind().name());
        }
        self.active = index;
        self.pending = None;
        self.state = StrokeState::Idle;
        if let Tool::ColorPicker(picker) = &mut self.tools[index] {
            picker.clear_pick();
        }
    }

    /// Tool waiting for the held stroke to end, if any.
    pub fn pending_kind(&self) -> Option<ToolKind> {
        self.pending.map(|index| self.tools[index].kind())
    }

    /// Set the active tool's size; silently ignored for unsized tools.
    pub fn set_size(&mut self, size: ToolSize) -> bool {
        let tool = self.tools[self.active].as_dyn_mut();
        if !tool.is_sizeable() {
            return false;
        }
        tool.set_size(size);
        true
    }

    pub fn size(&self) -> ToolSize {
        self.active().size()
    }

    pub fn cursor(&self) -> &CursorAffordance {
        self.active().cursor()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    pub fn picked_color(&self) -> Option<Color> {
        self.active().picked_color()
    }

    /// Start a stroke with `button`. Ignored while another stroke is active.
    pub fn press(&mut self, button: MouseButton) -> bool {
        if self.is_stroking() {
            return false;
        }
        self.state = StrokeState::Active { button, last: None };
        true
    }

    /// Feed a sample over the canvas to the active tool.
    pub fn sample(&mut self, canvas: &mut Canvas, point: Point, colors: StrokeColors) {
        let StrokeState::Active { button, last } = self.state else {
            return;
        };
        let sample = StrokeSample {
            point,
            previous: last,
            colors,
            button,
        };
        self.tools[self.active]
            .as_dyn_mut()
            .begin_or_continue_stroke(canvas, &sample);
        self.state = StrokeState::Active {
            button,
            last: Some(point),
        };
    }

    /// The pointer left the canvas mid-stroke; the next sample starts a
    /// fresh segment instead of joining across the gap.
    pub fn lift(&mut self) {
        if let StrokeState::Active { button, .. } = self.state {
            self.state = StrokeState::Active { button, last: None };
        }
    }

    /// Finish the stroke on release of its button, then make any queued tool
    /// active.
    ///
    /// Returns the button that drew the stroke, or `None` if `button` does
    /// not end the active stroke.
    pub fn release(
        &mut self,
        canvas: &mut Canvas,
        point: Point,
        colors: StrokeColors,
        button: MouseButton,
    ) -> Option<MouseButton> {
        match self.state {
            StrokeState::Active { button: held, last } if held == button => {
                let sample = StrokeSample {
                    point,
                    previous: last,
                    colors,
                    button,
                };
                self.tools[self.active]
                    .as_dyn_mut()
                    .complete_stroke(canvas, &sample);
                self.state = StrokeState::Idle;
                if let Some(index) = self.pending.take() {
                    self.switch_to(index);
                }
                Some(held)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn colors() -> StrokeColors {
        StrokeColors::new(BLACK, WHITE)
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.active_kind(), ToolKind::Pencil);

        assert!(tm.set_active(ToolKind::Eraser));
        assert_eq!(tm.active_kind(), ToolKind::Eraser);
    }

    #[test]
    fn test_size_is_per_tool() {
        let mut tm = ToolManager::new();
        assert!(tm.set_size(ToolSize::Large));
        tm.set_active(ToolKind::Marker);
        assert_eq!(tm.size(), ToolSize::Medium);
        tm.set_active(ToolKind::Pencil);
        assert_eq!(tm.size(), ToolSize::Large);
    }

    #[test]
    fn test_size_on_picker_is_noop() {
        let mut tm = ToolManager::new();
        tm.set_active(ToolKind::ColorPicker);
        assert!(!tm.set_size(ToolSize::Huge));
        assert_eq!(tm.size(), ToolSize::Small);
    }

    #[test]
    fn test_eraser_cursor_follows_size() {
        let mut tm = ToolManager::new();
        tm.set_active(ToolKind::Eraser);
        tm.set_size(ToolSize::Large);
        assert_eq!(*tm.cursor(), CursorAffordance::Bitmap(eraser_ring(ToolSize::Large)));
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut tm = ToolManager::new();
        let mut canvas = Canvas::new(10, 10, WHITE);

        assert!(!tm.is_stroking());
        tm.sample(&mut canvas, Point::new(1.0, 1.0), colors());
        assert_eq!(canvas.pixel(1, 1), Some(WHITE), "no stroke without press");

        assert!(tm.press(MouseButton::Left));
        assert!(!tm.press(MouseButton::Right));
        tm.sample(&mut canvas, Point::new(1.0, 1.0), colors());
        tm.sample(&mut canvas, Point::new(5.0, 1.0), colors());
        assert_eq!(canvas.pixel(3, 1), Some(BLACK));

        assert_eq!(tm.release(&mut canvas, Point::new(5.0, 1.0), colors(), MouseButton::Right), None);
        assert_eq!(
            tm.release(&mut canvas, Point::new(5.0, 1.0), colors(), MouseButton::Left),
            Some(MouseButton::Left)
        );
        assert!(!tm.is_stroking());
    }

    #[test]
    fn test_lift_breaks_segment() {
        let mut tm = ToolManager::new();
        let mut canvas = Canvas::new(10, 10, WHITE);
        tm.press(MouseButton::Left);
        tm.sample(&mut canvas, Point::new(1.0, 1.0), colors());
        tm.lift();
        tm.sample(&mut canvas, Point::new(8.0, 1.0), colors());
        assert_eq!(canvas.pixel(4, 1), Some(WHITE));
    }

    #[test]
    fn test_switch_waits_for_release() {
        let mut tm = ToolManager::new();
        let mut canvas = Canvas::new(10, 10, WHITE);
        tm.press(MouseButton::Left);
        tm.sample(&mut canvas, Point::new(1.0, 1.0), colors());

        assert!(tm.set_active(ToolKind::Marker));
        assert!(tm.is_stroking());
        assert_eq!(tm.active_kind(), ToolKind::Pencil);
        assert_eq!(tm.pending_kind(), Some(ToolKind::Marker));

        tm.sample(&mut canvas, Point::new(8.0, 1.0), colors());
        assert_eq!(canvas.pixel(5, 1), Some(BLACK));

        tm.release(&mut canvas, Point::new(8.0, 1.0), colors(), MouseButton::Left);
        assert_eq!(tm.active_kind(), ToolKind::Marker);
        assert_eq!(tm.pending_kind(), None);
    }

    #[test]
    fn test_reselecting_active_tool_drops_queued_switch() {
        let mut tm = ToolManager::new();
        let mut canvas = Canvas::new(4, 4, WHITE);
        tm.press(MouseButton::Left);
        tm.set_active(ToolKind::Eraser);
        tm.set_active(ToolKind::Pencil);
        assert_eq!(tm.pending_kind(), None);
        tm.release(&mut canvas, Point::new(1.0, 1.0), colors(), MouseButton::Left);
        assert_eq!(tm.active_kind(), ToolKind::Pencil);
    }

    #[test]
    fn test_tool_icons_match_kinds() {
        for kind in ToolKind::ALL {
            assert_eq!(Tool::new(kind).as_dyn().icon(), kind.icon());
        }
    }

    #[test]
    fn test_size_steps_saturate() {
        assert_eq!(ToolSize::Huge.larger(), ToolSize::Huge);
        assert_eq!(ToolSize::Small.smaller(), ToolSize::Small);
        assert_eq!(ToolSize::Medium.larger(), ToolSize::Large);
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut tm = ToolManager::new();
        let mut pencil = Pencil::default();
        pencil.set_size(ToolSize::Huge);
        tm.register(Tool::Pencil(pencil));
        assert_eq!(tm.tool(ToolKind::Pencil).map(Tool::size), Some(ToolSize::Huge));
    }
}

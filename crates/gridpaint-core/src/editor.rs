//! The editor: owns every widget, the canvas, the undo history and the tool
//! manager, lays them out each frame and routes input between them.
//!
//! Pointer presses are offered to the widgets in a fixed order (palette,
//! tool grid, size selector, ribbon) and the first match consumes the event.
//! Anything left over that lands on the canvas starts a stroke with the
//! active tool. Moves and releases belong to the stroke in progress.

use crate::action::EditorAction;
use crate::canvas::{Canvas, CanvasResult, Snapshot};
use crate::color::{BLACK, Color};
use crate::config::EditorConfig;
use crate::geometry::{Point, Rect, Size, Vec2, to_local, to_local_clamped};
use crate::history::UndoStack;
use crate::input::{InputState, Modifiers, MouseButton, PointerEvent};
use crate::shortcuts::ShortcutRegistry;
use crate::surface::{ImageRef, Surface};
use crate::tools::{CursorAffordance, StrokeColors, Tool, ToolKind, ToolManager, ToolSize};
use crate::widget::{GridWidget, Palette, Ribbon, ToolBox, theme};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Texture key under which the canvas is drawn.
pub const CANVAS_KEY: &str = "canvas";

/// Space between the tool box and the canvas, before scaling.
const CANVAS_MARGIN: f64 = 8.0;

/// Side of an icon cursor, before scaling.
const ICON_CURSOR_SIZE: f64 = 16.0;

/// Errors reported by editor commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Result type for editor commands.
pub type EditorResult<T> = Result<T, EditorError>;

/// Which parts of the editor changed visibly while handling an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub palette: bool,
    pub toolbox: bool,
    pub ribbon: bool,
    pub canvas: bool,
    pub cursor: bool,
}

impl Dirty {
    pub fn any(&self) -> bool {
        self.palette || self.toolbox || self.ribbon || self.canvas || self.cursor
    }

    pub fn merge(&mut self, other: Dirty) {
        self.palette |= other.palette;
        self.toolbox |= other.toolbox;
        self.ribbon |= other.ribbon;
        self.canvas |= other.canvas;
        self.cursor |= other.cursor;
    }
}

/// Work the editor hands back to the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Pick an image file and pass it to [`Editor::open_image`].
    OpenImage,
    /// Pick a destination and call [`Editor::save_to`].
    SaveImage,
}

/// Outcome of handling one input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub dirty: Dirty,
    pub command: Option<EditorCommand>,
}

impl Response {
    fn dirty(dirty: Dirty) -> Self {
        Self { dirty, command: None }
    }
}

/// Per-press gesture bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// A stroke on the canvas; `undo_pushed` once the canvas was snapshotted.
    Stroke { undo_pushed: bool },
}

/// Editor state.
pub struct Editor {
    config: EditorConfig,
    palette: Palette,
    toolbox: ToolBox,
    ribbon: Ribbon,
    tools: ToolManager,
    history: UndoStack<Snapshot>,
    canvas: Canvas,
    input: InputState,
    colors: StrokeColors,
    /// Where the canvas was drawn by the last render.
    canvas_rect: Option<Rect>,
    gesture: Gesture,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let background = config.background_color();
        let canvas = Canvas::new(config.canvas_width, config.canvas_height, background);

        let mut palette = Palette::new(
            &config.palette_colors(),
            config.palette.row_length,
            config.palette_metrics(),
        );
        let colors = StrokeColors::new(BLACK, background);
        palette.set_preview(colors.primary, colors.secondary);

        let tools = ToolManager::new();
        let mut toolbox = ToolBox::with_tools(
            &ToolKind::ALL,
            config.toolbox.column_length,
            config.toolbox_metrics(),
        );
        toolbox.select_tool(tools.active_kind());
        toolbox.selector_select(tools.size());

        let ribbon = Ribbon::with_default_buttons(
            config.ribbon_metrics(),
            config.ribbon.font_size,
            config.ribbon.padding,
        );

        log::info!(
            "Editor ready: {}x{} canvas, undo capacity {}",
            config.canvas_width,
            config.canvas_height,
            config.undo_capacity
        );

        Self {
            history: UndoStack::new(config.undo_capacity),
            config,
            palette,
            toolbox,
            ribbon,
            tools,
            canvas,
            input: InputState::new(),
            colors,
            canvas_rect: None,
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn toolbox(&self) -> &ToolBox {
        &self.toolbox
    }

    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn colors(&self) -> StrokeColors {
        self.colors
    }

    /// Number of states that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Canvas rectangle from the last render.
    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Whether the pointer is over the canvas, where the tool cursor replaces
    /// the system one.
    pub fn pointer_over_canvas(&self) -> bool {
        self.hover_point().is_some()
    }

    // --- Rendering ---

    /// Lay out and draw everything: ribbon on top, palette below it, tool
    /// box below that and the canvas to the right of the tool box.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.ribbon.render(Point::ZERO, surface);
        let palette_origin = Point::new(0.0, self.ribbon.outer_bounds().height);
        self.palette.render(palette_origin, surface);
        let toolbox_origin = Point::new(0.0, palette_origin.y + self.palette.outer_bounds().height);
        self.toolbox.render(toolbox_origin, surface);

        let margin = CANVAS_MARGIN * self.config.ui_scale;
        let canvas_origin = Point::new(
            self.toolbox.outer_bounds().width + margin,
            toolbox_origin.y + margin,
        );
        let rect = Rect::from_origin_size(
            canvas_origin,
            Size::new(self.canvas.width() as f64, self.canvas.height() as f64),
        );
        if self.canvas_rect != Some(rect) {
            log::debug!("Canvas placed at ({}, {})", rect.x0, rect.y0);
        }
        self.canvas_rect = Some(rect);

        surface.stroke_rect(rect.inflate(1.0, 1.0), 1.0, theme::BORDER);
        surface.draw_image(
            ImageRef {
                key: CANVAS_KEY,
                revision: self.canvas.revision(),
                pixels: self.canvas.pixels(),
            },
            rect,
        );
        self.draw_cursor(surface);
    }

    fn draw_cursor(&self, surface: &mut dyn Surface) {
        let Some(point) = self.hover_point() else {
            return;
        };
        match self.tools.cursor() {
            CursorAffordance::Icon(icon) => {
                // Tip in the bottom-left corner, on the pointer.
                let side = ICON_CURSOR_SIZE * self.config.ui_scale;
                let rect = Rect::new(point.x, point.y - side, point.x + side, point.y);
                surface.draw_icon(*icon, rect, theme::TEXT);
            }
            CursorAffordance::Bitmap(bitmap) => {
                let (hx, hy) = bitmap.hotspot;
                let min = point - Vec2::new(hx as f64, hy as f64);
                let size = Size::new(bitmap.image.width() as f64, bitmap.image.height() as f64);
                surface.draw_image(
                    ImageRef {
                        key: &bitmap.key,
                        revision: 0,
                        pixels: &bitmap.image,
                    },
                    Rect::from_origin_size(min, size),
                );
            }
        }
    }

    fn hover_point(&self) -> Option<Point> {
        let point = self.input.pointer_position?;
        let rect = self.canvas_rect?;
        to_local(rect, point).map(|_| point)
    }

    /// Map a surface point to canvas pixel coordinates.
    fn canvas_point(&self, point: Point) -> Option<Point> {
        to_local(self.canvas_rect?, point)
    }

    // --- Input ---

    /// Handle one pointer event. Hit-testing uses the bounds of the last
    /// [`render`](Self::render).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Response {
        let was_hovering = self.pointer_over_canvas();
        self.input.apply(&event);

        let mut response = match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => Response::dirty(self.pointer_move(position)),
            PointerEvent::Up { position, button } => Response::dirty(self.pointer_up(position, button)),
        };
        if was_hovering || self.pointer_over_canvas() {
            response.dirty.cursor = true;
        }
        response
    }

    /// The pointer left the window.
    pub fn pointer_left(&mut self) -> Dirty {
        let was_hovering = self.pointer_over_canvas();
        self.input.pointer_left();
        self.tools.lift();
        Dirty {
            cursor: was_hovering,
            ..Dirty::default()
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) -> Response {
        if let Some(color) = self.palette.hit_test(position) {
            log::debug!("Palette hit, {:?} button", button);
            self.colors.set_for_button(button, color);
            self.palette.set_preview(self.colors.primary, self.colors.secondary);
            return Response::dirty(Dirty {
                palette: true,
                ..Dirty::default()
            });
        }
        if let Some(kind) = self.toolbox.hit_test(position) {
            log::debug!("Tool box hit: {}", kind.name());
            return Response::dirty(self.activate_tool(kind));
        }
        if let Some(size) = self.toolbox.selector_hit_test(position) {
            log::debug!("Size selector hit: {:?}", size);
            return Response::dirty(self.set_tool_size(size));
        }
        if let Some(action) = self.ribbon.hit_test(position) {
            log::debug!("Ribbon hit: {:?}", action);
            let mut response = self.apply_action(action);
            response.dirty.ribbon = true;
            return response;
        }

        if self.canvas_point(position).is_none() || !self.tools.press(button) {
            return Response::default();
        }
        self.gesture = Gesture::Stroke { undo_pushed: false };
        Response::dirty(self.stroke_sample(position))
    }

    fn pointer_move(&mut self, position: Point) -> Dirty {
        if !matches!(self.gesture, Gesture::Stroke { .. }) {
            return Dirty::default();
        }
        self.stroke_sample(position)
    }

    fn pointer_up(&mut self, position: Point, button: MouseButton) -> Dirty {
        if !matches!(self.gesture, Gesture::Stroke { .. }) {
            return Dirty::default();
        }
        // A release off the canvas completes the stroke at the nearest edge.
        let local = self
            .canvas_rect
            .map_or(Point::ZERO, |rect| to_local_clamped(rect, position));
        let finished = self.tools.active_kind();
        let Some(button) = self.tools.release(&mut self.canvas, local, self.colors, button) else {
            return Dirty::default();
        };
        self.gesture = Gesture::Idle;

        let mut dirty = Dirty::default();
        if finished == ToolKind::ColorPicker {
            let picked = self.tools.tool(ToolKind::ColorPicker).and_then(Tool::picked_color);
            if let Some(color) = picked {
                log::debug!("Picked colour assigned to {:?} button", button);
                self.colors.set_for_button(button, color);
                self.palette.set_preview(self.colors.primary, self.colors.secondary);
            }
            self.palette.set_picked(None);
            dirty.palette = true;
        }
        if self.tools.active_kind() != finished {
            dirty.merge(self.tool_changed());
        }
        dirty
    }

    /// Feed a sample to the active tool, snapshotting the canvas before the
    /// first change of the gesture. Samples off the canvas break the line.
    fn stroke_sample(&mut self, position: Point) -> Dirty {
        let Some(local) = self.canvas_point(position) else {
            self.tools.lift();
            return Dirty::default();
        };

        let mutates = self.tools.active().mutates_canvas();
        if mutates && self.gesture == (Gesture::Stroke { undo_pushed: false }) {
            self.push_undo();
            self.gesture = Gesture::Stroke { undo_pushed: true };
        }
        self.tools.sample(&mut self.canvas, local, self.colors);

        if mutates {
            Dirty {
                canvas: true,
                ..Dirty::default()
            }
        } else {
            self.palette.set_picked(self.tools.picked_color());
            Dirty {
                palette: true,
                ..Dirty::default()
            }
        }
    }

    /// Handle a key press; see [`ShortcutRegistry`] for the bindings.
    pub fn handle_key(&mut self, key: char, modifiers: Modifiers) -> Response {
        match ShortcutRegistry::find(key, modifiers.ctrl) {
            Some(action) => self.apply_action(action),
            None => Response::default(),
        }
    }

    // --- Commands ---

    /// Run an editor action. File actions are returned as commands for the
    /// shell to complete.
    pub fn apply_action(&mut self, action: EditorAction) -> Response {
        let dirty = match action {
            EditorAction::New => {
                self.new_canvas();
                Dirty {
                    canvas: true,
                    ..Dirty::default()
                }
            }
            EditorAction::Open => {
                return Response {
                    dirty: Dirty::default(),
                    command: Some(EditorCommand::OpenImage),
                };
            }
            EditorAction::Save => {
                return Response {
                    dirty: Dirty::default(),
                    command: Some(EditorCommand::SaveImage),
                };
            }
            EditorAction::Undo => Dirty {
                canvas: self.undo().is_ok(),
                ..Dirty::default()
            },
            EditorAction::SizeUp => self.set_tool_size(self.tools.size().larger()),
            EditorAction::SizeDown => self.set_tool_size(self.tools.size().smaller()),
            EditorAction::SelectTool(kind) => self.select_tool(kind),
        };
        Response::dirty(dirty)
    }

    /// Switch tools through the tool box so the two stay in step.
    pub fn select_tool(&mut self, kind: ToolKind) -> Dirty {
        if self.toolbox.select_tool(kind).is_none() {
            log::warn!("{} is not in the tool box", kind.name());
            return Dirty::default();
        }
        self.activate_tool(kind)
    }

    fn activate_tool(&mut self, kind: ToolKind) -> Dirty {
        if !self.tools.set_active(kind) {
            return Dirty::default();
        }
        if self.tools.is_stroking() {
            // The held stroke keeps its tool; the switch lands on release.
            return Dirty {
                toolbox: true,
                ..Dirty::default()
            };
        }
        self.tool_changed()
    }

    /// Bring the tool box and palette in line with a new active tool.
    fn tool_changed(&mut self) -> Dirty {
        self.toolbox.selector_select(self.tools.size());
        self.palette.set_picked(None);
        Dirty {
            toolbox: true,
            palette: true,
            cursor: true,
            ..Dirty::default()
        }
    }

    /// Set the active tool's size. A no-op for tools without sizes.
    pub fn set_tool_size(&mut self, size: ToolSize) -> Dirty {
        if !self.tools.set_size(size) {
            return Dirty::default();
        }
        self.toolbox.selector_select(size);
        Dirty {
            toolbox: true,
            cursor: true,
            ..Dirty::default()
        }
    }

    fn push_undo(&mut self) {
        self.history.push(self.canvas.snapshot());
    }

    /// Restore the canvas to the state before the last change.
    pub fn undo(&mut self) -> EditorResult<()> {
        let Some(snapshot) = self.history.pop() else {
            log::info!("Nothing to undo");
            return Err(EditorError::NothingToUndo);
        };
        self.canvas.restore(&snapshot);
        self.restart_gesture();
        log::info!("Undo ({} remaining)", self.history.len());
        Ok(())
    }

    /// After a whole-canvas change in the middle of a drag, the rest of the
    /// drag is a new undoable change starting from a fresh segment.
    fn restart_gesture(&mut self) {
        if let Gesture::Stroke { .. } = self.gesture {
            self.gesture = Gesture::Stroke { undo_pushed: false };
            self.tools.lift();
        }
    }

    /// Clear the canvas to its background colour. Undoable.
    pub fn new_canvas(&mut self) {
        self.push_undo();
        self.canvas.clear(self.canvas.background());
        self.restart_gesture();
        log::info!("New canvas");
    }

    /// Replace the canvas with an image, adopting its size. Undoable.
    pub fn open_image(&mut self, image: RgbaImage) {
        self.push_undo();
        log::info!("Opened {}x{} image", image.width(), image.height());
        self.canvas.replace(image);
        self.restart_gesture();
    }

    /// Load an image file into the canvas.
    pub fn load_from(&mut self, path: &Path) -> CanvasResult<()> {
        let image = Canvas::load_image_from_path(path)?;
        self.open_image(image);
        Ok(())
    }

    /// Save the canvas; returns the path actually written.
    pub fn save_to(&self, path: &Path) -> CanvasResult<PathBuf> {
        let written = self.canvas.save(path)?;
        log::info!("Saved {}", written.display());
        Ok(written)
    }

    /// Colour of the canvas pixel under a surface point.
    pub fn color_at(&self, point: Point) -> Option<Color> {
        let local = self.canvas_point(point)?;
        self.canvas.pixel(local.x.floor() as i64, local.y.floor() as i64)
    }
}

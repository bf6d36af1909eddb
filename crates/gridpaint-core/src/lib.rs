//! GridPaint Core Library
//!
//! Platform-agnostic core of the GridPaint raster editor: grid widgets,
//! bounded undo history, drawing tools and the editor that ties them together.

pub mod action;
pub mod canvas;
pub mod color;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod shortcuts;
pub mod surface;
pub mod tools;
pub mod widget;

pub use action::EditorAction;
pub use canvas::{Canvas, CanvasError, CanvasResult, ImageFileFormat, Snapshot};
pub use color::{Color, parse_hex_color};
pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use editor::{Dirty, Editor, EditorCommand, EditorError, EditorResult, Response};
pub use history::UndoStack;
pub use input::{InputState, Modifiers, MouseButton, PointerEvent};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use surface::{DrawCommand, Icon, ImageRef, RecordingSurface, Surface};
pub use tools::{CursorAffordance, DrawingTool, Tool, ToolKind, ToolManager, ToolSize};
pub use widget::{CellPos, GridWidget, Palette, Ribbon, RibbonButton, SelectionState, ToolBox};

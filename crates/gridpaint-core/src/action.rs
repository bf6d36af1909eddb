//! User-level commands shared by the ribbon and the keyboard shortcuts.

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// An editor command that isn't a pointer stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorAction {
    /// Clear the canvas to its background colour.
    New,
    /// Ask the shell for an image to open.
    Open,
    /// Ask the shell where to save the canvas.
    Save,
    Undo,
    /// Step the active tool's size up.
    SizeUp,
    /// Step the active tool's size down.
    SizeDown,
    SelectTool(ToolKind),
}

impl EditorAction {
    /// Short label for buttons and the shortcut list.
    pub fn label(self) -> &'static str {
        match self {
            EditorAction::New => "New",
            EditorAction::Open => "Open",
            EditorAction::Save => "Save",
            EditorAction::Undo => "Undo",
            EditorAction::SizeUp => "Larger",
            EditorAction::SizeDown => "Smaller",
            EditorAction::SelectTool(kind) => kind.name(),
        }
    }
}

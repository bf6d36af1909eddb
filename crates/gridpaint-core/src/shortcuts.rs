//! Keyboard shortcut registry.

use crate::action::EditorAction;
use crate::tools::ToolKind;

/// A keyboard shortcut bound to an editor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Uppercase letter or punctuation character.
    pub key: char,
    pub ctrl: bool,
    pub action: EditorAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: char, ctrl: bool, action: EditorAction, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new('Z', true, EditorAction::Undo, "Undo"),
            Shortcut::new('N', true, EditorAction::New, "New canvas"),
            Shortcut::new('O', true, EditorAction::Open, "Open image..."),
            Shortcut::new('S', true, EditorAction::Save, "Save image..."),
            Shortcut::new(']', false, EditorAction::SizeUp, "Larger tool size"),
            Shortcut::new('[', false, EditorAction::SizeDown, "Smaller tool size"),
            Shortcut::new('P', false, EditorAction::SelectTool(ToolKind::Pencil), "Pencil"),
            Shortcut::new('M', false, EditorAction::SelectTool(ToolKind::Marker), "Marker"),
            Shortcut::new('E', false, EditorAction::SelectTool(ToolKind::Eraser), "Eraser"),
            Shortcut::new('I', false, EditorAction::SelectTool(ToolKind::ColorPicker), "Color picker"),
        ]
    }

    /// Look up the action bound to a key press. Letters match either case.
    pub fn find(key: char, ctrl: bool) -> Option<EditorAction> {
        let key = key.to_ascii_uppercase();
        Self::all()
            .into_iter()
            .find(|s| s.key == key && s.ctrl == ctrl)
            .map(|s| s.action)
    }

    /// Log all shortcuts at info level.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:8} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_part_of_the_binding() {
        assert_eq!(ShortcutRegistry::find('z', true), Some(EditorAction::Undo));
        assert_eq!(ShortcutRegistry::find('z', false), None);
        assert_eq!(ShortcutRegistry::find('e', false), Some(EditorAction::SelectTool(ToolKind::Eraser)));
        assert_eq!(ShortcutRegistry::find('[', false), Some(EditorAction::SizeDown));
    }

    #[test]
    fn test_bindings_are_unique() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!(a.key == b.key && a.ctrl == b.ctrl), "{} bound twice", a.format());
            }
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new('S', true, EditorAction::Save, "").format(), "Ctrl+S");
        assert_eq!(Shortcut::new(']', false, EditorAction::SizeUp, "").format(), "]");
    }
}

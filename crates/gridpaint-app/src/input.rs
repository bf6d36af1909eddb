//! Translation of egui input events into editor input.

use egui::{Event, Key, PointerButton, Pos2};
use gridpaint_core::geometry::Point;
use gridpaint_core::{Modifiers, MouseButton, PointerEvent};

/// One input event the editor understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorInput {
    Pointer(PointerEvent),
    Key(char, Modifiers),
    PointerGone,
}

pub fn mouse_button(button: PointerButton) -> Option<MouseButton> {
    match button {
        PointerButton::Primary => Some(MouseButton::Left),
        PointerButton::Secondary => Some(MouseButton::Right),
        PointerButton::Middle => Some(MouseButton::Middle),
        PointerButton::Extra1 | PointerButton::Extra2 => None,
    }
}

pub fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        // Cmd on macOS
        ctrl: m.command,
        alt: m.alt,
    }
}

/// Character a shortcut key is registered under.
pub fn key_char(key: Key) -> Option<char> {
    let c = match key {
        Key::OpenBracket => '[',
        Key::CloseBracket => ']',
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
                _ => return None,
            }
        }
    };
    Some(c)
}

/// Map an egui event to editor input, with positions relative to `origin`.
pub fn translate(event: &Event, origin: Pos2) -> Option<EditorInput> {
    let local = |pos: Pos2| Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
    match event {
        Event::PointerMoved(pos) => Some(EditorInput::Pointer(PointerEvent::Move { position: local(*pos) })),
        Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = mouse_button(*button)?;
            let position = local(*pos);
            let event = if *pressed {
                PointerEvent::Down { position, button }
            } else {
                PointerEvent::Up { position, button }
            };
            Some(EditorInput::Pointer(event))
        }
        Event::PointerGone => Some(EditorInput::PointerGone),
        Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers: m,
            ..
        } => key_char(*key).map(|c| EditorInput::Key(c, modifiers(*m))),
        _ => None,
    }
}

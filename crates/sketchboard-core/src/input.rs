//! Pointer, wheel and keyboard events fed into the board.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Bitmask of pressed pointer buttons, as reported by pointer events.
pub const PRIMARY_BUTTON: u8 = 1;

/// A pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
    /// Bitmask of held buttons; [`PRIMARY_BUTTON`] is the left button / pen tip.
    pub buttons: u8,
    /// Pen pressure in `0.0..=1.0`; mice report 0.5 while pressed.
    pub pressure: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            buttons: 0,
            pressure: 0.5,
        }
    }

    /// Same event with the primary button held.
    pub fn pressed(mut self) -> Self {
        self.buttons |= PRIMARY_BUTTON;
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn is_primary_down(&self) -> bool {
        self.buttons & PRIMARY_BUTTON != 0
    }
}

/// Mouse wheel / trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub delta: Vec2,
}

/// Key press. `key` uses DOM key names (`"z"`, `"Backspace"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// What a key press asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DeleteSelected,
    Undo,
    Redo,
    Deselect,
}

impl ShortcutAction {
    /// Map a key press to an action.
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        let key = event.key.to_lowercase();
        let mods = event.modifiers;
        match key.as_str() {
            "backspace" | "delete" => Some(ShortcutAction::DeleteSelected),
            "escape" => Some(ShortcutAction::Deselect),
            "z" if mods.command() && mods.shift => Some(ShortcutAction::Redo),
            "z" if mods.command() => Some(ShortcutAction::Undo),
            "y" if mods.command() => Some(ShortcutAction::Redo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn test_undo_redo_shortcuts() {
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("z", ctrl())),
            Some(ShortcutAction::Undo)
        );
        let cmd_shift = Modifiers {
            meta: true,
            shift: true,
            ..Modifiers::NONE
        };
        // Shift reports an uppercase key on most platforms.
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("Z", cmd_shift)),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("y", ctrl())),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(ShortcutAction::from_key(&KeyEvent::new("z", Modifiers::NONE)), None);
    }

    #[test]
    fn test_delete_and_escape() {
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("Backspace", Modifiers::NONE)),
            Some(ShortcutAction::DeleteSelected)
        );
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("Delete", Modifiers::NONE)),
            Some(ShortcutAction::DeleteSelected)
        );
        assert_eq!(
            ShortcutAction::from_key(&KeyEvent::new("Escape", Modifiers::NONE)),
            Some(ShortcutAction::Deselect)
        );
    }

    #[test]
    fn test_pointer_buttons() {
        let event = PointerEvent::new(1.0, 2.0);
        assert!(!event.is_primary_down());
        assert!(event.pressed().is_primary_down());
    }
}

//! Input model
//!
//! Platform-neutral events fed into the toolkit, the per-frame input state
//! they accumulate into, and the clipboard service.

pub mod clipboard;
#[cfg(feature = "glfw")]
pub mod glfw_adapter;
pub mod processor;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use processor::InputProcessor;

use std::path::PathBuf;

use bitflags::bitflags;

/// Keys the toolkit reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    /// Anything not listed
    #[default]
    None,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Right arrow
    Right,
    /// Left arrow
    Left,
    /// Enter or keypad enter
    Enter,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Forward delete
    Delete,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Home
    Home,
    /// End
    End,
    /// Escape
    Escape,
    /// Insert
    Insert,
    /// Space bar
    Space,
    /// Letter A (select-all style shortcuts, line start)
    A,
    /// Letter B (cursor back)
    B,
    /// Letter C (copy)
    C,
    /// Letter D (delete forward)
    D,
    /// Letter E (line end)
    E,
    /// Letter F (cursor forward)
    F,
    /// Letter K (kill to end)
    K,
    /// Letter V (paste)
    V,
    /// Letter X (cut)
    X,
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Auto-repeat while held
    Repeat,
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt/option key
        const ALT = 1 << 2;
        /// Either super/command key
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    /// Modifier used for clipboard and editing shortcuts on this platform
    pub const fn action() -> Self {
        if cfg!(target_os = "macos") {
            Self::SUPER
        } else {
            Self::CONTROL
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Pointer press or release routed to interactive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Button went down
    Press,
    /// Button went up
    Release,
}

/// Platform event delivered to [`crate::ui::UIManager::handle_event`]
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in window pixels
    CursorMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Mouse button transition
    MouseButton {
        /// Which button
        button: MouseButton,
        /// Press or release
        action: KeyAction,
    },
    /// Keyboard transition
    Key {
        /// Which key
        key: Key,
        /// Press, release or repeat
        action: KeyAction,
        /// Held modifiers
        mods: Modifiers,
    },
    /// Text input of one codepoint
    Char(char),
    /// Wheel or trackpad scroll
    Scroll {
        /// Horizontal delta
        dx: f64,
        /// Vertical delta
        dy: f64,
    },
    /// Files dropped onto the window
    FileDrop(Vec<PathBuf>),
    /// Window resized
    Resized {
        /// New width
        width: f64,
        /// New height
        height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_sets() {
        let mods = Modifiers::SHIFT | Modifiers::CONTROL;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
        assert!(Modifiers::empty().is_empty());
        assert!(!Modifiers::action().is_empty());
    }
}

//! Per-frame input state
//!
//! Accumulates platform events between frames. Widgets read the pointer
//! and held keys from here during `update`; one-shot values (the repeat key
//! and the scroll delta) are cleared when the frame ends.

use std::collections::HashSet;

use super::{InputEvent, Key, KeyAction, Modifiers};
use crate::foundation::math::Vec2;

/// Pointer, keyboard and scroll state
#[derive(Debug, Clone)]
pub struct InputProcessor {
    pointer: Vec2,
    frozen_pointer: Option<Vec2>,
    pressed_keys: HashSet<Key>,
    repeat_key: Key,
    mods: Modifiers,
    scroll: Vec2,
    window_size: Vec2,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl InputProcessor {
    /// Input state for a window of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pointer: Vec2::zeros(),
            frozen_pointer: None,
            pressed_keys: HashSet::new(),
            repeat_key: Key::None,
            mods: Modifiers::empty(),
            scroll: Vec2::zeros(),
            window_size: Vec2::new(width, height),
        }
    }

    /// Fold one event into the state
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => self.pointer = Vec2::new(*x, *y),
            InputEvent::Key { key, action, mods } => {
                self.mods = *mods;
                match action {
                    KeyAction::Press => {
                        self.pressed_keys.insert(*key);
                        self.repeat_key = *key;
                    }
                    KeyAction::Repeat => self.repeat_key = *key,
                    KeyAction::Release => {
                        self.pressed_keys.remove(key);
                    }
                }
            }
            InputEvent::Scroll { dx, dy } => self.scroll += Vec2::new(*dx, *dy),
            InputEvent::Resized { width, height } => self.window_size = Vec2::new(*width, *height),
            InputEvent::MouseButton { .. } | InputEvent::Char(_) | InputEvent::FileDrop(_) => {}
        }
    }

    /// Real pointer position
    pub const fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer as seen by widgets other than an open pulldown
    ///
    /// While a pulldown owns the pointer this stays where it was when the
    /// pulldown opened, so the widget that opened it keeps its focus.
    pub fn widget_pointer(&self) -> Vec2 {
        self.frozen_pointer.unwrap_or(self.pointer)
    }

    /// Freeze the widget pointer at its current position
    pub fn freeze_pointer(&mut self) {
        if self.frozen_pointer.is_none() {
            self.frozen_pointer = Some(self.pointer);
        }
    }

    /// Release a frozen widget pointer
    pub fn thaw_pointer(&mut self) {
        self.frozen_pointer = None;
    }

    /// Whether the widget pointer is frozen
    pub const fn is_pointer_frozen(&self) -> bool {
        self.frozen_pointer.is_some()
    }

    /// Move the pointer without an event
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Vec2::new(x, y);
    }

    /// Whether `key` is held down
    pub fn is_key_down(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Key pressed or auto-repeated this frame, [`Key::None`] otherwise
    pub const fn repeat_key(&self) -> Key {
        self.repeat_key
    }

    /// Modifiers of the latest key event
    pub const fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// Scroll accumulated this frame
    pub const fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Current window size
    pub const fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// Clear the one-shot state at the end of a frame
    pub fn end_frame(&mut self) {
        self.repeat_key = Key::None;
        self.scroll = Vec2::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn key(key: Key, action: KeyAction) -> InputEvent {
        InputEvent::Key {
            key,
            action,
            mods: Modifiers::empty(),
        }
    }

    #[test]
    fn test_repeat_key_is_cleared_per_frame() {
        let mut input = InputProcessor::default();
        input.apply(&key(Key::Down, KeyAction::Press));
        assert_eq!(input.repeat_key(), Key::Down);
        assert!(input.is_key_down(Key::Down));
        input.end_frame();
        assert_eq!(input.repeat_key(), Key::None);
        assert!(input.is_key_down(Key::Down));
        input.apply(&key(Key::Down, KeyAction::Repeat));
        assert_eq!(input.repeat_key(), Key::Down);
        input.apply(&key(Key::Down, KeyAction::Release));
        assert!(!input.is_key_down(Key::Down));
    }

    #[test]
    fn test_scroll_accumulates_until_frame_end() {
        let mut input = InputProcessor::default();
        input.apply(&InputEvent::Scroll { dx: 0.0, dy: 1.0 });
        input.apply(&InputEvent::Scroll { dx: 0.5, dy: 2.0 });
        assert_relative_eq!(input.scroll().y, 3.0);
        assert_relative_eq!(input.scroll().x, 0.5);
        input.end_frame();
        assert_relative_eq!(input.scroll().y, 0.0);
    }

    #[test]
    fn test_frozen_pointer() {
        let mut input = InputProcessor::default();
        input.apply(&InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        input.freeze_pointer();
        input.apply(&InputEvent::CursorMoved { x: 300.0, y: 400.0 });
        assert_relative_eq!(input.widget_pointer().x, 10.0);
        assert_relative_eq!(input.pointer().x, 300.0);
        input.thaw_pointer();
        assert_relative_eq!(input.widget_pointer().y, 400.0);
    }

    #[test]
    fn test_resize() {
        let mut input = InputProcessor::new(100.0, 100.0);
        input.apply(&InputEvent::Resized { width: 640.0, height: 480.0 });
        assert_relative_eq!(input.window_size().x, 640.0);
    }
}

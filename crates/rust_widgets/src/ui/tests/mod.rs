//! Frame-level scenarios driving the whole toolkit through [`super::UIManager`]

mod frame_scenarios;

use std::rc::Rc;

use super::input::{InputEvent, Key, KeyAction, Modifiers, MouseButton};
use super::rendering::RecordingCanvas;
use super::UIManager;
use crate::foundation::time::ManualClock;

/// Manager on a hand-driven clock plus the canvas of the latest frame
struct Session {
    ui: UIManager,
    clock: Rc<ManualClock>,
    canvas: RecordingCanvas,
}

impl Session {
    fn new() -> Self {
        let clock = Rc::new(ManualClock::new());
        let ui = UIManager::new().with_clock(Box::new(clock.clone()));
        Self {
            ui,
            clock,
            canvas: RecordingCanvas::default(),
        }
    }

    fn frame(&mut self) {
        self.canvas.clear();
        self.ui.update(&mut self.canvas);
    }

    fn hover(&mut self, x: f64, y: f64) {
        self.ui.handle_event(&InputEvent::CursorMoved { x, y });
        self.frame();
    }

    fn mouse(&mut self, action: KeyAction) {
        self.ui.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            action,
        });
    }

    fn click(&mut self) {
        self.mouse(KeyAction::Press);
        self.mouse(KeyAction::Release);
    }

    fn key(&mut self, key: Key, action: KeyAction) {
        self.key_with(key, action, Modifiers::empty());
    }

    fn key_with(&mut self, key: Key, action: KeyAction, mods: Modifiers) {
        self.ui.handle_event(&InputEvent::Key { key, action, mods });
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.ui.handle_event(&InputEvent::Char(c));
        }
    }
}

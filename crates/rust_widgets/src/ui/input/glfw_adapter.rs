//! Translation from GLFW window events

use glfw::{Action, WindowEvent};

use super::{InputEvent, Key, KeyAction, Modifiers, MouseButton};

/// Map a GLFW event onto the toolkit's input model
///
/// Events the toolkit has no use for yield `None`.
pub fn translate(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x: *x, y: *y }),
        WindowEvent::MouseButton(button, action, _) => Some(InputEvent::MouseButton {
            button: translate_button(*button)?,
            action: translate_action(*action),
        }),
        WindowEvent::Key(key, _, action, mods) => Some(InputEvent::Key {
            key: translate_key(*key),
            action: translate_action(*action),
            mods: translate_mods(*mods),
        }),
        WindowEvent::Char(c) => Some(InputEvent::Char(*c)),
        WindowEvent::Scroll(dx, dy) => Some(InputEvent::Scroll { dx: *dx, dy: *dy }),
        WindowEvent::FileDrop(paths) => Some(InputEvent::FileDrop(paths.clone())),
        WindowEvent::FramebufferSize(w, h) => Some(InputEvent::Resized {
            width: f64::from(*w),
            height: f64::from(*h),
        }),
        _ => None,
    }
}

fn translate_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

const fn translate_action(action: Action) -> KeyAction {
    match action {
        Action::Press => KeyAction::Press,
        Action::Release => KeyAction::Release,
        Action::Repeat => KeyAction::Repeat,
    }
}

const fn translate_key(key: glfw::Key) -> Key {
    match key {
        glfw::Key::Up => Key::Up,
        glfw::Key::Down => Key::Down,
        glfw::Key::Right => Key::Right,
        glfw::Key::Left => Key::Left,
        glfw::Key::Enter | glfw::Key::KpEnter => Key::Enter,
        glfw::Key::Tab => Key::Tab,
        glfw::Key::Backspace => Key::Backspace,
        glfw::Key::Delete => Key::Delete,
        glfw::Key::PageUp => Key::PageUp,
        glfw::Key::PageDown => Key::PageDown,
        glfw::Key::Home => Key::Home,
        glfw::Key::End => Key::End,
        glfw::Key::Escape => Key::Escape,
        glfw::Key::Insert => Key::Insert,
        glfw::Key::Space => Key::Space,
        glfw::Key::A => Key::A,
        glfw::Key::B => Key::B,
        glfw::Key::C => Key::C,
        glfw::Key::D => Key::D,
        glfw::Key::E => Key::E,
        glfw::Key::F => Key::F,
        glfw::Key::K => Key::K,
        glfw::Key::V => Key::V,
        glfw::Key::X => Key::X,
        _ => Key::None,
    }
}

fn translate_mods(mods: glfw::Modifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(glfw::Modifiers::Shift));
    out.set(Modifiers::CONTROL, mods.contains(glfw::Modifiers::Control));
    out.set(Modifiers::ALT, mods.contains(glfw::Modifiers::Alt));
    out.set(Modifiers::SUPER, mods.contains(glfw::Modifiers::Super));
    out
}

//! Text-editing engine
//!
//! At most one edit session is live at a time. A session edits a
//! caller-owned codepoint buffer in place; UTF-8 only appears at the
//! boundaries (clipboard, [`TextInput::get`], [`set_buffer`]).

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::input::{Clipboard, Key, Modifiers};
use super::rendering::GlyphMetrics;

/// Codepoint buffer shared between a widget and the engine
pub type CharBuffer = Rc<RefCell<Vec<char>>>;

/// Linked autocomplete list
pub type AutocompleteRef = Rc<RefCell<dyn Autocomplete>>;

/// Replace the contents of a codepoint buffer with UTF-8 text
pub fn set_buffer(buffer: &mut Vec<char>, text: &str) {
    buffer.clear();
    buffer.extend(text.chars());
}

/// Encode a codepoint buffer as UTF-8
pub fn buffer_to_string(buffer: &[char]) -> String {
    buffer.iter().collect()
}

/// Which codepoints an edit session accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputStyle {
    /// Anything
    #[default]
    Text,
    /// Digits, one decimal point, a leading minus
    Number,
}

impl InputStyle {
    /// Whether `c` may be inserted at `cursor`
    pub fn accepts(self, buffer: &[char], cursor: usize, c: char) -> bool {
        match self {
            Self::Text => true,
            // nothing goes in front of a leading sign
            Self::Number if cursor == 0 && buffer.first() == Some(&'-') => false,
            Self::Number => match c {
                '0'..='9' => true,
                '.' => !buffer.contains(&'.'),
                '-' => cursor == 0 && buffer.first() != Some(&'-'),
                _ => false,
            },
        }
    }
}

/// Candidate list driven by the editing engine
pub trait Autocomplete {
    /// Filter candidates by substring; returns whether any remain
    fn set_filter(&mut self, text: &str) -> bool;

    /// Whether the list is showing
    fn is_opened(&self) -> bool;

    /// Show the list
    fn open(&mut self);

    /// Hide the list
    fn close(&mut self);

    /// Candidate highlighted since the last call
    fn take_candidate(&mut self) -> Option<String>;
}

struct Session {
    buffer: CharBuffer,
    cursor: usize,
    max_length: usize,
    style: InputStyle,
    autocomplete: Option<AutocompleteRef>,
}

/// The single edit session, when one is live
#[derive(Default)]
pub struct TextInput {
    session: Option<Session>,
}

impl TextInput {
    /// Idle engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin editing `buffer`, cursor at the end; ignored while editing
    pub fn start(&mut self, buffer: &CharBuffer, max_length: usize) -> bool {
        if self.session.is_some() {
            return false;
        }
        let cursor = buffer.borrow().len();
        debug!("Edit session started ({} codepoints, max {})", cursor, max_length);
        self.session = Some(Session {
            buffer: buffer.clone(),
            cursor,
            max_length,
            style: InputStyle::Text,
            autocomplete: None,
        });
        true
    }

    /// End the session, closing an open autocomplete list first
    pub fn finish(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(ac) = &session.autocomplete {
            let mut ac = ac.borrow_mut();
            if ac.is_opened() {
                ac.close();
            }
        }
        debug!("Edit session finished");
    }

    /// Whether a session is live
    pub const fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the live session edits `buffer`
    pub fn is_editing_buffer(&self, buffer: &CharBuffer) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| Rc::ptr_eq(&s.buffer, buffer))
    }

    /// Set the validator of the live session
    pub fn set_input_style(&mut self, style: InputStyle) {
        if let Some(session) = &mut self.session {
            session.style = style;
        }
    }

    /// Link an autocomplete list to the live session
    pub fn set_autocomplete(&mut self, autocomplete: Option<AutocompleteRef>) {
        if let Some(session) = &mut self.session {
            session.autocomplete = autocomplete;
        }
    }

    /// Cursor index in codepoints
    pub fn cursor(&self) -> Option<usize> {
        self.session
            .as_ref()
            .map(|s| s.cursor.min(s.buffer.borrow().len()))
    }

    /// Move the cursor, clamped to the buffer
    pub fn set_cursor(&mut self, index: usize) {
        if let Some(session) = &mut self.session {
            session.cursor = index.min(session.buffer.borrow().len());
        }
    }

    /// Pixel offset of the cursor from the start of the text
    pub fn cursor_offset(&self, metrics: &GlyphMetrics) -> f64 {
        self.session.as_ref().map_or(0.0, |s| {
            let buffer = s.buffer.borrow();
            metrics.measure_chars(&buffer[..s.cursor.min(buffer.len())])
        })
    }

    /// Text of the live buffer, empty while idle
    pub fn get(&self) -> String {
        self.session
            .as_ref()
            .map(|s| buffer_to_string(&s.buffer.borrow()))
            .unwrap_or_default()
    }

    /// Cursor one codepoint left
    pub fn left(&mut self) {
        if let Some(session) = &mut self.session {
            session.cursor = session.clamp_cursor().saturating_sub(1);
        }
    }

    /// Cursor one codepoint right
    pub fn right(&mut self) {
        if let Some(session) = &mut self.session {
            session.cursor = (session.clamp_cursor() + 1).min(session.buffer.borrow().len());
        }
    }

    /// Cursor to the start
    pub fn home(&mut self) {
        if let Some(session) = &mut self.session {
            session.cursor = 0;
        }
    }

    /// Cursor to the end
    pub fn end(&mut self) {
        if let Some(session) = &mut self.session {
            session.cursor = session.buffer.borrow().len();
        }
    }

    /// Remove the codepoint before the cursor, or everything before it
    pub fn backspace(&mut self, to_start: bool) {
        let changed = self.session.as_mut().is_some_and(|s| {
            if s.clamp_cursor() == 0 {
                return false;
            }
            let start = if to_start { 0 } else { s.cursor - 1 };
            s.buffer.borrow_mut().drain(start..s.cursor);
            s.cursor = start;
            true
        });
        if changed {
            self.refresh_autocomplete();
        }
    }

    /// Remove the codepoint at the cursor, or everything after it
    pub fn delete(&mut self, to_end: bool) {
        let changed = self.session.as_mut().is_some_and(|s| {
            s.clamp_cursor();
            let mut buffer = s.buffer.borrow_mut();
            if s.cursor >= buffer.len() {
                return false;
            }
            let end = if to_end { buffer.len() } else { s.cursor + 1 };
            buffer.drain(s.cursor..end);
            true
        });
        if changed {
            self.refresh_autocomplete();
        }
    }

    /// Insert one codepoint at the cursor
    ///
    /// Rejected at the length limit or when the validator refuses it.
    pub fn text_input(&mut self, c: char) -> bool {
        let inserted = self.session.as_mut().is_some_and(|s| s.insert(c));
        if inserted {
            self.refresh_autocomplete();
        }
        inserted
    }

    /// Insert UTF-8 text at the cursor, codepoint by codepoint
    pub fn paste(&mut self, text: &str) {
        let inserted = self
            .session
            .as_mut()
            .is_some_and(|s| text.chars().fold(false, |any, c| s.insert(c) || any));
        if inserted {
            self.refresh_autocomplete();
        }
    }

    /// Put the buffer on the clipboard
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        if self.session.is_some() {
            clipboard.set(&self.get());
        }
    }

    /// Put the buffer on the clipboard and clear it
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) {
        let Some(session) = &mut self.session else {
            return;
        };
        clipboard.set(&buffer_to_string(&session.buffer.borrow()));
        let had_text = !session.buffer.borrow().is_empty();
        session.buffer.borrow_mut().clear();
        session.cursor = 0;
        if had_text {
            self.refresh_autocomplete();
        }
    }

    /// Editing keys; returns whether the key was consumed
    pub fn key_input(&mut self, key: Key, mods: Modifiers, clipboard: &mut dyn Clipboard) -> bool {
        if self.session.is_none() {
            return false;
        }
        let shortcut = mods == Modifiers::action();
        let emacs = mods == Modifiers::CONTROL;
        match key {
            Key::Left => self.left(),
            Key::Right => self.right(),
            Key::Home => self.home(),
            Key::End => self.end(),
            Key::Backspace => self.backspace(shortcut || emacs || mods == Modifiers::SHIFT),
            Key::Delete => self.delete(shortcut || emacs),
            Key::C if shortcut => self.copy(clipboard),
            Key::X if shortcut => self.cut(clipboard),
            Key::V if shortcut => {
                if let Some(text) = clipboard.get() {
                    self.paste(&text);
                }
            }
            Key::A if emacs => self.home(),
            Key::E if emacs => self.end(),
            Key::B if emacs => self.left(),
            Key::F if emacs => self.right(),
            Key::D if emacs => self.delete(false),
            Key::K if emacs => self.delete(true),
            _ => return false,
        }
        true
    }

    /// Apply a candidate highlighted in the linked list since the last poll
    pub fn poll_autocomplete(&mut self) -> bool {
        let picked = self
            .session
            .as_ref()
            .and_then(|s| s.autocomplete.as_ref())
            .and_then(|ac| ac.borrow_mut().take_candidate());
        match picked {
            Some(text) => {
                self.apply_candidate(&text);
                true
            }
            None => false,
        }
    }

    /// Overwrite the buffer with a candidate and move the cursor to its end
    pub fn apply_candidate(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            let mut buffer = session.buffer.borrow_mut();
            buffer.clear();
            buffer.extend(text.chars().take(session.max_length));
            session.cursor = session.max_length.min(buffer.len());
        }
    }

    fn refresh_autocomplete(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(ac) = &session.autocomplete else {
            return;
        };
        let text = buffer_to_string(&session.buffer.borrow());
        let mut ac = ac.borrow_mut();
        if ac.set_filter(&text) && !text.is_empty() && !ac.is_opened() {
            ac.open();
        }
    }
}

impl Session {
    /// Pull the cursor back inside a buffer the owner may have shortened
    fn clamp_cursor(&mut self) -> usize {
        self.cursor = self.cursor.min(self.buffer.borrow().len());
        self.cursor
    }

    fn insert(&mut self, c: char) -> bool {
        self.clamp_cursor();
        let mut buffer = self.buffer.borrow_mut();
        if buffer.len() >= self.max_length || !self.style.accepts(&buffer, self.cursor, c) {
            return false;
        }
        let at = self.cursor.min(buffer.len());
        buffer.insert(at, c);
        self.cursor = at + 1;
        true
    }
}

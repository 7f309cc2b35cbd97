//! System clipboard seam

/// Clipboard service used by cut, copy and paste
pub trait Clipboard {
    /// Current clipboard text, if any
    fn get(&self) -> Option<String>;

    /// Replace the clipboard text
    fn set(&mut self, text: &str);
}

/// In-process clipboard for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    /// Clipboard holding `text`
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get(&self) -> Option<String> {
        self.text.clone()
    }

    fn set(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

#[cfg(feature = "glfw")]
impl Clipboard for glfw::Window {
    fn get(&self) -> Option<String> {
        self.get_clipboard_string()
    }

    fn set(&mut self, text: &str) {
        self.set_clipboard_string(text);
    }
}

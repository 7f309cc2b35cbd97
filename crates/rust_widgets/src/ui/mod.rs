//! UI System Module
//!
//! Widget composition, focus and input on top of a caller-supplied canvas.
//!
//! Architecture:
//! - UIManager: central driver owning every widget kind and the input services
//! - bbox / identity / layer / focus: the mechanism every widget kind shares
//! - modal: global event suppression used by dialogs and slider drags
//! - text_input: the single UTF-8 editing session
//! - widgets/: the concrete widget kinds
//! - rendering/: the drawing seam and a recording canvas
//! - input/: platform-neutral events and per-frame input state

pub mod bbox;
pub mod focus;
pub mod frame;
pub mod identity;
pub mod input;
pub mod layer;
pub mod manager;
pub mod modal;
pub mod rendering;
pub mod text_input;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use bbox::{Align, Rect};
pub use focus::{FocusArbiter, FocusCheck, Focusable, Pressable};
pub use frame::FrameContext;
pub use identity::{weak_widget, Dispatch, Geometry, Handle, ParentRef, Widget, WidgetRef};
pub use layer::{Layer, DEFAULT_LAYER};
pub use manager::{UIManager, WidgetHandle};
pub use modal::{EventGate, ModalAction, ModalHandler};
pub use text_input::{Autocomplete, CharBuffer, InputStyle, TextInput};

// Re-export input types
pub use input::{ClickAction, Clipboard, InputEvent, InputProcessor, Key, KeyAction, MemoryClipboard, Modifiers, MouseButton};

// Re-export rendering types
pub use rendering::{Canvas, DrawCommand, GlyphMetrics, IconId, IconRegistry, ImageDecoder, ImageHandle, RecordingCanvas};

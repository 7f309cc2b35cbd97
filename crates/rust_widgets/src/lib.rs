//! # Rust Widgets
//!
//! A retained-mode 2D widget toolkit: buttons, check boxes, labels, text
//! fields, sliders, drop-down lists, dialogs, notifications and scroll
//! containers, drawn through a caller-supplied canvas.
//!
//! ## Features
//!
//! - **Layers**: named pools of widgets per kind for screen navigation
//! - **Focus arbitration**: one pointer owner per widget kind each frame
//! - **Modal input**: dialogs and slider drags claim exclusive input
//! - **Text editing**: a UTF-8 aware edit session with autocomplete
//! - **Backend agnostic**: all drawing goes through the [`ui::Canvas`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_widgets::prelude::*;
//!
//! let mut ui = UIManager::new();
//! let button = ui.create_text_button("Start", 100.0, 100.0, true);
//! button.borrow_mut().set_on_press(|()| println!("started"));
//!
//! let mut canvas = RecordingCanvas::default();
//! ui.handle_event(&InputEvent::CursorMoved { x: 110.0, y: 110.0 });
//! ui.update(&mut canvas);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod ui;

pub use error::{WidgetError, WidgetResult};

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        config::{Config, ToolkitConfig},
        error::{WidgetError, WidgetResult},
        foundation::{
            math::{colors, Color, Vec2},
            time::{Clock, ManualClock, SystemClock},
        },
        ui::{
            widgets::{ColorType, Decision, NumberType},
            Canvas, ClickAction, Clipboard, Handle, InputEvent, InputStyle, Key, KeyAction, MemoryClipboard,
            Modifiers, MouseButton, RecordingCanvas, UIManager, Widget, WidgetHandle, DEFAULT_LAYER,
        },
    };
}

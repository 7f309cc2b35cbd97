//! Widget kinds
//!
//! Each kind pairs a widget type (shared through [`Handle`]) with a system
//! that owns the kind's layer registry and focus arbiter and runs the
//! kind's per-frame update.

pub mod check_box;
pub mod dialog;
pub mod image_button;
pub mod label;
pub mod notification;
pub mod pulldown;
pub mod scroll_box;
pub mod sheet;
pub mod slide_bar;
pub mod text_box;
pub mod text_button;

pub use check_box::{CheckBox, CheckBoxSystem};
pub use dialog::{Decision, Dialog, DialogSystem};
pub use image_button::{ImageButton, ImageButtonSystem};
pub use label::{Label, LabelSystem};
pub use notification::{Notification, NotificationSystem};
pub use pulldown::{Pulldown, PulldownSystem};
pub use scroll_box::{ScrollBox, ScrollBoxSystem};
pub use sheet::{Sheet, SheetSystem};
pub use slide_bar::{NumberType, SlideBar, SlideBarSystem};
pub use text_box::{TextBox, TextBoxSystem};
pub use text_button::{ColorType, TextButton, TextButtonSystem};

use std::fmt;

use super::identity::Handle;

/// Single-subscriber event hook
pub struct Callback<A> {
    slot: Option<Box<dyn FnMut(A)>>,
}

impl<A> Default for Callback<A> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.slot.is_some() { "Callback(set)" } else { "Callback(none)" })
    }
}

impl<A> Callback<A> {
    /// Install the subscriber, replacing any previous one
    pub fn set(&mut self, f: impl FnMut(A) + 'static) {
        self.slot = Some(Box::new(f));
    }

    /// Remove the subscriber
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Whether a subscriber is installed
    pub const fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    fn take(&mut self) -> Option<Box<dyn FnMut(A)>> {
        self.slot.take()
    }

    fn restore(&mut self, f: Box<dyn FnMut(A)>) {
        if self.slot.is_none() {
            self.slot = Some(f);
        }
    }
}

/// Invoke a widget's callback with no borrow of the widget held, so the
/// subscriber may read or modify the widget it belongs to
pub(crate) fn emit<T, A>(item: &Handle<T>, slot: fn(&mut T) -> &mut Callback<A>, arg: A) {
    let taken = slot(&mut item.borrow_mut()).take();
    if let Some(mut f) = taken {
        f(arg);
        slot(&mut item.borrow_mut()).restore(f);
    }
}

//! Pointer focus arbitration
//!
//! One [`FocusArbiter`] per widget kind. Each frame the kind walks its active
//! layer in insertion order and asks the arbiter whether each widget owns the
//! pointer; the first widget whose box contains the pointer wins, regardless
//! of depth. Insertion order is the z-order proxy screens are built around.

use std::rc::Rc;

use super::bbox::Rect;
use super::identity::Handle;
use crate::foundation::math::Vec2;

/// Widgets that can keep focus without the pointer over them
pub trait Focusable {
    /// Pressed-and-held or editing in place
    fn is_held(&self) -> bool {
        false
    }
}

/// Widgets with press/release semantics
pub trait Pressable: Focusable {
    /// Whether a press landed on this widget and has not been released
    fn pressed(&self) -> bool;

    /// Mark or unmark the pending press
    fn set_pressed(&mut self, pressed: bool);
}

/// Result of one arbitration check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusCheck {
    /// The widget is the focused one this frame
    pub is_mine: bool,
    /// The pointer claimed the widget during this check
    pub hit: bool,
    /// Focus moved onto the widget during this check
    pub gained: bool,
}

/// Single-owner pointer focus for one widget kind
pub struct FocusArbiter<T> {
    focused: Option<Handle<T>>,
    found: bool,
}

impl<T> Default for FocusArbiter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FocusArbiter<T> {
    /// Arbiter with nothing focused
    pub const fn new() -> Self {
        Self {
            focused: None,
            found: false,
        }
    }

    /// Reset the per-frame search
    ///
    /// While events are suppressed the search starts out satisfied: nothing
    /// can claim focus and stored focus is left as it was.
    pub fn begin_frame(&mut self, events_enabled: bool) {
        self.found = !events_enabled;
    }

    /// Test one widget against the pointer
    ///
    /// `enabled` is the container gate from [`super::identity::Dispatch`]. A
    /// widget that gains focus has its pending press cleared by the caller.
    pub fn check(&mut self, item: &Handle<T>, bbox: &Rect, enabled: bool, pointer: Vec2) -> FocusCheck {
        let mut check = FocusCheck {
            is_mine: self.is_focused(item),
            hit: false,
            gained: false,
        };
        if !self.found && enabled && bbox.contains(pointer.x, pointer.y) {
            check.is_mine = true;
            check.hit = true;
            self.found = true;
            if !self.is_focused(item) {
                self.focused = Some(item.clone());
                check.gained = true;
            }
        }
        check
    }

    /// Whether some widget claimed the pointer this frame
    pub const fn found(&self) -> bool {
        self.found
    }

    /// Currently focused widget
    pub const fn focused(&self) -> Option<&Handle<T>> {
        self.focused.as_ref()
    }

    /// Whether `item` is the focused widget
    pub fn is_focused(&self, item: &Handle<T>) -> bool {
        self.focused.as_ref().is_some_and(|f| Rc::ptr_eq(f, item))
    }

    /// Force focus onto a widget
    pub fn set_focused(&mut self, item: Option<Handle<T>>) {
        self.focused = item;
    }

    /// Drop stored focus
    pub fn clear(&mut self) {
        self.focused = None;
        self.found = false;
    }

    /// Forget `item` if it is focused
    pub fn forget(&mut self, item: &Handle<T>) {
        if self.is_focused(item) {
            self.focused = None;
        }
    }
}

impl<T: Focusable> FocusArbiter<T> {
    /// Finish the frame: focus that nothing claimed is dropped unless held
    pub fn end_frame(&mut self) {
        if self.found {
            return;
        }
        let held = self.focused.as_ref().is_some_and(|f| f.borrow().is_held());
        if !held {
            self.focused = None;
        }
    }
}

impl<T: Pressable> FocusArbiter<T> {
    /// Record a press on the focused widget
    pub fn press(&self) -> Option<Handle<T>> {
        let focused = self.focused.clone()?;
        focused.borrow_mut().set_pressed(true);
        Some(focused)
    }

    /// Complete a press; returns the widget to fire only if it was pressed
    /// and is still the focused widget
    pub fn release(&self) -> Option<Handle<T>> {
        let focused = self.focused.clone()?;
        let was_pressed = {
            let mut item = focused.borrow_mut();
            let pressed = item.pressed();
            item.set_pressed(false);
            pressed
        };
        was_pressed.then_some(focused)
    }
}

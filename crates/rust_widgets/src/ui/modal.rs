//! Modal event suppression
//!
//! While suppressed, ordinary widget arbitration sees every widget as
//! disabled and only [`ModalAction`]s reach the single installed handler.
//! Dialogs hold suppression while open; sliders hold it during a drag.

use log::{debug, warn};

use crate::error::{WidgetError, WidgetResult};

/// Restricted action set delivered while events are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Left mouse press
    Click,
    /// Left mouse release
    Release,
    /// Enter key press
    EnterKey,
    /// Escape key press
    EscapeKey,
}

/// Receiver of modal actions; returning `true` resumes normal dispatch
pub trait ModalHandler {
    /// Handle one action
    fn on_action(&mut self, action: ModalAction) -> bool;
}

impl<F: FnMut(ModalAction) -> bool> ModalHandler for F {
    fn on_action(&mut self, action: ModalAction) -> bool {
        self(action)
    }
}

/// Global enable flag plus the fallback handler of the current owner
pub struct EventGate {
    enabled: bool,
    fallback: Option<Box<dyn ModalHandler>>,
}

impl Default for EventGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventGate")
            .field("enabled", &self.enabled)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

impl EventGate {
    /// Gate in the active state
    pub fn new() -> Self {
        Self {
            enabled: true,
            fallback: None,
        }
    }

    /// Whether ordinary dispatch is running
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Claim exclusive input; fails while another owner holds it
    pub fn disable_event(&mut self, fallback: impl ModalHandler + 'static) -> WidgetResult<()> {
        if !self.enabled {
            warn!("Event suppression requested while already suppressed");
            return Err(WidgetError::EventsSuppressed);
        }
        debug!("Events suppressed");
        self.enabled = false;
        self.fallback = Some(Box::new(fallback));
        Ok(())
    }

    /// Return to the active state, dropping any fallback
    pub fn enable_event(&mut self) {
        if !self.enabled {
            debug!("Events resumed");
        }
        self.enabled = true;
        self.fallback = None;
    }

    /// Deliver an action to the fallback handler
    ///
    /// Returns whether dispatch resumed. Ignored while active.
    pub fn dispatch(&mut self, action: ModalAction) -> bool {
        if self.enabled {
            return false;
        }
        let resume = self
            .fallback
            .as_mut()
            .is_some_and(|handler| handler.on_action(action));
        if resume {
            self.enable_event();
        }
        resume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_second_owner_is_rejected() {
        let mut gate = EventGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = log.clone();
        gate.disable_event(move |a| {
            first.borrow_mut().push(a);
            false
        })
        .unwrap();

        let err = gate.disable_event(|_| true).unwrap_err();
        assert!(matches!(err, WidgetError::EventsSuppressed));
        assert!(!gate.is_enabled());

        // the first owner still receives actions
        assert!(!gate.dispatch(ModalAction::Click));
        assert_eq!(*log.borrow(), vec![ModalAction::Click]);
    }

    #[test]
    fn test_handler_resumes_dispatch() {
        let mut gate = EventGate::new();
        gate.disable_event(|a| a == ModalAction::EscapeKey).unwrap();
        assert!(!gate.dispatch(ModalAction::EnterKey));
        assert!(!gate.is_enabled());
        assert!(gate.dispatch(ModalAction::EscapeKey));
        assert!(gate.is_enabled());
        assert!(gate.disable_event(|_| false).is_ok());
    }

    #[test]
    fn test_enable_event_clears_fallback() {
        let mut gate = EventGate::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        gate.disable_event(move |_| {
            *counter.borrow_mut() += 1;
            false
        })
        .unwrap();
        gate.enable_event();
        assert!(gate.is_enabled());
        assert!(!gate.dispatch(ModalAction::Click));
        assert_eq!(*hits.borrow(), 0);
    }
}

//! Whole-frame scenarios: modal suppression, layers, containers and overlays

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::WidgetError;
use crate::foundation::math::colors;
use crate::ui::input::{InputEvent, Key, KeyAction};
use crate::ui::layer::DEFAULT_LAYER;
use crate::ui::widgets::{Decision, ScrollBox};

use super::Session;

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<RefCell<u32>>, impl FnMut(()) + 'static) {
        let hits = Rc::new(RefCell::new(0));
        let count = hits.clone();
        (hits, move |()| *count.borrow_mut() += 1)
    }

    #[test]
    fn test_dialog_blocks_other_widgets_until_decided() {
        let mut s = Session::new();
        let button = s.ui.create_text_button("Go", 10.0, 10.0, false);
        let (hits, on_press) = counter();
        button.borrow_mut().set_on_press(on_press);

        let dialog = s.ui.create_dialog("Really?", false);
        let decided = Rc::new(RefCell::new(Vec::new()));
        let log = decided.clone();
        dialog.borrow_mut().set_decided(move |d| log.borrow_mut().push(d));
        s.ui.open_dialog(&dialog).unwrap();
        assert!(!s.ui.events_enabled());

        s.hover(20.0, 20.0);
        assert!(s.ui.text_buttons().focused().is_none());
        assert!(s.canvas.has_text("Really?"));
        s.click();
        assert_eq!(*hits.borrow(), 0);

        s.key(Key::Escape, KeyAction::Press);
        assert_eq!(*decided.borrow(), vec![Decision::Ok]);
        assert!(s.ui.events_enabled());
        assert!(s.ui.current_dialog().is_none());

        s.hover(21.0, 21.0);
        s.click();
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_second_dialog_is_rejected() {
        let mut s = Session::new();
        let first = s.ui.create_dialog("first", true);
        let second = s.ui.create_dialog("second", true);
        s.ui.open_dialog(&first).unwrap();
        assert!(matches!(s.ui.open_dialog(&second), Err(WidgetError::DialogBusy)));
        s.frame();
        assert!(s.canvas.has_text("first"));
        assert!(!s.canvas.has_text("second"));

        s.ui.close_dialog();
        assert!(s.ui.events_enabled());
        s.ui.open_dialog(&second).unwrap();
    }

    #[test]
    fn test_rebinding_the_active_layer_keeps_focus() {
        let mut s = Session::new();
        s.ui.create_check_box("Sound", 10.0, 10.0, true);
        s.hover(20.0, 20.0);
        assert!(s.ui.check_boxes().focused().is_some());

        assert!(!s.ui.bind_layer(DEFAULT_LAYER));
        assert!(s.ui.check_boxes().focused().is_some());

        assert!(s.ui.bind_layer("options"));
        assert!(s.ui.check_boxes().focused().is_none());
        s.frame();
        assert!(!s.canvas.has_text("Sound"));

        s.ui.bind_layer(DEFAULT_LAYER);
        s.frame();
        assert!(s.canvas.has_text("Sound"));
    }

    #[test]
    fn test_clear_layer_drops_its_widgets() {
        let mut s = Session::new();
        s.ui.bind_layer("menu");
        s.ui.create_label("Title", 0.0, 0.0, colors::WHITE, colors::CLEAR);
        s.frame();
        assert!(s.canvas.has_text("Title"));
        s.ui.clear_layer("menu");
        s.frame();
        assert!(!s.canvas.has_text("Title"));
    }

    #[test]
    fn test_scroll_box_culls_and_reveals_children() {
        let mut s = Session::new();
        let scroll = s.ui.create_scroll_box(0.0, 0.0, 300.0, 200.0);
        let near = s.ui.create_label("near", 10.0, 10.0, colors::WHITE, colors::CLEAR);
        let far = s.ui.create_label("far", 10.0, 500.0, colors::WHITE, colors::CLEAR);
        ScrollBox::append(&scroll, &near);
        ScrollBox::append(&scroll, &far);

        s.hover(50.0, 50.0);
        assert!(s.canvas.has_text("near"));
        assert!(!s.canvas.has_text("far"));

        s.ui.handle_event(&InputEvent::Scroll { dx: 0.0, dy: -60.0 });
        s.frame();
        assert!(s.canvas.has_text("far"));
        assert!(!s.canvas.has_text("near"));
    }

    #[test]
    fn test_scroll_box_focus_needs_enabled_events() {
        let mut s = Session::new();
        let scroll = s.ui.create_scroll_box(0.0, 0.0, 300.0, 200.0);
        let check = s.ui.create_check_box("inside", 10.0, 10.0, false);
        ScrollBox::append(&scroll, &check);
        s.frame();
        s.hover(20.0, 20.0);
        assert!(s.ui.check_boxes().focused().is_some());

        let dialog = s.ui.create_dialog("wait", false);
        s.ui.open_dialog(&dialog).unwrap();
        s.hover(21.0, 21.0);
        assert!(s.ui.scroll_boxes().focused().is_none());
    }

    #[test]
    fn test_slider_drag_holds_input_until_release() {
        let mut s = Session::new();
        let bar = s.ui.create_slide_bar(100.0, 100.0, 200.0, 20.0);
        let button = s.ui.create_text_button("Other", 400.0, 100.0, false);
        let (hits, on_press) = counter();
        button.borrow_mut().set_on_press(on_press);

        s.hover(110.0, 110.0);
        s.mouse(KeyAction::Press);
        assert!(bar.borrow().is_holding());
        assert!(!s.ui.events_enabled());

        s.hover(410.0, 110.0);
        assert!(s.ui.text_buttons().focused().is_none());
        assert!((bar.borrow().number() - 1.0).abs() < 1e-9);
        s.hover(190.0, 110.0);
        let value = bar.borrow().number();
        assert!(value > 0.4 && value < 0.5);

        s.mouse(KeyAction::Release);
        assert!(!bar.borrow().is_holding());
        assert!(s.ui.events_enabled());
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_step_click_beside_the_knob() {
        let mut s = Session::new();
        let bar = s.ui.create_slide_bar(100.0, 100.0, 200.0, 20.0);
        s.hover(250.0, 110.0);
        s.click();
        assert!((bar.borrow().number() - 0.1).abs() < 1e-9);
        assert!(s.ui.events_enabled());
    }

    #[test]
    fn test_enter_presses_the_catching_button() {
        let mut s = Session::new();
        s.ui.create_text_button("Ignore", 10.0, 10.0, false);
        let ok = s.ui.create_text_button("OK", 10.0, 200.0, true);
        let (hits, on_press) = counter();
        ok.borrow_mut().set_on_press(on_press);

        s.hover(600.0, 500.0);
        s.key(Key::Enter, KeyAction::Press);
        s.frame();
        assert!(s.ui.text_buttons().focused().is_some());
        s.key(Key::Enter, KeyAction::Release);
        assert_eq!(*hits.borrow(), 1);
        s.frame();
        assert!(s.ui.text_buttons().focused().is_none());
    }

    #[test]
    fn test_button_drag_off_cancels_press() {
        let mut s = Session::new();
        let button = s.ui.create_text_button("Go", 10.0, 10.0, false);
        let (hits, on_press) = counter();
        button.borrow_mut().set_on_press(on_press);
        s.hover(20.0, 20.0);
        s.mouse(KeyAction::Press);
        s.hover(500.0, 500.0);
        s.hover(20.0, 20.0);
        s.mouse(KeyAction::Release);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_notifications_expire_on_the_manager_clock() {
        let mut s = Session::new();
        s.ui.notify_for("saved", 500);
        s.clock.advance(100);
        s.ui.notify("loaded");
        s.frame();
        assert_eq!(s.ui.notifications().len(), 2);

        s.clock.advance(401);
        s.frame();
        assert_eq!(s.ui.notifications().len(), 1);
        s.frame();
        assert!(!s.canvas.has_text("saved"));
        assert!(s.canvas.has_text("loaded"));

        s.clock.advance(3000);
        s.frame();
        assert!(s.ui.notifications().is_empty());
    }

    #[test]
    fn test_file_drop_reaches_handler_only_while_enabled() {
        let mut s = Session::new();
        let seen = Rc::new(RefCell::new(0usize));
        let log = seen.clone();
        s.ui.set_drop_handler(move |paths| *log.borrow_mut() += paths.len());
        let drop = InputEvent::FileDrop(vec!["a.png".into(), "b.png".into()]);
        s.ui.handle_event(&drop);
        let dialog = s.ui.create_dialog("busy", false);
        s.ui.open_dialog(&dialog).unwrap();
        s.ui.handle_event(&drop);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_erase_removes_widget_from_frame() {
        let mut s = Session::new();
        let label = s.ui.create_label("bye", 0.0, 0.0, colors::WHITE, colors::CLEAR);
        s.frame();
        assert!(s.canvas.has_text("bye"));
        assert!(s.ui.erase(&label));
        assert!(!s.ui.erase(label));
        s.frame();
        assert!(!s.canvas.has_text("bye"));
    }
}


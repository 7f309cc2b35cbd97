//! Drop-down candidate list
//!
//! A pulldown hangs under the widget it is attached to (a text button or a
//! text box). `open` and `close` only record a request; requests are
//! applied at the start of the next update, and at most one pulldown is
//! open at a time. While one is open the manager freezes the pointer seen
//! by other widgets so the owner keeps its focus.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::{emit, Callback};
use crate::config::ToolkitConfig;
use crate::foundation::math::{colors, Vec2};
use crate::ui::bbox::Rect;
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::input::{ClickAction, Key, Modifiers};
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics};
use crate::ui::text_input::Autocomplete;

/// Selectable list attached under another widget
pub struct Pulldown {
    geometry: Geometry,
    items: Vec<String>,
    shown: Vec<usize>,
    rows: usize,
    select: usize,
    top: usize,
    mouse_focus: Option<usize>,
    opened: bool,
    open_request: bool,
    close_request: bool,
    candidate: Option<String>,
    selected: Callback<usize>,
    changed: Callback<usize>,
    metrics: GlyphMetrics,
    row_height: f64,
    padding: f64,
}

impl Widget for Pulldown {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Pulldown {
    /// Request the list to show at the next update
    pub fn open(&mut self) {
        self.open_request = true;
        self.close_request = false;
    }

    /// Request the list to hide at the next update
    pub fn close(&mut self) {
        self.open_request = false;
        self.close_request = true;
    }

    /// Showing, or about to show
    pub const fn is_opened(&self) -> bool {
        self.opened || self.open_request
    }

    /// Keep only items containing `text`; returns whether any remain
    pub fn set_filter(&mut self, text: &str) -> bool {
        self.shown = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.contains(text))
            .map(|(i, _)| i)
            .collect();
        self.select = 0;
        self.top = 0;
        self.mouse_focus = None;
        self.fit();
        !self.shown.is_empty()
    }

    /// Index of the highlighted item in the full list
    pub fn index(&self) -> Option<usize> {
        self.shown.get(self.select).copied()
    }

    /// Text of the highlighted item
    pub fn selected_text(&self) -> Option<&str> {
        self.index().map(|i| self.items[i].as_str())
    }

    /// Items passing the current filter, in list order
    pub fn visible_items(&self) -> Vec<&str> {
        self.shown.iter().map(|&i| self.items[i].as_str()).collect()
    }

    /// Subscribe to choices (click or Enter); receives the full-list index
    pub fn set_selected(&mut self, f: impl FnMut(usize) + 'static) {
        self.selected.set(f);
    }

    /// Subscribe to highlight moves; receives the full-list index
    pub fn set_changed(&mut self, f: impl FnMut(usize) + 'static) {
        self.changed.set(f);
    }

    fn fit(&mut self) {
        let widest = self
            .shown
            .iter()
            .map(|&i| self.metrics.measure(&self.items[i]))
            .fold(0.0, f64::max);
        let rows = self.shown.len().min(self.rows);
        #[allow(clippy::cast_precision_loss)]
        let height = rows as f64 * self.row_height + self.padding;
        self.geometry.resize(widest + self.padding * 2.0, height);
    }

    fn visible_rows(&self) -> usize {
        self.shown.len().min(self.rows)
    }

    fn parent_has_focus(&self) -> bool {
        self.geometry.parent().is_some_and(|p| p.borrow().focus())
    }

    fn do_open(&mut self) -> bool {
        if !self.open_request {
            return false;
        }
        self.opened = true;
        self.open_request = false;
        self.mouse_focus = None;
        self.follow_parent();
        true
    }

    /// Hang the list below its parent's current placement
    fn follow_parent(&mut self) {
        let Some(parent) = self.geometry.parent() else {
            return;
        };
        let anchor = parent.borrow().geometry().bounding_box();
        self.geometry.move_to(anchor.left() + self.padding, anchor.bottom());
    }

    fn do_close(&mut self) -> bool {
        if !self.close_request {
            return false;
        }
        self.opened = false;
        self.open_request = false;
        self.close_request = false;
        true
    }

    fn shut(&mut self) {
        self.opened = false;
        self.open_request = false;
        self.close_request = false;
    }

    fn scroll_into_view(&mut self) {
        let rows = self.visible_rows();
        if rows == 0 {
            return;
        }
        if self.select >= self.top + rows {
            self.top = self.select + 1 - rows;
        } else if self.select < self.top {
            self.top = self.select;
        }
    }

    /// Keyboard navigation; returns whether Enter chose the highlight
    fn key_input(&mut self, key: Key, mods: Modifiers) -> bool {
        let count = self.shown.len();
        if count == 0 {
            return false;
        }
        let mut chosen = false;
        match key {
            Key::Up => self.select = self.select.saturating_sub(1),
            Key::Down => self.select = (self.select + 1).min(count - 1),
            Key::Tab => {
                let step = if mods.contains(Modifiers::SHIFT) { count - 1 } else { 1 };
                self.select = (self.select + step) % count;
            }
            Key::Escape => self.close(),
            Key::Enter => {
                chosen = true;
                if !self.parent_has_focus() {
                    self.close();
                }
            }
            _ => {}
        }
        self.scroll_into_view();
        chosen
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hover(&mut self, pointer: Vec2) {
        let bbox = self.geometry.bounding_box();
        let mut focus = None;
        if bbox.contains(pointer.x, pointer.y) {
            let row = ((pointer.y - bbox.top() - 8.0) / self.row_height).floor();
            if row >= 0.0 && (row as usize) < self.visible_rows() {
                focus = Some(row as usize);
            }
        }
        if let Some(row) = focus {
            if self.mouse_focus != Some(row) {
                self.select = row + self.top;
            }
        }
        self.mouse_focus = focus;
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let base = self.geometry.parent().map_or(0.0, |p| p.borrow().depth()) - 0.1;
        let bbox = self.geometry.bounding_box();
        canvas.draw_box(bbox, colors::DARK_GRAY, true, base - 0.1);
        canvas.draw_box(bbox, colors::WHITE, false, base - 0.11);

        #[allow(clippy::cast_precision_loss)]
        let y = bbox.top() + (self.select - self.top) as f64 * self.row_height + 8.0;
        let highlight = Rect::from_edges(bbox.left() + 5.0, y, bbox.right() - 5.0, y + self.row_height);
        canvas.draw_box(highlight, colors::LIGHT_GRAY, true, base - 0.12);

        for row in 0..self.visible_rows() {
            let item = &self.items[self.shown[row + self.top]];
            #[allow(clippy::cast_precision_loss)]
            let y = bbox.top() + row as f64 * self.row_height + self.row_height;
            canvas.draw_text(item, bbox.left() + self.padding, y, colors::WHITE, base - 0.13);
        }
    }
}

impl Autocomplete for Pulldown {
    fn set_filter(&mut self, text: &str) -> bool {
        Self::set_filter(self, text)
    }

    fn is_opened(&self) -> bool {
        Self::is_opened(self)
    }

    fn open(&mut self) {
        Self::open(self);
    }

    fn close(&mut self) {
        Self::close(self);
    }

    fn take_candidate(&mut self) -> Option<String> {
        self.candidate.take()
    }
}

/// Pulldowns of the active layer and the one that is open
pub struct PulldownSystem {
    layer: Layer<Pulldown>,
    open_item: Option<Handle<Pulldown>>,
    focus_item: Option<Handle<Pulldown>>,
    metrics: GlyphMetrics,
    row_height: f64,
    padding: f64,
}

impl Default for PulldownSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl PulldownSystem {
    /// System laying rows out with the configured metrics
    pub fn new(config: &ToolkitConfig) -> Self {
        let m = &config.metrics;
        Self {
            layer: Layer::new(),
            open_item: None,
            focus_item: None,
            metrics: GlyphMetrics::new(m.glyph_advance),
            row_height: m.line_height,
            padding: m.caption_padding,
        }
    }

    /// Create a closed list showing at most `rows` items at once
    pub fn create(&mut self, items: Vec<String>, rows: usize) -> Handle<Pulldown> {
        let shown = (0..items.len()).collect();
        let mut pulldown = Pulldown {
            geometry: Geometry::new(0.0, 0.0, 0.0, 0.0, 0.0),
            items,
            shown,
            rows,
            select: 0,
            top: 0,
            mouse_focus: None,
            opened: false,
            open_request: false,
            close_request: false,
            candidate: None,
            selected: Callback::default(),
            changed: Callback::default(),
            metrics: self.metrics,
            row_height: self.row_height,
            padding: self.padding,
        };
        pulldown.fit();
        let item = Rc::new(RefCell::new(pulldown));
        self.layer.append(item.clone());
        item
    }

    /// Switch the active layer
    pub fn bind_layer(&mut self, name: &str) -> bool {
        let changed = self.layer.bind(name);
        if changed {
            self.focus_item = None;
        }
        changed
    }

    /// Empty a layer
    pub fn clear_layer(&mut self, name: &str) {
        self.layer.clear(name);
        self.focus_item = None;
    }

    /// Remove a list from the active layer
    pub fn erase(&mut self, item: &Handle<Pulldown>) -> bool {
        if self.open_item.as_ref().is_some_and(|o| Rc::ptr_eq(o, item)) {
            self.open_item = None;
        }
        if self.focus_item.as_ref().is_some_and(|f| Rc::ptr_eq(f, item)) {
            self.focus_item = None;
        }
        self.layer.erase(item)
    }

    /// The list currently showing
    pub const fn open_item(&self) -> Option<&Handle<Pulldown>> {
        self.open_item.as_ref()
    }

    /// Whether a list is showing
    pub const fn is_any_open(&self) -> bool {
        self.open_item.is_some()
    }

    /// Press on a row chooses it; press elsewhere closes the open list
    /// unless its owner has focus
    pub fn on_click(&mut self, action: ClickAction) {
        if action != ClickAction::Press {
            return;
        }
        if let Some(item) = self.focus_item.clone() {
            let chosen = {
                let mut pulldown = item.borrow_mut();
                if pulldown.mouse_focus.is_none() {
                    None
                } else {
                    pulldown.close();
                    let index = pulldown.index();
                    pulldown.candidate = pulldown.selected_text().map(str::to_string);
                    index
                }
            };
            if let Some(index) = chosen {
                emit(&item, |p| &mut p.selected, index);
            }
        } else if let Some(open) = &self.open_item {
            let mut pulldown = open.borrow_mut();
            if !pulldown.parent_has_focus() {
                pulldown.close();
            }
        }
    }

    /// Apply open/close requests, then run the open list
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let mut exist = false;
        for item in self.layer.current() {
            let mut pulldown = item.borrow_mut();
            if pulldown.do_open() {
                if let Some(previous) = self.open_item.replace(item.clone()) {
                    if !Rc::ptr_eq(&previous, item) {
                        previous.borrow_mut().shut();
                    }
                }
                debug!("Pulldown opened");
                exist = true;
                break;
            }
            let is_open = self.open_item.as_ref().is_some_and(|o| Rc::ptr_eq(o, item));
            if pulldown.do_close() && is_open {
                self.open_item = None;
                debug!("Pulldown closed");
                continue;
            }
            exist |= is_open;
        }

        self.focus_item = None;
        let Some(open) = self.open_item.clone() else {
            return;
        };
        if !exist {
            open.borrow_mut().shut();
            self.open_item = None;
            return;
        }

        let mut fired = Vec::new();
        let hovering = {
            let mut pulldown = open.borrow_mut();
            if pulldown.shown.is_empty() {
                pulldown.close();
                return;
            }
            pulldown.follow_parent();
            let before = pulldown.select;
            pulldown.hover(ctx.input.pointer());
            if pulldown.key_input(ctx.input.repeat_key(), ctx.input.modifiers()) {
                if let Some(index) = pulldown.index() {
                    pulldown.candidate = pulldown.selected_text().map(str::to_string);
                    fired.push((true, index));
                }
            }
            if pulldown.select != before {
                if let Some(index) = pulldown.index() {
                    pulldown.candidate = pulldown.selected_text().map(str::to_string);
                    fired.push((false, index));
                }
            }
            pulldown.draw(canvas);
            pulldown.mouse_focus.is_some()
        };
        if hovering {
            self.focus_item = Some(open.clone());
        }
        for (selected, index) in fired {
            if selected {
                emit(&open, |p| &mut p.selected, index);
            } else {
                emit(&open, |p| &mut p.changed, index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::input::{InputEvent, InputProcessor, KeyAction};
    use crate::ui::rendering::RecordingCanvas;
    use crate::ui::widgets::{TextButton, TextButtonSystem};
    use approx::assert_relative_eq;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    struct Rig {
        config: ToolkitConfig,
        input: InputProcessor,
        system: PulldownSystem,
        canvas: RecordingCanvas,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                config: ToolkitConfig::default(),
                input: InputProcessor::default(),
                system: PulldownSystem::default(),
                canvas: RecordingCanvas::default(),
            }
        }

        fn frame(&mut self) {
            self.canvas.clear();
            let ctx = FrameContext::new(&self.config, &self.input, true, 0);
            self.system.update(&ctx, &mut self.canvas);
            self.input.end_frame();
        }

        fn key(&mut self, key: Key, mods: Modifiers) {
            self.input.apply(&InputEvent::Key { key, action: KeyAction::Press, mods });
            self.frame();
        }
    }

    #[test]
    fn test_size_follows_widest_item_and_row_count() {
        let mut system = PulldownSystem::default();
        let pd = system.create(items(&["a", "abcd", "ab"]), 2);
        assert_relative_eq!(pd.borrow().width(), 4.0 * 21.0 + 40.0);
        assert_relative_eq!(pd.borrow().height(), 2.0 * 42.0 + 20.0);
    }

    #[test]
    fn test_open_is_applied_on_next_update() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["one", "two"]), 5);
        pd.borrow_mut().open();
        assert!(pd.borrow().is_opened());
        assert!(!rig.system.is_any_open());
        rig.frame();
        assert!(rig.system.is_any_open());
        assert!(rig.canvas.has_text("two"));

        pd.borrow_mut().close();
        rig.frame();
        assert!(!rig.system.is_any_open());
        assert!(!pd.borrow().is_opened());
    }

    #[test]
    fn test_single_open_list() {
        let mut rig = Rig::new();
        let a = rig.system.create(items(&["a"]), 5);
        let b = rig.system.create(items(&["b"]), 5);
        a.borrow_mut().open();
        rig.frame();
        b.borrow_mut().open();
        rig.frame();
        assert!(rig.system.open_item().is_some_and(|o| Rc::ptr_eq(o, &b)));
        assert!(!a.borrow().is_opened());
    }

    #[test]
    fn test_open_list_follows_moving_parent() {
        let mut rig = Rig::new();
        let mut buttons = TextButtonSystem::new(&rig.config);
        let button = buttons.create("Go", 100.0, 100.0, false);
        let pd = rig.system.create(items(&["one", "two"]), 5);
        TextButton::set_pulldown(&button, Some(pd.clone()));
        pd.borrow_mut().open();
        rig.frame();
        let below = button.borrow().geometry().bounding_box().bottom();
        assert_relative_eq!(pd.borrow().geometry().bounding_box().top(), below);

        button.borrow_mut().geometry_mut().move_to(60.0, 300.0);
        rig.frame();
        let anchor = button.borrow().geometry().bounding_box();
        let list = pd.borrow().geometry().bounding_box();
        assert_relative_eq!(list.top(), anchor.bottom());
        assert_relative_eq!(list.left(), 60.0 + pd.borrow().padding);
        assert!(rig.system.is_any_open());
    }

    #[test]
    fn test_filter_is_substring() {
        let mut system = PulldownSystem::default();
        let pd = system.create(items(&["alpha", "alphabet", "beta"]), 5);
        assert!(pd.borrow_mut().set_filter("pha"));
        assert_eq!(pd.borrow().visible_items(), vec!["alpha", "alphabet"]);
        assert!(!pd.borrow_mut().set_filter("zeta"));
        assert!(pd.borrow_mut().set_filter(""));
        assert_eq!(pd.borrow().visible_items().len(), 3);
    }

    #[test]
    fn test_keys_move_highlight_and_scroll() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["a", "b", "c", "d"]), 2);
        let changed = Rc::new(RefCell::new(Vec::new()));
        let log = changed.clone();
        pd.borrow_mut().set_changed(move |i| log.borrow_mut().push(i));
        pd.borrow_mut().open();
        rig.frame();

        rig.key(Key::Down, Modifiers::empty());
        rig.key(Key::Down, Modifiers::empty());
        assert_eq!(pd.borrow().index(), Some(2));
        assert_eq!(pd.borrow().top, 1);
        rig.key(Key::Tab, Modifiers::SHIFT);
        assert_eq!(pd.borrow().index(), Some(1));
        rig.key(Key::Tab, Modifiers::empty());
        rig.key(Key::Tab, Modifiers::empty());
        rig.key(Key::Tab, Modifiers::empty());
        assert_eq!(pd.borrow().index(), Some(0));
        rig.key(Key::Up, Modifiers::empty());
        assert_eq!(pd.borrow().index(), Some(0));
        assert_eq!(*changed.borrow(), vec![1, 2, 1, 2, 3, 0]);
        assert_eq!(pd.borrow_mut().take_candidate().as_deref(), Some("a"));
    }

    #[test]
    fn test_enter_selects_and_escape_closes() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["a", "b"]), 2);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let log = selected.clone();
        pd.borrow_mut().set_selected(move |i| log.borrow_mut().push(i));
        pd.borrow_mut().open();
        rig.frame();
        rig.key(Key::Down, Modifiers::empty());
        rig.key(Key::Enter, Modifiers::empty());
        assert_eq!(*selected.borrow(), vec![1]);
        rig.frame();
        assert!(!rig.system.is_any_open());

        pd.borrow_mut().open();
        rig.frame();
        rig.key(Key::Escape, Modifiers::empty());
        rig.frame();
        assert!(!rig.system.is_any_open());
    }

    #[test]
    fn test_hover_and_click_choose_row() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["a", "b", "c"]), 3);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let log = selected.clone();
        pd.borrow_mut().set_selected(move |i| log.borrow_mut().push(i));
        pd.borrow_mut().open();
        rig.frame();

        // list sits at the origin without an owner; second row spans 50..92
        rig.input.apply(&InputEvent::CursorMoved { x: 30.0, y: 60.0 });
        rig.frame();
        assert_eq!(pd.borrow().index(), Some(1));
        rig.system.on_click(ClickAction::Press);
        assert_eq!(*selected.borrow(), vec![1]);
        rig.frame();
        assert!(!rig.system.is_any_open());
    }

    #[test]
    fn test_click_outside_closes_ownerless_list() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["a"]), 3);
        pd.borrow_mut().open();
        rig.frame();
        rig.input.apply(&InputEvent::CursorMoved { x: 700.0, y: 500.0 });
        rig.frame();
        rig.system.on_click(ClickAction::Press);
        rig.frame();
        assert!(!rig.system.is_any_open());
    }

    #[test]
    fn test_layer_switch_drops_open_list() {
        let mut rig = Rig::new();
        let pd = rig.system.create(items(&["a"]), 3);
        pd.borrow_mut().open();
        rig.frame();
        rig.system.bind_layer("other");
        rig.frame();
        assert!(!rig.system.is_any_open());
        assert!(!pd.borrow().is_opened());
    }
}

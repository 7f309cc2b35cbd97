//! Scroll box container
//!
//! Children keep their own coordinates; the box adds its position and
//! scroll offset as the placement of every child, hides children whose box
//! no longer overlaps its own, and gates their focus on whether the pointer
//! is inside the box.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::foundation::math::{is_visible, Color, Vec2};
use crate::ui::bbox::Rect;
use crate::ui::frame::FrameContext;
use crate::ui::identity::{is_same_widget, weak_widget, Geometry, Handle, Widget, WidgetRef};
use crate::ui::input::Key;
use crate::ui::layer::Layer;
use crate::ui::rendering::Canvas;

/// Scrollable viewport over child widgets
pub struct ScrollBox {
    geometry: Geometry,
    children: Vec<WidgetRef>,
    offset: Vec2,
    content: Vec2,
    margin: f64,
    focus: bool,
    lock_x: bool,
    lock_y: bool,
    sheet: Option<Color>,
    focus_border: Color,
    border: Color,
    sticky: (bool, bool),
    stick_margin: Option<Vec2>,
}

impl Widget for ScrollBox {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn placement_x(&self) -> f64 {
        self.x() + self.offset.x
    }

    fn placement_y(&self) -> f64 {
        self.y() + self.offset.y
    }

    fn focus(&self) -> bool {
        self.focus
    }

    fn contains_rect(&self, rect: &Rect) -> bool {
        self.geometry.bounding_box().overlaps(rect)
    }
}

impl ScrollBox {
    fn new(x: f64, y: f64, width: f64, height: f64, margin: f64, theme: (Color, Color)) -> Self {
        Self {
            geometry: Geometry::new(x, y, width, height, 0.0),
            children: Vec::new(),
            offset: Vec2::zeros(),
            content: Vec2::zeros(),
            margin,
            focus: false,
            lock_x: false,
            lock_y: false,
            sheet: None,
            focus_border: theme.0,
            border: theme.1,
            sticky: (false, false),
            stick_margin: None,
        }
    }

    /// Move and resize the viewport; the content extent is recomputed as
    /// children are appended
    pub fn set(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.geometry.x = x;
        self.geometry.y = y;
        self.geometry.resize(width, height);
        self.content = Vec2::zeros();
    }

    /// Attach `child` to the box behind `this`
    ///
    /// The child keeps a weak reference to the box and must be erased no
    /// later than the box itself.
    pub fn append<C: Widget + 'static>(this: &Handle<Self>, child: &Handle<C>) {
        let (right, bottom) = {
            let mut c = child.borrow_mut();
            c.set_parent(weak_widget(this));
            (c.x() + c.width(), c.y() + c.height())
        };
        let mut scroll = this.borrow_mut();
        let margin = scroll.margin;
        if right + margin > 0.0 {
            scroll.content.x = scroll.content.x.max(right + margin);
        }
        if bottom + margin > 0.0 {
            scroll.content.y = scroll.content.y.max(bottom + margin);
        }
        scroll.children.push(weak_widget(child));
    }

    /// Detach `child`; unknown children are ignored
    pub fn erase<C: Widget + 'static>(&mut self, child: &Handle<C>) -> bool {
        let Some(index) = self.children.iter().position(|w| is_same_widget(w, child)) else {
            return false;
        };
        self.children.remove(index);
        child.borrow_mut().geometry_mut().clear_parent();
        true
    }

    /// Detach every child and reset the scroll position
    pub fn clear(&mut self) {
        for child in self.children.drain(..) {
            if let Some(child) = child.upgrade() {
                child.borrow_mut().geometry_mut().clear_parent();
            }
        }
        self.offset = Vec2::zeros();
        self.content = Vec2::zeros();
    }

    /// Number of live children
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Fill the viewport behind the children
    pub fn draw_sheet(&mut self, enabled: bool, color: Color) {
        self.sheet = enabled.then_some(color);
    }

    /// Draw depth of the box, inherited by children
    pub fn set_depth(&mut self, depth: f32) {
        self.geometry.depth = depth;
    }

    /// Forbid scrolling along either axis
    pub fn set_scroll_constraint(&mut self, lock_x: bool, lock_y: bool) {
        self.lock_x = lock_x;
        self.lock_y = lock_y;
    }

    /// Keep the right/bottom margin to the window edge as the window resizes
    pub fn set_sticky(&mut self, x: bool, y: bool) {
        self.sticky = (x, y);
        self.stick_margin = None;
    }

    /// Outline colour while the pointer is inside
    pub fn set_focus_border_color(&mut self, color: Color) {
        self.focus_border = color;
    }

    /// Current scroll offset (zero or negative)
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Extent of the content, including the margin
    pub const fn content_size(&self) -> Vec2 {
        self.content
    }

    /// Scroll by a delta, clamped to the content
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        if !self.lock_x {
            self.offset.x += dx;
        }
        if !self.lock_y {
            self.offset.y += dy;
        }
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        let max_x = (self.content.x - self.width()).max(0.0);
        let max_y = (self.content.y - self.height()).max(0.0);
        self.offset.x = self.offset.x.clamp(-max_x, 0.0);
        self.offset.y = self.offset.y.clamp(-max_y, 0.0);
    }

    fn update_sticky(&mut self, window: Vec2) {
        let (sx, sy) = self.sticky;
        if !sx && !sy {
            return;
        }
        let (x, y) = (self.x(), self.y());
        let margin = *self.stick_margin.get_or_insert_with(|| {
            Vec2::new(
                if sx { (window.x - (x + self.geometry.width)).max(0.0) } else { 0.0 },
                if sy { (window.y - (y + self.geometry.height)).max(0.0) } else { 0.0 },
            )
        });
        let width = if sx { window.x - x - margin.x } else { self.width() };
        let height = if sy { window.y - y - margin.y } else { self.height() };
        self.geometry.resize(width, height);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let bbox = self.geometry.bounding_box();
        let depth = self.depth();
        if let Some(fill) = self.sheet {
            canvas.draw_box(bbox, fill, true, depth + 0.1);
        }
        let border = if self.focus { self.focus_border } else { self.border };
        if is_visible(&border) {
            canvas.draw_box(bbox, border, false, depth + 0.08);
        }
    }
}

/// Scroll boxes of the active layer
pub struct ScrollBoxSystem {
    layer: Layer<ScrollBox>,
    focused: Option<Handle<ScrollBox>>,
    margin: f64,
    key_step: f64,
    wheel_factor: f64,
    focus_border: Color,
    border: Color,
}

impl Default for ScrollBoxSystem {
    fn default() -> Self {
        Self::new(&crate::config::ToolkitConfig::default())
    }
}

impl ScrollBoxSystem {
    /// System using the configured steps and colours
    pub fn new(config: &crate::config::ToolkitConfig) -> Self {
        Self {
            layer: Layer::new(),
            focused: None,
            margin: config.behaviour.scroll_content_margin,
            key_step: config.behaviour.key_scroll_step,
            wheel_factor: config.behaviour.wheel_scroll_factor,
            focus_border: config.theme.scroll_focus_border,
            border: config.theme.scroll_border,
        }
    }

    /// Create an empty box in the active layer
    pub fn create(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<ScrollBox> {
        let item = Rc::new(RefCell::new(ScrollBox::new(
            x,
            y,
            width,
            height,
            self.margin,
            (self.focus_border, self.border),
        )));
        self.layer.append(item.clone());
        item
    }

    /// Switch the active layer
    pub fn bind_layer(&mut self, name: &str) -> bool {
        let changed = self.layer.bind(name);
        if changed {
            self.focused = None;
        }
        changed
    }

    /// Empty a layer
    pub fn clear_layer(&mut self, name: &str) {
        self.layer.clear(name);
        self.focused = None;
    }

    /// Remove a box from the active layer
    pub fn erase(&mut self, item: &Handle<ScrollBox>) -> bool {
        if self.focused.as_ref().is_some_and(|f| Rc::ptr_eq(f, item)) {
            self.focused = None;
        }
        self.layer.erase(item)
    }

    /// Box under the pointer as of the last update
    pub const fn focused(&self) -> Option<&Handle<ScrollBox>> {
        self.focused.as_ref()
    }

    /// Arrow keys scroll the focused box
    pub fn on_key(&mut self, key: Key) {
        let Some(focused) = &self.focused else {
            return;
        };
        let step = self.key_step;
        let mut scroll = focused.borrow_mut();
        match key {
            Key::Up => scroll.scroll_by(0.0, step),
            Key::Down => scroll.scroll_by(0.0, -step),
            Key::Right => scroll.scroll_by(step, 0.0),
            Key::Left => scroll.scroll_by(-step, 0.0),
            _ => {}
        }
    }

    /// Wheel deltas scroll the focused box
    pub fn on_scroll(&mut self, dx: f64, dy: f64) {
        if let Some(focused) = &self.focused {
            focused
                .borrow_mut()
                .scroll_by(dx * self.wheel_factor, dy * self.wheel_factor);
        }
    }

    /// Place, focus and draw every box of the active layer
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let pointer = ctx.pointer();
        let previous = self.focused.take();
        for item in self.layer.current() {
            let mut scroll = item.borrow_mut();
            scroll.update_sticky(ctx.window_size());
            scroll.geometry.update_and_dispatch();
            scroll.focus = self.focused.is_none()
                && ctx.events_enabled
                && scroll.geometry.bounding_box().contains(pointer.x, pointer.y);
            if scroll.focus {
                self.focused = Some(item.clone());
            }
            scroll.draw(canvas);
        }
        let switched = match (&previous, &self.focused) {
            (Some(a), Some(b)) => !Rc::ptr_eq(a, b),
            (a, b) => a.is_some() != b.is_some(),
        };
        if switched && self.focused.is_some() {
            debug!("Scroll box focus changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolkitConfig;
    use crate::foundation::math::colors;
    use crate::ui::input::{InputEvent, InputProcessor};
    use crate::ui::rendering::RecordingCanvas;
    use approx::assert_relative_eq;

    struct Tile {
        geometry: Geometry,
    }

    impl Widget for Tile {
        fn geometry(&self) -> &Geometry {
            &self.geometry
        }
        fn geometry_mut(&mut self) -> &mut Geometry {
            &mut self.geometry
        }
    }

    fn tile(x: f64, y: f64) -> Handle<Tile> {
        Rc::new(RefCell::new(Tile {
            geometry: Geometry::new(x, y, 50.0, 50.0, 0.0),
        }))
    }

    fn frame(system: &mut ScrollBoxSystem, input: &InputProcessor) {
        let config = ToolkitConfig::default();
        let ctx = FrameContext::new(&config, input, true, 0);
        system.update(&ctx, &mut RecordingCanvas::default());
    }

    #[test]
    fn test_append_grows_content_with_margin() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(0.0, 0.0, 100.0, 100.0);
        ScrollBox::append(&scroll, &tile(0.0, 300.0));
        ScrollBox::append(&scroll, &tile(150.0, 0.0));
        let content = scroll.borrow().content_size();
        assert_relative_eq!(content.x, 220.0);
        assert_relative_eq!(content.y, 370.0);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(0.0, 0.0, 100.0, 100.0);
        ScrollBox::append(&scroll, &tile(0.0, 300.0));
        let mut s = scroll.borrow_mut();
        s.scroll_by(0.0, 40.0);
        assert_relative_eq!(s.offset().y, 0.0);
        s.scroll_by(0.0, -1000.0);
        assert_relative_eq!(s.offset().y, -270.0);
        s.set_scroll_constraint(false, true);
        s.scroll_by(0.0, 100.0);
        assert_relative_eq!(s.offset().y, -270.0);
    }

    #[test]
    fn test_keys_and_wheel_scroll_only_the_focused_box() {
        let mut system = ScrollBoxSystem::default();
        let a = system.create(0.0, 0.0, 100.0, 100.0);
        let b = system.create(200.0, 0.0, 100.0, 100.0);
        ScrollBox::append(&a, &tile(0.0, 500.0));
        ScrollBox::append(&b, &tile(0.0, 500.0));

        let mut input = InputProcessor::default();
        input.apply(&InputEvent::CursorMoved { x: 250.0, y: 50.0 });
        frame(&mut system, &input);
        assert!(system.focused().is_some_and(|f| Rc::ptr_eq(f, &b)));

        system.on_key(Key::Down);
        system.on_scroll(0.0, -2.0);
        assert_relative_eq!(b.borrow().offset().y, -52.0);
        assert_relative_eq!(a.borrow().offset().y, 0.0);
    }

    #[test]
    fn test_children_follow_offset_and_are_culled() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(10.0, 10.0, 100.0, 100.0);
        let near = tile(0.0, 0.0);
        let far = tile(0.0, 200.0);
        ScrollBox::append(&scroll, &near);
        ScrollBox::append(&scroll, &far);
        frame(&mut system, &InputProcessor::default());

        let d = far.borrow_mut().geometry_mut().update_and_dispatch();
        assert!(!d.visible);
        scroll.borrow_mut().scroll_by(0.0, -180.0);
        assert_relative_eq!(scroll.borrow().offset().y, -170.0);
        let d = far.borrow_mut().geometry_mut().update_and_dispatch();
        assert!(d.visible);
        assert_relative_eq!(far.borrow().geometry().bounding_box().top(), 40.0);
        let d = near.borrow_mut().geometry_mut().update_and_dispatch();
        assert!(!d.visible);
    }

    #[test]
    fn test_erase_and_clear_detach_children() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(0.0, 0.0, 100.0, 100.0);
        let a = tile(0.0, 0.0);
        let b = tile(0.0, 60.0);
        ScrollBox::append(&scroll, &a);
        ScrollBox::append(&scroll, &b);
        assert!(scroll.borrow_mut().erase(&a));
        assert!(!scroll.borrow_mut().erase(&a));
        assert!(a.borrow().geometry().parent().is_none());
        scroll.borrow_mut().clear();
        assert_eq!(scroll.borrow().child_count(), 0);
        assert!(b.borrow().geometry().parent().is_none());
    }

    #[test]
    fn test_sticky_box_tracks_window() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(0.0, 0.0, 700.0, 500.0);
        scroll.borrow_mut().set_sticky(true, true);
        let mut input = InputProcessor::new(800.0, 600.0);
        frame(&mut system, &input);
        input.apply(&InputEvent::Resized { width: 1000.0, height: 700.0 });
        frame(&mut system, &input);
        assert_relative_eq!(scroll.borrow().width(), 900.0);
        assert_relative_eq!(scroll.borrow().height(), 600.0);
    }

    #[test]
    fn test_clear_color_border_is_not_drawn() {
        let mut system = ScrollBoxSystem::default();
        let scroll = system.create(0.0, 0.0, 100.0, 100.0);
        scroll.borrow_mut().border = colors::CLEAR;
        let config = ToolkitConfig::default();
        let input = InputProcessor::default();
        let ctx = FrameContext::new(&config, &input, true, 0);
        let mut canvas = RecordingCanvas::default();
        system.update(&ctx, &mut canvas);
        assert!(canvas.commands().is_empty());
    }
}

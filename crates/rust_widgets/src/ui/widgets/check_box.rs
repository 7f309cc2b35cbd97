//! Two-state toggle with separate on and off captions

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::{emit, Callback};
use crate::config::ToolkitConfig;
use crate::foundation::math::{colors, Color};
use crate::ui::focus::{FocusArbiter, Focusable};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::input::ClickAction;
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics};

struct Caption {
    text: String,
    length: f64,
    color: Color,
}

/// Toggle box
pub struct CheckBox {
    geometry: Geometry,
    on: Caption,
    off: Caption,
    length: f64,
    value: bool,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
    changed: Callback<bool>,
}

impl Widget for CheckBox {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Focusable for CheckBox {}

impl CheckBox {
    /// Caption shown while on
    pub fn set_text(&mut self, text: &str) {
        self.on.text = text.to_string();
        self.on.length = self.fit(text);
    }

    /// Caption shown while off
    pub fn set_off_text(&mut self, text: &str) {
        self.off.text = text.to_string();
        self.off.length = self.fit(text);
    }

    /// Caption colour while on
    pub fn set_on_color(&mut self, color: Color) {
        self.on.color = color;
    }

    /// Caption colour while off
    pub fn set_off_color(&mut self, color: Color) {
        self.off.color = color;
    }

    /// Set the state without firing the changed callback
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    /// Current state
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Subscribe to toggles made through the pointer
    pub fn set_changed(&mut self, f: impl FnMut(bool) + 'static) {
        self.changed.set(f);
    }

    // grows the box to the widest caption seen so far
    fn fit(&mut self, text: &str) -> f64 {
        let length = self.metrics.measure(text);
        if length > self.length {
            self.length = length;
            self.geometry.resize(length + self.padding * 2.0, self.box_height);
        }
        length
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth() - 0.1;
        let bbox = self.geometry.bounding_box();
        canvas.draw_box(bbox, colors::GRAY, false, depth);

        let caption = if self.value { &self.on } else { &self.off };
        let offset = (self.length - caption.length) * 0.5;
        canvas.draw_text(
            &caption.text,
            bbox.left() + self.padding + offset,
            bbox.top() + self.baseline,
            caption.color,
            depth - 0.05,
        );
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Check boxes of the active layer
pub struct CheckBoxSystem {
    layer: Layer<CheckBox>,
    focus: FocusArbiter<CheckBox>,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
}

impl Default for CheckBoxSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl CheckBoxSystem {
    /// System laying captions out with the configured metrics
    pub fn new(config: &ToolkitConfig) -> Self {
        let m = &config.metrics;
        Self {
            layer: Layer::new(),
            focus: FocusArbiter::new(),
            metrics: GlyphMetrics::new(m.glyph_advance),
            padding: m.caption_padding,
            baseline: m.line_height,
            box_height: m.caption_box_height,
        }
    }

    /// Create a box showing `text` in both states
    pub fn create(&mut self, text: &str, x: f64, y: f64, value: bool) -> Handle<CheckBox> {
        let caption = |color| Caption {
            text: String::new(),
            length: 0.0,
            color,
        };
        let mut check = CheckBox {
            geometry: Geometry::new(x, y, 0.0, 0.0, 0.0),
            on: caption(colors::WHITE),
            off: caption(colors::GRAY),
            length: 0.0,
            value,
            metrics: self.metrics,
            padding: self.padding,
            baseline: self.baseline,
            box_height: self.box_height,
            changed: Callback::default(),
        };
        check.set_text(text);
        check.set_off_text(text);
        let item = Rc::new(RefCell::new(check));
        self.layer.append(item.clone());
        item
    }

    /// Switch the active layer
    pub fn bind_layer(&mut self, name: &str) -> bool {
        let changed = self.layer.bind(name);
        if changed {
            self.focus.clear();
        }
        changed
    }

    /// Empty a layer
    pub fn clear_layer(&mut self, name: &str) {
        self.layer.clear(name);
        self.focus.clear();
    }

    /// Remove a box from the active layer
    pub fn erase(&mut self, item: &Handle<CheckBox>) -> bool {
        self.focus.forget(item);
        self.layer.erase(item)
    }

    /// Box under the pointer
    pub const fn focused(&self) -> Option<&Handle<CheckBox>> {
        self.focus.focused()
    }

    /// Press toggles the focused box
    pub fn on_click(&mut self, action: ClickAction) {
        if action != ClickAction::Press {
            return;
        }
        let Some(item) = self.focus.focused().cloned() else {
            return;
        };
        let value = {
            let mut check = item.borrow_mut();
            check.value = !check.value;
            check.value
        };
        debug!("Check box toggled to {value}");
        emit(&item, |c| &mut c.changed, value);
    }

    /// Focus and draw every box of the active layer
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let pointer = ctx.pointer();
        self.focus.begin_frame(ctx.events_enabled);
        for item in self.layer.current() {
            let mut check = item.borrow_mut();
            let dispatch = check.geometry.update_and_dispatch();
            if !dispatch.visible {
                continue;
            }
            let bbox = check.geometry.bounding_box();
            self.focus.check(item, &bbox, dispatch.enabled, pointer);
            check.draw(canvas);
        }
        self.focus.end_frame();
    }
}

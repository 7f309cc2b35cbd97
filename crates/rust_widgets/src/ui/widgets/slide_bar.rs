//! Horizontal slide bar
//!
//! Pressing on the knob grabs it: the bar keeps focus and follows the
//! pointer while events stay suppressed until the button is released.
//! Pressing either side of the knob steps the value instead.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use super::{emit, Callback};
use crate::config::ToolkitConfig;
use crate::foundation::math::colors;
use crate::ui::bbox::Rect;
use crate::ui::focus::{FocusArbiter, Focusable};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::input::ClickAction;
use crate::ui::layer::Layer;
use crate::ui::modal::{EventGate, ModalAction};
use crate::ui::rendering::Canvas;

/// Value domain of a slide bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberType {
    /// Continuous values
    #[default]
    Real,
    /// Values truncated to whole numbers
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Knob {
    UnFocus,
    Left,
    Hold,
    Right,
}

/// Numeric slider
pub struct SlideBar {
    geometry: Geometry,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    number_type: NumberType,
    knob: Knob,
    knob_x: f64,
    knob_width: f64,
    hold: bool,
    focused: bool,
    changed: Callback<f64>,
}

impl Widget for SlideBar {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn focus(&self) -> bool {
        self.focused
    }
}

impl Focusable for SlideBar {
    fn is_held(&self) -> bool {
        self.hold
    }
}

impl SlideBar {
    /// Current value
    pub const fn number(&self) -> f64 {
        self.value
    }

    /// Set the value, clamped to the range; returns whether it was clipped
    ///
    /// Does not fire the changed callback.
    pub fn set_number(&mut self, n: f64) -> bool {
        let clamped = self.bound(n);
        self.value = clamped;
        if !self.hold {
            self.place_knob();
        }
        clamped != n
    }

    /// Switch between real and integer values
    pub fn set_number_type(&mut self, number_type: NumberType) {
        if self.number_type != number_type {
            self.number_type = number_type;
            self.place_knob();
        }
    }

    /// Value domain
    pub const fn number_type(&self) -> NumberType {
        self.number_type
    }

    /// Range of the value, in either order; the value is pulled inside it
    ///
    /// A NaN bound leaves the range unchanged.
    pub fn set_min_max(&mut self, min: f64, max: f64) {
        if min.is_nan() || max.is_nan() {
            warn!("Ignoring slide bar range with NaN bound ({min}, {max})");
            return;
        }
        self.min = min.min(max);
        self.max = min.max(max);
        self.value = self.bound(self.value);
        if !self.hold {
            self.place_knob();
        }
    }

    /// Amount one press beside the knob moves the value
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Subscribe to value changes made through the pointer
    pub fn set_changed(&mut self, f: impl FnMut(f64) + 'static) {
        self.changed.set(f);
    }

    /// Whether the knob is grabbed
    pub const fn is_holding(&self) -> bool {
        self.hold
    }

    fn bound(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    fn rate(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    fn place_knob(&mut self) {
        let bbox = self.geometry.bounding_box();
        self.knob_x = (bbox.width() - self.knob_width) * self.rate() + bbox.left();
    }

    fn classify(&mut self, x: f64) {
        self.place_knob();
        self.knob = if self.knob_x > x {
            Knob::Left
        } else if self.knob_x + self.knob_width < x {
            Knob::Right
        } else {
            Knob::Hold
        };
    }

    fn clear_state(&mut self) {
        self.hold = false;
        self.knob = Knob::UnFocus;
    }

    fn settle(&mut self, previous: f64) -> Option<f64> {
        if self.number_type == NumberType::Integer {
            self.value = self.value.trunc();
        }
        (self.value != previous).then_some(self.value)
    }

    /// Follow the pointer while grabbed
    fn drag(&mut self, x: f64) -> Option<f64> {
        let previous = self.value;
        let bbox = self.geometry.bounding_box();
        let span = self.max - self.min;
        let track = bbox.width() - self.knob_width;
        if track > 0.0 && span != 0.0 {
            let lead = match self.number_type {
                NumberType::Real => -self.knob_width * 0.5,
                NumberType::Integer => self.step / span,
            };
            let rate = (x - bbox.left() + lead) / track;
            let mut value = rate * span + self.min;
            if self.number_type == NumberType::Integer {
                value = value.floor();
            }
            self.value = self.bound(value);
        }
        self.place_knob();
        self.settle(previous)
    }

    /// Apply a press according to where it landed relative to the knob
    fn press(&mut self) -> Option<f64> {
        let previous = self.value;
        match self.knob {
            Knob::Hold => self.hold = true,
            Knob::Left => self.value = (self.value - self.step).max(self.min),
            Knob::Right => self.value = (self.value + self.step).min(self.max),
            Knob::UnFocus => {}
        }
        self.place_knob();
        self.settle(previous)
    }

    fn draw(&self, canvas: &mut dyn Canvas, focus: bool) {
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth();
        let bbox = self.geometry.bounding_box();
        let outline = if focus { colors::ORANGE } else { colors::GRAY };
        canvas.draw_box(bbox, outline, false, depth);

        let knob = Rect::from_edges(
            self.knob_x,
            bbox.top() + 1.0,
            self.knob_x + self.knob_width,
            bbox.bottom() - 1.0,
        );
        let fill = if self.knob == Knob::Hold { colors::GREEN } else { colors::CYAN };
        canvas.draw_box(knob, fill, true, depth - 0.02);
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Slide bars of the active layer
pub struct SlideBarSystem {
    layer: Layer<SlideBar>,
    focus: FocusArbiter<SlideBar>,
    knob_width: f64,
}

impl Default for SlideBarSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl SlideBarSystem {
    /// System using the configured knob width
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            layer: Layer::new(),
            focus: FocusArbiter::new(),
            knob_width: config.metrics.knob_width,
        }
    }

    /// Create a bar over `[0, 1]` with a step of 0.1
    pub fn create(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<SlideBar> {
        let mut bar = SlideBar {
            geometry: Geometry::new(x, y, width, height, -0.01),
            value: 0.0,
            min: 0.0,
            max: 1.0,
            step: 0.1,
            number_type: NumberType::Real,
            knob: Knob::UnFocus,
            knob_x: 0.0,
            knob_width: self.knob_width,
            hold: false,
            focused: false,
            changed: Callback::default(),
        };
        bar.place_knob();
        let item = Rc::new(RefCell::new(bar));
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

    /// Remove a bar from the active layer
    pub fn erase(&mut self, item: &Handle<SlideBar>) -> bool {
        self.focus.forget(item);
        self.layer.erase(item)
    }

    /// Bar under the pointer or grabbed
    pub const fn focused(&self) -> Option<&Handle<SlideBar>> {
        self.focus.focused()
    }

    /// Press steps or grabs the focused bar and suppresses events until
    /// the release
    pub fn on_click(&mut self, action: ClickAction, gate: &mut EventGate) {
        if action != ClickAction::Press {
            return;
        }
        let Some(item) = self.focus.focused().cloned() else {
            return;
        };
        let changed = item.borrow_mut().press();
        let grabbed = item.clone();
        let claimed = gate.disable_event(move |action| {
            if action == ModalAction::Release {
                grabbed.borrow_mut().hold = false;
                return true;
            }
            false
        });
        if claimed.is_err() {
            item.borrow_mut().hold = false;
        } else if item.borrow().hold {
            debug!("Slide bar grabbed");
        }
        if let Some(value) = changed {
            emit(&item, |b| &mut b.changed, value);
        }
    }

    /// Track, focus and draw every bar of the active layer
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let pointer = ctx.pointer();
        self.focus.begin_frame(ctx.events_enabled);
        let mut fired = Vec::new();
        for item in self.layer.current() {
            let mut bar = item.borrow_mut();
            let dispatch = bar.geometry.update_and_dispatch();
            if !dispatch.visible {
                bar.focused = false;
                continue;
            }
            let mine = if bar.hold {
                if let Some(value) = bar.drag(pointer.x) {
                    fired.push((item.clone(), value));
                }
                true
            } else {
                let bbox = bar.geometry.bounding_box();
                let check = self.focus.check(item, &bbox, dispatch.enabled, pointer);
                if check.hit {
                    bar.classify(pointer.x);
                } else {
                    bar.clear_state();
                    bar.place_knob();
                }
                check.is_mine
            };
            bar.focused = mine;
            bar.draw(canvas, mine);
        }
        self.focus.end_frame();
        for (item, value) in fired {
            emit(&item, |b| &mut b.changed, value);
        }
    }
}

//! Single-line editable text field
//!
//! Each box owns a codepoint buffer. Clicking a box starts the shared edit
//! session on that buffer, so typing changes the box text in place. The
//! session ends when another box is clicked, when the edited box leaves
//! the view, or when the layer switches.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::pulldown::Pulldown;
use super::slide_bar::SlideBar;
use crate::config::ToolkitConfig;
use crate::foundation::math::{colors, is_visible, Color, Vec2};
use crate::ui::focus::{FocusArbiter, Focusable};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{weak_widget, Geometry, Handle, Widget};
use crate::ui::input::ClickAction;
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics};
use crate::ui::text_input::{buffer_to_string, set_buffer, AutocompleteRef, CharBuffer, InputStyle, TextInput};

struct SliderLink {
    slider: Handle<SlideBar>,
    precision: usize,
    shown: Option<f64>,
}

/// Editable text field
pub struct TextBox {
    geometry: Geometry,
    buffer: CharBuffer,
    placeholder: String,
    max_length: usize,
    font_color: Color,
    bg_color: Color,
    placeholder_color: Color,
    draw_border: bool,
    input_style: InputStyle,
    text_y: f64,
    inset: f64,
    editing: bool,
    focused: bool,
    link: Option<SliderLink>,
    pulldown: Option<Handle<Pulldown>>,
}

impl Widget for TextBox {
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

impl Focusable for TextBox {}

impl TextBox {
    /// Current text
    pub fn text(&self) -> String {
        buffer_to_string(&self.buffer.borrow())
    }

    /// Replace the text; an edit session on this box sees the change
    pub fn set_text(&mut self, text: &str) {
        set_buffer(&mut self.buffer.borrow_mut(), text);
    }

    /// Shown in place of empty text
    pub fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }

    /// Placeholder colour
    pub fn set_placeholder_color(&mut self, color: Color) {
        self.placeholder_color = color;
    }

    /// Text colour
    pub fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
    }

    /// Fill colour; a clear colour leaves the box unfilled
    pub fn set_bg_color(&mut self, color: Color) {
        self.bg_color = color;
    }

    /// Outline the box
    pub fn draw_border(&mut self, enabled: bool) {
        self.draw_border = enabled;
    }

    /// Codepoint limit for sessions started from now on
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
    }

    /// Validator for sessions started from now on
    pub fn set_input_style(&mut self, style: InputStyle) {
        self.input_style = style;
    }

    /// Whether the edit session is on this box
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Keep the text and a slide bar in step; forces numeric input
    ///
    /// Slider changes rewrite the text with `precision` decimals. Edited
    /// text that parses as a number moves the slider.
    pub fn set_slider(&mut self, slider: Option<Handle<SlideBar>>, precision: usize) {
        self.link = slider.map(|slider| SliderLink {
            slider,
            precision,
            shown: None,
        });
        if self.link.is_some() {
            self.input_style = InputStyle::Number;
        }
    }

    /// Attach (or detach with `None`) an autocomplete list
    pub fn set_pulldown(this: &Handle<Self>, pulldown: Option<Handle<Pulldown>>) {
        if let Some(pd) = &pulldown {
            pd.borrow_mut().set_parent(weak_widget(this));
        }
        this.borrow_mut().pulldown = pulldown;
    }

    fn pulldown_open(&self) -> bool {
        self.pulldown.as_ref().is_some_and(|pd| pd.borrow().is_opened())
    }

    /// Sync with the linked slider; returns whether the session must end
    fn refresh_link(&mut self) -> bool {
        let Some(link) = &mut self.link else {
            return false;
        };
        let value = link.slider.borrow().number();
        if link.shown != Some(value) {
            link.shown = Some(value);
            let text = format!("{value:.prec$}", prec = link.precision);
            set_buffer(&mut self.buffer.borrow_mut(), &text);
            return self.editing;
        }
        let text = buffer_to_string(&self.buffer.borrow());
        if text.is_empty() {
            return false;
        }
        // partial input such as "-" or "." is left alone
        if let Ok(parsed) = text.parse::<f64>() {
            if link.shown != Some(parsed) && !link.slider.borrow_mut().set_number(parsed) {
                link.shown = Some(parsed);
            }
        }
        false
    }

    fn draw(&self, canvas: &mut dyn Canvas, caret: Option<f64>, metrics: &GlyphMetrics) {
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth();
        let bbox = self.geometry.bounding_box();
        if is_visible(&self.bg_color) {
            canvas.draw_box(bbox, self.bg_color, true, depth);
        }
        if self.draw_border {
            canvas.draw_box(bbox, colors::WHITE, false, depth - 0.01);
        }
        let x = bbox.left() + self.inset;
        let y = bbox.top() + self.text_y;
        if let Some(offset) = caret {
            let from = Vec2::new(x + offset, y);
            let to = Vec2::new(x + offset + metrics.advance, y);
            canvas.draw_line(from, to, self.font_color, depth - 0.02);
        }
        let text = self.text();
        if text.is_empty() {
            canvas.draw_text(&self.placeholder, x, y, self.placeholder_color, depth - 0.02);
        } else {
            canvas.draw_text(&text, x, y, self.font_color, depth - 0.02);
        }
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Text boxes of the active layer and the one being edited
pub struct TextBoxSystem {
    layer: Layer<TextBox>,
    focus: FocusArbiter<TextBox>,
    editing: Option<Handle<TextBox>>,
    metrics: GlyphMetrics,
    default_height: f64,
    baseline: f64,
    inset: f64,
    padding: f64,
    max_length: usize,
}

impl Default for TextBoxSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl TextBoxSystem {
    /// System using the configured metrics and length limit
    pub fn new(config: &ToolkitConfig) -> Self {
        let m = &config.metrics;
        Self {
            layer: Layer::new(),
            focus: FocusArbiter::new(),
            editing: None,
            metrics: GlyphMetrics::new(m.glyph_advance),
            default_height: m.text_box_height,
            baseline: m.text_box_baseline,
            inset: m.text_box_inset,
            padding: m.caption_padding,
            max_length: config.behaviour.default_max_length,
        }
    }

    /// Create a box in the active layer
    ///
    /// A zero width is derived from the text (sixteen glyphs when empty)
    /// and the box is shifted left by the padding; a zero height takes the
    /// default height and places the box above `y`.
    pub fn create(&mut self, text: &str, x: f64, y: f64, width: f64, height: f64) -> Handle<TextBox> {
        let (mut x, mut y, mut width, mut height) = (x, y, width, height);
        if width == 0.0 {
            width = self.metrics.measure(text);
            if width == 0.0 {
                width = 16.0 * self.metrics.advance;
            }
            width += self.padding * 2.0;
            x -= self.padding;
        }
        if height == 0.0 {
            height = self.default_height;
            y -= height;
        }
        let spare = (height - self.baseline) * 0.5;
        let text_y = if spare >= 0.0 { self.baseline + spare } else { 0.0 };
        let item = Rc::new(RefCell::new(TextBox {
            geometry: Geometry::new(x, y, width, height, 0.0),
            buffer: Rc::new(RefCell::new(text.chars().collect())),
            placeholder: String::new(),
            max_length: self.max_length,
            font_color: colors::WHITE,
            bg_color: colors::BLACK,
            placeholder_color: colors::GRAY,
            draw_border: true,
            input_style: InputStyle::Text,
            text_y,
            inset: self.inset,
            editing: false,
            focused: false,
            link: None,
            pulldown: None,
        }));
        self.layer.append(item.clone());
        item
    }

    /// Switch the active layer, ending any edit session when it changes
    pub fn bind_layer(&mut self, name: &str, editor: &mut TextInput) -> bool {
        let changed = self.layer.bind(name);
        if changed {
            self.finish(editor);
            self.focus.clear();
        }
        changed
    }

    /// Empty a layer
    pub fn clear_layer(&mut self, name: &str, editor: &mut TextInput) {
        let edited_here = self.layer.current_name() == name;
        self.layer.clear(name);
        if edited_here {
            self.finish(editor);
            self.focus.clear();
        }
    }

    /// Remove a box from the active layer
    pub fn erase(&mut self, item: &Handle<TextBox>, editor: &mut TextInput) -> bool {
        if self.editing.as_ref().is_some_and(|e| Rc::ptr_eq(e, item)) {
            self.finish(editor);
        }
        self.focus.forget(item);
        self.layer.erase(item)
    }

    /// Box under the pointer
    pub const fn focused(&self) -> Option<&Handle<TextBox>> {
        self.focus.focused()
    }

    /// Box the edit session is on
    pub const fn editing(&self) -> Option<&Handle<TextBox>> {
        self.editing.as_ref()
    }

    fn finish(&mut self, editor: &mut TextInput) {
        if let Some(item) = self.editing.take() {
            item.borrow_mut().editing = false;
            debug!("Text box edit finished");
        }
        if editor.is_editing() {
            editor.finish();
        }
    }

    /// Press on a box starts editing it with the cursor under the pointer
    pub fn on_click(&mut self, action: ClickAction, pointer: Vec2, editor: &mut TextInput) {
        if action != ClickAction::Press {
            return;
        }
        // an open autocomplete list takes the click
        if self.editing.as_ref().is_some_and(|e| e.borrow().pulldown_open()) {
            return;
        }
        let Some(item) = self.focus.focused().cloned() else {
            return;
        };
        let switching = !self.editing.as_ref().is_some_and(|e| Rc::ptr_eq(e, &item));
        if switching {
            self.finish(editor);
            let mut tb = item.borrow_mut();
            editor.start(&tb.buffer, tb.max_length);
            editor.set_input_style(tb.input_style);
            let autocomplete: Option<AutocompleteRef> =
                tb.pulldown.clone().map(|pd| pd as AutocompleteRef);
            editor.set_autocomplete(autocomplete);
            tb.editing = true;
            drop(tb);
            self.editing = Some(item.clone());
            debug!("Text box edit started");
        }
        let text_left = {
            let tb = item.borrow();
            tb.geometry.bounding_box().left() + tb.inset
        };
        let index = ((pointer.x - text_left) / self.metrics.advance).floor();
        if index >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            editor.set_cursor(index as usize);
        }
    }

    /// Sync slider links, focus and draw every box of the active layer
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas, editor: &mut TextInput) {
        let pointer = ctx.pointer();
        self.focus.begin_frame(ctx.events_enabled);
        let mut end_session = false;
        for item in self.layer.current() {
            let is_edited = self.editing.as_ref().is_some_and(|e| Rc::ptr_eq(e, item));
            let mut tb = item.borrow_mut();
            let dispatch = tb.geometry.update_and_dispatch();
            if !dispatch.visible {
                end_session |= is_edited;
                continue;
            }
            end_session |= tb.refresh_link() && is_edited;
            let bbox = tb.geometry.bounding_box();
            self.focus.check(item, &bbox, dispatch.enabled, pointer);
            let caret = (is_edited && editor.is_editing_buffer(&tb.buffer))
                .then(|| editor.cursor_offset(&self.metrics));
            tb.draw(canvas, caret, &self.metrics);
        }
        self.focus.end_frame();
        for item in self.layer.current() {
            item.borrow_mut().focused = self.focus.is_focused(item);
        }
        if end_session {
            self.finish(editor);
        }
    }
}

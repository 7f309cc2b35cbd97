//! Captioned push button
//!
//! A button fires on release, and only when the press landed on it and the
//! pointer never left it. With an attached pulldown a press toggles the
//! list instead of firing.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::pulldown::Pulldown;
use super::{emit, Callback};
use crate::config::{ThemeConfig, ToolkitConfig};
use crate::foundation::math::{is_visible, Color};
use crate::ui::focus::{FocusArbiter, Focusable, Pressable};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{weak_widget, Geometry, Handle, Widget};
use crate::ui::input::ClickAction;
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics};

/// Colour roles of a text button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// Background without focus
    UnFocusBG,
    /// Background under the pointer
    FocusBG,
    /// Background while pressed
    PressBG,
    /// Caption without focus
    UnFocusFont,
    /// Caption under the pointer
    FocusFont,
    /// Caption while pressed
    PressFont,
    /// Outline
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Palette {
    unfocus_bg: Color,
    focus_bg: Color,
    press_bg: Color,
    unfocus_font: Color,
    focus_font: Color,
    press_font: Color,
    border: Color,
}

impl Palette {
    const fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            unfocus_bg: theme.button_unfocus_bg,
            focus_bg: theme.button_focus_bg,
            press_bg: theme.button_press_bg,
            unfocus_font: theme.button_unfocus_font,
            focus_font: theme.button_focus_font,
            press_font: theme.button_press_font,
            border: theme.button_border,
        }
    }

    fn slot(&mut self, role: ColorType) -> &mut Color {
        match role {
            ColorType::UnFocusBG => &mut self.unfocus_bg,
            ColorType::FocusBG => &mut self.focus_bg,
            ColorType::PressBG => &mut self.press_bg,
            ColorType::UnFocusFont => &mut self.unfocus_font,
            ColorType::FocusFont => &mut self.focus_font,
            ColorType::PressFont => &mut self.press_font,
            ColorType::Border => &mut self.border,
        }
    }

    const fn get(&self, role: ColorType) -> Color {
        match role {
            ColorType::UnFocusBG => self.unfocus_bg,
            ColorType::FocusBG => self.focus_bg,
            ColorType::PressBG => self.press_bg,
            ColorType::UnFocusFont => self.unfocus_font,
            ColorType::FocusFont => self.focus_font,
            ColorType::PressFont => self.press_font,
            ColorType::Border => self.border,
        }
    }
}

/// Push button with a text caption
pub struct TextButton {
    geometry: Geometry,
    caption: String,
    palette: Palette,
    catch_enter: bool,
    pressed: bool,
    enter_held: bool,
    focused: bool,
    pulldown: Option<Handle<Pulldown>>,
    on_press: Callback<()>,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
}

impl Widget for TextButton {
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

impl Focusable for TextButton {
    fn is_held(&self) -> bool {
        self.enter_held
    }
}

impl Pressable for TextButton {
    fn pressed(&self) -> bool {
        self.pressed
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
        if !pressed {
            self.enter_held = false;
        }
    }
}

impl TextButton {
    /// Replace the caption, resizing the button
    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
        let width = self.metrics.measure(caption) + self.padding * 2.0;
        self.geometry.resize(width, self.box_height);
    }

    /// Current caption
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Colour of one role on this button only
    pub fn set_color(&mut self, role: ColorType, color: Color) {
        *self.palette.slot(role) = color;
    }

    /// Colour currently used for a role
    pub const fn color(&self, role: ColorType) -> Color {
        self.palette.get(role)
    }

    /// Subscribe to completed presses
    pub fn set_on_press(&mut self, f: impl FnMut(()) + 'static) {
        self.on_press.set(f);
    }

    /// Attach (or detach with `None`) a list that a press toggles
    pub fn set_pulldown(this: &Handle<Self>, pulldown: Option<Handle<Pulldown>>) {
        if let Some(pd) = &pulldown {
            pd.borrow_mut().set_parent(weak_widget(this));
        }
        this.borrow_mut().pulldown = pulldown;
    }

    /// Whether Enter presses this button when nothing is focused
    pub const fn catches_enter(&self) -> bool {
        self.catch_enter
    }

    fn draw(&self, canvas: &mut dyn Canvas, focus: bool) {
        let (fg, bg) = match (focus, self.pressed) {
            (true, true) => (ColorType::PressFont, ColorType::PressBG),
            (true, false) => (ColorType::FocusFont, ColorType::FocusBG),
            (false, _) => (ColorType::UnFocusFont, ColorType::UnFocusBG),
        };
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth();
        let bbox = self.geometry.bounding_box();
        let fill = self.palette.get(bg);
        if is_visible(&fill) {
            canvas.draw_box(bbox, fill, true, depth);
        }
        if is_visible(&self.palette.border) {
            canvas.draw_box(bbox, self.palette.border, false, depth - 0.02);
        }
        canvas.draw_text(
            &self.caption,
            bbox.left() + self.padding,
            bbox.top() + self.baseline,
            self.palette.get(fg),
            depth - 0.02,
        );
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Text buttons of the active layer
pub struct TextButtonSystem {
    layer: Layer<TextButton>,
    focus: FocusArbiter<TextButton>,
    defaults: Palette,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
}

impl Default for TextButtonSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl TextButtonSystem {
    /// System with theme colours as the process defaults
    pub fn new(config: &ToolkitConfig) -> Self {
        let m = &config.metrics;
        Self {
            layer: Layer::new(),
            focus: FocusArbiter::new(),
            defaults: Palette::from_theme(&config.theme),
            metrics: GlyphMetrics::new(m.glyph_advance),
            padding: m.caption_padding,
            baseline: m.line_height,
            box_height: m.caption_box_height,
        }
    }

    /// Create a button in the active layer
    pub fn create(&mut self, caption: &str, x: f64, y: f64, catch_enter: bool) -> Handle<TextButton> {
        let mut button = TextButton {
            geometry: Geometry::new(x, y, 0.0, 0.0, -0.01),
            caption: String::new(),
            palette: self.defaults,
            catch_enter,
            pressed: false,
            enter_held: false,
            focused: false,
            pulldown: None,
            on_press: Callback::default(),
            metrics: self.metrics,
            padding: self.padding,
            baseline: self.baseline,
            box_height: self.box_height,
        };
        button.set_caption(caption);
        let item = Rc::new(RefCell::new(button));
        self.layer.append(item.clone());
        item
    }

    /// Colour given to buttons created from now on
    pub fn set_default_color(&mut self, role: ColorType, color: Color) {
        *self.defaults.slot(role) = color;
    }

    /// Switch the active layer; focus is kept when the name is unchanged
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

    /// Remove a button from the active layer
    pub fn erase(&mut self, item: &Handle<TextButton>) -> bool {
        self.focus.forget(item);
        self.layer.erase(item)
    }

    /// Button under the pointer or held by Enter
    pub const fn focused(&self) -> Option<&Handle<TextButton>> {
        self.focus.focused()
    }

    /// Press and release handling; `enter` marks clicks synthesized from
    /// the Enter key
    pub fn on_click(&mut self, action: ClickAction, enter: bool) {
        if enter && action == ClickAction::Press && self.focus.focused().is_none() {
            let target = self
                .layer
                .current()
                .iter()
                .find(|b| b.borrow().catch_enter)
                .cloned();
            if let Some(button) = target {
                {
                    let mut b = button.borrow_mut();
                    b.pressed = true;
                    b.enter_held = true;
                    b.focused = true;
                }
                self.focus.set_focused(Some(button));
            }
        }
        let Some(button) = self.focus.focused().cloned() else {
            return;
        };
        let pulldown = button.borrow().pulldown.clone();
        if let Some(pd) = pulldown {
            if action == ClickAction::Press {
                let mut pd = pd.borrow_mut();
                if pd.is_opened() {
                    pd.close();
                } else {
                    pd.open();
                }
            }
            return;
        }
        match action {
            ClickAction::Press => {
                self.focus.press();
            }
            ClickAction::Release => {
                if let Some(fired) = self.focus.release() {
                    debug!("Text button '{}' pressed", fired.borrow().caption);
                    emit(&fired, |b| &mut b.on_press, ());
                }
            }
        }
    }

    /// Focus and draw every button of the active layer
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let pointer = ctx.pointer();
        self.focus.begin_frame(ctx.events_enabled);
        for item in self.layer.current() {
            let mut button = item.borrow_mut();
            let dispatch = button.geometry.update_and_dispatch();
            if !dispatch.visible {
                continue;
            }
            let bbox = button.geometry.bounding_box();
            let check = self.focus.check(item, &bbox, dispatch.enabled, pointer);
            if check.gained {
                button.set_pressed(false);
            }
            button.draw(canvas, check.is_mine);
        }
        self.focus.end_frame();
        for item in self.layer.current() {
            item.borrow_mut().focused = self.focus.is_focused(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors;
    use crate::ui::input::{InputEvent, InputProcessor};
    use crate::ui::rendering::{DrawCommand, RecordingCanvas};
    use crate::ui::widgets::PulldownSystem;
    use approx::assert_relative_eq;

    struct Rig {
        config: ToolkitConfig,
        input: InputProcessor,
        system: TextButtonSystem,
        canvas: RecordingCanvas,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                config: ToolkitConfig::default(),
                input: InputProcessor::default(),
                system: TextButtonSystem::default(),
                canvas: RecordingCanvas::default(),
            }
        }

        fn frame_at(&mut self, x: f64, y: f64) {
            self.input.apply(&InputEvent::CursorMoved { x, y });
            self.canvas.clear();
            let ctx = FrameContext::new(&self.config, &self.input, true, 0);
            self.system.update(&ctx, &mut self.canvas);
        }
    }

    fn counter(button: &Handle<TextButton>) -> Rc<RefCell<u32>> {
        let hits = Rc::new(RefCell::new(0));
        let count = hits.clone();
        button.borrow_mut().set_on_press(move |()| *count.borrow_mut() += 1);
        hits
    }

    #[test]
    fn test_size_from_caption() {
        let mut system = TextButtonSystem::default();
        let button = system.create("OK", 10.0, 10.0, false);
        assert_relative_eq!(button.borrow().width(), 2.0 * 21.0 + 40.0);
        assert_relative_eq!(button.borrow().height(), 62.0);
    }

    #[test]
    fn test_fires_on_release_in_place() {
        let mut rig = Rig::new();
        let button = rig.system.create("Start", 10.0, 10.0, false);
        let hits = counter(&button);
        rig.frame_at(20.0, 20.0);
        rig.system.on_click(ClickAction::Press, false);
        rig.frame_at(25.0, 20.0);
        assert_eq!(*hits.borrow(), 0);
        rig.system.on_click(ClickAction::Release, false);
        assert_eq!(*hits.borrow(), 1);
        rig.system.on_click(ClickAction::Release, false);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_drag_off_cancels() {
        let mut rig = Rig::new();
        let button = rig.system.create("Start", 10.0, 10.0, false);
        let hits = counter(&button);
        rig.frame_at(20.0, 20.0);
        rig.system.on_click(ClickAction::Press, false);
        rig.frame_at(600.0, 500.0);
        rig.frame_at(20.0, 20.0);
        rig.system.on_click(ClickAction::Release, false);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_enter_presses_first_catching_button() {
        let mut rig = Rig::new();
        let plain = rig.system.create("Plain", 10.0, 10.0, false);
        let catcher = rig.system.create("Go", 10.0, 100.0, true);
        let plain_hits = counter(&plain);
        let hits = counter(&catcher);
        rig.frame_at(600.0, 500.0);
        rig.system.on_click(ClickAction::Press, true);
        // held by Enter, so it keeps focus with the pointer elsewhere
        rig.frame_at(600.0, 500.0);
        assert!(catcher.borrow().focus());
        rig.system.on_click(ClickAction::Release, true);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(*plain_hits.borrow(), 0);
        rig.frame_at(600.0, 500.0);
        assert!(rig.system.focused().is_none());
    }

    #[test]
    fn test_press_toggles_attached_pulldown() {
        let mut rig = Rig::new();
        let mut pulldowns = PulldownSystem::default();
        let pd = pulldowns.create(vec!["a".to_string(), "b".to_string()], 3);
        let button = rig.system.create("Menu", 10.0, 10.0, false);
        TextButton::set_pulldown(&button, Some(pd.clone()));
        let hits = counter(&button);

        rig.frame_at(20.0, 20.0);
        rig.system.on_click(ClickAction::Press, false);
        assert!(pd.borrow().is_opened());
        rig.system.on_click(ClickAction::Release, false);
        assert_eq!(*hits.borrow(), 0);
        rig.system.on_click(ClickAction::Press, false);
        assert!(!pd.borrow().is_opened());
    }

    #[test]
    fn test_rebinding_same_layer_keeps_focus() {
        let mut rig = Rig::new();
        rig.system.create("A", 10.0, 10.0, false);
        rig.frame_at(20.0, 20.0);
        assert!(!rig.system.bind_layer(crate::ui::layer::DEFAULT_LAYER));
        assert!(rig.system.focused().is_some());
        assert!(rig.system.bind_layer("menu"));
        assert!(rig.system.focused().is_none());
    }

    #[test]
    fn test_colors_follow_state_and_defaults() {
        let mut rig = Rig::new();
        rig.system.set_default_color(ColorType::FocusBG, colors::RED);
        let button = rig.system.create("A", 10.0, 10.0, false);
        assert_eq!(button.borrow().color(ColorType::FocusBG), colors::RED);

        rig.frame_at(20.0, 20.0);
        assert!(matches!(
            rig.canvas.commands()[0],
            DrawCommand::Box { color, filled: true, .. } if color == colors::RED
        ));
        rig.system.on_click(ClickAction::Press, false);
        rig.frame_at(20.0, 20.0);
        let press_bg = rig.config.theme.button_press_bg;
        assert!(matches!(
            rig.canvas.commands()[0],
            DrawCommand::Box { color, filled: true, .. } if color == press_bg
        ));
    }
}

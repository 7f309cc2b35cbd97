//! Push button drawn from an image
//!
//! The button takes the size of its image. Separate images and tints can
//! be given for the focused and unfocused states, and an optional caption
//! is centred under the image.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::{emit, Callback};
use crate::config::ToolkitConfig;
use crate::error::WidgetResult;
use crate::foundation::math::{colors, Color};
use crate::ui::focus::{FocusArbiter, Focusable, Pressable};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::input::ClickAction;
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics, IconRegistry, ImageHandle};

/// Image push button
pub struct ImageButton {
    geometry: Geometry,
    focus_image: ImageHandle,
    unfocus_image: ImageHandle,
    focus_color: Color,
    unfocus_color: Color,
    caption: String,
    catch_enter: bool,
    pressed: bool,
    enter_held: bool,
    focused: bool,
    on_press: Callback<()>,
    metrics: GlyphMetrics,
    baseline: f64,
}

impl Widget for ImageButton {
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

impl Focusable for ImageButton {
    fn is_held(&self) -> bool {
        self.enter_held
    }
}

impl Pressable for ImageButton {
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

impl ImageButton {
    /// Image shown under the pointer
    pub fn set_focus_icon(&mut self, icons: &mut IconRegistry, path: &str) -> WidgetResult<()> {
        self.focus_image = icons.handle(path)?;
        Ok(())
    }

    /// Image shown otherwise
    pub fn set_unfocus_icon(&mut self, icons: &mut IconRegistry, path: &str) -> WidgetResult<()> {
        self.unfocus_image = icons.handle(path)?;
        Ok(())
    }

    /// Tint under the pointer
    pub fn set_focus_color(&mut self, color: Color) {
        self.focus_color = color;
    }

    /// Tint otherwise
    pub fn set_unfocus_color(&mut self, color: Color) {
        self.unfocus_color = color;
    }

    /// Text under the image; empty hides it
    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    /// Subscribe to completed presses
    pub fn set_on_press(&mut self, f: impl FnMut(()) + 'static) {
        self.on_press.set(f);
    }

    fn draw(&self, canvas: &mut dyn Canvas, focus: bool) {
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth();
        let bbox = self.geometry.bounding_box();
        let (image, color) = if focus {
            (&self.focus_image, self.focus_color)
        } else {
            (&self.unfocus_image, self.unfocus_color)
        };
        canvas.draw_image(image, bbox, color, depth);
        if !self.caption.is_empty() {
            let x = (bbox.left() + bbox.right() - self.metrics.measure(&self.caption)) * 0.5;
            canvas.draw_text(&self.caption, x, bbox.bottom() + self.baseline - 5.0, color, depth);
        }
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Image buttons of the active layer
pub struct ImageButtonSystem {
    layer: Layer<ImageButton>,
    focus: FocusArbiter<ImageButton>,
    metrics: GlyphMetrics,
    baseline: f64,
}

impl Default for ImageButtonSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl ImageButtonSystem {
    /// System laying captions out with the configured metrics
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            layer: Layer::new(),
            focus: FocusArbiter::new(),
            metrics: GlyphMetrics::new(config.metrics.glyph_advance),
            baseline: config.metrics.line_height,
        }
    }

    /// Create a button from an image file; nothing is created when the
    /// image cannot be decoded
    pub fn create(
        &mut self,
        icons: &mut IconRegistry,
        path: &str,
        x: f64,
        y: f64,
        catch_enter: bool,
    ) -> WidgetResult<Handle<ImageButton>> {
        let image = icons.handle(path)?;
        let (width, height) = (f64::from(image.width), f64::from(image.height));
        let item = Rc::new(RefCell::new(ImageButton {
            geometry: Geometry::new(x, y, width, height, -0.01),
            focus_image: image.clone(),
            unfocus_image: image,
            focus_color: colors::WHITE,
            unfocus_color: colors::WHITE,
            caption: String::new(),
            catch_enter,
            pressed: false,
            enter_held: false,
            focused: false,
            on_press: Callback::default(),
            metrics: self.metrics,
            baseline: self.baseline,
        }));
        self.layer.append(item.clone());
        Ok(item)
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

    /// Remove a button from the active layer
    pub fn erase(&mut self, item: &Handle<ImageButton>) -> bool {
        self.focus.forget(item);
        self.layer.erase(item)
    }

    /// Button under the pointer or held by Enter
    pub const fn focused(&self) -> Option<&Handle<ImageButton>> {
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
                button.borrow_mut().enter_held = true;
                self.focus.set_focused(Some(button));
            }
        }
        match action {
            ClickAction::Press => {
                self.focus.press();
            }
            ClickAction::Release => {
                if let Some(fired) = self.focus.release() {
                    debug!("Image button {} pressed", fired.borrow().unfocus_image.path);
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
    use crate::error::WidgetError;
    use crate::ui::input::{InputEvent, InputProcessor};
    use crate::ui::rendering::{DrawCommand, ImageDecoder, RecordingCanvas};
    use approx::assert_relative_eq;

    struct FixedDecoder;

    impl ImageDecoder for FixedDecoder {
        fn decode(&self, path: &str) -> WidgetResult<ImageHandle> {
            if path.ends_with(".png") {
                Ok(ImageHandle {
                    path: path.to_string(),
                    width: 64,
                    height: 32,
                })
            } else {
                Err(WidgetError::ImageDecode {
                    path: path.to_string(),
                    reason: "unsupported".to_string(),
                })
            }
        }
    }

    fn icons() -> IconRegistry {
        IconRegistry::new(Box::new(FixedDecoder))
    }

    fn frame_at(system: &mut ImageButtonSystem, x: f64, y: f64) -> RecordingCanvas {
        let config = ToolkitConfig::default();
        let mut input = InputProcessor::default();
        input.apply(&InputEvent::CursorMoved { x, y });
        let mut canvas = RecordingCanvas::default();
        system.update(&FrameContext::new(&config, &input, true, 0), &mut canvas);
        canvas
    }

    #[test]
    fn test_size_comes_from_image() {
        let mut system = ImageButtonSystem::default();
        let button = system.create(&mut icons(), "play.png", 5.0, 5.0, false).unwrap();
        assert_relative_eq!(button.borrow().width(), 64.0);
        assert_relative_eq!(button.borrow().height(), 32.0);
    }

    #[test]
    fn test_failed_decode_creates_nothing() {
        let mut system = ImageButtonSystem::default();
        let result = system.create(&mut icons(), "play.bmp", 5.0, 5.0, false);
        assert!(matches!(result, Err(WidgetError::ImageDecode { .. })));
        assert!(system.layer.current().is_empty());
    }

    #[test]
    fn test_focus_swaps_image() {
        let mut icons = icons();
        let mut system = ImageButtonSystem::default();
        let button = system.create(&mut icons, "idle.png", 0.0, 0.0, false).unwrap();
        button.borrow_mut().set_focus_icon(&mut icons, "hot.png").unwrap();
        assert!(button.borrow_mut().set_unfocus_icon(&mut icons, "bad.gif").is_err());

        let drawn = |canvas: &RecordingCanvas| match &canvas.commands()[0] {
            DrawCommand::Image { path, .. } => path.clone(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(drawn(&frame_at(&mut system, 10.0, 10.0)), "hot.png");
        assert_eq!(drawn(&frame_at(&mut system, 300.0, 300.0)), "idle.png");
    }

    #[test]
    fn test_press_release_fires_once() {
        let mut system = ImageButtonSystem::default();
        let button = system.create(&mut icons(), "play.png", 0.0, 0.0, false).unwrap();
        let hits = Rc::new(RefCell::new(0));
        let count = hits.clone();
        button.borrow_mut().set_on_press(move |()| *count.borrow_mut() += 1);

        frame_at(&mut system, 10.0, 10.0);
        system.on_click(ClickAction::Press, false);
        system.on_click(ClickAction::Release, false);
        system.on_click(ClickAction::Release, false);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_caption_is_centred_below() {
        let mut system = ImageButtonSystem::default();
        let button = system.create(&mut icons(), "play.png", 0.0, 0.0, false).unwrap();
        button.borrow_mut().set_caption("Go");
        let canvas = frame_at(&mut system, 300.0, 300.0);
        match &canvas.commands()[1] {
            DrawCommand::Text { text, x, y, .. } => {
                assert_eq!(text, "Go");
                assert_relative_eq!(*x, 11.0);
                assert_relative_eq!(*y, 32.0 + 42.0 - 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

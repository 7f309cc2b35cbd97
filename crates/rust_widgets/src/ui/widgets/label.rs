//! Static caption, optionally mirroring a slide bar value

use std::cell::RefCell;
use std::rc::Rc;

use super::slide_bar::SlideBar;
use crate::config::ToolkitConfig;
use crate::foundation::math::{is_visible, Color};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::layer::Layer;
use crate::ui::rendering::{Canvas, GlyphMetrics};

struct SliderLink {
    slider: Handle<SlideBar>,
    precision: usize,
    shown: Option<f64>,
}

/// Text caption sized from its content
pub struct Label {
    geometry: Geometry,
    text: String,
    font: Color,
    background: Color,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
    link: Option<SliderLink>,
}

impl Widget for Label {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Label {
    /// Replace the caption and resize the box to fit
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let width = self.metrics.measure(text) + self.padding * 2.0;
        self.geometry.resize(width, self.box_height);
    }

    /// Current caption
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caption colour
    pub fn set_font_color(&mut self, color: Color) {
        self.font = color;
    }

    /// Background fill; clear draws none
    pub fn set_bg_color(&mut self, color: Color) {
        self.background = color;
    }

    /// Show a slide bar value with `precision` decimals; `None` unlinks
    pub fn set_slider(&mut self, slider: Option<Handle<SlideBar>>, precision: usize) {
        self.link = slider.map(|slider| SliderLink {
            slider,
            precision,
            shown: None,
        });
        self.refresh_link();
    }

    fn refresh_link(&mut self) {
        let Some(link) = &mut self.link else {
            return;
        };
        let value = link.slider.borrow().number();
        if link.shown == Some(value) {
            return;
        }
        link.shown = Some(value);
        let text = format!("{value:.prec$}", prec = link.precision);
        self.set_text(&text);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let clipped = self.geometry.begin_clip(canvas);
        let depth = self.geometry.draw_depth();
        let bbox = self.geometry.bounding_box();
        if is_visible(&self.background) {
            canvas.draw_box(bbox, self.background, true, depth);
        }
        canvas.draw_text(
            &self.text,
            bbox.left() + self.padding,
            bbox.top() + self.baseline,
            self.font,
            depth - 0.02,
        );
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Labels of the active layer
pub struct LabelSystem {
    layer: Layer<Label>,
    metrics: GlyphMetrics,
    padding: f64,
    baseline: f64,
    box_height: f64,
}

impl Default for LabelSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl LabelSystem {
    /// System laying captions out with the configured metrics
    pub fn new(config: &ToolkitConfig) -> Self {
        let m = &config.metrics;
        Self {
            layer: Layer::new(),
            metrics: GlyphMetrics::new(m.glyph_advance),
            padding: m.caption_padding,
            baseline: m.line_height,
            box_height: m.caption_box_height,
        }
    }

    /// Create a label in the active layer
    pub fn create(&mut self, text: &str, x: f64, y: f64, font: Color, background: Color) -> Handle<Label> {
        let mut label = Label {
            geometry: Geometry::new(x, y, 0.0, 0.0, 0.0),
            text: String::new(),
            font,
            background,
            metrics: self.metrics,
            padding: self.padding,
            baseline: self.baseline,
            box_height: self.box_height,
            link: None,
        };
        label.set_text(text);
        let item = Rc::new(RefCell::new(label));
        self.layer.append(item.clone());
        item
    }

    /// Switch the active layer
    pub fn bind_layer(&mut self, name: &str) -> bool {
        self.layer.bind(name)
    }

    /// Empty a layer
    pub fn clear_layer(&mut self, name: &str) {
        self.layer.clear(name);
    }

    /// Remove a label from the active layer
    pub fn erase(&mut self, item: &Handle<Label>) -> bool {
        self.layer.erase(item)
    }

    /// Refresh slider links and draw the active layer
    pub fn update(&mut self, _ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        for item in self.layer.current() {
            let mut label = item.borrow_mut();
            label.refresh_link();
            if label.geometry.update_and_dispatch().visible {
                label.draw(canvas);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors;
    use crate::ui::input::InputProcessor;
    use crate::ui::rendering::RecordingCanvas;
    use crate::ui::widgets::SlideBarSystem;
    use approx::assert_relative_eq;

    #[test]
    fn test_text_sizes_the_box() {
        let mut system = LabelSystem::default();
        let label = system.create("Volume", 10.0, 10.0, colors::WHITE, colors::CLEAR);
        assert_relative_eq!(label.borrow().width(), 6.0 * 21.0 + 40.0);
        assert_relative_eq!(label.borrow().height(), 62.0);
        label.borrow_mut().set_text("日本");
        assert_relative_eq!(label.borrow().width(), 3.0 * 21.0 + 40.0);
    }

    #[test]
    fn test_mirrors_slider_with_precision() {
        let config = ToolkitConfig::default();
        let input = InputProcessor::default();
        let mut bars = SlideBarSystem::new(&config);
        let bar = bars.create(0.0, 0.0, 200.0, 20.0);
        let mut system = LabelSystem::new(&config);
        let label = system.create("", 0.0, 40.0, colors::WHITE, colors::CLEAR);

        label.borrow_mut().set_slider(Some(bar.clone()), 2);
        assert_eq!(label.borrow().text(), "0.00");

        bar.borrow_mut().set_number(0.375);
        let mut canvas = RecordingCanvas::default();
        system.update(&FrameContext::new(&config, &input, true, 0), &mut canvas);
        assert_eq!(label.borrow().text(), "0.38");
        assert!(canvas.has_text("0.38"));
    }

    #[test]
    fn test_background_only_drawn_when_visible() {
        let config = ToolkitConfig::default();
        let input = InputProcessor::default();
        let mut system = LabelSystem::new(&config);
        system.create("a", 0.0, 0.0, colors::WHITE, colors::CLEAR);
        let mut canvas = RecordingCanvas::default();
        system.update(&FrameContext::new(&config, &input, true, 0), &mut canvas);
        assert_eq!(canvas.commands().len(), 1);
        assert_eq!(canvas.texts(), vec!["a"]);
    }
}

//! Filled panel placed behind other widgets

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ToolkitConfig;
use crate::foundation::math::{is_visible, Color};
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::layer::Layer;
use crate::ui::rendering::Canvas;

/// Decorative rectangle; never takes focus
pub struct Sheet {
    geometry: Geometry,
    border: Color,
    fill: Color,
}

impl Widget for Sheet {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Sheet {
    /// Resize the panel
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.geometry.resize(width, height);
    }

    /// Outline colour; clear disables the outline
    pub fn set_border_color(&mut self, color: Color) {
        self.border = color;
    }

    /// Fill colour; clear disables the fill
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    /// Depth relative to the container
    pub fn set_depth(&mut self, depth: f32) {
        self.geometry.depth = depth;
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let clipped = self.geometry.begin_clip(canvas);
        let bbox = self.geometry.bounding_box();
        let depth = self.geometry.draw_depth();
        if is_visible(&self.border) {
            canvas.draw_box(bbox, self.border, false, depth);
        }
        if is_visible(&self.fill) {
            canvas.draw_box(bbox, self.fill, true, depth);
        }
        if clipped {
            canvas.disable_scissor();
        }
    }
}

/// Sheets of the active layer
pub struct SheetSystem {
    layer: Layer<Sheet>,
    border: Color,
    fill: Color,
}

impl Default for SheetSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl SheetSystem {
    /// System using the theme panel colours
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            layer: Layer::new(),
            border: config.theme.panel_border,
            fill: config.theme.panel_fill,
        }
    }

    /// Create a panel in the active layer
    pub fn create(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<Sheet> {
        let item = Rc::new(RefCell::new(Sheet {
            geometry: Geometry::new(x, y, width, height, 0.05),
            border: self.border,
            fill: self.fill,
        }));
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

    /// Remove a panel from the active layer
    pub fn erase(&mut self, item: &Handle<Sheet>) -> bool {
        self.layer.erase(item)
    }

    /// Place and draw every panel of the active layer
    pub fn update(&mut self, _ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        for item in self.layer.current() {
            let mut sheet = item.borrow_mut();
            if sheet.geometry.update_and_dispatch().visible {
                sheet.draw(canvas);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors;
    use crate::ui::input::InputProcessor;
    use crate::ui::rendering::{DrawCommand, RecordingCanvas};
    use crate::ui::widgets::{ScrollBox, ScrollBoxSystem};

    #[test]
    fn test_sheet_draws_border_and_fill() {
        let config = ToolkitConfig::default();
        let input = InputProcessor::default();
        let mut system = SheetSystem::new(&config);
        let sheet = system.create(10.0, 10.0, 100.0, 50.0);
        sheet.borrow_mut().set_border_color(colors::CLEAR);

        let mut canvas = RecordingCanvas::default();
        system.update(&FrameContext::new(&config, &input, true, 0), &mut canvas);
        assert_eq!(canvas.commands().len(), 1);
        assert!(matches!(canvas.commands()[0], DrawCommand::Box { filled: true, .. }));
    }

    #[test]
    fn test_sheet_inside_scroll_box_is_clipped() {
        let config = ToolkitConfig::default();
        let input = InputProcessor::default();
        let mut scrolls = ScrollBoxSystem::new(&config);
        let scroll = scrolls.create(0.0, 0.0, 200.0, 200.0);
        let mut system = SheetSystem::new(&config);
        let sheet = system.create(10.0, 10.0, 100.0, 50.0);
        ScrollBox::append(&scroll, &sheet);

        let mut canvas = RecordingCanvas::default();
        system.update(&FrameContext::new(&config, &input, true, 0), &mut canvas);
        let commands = canvas.commands();
        assert!(matches!(commands.first(), Some(DrawCommand::Scissor(_))));
        assert!(matches!(commands.last(), Some(DrawCommand::NoScissor)));
    }

    #[test]
    fn test_erase_and_clear_layer() {
        let mut system = SheetSystem::default();
        let a = system.create(0.0, 0.0, 10.0, 10.0);
        assert!(system.erase(&a));
        assert!(!system.erase(&a));
        system.create(0.0, 0.0, 10.0, 10.0);
        system.clear_layer(crate::ui::layer::DEFAULT_LAYER);
        assert!(system.layer.current().is_empty());
    }
}

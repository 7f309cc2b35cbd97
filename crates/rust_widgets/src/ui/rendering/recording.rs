//! Canvas that records instead of drawing

use super::{Canvas, DrawCommand, GlyphMetrics, ImageHandle};
use crate::foundation::math::{Color, Vec2};
use crate::ui::bbox::Rect;

/// Captures every call for inspection; used by tests and headless drivers
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    metrics: GlyphMetrics,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(21.0)
    }
}

impl RecordingCanvas {
    /// Recorder measuring text with the given narrow glyph advance
    pub fn new(glyph_advance: f64) -> Self {
        Self {
            metrics: GlyphMetrics::new(glyph_advance),
            commands: Vec::new(),
        }
    }

    /// Calls made since the last [`Self::clear`]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded calls, typically once per frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text runs in call order
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }

    /// Whether a text run with exactly this content was drawn
    pub fn has_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }
}

impl Canvas for RecordingCanvas {
    fn draw_box(&mut self, rect: Rect, color: Color, filled: bool, depth: f32) {
        self.commands.push(DrawCommand::Box { rect, color, filled, depth });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, depth: f32) {
        self.commands.push(DrawCommand::Line { from, to, color, depth });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color, depth: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
            depth,
        });
    }

    fn draw_image(&mut self, image: &ImageHandle, rect: Rect, color: Color, depth: f32) {
        self.commands.push(DrawCommand::Image {
            path: image.path.clone(),
            rect,
            color,
            depth,
        });
    }

    fn enable_scissor(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Scissor(rect));
    }

    fn disable_scissor(&mut self) {
        self.commands.push(DrawCommand::NoScissor);
    }

    fn measure(&self, text: &str) -> f64 {
        self.metrics.measure(text)
    }
}

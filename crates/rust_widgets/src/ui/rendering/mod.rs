//! Rendering seam
//!
//! Widgets never touch a graphics API; they issue calls on a [`Canvas`]
//! supplied by the caller each frame. Glyph rasterization, texture upload
//! and shader plumbing live behind that trait.

pub mod commands;
pub mod images;
pub mod recording;

pub use commands::DrawCommand;
pub use images::{FileImageDecoder, IconId, IconRegistry, ImageDecoder, ImageHandle};
pub use recording::RecordingCanvas;

use super::bbox::Rect;
use crate::foundation::math::{Color, Vec2};

/// Drawing surface and text measurement service
pub trait Canvas {
    /// Outline or fill a rectangle
    fn draw_box(&mut self, rect: Rect, color: Color, filled: bool, depth: f32);

    /// Straight line between two points
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, depth: f32);

    /// Text with its baseline-left at `(x, y)`
    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color, depth: f32);

    /// Image stretched over `rect`, tinted by `color`
    fn draw_image(&mut self, image: &ImageHandle, rect: Rect, color: Color, depth: f32);

    /// Restrict drawing to `rect` until [`Canvas::disable_scissor`]
    fn enable_scissor(&mut self, rect: Rect);

    /// Lift the clip rectangle
    fn disable_scissor(&mut self);

    /// Rendered width of `text` in pixels
    fn measure(&self, text: &str) -> f64;
}

/// Fixed-advance text metrics
///
/// Codepoints below U+0100 count one advance, everything else one and a
/// half, which is how wide glyphs sit in the toolkit font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Advance of one narrow glyph
    pub advance: f64,
}

impl GlyphMetrics {
    /// Metrics with the given narrow advance
    pub const fn new(advance: f64) -> Self {
        Self { advance }
    }

    /// Width of `text`
    pub fn measure(&self, text: &str) -> f64 {
        text_units(text) * self.advance
    }

    /// Width of a codepoint slice
    pub fn measure_chars(&self, chars: &[char]) -> f64 {
        chars.iter().map(|&c| char_units(c)).sum::<f64>() * self.advance
    }
}

/// Advance units of one codepoint
pub fn char_units(c: char) -> f64 {
    if u32::from(c) < 0x100 {
        1.0
    } else {
        1.5
    }
}

/// Advance units of a string
pub fn text_units(text: &str) -> f64 {
    text.chars().map(char_units).sum()
}

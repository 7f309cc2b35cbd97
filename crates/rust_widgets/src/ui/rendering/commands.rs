//! Recorded draw calls

use crate::foundation::math::{Color, Vec2};
use crate::ui::bbox::Rect;

/// One canvas call, as captured by [`super::RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rectangle
    Box {
        /// Area
        rect: Rect,
        /// Colour
        color: Color,
        /// Filled or outline
        filled: bool,
        /// Draw depth
        depth: f32,
    },
    /// Line segment
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
        /// Colour
        color: Color,
        /// Draw depth
        depth: f32,
    },
    /// Text run
    Text {
        /// Content
        text: String,
        /// Baseline-left x
        x: f64,
        /// Baseline y
        y: f64,
        /// Colour
        color: Color,
        /// Draw depth
        depth: f32,
    },
    /// Image blit
    Image {
        /// Source path of the image
        path: String,
        /// Destination
        rect: Rect,
        /// Tint
        color: Color,
        /// Draw depth
        depth: f32,
    },
    /// Clip rectangle set
    Scissor(Rect),
    /// Clip rectangle lifted
    NoScissor,
}

impl DrawCommand {
    /// Text content, when this is a text run
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

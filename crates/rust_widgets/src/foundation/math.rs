//! Math utilities and types
//!
//! Screen positions are kept in `f64` pixels (top-left origin), colours as
//! RGBA `f32` vectors.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type used for pointer positions and offsets
pub type Vec2 = Vector2<f64>;

/// RGBA colour
pub type Color = Vector4<f32>;

/// Named colours shared by the widget defaults
pub mod colors {
    use super::Color;

    /// Opaque white
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Mid gray
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);
    /// Dark gray used for panel fills
    pub const DARK_GRAY: Color = Color::new(0.3, 0.3, 0.3, 1.0);
    /// Light gray used for highlights
    pub const LIGHT_GRAY: Color = Color::new(0.7, 0.7, 0.7, 1.0);
    /// Opaque red
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque cyan
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);
    /// Opaque orange, the default focus accent
    pub const ORANGE: Color = Color::new(1.0, 0.6, 0.0, 1.0);
    /// Fully transparent
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);
}

/// Whether a colour would draw anything at all
pub fn is_visible(color: &Color) -> bool {
    color.w > 0.0
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

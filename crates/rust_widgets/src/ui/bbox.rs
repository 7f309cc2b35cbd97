//! Bounding boxes
//!
//! Axis-aligned rectangles in screen pixels (top-left origin, y grows
//! downward) built from an anchor point and one of nine alignments.

/// Which point of the rectangle the anchor coordinates name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Anchor is the top-left corner
    #[default]
    LeftTop,
    /// Anchor is the top-right corner
    RightTop,
    /// Anchor is the middle of the top edge
    CenterTop,
    /// Anchor is the middle of the left edge
    LeftCenter,
    /// Anchor is the middle of the right edge
    RightCenter,
    /// Anchor is the center
    Center,
    /// Anchor is the bottom-left corner
    LeftBottom,
    /// Anchor is the bottom-right corner
    RightBottom,
    /// Anchor is the middle of the bottom edge
    CenterBottom,
}

impl Align {
    /// Fraction of the width/height that lies left of/above the anchor
    pub const fn to_normalized(self) -> (f64, f64) {
        match self {
            Self::LeftTop => (0.0, 0.0),
            Self::CenterTop => (0.5, 0.0),
            Self::RightTop => (1.0, 0.0),
            Self::LeftCenter => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::RightCenter => (1.0, 0.5),
            Self::LeftBottom => (0.0, 1.0),
            Self::CenterBottom => (0.5, 1.0),
            Self::RightBottom => (1.0, 1.0),
        }
    }
}

/// Axis-aligned rectangle
///
/// `left <= right` and `top <= bottom` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Rect {
    /// Build a rectangle of size `w` x `h` whose `align` point sits at `(x, y)`
    pub fn new(x: f64, y: f64, w: f64, h: f64, align: Align) -> Self {
        let (ax, ay) = align.to_normalized();
        let left = x - w * ax;
        let top = y - h * ay;
        Self::from_edges(left, top, left + w, top + h)
    }

    /// Build a rectangle whose top-left corner is `(x, y)`
    pub fn at(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, w, h, Align::LeftTop)
    }

    /// Build from edges, swapping reversed pairs
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Left edge
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// Right edge
    pub const fn right(&self) -> f64 {
        self.right
    }

    /// Top edge
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Bottom edge
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Strict interior test; points on the border are outside
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.left < px && px < self.right && self.top < py && py < self.bottom
    }

    /// Whether the two rectangles share interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Copy moved by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Align; 9] = [
        Align::LeftTop,
        Align::RightTop,
        Align::CenterTop,
        Align::LeftCenter,
        Align::RightCenter,
        Align::Center,
        Align::LeftBottom,
        Align::RightBottom,
        Align::CenterBottom,
    ];

    #[test]
    fn test_left_top_scenario() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0, Align::LeftTop);
        assert!(r.contains(50.0, 30.0));
        assert!(!r.contains(5.0, 30.0));
    }

    #[test]
    fn test_border_is_outside() {
        let r = Rect::at(10.0, 10.0, 100.0, 50.0);
        assert!(!r.contains(10.0, 30.0));
        assert!(!r.contains(110.0, 30.0));
        assert!(!r.contains(50.0, 10.0));
        assert!(!r.contains(50.0, 60.0));
        assert!(r.contains(10.001, 59.999));
    }

    #[test]
    fn test_center_bottom_ends_at_anchor() {
        let r = Rect::new(100.0, 200.0, 40.0, 20.0, Align::CenterBottom);
        assert_relative_eq!(r.left(), 80.0);
        assert_relative_eq!(r.right(), 120.0);
        assert_relative_eq!(r.top(), 180.0);
        assert_relative_eq!(r.bottom(), 200.0);
    }

    #[test]
    fn test_right_center() {
        let r = Rect::new(100.0, 100.0, 40.0, 20.0, Align::RightCenter);
        assert_relative_eq!(r.left(), 60.0);
        assert_relative_eq!(r.right(), 100.0);
        assert_relative_eq!(r.top(), 90.0);
        assert_relative_eq!(r.bottom(), 110.0);
    }

    #[test]
    fn test_every_alignment_keeps_size_and_contains_its_center() {
        for align in ALL {
            let r = Rect::new(50.0, 70.0, 30.0, 10.0, align);
            assert!(r.left() <= r.right(), "{align:?}");
            assert!(r.top() <= r.bottom(), "{align:?}");
            assert_relative_eq!(r.width(), 30.0);
            assert_relative_eq!(r.height(), 10.0);
            let cx = (r.left() + r.right()) * 0.5;
            let cy = (r.top() + r.bottom()) * 0.5;
            assert!(r.contains(cx, cy), "{align:?}");
            assert!(!r.contains(r.left() - 0.5, cy), "{align:?}");
            assert!(!r.contains(cx, r.bottom() + 0.5), "{align:?}");
        }
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let r = Rect::at(10.0, 10.0, -5.0, -5.0);
        assert!(r.left() <= r.right());
        assert!(r.top() <= r.bottom());
        assert!(r.contains(7.0, 7.0));
    }

    #[test]
    fn test_overlaps() {
        let view = Rect::at(0.0, 0.0, 100.0, 100.0);
        assert!(view.overlaps(&Rect::at(90.0, 90.0, 50.0, 50.0)));
        assert!(view.overlaps(&Rect::at(-10.0, 20.0, 20.0, 5.0)));
        assert!(!view.overlaps(&Rect::at(100.0, 0.0, 10.0, 10.0)));
        assert!(!view.overlaps(&Rect::at(0.0, -30.0, 10.0, 20.0)));
    }

    #[test]
    fn test_translated() {
        let r = Rect::at(0.0, 0.0, 10.0, 10.0).translated(5.0, -5.0);
        assert_relative_eq!(r.left(), 5.0);
        assert_relative_eq!(r.top(), -5.0);
    }
}

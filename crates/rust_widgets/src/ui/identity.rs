//! Widget identity contract
//!
//! Every widget exposes geometry, a depth, an optional container and the
//! placement/visibility hooks the container answers for its children. The
//! per-frame [`Geometry::update_and_dispatch`] is the one mechanism every
//! kind runs before hit-testing and drawing.
//!
//! Parents are held weakly. A child must be erased no later than its
//! container; a child whose container is gone behaves as top-level.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::bbox::Rect;
use super::rendering::Canvas;

/// Shared, reference-counted widget handle
pub type Handle<T> = Rc<RefCell<T>>;

/// Non-owning, type-erased widget reference
pub type WidgetRef = Weak<RefCell<dyn Widget>>;

/// Non-owning reference from a child to its container
pub type ParentRef = WidgetRef;

/// Downgrade any widget handle into a type-erased weak reference
pub fn weak_widget<T: Widget + 'static>(handle: &Handle<T>) -> WidgetRef {
    let strong: Rc<RefCell<dyn Widget>> = handle.clone();
    Rc::downgrade(&strong)
}

/// Whether a type-erased reference points at `handle`
pub fn is_same_widget<T>(weak: &WidgetRef, handle: &Handle<T>) -> bool {
    weak.as_ptr().cast::<()>() == Rc::as_ptr(handle).cast::<()>()
}

/// Capability set shared by all widgets
pub trait Widget {
    /// Position, size and container of this widget
    fn geometry(&self) -> &Geometry;

    /// Mutable access to the geometry
    fn geometry_mut(&mut self) -> &mut Geometry;

    /// Own x position (before container offset)
    fn x(&self) -> f64 {
        self.geometry().x
    }

    /// Own y position (before container offset)
    fn y(&self) -> f64 {
        self.geometry().y
    }

    /// Width in pixels
    fn width(&self) -> f64 {
        self.geometry().width
    }

    /// Height in pixels
    fn height(&self) -> f64 {
        self.geometry().height
    }

    /// Draw depth; more negative is nearer the viewer
    fn depth(&self) -> f32 {
        self.geometry().depth
    }

    /// Attach to a container
    fn set_parent(&mut self, parent: ParentRef) {
        self.geometry_mut().parent = Some(parent);
    }

    /// World x offset applied to children
    fn placement_x(&self) -> f64 {
        self.x()
    }

    /// World y offset applied to children
    fn placement_y(&self) -> f64 {
        self.y()
    }

    /// Whether children may take pointer focus this frame
    fn focus(&self) -> bool {
        true
    }

    /// Whether a child box is visible inside this widget
    fn contains_rect(&self, _rect: &Rect) -> bool {
        true
    }
}

/// Outcome of the per-frame placement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// False when the container reports the widget scrolled out of view;
    /// the widget must skip hit-testing and drawing
    pub visible: bool,
    /// False when the container withholds focus from its children
    pub enabled: bool,
}

/// Base placement data embedded in every widget
#[derive(Default)]
pub struct Geometry {
    /// Own x position
    pub x: f64,
    /// Own y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Draw depth
    pub depth: f32,
    parent: Option<ParentRef>,
    bbox: Rect,
}

impl std::fmt::Debug for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geometry")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("has_parent", &self.parent().is_some())
            .finish()
    }
}

impl Geometry {
    /// Geometry with a top-left anchored box
    pub fn new(x: f64, y: f64, width: f64, height: f64, depth: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            depth,
            parent: None,
            bbox: Rect::at(x, y, width, height),
        }
    }

    /// Resize while keeping the position
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.bbox = Rect::at(self.bbox.left(), self.bbox.top(), width, height);
    }

    /// Move the own position, placing the box there directly
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.bbox = Rect::at(x, y, self.width, self.height);
    }

    /// Live container, if any
    pub fn parent(&self) -> Option<Rc<RefCell<dyn Widget>>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Detach from the container
    pub fn clear_parent(&mut self) {
        self.parent = None;
    }

    /// On-screen box as of the last [`Self::update_and_dispatch`]
    pub const fn bounding_box(&self) -> Rect {
        self.bbox
    }

    /// Recompute the on-screen box from the container placement and report
    /// whether the widget should be hit-tested and drawn this frame
    pub fn update_and_dispatch(&mut self) -> Dispatch {
        let Some(parent) = self.parent() else {
            self.bbox = Rect::at(self.x, self.y, self.width, self.height);
            return Dispatch {
                visible: true,
                enabled: true,
            };
        };
        let parent = parent.borrow();
        let (ox, oy) = (parent.placement_x(), parent.placement_y());
        let enabled = parent.focus();
        self.bbox = Rect::at(self.x + ox, self.y + oy, self.width, self.height);
        Dispatch {
            visible: parent.contains_rect(&self.bbox),
            enabled,
        }
    }

    /// Container box and depth, used to clip drawing
    pub fn clip(&self) -> Option<(Rect, f32)> {
        self.parent().map(|parent| {
            let parent = parent.borrow();
            (
                Rect::at(parent.x(), parent.y(), parent.width(), parent.height()),
                parent.depth(),
            )
        })
    }

    /// Depth to draw at, relative to the container when there is one
    pub fn draw_depth(&self) -> f32 {
        self.clip().map_or(self.depth, |(_, d)| d + self.depth)
    }

    /// Clip the canvas to the container box, returning whether a scissor was set
    pub fn begin_clip(&self, canvas: &mut dyn Canvas) -> bool {
        match self.clip() {
            Some((rect, _)) => {
                canvas.enable_scissor(rect);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        geometry: Geometry,
    }

    impl Widget for Leaf {
        fn geometry(&self) -> &Geometry {
            &self.geometry
        }
        fn geometry_mut(&mut self) -> &mut Geometry {
            &mut self.geometry
        }
    }

    struct Viewport {
        geometry: Geometry,
        offset: (f64, f64),
        focus: bool,
    }

    impl Widget for Viewport {
        fn geometry(&self) -> &Geometry {
            &self.geometry
        }
        fn geometry_mut(&mut self) -> &mut Geometry {
            &mut self.geometry
        }
        fn placement_x(&self) -> f64 {
            self.x() + self.offset.0
        }
        fn placement_y(&self) -> f64 {
            self.y() + self.offset.1
        }
        fn focus(&self) -> bool {
            self.focus
        }
        fn contains_rect(&self, rect: &Rect) -> bool {
            self.geometry.bounding_box().overlaps(rect)
        }
    }

    fn leaf(x: f64, y: f64) -> Handle<Leaf> {
        Rc::new(RefCell::new(Leaf {
            geometry: Geometry::new(x, y, 20.0, 10.0, 0.0),
        }))
    }

    #[test]
    fn test_top_level_widget_is_visible_and_enabled() {
        let item = leaf(5.0, 6.0);
        let d = item.borrow_mut().geometry_mut().update_and_dispatch();
        assert_eq!(d, Dispatch { visible: true, enabled: true });
        assert!(item.borrow().geometry().bounding_box().contains(10.0, 10.0));
    }

    #[test]
    fn test_child_follows_container_offset_and_focus() {
        let view = Rc::new(RefCell::new(Viewport {
            geometry: Geometry::new(100.0, 100.0, 50.0, 50.0, 0.0),
            offset: (0.0, -30.0),
            focus: false,
        }));
        let item = leaf(5.0, 40.0);
        item.borrow_mut().set_parent(weak_widget(&view));

        let d = item.borrow_mut().geometry_mut().update_and_dispatch();
        assert!(d.visible);
        assert!(!d.enabled);
        let bb = item.borrow().geometry().bounding_box();
        assert_eq!(bb.left(), 105.0);
        assert_eq!(bb.top(), 110.0);
    }

    #[test]
    fn test_child_scrolled_out_is_not_visible() {
        let view = Rc::new(RefCell::new(Viewport {
            geometry: Geometry::new(0.0, 0.0, 50.0, 50.0, 0.0),
            offset: (0.0, -200.0),
            focus: true,
        }));
        let item = leaf(0.0, 10.0);
        item.borrow_mut().set_parent(weak_widget(&view));
        let d = item.borrow_mut().geometry_mut().update_and_dispatch();
        assert!(!d.visible);
    }

    #[test]
    fn test_same_widget_compares_identity() {
        let a = leaf(0.0, 0.0);
        let b = leaf(0.0, 0.0);
        let weak = weak_widget(&a);
        assert!(is_same_widget(&weak, &a));
        assert!(!is_same_widget(&weak, &b));
    }

    #[test]
    fn test_dropped_container_leaves_child_top_level() {
        let item = leaf(1.0, 1.0);
        {
            let view = Rc::new(RefCell::new(Viewport {
                geometry: Geometry::new(0.0, 0.0, 50.0, 50.0, 0.0),
                offset: (0.0, -200.0),
                focus: false,
            }));
            item.borrow_mut().set_parent(weak_widget(&view));
        }
        let d = item.borrow_mut().geometry_mut().update_and_dispatch();
        assert_eq!(d, Dispatch { visible: true, enabled: true });
    }
}

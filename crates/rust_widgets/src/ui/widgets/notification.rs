//! Transient messages stacked in the top-right corner
//!
//! Each message slides toward its row and disappears once its display time
//! has passed. Expiry is checked lazily on every update against the frame's
//! clock reading; nothing is scheduled.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::ToolkitConfig;
use crate::foundation::math::{colors, is_visible, Color};
use crate::ui::bbox::Rect;
use crate::ui::frame::FrameContext;
use crate::ui::identity::Handle;
use crate::ui::rendering::{Canvas, GlyphMetrics, IconId, IconRegistry, ImageHandle};

/// One posted message
pub struct Notification {
    message: String,
    start_ms: u64,
    duration_ms: u64,
    disp_y: f64,
    border: Color,
    fill: Color,
    font: Color,
    icon: Option<ImageHandle>,
}

impl Notification {
    /// Outline colour; clear hides it
    pub fn set_border_color(&mut self, color: Color) {
        self.border = color;
    }

    /// Fill colour; clear hides it
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    /// Text colour
    pub fn set_font_color(&mut self, color: Color) {
        self.font = color;
    }

    /// Show a registered icon before the text; false for an unknown id
    pub fn set_icon(&mut self, icons: &IconRegistry, id: IconId) -> bool {
        let Some(image) = icons.get(id) else {
            return false;
        };
        self.icon = Some(image.clone());
        true
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current vertical offset from the top of the window
    pub const fn display_y(&self) -> f64 {
        self.disp_y
    }

    fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) > self.duration_ms
    }

    fn icon_width(&self, row_height: f64) -> f64 {
        self.icon.as_ref().map_or(0.0, |icon| {
            let ratio = f64::from(icon.width) / f64::from(icon.height.max(1));
            ratio * row_height + 20.0
        })
    }

    fn draw(&self, canvas: &mut dyn Canvas, window_width: f64, metrics: &GlyphMetrics, row_height: f64) {
        let icon_width = self.icon_width(row_height);
        let length = metrics.measure(&self.message) + icon_width;
        let x = window_width - (length + 130.0);
        let top = self.disp_y + 5.0;
        let rect = Rect::from_edges(x, top, window_width - 10.0, self.disp_y + 75.0);
        if is_visible(&self.fill) {
            canvas.draw_box(rect, self.fill, true, -0.96);
        }
        if is_visible(&self.border) {
            canvas.draw_box(rect, self.border, false, -0.98);
        }
        if let Some(icon) = &self.icon {
            let area = Rect::at(x + 50.0, top + 35.0 - row_height * 0.5, icon_width - 20.0, row_height);
            canvas.draw_image(icon, area, colors::WHITE, -0.98);
        }
        canvas.draw_text(&self.message, x + icon_width + 60.0, top + 48.0, self.font, -0.98);
    }
}

/// Live notifications, oldest first
pub struct NotificationSystem {
    list: Vec<Handle<Notification>>,
    metrics: GlyphMetrics,
    row_height: f64,
    pitch: f64,
    slide: f64,
    default_ms: u64,
    fill: Color,
    border: Color,
}

impl Default for NotificationSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl NotificationSystem {
    /// System using the configured slide rate and row pitch
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            list: Vec::new(),
            metrics: GlyphMetrics::new(config.metrics.glyph_advance),
            row_height: config.metrics.line_height,
            pitch: config.behaviour.notification_pitch,
            slide: config.behaviour.notification_slide,
            default_ms: config.behaviour.notification_ms,
            fill: config.theme.panel_fill,
            border: config.theme.panel_border,
        }
    }

    /// Post a message shown for `duration_ms` from `now_ms`
    pub fn notify(&mut self, message: &str, duration_ms: u64, now_ms: u64) -> Handle<Notification> {
        #[allow(clippy::cast_precision_loss)]
        let disp_y = self.list.len() as f64 * self.pitch;
        let item = Rc::new(RefCell::new(Notification {
            message: message.to_string(),
            start_ms: now_ms,
            duration_ms,
            disp_y,
            border: self.border,
            fill: self.fill,
            font: colors::WHITE,
            icon: None,
        }));
        debug!("Notification posted for {duration_ms} ms: {message}");
        self.list.push(item.clone());
        item
    }

    /// Configured display time
    pub const fn default_duration(&self) -> u64 {
        self.default_ms
    }

    /// Number of live notifications
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether nothing is showing
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Drop expired messages, slide the rest toward their rows and draw
    ///
    /// A message drawn in the frame it expires still occupies its row.
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let window_width = ctx.window_size().x;
        let mut target = 0.0;
        let now = ctx.now_ms;
        let before = self.list.len();
        for item in &self.list {
            let mut n = item.borrow_mut();
            n.disp_y += (target - n.disp_y) * self.slide;
            n.draw(canvas, window_width, &self.metrics, self.row_height);
            target += self.pitch;
        }
        self.list.retain(|n| !n.borrow().expired(now));
        if self.list.len() != before {
            debug!("{} notification(s) expired", before - self.list.len());
        }
    }
}

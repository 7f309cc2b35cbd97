//! Per-frame context handed to every widget kind

use super::input::InputProcessor;
use super::rendering::GlyphMetrics;
use crate::config::ToolkitConfig;
use crate::foundation::math::Vec2;

/// Read-only view of the frame being built
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Toolkit settings
    pub config: &'a ToolkitConfig,
    /// Accumulated input
    pub input: &'a InputProcessor,
    /// Global event flag as of this kind's turn in the frame
    pub events_enabled: bool,
    /// Monotonic clock reading for this frame
    pub now_ms: u64,
}

impl<'a> FrameContext<'a> {
    /// Snapshot for one kind's update
    pub const fn new(
        config: &'a ToolkitConfig,
        input: &'a InputProcessor,
        events_enabled: bool,
        now_ms: u64,
    ) -> Self {
        Self {
            config,
            input,
            events_enabled,
            now_ms,
        }
    }

    /// Pointer used for hit-testing ordinary widgets
    pub fn pointer(&self) -> Vec2 {
        self.input.widget_pointer()
    }

    /// Text metrics from the configuration
    pub const fn metrics(&self) -> GlyphMetrics {
        GlyphMetrics::new(self.config.metrics.glyph_advance)
    }

    /// Window size
    pub const fn window_size(&self) -> Vec2 {
        self.input.window_size()
    }
}

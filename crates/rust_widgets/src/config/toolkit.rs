//! # Toolkit Configuration
//!
//! Metrics, behaviour constants and default colours shared by every widget
//! kind. All sections have defaults so a partial file is enough.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::foundation::math::{colors, Color};

/// Layout metrics in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Horizontal advance of one narrow glyph
    pub glyph_advance: f64,
    /// Baseline offset of a caption below its box top, also the row pitch
    pub line_height: f64,
    /// Padding left and right of captions
    pub caption_padding: f64,
    /// Height of a captioned widget (button, label, check box)
    pub caption_box_height: f64,
    /// Default text box height
    pub text_box_height: f64,
    /// Baseline of the text inside a text box
    pub text_box_baseline: f64,
    /// Left inset of text inside a text box
    pub text_box_inset: f64,
    /// Width of the slide bar knob
    pub knob_width: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            glyph_advance: 21.0,
            line_height: 42.0,
            caption_padding: 20.0,
            caption_box_height: 62.0,
            text_box_height: 48.0,
            text_box_baseline: 24.0,
            text_box_inset: 12.0,
            knob_width: 20.0,
        }
    }
}

/// Interaction constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourConfig {
    /// Scroll distance of one arrow key press inside a scroll box
    pub key_scroll_step: f64,
    /// Multiplier applied to wheel deltas inside a scroll box
    pub wheel_scroll_factor: f64,
    /// Margin added past the furthest child when sizing scroll content
    pub scroll_content_margin: f64,
    /// Maximum codepoints a new text box accepts
    pub default_max_length: usize,
    /// Default notification lifetime
    pub notification_ms: u64,
    /// Fraction of the remaining distance a notification slides per frame
    pub notification_slide: f64,
    /// Vertical pitch of stacked notifications
    pub notification_pitch: f64,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            key_scroll_step: 40.0,
            wheel_scroll_factor: 6.0,
            scroll_content_margin: 20.0,
            default_max_length: 99,
            notification_ms: 3000,
            notification_slide: 0.05,
            notification_pitch: 80.0,
        }
    }
}

/// Default colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Button background without focus
    pub button_unfocus_bg: Color,
    /// Button background under the pointer
    pub button_focus_bg: Color,
    /// Button background while pressed
    pub button_press_bg: Color,
    /// Button caption without focus
    pub button_unfocus_font: Color,
    /// Button caption under the pointer
    pub button_focus_font: Color,
    /// Button caption while pressed
    pub button_press_font: Color,
    /// Button outline
    pub button_border: Color,
    /// Scroll box outline when the pointer is inside
    pub scroll_focus_border: Color,
    /// Scroll box outline otherwise
    pub scroll_border: Color,
    /// Panel fill for dialogs, sheets and notifications
    pub panel_fill: Color,
    /// Panel outline
    pub panel_border: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            button_unfocus_bg: colors::DARK_GRAY,
            button_focus_bg: colors::GRAY,
            button_press_bg: colors::WHITE,
            button_unfocus_font: colors::WHITE,
            button_focus_font: colors::WHITE,
            button_press_font: colors::DARK_GRAY,
            button_border: colors::CLEAR,
            scroll_focus_border: colors::ORANGE,
            scroll_border: colors::WHITE,
            panel_fill: colors::DARK_GRAY,
            panel_border: colors::WHITE,
        }
    }
}

/// Complete toolkit configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Layout metrics
    pub metrics: MetricsConfig,
    /// Interaction constants
    pub behaviour: BehaviourConfig,
    /// Default colours
    pub theme: ThemeConfig,
}

impl Config for ToolkitConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [behaviour]
            default_max_length = 12
            notification_ms = 500
        "#;
        let config = ToolkitConfig::from_str_with_format(text, "widgets.toml").unwrap();
        assert_eq!(config.behaviour.default_max_length, 12);
        assert_eq!(config.behaviour.notification_ms, 500);
        assert_eq!(config.metrics, MetricsConfig::default());
        assert_eq!(config.behaviour.key_scroll_step, 40.0);
    }

    #[test]
    fn test_ron_round_trip_of_theme() {
        let mut config = ToolkitConfig::default();
        config.theme.button_border = colors::RED;
        let text = ron::ser::to_string(&config).unwrap();
        let parsed = ToolkitConfig::from_str_with_format(&text, "widgets.ron").unwrap();
        assert_eq!(parsed.theme.button_border, colors::RED);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = ToolkitConfig::from_str_with_format("", "widgets.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}

use serde::{Deserialize, Serialize};

use crate::animation::AnimationCurve;
use crate::core::{Insets, LayoutParams, StackBuildConfig, ValueAxis, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Font and fill for one axis label family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTextStyle {
    pub font_size_px: f64,
    pub color: Color,
}

impl AxisTextStyle {
    #[must_use]
    pub const fn new(font_size_px: f64, color: Color) -> Self {
        Self {
            font_size_px,
            color,
        }
    }

    pub fn validate(self, what: &str) -> ChartResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{what} font size must be finite and > 0"
            )));
        }
        self.color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("{what}: {err}")))
    }
}

/// Stroke color/thickness for axis and guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub thickness_px: f64,
}

impl LineStyle {
    #[must_use]
    pub const fn new(color: Color, thickness_px: f64) -> Self {
        Self {
            color,
            thickness_px,
        }
    }

    pub fn validate(self, what: &str) -> ChartResult<()> {
        if !self.thickness_px.is_finite() || self.thickness_px < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{what} thickness must be finite and >= 0"
            )));
        }
        self.color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("{what}: {err}")))
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format. A thickness of zero
/// hides the corresponding line; `animation_duration_secs` of zero disables
/// transitions entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub value_axis: ValueAxis,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub show_zero_values: bool,
    #[serde(default = "default_axis_text_style")]
    pub main_axis_text: AxisTextStyle,
    #[serde(default = "default_axis_text_style")]
    pub cross_axis_text: AxisTextStyle,
    #[serde(default = "default_segment_label_style")]
    pub segment_label_text: AxisTextStyle,
    #[serde(default = "default_axis_line_style")]
    pub axis_line: LineStyle,
    #[serde(default = "default_guide_line_style")]
    pub guide_line: LineStyle,
    #[serde(default = "default_true")]
    pub show_main_axis_line: bool,
    #[serde(default = "default_true")]
    pub show_cross_axis_line: bool,
    #[serde(default = "default_labels_offset")]
    pub main_axis_labels_offset_px: f64,
    #[serde(default = "default_labels_offset")]
    pub cross_axis_labels_offset_px: f64,
    #[serde(default)]
    pub main_axis_width_px: Option<f64>,
    #[serde(default)]
    pub cross_axis_width_px: Option<f64>,
    #[serde(default = "default_min_tick_spacing")]
    pub min_tick_spacing_px: f64,
    #[serde(default = "default_bar_spacing")]
    pub bar_spacing_px: f64,
    #[serde(default = "default_bar_padding")]
    pub bar_padding_px: f64,
    #[serde(default = "default_padding")]
    pub padding: Insets,
    #[serde(default)]
    pub corner_radius_px: f64,
    #[serde(default = "default_tick_mark_length")]
    pub tick_mark_length_px: f64,
    #[serde(default)]
    pub animation_duration_secs: f64,
    #[serde(default)]
    pub animation_curve: AnimationCurve,
}

impl ChartEngineConfig {
    /// Creates a config with defaults for everything but the viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            value_axis: ValueAxis::default(),
            inverted: false,
            show_zero_values: false,
            main_axis_text: default_axis_text_style(),
            cross_axis_text: default_axis_text_style(),
            segment_label_text: default_segment_label_style(),
            axis_line: default_axis_line_style(),
            guide_line: default_guide_line_style(),
            show_main_axis_line: true,
            show_cross_axis_line: true,
            main_axis_labels_offset_px: default_labels_offset(),
            cross_axis_labels_offset_px: default_labels_offset(),
            main_axis_width_px: None,
            cross_axis_width_px: None,
            min_tick_spacing_px: default_min_tick_spacing(),
            bar_spacing_px: default_bar_spacing(),
            bar_padding_px: default_bar_padding(),
            padding: default_padding(),
            corner_radius_px: 0.0,
            tick_mark_length_px: default_tick_mark_length(),
            animation_duration_secs: 0.0,
            animation_curve: AnimationCurve::default(),
        }
    }

    /// Sets the measure-axis orientation.
    #[must_use]
    pub fn with_value_axis(mut self, value_axis: ValueAxis) -> Self {
        self.value_axis = value_axis;
        self
    }

    /// Flips the measure-axis direction.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Keeps zero-value segments in the geometry (labels stay suppressed).
    #[must_use]
    pub fn with_show_zero_values(mut self, show_zero_values: bool) -> Self {
        self.show_zero_values = show_zero_values;
        self
    }

    /// Sets the measure-axis tick label style.
    #[must_use]
    pub fn with_main_axis_text(mut self, style: AxisTextStyle) -> Self {
        self.main_axis_text = style;
        self
    }

    /// Sets the domain label style.
    #[must_use]
    pub fn with_cross_axis_text(mut self, style: AxisTextStyle) -> Self {
        self.cross_axis_text = style;
        self
    }

    /// Sets the in-segment label style.
    #[must_use]
    pub fn with_segment_label_text(mut self, style: AxisTextStyle) -> Self {
        self.segment_label_text = style;
        self
    }

    /// Sets axis line stroke style.
    #[must_use]
    pub fn with_axis_line(mut self, style: LineStyle) -> Self {
        self.axis_line = style;
        self
    }

    /// Sets tick guide line stroke style. Zero thickness hides guide lines.
    #[must_use]
    pub fn with_guide_line(mut self, style: LineStyle) -> Self {
        self.guide_line = style;
        self
    }

    /// Toggles the measure-axis line and its tick marks.
    #[must_use]
    pub fn with_show_main_axis_line(mut self, show: bool) -> Self {
        self.show_main_axis_line = show;
        self
    }

    /// Toggles the domain-axis baseline.
    #[must_use]
    pub fn with_show_cross_axis_line(mut self, show: bool) -> Self {
        self.show_cross_axis_line = show;
        self
    }

    /// Fixes the measure-axis label band size instead of auto-sizing it.
    #[must_use]
    pub fn with_main_axis_width_px(mut self, width_px: Option<f64>) -> Self {
        self.main_axis_width_px = width_px;
        self
    }

    /// Fixes the domain label band size instead of auto-sizing it.
    #[must_use]
    pub fn with_cross_axis_width_px(mut self, width_px: Option<f64>) -> Self {
        self.cross_axis_width_px = width_px;
        self
    }

    /// Sets the minimum pixel spacing between adjacent ticks.
    #[must_use]
    pub fn with_min_tick_spacing_px(mut self, spacing_px: f64) -> Self {
        self.min_tick_spacing_px = spacing_px;
        self
    }

    /// Sets the gap between adjacent bars.
    #[must_use]
    pub fn with_bar_spacing_px(mut self, spacing_px: f64) -> Self {
        self.bar_spacing_px = spacing_px;
        self
    }

    /// Sets the inset before the first and after the last bar.
    #[must_use]
    pub fn with_bar_padding_px(mut self, padding_px: f64) -> Self {
        self.bar_padding_px = padding_px;
        self
    }

    /// Sets the outer chart padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the segment corner radius. Non-zero radii cost per-segment
    /// rounded-path construction in the backend.
    #[must_use]
    pub fn with_corner_radius_px(mut self, radius_px: f64) -> Self {
        self.corner_radius_px = radius_px;
        self
    }

    /// Sets the transition duration; zero disables animated transitions.
    #[must_use]
    pub fn with_animation_duration_secs(mut self, duration_secs: f64) -> Self {
        self.animation_duration_secs = duration_secs;
        self
    }

    /// Sets the transition easing curve.
    #[must_use]
    pub fn with_animation_curve(mut self, curve: AnimationCurve) -> Self {
        self.animation_curve = curve;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.main_axis_text.validate("main axis text")?;
        self.cross_axis_text.validate("cross axis text")?;
        self.segment_label_text.validate("segment label text")?;
        self.axis_line.validate("axis line")?;
        self.guide_line.validate("guide line")?;

        for (name, value) in [
            (
                "main_axis_labels_offset_px",
                self.main_axis_labels_offset_px,
            ),
            (
                "cross_axis_labels_offset_px",
                self.cross_axis_labels_offset_px,
            ),
            ("bar_spacing_px", self.bar_spacing_px),
            ("bar_padding_px", self.bar_padding_px),
            ("corner_radius_px", self.corner_radius_px),
            ("tick_mark_length_px", self.tick_mark_length_px),
            ("animation_duration_secs", self.animation_duration_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.min_tick_spacing_px.is_finite() || self.min_tick_spacing_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "`min_tick_spacing_px` must be finite and > 0".to_owned(),
            ));
        }

        for (name, band) in [
            ("main_axis_width_px", self.main_axis_width_px),
            ("cross_axis_width_px", self.cross_axis_width_px),
        ] {
            if let Some(width) = band {
                if !width.is_finite() || width < 0.0 {
                    return Err(ChartError::InvalidConfig(format!(
                        "`{name}` must be finite and >= 0"
                    )));
                }
            }
        }

        if !self.padding.is_finite() {
            return Err(ChartError::InvalidConfig(
                "`padding` must be finite".to_owned(),
            ));
        }

        Ok(())
    }

    /// Distills the geometry-affecting subset for the layout engine.
    #[must_use]
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            padding: self.padding,
            bar_padding_px: self.bar_padding_px,
            bar_spacing_px: self.bar_spacing_px,
            min_tick_spacing_px: self.min_tick_spacing_px,
            main_axis_width_px: self.main_axis_width_px,
            cross_axis_width_px: self.cross_axis_width_px,
            main_axis_labels_offset_px: self.main_axis_labels_offset_px,
            cross_axis_labels_offset_px: self.cross_axis_labels_offset_px,
            main_axis_font_size_px: self.main_axis_text.font_size_px,
            cross_axis_font_size_px: self.cross_axis_text.font_size_px,
            segment_label_font_size_px: self.segment_label_text.font_size_px,
            show_zero_values: self.show_zero_values,
        }
    }

    /// Stack-building options copied from this config, so collection-level
    /// orientation, inversion and corner radius stay in sync with the chart.
    #[must_use]
    pub fn stack_build_config<D>(&self) -> StackBuildConfig<D> {
        StackBuildConfig::new(self.value_axis)
            .with_inverted(self.inverted)
            .with_corner_radius(self.corner_radius_px)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_axis_text_style() -> AxisTextStyle {
    AxisTextStyle::new(12.0, Color::rgb(0.25, 0.25, 0.25))
}

fn default_segment_label_style() -> AxisTextStyle {
    AxisTextStyle::new(11.0, Color::rgb(1.0, 1.0, 1.0))
}

fn default_axis_line_style() -> LineStyle {
    LineStyle::new(Color::rgb(0.35, 0.35, 0.35), 1.0)
}

fn default_guide_line_style() -> LineStyle {
    LineStyle::new(Color::rgb(0.88, 0.88, 0.88), 1.0)
}

fn default_true() -> bool {
    true
}

fn default_labels_offset() -> f64 {
    6.0
}

fn default_min_tick_spacing() -> f64 {
    32.0
}

fn default_bar_spacing() -> f64 {
    8.0
}

fn default_bar_padding() -> f64 {
    4.0
}

fn default_padding() -> Insets {
    Insets::uniform(8.0)
}

fn default_tick_mark_length() -> f64 {
    4.0
}

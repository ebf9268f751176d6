use serde::{Deserialize, Serialize};

use crate::core::{AxisConfig, Offsets, Size, ZoomLimits};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragDecelerationConfig, GestureBehavior};

/// Padding kept around the content area when no labels need more room.
pub const DEFAULT_MIN_OFFSET_PX: f64 = 10.0;

/// Public viewport bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewportConfig {
    pub chart_size: Size,
    #[serde(default = "default_min_offset")]
    pub min_offset: f64,
    /// Added on top of label and legend space on each side.
    #[serde(default)]
    pub extra_offsets: Offsets,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default)]
    pub drag_offset_x: f64,
    #[serde(default)]
    pub drag_offset_y: f64,
    #[serde(default)]
    pub gestures: GestureBehavior,
    #[serde(default)]
    pub drag_deceleration: DragDecelerationConfig,
    /// Keep the value at the content top-left corner and the zoom level when
    /// the chart is resized.
    #[serde(default)]
    pub keep_position_on_resize: bool,
    /// Lets `ChartViewport::auto_scale` fit the value axes to the visible X window.
    #[serde(default)]
    pub auto_scale_min_max: bool,
    #[serde(default = "AxisConfig::x_axis")]
    pub x_axis: AxisConfig,
    #[serde(default = "AxisConfig::y_axis")]
    pub left_axis: AxisConfig,
    #[serde(default = "AxisConfig::y_axis")]
    pub right_axis: AxisConfig,
}

impl ChartViewportConfig {
    /// Creates a config with default axes and gestures.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            chart_size: Size::new(width, height),
            min_offset: default_min_offset(),
            extra_offsets: Offsets::default(),
            zoom_limits: ZoomLimits::default(),
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
            gestures: GestureBehavior::default(),
            drag_deceleration: DragDecelerationConfig::default(),
            keep_position_on_resize: false,
            auto_scale_min_max: false,
            x_axis: AxisConfig::x_axis(),
            left_axis: AxisConfig::y_axis(),
            right_axis: AxisConfig::y_axis(),
        }
    }

    #[must_use]
    pub fn with_min_offset(mut self, min_offset: f64) -> Self {
        self.min_offset = min_offset;
        self
    }

    #[must_use]
    pub fn with_extra_offsets(mut self, offsets: Offsets) -> Self {
        self.extra_offsets = offsets;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, limits: ZoomLimits) -> Self {
        self.zoom_limits = limits;
        self
    }

    /// Sets how far, in pixels, the user may drag past the data edges.
    #[must_use]
    pub fn with_drag_offsets(mut self, drag_offset_x: f64, drag_offset_y: f64) -> Self {
        self.drag_offset_x = drag_offset_x;
        self.drag_offset_y = drag_offset_y;
        self
    }

    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureBehavior) -> Self {
        self.gestures = gestures;
        self
    }

    #[must_use]
    pub fn with_drag_deceleration(mut self, config: DragDecelerationConfig) -> Self {
        self.drag_deceleration = config;
        self
    }

    #[must_use]
    pub fn with_keep_position_on_resize(mut self, keep: bool) -> Self {
        self.keep_position_on_resize = keep;
        self
    }

    #[must_use]
    pub fn with_auto_scale_min_max(mut self, enabled: bool) -> Self {
        self.auto_scale_min_max = enabled;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, axis: AxisConfig) -> Self {
        self.left_axis = axis;
        self
    }

    #[must_use]
    pub fn with_right_axis(mut self, axis: AxisConfig) -> Self {
        self.right_axis = axis;
        self
    }

    /// Checks every field a `ChartViewport` is built from.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.chart_size.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.chart_size.width,
                height: self.chart_size.height,
            });
        }
        if !self.min_offset.is_finite() || self.min_offset < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min offset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.extra_offsets.is_finite() {
            return Err(ChartError::InvalidConfig(
                "extra offsets must be finite".to_owned(),
            ));
        }
        for (name, value) in [
            ("drag_offset_x", self.drag_offset_x),
            ("drag_offset_y", self.drag_offset_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        validate_zoom_limits(self.zoom_limits)?;
        validate_drag_deceleration(self.drag_deceleration)?;
        self.x_axis.validate()?;
        self.left_axis.validate()?;
        self.right_axis.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_min_offset() -> f64 {
    DEFAULT_MIN_OFFSET_PX
}

fn validate_zoom_limits(limits: ZoomLimits) -> ChartResult<ZoomLimits> {
    for (name, value) in [
        ("min_scale_x", limits.min_scale_x),
        ("min_scale_y", limits.min_scale_y),
    ] {
        if !value.is_finite() || value < 1.0 {
            return Err(ChartError::InvalidConfig(format!(
                "zoom limit {name} must be finite and >= 1"
            )));
        }
    }
    if limits.max_scale_x < limits.min_scale_x || limits.max_scale_y < limits.min_scale_y {
        return Err(ChartError::InvalidConfig(
            "zoom limit maximum must not be below its minimum".to_owned(),
        ));
    }
    Ok(limits)
}

pub(super) fn validate_drag_deceleration(
    config: DragDecelerationConfig,
) -> ChartResult<DragDecelerationConfig> {
    if !config.decay_per_second.is_finite()
        || config.decay_per_second <= 0.0
        || config.decay_per_second >= 1.0
    {
        return Err(ChartError::InvalidConfig(
            "drag deceleration decay_per_second must be finite and in (0, 1)".to_owned(),
        ));
    }
    if !config.stop_velocity_abs.is_finite() || config.stop_velocity_abs <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "drag deceleration stop_velocity_abs must be finite and > 0".to_owned(),
        ));
    }
    Ok(config)
}

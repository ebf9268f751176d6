use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ticks::{AxisTicks, TickConfig, compute_ticks};
use crate::error::{ChartError, ChartResult};

/// Smallest label count an axis accepts.
pub const MIN_LABEL_COUNT: usize = 2;

/// Largest label count an axis accepts.
pub const MAX_LABEL_COUNT: usize = 25;

/// Data interval represented by one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Span usable as a divisor: zero or non-finite spans become `1.0`.
    #[must_use]
    pub fn safe_span(self) -> f64 {
        let span = self.span();
        if span.is_finite() && span != 0.0 {
            span
        } else {
            1.0
        }
    }

    #[must_use]
    pub fn safe_min(self) -> f64 {
        if self.min.is_finite() { self.min } else { 0.0 }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min.min(self.max) && value <= self.max.max(self.min)
    }
}

/// Which vertical axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

/// Room added around the data range when an axis is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisPadding {
    /// Fixed data units below `min` and above `max`.
    Absolute { below: f64, above: f64 },
    /// Percent of the data range below `min` and above `max`.
    Percent { below: f64, above: f64 },
}

impl AxisPadding {
    #[must_use]
    pub fn none() -> Self {
        Self::Absolute {
            below: 0.0,
            above: 0.0,
        }
    }

    fn amounts(self, range: f64) -> (f64, f64) {
        match self {
            Self::Absolute { below, above } => (below, above),
            Self::Percent { below, above } => (range / 100.0 * below, range / 100.0 * above),
        }
    }

    fn is_valid(self) -> bool {
        let (below, above) = match self {
            Self::Absolute { below, above } | Self::Percent { below, above } => (below, above),
        };
        below.is_finite() && above.is_finite() && below >= 0.0 && above >= 0.0
    }
}

/// Static configuration of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub ticks: TickConfig,
    /// Overrides the calculated minimum.
    #[serde(default)]
    pub custom_min: Option<f64>,
    /// Overrides the calculated maximum.
    #[serde(default)]
    pub custom_max: Option<f64>,
    pub padding: AxisPadding,
    #[serde(default)]
    pub inverted: bool,
}

impl AxisConfig {
    /// Horizontal axis defaults: no padding.
    #[must_use]
    pub fn x_axis() -> Self {
        Self {
            enabled: true,
            ticks: TickConfig::default(),
            custom_min: None,
            custom_max: None,
            padding: AxisPadding::none(),
            inverted: false,
        }
    }

    /// Value axis defaults: 10% of the range above and below.
    #[must_use]
    pub fn y_axis() -> Self {
        Self {
            padding: AxisPadding::Percent {
                below: 10.0,
                above: 10.0,
            },
            ..Self::x_axis()
        }
    }

    #[must_use]
    pub fn with_label_count(mut self, label_count: usize, force: bool) -> Self {
        self.ticks.label_count = label_count.clamp(MIN_LABEL_COUNT, MAX_LABEL_COUNT);
        self.ticks.force_label_count = force;
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: Option<f64>) -> Self {
        self.ticks.granularity = granularity;
        self
    }

    #[must_use]
    pub fn with_centered_labels(mut self, centered: bool) -> Self {
        self.ticks.centered_labels = centered;
        self
    }

    #[must_use]
    pub fn with_custom_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.custom_min = min;
        self.custom_max = max;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: AxisPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !(MIN_LABEL_COUNT..=MAX_LABEL_COUNT).contains(&self.ticks.label_count) {
            return Err(ChartError::InvalidConfig(format!(
                "axis label count must be within {MIN_LABEL_COUNT}..={MAX_LABEL_COUNT}"
            )));
        }
        if let Some(granularity) = self.ticks.granularity {
            if !granularity.is_finite() || granularity <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "axis granularity must be finite and > 0".to_owned(),
                ));
            }
        }
        if self.custom_min.is_some_and(|v| !v.is_finite())
            || self.custom_max.is_some_and(|v| !v.is_finite())
        {
            return Err(ChartError::InvalidConfig(
                "axis custom min/max must be finite".to_owned(),
            ));
        }
        if !self.padding.is_valid() {
            return Err(ChartError::InvalidConfig(
                "axis padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_enabled() -> bool {
    true
}

/// One axis: configuration, calculated range and the latest tick stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    config: AxisConfig,
    range: AxisRange,
    ticks: AxisTicks,
}

impl Axis {
    #[must_use]
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            range: AxisRange::new(0.0, 1.0),
            ticks: AxisTicks::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> AxisConfig {
        self.config
    }

    pub fn set_config(&mut self, config: AxisConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// Absolute size of the calculated range.
    #[must_use]
    pub fn axis_range(&self) -> f64 {
        self.range.span().abs()
    }

    #[must_use]
    pub fn ticks(&self) -> &AxisTicks {
        &self.ticks
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.config.inverted
    }

    /// Derives the axis range from the data extremes.
    ///
    /// Custom bounds win over data; an empty range is widened by one unit on
    /// each side before padding is applied.
    pub fn calculate(&mut self, data_min: f64, data_max: f64) -> AxisRange {
        let mut min = self.config.custom_min.unwrap_or(data_min);
        let mut max = self.config.custom_max.unwrap_or(data_max);
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 0.0;
        }
        if (max - min).abs() == 0.0 {
            max += 1.0;
            min -= 1.0;
        }

        let (below, above) = self.config.padding.amounts((max - min).abs());
        let resolved_min = self.config.custom_min.unwrap_or(min - below);
        let resolved_max = self.config.custom_max.unwrap_or(max + above);
        self.range = AxisRange::new(resolved_min, resolved_max);
        debug!(
            data_min,
            data_max,
            min = resolved_min,
            max = resolved_max,
            "calculate axis range"
        );
        self.range
    }

    /// Installs an explicit range, bypassing data and padding.
    pub fn set_range(&mut self, range: AxisRange) {
        self.range = range;
    }

    /// Recomputes tick stops for the visible `[min, max]`.
    pub fn compute_ticks(&mut self, min: f64, max: f64) -> &AxisTicks {
        self.ticks = compute_ticks(min, max, &self.config.ticks);
        &self.ticks
    }
}

use serde::{Deserialize, Serialize};

use super::axis::MAX_LABEL_COUNT;

/// Absorbs float error in tick quotients such as `0.06 / 0.01`.
const TICK_COUNT_EPSILON: f64 = 1e-9;

/// Label placement controls for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Desired number of labels.
    pub label_count: usize,
    /// Lower bound for the interval, when set.
    #[serde(default)]
    pub granularity: Option<f64>,
    /// Emit exactly `label_count` evenly spaced ticks regardless of niceness.
    #[serde(default)]
    pub force_label_count: bool,
    /// Shift labels to the middle of each interval.
    #[serde(default)]
    pub centered_labels: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            label_count: 6,
            granularity: None,
            force_label_count: false,
            centered_labels: false,
        }
    }
}

impl TickConfig {
    #[must_use]
    pub fn with_label_count(label_count: usize) -> Self {
        Self {
            label_count,
            ..Self::default()
        }
    }
}

/// Computed tick stops for one axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTicks {
    pub entries: Vec<f64>,
    /// `entries` shifted by half an interval; empty unless labels are centered.
    pub centered_entries: Vec<f64>,
    pub interval: f64,
    /// Fraction digits needed to print `interval` without loss.
    pub decimals: usize,
}

impl AxisTicks {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Rounds `value` to a single significant digit.
#[must_use]
pub fn round_to_next_significant(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let power = 1.0 - value.abs().log10().ceil();
    // Whole powers of ten keep results such as 20.0 or 0.01 exact.
    if power >= 0.0 {
        let magnitude = 10f64.powf(power);
        (value * magnitude).round() / magnitude
    } else {
        let magnitude = 10f64.powf(-power);
        (value / magnitude).round() * magnitude
    }
}

/// Computes the rounded spacing between labels for `[min, max]`.
///
/// Returns `0.0` when no interval can be derived.
#[must_use]
pub fn compute_interval(min: f64, max: f64, label_count: usize, granularity: Option<f64>) -> f64 {
    let range = (max - min).abs();
    if label_count == 0 || !range.is_finite() || range <= 0.0 {
        return 0.0;
    }

    let raw_interval = range / label_count as f64;
    let mut interval = round_to_next_significant(raw_interval);
    if let Some(granularity) = granularity.filter(|g| g.is_finite() && *g > 0.0) {
        interval = interval.max(granularity);
    }
    if !interval.is_finite() || interval <= 0.0 {
        return 0.0;
    }

    let magnitude = round_to_next_significant(10f64.powf(interval.log10().floor()));
    // Truncated, so 5.5 or 5.9 keep their decade.
    let leading_digit = (interval / magnitude + TICK_COUNT_EPSILON).trunc();
    if leading_digit > 5.0 {
        // 0.9 or 90 read worse than the next decade.
        interval = round_to_next_significant(10.0 * magnitude);
    }

    interval
}

/// Computes tick stops and label precision for `[min, max]`.
///
/// Label counts above `MAX_LABEL_COUNT` are capped to it.
#[must_use]
pub fn compute_ticks(min: f64, max: f64, config: &TickConfig) -> AxisTicks {
    let label_count = config.label_count.min(MAX_LABEL_COUNT);
    let range = (max - min).abs();
    if label_count == 0 || !range.is_finite() || range <= 0.0 || !min.is_finite() {
        return AxisTicks::default();
    }

    let (entries, interval) = if config.force_label_count {
        forced_entries(min, range, label_count)
    } else {
        let interval = compute_interval(min, max, label_count, config.granularity);
        if interval == 0.0 {
            (vec![normalize_zero(min)], 0.0)
        } else {
            (rounded_entries(min, max, interval, config.centered_labels), interval)
        }
    };

    let centered_entries = if config.centered_labels && interval > 0.0 {
        let half = interval / 2.0;
        entries.iter().map(|entry| entry + half).collect()
    } else {
        Vec::new()
    };

    AxisTicks {
        entries,
        centered_entries,
        interval,
        decimals: decimals_for_interval(interval),
    }
}

/// Fraction digits needed to print multiples of `interval`.
#[must_use]
pub fn decimals_for_interval(interval: f64) -> usize {
    if interval.is_finite() && interval > 0.0 && interval < 1.0 {
        (-interval.log10()).ceil().max(0.0) as usize
    } else {
        0
    }
}

fn forced_entries(min: f64, range: f64, label_count: usize) -> (Vec<f64>, f64) {
    if label_count == 1 {
        return (vec![normalize_zero(min)], 0.0);
    }

    let interval = range / (label_count - 1) as f64;
    let entries = (0..label_count)
        .map(|index| normalize_zero(min + interval * index as f64))
        .collect();
    (entries, interval)
}

fn rounded_entries(min: f64, max: f64, interval: f64, centered: bool) -> Vec<f64> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let mut first = (low / interval).ceil() * interval;
    if centered {
        first -= interval;
    }
    let last = (high / interval).floor() * interval;
    if last < first {
        return Vec::new();
    }

    // Centered labels need one extra stop on each side of the visible range.
    let count = ((last - first) / interval + TICK_COUNT_EPSILON).floor() as usize
        + 1
        + usize::from(centered);
    (0..count)
        .map(|index| normalize_zero(first + interval * index as f64))
        .collect()
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

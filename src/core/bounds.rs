use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::{AxisDependency, AxisRange, Point};
use crate::error::{ChartError, ChartResult};

/// Data extremes feeding axis calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub x: AxisRange,
    pub left_y: AxisRange,
    pub right_y: AxisRange,
}

impl DataBounds {
    /// Bounds where both value axes share the same Y extremes.
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        let y = AxisRange::new(y_min, y_max);
        Self {
            x: AxisRange::new(x_min, x_max),
            left_y: y,
            right_y: y,
        }
    }

    #[must_use]
    pub fn y(&self, axis: AxisDependency) -> AxisRange {
        match axis {
            AxisDependency::Left => self.left_y,
            AxisDependency::Right => self.right_y,
        }
    }

    /// Extremes of all finite points, or `None` when there are none.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let x = envelope(points.iter().map(|point| (point.x, point.x)))?;
        let y = envelope(
            points
                .iter()
                .filter(|point| point.x.is_finite())
                .map(|point| (point.y, point.y)),
        )?;
        Some(Self::new(x.min, x.max, y.min, y.max))
    }

    /// Extremes of a candle series indexed `0..len` in slice order.
    #[must_use]
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        if candles.is_empty() {
            return None;
        }
        let y = envelope(candles.iter().map(|candle| (candle.low, candle.high)))?;
        Some(Self::new(0.0, (candles.len() - 1) as f64, y.min, y.max))
    }
}

/// Source of data extremes, queried on data changes and visible-window auto-scaling.
pub trait DataBoundsProvider {
    fn data_bounds(&self) -> Option<DataBounds>;

    /// Y extremes of the entries whose X lies within `[x_min, x_max]`.
    fn y_bounds_in(&self, x_min: f64, x_max: f64, axis: AxisDependency) -> Option<AxisRange>;
}

impl DataBoundsProvider for [Point] {
    fn data_bounds(&self) -> Option<DataBounds> {
        DataBounds::from_points(self)
    }

    fn y_bounds_in(&self, x_min: f64, x_max: f64, _axis: AxisDependency) -> Option<AxisRange> {
        envelope(
            self.iter()
                .filter(|point| point.x >= x_min && point.x <= x_max)
                .map(|point| (point.y, point.y)),
        )
    }
}

impl DataBoundsProvider for [Candle] {
    fn data_bounds(&self) -> Option<DataBounds> {
        DataBounds::from_candles(self)
    }

    fn y_bounds_in(&self, x_min: f64, x_max: f64, _axis: AxisDependency) -> Option<AxisRange> {
        envelope(
            self.iter()
                .enumerate()
                .filter(|(index, _)| {
                    let x = *index as f64;
                    x >= x_min && x <= x_max
                })
                .map(|(_, candle)| (candle.low, candle.high)),
        )
    }
}

fn envelope(values: impl Iterator<Item = (f64, f64)>) -> Option<AxisRange> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (low, high) in values {
        if low.is_finite() {
            min = min.min(low);
        }
        if high.is_finite() {
            max = max.max(high);
        }
    }
    (min.is_finite() && max.is_finite()).then(|| AxisRange::new(min, max))
}

/// One OHLC sample with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Builds a validated candle from decimal prices.
    ///
    /// Invariants:
    /// - every price fits in `f64`
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        if low > high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }
        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open: price_to_f64(open, "open")?,
            high: price_to_f64(high, "high")?,
            low: price_to_f64(low, "low")?,
            close: price_to_f64(close, "close")?,
        })
    }

    /// Parses prices delivered as decimal strings (`"123.4500"`).
    pub fn parse(
        time: DateTime<Utc>,
        open: &str,
        high: &str,
        low: &str,
        close: &str,
    ) -> ChartResult<Self> {
        Self::new(
            time,
            parse_price(open, "open")?,
            parse_price(high, "high")?,
            parse_price(low, "low")?,
            parse_price(close, "close")?,
        )
    }

    #[must_use]
    pub fn unix_seconds(&self) -> f64 {
        self.time.timestamp_millis() as f64 / 1000.0
    }

    #[must_use]
    pub fn is_increasing(&self) -> bool {
        self.close > self.open
    }
}

fn parse_price(input: &str, field_name: &str) -> ChartResult<Decimal> {
    Decimal::from_str(input.trim())
        .map_err(|e| ChartError::InvalidData(format!("{field_name} is not a decimal: {e}")))
}

fn price_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

use serde::{Deserialize, Serialize};

use crate::core::{Offsets, Orientation};

/// Where the X axis labels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XLabelPosition {
    Top,
    #[default]
    Bottom,
    BothSided,
    /// Drawn over the content area; needs no offset.
    TopInside,
    /// Drawn over the content area; needs no offset.
    BottomInside,
}

impl XLabelPosition {
    fn sides(self) -> (bool, bool) {
        match self {
            Self::Top => (true, false),
            Self::Bottom => (false, true),
            Self::BothSided => (true, true),
            Self::TopInside | Self::BottomInside => (false, false),
        }
    }
}

/// Label thicknesses measured by the host, in pixels.
///
/// A thickness of `0` means the axis draws no labels outside the content area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLabelExtents {
    pub left_axis: f64,
    pub right_axis: f64,
    /// Height of the X axis label row.
    pub x_axis: f64,
}

/// Everything `ChartLayout::compute_offsets` reads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsetInputs {
    pub labels: AxisLabelExtents,
    pub x_label_position: XLabelPosition,
    /// Space reserved by a legend outside the content area.
    pub legend: Offsets,
    pub extra: Offsets,
}

impl OffsetInputs {
    #[must_use]
    pub fn with_labels(mut self, labels: AxisLabelExtents) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_x_label_position(mut self, position: XLabelPosition) -> Self {
        self.x_label_position = position;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Offsets) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Offsets) -> Self {
        self.extra = extra;
        self
    }
}

/// Chart-type specific placement of axes around the content area.
pub trait ChartLayout {
    fn orientation(&self) -> Orientation;

    /// Paddings for `ViewportState::restrain_viewport`; every side is at least
    /// `min_offset`.
    fn compute_offsets(&self, inputs: &OffsetInputs, min_offset: f64) -> Offsets;
}

/// Bar, line and candle charts: value axes left/right, X labels top/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalLayout;

/// Horizontal bar charts drawn through the transposed pipeline.
///
/// Data Y grows downward, so the value baseline is the top edge: X labels
/// configured for `Bottom` are placed above the content and `Top` below it.
/// Value axes stay left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalLayout;

impl ChartLayout for VerticalLayout {
    fn orientation(&self) -> Orientation {
        Orientation::Vertical
    }

    fn compute_offsets(&self, inputs: &OffsetInputs, min_offset: f64) -> Offsets {
        let labels = sanitized_extents(inputs.labels);
        let (top, bottom) = inputs.x_label_position.sides();
        let axes = value_axes_beside(labels, top, bottom);
        floor_offsets(inputs.legend + axes + inputs.extra, min_offset)
    }
}

impl ChartLayout for HorizontalLayout {
    fn orientation(&self) -> Orientation {
        Orientation::Horizontal
    }

    fn compute_offsets(&self, inputs: &OffsetInputs, min_offset: f64) -> Offsets {
        let labels = sanitized_extents(inputs.labels);
        let (bottom, top) = inputs.x_label_position.sides();
        let axes = value_axes_beside(labels, top, bottom);
        floor_offsets(inputs.legend + axes + inputs.extra, min_offset)
    }
}

fn value_axes_beside(labels: AxisLabelExtents, top: bool, bottom: bool) -> Offsets {
    Offsets::new(
        labels.left_axis,
        if top { labels.x_axis } else { 0.0 },
        labels.right_axis,
        if bottom { labels.x_axis } else { 0.0 },
    )
}

fn sanitized_extents(labels: AxisLabelExtents) -> AxisLabelExtents {
    let clean = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    AxisLabelExtents {
        left_axis: clean(labels.left_axis),
        right_axis: clean(labels.right_axis),
        x_axis: clean(labels.x_axis),
    }
}

fn floor_offsets(offsets: Offsets, min_offset: f64) -> Offsets {
    let min_offset = if min_offset.is_finite() {
        min_offset.max(0.0)
    } else {
        0.0
    };
    let floor = |value: f64| {
        if value.is_finite() {
            value.max(min_offset)
        } else {
            min_offset
        }
    };
    Offsets::new(
        floor(offsets.left),
        floor(offsets.top),
        floor(offsets.right),
        floor(offsets.bottom),
    )
}

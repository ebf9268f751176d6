//! Public controller surface: configuration, layout strategies and the
//! `ChartViewport` that ties viewport state, axes and gestures together.

mod chart_viewport;
mod gesture_controller;
mod layout;
mod viewport_config;
mod viewport_jobs;

pub use chart_viewport::ChartViewport;
pub use layout::{
    AxisLabelExtents, ChartLayout, HorizontalLayout, OffsetInputs, VerticalLayout, XLabelPosition,
};
pub use viewport_config::{ChartViewportConfig, DEFAULT_MIN_OFFSET_PX};

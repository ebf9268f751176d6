//! chart-viewport: viewport, zoom/pan and coordinate core for cartesian charts.
//!
//! The crate owns the math between data values and screen pixels: the content
//! area inside the chart, a clamped zoom/pan matrix, the value-to-pixel
//! transform, axis ranges and tick stops, viewport jobs, gesture handling and
//! animation phases. Drawing is left to the host.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartViewport, ChartViewportConfig};
pub use error::{ChartError, ChartResult};

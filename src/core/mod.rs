pub mod axis;
pub mod bounds;
pub mod ticks;
pub mod transform;
pub mod types;
pub mod viewport;

pub use axis::{Axis, AxisConfig, AxisDependency, AxisPadding, AxisRange};
pub use bounds::{Candle, DataBounds, DataBoundsProvider};
pub use ticks::{AxisTicks, TickConfig};
pub use transform::{ChartTransform, Orientation};
pub use types::{Offsets, Point, Rect, Size};
pub use viewport::{ViewportState, ZoomLimits, ZoomPan};

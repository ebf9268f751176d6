use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, Offsets, ZoomPan};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportContext {
    pub offsets: Offsets,
    pub zoom_pan: ZoomPan,
    pub x_range: AxisRange,
    pub left_range: AxisRange,
    pub right_range: AxisRange,
    /// Data X interval currently inside the content area.
    pub visible_x: AxisRange,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    ChartResized { width: f64, height: f64 },
    OffsetsChanged,
    DataBoundsChanged,
    AxesComputed,
    Zoomed { scale_x: f64, scale_y: f64 },
    Translated { trans_x: f64, trans_y: f64 },
    GestureStarted(InteractionMode),
    GestureEnded,
    DecelerationStopped,
}

/// Hook interface for host code that reacts to viewport changes.
///
/// Observers read the context snapshot; they cannot mutate the viewport.
pub trait ViewportObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ViewportEvent, context: ViewportContext);
}

use tracing::{debug, trace, warn};

use crate::core::{AxisDependency, DataBoundsProvider, Point, ZoomLimits};
use crate::extensions::ViewportEvent;

use super::{ChartLayout, ChartViewport};

/// Where a moved value should land along one screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewTarget {
    /// Leave this axis untouched.
    Keep,
    /// The content area's left edge on X, its top edge on Y.
    Start,
    Center,
}

impl<L: ChartLayout> ChartViewport<L> {
    /// Zooms in by the fixed step keeping `anchor` in place.
    pub fn zoom_in(&mut self, anchor: Point) {
        let anchor = self.to_frame_point(anchor);
        self.frame.zoom_in(anchor);
        self.emit_zoomed();
    }

    pub fn zoom_out(&mut self, anchor: Point) {
        let anchor = self.to_frame_point(anchor);
        self.frame.zoom_out(anchor);
        self.emit_zoomed();
    }

    /// Zooms by relative factors keeping `anchor` (screen pixels) in place.
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, anchor: Point) {
        let (frame_x, frame_y) = self.to_frame(scale_x, scale_y);
        let anchor = self.to_frame_point(anchor);
        self.frame.zoom(frame_x, frame_y, anchor);
        self.emit_zoomed();
    }

    /// Sets absolute scale factors and centers the view on `(x, y)`.
    pub fn zoom_and_center(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        axis: AxisDependency,
    ) {
        self.set_frame_zoom(scale_x, scale_y);
        self.pan_value_to(Point::new(x, y), axis, ViewTarget::Center, ViewTarget::Center);
        self.emit_zoomed();
    }

    /// Zooms fully out and removes any pan.
    pub fn fit_screen(&mut self) {
        self.frame.fit_screen();
        self.emit_zoomed();
    }

    /// Scrolls so that `x` is the left edge of the visible window.
    pub fn move_view_to_x(&mut self, x: f64) {
        let y = self.visible_y_range(AxisDependency::Left).min;
        self.pan_value_to(
            Point::new(x, y),
            AxisDependency::Left,
            ViewTarget::Start,
            ViewTarget::Keep,
        );
    }

    /// Scrolls so that `y` is vertically centered.
    pub fn move_view_to_y(&mut self, y: f64, axis: AxisDependency) {
        let x = self.lowest_visible_x();
        self.pan_value_to(Point::new(x, y), axis, ViewTarget::Keep, ViewTarget::Center);
    }

    /// Scrolls so that `x` is the left edge and `y` is vertically centered.
    pub fn move_view_to(&mut self, x: f64, y: f64, axis: AxisDependency) {
        self.pan_value_to(Point::new(x, y), axis, ViewTarget::Start, ViewTarget::Center);
    }

    /// Scrolls so that `(x, y)` is the center of the content area.
    pub fn center_view_to(&mut self, x: f64, y: f64, axis: AxisDependency) {
        self.pan_value_to(Point::new(x, y), axis, ViewTarget::Center, ViewTarget::Center);
    }

    /// Limits how much of the X axis may be visible at once (minimum zoom).
    pub fn set_visible_x_range_maximum(&mut self, max_range: f64) {
        let Some(scale) = self.x_scale_for_range(max_range) else {
            return;
        };
        self.update_screen_limits(|limits| limits.min_scale_x = scale);
    }

    /// Limits how little of the X axis may be visible at once (maximum zoom).
    pub fn set_visible_x_range_minimum(&mut self, min_range: f64) {
        let Some(scale) = self.x_scale_for_range(min_range) else {
            return;
        };
        self.update_screen_limits(|limits| limits.max_scale_x = scale);
    }

    pub fn set_visible_x_range(&mut self, min_range: f64, max_range: f64) {
        let (Some(max_scale), Some(min_scale)) = (
            self.x_scale_for_range(min_range),
            self.x_scale_for_range(max_range),
        ) else {
            return;
        };
        self.update_screen_limits(|limits| {
            limits.min_scale_x = min_scale;
            limits.max_scale_x = max_scale;
        });
    }

    pub fn set_visible_y_range_maximum(&mut self, max_range: f64, axis: AxisDependency) {
        let Some(scale) = self.y_scale_for_range(max_range, axis) else {
            return;
        };
        self.update_screen_limits(|limits| limits.min_scale_y = scale);
    }

    pub fn set_visible_y_range_minimum(&mut self, min_range: f64, axis: AxisDependency) {
        let Some(scale) = self.y_scale_for_range(min_range, axis) else {
            return;
        };
        self.update_screen_limits(|limits| limits.max_scale_y = scale);
    }

    /// Allows panning past the data edges by the given screen pixels.
    pub fn set_drag_offsets(&mut self, drag_offset_x: f64, drag_offset_y: f64) {
        self.config.drag_offset_x = drag_offset_x;
        self.config.drag_offset_y = drag_offset_y;
        let (frame_x, frame_y) = self.to_frame(drag_offset_x, drag_offset_y);
        self.frame.set_drag_offset_x(frame_x);
        self.frame.set_drag_offset_y(frame_y);
        self.emit_translated();
    }

    /// Recalculates the value axes from the data inside the visible X window.
    ///
    /// Does nothing unless `auto_scale_min_max` is enabled. Returns `true`
    /// when the axes were recalculated.
    pub fn auto_scale<P: DataBoundsProvider + ?Sized>(&mut self, provider: &P) -> bool {
        if !self.config.auto_scale_min_max {
            return false;
        }
        let visible = self.visible_x_range();
        let fallback = self.data_bounds.or_else(|| provider.data_bounds());
        for axis in [AxisDependency::Left, AxisDependency::Right] {
            let range = provider
                .y_bounds_in(visible.min, visible.max, axis)
                .or_else(|| fallback.map(|bounds| bounds.y(axis)));
            if let Some(range) = range {
                self.axis_mut(axis).calculate(range.min, range.max);
            }
        }
        debug!(
            visible_min = visible.min,
            visible_max = visible.max,
            "auto-scale value axes"
        );
        self.calculate_offsets();
        true
    }

    fn pan_value_to(&mut self, value: Point, axis: AxisDependency, x: ViewTarget, y: ViewTarget) {
        if !value.is_finite() {
            warn!(?value, "ignoring non-finite view target");
            return;
        }
        let pixel = self.value_to_pixel(value, axis);
        let content = self.content();
        let center = content.center();
        let dx = match x {
            ViewTarget::Keep => 0.0,
            ViewTarget::Start => content.left - pixel.x,
            ViewTarget::Center => center.x - pixel.x,
        };
        let dy = match y {
            ViewTarget::Keep => 0.0,
            ViewTarget::Start => content.top - pixel.y,
            ViewTarget::Center => center.y - pixel.y,
        };
        let (frame_dx, frame_dy) = self.to_frame(dx, dy);
        self.frame.translate(frame_dx, frame_dy);
        trace!(x = value.x, y = value.y, target_x = ?x, target_y = ?y, "move view");
        self.emit_translated();
    }

    fn x_scale_for_range(&self, range: f64) -> Option<f64> {
        scale_for_range(self.x_axis.axis_range(), range)
    }

    fn y_scale_for_range(&self, range: f64, axis: AxisDependency) -> Option<f64> {
        scale_for_range(self.axis(axis).axis_range(), range)
    }

    fn update_screen_limits(&mut self, update: impl FnOnce(&mut ZoomLimits)) {
        let mut limits = self.viewport().limits();
        update(&mut limits);
        self.apply_screen_limits(limits);
        self.config.zoom_limits = self.viewport().limits();
        self.emit_zoomed();
    }

    pub(super) fn emit_zoomed(&mut self) {
        let viewport = self.viewport();
        self.emit(ViewportEvent::Zoomed {
            scale_x: viewport.scale_x(),
            scale_y: viewport.scale_y(),
        });
    }

    pub(super) fn emit_translated(&mut self) {
        let viewport = self.viewport();
        self.emit(ViewportEvent::Translated {
            trans_x: viewport.trans_x(),
            trans_y: viewport.trans_y(),
        });
    }
}

fn scale_for_range(axis_range: f64, visible_range: f64) -> Option<f64> {
    if !visible_range.is_finite() || visible_range <= 0.0 {
        warn!(visible_range, "ignoring non-positive visible range");
        return None;
    }
    Some(axis_range / visible_range)
}

use glam::{DAffine2, DMat2, DVec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Offsets, Point, Rect, Size};

/// Smallest content extent kept on either axis, in pixels.
pub const MIN_CONTENT_EXTENT_PX: f64 = 1.0;

/// Factor used by `zoom_in`.
pub const ZOOM_IN_STEP: f64 = 1.4;

/// Factor used by `zoom_out`.
pub const ZOOM_OUT_STEP: f64 = 0.7;

/// User-driven scale and scroll layered on top of the base value mapping.
///
/// The state lives in "touch space": X grows right from the content-area
/// left edge, Y is measured from the content-area bottom edge (negative
/// upward) for the default orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPan {
    pub scale_x: f64,
    pub scale_y: f64,
    pub trans_x: f64,
    pub trans_y: f64,
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomPan {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        trans_x: 0.0,
        trans_y: 0.0,
    };

    #[must_use]
    pub fn to_affine(self) -> DAffine2 {
        DAffine2::from_mat2_translation(
            DMat2::from_diagonal(DVec2::new(self.scale_x, self.scale_y)),
            DVec2::new(self.trans_x, self.trans_y),
        )
    }

    /// Reads scale and translation back from an axis-aligned affine matrix.
    #[must_use]
    pub fn from_affine(matrix: DAffine2) -> Self {
        Self {
            scale_x: matrix.matrix2.x_axis.x,
            scale_y: matrix.matrix2.y_axis.y,
            trans_x: matrix.translation.x,
            trans_y: matrix.translation.y,
        }
    }

    #[must_use]
    pub fn transposed(self) -> Self {
        Self {
            scale_x: self.scale_y,
            scale_y: self.scale_x,
            trans_x: self.trans_y,
            trans_y: self.trans_x,
        }
    }
}

/// Scale bounds per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale_x: f64,
    pub max_scale_x: f64,
    pub min_scale_y: f64,
    pub max_scale_y: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
        }
    }
}

impl ZoomLimits {
    /// Applies the same floor/ceiling rules as the individual setters.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let min_scale_x = sanitize_min_scale(self.min_scale_x);
        let min_scale_y = sanitize_min_scale(self.min_scale_y);
        Self {
            min_scale_x,
            max_scale_x: sanitize_max_scale(self.max_scale_x).max(min_scale_x),
            min_scale_y,
            max_scale_y: sanitize_max_scale(self.max_scale_y).max(min_scale_y),
        }
    }

    #[must_use]
    pub fn transposed(self) -> Self {
        Self {
            min_scale_x: self.min_scale_y,
            max_scale_x: self.max_scale_y,
            min_scale_y: self.min_scale_x,
            max_scale_y: self.max_scale_x,
        }
    }
}

/// Owns the drawable content area and the zoom/pan state of one chart view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    chart_size: Size,
    content: Rect,
    zoom_pan: ZoomPan,
    limits: ZoomLimits,
    drag_offset_x: f64,
    drag_offset_y: f64,
    y_inverted: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chart_size: Size::default(),
            content: Rect::new(0.0, 0.0, MIN_CONTENT_EXTENT_PX, MIN_CONTENT_EXTENT_PX),
            zoom_pan: ZoomPan::IDENTITY,
            limits: ZoomLimits::default(),
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
            y_inverted: false,
        }
    }

    /// Creates a viewport for a view of the given size with no padding.
    #[must_use]
    pub fn with_size(width: f64, height: f64) -> Self {
        let mut viewport = Self::new();
        viewport.set_chart_dimensions(width, height);
        viewport
    }

    /// Stores the view size and re-applies the current paddings.
    pub fn set_chart_dimensions(&mut self, width: f64, height: f64) {
        let offsets = self.offsets();
        self.chart_size = Size::new(sanitize_non_negative(width), sanitize_non_negative(height));
        self.restrain_viewport(offsets);
    }

    #[must_use]
    pub fn has_chart_dimensions(&self) -> bool {
        self.chart_size.is_valid()
    }

    /// Sets the content area from paddings measured inward from each view edge.
    ///
    /// Paddings that would leave less than `MIN_CONTENT_EXTENT_PX` on an axis are
    /// scaled down together.
    pub fn restrain_viewport(&mut self, offsets: Offsets) {
        if !offsets.is_finite() {
            warn!(?offsets, "non-finite viewport offsets replaced by zero");
        }
        let (left, right) = restrain_span(offsets.left, offsets.right, self.chart_size.width);
        let (top, bottom) = restrain_span(offsets.top, offsets.bottom, self.chart_size.height);
        self.content = Rect::new(left, top, right, bottom);
        debug!(
            left,
            top,
            right,
            bottom,
            chart_width = self.chart_size.width,
            chart_height = self.chart_size.height,
            "restrain viewport"
        );
        self.refresh(self.zoom_pan);
    }

    #[must_use]
    pub fn offsets(&self) -> Offsets {
        Offsets::new(
            self.offset_left(),
            self.offset_top(),
            self.offset_right(),
            self.offset_bottom(),
        )
    }

    #[must_use]
    pub fn offset_left(&self) -> f64 {
        self.content.left
    }

    #[must_use]
    pub fn offset_right(&self) -> f64 {
        (self.chart_size.width - self.content.right).max(0.0)
    }

    #[must_use]
    pub fn offset_top(&self) -> f64 {
        self.content.top
    }

    #[must_use]
    pub fn offset_bottom(&self) -> f64 {
        (self.chart_size.height - self.content.bottom).max(0.0)
    }

    #[must_use]
    pub fn content(&self) -> Rect {
        self.content
    }

    #[must_use]
    pub fn content_left(&self) -> f64 {
        self.content.left
    }

    #[must_use]
    pub fn content_right(&self) -> f64 {
        self.content.right
    }

    #[must_use]
    pub fn content_top(&self) -> f64 {
        self.content.top
    }

    #[must_use]
    pub fn content_bottom(&self) -> f64 {
        self.content.bottom
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.content.width()
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content.height()
    }

    #[must_use]
    pub fn content_center(&self) -> Point {
        self.content.center()
    }

    #[must_use]
    pub fn chart_size(&self) -> Size {
        self.chart_size
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.chart_size.width
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_size.height
    }

    #[must_use]
    pub fn zoom_pan(&self) -> ZoomPan {
        self.zoom_pan
    }

    /// Current zoom/pan state as an affine matrix.
    #[must_use]
    pub fn touch_matrix(&self) -> DAffine2 {
        self.zoom_pan.to_affine()
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.zoom_pan.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.zoom_pan.scale_y
    }

    #[must_use]
    pub fn trans_x(&self) -> f64 {
        self.zoom_pan.trans_x
    }

    #[must_use]
    pub fn trans_y(&self) -> f64 {
        self.zoom_pan.trans_y
    }

    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    #[must_use]
    pub fn is_y_inverted(&self) -> bool {
        self.y_inverted
    }

    /// Selects how pixel anchors and deltas on Y are read into touch space.
    pub fn set_y_inverted(&mut self, inverted: bool) {
        self.y_inverted = inverted;
    }

    /// Converts a view pixel into touch space.
    #[must_use]
    pub fn touch_point(&self, pixel: Point) -> Point {
        let x = pixel.x - self.content.left;
        let y = if self.y_inverted {
            self.content.top - pixel.y
        } else {
            pixel.y - self.content.bottom
        };
        Point::new(x, y)
    }

    /// Zooms by the given factors keeping `anchor` (view pixels) in place.
    ///
    /// Factors are first reduced to what the zoom limits still allow, so the
    /// anchor stays pinned when a limit is reached.
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, anchor: Point) -> ZoomPan {
        let (scale_x, scale_y) = self.effective_factors(scale_x, scale_y);
        let anchor = if anchor.is_finite() {
            self.touch_point(anchor)
        } else {
            warn!(?anchor, "non-finite zoom anchor replaced by content origin");
            Point::default()
        };
        let pivot = DVec2::from(anchor);
        let scaled = DAffine2::from_translation(pivot)
            * DAffine2::from_scale(DVec2::new(scale_x, scale_y))
            * DAffine2::from_translation(-pivot)
            * self.touch_matrix();
        trace!(scale_x, scale_y, anchor_x = anchor.x, anchor_y = anchor.y, "zoom");
        self.refresh(ZoomPan::from_affine(scaled))
    }

    /// Zooms about the touch-space origin (content-area left/bottom corner).
    pub fn zoom_by(&mut self, scale_x: f64, scale_y: f64) -> ZoomPan {
        let (scale_x, scale_y) = self.effective_factors(scale_x, scale_y);
        let scaled = DAffine2::from_scale(DVec2::new(scale_x, scale_y)) * self.touch_matrix();
        self.refresh(ZoomPan::from_affine(scaled))
    }

    pub fn zoom_in(&mut self, anchor: Point) -> ZoomPan {
        self.zoom(ZOOM_IN_STEP, ZOOM_IN_STEP, anchor)
    }

    pub fn zoom_out(&mut self, anchor: Point) -> ZoomPan {
        self.zoom(ZOOM_OUT_STEP, ZOOM_OUT_STEP, anchor)
    }

    /// Sets absolute scale factors, keeping the current translation.
    pub fn set_zoom(&mut self, scale_x: f64, scale_y: f64) -> ZoomPan {
        let mut next = self.zoom_pan;
        next.scale_x = sanitize_factor(scale_x);
        next.scale_y = sanitize_factor(scale_y);
        self.refresh(next)
    }

    /// Zooms fully out and removes any pan.
    pub fn fit_screen(&mut self) -> ZoomPan {
        self.refresh(ZoomPan::IDENTITY)
    }

    pub fn reset_zoom(&mut self) -> ZoomPan {
        self.fit_screen()
    }

    /// Moves the pan offset by a pixel delta.
    pub fn translate(&mut self, dx: f64, dy: f64) -> ZoomPan {
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };
        let dy = if self.y_inverted { -dy } else { dy };
        let mut next = self.zoom_pan;
        next.trans_x += dx;
        next.trans_y += dy;
        trace!(dx, dy, "translate viewport");
        self.refresh(next)
    }

    /// Pans so that `pixel` lands on the content area's top-left corner.
    pub fn center_viewport(&mut self, pixel: Point) -> ZoomPan {
        if !pixel.is_finite() {
            warn!(?pixel, "ignoring non-finite center point");
            return self.zoom_pan;
        }
        let dx = self.content.left - pixel.x;
        let dy = self.content.top - pixel.y;
        self.translate(dx, dy)
    }

    /// Installs `zoom_pan` after clamping it to the scale and pan limits.
    pub fn refresh(&mut self, zoom_pan: ZoomPan) -> ZoomPan {
        self.zoom_pan = self.limit_trans_and_scale(zoom_pan);
        self.zoom_pan
    }

    /// Relative factors that land the current scales inside the zoom limits.
    fn effective_factors(&self, scale_x: f64, scale_y: f64) -> (f64, f64) {
        let limits = self.limits;
        let current = self.zoom_pan;
        let effective = |scale: f64, factor: f64, min: f64, max: f64| {
            let target = (scale * sanitize_factor(factor)).max(min).min(max);
            let factor = target / scale;
            if factor.is_finite() && factor > 0.0 { factor } else { 1.0 }
        };
        (
            effective(current.scale_x, scale_x, limits.min_scale_x, limits.max_scale_x),
            effective(current.scale_y, scale_y, limits.min_scale_y, limits.max_scale_y),
        )
    }

    fn limit_trans_and_scale(&self, zoom_pan: ZoomPan) -> ZoomPan {
        let limits = self.limits;
        let scale_x = finite_or(zoom_pan.scale_x, limits.min_scale_x)
            .max(limits.min_scale_x)
            .min(limits.max_scale_x);
        let scale_y = finite_or(zoom_pan.scale_y, limits.min_scale_y)
            .max(limits.min_scale_y)
            .min(limits.max_scale_y);

        let width = self.content.width();
        let height = self.content.height();

        let max_trans_x = -width * (scale_x - 1.0);
        let trans_x = finite_or(zoom_pan.trans_x, 0.0)
            .max(max_trans_x - self.drag_offset_x)
            .min(self.drag_offset_x);

        let max_trans_y = height * (scale_y - 1.0);
        let trans_y = finite_or(zoom_pan.trans_y, 0.0)
            .min(max_trans_y + self.drag_offset_y)
            .max(-self.drag_offset_y);

        ZoomPan {
            scale_x,
            scale_y,
            trans_x,
            trans_y,
        }
    }

    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits.sanitized();
        self.refresh(self.zoom_pan);
    }

    /// Sets the minimum X scale; values below `1.0` are raised to `1.0`.
    pub fn set_minimum_scale_x(&mut self, scale: f64) {
        let mut limits = self.limits;
        limits.min_scale_x = scale;
        self.set_zoom_limits(limits);
    }

    /// Sets the maximum X scale; `0` or non-finite means unbounded.
    pub fn set_maximum_scale_x(&mut self, scale: f64) {
        let mut limits = self.limits;
        limits.max_scale_x = scale;
        self.set_zoom_limits(limits);
    }

    pub fn set_min_max_scale_x(&mut self, min_scale: f64, max_scale: f64) {
        let mut limits = self.limits;
        limits.min_scale_x = min_scale;
        limits.max_scale_x = max_scale;
        self.set_zoom_limits(limits);
    }

    pub fn set_minimum_scale_y(&mut self, scale: f64) {
        let mut limits = self.limits;
        limits.min_scale_y = scale;
        self.set_zoom_limits(limits);
    }

    pub fn set_maximum_scale_y(&mut self, scale: f64) {
        let mut limits = self.limits;
        limits.max_scale_y = scale;
        self.set_zoom_limits(limits);
    }

    pub fn set_min_max_scale_y(&mut self, min_scale: f64, max_scale: f64) {
        let mut limits = self.limits;
        limits.min_scale_y = min_scale;
        limits.max_scale_y = max_scale;
        self.set_zoom_limits(limits);
    }

    /// Allows panning up to `offset` pixels past the left/right data edges.
    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.drag_offset_x = sanitize_non_negative(offset);
        self.refresh(self.zoom_pan);
    }

    /// Allows panning up to `offset` pixels past the top/bottom data edges.
    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.drag_offset_y = sanitize_non_negative(offset);
        self.refresh(self.zoom_pan);
    }

    #[must_use]
    pub fn drag_offset_x(&self) -> f64 {
        self.drag_offset_x
    }

    #[must_use]
    pub fn drag_offset_y(&self) -> f64 {
        self.drag_offset_y
    }

    #[must_use]
    pub fn has_no_drag_offset(&self) -> bool {
        self.drag_offset_x <= 0.0 && self.drag_offset_y <= 0.0
    }

    #[must_use]
    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content.left <= x + 1.0
    }

    #[must_use]
    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        let x = (x * 100.0).trunc() / 100.0;
        self.content.right >= x - 1.0
    }

    #[must_use]
    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content.top <= y
    }

    #[must_use]
    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        let y = (y * 100.0).trunc() / 100.0;
        self.content.bottom >= y
    }

    #[must_use]
    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    #[must_use]
    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    #[must_use]
    pub fn is_in_bounds(&self, x: f64, y: f64) -> bool {
        self.is_in_bounds_x(x) && self.is_in_bounds_y(y)
    }

    #[must_use]
    pub fn is_fully_zoomed_out(&self) -> bool {
        self.is_fully_zoomed_out_x() && self.is_fully_zoomed_out_y()
    }

    #[must_use]
    pub fn is_fully_zoomed_out_x(&self) -> bool {
        !(self.zoom_pan.scale_x > self.limits.min_scale_x || self.limits.min_scale_x > 1.0)
    }

    #[must_use]
    pub fn is_fully_zoomed_out_y(&self) -> bool {
        !(self.zoom_pan.scale_y > self.limits.min_scale_y || self.limits.min_scale_y > 1.0)
    }

    #[must_use]
    pub fn can_zoom_out_more_x(&self) -> bool {
        self.zoom_pan.scale_x > self.limits.min_scale_x
    }

    #[must_use]
    pub fn can_zoom_in_more_x(&self) -> bool {
        self.zoom_pan.scale_x < self.limits.max_scale_x
    }

    #[must_use]
    pub fn can_zoom_out_more_y(&self) -> bool {
        self.zoom_pan.scale_y > self.limits.min_scale_y
    }

    #[must_use]
    pub fn can_zoom_in_more_y(&self) -> bool {
        self.zoom_pan.scale_y < self.limits.max_scale_y
    }

    /// Same viewport with X and Y roles exchanged.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            chart_size: Size::new(self.chart_size.height, self.chart_size.width),
            content: self.content.transposed(),
            zoom_pan: self.zoom_pan.transposed(),
            limits: self.limits.transposed(),
            drag_offset_x: self.drag_offset_y,
            drag_offset_y: self.drag_offset_x,
            y_inverted: self.y_inverted,
        }
    }
}

fn restrain_span(start_offset: f64, end_offset: f64, total: f64) -> (f64, f64) {
    let mut start_offset = sanitize_non_negative(start_offset);
    let mut end_offset = sanitize_non_negative(end_offset);
    let total = sanitize_non_negative(total).max(MIN_CONTENT_EXTENT_PX);
    let budget = total - MIN_CONTENT_EXTENT_PX;
    let used = start_offset + end_offset;
    if used > budget {
        let ratio = if used > 0.0 { budget / used } else { 0.0 };
        warn!(
            start_offset,
            end_offset, total, "viewport offsets exceed chart size; scaling down"
        );
        start_offset *= ratio;
        end_offset *= ratio;
    }
    (start_offset, total - end_offset)
}

fn sanitize_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn sanitize_factor(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!(value, "invalid zoom factor treated as 1.0");
        1.0
    }
}

fn sanitize_min_scale(value: f64) -> f64 {
    if value.is_finite() { value.max(1.0) } else { 1.0 }
}

fn sanitize_max_scale(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        f64::MAX
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

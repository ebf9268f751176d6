use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    Axis, AxisConfig, AxisDependency, AxisRange, AxisTicks, ChartTransform, DataBounds,
    DataBoundsProvider, Offsets, Orientation, Point, Rect, ViewportState, ZoomLimits,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ViewportContext, ViewportEvent, ViewportObserver};
use crate::interaction::InteractionState;

use super::{ChartLayout, ChartViewportConfig, OffsetInputs, VerticalLayout};

/// Coordinate controller for one cartesian chart.
///
/// Composes the viewport state, the X axis, the two value axes and a layout
/// strategy. Hosts measure labels, feed data bounds and gestures, and read
/// transforms and tick stops back; nothing here draws.
///
/// For `Orientation::Horizontal` layouts the viewport state is kept in the
/// transposed frame the pipeline runs in. Every public method still takes and
/// returns screen pixels.
pub struct ChartViewport<L: ChartLayout = VerticalLayout> {
    pub(super) layout: L,
    pub(super) config: ChartViewportConfig,
    pub(super) frame: ViewportState,
    pub(super) x_axis: Axis,
    pub(super) left_axis: Axis,
    pub(super) right_axis: Axis,
    pub(super) data_bounds: Option<DataBounds>,
    pub(super) offset_inputs: OffsetInputs,
    pub(super) interaction: InteractionState,
    pub(super) observers: IndexMap<String, Box<dyn ViewportObserver>>,
}

impl<L: ChartLayout + std::fmt::Debug> std::fmt::Debug for ChartViewport<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartViewport")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .field("viewport", &self.viewport())
            .field("x_axis", &self.x_axis)
            .field("left_axis", &self.left_axis)
            .field("right_axis", &self.right_axis)
            .field("data_bounds", &self.data_bounds)
            .field("observers", &self.observers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ChartViewport<VerticalLayout> {
    /// Creates a controller for bar, line and candle charts.
    pub fn vertical(config: ChartViewportConfig) -> ChartResult<Self> {
        Self::new(VerticalLayout, config)
    }
}

impl<L: ChartLayout> ChartViewport<L> {
    /// Creates a fully initialized controller from a validated config.
    pub fn new(layout: L, config: ChartViewportConfig) -> ChartResult<Self> {
        let config = config.validate()?;

        let mut interaction = InteractionState::default();
        interaction.set_deceleration_config(config.drag_deceleration);

        let mut chart = Self {
            layout,
            config,
            frame: ViewportState::new(),
            x_axis: Axis::new(config.x_axis),
            left_axis: Axis::new(config.left_axis),
            right_axis: Axis::new(config.right_axis),
            data_bounds: None,
            offset_inputs: OffsetInputs::default(),
            interaction,
            observers: IndexMap::new(),
        };
        chart.apply_screen_limits(config.zoom_limits);
        let (drag_x, drag_y) = chart.to_frame(config.drag_offset_x, config.drag_offset_y);
        chart.frame.set_drag_offset_x(drag_x);
        chart.frame.set_drag_offset_y(drag_y);
        chart.sync_inversion();
        let (width, height) = chart.to_frame(config.chart_size.width, config.chart_size.height);
        chart.frame.set_chart_dimensions(width, height);
        chart.calculate_offsets();
        debug!(
            width = config.chart_size.width,
            height = config.chart_size.height,
            orientation = ?chart.orientation(),
            "create chart viewport"
        );
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> ChartViewportConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.layout.orientation()
    }

    /// Viewport state in screen pixels.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        match self.orientation() {
            Orientation::Vertical => self.frame,
            Orientation::Horizontal => self.frame.transposed(),
        }
    }

    #[must_use]
    pub fn content(&self) -> Rect {
        self.viewport().content()
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn data_bounds(&self) -> Option<DataBounds> {
        self.data_bounds
    }

    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    #[must_use]
    pub fn axis(&self, axis: AxisDependency) -> &Axis {
        match axis {
            AxisDependency::Left => &self.left_axis,
            AxisDependency::Right => &self.right_axis,
        }
    }

    pub(super) fn axis_mut(&mut self, axis: AxisDependency) -> &mut Axis {
        match axis {
            AxisDependency::Left => &mut self.left_axis,
            AxisDependency::Right => &mut self.right_axis,
        }
    }

    #[must_use]
    pub fn x_range(&self) -> AxisRange {
        self.x_axis.range()
    }

    #[must_use]
    pub fn y_range(&self, axis: AxisDependency) -> AxisRange {
        self.axis(axis).range()
    }

    #[must_use]
    pub fn x_ticks(&self) -> &AxisTicks {
        self.x_axis.ticks()
    }

    #[must_use]
    pub fn y_ticks(&self, axis: AxisDependency) -> &AxisTicks {
        self.axis(axis).ticks()
    }

    /// Resizes the hosting view and recomputes the content area.
    ///
    /// With `keep_position_on_resize` the value at the content top-left corner
    /// and the zoom level survive the resize.
    pub fn set_chart_size(&mut self, width: f64, height: f64) {
        let kept = self
            .config
            .keep_position_on_resize
            .then(|| {
                let viewport = self.viewport();
                let corner = Point::new(viewport.content_left(), viewport.content_top());
                (
                    self.pixel_to_value(corner, AxisDependency::Left),
                    viewport.scale_x(),
                    viewport.scale_y(),
                )
            })
            .filter(|(corner, _, _)| corner.is_finite());

        let (frame_width, frame_height) = self.to_frame(width, height);
        self.frame.set_chart_dimensions(frame_width, frame_height);
        self.config.chart_size = self.viewport().chart_size();
        self.calculate_offsets();

        if let Some((corner, scale_x, scale_y)) = kept {
            self.set_frame_zoom(scale_x, scale_y);
            self.center_value_at_corner(corner, AxisDependency::Left);
        }
        debug!(width, height, kept_position = kept.is_some(), "set chart size");
        self.emit(ViewportEvent::ChartResized { width, height });
    }

    /// Replaces the host-measured label extents and legend space.
    pub fn set_offset_inputs(&mut self, inputs: OffsetInputs) {
        self.offset_inputs = inputs;
        self.calculate_offsets();
    }

    #[must_use]
    pub fn offset_inputs(&self) -> OffsetInputs {
        self.offset_inputs
    }

    /// Recomputes the content area from the layout, then re-clamps zoom/pan.
    pub fn calculate_offsets(&mut self) -> Offsets {
        let inputs = OffsetInputs {
            extra: self.offset_inputs.extra + self.config.extra_offsets,
            ..self.offset_inputs
        };
        let offsets = self.layout.compute_offsets(&inputs, self.config.min_offset);
        let frame_offsets = match self.orientation() {
            Orientation::Vertical => offsets,
            Orientation::Horizontal => offsets.transposed(),
        };
        self.frame.restrain_viewport(frame_offsets);
        debug!(?offsets, "calculate offsets");
        self.emit(ViewportEvent::OffsetsChanged);
        self.viewport().offsets()
    }

    /// Installs data extremes and recalculates all three axes and the offsets.
    pub fn set_data_bounds(&mut self, bounds: DataBounds) {
        self.data_bounds = Some(bounds);
        self.x_axis.calculate(bounds.x.min, bounds.x.max);
        self.left_axis.calculate(bounds.left_y.min, bounds.left_y.max);
        self.right_axis
            .calculate(bounds.right_y.min, bounds.right_y.max);
        debug!(?bounds, "set data bounds");
        self.calculate_offsets();
        self.emit(ViewportEvent::DataBoundsChanged);
    }

    /// Reads new bounds from `provider`.
    ///
    /// Returns `false` and keeps the previous axes when the provider has no
    /// finite data.
    pub fn notify_data_changed<P: DataBoundsProvider + ?Sized>(&mut self, provider: &P) -> bool {
        match provider.data_bounds() {
            Some(bounds) => {
                self.set_data_bounds(bounds);
                true
            }
            None => {
                debug!("data provider returned no bounds");
                false
            }
        }
    }

    /// Applies axis configs after construction and recalculates from the
    /// current data bounds. Nothing changes when any config is invalid.
    pub fn set_axis_configs(
        &mut self,
        x_axis: AxisConfig,
        left_axis: AxisConfig,
        right_axis: AxisConfig,
    ) -> ChartResult<()> {
        let x_axis = x_axis.validate()?;
        let left_axis = left_axis.validate()?;
        let right_axis = right_axis.validate()?;
        self.config.x_axis = x_axis;
        self.config.left_axis = left_axis;
        self.config.right_axis = right_axis;
        self.x_axis.set_config(x_axis);
        self.left_axis.set_config(left_axis);
        self.right_axis.set_config(right_axis);
        self.sync_inversion();
        if let Some(bounds) = self.data_bounds {
            self.set_data_bounds(bounds);
        }
        Ok(())
    }

    /// Value-to-pixel transform for the X axis paired with `axis`.
    #[must_use]
    pub fn transform(&self, axis: AxisDependency) -> ChartTransform {
        let value_axis = self.axis(axis);
        ChartTransform::new(
            self.orientation(),
            &self.viewport(),
            self.x_axis.range(),
            value_axis.range(),
            value_axis.is_inverted(),
        )
    }

    #[must_use]
    pub fn value_to_pixel(&self, value: Point, axis: AxisDependency) -> Point {
        self.transform(axis).point_value_to_pixel(value)
    }

    #[must_use]
    pub fn pixel_to_value(&self, pixel: Point, axis: AxisDependency) -> Point {
        self.transform(axis).point_pixel_to_value(pixel)
    }

    #[must_use]
    pub fn rect_value_to_pixel(&self, rect: Rect, axis: AxisDependency) -> Rect {
        self.transform(axis).rect_value_to_pixel(rect)
    }

    /// Data X interval currently inside the content area, limited to the axis range.
    #[must_use]
    pub fn visible_x_range(&self) -> AxisRange {
        let visible = self.visible_value_window(AxisDependency::Left);
        let axis = self.x_axis.range();
        let (axis_min, axis_max) = (axis.min.min(axis.max), axis.max.max(axis.min));
        AxisRange::new(
            visible.left.max(axis_min).min(axis_max),
            visible.right.min(axis_max).max(axis_min),
        )
    }

    #[must_use]
    pub fn lowest_visible_x(&self) -> f64 {
        self.visible_x_range().min
    }

    #[must_use]
    pub fn highest_visible_x(&self) -> f64 {
        self.visible_x_range().max
    }

    /// Value Y interval currently inside the content area for `axis`.
    #[must_use]
    pub fn visible_y_range(&self, axis: AxisDependency) -> AxisRange {
        let visible = self.visible_value_window(axis);
        AxisRange::new(visible.top, visible.bottom)
    }

    /// Recomputes tick stops of every enabled axis for the visible window.
    pub fn compute_axes(&mut self) {
        if self.x_axis.config().enabled {
            let visible = self.visible_x_range();
            self.x_axis.compute_ticks(visible.min, visible.max);
        }
        for dependency in [AxisDependency::Left, AxisDependency::Right] {
            if !self.axis(dependency).config().enabled {
                continue;
            }
            let visible = self.visible_y_range(dependency);
            self.axis_mut(dependency)
                .compute_ticks(visible.min, visible.max);
        }
        debug!(
            x_ticks = self.x_axis.ticks().len(),
            left_ticks = self.left_axis.ticks().len(),
            right_ticks = self.right_axis.ticks().len(),
            "compute axes"
        );
        self.emit(ViewportEvent::AxesComputed);
    }

    /// Registers an observer with a unique, non-empty id.
    pub fn add_observer(&mut self, observer: Box<dyn ViewportObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn remove_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn context(&self) -> ViewportContext {
        let viewport = self.viewport();
        ViewportContext {
            offsets: viewport.offsets(),
            zoom_pan: viewport.zoom_pan(),
            x_range: self.x_axis.range(),
            left_range: self.left_axis.range(),
            right_range: self.right_axis.range(),
            visible_x: self.visible_x_range(),
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit(&mut self, event: ViewportEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.context();
        for observer in self.observers.values_mut() {
            observer.on_event(event, context);
        }
    }

    /// Maps a screen-space pair (size, delta, factor) into the pipeline frame.
    pub(super) fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        match self.orientation() {
            Orientation::Vertical => (x, y),
            Orientation::Horizontal => (y, x),
        }
    }

    pub(super) fn to_frame_point(&self, pixel: Point) -> Point {
        let (x, y) = self.to_frame(pixel.x, pixel.y);
        Point::new(x, y)
    }

    /// Installs screen-space zoom limits on the frame.
    pub(super) fn apply_screen_limits(&mut self, limits: ZoomLimits) {
        let frame_limits = match self.orientation() {
            Orientation::Vertical => limits,
            Orientation::Horizontal => limits.transposed(),
        };
        self.frame.set_zoom_limits(frame_limits);
    }

    /// Sets absolute screen-space scale factors.
    pub(super) fn set_frame_zoom(&mut self, scale_x: f64, scale_y: f64) {
        let (frame_x, frame_y) = self.to_frame(scale_x, scale_y);
        self.frame.set_zoom(frame_x, frame_y);
    }

    /// Pans so that `value` lands on the content area's top-left corner.
    pub(super) fn center_value_at_corner(&mut self, value: Point, axis: AxisDependency) {
        let pixel = self.value_to_pixel(value, axis);
        let frame_pixel = self.to_frame_point(pixel);
        self.frame.center_viewport(frame_pixel);
    }

    /// Keeps the frame's touch-space Y convention in line with the left axis.
    pub(super) fn sync_inversion(&mut self) {
        let inverted = self.left_axis.is_inverted();
        let frame_inverted = match self.orientation() {
            Orientation::Vertical => inverted,
            Orientation::Horizontal => !inverted,
        };
        self.frame.set_y_inverted(frame_inverted);
    }

    /// Value-space rectangle covered by the content area; `left <= right` and
    /// `top <= bottom` hold numerically.
    fn visible_value_window(&self, axis: AxisDependency) -> Rect {
        let content = self.content();
        self.transform(axis).rect_pixel_to_value(content)
    }
}

use approx::assert_abs_diff_eq;
use chart_viewport::core::{
    AxisRange, ChartTransform, Offsets, Point, Rect, ViewportState, ZoomLimits, ZoomPan,
};

fn viewport() -> ViewportState {
    ViewportState::with_size(300.0, 200.0)
}

#[test]
fn zooming_below_the_minimum_clamps_to_it() {
    let mut viewport = viewport();
    viewport.zoom(0.0001, 0.0001, Point::new(150.0, 100.0));
    assert_eq!(viewport.scale_x(), 1.0);
    assert_eq!(viewport.scale_y(), 1.0);

    viewport.set_minimum_scale_x(2.0);
    viewport.zoom(0.0001, 1.0, Point::new(150.0, 100.0));
    assert_eq!(viewport.scale_x(), 2.0);
}

#[test]
fn zooming_above_the_maximum_clamps_to_it() {
    let mut viewport = viewport();
    viewport.set_zoom_limits(ZoomLimits {
        max_scale_x: 3.0,
        max_scale_y: 4.0,
        ..ZoomLimits::default()
    });
    viewport.zoom(10.0, 10.0, Point::new(150.0, 100.0));
    assert_eq!(viewport.scale_x(), 3.0);
    assert_eq!(viewport.scale_y(), 4.0);
}

#[test]
fn zoom_past_the_maximum_keeps_the_anchor_pinned() {
    let mut viewport = viewport();
    viewport.set_zoom_limits(ZoomLimits {
        max_scale_x: 4.0,
        max_scale_y: 4.0,
        ..ZoomLimits::default()
    });
    let anchor = Point::new(150.0, 100.0);
    let ranges = (AxisRange::new(0.0, 10.0), AxisRange::new(0.0, 100.0));

    viewport.zoom(10.0, 10.0, anchor);
    assert_eq!(viewport.scale_x(), 4.0);
    let value = ChartTransform::vertical(&viewport, ranges.0, ranges.1).point_pixel_to_value(anchor);
    assert_abs_diff_eq!(value.x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(value.y, 50.0, epsilon = 1e-9);

    viewport.zoom(3.0, 3.0, anchor);
    let value = ChartTransform::vertical(&viewport, ranges.0, ranges.1).point_pixel_to_value(anchor);
    assert_abs_diff_eq!(value.x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(value.y, 50.0, epsilon = 1e-9);
}

#[test]
fn zoom_keeps_the_anchor_value_in_place() {
    let mut viewport = viewport();
    let anchor = Point::new(90.0, 70.0);
    let ranges = (AxisRange::new(0.0, 10.0), AxisRange::new(0.0, 100.0));
    let before =
        ChartTransform::vertical(&viewport, ranges.0, ranges.1).point_pixel_to_value(anchor);

    viewport.zoom(2.5, 1.5, anchor);
    let after = ChartTransform::vertical(&viewport, ranges.0, ranges.1).point_pixel_to_value(anchor);

    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-9);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-9);
}

#[test]
fn fully_zoomed_out_view_cannot_be_panned() {
    let mut viewport = viewport();
    viewport.translate(50.0, -50.0);
    assert_eq!(viewport.zoom_pan(), ZoomPan::IDENTITY);
    assert!(viewport.is_fully_zoomed_out());
}

#[test]
fn drag_offsets_allow_panning_past_the_edges() {
    let mut viewport = viewport();
    viewport.set_drag_offset_x(20.0);
    viewport.translate(50.0, 0.0);
    assert_eq!(viewport.trans_x(), 20.0);

    viewport.translate(-100.0, 0.0);
    assert_eq!(viewport.trans_x(), -20.0);
    assert!(!viewport.has_no_drag_offset());
}

#[test]
fn pan_is_clamped_to_the_zoomed_content() {
    let mut viewport = viewport();
    viewport.zoom(2.0, 2.0, Point::new(0.0, 200.0));
    assert_eq!(
        viewport.zoom_pan(),
        ZoomPan {
            scale_x: 2.0,
            scale_y: 2.0,
            trans_x: 0.0,
            trans_y: 0.0,
        }
    );

    viewport.translate(-1_000.0, 1_000.0);
    assert_eq!(viewport.trans_x(), -300.0);
    assert_eq!(viewport.trans_y(), 200.0);

    viewport.fit_screen();
    assert_eq!(viewport.zoom_pan(), ZoomPan::IDENTITY);
}

#[test]
fn inverted_touch_space_flips_vertical_deltas() {
    let mut viewport = viewport();
    viewport.set_y_inverted(true);
    viewport.zoom(1.0, 2.0, Point::new(0.0, 200.0));
    assert_eq!(viewport.trans_y(), 200.0);

    viewport.translate(0.0, 10.0);
    assert_eq!(viewport.trans_y(), 190.0);
}

#[test]
fn offsets_define_the_content_area() {
    let mut viewport = viewport();
    viewport.restrain_viewport(Offsets::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(viewport.content(), Rect::new(10.0, 20.0, 270.0, 160.0));
    assert_eq!(viewport.offsets(), Offsets::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(viewport.content_center(), Point::new(140.0, 90.0));

    viewport.set_chart_dimensions(400.0, 300.0);
    assert_eq!(viewport.content(), Rect::new(10.0, 20.0, 370.0, 260.0));
}

#[test]
fn oversized_offsets_keep_a_minimal_content_area() {
    let mut viewport = viewport();
    viewport.restrain_viewport(Offsets::new(200.0, 0.0, 200.0, 0.0));
    assert!(viewport.content_width() >= 1.0 - 1e-9);
    assert!(viewport.content_left() >= 0.0);
    assert!(viewport.content_right() <= 300.0);
}

#[test]
fn bounds_checks_use_the_content_edges() {
    let mut viewport = viewport();
    viewport.restrain_viewport(Offsets::uniform(10.0));
    assert!(viewport.is_in_bounds(150.0, 100.0));
    assert!(viewport.is_in_bounds_left(9.5));
    assert!(!viewport.is_in_bounds_left(5.0));
    assert!(!viewport.is_in_bounds_right(300.0));
    assert!(!viewport.is_in_bounds_top(5.0));
    assert!(!viewport.is_in_bounds_bottom(195.0));
}

#[test]
fn zoom_queries_follow_the_limits() {
    let mut viewport = viewport();
    assert!(!viewport.can_zoom_out_more_x());
    assert!(viewport.can_zoom_in_more_x());

    viewport.zoom_in(Point::new(150.0, 100.0));
    assert!(viewport.can_zoom_out_more_x());
    assert!(!viewport.is_fully_zoomed_out());

    viewport.set_maximum_scale_y(1.2);
    assert!(!viewport.can_zoom_in_more_y());
    assert_eq!(viewport.scale_y(), 1.2);
}

use approx::assert_abs_diff_eq;
use chart_viewport::core::{
    AxisRange, ChartTransform, Offsets, Orientation, Point, Rect, ViewportState,
};

fn viewport() -> ViewportState {
    ViewportState::with_size(300.0, 200.0)
}

fn x_range() -> AxisRange {
    AxisRange::new(0.0, 10.0)
}

fn y_range() -> AxisRange {
    AxisRange::new(0.0, 100.0)
}

#[test]
fn value_center_maps_to_content_center() {
    let transform = ChartTransform::vertical(&viewport(), x_range(), y_range());
    let pixel = transform.point_value_to_pixel(Point::new(5.0, 50.0));
    assert_abs_diff_eq!(pixel.x, 150.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pixel.y, 100.0, epsilon = 1e-9);
}

#[test]
fn offsets_move_the_data_corners() {
    let mut viewport = viewport();
    viewport.restrain_viewport(Offsets::new(20.0, 10.0, 30.0, 40.0));
    let transform = ChartTransform::vertical(&viewport, x_range(), y_range());

    let origin = transform.point_value_to_pixel(Point::new(0.0, 0.0));
    assert_abs_diff_eq!(origin.x, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(origin.y, 160.0, epsilon = 1e-9);

    let far = transform.point_value_to_pixel(Point::new(10.0, 100.0));
    assert_abs_diff_eq!(far.x, 270.0, epsilon = 1e-9);
    assert_abs_diff_eq!(far.y, 10.0, epsilon = 1e-9);
}

#[test]
fn horizontal_is_vertical_with_swapped_input_and_output() {
    let mut viewport = viewport();
    viewport.restrain_viewport(Offsets::new(12.0, 8.0, 30.0, 24.0));
    viewport.zoom(2.0, 1.5, Point::new(100.0, 80.0));
    viewport.translate(-15.0, 6.0);

    for inverted in [false, true] {
        let horizontal =
            ChartTransform::new(Orientation::Horizontal, &viewport, x_range(), y_range(), inverted);
        let vertical_t = ChartTransform::new(
            Orientation::Vertical,
            &viewport.transposed(),
            y_range(),
            x_range(),
            !inverted,
        );
        for point in [
            Point::new(0.0, 0.0),
            Point::new(2.5, 75.0),
            Point::new(9.0, -12.0),
            Point::new(-3.0, 140.0),
        ] {
            let expected = vertical_t.point_value_to_pixel(point.swapped()).swapped();
            let actual = horizontal.point_value_to_pixel(point);
            assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
            assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
        }
    }
}

#[test]
fn horizontal_reads_data_y_downward() {
    let transform =
        ChartTransform::new(Orientation::Horizontal, &viewport(), x_range(), y_range(), false);

    let origin = transform.point_value_to_pixel(Point::new(0.0, 0.0));
    assert_abs_diff_eq!(origin.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(origin.y, 0.0, epsilon = 1e-9);

    let sample = transform.point_value_to_pixel(Point::new(2.0, 25.0));
    assert_abs_diff_eq!(sample.x, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(sample.y, 50.0, epsilon = 1e-9);

    let back = transform.point_pixel_to_value(sample);
    assert_abs_diff_eq!(back.x, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(back.y, 25.0, epsilon = 1e-9);
}

#[test]
fn zoom_pan_is_applied_between_value_and_offset_stages() {
    let mut viewport = viewport();
    viewport.zoom(2.0, 2.0, Point::new(0.0, 200.0));
    let transform = ChartTransform::vertical(&viewport, x_range(), y_range());

    let pixel = transform.point_value_to_pixel(Point::new(5.0, 50.0));
    assert_abs_diff_eq!(pixel.x, 300.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pixel.y, 0.0, epsilon = 1e-9);
}

#[test]
fn rect_projection_is_normalized() {
    let transform = ChartTransform::vertical(&viewport(), x_range(), y_range());
    let rect = transform.rect_value_to_pixel(Rect::new(2.0, 80.0, 4.0, 20.0));
    assert!(rect.width() >= 0.0);
    assert!(rect.height() >= 0.0);
    assert_abs_diff_eq!(rect.left, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.right, 120.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.top, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.bottom, 160.0, epsilon = 1e-9);
}

#[test]
fn degenerate_rect_stays_zero_sized() {
    let transform = ChartTransform::vertical(&viewport(), x_range(), y_range());
    let rect = transform.rect_value_to_pixel(Rect::new(3.0, 50.0, 3.0, 50.0));
    assert!(rect.left.is_finite() && rect.top.is_finite());
    assert_eq!(rect.width(), 0.0);
    assert_eq!(rect.height(), 0.0);
}

#[test]
fn phase_scales_rect_heights() {
    let transform = ChartTransform::vertical(&viewport(), x_range(), y_range());
    let rect = transform.rect_value_to_pixel_with_phase(Rect::new(0.0, 100.0, 1.0, 0.0), 0.5);
    assert_abs_diff_eq!(rect.top, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.bottom, 200.0, epsilon = 1e-9);
}

#[test]
fn batch_projection_matches_single_points() {
    let transform = ChartTransform::vertical(&viewport(), x_range(), y_range());
    let points: Vec<Point> = (0..50)
        .map(|i| Point::new(i as f64 * 0.2, (i * 7 % 100) as f64))
        .collect();

    let projected = transform.project_points(&points);
    let mut in_place = points.clone();
    transform.points_value_to_pixel(&mut in_place);

    for ((point, batch), single) in points.iter().zip(&projected).zip(&in_place) {
        let expected = transform.point_value_to_pixel(*point);
        assert_eq!(*batch, expected);
        assert_eq!(*single, expected);
    }

    transform.points_pixel_to_value(&mut in_place);
    for (point, back) in points.iter().zip(&in_place) {
        assert_abs_diff_eq!(point.x, back.x, epsilon = 1e-9);
        assert_abs_diff_eq!(point.y, back.y, epsilon = 1e-9);
    }
}

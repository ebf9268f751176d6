use chart_viewport::core::{
    AxisRange, ChartTransform, Offsets, Orientation, Point, Rect, ViewportState,
};
use proptest::prelude::*;

fn zoomed_viewport(scale_x: f64, scale_y: f64, anchor_x: f64, anchor_y: f64) -> ViewportState {
    let mut viewport = ViewportState::with_size(640.0, 480.0);
    viewport.restrain_viewport(Offsets::new(40.0, 10.0, 20.0, 30.0));
    viewport.zoom(scale_x, scale_y, Point::new(anchor_x, anchor_y));
    viewport
}

proptest! {
    #[test]
    fn value_pixel_round_trip_holds_under_zoom_and_pan(
        x_min in -1_000.0f64..1_000.0,
        x_span in 0.5f64..5_000.0,
        y_min in -1_000.0f64..1_000.0,
        y_span in 0.5f64..5_000.0,
        scale_x in 0.5f64..20.0,
        scale_y in 0.5f64..20.0,
        anchor_x in 0.0f64..640.0,
        fraction in 0.0f64..1.0,
        inverted in any::<bool>(),
        horizontal in any::<bool>()
    ) {
        let viewport = zoomed_viewport(scale_x, scale_y, anchor_x, anchor_x * 0.75);
        let orientation = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
        let transform = ChartTransform::new(
            orientation,
            &viewport,
            AxisRange::new(x_min, x_min + x_span),
            AxisRange::new(y_min, y_min + y_span),
            inverted,
        );

        let value = Point::new(x_min + x_span * fraction, y_min + y_span * (1.0 - fraction));
        let back = transform.point_pixel_to_value(transform.point_value_to_pixel(value));
        let tolerance_x = 1e-6 * x_span.max(1.0);
        let tolerance_y = 1e-6 * y_span.max(1.0);
        prop_assert!((back.x - value.x).abs() <= tolerance_x);
        prop_assert!((back.y - value.y).abs() <= tolerance_y);
    }

    #[test]
    fn projected_rects_never_have_negative_size(
        left in -50.0f64..50.0,
        width in -20.0f64..20.0,
        top in -50.0f64..50.0,
        height in -20.0f64..20.0,
        inverted in any::<bool>()
    ) {
        let viewport = zoomed_viewport(3.0, 2.0, 200.0, 200.0);
        let transform = ChartTransform::new(
            Orientation::Vertical,
            &viewport,
            AxisRange::new(-50.0, 50.0),
            AxisRange::new(-50.0, 50.0),
            inverted,
        );
        let rect = transform.rect_value_to_pixel(Rect::new(left, top, left + width, top + height));
        prop_assert!(rect.width() >= 0.0);
        prop_assert!(rect.height() >= 0.0);
        prop_assert!(rect.width().is_finite() && rect.height().is_finite());
    }

    #[test]
    fn zoom_never_leaves_the_scale_limits(
        factor_x in 0.0001f64..100.0,
        factor_y in 0.0001f64..100.0,
        max_scale in 1.0f64..50.0
    ) {
        let mut viewport = ViewportState::with_size(300.0, 200.0);
        viewport.set_maximum_scale_x(max_scale);
        viewport.zoom(factor_x, factor_y, Point::new(150.0, 100.0));

        let zoom_pan = viewport.zoom_pan();
        prop_assert!(zoom_pan.scale_x >= 1.0 && zoom_pan.scale_x <= max_scale);
        prop_assert!(zoom_pan.scale_y >= 1.0);
        prop_assert!(zoom_pan.trans_x <= 0.0);
        prop_assert!(zoom_pan.trans_x >= -300.0 * (zoom_pan.scale_x - 1.0) - 1e-9);
        prop_assert!(zoom_pan.trans_y >= 0.0);
        prop_assert!(zoom_pan.trans_y <= 200.0 * (zoom_pan.scale_y - 1.0) + 1e-9);
    }
}

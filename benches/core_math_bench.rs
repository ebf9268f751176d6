use chart_viewport::core::ticks::compute_ticks;
use chart_viewport::core::{
    AxisDependency, AxisRange, ChartTransform, DataBounds, Point, TickConfig, ViewportState,
};
use chart_viewport::{ChartViewport, ChartViewportConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn transform_for(width: f64, height: f64) -> ChartTransform {
    let mut viewport = ViewportState::with_size(width, height);
    viewport.zoom(4.0, 2.0, Point::new(width / 2.0, height / 2.0));
    ChartTransform::vertical(
        &viewport,
        AxisRange::new(0.0, 10_000.0),
        AxisRange::new(0.0, 2_500.0),
    )
}

fn bench_transform_round_trip(c: &mut Criterion) {
    let transform = transform_for(1920.0, 1080.0);

    c.bench_function("transform_round_trip", |b| {
        b.iter(|| {
            let pixel = transform.point_value_to_pixel(black_box(Point::new(4_321.123, 812.5)));
            let _ = transform.point_pixel_to_value(pixel);
        })
    });
}

fn bench_point_projection_10k(c: &mut Criterion) {
    let transform = transform_for(1920.0, 1080.0);
    let points: Vec<Point> = (0..10_000)
        .map(|i| {
            let t = f64::from(i);
            let wave = if i % 2 == 0 { 1.0 } else { -1.0 };
            Point::new(t, 100.0 + t * 0.05 + wave)
        })
        .collect();

    c.bench_function("point_projection_10k", |b| {
        b.iter(|| {
            let _ = transform.project_points(black_box(&points));
        })
    });
}

fn bench_compute_ticks(c: &mut Criterion) {
    let config = TickConfig::with_label_count(6);

    c.bench_function("compute_ticks", |b| {
        b.iter(|| {
            let _ = compute_ticks(black_box(-13.7), black_box(9_481.25), &config);
        })
    });
}

fn bench_viewport_zoom_pan(c: &mut Criterion) {
    let mut chart = ChartViewport::vertical(ChartViewportConfig::new(1920.0, 1080.0))
        .expect("valid viewport");
    chart.set_data_bounds(DataBounds::new(0.0, 10_000.0, 0.0, 2_500.0));

    c.bench_function("viewport_zoom_pan", |b| {
        b.iter(|| {
            chart.zoom(1.1, 1.1, black_box(Point::new(960.0, 540.0)));
            chart.center_view_to(black_box(5_000.0), 1_250.0, AxisDependency::Left);
            chart.compute_axes();
            chart.fit_screen();
        })
    });
}

criterion_group!(
    benches,
    bench_transform_round_trip,
    bench_point_projection_10k,
    bench_compute_ticks,
    bench_viewport_zoom_pan
);
criterion_main!(benches);

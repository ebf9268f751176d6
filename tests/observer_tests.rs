use std::cell::RefCell;
use std::rc::Rc;

use chart_viewport::core::{DataBounds, Point};
use chart_viewport::extensions::{ViewportContext, ViewportEvent, ViewportObserver};
use chart_viewport::interaction::InteractionMode;
use chart_viewport::{ChartViewport, ChartViewportConfig};

type Log = Rc<RefCell<Vec<(ViewportEvent, ViewportContext)>>>;

struct Recorder {
    id: &'static str,
    log: Log,
}

impl ViewportObserver for Recorder {
    fn id(&self) -> &str {
        self.id
    }

    fn on_event(&mut self, event: ViewportEvent, context: ViewportContext) {
        self.log.borrow_mut().push((event, context));
    }
}

fn chart_with_recorder() -> (ChartViewport, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let config = ChartViewportConfig::new(300.0, 200.0).with_min_offset(0.0);
    let mut chart = ChartViewport::vertical(config).expect("chart init");
    chart
        .add_observer(Box::new(Recorder {
            id: "recorder",
            log: Rc::clone(&log),
        }))
        .expect("register recorder");
    chart.set_data_bounds(DataBounds::new(0.0, 10.0, 0.0, 100.0));
    log.borrow_mut().clear();
    (chart, log)
}

fn events(log: &Log) -> Vec<ViewportEvent> {
    log.borrow().iter().map(|(event, _)| *event).collect()
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let (mut chart, log) = chart_with_recorder();
    assert!(
        chart
            .add_observer(Box::new(Recorder {
                id: "",
                log: Rc::clone(&log),
            }))
            .is_err()
    );
    assert!(
        chart
            .add_observer(Box::new(Recorder {
                id: "recorder",
                log: Rc::clone(&log),
            }))
            .is_err()
    );
    assert_eq!(chart.observer_count(), 1);

    assert!(chart.remove_observer("recorder"));
    assert!(!chart.remove_observer("recorder"));
    chart.zoom_in(Point::new(150.0, 100.0));
    assert!(log.borrow().is_empty());
}

#[test]
fn zoom_reports_the_new_scale() {
    let (mut chart, log) = chart_with_recorder();
    chart.zoom_in(Point::new(150.0, 100.0));

    let recorded = log.borrow();
    let (event, context) = recorded.last().copied().expect("zoom event");
    match event {
        ViewportEvent::Zoomed { scale_x, scale_y } => {
            assert!((scale_x - 1.4).abs() <= 1e-12);
            assert!((scale_y - 1.4).abs() <= 1e-12);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(context.zoom_pan, chart.viewport().zoom_pan());
    assert!(context.visible_x.max - context.visible_x.min < 10.0);
}

#[test]
fn data_and_resize_events_are_reported() {
    let (mut chart, log) = chart_with_recorder();
    chart.set_data_bounds(DataBounds::new(0.0, 20.0, -5.0, 5.0));
    assert_eq!(
        events(&log),
        vec![ViewportEvent::OffsetsChanged, ViewportEvent::DataBoundsChanged]
    );
    assert_eq!(log.borrow()[1].1.x_range.max, 20.0);

    log.borrow_mut().clear();
    chart.set_chart_size(400.0, 300.0);
    assert_eq!(
        events(&log).last().copied(),
        Some(ViewportEvent::ChartResized {
            width: 400.0,
            height: 300.0
        })
    );

    log.borrow_mut().clear();
    chart.compute_axes();
    assert_eq!(events(&log), vec![ViewportEvent::AxesComputed]);
}

#[test]
fn gesture_lifecycle_is_reported() {
    let (mut chart, log) = chart_with_recorder();
    chart.zoom_in(Point::new(150.0, 100.0));
    log.borrow_mut().clear();

    assert!(chart.pan_start());
    chart.pan_move(5.0, 0.0);
    chart.pan_end(-120.0, 0.0);
    while chart.step_deceleration(0.1) {}

    let recorded = events(&log);
    assert_eq!(
        recorded.first().copied(),
        Some(ViewportEvent::GestureStarted(InteractionMode::Panning))
    );
    assert!(matches!(recorded[1], ViewportEvent::Translated { .. }));
    assert!(recorded.contains(&ViewportEvent::GestureEnded));
    assert_eq!(recorded.last().copied(), Some(ViewportEvent::DecelerationStopped));

    let modes: Vec<InteractionMode> = log
        .borrow()
        .iter()
        .map(|(_, context)| context.interaction_mode)
        .collect();
    assert_eq!(modes[0], InteractionMode::Panning);
    assert!(modes.contains(&InteractionMode::Decelerating));
}

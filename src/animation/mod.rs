//! Tick-driven animation phases.
//!
//! `Animator` owns no clock or timer. Hosts call `tick(now)` from their own
//! frame loop and read `phase_x`/`phase_y` when drawing; renderers scale
//! values by the phases (see `ChartTransform::rect_value_to_pixel_with_phase`).

pub mod easing;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

pub use easing::Easing;

/// Notification emitted while an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnimationEvent {
    Updated { phase_x: f64, phase_y: f64 },
    Stopped,
}

/// Receives animation progress.
pub trait AnimationObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: AnimationEvent);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisAnimation {
    start: f64,
    duration: f64,
    easing: Easing,
}

impl AxisAnimation {
    fn phase_at(self, now: f64) -> f64 {
        self.easing.apply(now - self.start, self.duration)
    }

    fn end(self) -> f64 {
        self.start + self.duration
    }
}

/// Animates the X and Y phases independently from `0.0` to `1.0`.
pub struct Animator {
    phase_x: f64,
    phase_y: f64,
    x: Option<AxisAnimation>,
    y: Option<AxisAnimation>,
    observers: IndexMap<String, Box<dyn AnimationObserver>>,
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("phase_x", &self.phase_x)
            .field("phase_y", &self.phase_y)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("observers", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase_x: 1.0,
            phase_y: 1.0,
            x: None,
            y: None,
            observers: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn phase_x(&self) -> f64 {
        self.phase_x
    }

    #[must_use]
    pub fn phase_y(&self) -> f64 {
        self.phase_y
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Starts animating both axes at `now` (seconds).
    ///
    /// An axis with a non-positive or non-finite duration is not animated and
    /// keeps its current phase.
    pub fn animate(
        &mut self,
        duration_x: f64,
        duration_y: f64,
        easing_x: Easing,
        easing_y: Easing,
        now: f64,
    ) {
        self.x = axis_animation(duration_x, easing_x, now);
        self.y = axis_animation(duration_y, easing_y, now);
        debug!(duration_x, duration_y, ?easing_x, ?easing_y, now, "start animation");
        self.update_phases(now);
    }

    pub fn animate_x(&mut self, duration: f64, easing: Easing, now: f64) {
        self.animate(duration, 0.0, easing, Easing::Linear, now);
    }

    pub fn animate_y(&mut self, duration: f64, easing: Easing, now: f64) {
        self.animate(0.0, duration, Easing::Linear, easing, now);
    }

    /// Advances the phases to `now` and notifies observers.
    ///
    /// Stops the animation once both axes have reached their end time.
    /// Returns `true` while the animation is still running.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.update_phases(now);
        trace!(phase_x = self.phase_x, phase_y = self.phase_y, now, "animation tick");
        self.emit(AnimationEvent::Updated {
            phase_x: self.phase_x,
            phase_y: self.phase_y,
        });

        let end = self
            .x
            .iter()
            .chain(self.y.iter())
            .map(|axis| axis.end())
            .fold(f64::NEG_INFINITY, f64::max);
        if now >= end {
            self.stop();
            return false;
        }
        true
    }

    /// Ends the animation, snapping unfinished phases to `1.0`.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.x = None;
        self.y = None;
        if self.phase_x != 1.0 || self.phase_y != 1.0 {
            self.phase_x = 1.0;
            self.phase_y = 1.0;
            self.emit(AnimationEvent::Updated {
                phase_x: 1.0,
                phase_y: 1.0,
            });
        }
        debug!("stop animation");
        self.emit(AnimationEvent::Stopped);
    }

    /// Registers an observer with a unique, non-empty id.
    pub fn add_observer(&mut self, observer: Box<dyn AnimationObserver>) -> ChartResult<()> {
        let id = observer.id().to_owned();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "animation observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&id) {
            return Err(ChartError::InvalidData(format!(
                "animation observer with id `{id}` is already registered"
            )));
        }
        self.observers.insert(id, observer);
        Ok(())
    }

    /// Returns `true` when an observer was removed.
    pub fn remove_observer(&mut self, id: &str) -> bool {
        self.observers.shift_remove(id).is_some()
    }

    fn update_phases(&mut self, now: f64) {
        if let Some(axis) = self.x {
            self.phase_x = axis.phase_at(now);
        }
        if let Some(axis) = self.y {
            self.phase_y = axis.phase_at(now);
        }
    }

    fn emit(&mut self, event: AnimationEvent) {
        for observer in self.observers.values_mut() {
            observer.on_event(event);
        }
    }
}

fn axis_animation(duration: f64, easing: Easing, now: f64) -> Option<AxisAnimation> {
    (duration.is_finite() && duration > 0.0 && now.is_finite()).then_some(AxisAnimation {
        start: now,
        duration,
        easing,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{AnimationEvent, AnimationObserver, Animator, Easing};

    struct Recorder {
        events: Rc<RefCell<Vec<AnimationEvent>>>,
    }

    impl AnimationObserver for Recorder {
        fn id(&self) -> &str {
            "recorder"
        }

        fn on_event(&mut self, event: AnimationEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn linear_phase_follows_elapsed_time() {
        let mut animator = Animator::new();
        animator.animate_y(2.0, Easing::Linear, 10.0);
        assert_eq!(animator.phase_y(), 0.0);
        assert_eq!(animator.phase_x(), 1.0);

        assert!(animator.tick(11.0));
        assert!((animator.phase_y() - 0.5).abs() <= 1e-12);

        assert!(!animator.tick(12.5));
        assert_eq!(animator.phase_y(), 1.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn stop_snaps_phases_and_notifies() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut animator = Animator::new();
        animator
            .add_observer(Box::new(Recorder {
                events: Rc::clone(&events),
            }))
            .expect("register recorder");

        animator.animate(1.0, 1.0, Easing::InQuad, Easing::OutQuad, 0.0);
        animator.stop();

        assert_eq!(animator.phase_x(), 1.0);
        assert_eq!(animator.phase_y(), 1.0);
        assert_eq!(
            *events.borrow(),
            vec![
                AnimationEvent::Updated {
                    phase_x: 1.0,
                    phase_y: 1.0
                },
                AnimationEvent::Stopped
            ]
        );
    }

    #[test]
    fn duplicate_observer_ids_are_rejected() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut animator = Animator::new();
        let first = Recorder {
            events: Rc::clone(&events),
        };
        let second = Recorder { events };
        animator.add_observer(Box::new(first)).expect("first");
        assert!(animator.add_observer(Box::new(second)).is_err());
        assert!(animator.remove_observer("recorder"));
        assert!(!animator.remove_observer("recorder"));
    }

    #[test]
    fn zero_duration_does_not_start() {
        let mut animator = Animator::new();
        animator.animate(0.0, -1.0, Easing::Linear, Easing::Linear, 0.0);
        assert!(!animator.is_running());
        assert!(!animator.tick(1.0));
    }
}

use tracing::{trace, warn};

use crate::core::Point;
use crate::core::viewport::ZOOM_IN_STEP;
use crate::error::ChartResult;
use crate::extensions::ViewportEvent;
use crate::interaction::{
    DragDecelerationConfig, DragDecelerationState, GestureBehavior, InteractionMode,
};

use super::viewport_config::validate_drag_deceleration;
use super::{ChartLayout, ChartViewport};

impl<L: ChartLayout> ChartViewport<L> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn gestures(&self) -> GestureBehavior {
        self.config.gestures
    }

    pub fn set_gestures(&mut self, gestures: GestureBehavior) {
        self.config.gestures = gestures;
        if !gestures.drag_deceleration {
            self.stop_deceleration();
        }
    }

    #[must_use]
    pub fn drag_deceleration_config(&self) -> DragDecelerationConfig {
        self.interaction.deceleration_config()
    }

    pub fn set_drag_deceleration_config(
        &mut self,
        config: DragDecelerationConfig,
    ) -> ChartResult<()> {
        let config = validate_drag_deceleration(config)?;
        self.config.drag_deceleration = config;
        self.interaction.set_deceleration_config(config);
        Ok(())
    }

    #[must_use]
    pub fn drag_deceleration_state(&self) -> DragDecelerationState {
        self.interaction.deceleration_state()
    }

    /// Starts a drag. Returns `false` when dragging is disabled or there is
    /// nothing to scroll (fully zoomed out without drag offsets).
    pub fn pan_start(&mut self) -> bool {
        if !self.config.gestures.allows_drag() {
            return false;
        }
        let viewport = self.viewport();
        if viewport.is_fully_zoomed_out() && viewport.has_no_drag_offset() {
            return false;
        }
        self.interaction.on_pan_start();
        self.emit(ViewportEvent::GestureStarted(InteractionMode::Panning));
        true
    }

    /// Moves the content by a finger delta in screen pixels.
    pub fn pan_move(&mut self, dx: f64, dy: f64) -> bool {
        if self.interaction.mode() != InteractionMode::Panning {
            return false;
        }
        let (dx, dy) = self.config.gestures.mask_drag(dx, dy);
        self.translate_screen(dx, dy);
        trace!(dx, dy, "pan move");
        self.emit_translated();
        true
    }

    /// Ends a drag; the release velocity (pixels per second) seeds deceleration.
    pub fn pan_end(&mut self, velocity_x: f64, velocity_y: f64) {
        if self.interaction.mode() != InteractionMode::Panning {
            return;
        }
        self.interaction.on_gesture_end();
        let (velocity_x, velocity_y) = self.config.gestures.mask_drag(velocity_x, velocity_y);
        if self.config.gestures.drag_deceleration
            && velocity_x.is_finite()
            && velocity_y.is_finite()
            && (velocity_x != 0.0 || velocity_y != 0.0)
        {
            self.interaction.start_deceleration(velocity_x, velocity_y);
        }
        self.emit(ViewportEvent::GestureEnded);
    }

    /// Advances drag deceleration by `delta_seconds`.
    ///
    /// Returns `true` while deceleration is still running.
    pub fn step_deceleration(&mut self, delta_seconds: f64) -> bool {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return self.interaction.deceleration_state().active;
        }
        let Some((dx, dy)) = self.interaction.step_deceleration(delta_seconds) else {
            return false;
        };
        self.translate_screen(dx, dy);
        trace!(dx, dy, delta_seconds, "deceleration step");
        self.emit_translated();

        if self.interaction.deceleration_state().active {
            return true;
        }
        self.emit(ViewportEvent::DecelerationStopped);
        false
    }

    pub fn stop_deceleration(&mut self) {
        if self.interaction.deceleration_state().active {
            self.interaction.stop_deceleration();
            self.emit(ViewportEvent::DecelerationStopped);
        }
    }

    pub fn pinch_start(&mut self) -> bool {
        if !self.config.gestures.allows_scale() {
            return false;
        }
        self.interaction.on_pinch_start();
        self.emit(ViewportEvent::GestureStarted(InteractionMode::Pinching));
        true
    }

    /// Applies one pinch step of relative factors about `anchor`.
    ///
    /// Without `pinch_zoom` both axes use whichever factor moves further from
    /// `1.0`. Returns `false` when nothing could be zoomed.
    pub fn pinch(&mut self, scale_x: f64, scale_y: f64, anchor: Point) -> bool {
        let gestures = self.config.gestures;
        if !gestures.allows_scale() {
            return false;
        }
        if !is_valid_factor(scale_x) || !is_valid_factor(scale_y) {
            warn!(scale_x, scale_y, "ignoring invalid pinch factors");
            return false;
        }

        let (scale_x, scale_y) = if gestures.pinch_zoom {
            (scale_x, scale_y)
        } else {
            let dominant = dominant_factor(scale_x, scale_y);
            (dominant, dominant)
        };

        let viewport = self.viewport();
        let can_zoom_x = if scale_x < 1.0 {
            viewport.can_zoom_out_more_x()
        } else {
            viewport.can_zoom_in_more_x()
        };
        let can_zoom_y = if scale_y < 1.0 {
            viewport.can_zoom_out_more_y()
        } else {
            viewport.can_zoom_in_more_y()
        };
        let scale_x = if gestures.scale_x && can_zoom_x { scale_x } else { 1.0 };
        let scale_y = if gestures.scale_y && can_zoom_y { scale_y } else { 1.0 };
        if scale_x == 1.0 && scale_y == 1.0 {
            return false;
        }

        trace!(scale_x, scale_y, "pinch");
        self.zoom(scale_x, scale_y, anchor);
        true
    }

    pub fn pinch_end(&mut self) {
        if self.interaction.mode() == InteractionMode::Pinching {
            self.interaction.on_gesture_end();
            self.emit(ViewportEvent::GestureEnded);
        }
    }

    /// Zooms in one step about `anchor` on every scalable axis.
    pub fn double_tap(&mut self, anchor: Point) -> bool {
        let gestures = self.config.gestures;
        if !gestures.double_tap_to_zoom || !gestures.allows_scale() {
            return false;
        }
        let scale_x = if gestures.scale_x { ZOOM_IN_STEP } else { 1.0 };
        let scale_y = if gestures.scale_y { ZOOM_IN_STEP } else { 1.0 };
        self.zoom(scale_x, scale_y, anchor);
        true
    }

    fn translate_screen(&mut self, dx: f64, dy: f64) {
        let (frame_dx, frame_dy) = self.to_frame(dx, dy);
        self.frame.translate(frame_dx, frame_dy);
    }
}

fn is_valid_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}

/// The factor with the larger zoom effect in either direction.
fn dominant_factor(a: f64, b: f64) -> f64 {
    if a.ln().abs() >= b.ln().abs() { a } else { b }
}

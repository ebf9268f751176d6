use serde::{Deserialize, Serialize};

/// Per-frame friction applied to a released drag at the reference frame rate.
const DRAG_FRICTION_PER_FRAME: f64 = 0.9;

/// Frame rate the per-frame friction is expressed at.
const REFERENCE_FRAMES_PER_SECOND: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Pinching,
    /// A released drag is still gliding.
    Decelerating,
}

/// Which gestures may change the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureBehavior {
    pub drag_x: bool,
    pub drag_y: bool,
    pub scale_x: bool,
    pub scale_y: bool,
    /// Scale each axis by its own pinch factor; otherwise both use the dominant one.
    #[serde(default)]
    pub pinch_zoom: bool,
    #[serde(default = "default_true")]
    pub double_tap_to_zoom: bool,
    #[serde(default = "default_true")]
    pub drag_deceleration: bool,
}

impl Default for GestureBehavior {
    fn default() -> Self {
        Self {
            drag_x: true,
            drag_y: true,
            scale_x: true,
            scale_y: true,
            pinch_zoom: false,
            double_tap_to_zoom: true,
            drag_deceleration: true,
        }
    }
}

impl GestureBehavior {
    #[must_use]
    pub fn allows_drag(self) -> bool {
        self.drag_x || self.drag_y
    }

    #[must_use]
    pub fn allows_scale(self) -> bool {
        self.scale_x || self.scale_y
    }

    /// Zeroes the components of a pixel delta on disabled drag axes.
    #[must_use]
    pub fn mask_drag(self, dx: f64, dy: f64) -> (f64, f64) {
        (
            if self.drag_x { dx } else { 0.0 },
            if self.drag_y { dy } else { 0.0 },
        )
    }
}

fn default_true() -> bool {
    true
}

/// Tuning for deterministic drag deceleration stepping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragDecelerationConfig {
    /// Multiplicative velocity decay per second.
    pub decay_per_second: f64,
    /// Deceleration stops when both velocity components drop below this
    /// threshold, in pixels per second.
    pub stop_velocity_abs: f64,
}

impl Default for DragDecelerationConfig {
    fn default() -> Self {
        Self {
            decay_per_second: DRAG_FRICTION_PER_FRAME.powi(REFERENCE_FRAMES_PER_SECOND),
            stop_velocity_abs: 0.001,
        }
    }
}

/// Public drag deceleration runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragDecelerationState {
    pub active: bool,
    pub velocity_x: f64,
    pub velocity_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    deceleration_config: DragDecelerationConfig,
    deceleration: DragDecelerationState,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn deceleration_config(self) -> DragDecelerationConfig {
        self.deceleration_config
    }

    pub fn set_deceleration_config(&mut self, config: DragDecelerationConfig) {
        self.deceleration_config = config;
    }

    #[must_use]
    pub fn deceleration_state(self) -> DragDecelerationState {
        self.deceleration
    }

    pub fn start_deceleration(&mut self, velocity_x: f64, velocity_y: f64) {
        self.deceleration = DragDecelerationState {
            active: true,
            velocity_x,
            velocity_y,
        };
        self.mode = InteractionMode::Decelerating;
    }

    pub fn stop_deceleration(&mut self) {
        self.deceleration = DragDecelerationState::default();
        if self.mode == InteractionMode::Decelerating {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Advances deceleration and returns the pixel displacement to apply.
    ///
    /// Returns `None` when deceleration is not active.
    pub fn step_deceleration(&mut self, delta_seconds: f64) -> Option<(f64, f64)> {
        if !self.deceleration.active {
            return None;
        }

        let dx = self.deceleration.velocity_x * delta_seconds;
        let dy = self.deceleration.velocity_y * delta_seconds;
        let decay = self.deceleration_config.decay_per_second.powf(delta_seconds);
        self.deceleration.velocity_x *= decay;
        self.deceleration.velocity_y *= decay;

        let stop = self.deceleration_config.stop_velocity_abs;
        if self.deceleration.velocity_x.abs() < stop && self.deceleration.velocity_y.abs() < stop {
            self.stop_deceleration();
        }

        Some((dx, dy))
    }

    pub fn on_pan_start(&mut self) {
        self.deceleration = DragDecelerationState::default();
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pinch_start(&mut self) {
        self.deceleration = DragDecelerationState::default();
        self.mode = InteractionMode::Pinching;
    }

    pub fn on_gesture_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}

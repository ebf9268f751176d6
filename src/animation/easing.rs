use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

/// Overshoot used by the `Back` family.
const BACK_OVERSHOOT: f64 = 1.70158;

/// Extra overshoot factor of `InOutBack`.
const BACK_IN_OUT_FACTOR: f64 = 1.525;

/// Fraction of the duration used as the elastic period.
const ELASTIC_PERIOD: f64 = 0.3;

/// Easing curve mapping elapsed time to an animation phase.
///
/// Phases start at `0.0` and end at `1.0`; `Elastic` and `Back` overshoot in
/// between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Easing {
    pub const ALL: [Self; 31] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InElastic,
        Self::OutElastic,
        Self::InOutElastic,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
    ];

    /// Phase reached after `elapsed` of `duration`.
    ///
    /// `elapsed` is clamped to `[0, duration]`. A non-positive or non-finite
    /// duration yields the end phase `1.0`.
    #[must_use]
    pub fn apply(self, elapsed: f64, duration: f64) -> f64 {
        if !duration.is_finite() || duration <= 0.0 {
            return 1.0;
        }
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, duration)
        } else {
            duration
        };
        self.eval(elapsed, duration)
    }

    fn eval(self, elapsed: f64, duration: f64) -> f64 {
        let t = elapsed / duration;
        // Progress over each half of the duration, in `[0, 2]`.
        let h = elapsed / (duration / 2.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => -t * (t - 2.0),
            Self::InOutQuad => {
                if h < 1.0 {
                    0.5 * h * h
                } else {
                    -0.5 * ((h - 1.0) * (h - 3.0) - 1.0)
                }
            }
            Self::InCubic => t.powi(3),
            Self::OutCubic => (t - 1.0).powi(3) + 1.0,
            Self::InOutCubic => {
                if h < 1.0 {
                    0.5 * h.powi(3)
                } else {
                    0.5 * ((h - 2.0).powi(3) + 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => -((t - 1.0).powi(4) - 1.0),
            Self::InOutQuart => {
                if h < 1.0 {
                    0.5 * h.powi(4)
                } else {
                    -0.5 * ((h - 2.0).powi(4) - 2.0)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => (t - 1.0).powi(5) + 1.0,
            Self::InOutQuint => {
                if h < 1.0 {
                    0.5 * h.powi(5)
                } else {
                    0.5 * ((h - 2.0).powi(5) + 2.0)
                }
            }
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Self::InExpo => {
                if elapsed == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::OutExpo => {
                if elapsed == duration {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if elapsed == 0.0 {
                    0.0
                } else if elapsed == duration {
                    1.0
                } else if h < 1.0 {
                    0.5 * 2f64.powf(10.0 * (h - 1.0))
                } else {
                    0.5 * (2.0 - 2f64.powf(-10.0 * (h - 1.0)))
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Self::InOutCirc => {
                if h < 1.0 {
                    -0.5 * ((1.0 - h * h).max(0.0).sqrt() - 1.0)
                } else {
                    0.5 * ((1.0 - (h - 2.0).powi(2)).max(0.0).sqrt() + 1.0)
                }
            }
            Self::InElastic => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let period = duration * ELASTIC_PERIOD;
                let shift = period / 4.0;
                let p = t - 1.0;
                -(2f64.powf(10.0 * p) * ((p * duration - shift) * TAU / period).sin())
            }
            Self::OutElastic => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let period = duration * ELASTIC_PERIOD;
                let shift = period / 4.0;
                2f64.powf(-10.0 * t) * ((t * duration - shift) * TAU / period).sin() + 1.0
            }
            Self::InOutElastic => {
                if h <= 0.0 {
                    return 0.0;
                }
                if h >= 2.0 {
                    return 1.0;
                }
                let period = duration * ELASTIC_PERIOD * 1.5;
                let shift = period / 4.0;
                let p = h - 1.0;
                let wave = ((p * duration - shift) * TAU / period).sin();
                if h < 1.0 {
                    -0.5 * 2f64.powf(10.0 * p) * wave
                } else {
                    0.5 * 2f64.powf(-10.0 * p) * wave + 1.0
                }
            }
            Self::InBack => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
            Self::OutBack => {
                let p = t - 1.0;
                p * p * ((BACK_OVERSHOOT + 1.0) * p + BACK_OVERSHOOT) + 1.0
            }
            Self::InOutBack => {
                let s = BACK_OVERSHOOT * BACK_IN_OUT_FACTOR;
                if h < 1.0 {
                    0.5 * (h * h * ((s + 1.0) * h - s))
                } else {
                    let p = h - 2.0;
                    0.5 * (p * p * ((s + 1.0) * p + s) + 2.0)
                }
            }
            Self::InBounce => 1.0 - bounce_out(1.0 - t),
            Self::OutBounce => bounce_out(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    0.5 * (1.0 - bounce_out(1.0 - 2.0 * t))
                } else {
                    0.5 * bounce_out(2.0 * t - 1.0) + 0.5
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const K: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let p = t - 1.5 / D;
        K * p * p + 0.75
    } else if t < 2.5 / D {
        let p = t - 2.25 / D;
        K * p * p + 0.9375
    } else {
        let p = t - 2.625 / D;
        K * p * p + 0.984_375
    }
}

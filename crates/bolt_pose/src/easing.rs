//! Easing curves for one-shot transitions

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized tween time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// No easing
    Linear,
    /// Slow in, slow out
    #[default]
    QuadraticInOut,
    /// Fast out, slowing toward the end (recoil kicks)
    QuadraticOut,
}

impl Easing {
    /// Map normalized time `t` in [0, 1] through the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::QuadraticOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

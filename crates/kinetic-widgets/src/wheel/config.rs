#![forbid(unsafe_code)]

//! Wheel configuration.

use std::time::Duration;

use kinetic_core::accumulator::AccumulatorConfig;
use kinetic_core::animation::AnimationConfig;
use kinetic_core::gesture::GestureConfig;

use crate::index_space::DEFAULT_REPEATS;

/// Tuning for a single wheel column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelConfig {
    /// Number of option tiles in the virtual strip (odd, at least 5; default: 7).
    pub repeats: usize,
    /// Quiet time after the last input before the wheel settles (default: 120ms).
    pub idle_settle: Duration,
    /// Rows moved by PageUp/PageDown (default: 5).
    pub page_step: usize,
    /// Delta unit conversion.
    pub gesture: GestureConfig,
    /// Per-frame row accumulation.
    pub accumulator: AccumulatorConfig,
    /// Snap, nudge and bounce transitions.
    pub animation: AnimationConfig,
    /// Start with reduced motion in effect.
    pub reduced_motion: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            repeats: DEFAULT_REPEATS,
            idle_settle: Duration::from_millis(120),
            page_step: 5,
            gesture: GestureConfig::default(),
            accumulator: AccumulatorConfig::default(),
            animation: AnimationConfig::default(),
            reduced_motion: false,
        }
    }
}

impl WheelConfig {
    /// Set the tile count. Validated when the wheel is built.
    #[must_use]
    pub fn repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the idle window before settling.
    #[must_use]
    pub fn idle_settle(mut self, idle: Duration) -> Self {
        self.idle_settle = idle;
        self
    }

    /// Set the PageUp/PageDown step.
    #[must_use]
    pub fn page_step(mut self, rows: usize) -> Self {
        self.page_step = rows.max(1);
        self
    }

    /// Set the gesture configuration.
    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set the accumulator configuration.
    #[must_use]
    pub fn accumulator(mut self, accumulator: AccumulatorConfig) -> Self {
        self.accumulator = accumulator;
        self
    }

    /// Set the animation configuration.
    #[must_use]
    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Start with reduced motion.
    #[must_use]
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }
}

#![forbid(unsafe_code)]

//! Single-flight tweened transitions for a wheel's floating position.
//!
//! This module provides:
//! - [`Easing`] curves
//! - [`Tween`] segments and chained [`Transition`]s (snap, nudge-then-settle,
//!   bounce)
//! - [`Animator`], which owns at most one running transition
//! - Reduced motion support
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use kinetic_core::animation::{AnimationConfig, Animator, Transition};
//! use web_time::Instant;
//!
//! let config = AnimationConfig::default();
//! let mut animator = Animator::new(config.clone());
//! let t0 = Instant::now();
//!
//! animator.start(Transition::snap(10.4, 10.0, &config), t0);
//! let frame = animator.sample(t0 + Duration::from_secs(1)).unwrap();
//! assert!(frame.finished);
//! assert_eq!(frame.value, 10.0);
//! ```
//!
//! # Invariants
//!
//! - At most one transition runs per animator; `start` supersedes.
//! - A finished transition always reports exactly its final target.
//! - With reduced motion in effect every transition has zero duration, so
//!   the first sample already reports the final value.
//!
//! # Failure Modes
//!
//! - Sampling before the start instant is treated as elapsed zero.
//! - Zero-duration segments complete instantly.

use std::time::Duration;

use web_time::Instant;

use crate::event::Direction;

// ============================================================================
// Easing
// ============================================================================

/// Easing curve applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Decelerating curve, used for overshoots.
    EaseOut,
    /// Accelerating curve.
    EaseIn,
    /// Symmetric S-curve, used for snapping.
    #[default]
    EaseInOut,
    /// Slight overshoot then settle.
    Back,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Durations, distances and curves for wheel transitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Duration of a snap to the committed row (default: 180ms).
    pub snap_duration: Duration,
    /// Duration of the resistance overshoot before a redirected settle (default: 90ms).
    pub nudge_duration: Duration,
    /// Duration of each half of a bounce (default: 80ms).
    pub bounce_duration: Duration,
    /// Overshoot distance of a nudge, in rows (default: 0.35).
    pub nudge_rows: f64,
    /// Overshoot distance of a bounce, in rows (default: 0.3).
    pub bounce_rows: f64,
    /// Curve used for snapping.
    pub snap_easing: Easing,
    /// Whether to respect the reduced-motion preference.
    pub respect_reduced_motion: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            snap_duration: Duration::from_millis(180),
            nudge_duration: Duration::from_millis(90),
            bounce_duration: Duration::from_millis(80),
            nudge_rows: 0.35,
            bounce_rows: 0.3,
            snap_easing: Easing::EaseInOut,
            respect_reduced_motion: true,
        }
    }
}

impl AnimationConfig {
    /// Configuration with every duration collapsed to zero.
    #[must_use]
    pub fn reduced_motion() -> Self {
        Self {
            snap_duration: Duration::ZERO,
            nudge_duration: Duration::ZERO,
            bounce_duration: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the snap duration.
    #[must_use]
    pub fn snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }

    /// Set the nudge duration.
    #[must_use]
    pub fn nudge_duration(mut self, duration: Duration) -> Self {
        self.nudge_duration = duration;
        self
    }

    /// Set the bounce half-duration.
    #[must_use]
    pub fn bounce_duration(mut self, duration: Duration) -> Self {
        self.bounce_duration = duration;
        self
    }

    /// Set the snap easing curve.
    #[must_use]
    pub fn snap_easing(mut self, easing: Easing) -> Self {
        self.snap_easing = easing;
        self
    }

    /// Set whether to respect reduced-motion preference.
    #[must_use]
    pub fn respect_reduced_motion(mut self, respect: bool) -> Self {
        self.respect_reduced_motion = respect;
        self
    }

    /// Get the effective config, applying reduced motion if needed.
    #[must_use]
    pub fn effective(&self, reduced_motion: bool) -> Self {
        if reduced_motion && self.respect_reduced_motion {
            Self {
                nudge_rows: self.nudge_rows,
                bounce_rows: self.bounce_rows,
                snap_easing: self.snap_easing,
                ..Self::reduced_motion()
            }
        } else {
            self.clone()
        }
    }
}

// ============================================================================
// Tween / Transition
// ============================================================================

/// One eased interpolation segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value.
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Segment duration.
    pub duration: Duration,
    /// Curve.
    pub easing: Easing,
}

impl Tween {
    /// Create a segment.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Value after `elapsed` time in this segment.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// Named transition shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Settle onto the committed row.
    Snap,
    /// Resistance overshoot, then settle onto a redirected row.
    NudgeThenSettle,
    /// Overshoot and return to the unchanged row.
    Bounce,
}

/// A chain of tween segments played back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    kind: TransitionKind,
    segments: Vec<Tween>,
}

impl Transition {
    /// Settle from `from` to `to`.
    #[must_use]
    pub fn snap(from: f64, to: f64, config: &AnimationConfig) -> Self {
        Self {
            kind: TransitionKind::Snap,
            segments: vec![Tween::new(from, to, config.snap_duration, config.snap_easing)],
        }
    }

    /// Overshoot from `from` towards `attempted`, then settle on `target`.
    #[must_use]
    pub fn nudge_then_settle(
        from: f64,
        attempted: Direction,
        target: f64,
        config: &AnimationConfig,
    ) -> Self {
        let peak = from + attempted.sign() as f64 * config.nudge_rows;
        Self {
            kind: TransitionKind::NudgeThenSettle,
            segments: vec![
                Tween::new(from, peak, config.nudge_duration, Easing::EaseOut),
                Tween::new(peak, target, config.snap_duration, config.snap_easing),
            ],
        }
    }

    /// Overshoot `home` towards `attempted`, then return to `home`.
    #[must_use]
    pub fn bounce(from: f64, attempted: Direction, home: f64, config: &AnimationConfig) -> Self {
        let peak = home + attempted.sign() as f64 * config.bounce_rows;
        Self {
            kind: TransitionKind::Bounce,
            segments: vec![
                Tween::new(from, peak, config.bounce_duration, Easing::EaseOut),
                Tween::new(peak, home, config.bounce_duration, Easing::EaseIn),
            ],
        }
    }

    /// Shape of this transition.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Segments in playback order.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Tween] {
        &self.segments
    }

    /// Final value once every segment has played.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.to)
    }

    /// Sum of segment durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Whether the transition completes without any intermediate frame.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.total_duration().is_zero()
    }

    /// Value after `elapsed` time since the transition started.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let mut remaining = elapsed;
        for segment in &self.segments {
            if remaining < segment.duration {
                return segment.value_at(remaining);
            }
            remaining -= segment.duration;
        }
        self.target()
    }
}

// ============================================================================
// Animator
// ============================================================================

/// A sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated value.
    pub value: f64,
    /// Whether the transition just completed (the animator is idle again).
    pub finished: bool,
    /// Shape of the sampled transition.
    pub kind: TransitionKind,
}

#[derive(Debug, Clone)]
struct Running {
    transition: Transition,
    started: Instant,
}

/// Owns at most one running [`Transition`].
#[derive(Debug, Clone)]
pub struct Animator {
    config: AnimationConfig,
    reduced_motion: bool,
    active: Option<Running>,
}

impl Animator {
    /// Create an idle animator.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            reduced_motion: false,
            active: None,
        }
    }

    /// Configuration with the reduced-motion preference applied.
    ///
    /// Build transitions from this so their durations honor the preference.
    #[must_use]
    pub fn effective_config(&self) -> AnimationConfig {
        self.config.effective(self.reduced_motion)
    }

    /// Set reduced motion preference.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Whether reduced motion is currently in effect.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion && self.config.respect_reduced_motion
    }

    /// Start a transition, superseding any running one.
    ///
    /// Returns the kind of the transition that was cancelled, if any.
    pub fn start(&mut self, transition: Transition, now: Instant) -> Option<TransitionKind> {
        let superseded = self.cancel();
        self.active = Some(Running {
            transition,
            started: now,
        });
        superseded
    }

    /// Cancel the running transition. Returns its kind, if one was running.
    pub fn cancel(&mut self) -> Option<TransitionKind> {
        self.active.take().map(|r| r.transition.kind())
    }

    /// Whether a transition is running.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Kind of the running transition.
    #[must_use]
    pub fn active_kind(&self) -> Option<TransitionKind> {
        self.active.as_ref().map(|r| r.transition.kind())
    }

    /// Target of the running transition.
    #[must_use]
    pub fn active_target(&self) -> Option<f64> {
        self.active.as_ref().map(|r| r.transition.target())
    }

    /// Sample the running transition at `now`.
    ///
    /// A finished transition is released, so the next call returns `None`.
    pub fn sample(&mut self, now: Instant) -> Option<AnimationFrame> {
        let running = self.active.as_ref()?;
        let elapsed = now.saturating_duration_since(running.started);
        let kind = running.transition.kind();
        let finished = elapsed >= running.transition.total_duration();
        let value = if finished {
            running.transition.target()
        } else {
            running.transition.value_at(elapsed)
        };
        if finished {
            self.active = None;
        }
        Some(AnimationFrame {
            value,
            finished,
            kind,
        })
    }
}

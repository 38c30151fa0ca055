#![forbid(unsafe_code)]

//! Row accumulation for classified scroll deltas.
//!
//! [`RowAccumulator`] sits between the gesture classifier and a wheel column.
//! It absorbs raw row deltas between animation frames and hands them out in
//! the shape each input mode needs:
//!
//! - **Discrete**: at most one whole row step per frame via
//!   [`take_step`](RowAccumulator::take_step); the remainder stays queued so a
//!   fast flick never skips a visible value.
//! - **Continuous**: everything pending at once via
//!   [`take_continuous`](RowAccumulator::take_continuous).
//!
//! # Invariants
//!
//! 1. A single pushed delta contributes at most `max_rows_per_event` rows.
//! 2. Deltas below `micro_threshold` never reach `pending` individually; they
//!    are flushed together once their sum crosses the threshold.
//! 3. On a frame without new input and with less than one row queued, the
//!    residue decays geometrically and reaches exactly zero below
//!    `residual_floor`.
//! 4. `drain_direction(d)` leaves no queued motion in direction `d`.

use crate::event::Direction;

/// Tuning knobs for [`RowAccumulator`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumulatorConfig {
    /// Largest row magnitude a single event may contribute (default: 3).
    pub max_rows_per_event: f64,
    /// Deltas smaller than this (in rows) go to the micro-buffer (default: 0.05).
    pub micro_threshold: f64,
    /// Per-frame multiplier applied to idle residue (default: 0.8).
    pub residual_decay: f64,
    /// Residue below this magnitude snaps to zero (default: 0.01).
    pub residual_floor: f64,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_rows_per_event: 3.0,
            micro_threshold: 0.05,
            residual_decay: 0.8,
            residual_floor: 0.01,
        }
    }
}

impl AccumulatorConfig {
    /// Set the per-event clamp.
    #[must_use]
    pub fn max_rows_per_event(mut self, rows: f64) -> Self {
        self.max_rows_per_event = rows.max(1.0);
        self
    }

    /// Set the micro-delta threshold.
    #[must_use]
    pub fn micro_threshold(mut self, rows: f64) -> Self {
        self.micro_threshold = rows.max(0.0);
        self
    }

    /// Set the idle residue decay factor (clamped to `[0, 1)`).
    #[must_use]
    pub fn residual_decay(mut self, factor: f64) -> Self {
        self.residual_decay = factor.clamp(0.0, 0.99);
        self
    }
}

/// Accumulates fractional row deltas between animation frames.
#[derive(Debug, Clone, Default)]
pub struct RowAccumulator {
    config: AccumulatorConfig,
    pending: f64,
    micro: f64,
    fed_this_frame: bool,
}

impl RowAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            config,
            pending: 0.0,
            micro: 0.0,
            fed_this_frame: false,
        }
    }

    /// Add a signed row delta.
    pub fn push(&mut self, rows: f64) {
        if !rows.is_finite() {
            return;
        }
        self.fed_this_frame = true;

        let max = self.config.max_rows_per_event;
        let rows = rows.clamp(-max, max);

        if rows.abs() < self.config.micro_threshold {
            self.micro += rows;
            if self.micro.abs() >= self.config.micro_threshold {
                self.pending += self.micro;
                self.micro = 0.0;
            }
        } else {
            self.pending += rows;
        }
    }

    /// Rows queued for application.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> f64 {
        self.pending
    }

    /// Sub-threshold rows waiting in the micro-buffer.
    #[inline]
    #[must_use]
    pub fn micro(&self) -> f64 {
        self.micro
    }

    /// Whether at least one whole row step is queued.
    #[inline]
    #[must_use]
    pub fn has_step(&self) -> bool {
        self.pending.abs() >= 1.0
    }

    /// Whether nothing is queued at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending == 0.0 && self.micro == 0.0
    }

    /// Consume one whole row step, if queued.
    pub fn take_step(&mut self) -> Option<Direction> {
        if !self.has_step() {
            return None;
        }
        let direction = Direction::of(self.pending)?;
        self.pending -= direction.sign() as f64;
        Some(direction)
    }

    /// Consume everything queued (continuous integration).
    pub fn take_continuous(&mut self) -> f64 {
        std::mem::take(&mut self.pending)
    }

    /// Drop all queued motion in `direction` (after a rejected step).
    pub fn drain_direction(&mut self, direction: Direction) {
        if Direction::of(self.pending) == Some(direction) {
            self.pending = 0.0;
        }
        if Direction::of(self.micro) == Some(direction) {
            self.micro = 0.0;
        }
    }

    /// Close the current frame: decay idle residue and reset the input flag.
    pub fn end_frame(&mut self) {
        if !self.fed_this_frame && !self.has_step() {
            self.pending *= self.config.residual_decay;
            if self.pending.abs() < self.config.residual_floor {
                self.pending = 0.0;
            }
        }
        self.fed_this_frame = false;
    }

    /// Fractional row offset to display between committed steps.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.pending.fract()
    }

    /// Forget all queued motion.
    pub fn clear(&mut self) {
        self.pending = 0.0;
        self.micro = 0.0;
        self.fed_this_frame = false;
    }
}

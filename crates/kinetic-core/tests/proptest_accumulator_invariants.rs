//! Property-based invariant tests for the row accumulator.
//!
//! 1. A single push never queues more than `max_rows_per_event` rows.
//! 2. Discrete draining yields one step per call and stops below one row.
//! 3. Idle residue always reaches exactly zero.
//! 4. drain_direction leaves no queued motion in that direction.
//! 5. Gesture classification never produces a sub-row discrete delta.

use kinetic_core::accumulator::{AccumulatorConfig, RowAccumulator};
use kinetic_core::event::{DeltaMode, Direction, ScrollEvent};
use kinetic_core::gesture::{GestureClassifier, InputMode};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn deltas(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-6.0f64..6.0, 1..=max_len)
}

fn fresh() -> RowAccumulator {
    RowAccumulator::new(AccumulatorConfig::default())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Per-event clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_push_is_clamped(rows in -100.0f64..100.0) {
        let mut acc = fresh();
        acc.push(rows);
        prop_assert!(acc.pending().abs() <= 3.0 + 1e-12);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Discrete draining
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn steps_drain_whole_rows_only(values in deltas(20)) {
        let mut acc = fresh();
        for v in &values {
            acc.push(*v);
        }
        let before = acc.pending();
        let mut steps = 0isize;
        while let Some(direction) = acc.take_step() {
            steps += direction.sign();
            prop_assert!(steps.unsigned_abs() <= 64, "runaway draining");
        }
        prop_assert!(acc.pending().abs() < 1.0);
        prop_assert!((before - steps as f64 - acc.pending()).abs() < 1e-9);
        prop_assert_eq!(steps, before.trunc() as isize);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Idle decay reaches zero
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn idle_residue_reaches_zero(rows in -0.99f64..0.99) {
        let mut acc = fresh();
        acc.push(rows);
        acc.end_frame();
        for _ in 0..100 {
            acc.end_frame();
        }
        prop_assert_eq!(acc.pending(), 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. drain_direction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drain_direction_clears_that_direction(values in deltas(10), forward in any::<bool>()) {
        let direction = if forward { Direction::Forward } else { Direction::Backward };
        let mut acc = fresh();
        for v in &values {
            acc.push(*v);
        }
        acc.drain_direction(direction);
        prop_assert_ne!(Direction::of(acc.pending()), Some(direction));
        prop_assert_ne!(Direction::of(acc.micro()), Some(direction));
        prop_assert_ne!(acc.take_step(), Some(direction));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn discrete_deltas_carry_a_full_row(
        delta in -500.0f64..500.0,
        mode in prop_oneof![Just(DeltaMode::Pixel), Just(DeltaMode::Line), Just(DeltaMode::Page)],
        row_height in 10.0f64..80.0,
    ) {
        prop_assume!(delta != 0.0);
        let classifier = GestureClassifier::default();
        let classified = classifier
            .classify_scroll(&ScrollEvent::new(delta, mode), row_height)
            .expect("non-zero delta classifies");
        if classified.mode == InputMode::Discrete {
            prop_assert!(classified.rows.abs() >= 1.0);
        } else {
            prop_assert_eq!(mode, DeltaMode::Pixel);
            prop_assert!(delta.abs() < row_height);
        }
        prop_assert_eq!(classified.rows.signum(), delta.signum());
    }
}

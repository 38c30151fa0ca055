//! Property-based tests for the column lock.
//!
//! The lock is driven by random request/release/force-release sequences over
//! three columns with a monotonically advancing clock and compared against a
//! small reference model.
//!
//! 1. The lock agrees with the model on every outcome and holder.
//! 2. A non-holder is never granted the lock while another column holds it.
//! 3. After force_release by the holder, any column's request succeeds.

use std::time::Duration;

use kinetic_core::lock::{ColumnId, ColumnLock, LockConfig};
use proptest::prelude::*;
use web_time::Instant;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Request(usize),
    Release(usize),
    ForceRelease(usize),
}

fn op() -> impl Strategy<Value = (Op, u64)> {
    let column = 0usize..3;
    (
        prop_oneof![
            column.clone().prop_map(Op::Request),
            column.clone().prop_map(Op::Release),
            column.prop_map(Op::ForceRelease),
        ],
        0u64..120,
    )
}

#[derive(Debug, Default)]
struct Model {
    holder: Option<usize>,
    release_at: Option<Instant>,
}

impl Model {
    fn expire(&mut self, now: Instant) {
        if self.release_at.is_some_and(|deadline| now >= deadline) {
            self.holder = None;
            self.release_at = None;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Model agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lock_matches_reference_model(ops in proptest::collection::vec(op(), 1..60)) {
        let grace = Duration::from_millis(150);
        let lock = ColumnLock::new(LockConfig { grace });
        let ids: Vec<ColumnId> = (0..3).map(|_| lock.register()).collect();
        let mut model = Model::default();
        let mut now = Instant::now();

        for (op, advance_ms) in ops {
            now += Duration::from_millis(advance_ms);
            model.expire(now);
            match op {
                Op::Request(c) => {
                    let expected = match model.holder {
                        None => {
                            model.holder = Some(c);
                            true
                        }
                        Some(h) if h == c => {
                            model.release_at = None;
                            true
                        }
                        Some(_) => false,
                    };
                    if expected {
                        model.release_at = None;
                    }
                    prop_assert_eq!(lock.request(ids[c], now), expected);
                }
                Op::Release(c) => {
                    if model.holder == Some(c) && model.release_at.is_none() {
                        model.release_at = Some(now + grace);
                    }
                    lock.release(ids[c], now);
                }
                Op::ForceRelease(c) => {
                    let was_holder = model.holder == Some(c);
                    if was_holder {
                        model.holder = None;
                        model.release_at = None;
                    }
                    prop_assert_eq!(lock.force_release(ids[c], now), was_holder);
                }
            }
            prop_assert_eq!(lock.holder(now), model.holder.map(|c| ids[c]));
            prop_assert_eq!(lock.is_releasing(now), model.release_at.is_some());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Force release frees the lock for everyone
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn force_release_frees_for_any_column(holder in 0usize..3, next in 0usize..3) {
        let lock = ColumnLock::default();
        let ids: Vec<ColumnId> = (0..3).map(|_| lock.register()).collect();
        let now = Instant::now();
        prop_assert!(lock.request(ids[holder], now));
        prop_assert!(lock.force_release(ids[holder], now));
        prop_assert!(lock.request(ids[next], now));
        prop_assert_eq!(lock.holder(now), Some(ids[next]));
    }
}

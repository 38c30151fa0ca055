#![forbid(unsafe_code)]

//! Column lock: exclusive free-scroll ownership among sibling wheel columns.
//!
//! A diagonal trackpad swipe over an hour/minute picker must not drag both
//! columns at once. Every column asks the shared [`ColumnLock`] before
//! running its free-scroll pipeline; only one column may hold it at a time.
//!
//! # State Machine
//!
//! ```text
//!   Free ──request(a)──▶ Held(a) ──release(a)──▶ Releasing(a, deadline)
//!    ▲                     │  ▲                        │        │
//!    │                     │  └──────request(a)────────┘        │
//!    └──force_release(a)───┘                                    │
//!    └─────────────────────── now >= deadline ──────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Zero or one column holds the lock at any instant.
//! 2. `request` by the holder is idempotent and cancels a pending release.
//! 3. A column that does not hold the lock cannot release it.
//! 4. After `force_release`, any column's `request` succeeds.
//!
//! # Failure Modes
//!
//! - A holder that never releases (lost pointer-up, torn-down host) keeps the
//!   lock; hosts call `force_release` on blur and touch interruption.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

// Logging macros; call sites are compiled out without the `tracing` feature.
#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};

/// Identifier of one wheel column within a lock domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Raw numeric id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Timing knobs for [`ColumnLock`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockConfig {
    /// Delay between a natural release and the lock becoming free (default: 150ms).
    pub grace: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            grace: Duration::from_millis(150),
        }
    }
}

#[derive(Debug)]
struct LockState {
    config: LockConfig,
    holder: Option<ColumnId>,
    release_at: Option<Instant>,
    next_id: u64,
}

impl LockState {
    fn expire(&mut self, now: Instant) {
        if let Some(deadline) = self.release_at
            && now >= deadline
        {
            #[cfg(feature = "tracing")]
            trace!(
                message = "lock.expired",
                holder = self.holder.map(ColumnId::get)
            );
            self.holder = None;
            self.release_at = None;
        }
    }

    fn clear_if_held(&mut self, id: ColumnId) -> bool {
        if self.holder != Some(id) {
            return false;
        }
        self.holder = None;
        self.release_at = None;
        #[cfg(feature = "tracing")]
        trace!(message = "lock.force_released", column = id.get());
        true
    }
}

/// Shared mutual-exclusion token for sibling wheel columns.
///
/// Cloning yields another handle to the same lock. The lock is single
/// threaded: columns live on one UI event loop.
#[derive(Clone)]
pub struct ColumnLock {
    inner: Rc<RefCell<LockState>>,
}

impl std::fmt::Debug for ColumnLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ColumnLock")
            .field("holder", &state.holder)
            .field("releasing", &state.release_at.is_some())
            .finish()
    }
}

impl Default for ColumnLock {
    fn default() -> Self {
        Self::new(LockConfig::default())
    }
}

impl ColumnLock {
    /// Create a free lock.
    #[must_use]
    pub fn new(config: LockConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LockState {
                config,
                holder: None,
                release_at: None,
                next_id: 1,
            })),
        }
    }

    /// Allocate a fresh column id in this lock's domain.
    pub fn register(&self) -> ColumnId {
        let mut state = self.inner.borrow_mut();
        let id = ColumnId(state.next_id);
        state.next_id += 1;
        id
    }

    /// Grace period applied by [`release`](Self::release).
    #[must_use]
    pub fn grace(&self) -> Duration {
        self.inner.borrow().config.grace
    }

    /// Try to take the lock for `id`.
    ///
    /// Returns `false` when a different column holds it; the caller must
    /// drop the triggering input.
    pub fn request(&self, id: ColumnId, now: Instant) -> bool {
        let mut state = self.inner.borrow_mut();
        state.expire(now);
        match state.holder {
            None => {
                state.holder = Some(id);
                state.release_at = None;
                #[cfg(feature = "tracing")]
                trace!(message = "lock.acquired", column = id.get());
                true
            }
            Some(holder) if holder == id => {
                state.release_at = None;
                true
            }
            Some(_holder) => {
                #[cfg(feature = "tracing")]
                debug!(
                    message = "lock.denied",
                    column = id.get(),
                    holder = _holder.get()
                );
                false
            }
        }
    }

    /// Schedule release after the grace period. No-op unless `id` holds the lock.
    pub fn release(&self, id: ColumnId, now: Instant) {
        let mut state = self.inner.borrow_mut();
        state.expire(now);
        if state.holder != Some(id) || state.release_at.is_some() {
            return;
        }
        if state.config.grace.is_zero() {
            state.holder = None;
        } else {
            state.release_at = Some(now + state.config.grace);
        }
    }

    /// Release immediately. Returns whether `id` held the lock at `now`.
    pub fn force_release(&self, id: ColumnId, now: Instant) -> bool {
        let mut state = self.inner.borrow_mut();
        state.expire(now);
        state.clear_if_held(id)
    }

    /// Drop whatever claim `id` has, pending release included, without
    /// consulting a clock. Used on teardown paths that have no timestamp.
    pub fn relinquish(&self, id: ColumnId) {
        self.inner.borrow_mut().clear_if_held(id);
    }

    /// Current holder at `now`, after expiring any elapsed grace period.
    pub fn holder(&self, now: Instant) -> Option<ColumnId> {
        let mut state = self.inner.borrow_mut();
        state.expire(now);
        state.holder
    }

    /// Whether `id` holds the lock at `now`.
    pub fn is_held_by(&self, id: ColumnId, now: Instant) -> bool {
        self.holder(now) == Some(id)
    }

    /// Whether a natural release is still pending at `now`.
    pub fn is_releasing(&self, now: Instant) -> bool {
        let mut state = self.inner.borrow_mut();
        state.expire(now);
        state.release_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn register_allocates_increasing_ids() {
        let lock = ColumnLock::default();
        let a = lock.register();
        let b = lock.register();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn first_request_wins() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        assert!(lock.request(a, t));
        assert!(!lock.request(b, t));
        assert_eq!(lock.holder(t), Some(a));
    }

    #[test]
    fn request_is_idempotent_for_holder() {
        let lock = ColumnLock::default();
        let a = lock.register();
        let t = Instant::now();
        assert!(lock.request(a, t));
        assert!(lock.request(a, t + MS_50));
    }

    #[test]
    fn release_waits_for_grace() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        assert!(lock.is_releasing(t));
        assert!(!lock.request(b, t + MS_50));
        assert!(lock.request(b, t + MS_200));
        assert_eq!(lock.holder(t + MS_200), Some(b));
    }

    #[test]
    fn holder_request_cancels_pending_release() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        assert!(lock.request(a, t + MS_50));
        assert!(!lock.is_releasing(t + MS_50));
        assert!(!lock.request(b, t + MS_200));
    }

    #[test]
    fn repeated_release_does_not_extend_deadline() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        lock.release(a, t + Duration::from_millis(140));
        assert!(lock.request(b, t + Duration::from_millis(151)));
    }

    #[test]
    fn force_release_is_immediate() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        assert!(lock.force_release(a, t));
        assert!(lock.request(b, t));
    }

    #[test]
    fn elapsed_grace_ends_holding_before_force_release() {
        let lock = ColumnLock::default();
        let a = lock.register();
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        assert!(!lock.is_releasing(t + MS_200));
        assert!(!lock.force_release(a, t + MS_200));
        assert_eq!(lock.holder(t + MS_200), None);
    }

    #[test]
    fn releasing_foreign_lock_is_noop() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(b, t);
        assert!(!lock.force_release(b, t));
        assert_eq!(lock.holder(t + MS_200), Some(a));
    }

    #[test]
    fn zero_grace_releases_immediately() {
        let lock = ColumnLock::new(LockConfig {
            grace: Duration::ZERO,
        });
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        assert!(lock.request(b, t));
    }

    #[test]
    fn relinquish_clears_pending_release() {
        let lock = ColumnLock::default();
        let (a, b) = (lock.register(), lock.register());
        let t = Instant::now();
        lock.request(a, t);
        lock.release(a, t);
        lock.relinquish(b);
        assert!(lock.is_releasing(t));
        lock.relinquish(a);
        assert!(!lock.is_releasing(t));
        assert!(lock.request(b, t));
    }

    #[test]
    fn clones_share_state() {
        let lock = ColumnLock::default();
        let other = lock.clone();
        let (a, b) = (lock.register(), other.register());
        let t = Instant::now();
        assert!(lock.request(a, t));
        assert!(!other.request(b, t));
    }
}

#![forbid(unsafe_code)]

//! Core: input events, gesture classification, row accumulation, animation
//! and cross-column locking for kinetic wheel pickers.
//!
//! # Role in Kinetic
//! `kinetic-core` is the physics layer. It knows nothing about option lists
//! or values; it turns raw host input into row deltas, plays eased
//! transitions, and arbitrates which sibling column may free-scroll.
//!
//! # Primary responsibilities
//! - **Event**: canonical key, scroll, touch and focus events.
//! - **GestureClassifier**: continuous vs discrete input, delta to rows.
//! - **RowAccumulator**: per-frame clamping, micro-delta buffering, decay.
//! - **Animator**: single-flight snap / nudge / bounce transitions.
//! - **ColumnLock**: one free-scrolling column at a time.
//!
//! # How it fits in the system
//! `kinetic-widgets` builds wheel columns and the time picker on top of these
//! pieces. Nothing here reads a clock: every time-dependent call takes the
//! caller's `now`, so behavior is reproducible in tests.

pub mod accumulator;
pub mod animation;
pub mod event;
pub mod gesture;
pub mod lock;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use web_time::Instant;

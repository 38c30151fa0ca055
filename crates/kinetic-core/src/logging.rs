#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` macros so
//! call sites import them from here (`use kinetic_core::logging::debug;`)
//! instead of depending on `tracing` directly. Without the feature the module is
//! empty and every call site in the workspace is compiled out.
//!
//! Event names are dotted (`wheel.commit`, `lock.denied`) and carried in the
//! `message` field; everything else is a structured key/value field.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#![forbid(unsafe_code)]

//! Row metrics supplied by the host's layout.
//!
//! A wheel converts pixel deltas into rows and rows back into pixel offsets,
//! so it needs the rendered row height. The host measures it (from the DOM,
//! a font cell, a native list row) and exposes it through [`MetricsProvider`].
//! A provider that cannot measure yet returns `None`, and construction fails
//! with [`WheelError::MetricsUnavailable`] instead of guessing.

use crate::error::{Result, WheelError};

/// Source of the rendered row height.
pub trait MetricsProvider {
    /// Height of one option row in pixels, or `None` if not measurable yet.
    fn row_height_px(&self) -> Option<f64>;
}

/// Provider with a constant row height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRowHeight(pub f64);

impl MetricsProvider for FixedRowHeight {
    fn row_height_px(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl<F> MetricsProvider for F
where
    F: Fn() -> Option<f64>,
{
    fn row_height_px(&self) -> Option<f64> {
        self()
    }
}

/// Read and validate a row height from `provider`.
///
/// # Errors
///
/// [`WheelError::MetricsUnavailable`] when the provider has no measurement,
/// [`WheelError::InvalidRowHeight`] when it is non-finite or not positive.
pub fn measure(provider: &(impl MetricsProvider + ?Sized)) -> Result<f64> {
    let height = provider
        .row_height_px()
        .ok_or(WheelError::MetricsUnavailable)?;
    if !height.is_finite() || height <= 0.0 {
        return Err(WheelError::invalid_row_height(height));
    }
    Ok(height)
}

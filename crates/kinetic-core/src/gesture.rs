#![forbid(unsafe_code)]

//! Gesture classification: decides how a raw scroll delta is integrated.
//!
//! Scroll hardware comes in two flavours that must feel different:
//!
//! - **Discrete** devices (notched wheels, line/page stepping) emit few, large,
//!   deliberate ticks. Each tick maps 1:1 onto a row step.
//! - **Continuous** devices (trackpads, touch drags, high-resolution wheels)
//!   emit many small deltas that integrate smoothly into a floating position.
//!
//! [`GestureClassifier`] tags each event with an [`InputMode`] and converts
//! its delta into *rows* (one row = one option slot).
//!
//! # Invariants
//!
//! 1. Line- and page-unit deltas are always `Discrete`.
//! 2. A pixel delta is `Discrete` iff `|delta| >= row_height_px`.
//! 3. Touch drags are always `Continuous`.
//! 4. A `Discrete` delta always carries at least one row of magnitude.
//! 5. Classification is a pure function of the event and the row height.
//!
//! # Failure Modes
//!
//! - Zero or NaN deltas classify to `None` (nothing to integrate).
//! - Zoom gestures (Ctrl/Super held) classify to `None`; the host owns them.

use crate::event::{DeltaMode, ScrollEvent, TouchEvent};

/// Default pixel height of one text line, used to convert line deltas.
pub const DEFAULT_LINE_HEIGHT_PX: f64 = 16.0;

/// Default number of rows one page delta scrolls.
pub const DEFAULT_PAGE_ROWS: f64 = 5.0;

/// How a delta should be integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Smooth trackpad-style deltas applied straight to the position.
    Continuous,
    /// Notched/line-stepped ticks applied one row step per frame.
    Discrete,
}

/// A delta after classification and conversion to rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedDelta {
    /// Integration strategy.
    pub mode: InputMode,
    /// Signed delta in rows, positive towards the next option.
    pub rows: f64,
}

/// Unit conversion knobs for gesture classification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Pixel height of one text line for line-unit deltas (default: 16px).
    pub line_height_px: f64,
    /// Rows scrolled per page-unit delta (default: 5).
    pub page_rows: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
            page_rows: DEFAULT_PAGE_ROWS,
        }
    }
}

impl GestureConfig {
    /// Set the line height used for line-unit deltas.
    #[must_use]
    pub fn line_height_px(mut self, px: f64) -> Self {
        self.line_height_px = px.max(1.0);
        self
    }

    /// Set the rows scrolled per page-unit delta.
    #[must_use]
    pub fn page_rows(mut self, rows: f64) -> Self {
        self.page_rows = rows.max(1.0);
        self
    }
}

/// Stateless classifier for scroll and touch input.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify a scroll event without converting it.
    #[must_use]
    pub fn mode_of(&self, event: &ScrollEvent, row_height_px: f64) -> InputMode {
        match event.mode {
            DeltaMode::Line | DeltaMode::Page => InputMode::Discrete,
            DeltaMode::Pixel if event.delta_y.abs() >= row_height_px => InputMode::Discrete,
            DeltaMode::Pixel => InputMode::Continuous,
        }
    }

    /// Convert a scroll delta into rows, ignoring the mode.
    #[must_use]
    pub fn rows_of(&self, event: &ScrollEvent, row_height_px: f64) -> f64 {
        let row_height_px = row_height_px.max(f64::EPSILON);
        match event.mode {
            DeltaMode::Pixel => event.delta_y / row_height_px,
            DeltaMode::Line => event.delta_y * self.config.line_height_px / row_height_px,
            DeltaMode::Page => event.delta_y * self.config.page_rows,
        }
    }

    /// Classify a scroll event and convert its delta into rows.
    ///
    /// Returns `None` when there is nothing to integrate.
    #[must_use]
    pub fn classify_scroll(
        &self,
        event: &ScrollEvent,
        row_height_px: f64,
    ) -> Option<ClassifiedDelta> {
        if event.is_zoom_gesture() || !event.delta_y.is_finite() || event.delta_y == 0.0 {
            return None;
        }

        let mode = self.mode_of(event, row_height_px);
        let mut rows = self.rows_of(event, row_height_px);
        if mode == InputMode::Discrete && rows.abs() < 1.0 {
            rows = rows.signum();
        }
        Some(ClassifiedDelta { mode, rows })
    }

    /// Convert a touch drag into a continuous row delta.
    #[must_use]
    pub fn classify_touch(&self, event: &TouchEvent, row_height_px: f64) -> Option<ClassifiedDelta> {
        if !event.delta_y.is_finite() || event.delta_y == 0.0 {
            return None;
        }
        Some(ClassifiedDelta {
            mode: InputMode::Continuous,
            rows: event.delta_y / row_height_px.max(f64::EPSILON),
        })
    }
}

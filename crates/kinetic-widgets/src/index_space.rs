#![forbid(unsafe_code)]

//! Virtual index space: an option list tiled `R` times for seamless wrap.
//!
//! A wheel scrolls over `R` copies of its `N` options laid end to end, so the
//! strip can keep moving in either direction without visibly hitting an
//! edge. Raw index `i` shows option `i mod N`.
//!
//! ```text
//!   tile:   0        1        2        3        4        5        6
//!         [0..N)  [N..2N)  ...                                [6N..7N)
//!                 └────────────── inner band ──────────────┘
//! ```
//!
//! The committed selection always lives in the *inner band* `[N, N·(R-1))`.
//! When a raw index drifts out of it, [`IndexSpace::normalize`] moves it back
//! by the wrap span `N·(R-2)` (a whole number of tiles, so the shown option
//! is unchanged) and reports the shift so the caller can move its floating
//! position by the same amount.
//!
//! # Invariants
//!
//! 1. `R` is odd and at least 5; `N >= 1`; options are pairwise distinct.
//! 2. `normalize(i).0 ≡ i (mod N)` and lies in the inner band.
//! 3. `normalize(i).0 == i + normalize(i).1`.

use std::ops::Range;

use crate::error::{Result, WheelError};

/// Default number of tiles.
pub const DEFAULT_REPEATS: usize = 7;

/// An immutable option list plus its tiled index arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpace<T> {
    options: Vec<T>,
    repeats: usize,
}

impl<T: PartialEq> IndexSpace<T> {
    /// Validate `options` and tile them `repeats` times.
    ///
    /// # Errors
    ///
    /// [`WheelError::EmptyOptions`] for an empty list,
    /// [`WheelError::InvalidRepeatCount`] unless `repeats` is odd and at
    /// least 5, and [`WheelError::DuplicateOption`] when an option repeats.
    pub fn new(options: Vec<T>, repeats: usize) -> Result<Self> {
        if options.is_empty() {
            return Err(WheelError::EmptyOptions);
        }
        if repeats < 5 || repeats % 2 == 0 {
            return Err(WheelError::InvalidRepeatCount { repeats });
        }
        if let Some(index) =
            (1..options.len()).find(|&i| options[..i].contains(&options[i]))
        {
            return Err(WheelError::DuplicateOption { index });
        }
        Ok(Self { options, repeats })
    }

    /// Logical index of `value`, if it is one of the options.
    #[must_use]
    pub fn logical_of(&self, value: &T) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }
}

impl<T> IndexSpace<T> {
    /// Number of distinct options (`N`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`; construction rejects empty lists.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of tiles (`R`).
    #[inline]
    #[must_use]
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// The option list.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Total raw indices (`R·N`).
    #[must_use]
    pub fn total(&self) -> usize {
        self.len() * self.repeats
    }

    /// Shift applied when wrapping back into the inner band (`N·(R-2)`).
    #[must_use]
    pub fn wrap_span(&self) -> usize {
        self.len() * (self.repeats - 2)
    }

    /// Raw indices a committed selection may occupy.
    #[must_use]
    pub fn inner_band(&self) -> Range<usize> {
        self.len()..self.len() * (self.repeats - 1)
    }

    /// Whether `index` lies in the inner band.
    #[must_use]
    pub fn in_inner_band(&self, index: usize) -> bool {
        self.inner_band().contains(&index)
    }

    /// Move `raw` into the inner band by whole wrap spans.
    ///
    /// Returns the normalized index and the signed shift that was applied.
    #[must_use]
    pub fn normalize(&self, raw: isize) -> (usize, isize) {
        let n = self.len() as isize;
        let span = self.wrap_span() as isize;
        let index = n + (raw - n).rem_euclid(span);
        (index as usize, index - raw)
    }

    /// Option slot shown at committed index `index`.
    #[inline]
    #[must_use]
    pub fn to_logical(&self, index: usize) -> usize {
        index % self.len()
    }

    /// Option slot shown at any raw index, including ones outside the strip.
    #[inline]
    #[must_use]
    pub fn wrap_logical(&self, raw: isize) -> usize {
        raw.rem_euclid(self.len() as isize) as usize
    }

    /// Option shown at raw index `index`.
    #[inline]
    #[must_use]
    pub fn option(&self, index: usize) -> &T {
        &self.options[self.to_logical(index)]
    }

    /// Option shown at any raw index.
    #[inline]
    #[must_use]
    pub fn option_at(&self, raw: isize) -> &T {
        &self.options[self.wrap_logical(raw)]
    }

    /// Representation of `logical` in the middle tile.
    #[must_use]
    pub fn center_of(&self, logical: usize) -> usize {
        self.len() * (self.repeats / 2) + logical % self.len()
    }

    /// Inner-band index showing `logical` that is closest to `near`.
    #[must_use]
    pub fn nearest_representation(&self, logical: usize, near: f64) -> usize {
        let logical = logical % self.len();
        if !near.is_finite() {
            return self.center_of(logical);
        }
        let n = self.len() as f64;
        let tile = ((near - logical as f64) / n).round();
        let tile = tile.clamp(1.0, (self.repeats - 2) as f64) as usize;
        logical + self.len() * tile
    }

    /// Raw index showing `logical` that is closest to `near`, anywhere on
    /// the unbounded strip. Pair with [`normalize`](Self::normalize) to
    /// re-base a selection and its floating position together.
    #[must_use]
    pub fn nearest_raw(&self, logical: usize, near: f64) -> isize {
        let logical = (logical % self.len()) as isize;
        if !near.is_finite() {
            return self.center_of(logical as usize) as isize;
        }
        let n = self.len() as isize;
        let tile = ((near - logical as f64) / n as f64).round() as isize;
        logical + n * tile
    }
}

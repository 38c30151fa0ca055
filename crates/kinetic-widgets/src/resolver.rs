#![forbid(unsafe_code)]

//! Disabled-value resolution.
//!
//! A wheel may carry a predicate that marks some options unavailable (a
//! restaurant closed at 6:45). The [`Resolver`] answers two questions:
//!
//! - may the selection move one row in a direction ([`Resolver::try_step`])?
//! - where is the closest enabled option to a landing spot
//!   ([`Resolver::find_nearest_valid`], [`Resolver::resolve`])?
//!
//! Search order for the nearest enabled option is by distance `d = 1..N-1`,
//! trying the preferred direction before the opposite one at each distance.
//! The landing spot itself is never returned by the search; callers check it
//! first. Returned indices are raw and may sit one tile outside the inner
//! band; callers normalize them.

use kinetic_core::event::Direction;

use crate::index_space::IndexSpace;

/// Outcome of a single-row step attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCheck {
    /// The neighbour at this raw index is enabled.
    Allowed(usize),
    /// The neighbour is disabled; the wheel bounces instead.
    Blocked,
}

/// Outcome of resolving a landing spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The landing spot is enabled.
    Valid(usize),
    /// The landing spot is disabled; the closest enabled option was found
    /// by moving in `direction`.
    Redirected { index: usize, direction: Direction },
    /// No enabled option exists apart from (possibly) the landing spot.
    Exhausted,
}

/// Borrowed view of an index space and its disabled predicate.
pub struct Resolver<'a, T> {
    space: &'a IndexSpace<T>,
    disabled: Option<&'a dyn Fn(&T) -> bool>,
}

impl<'a, T> Resolver<'a, T> {
    /// Create a resolver. `None` means every option is enabled.
    #[must_use]
    pub fn new(space: &'a IndexSpace<T>, disabled: Option<&'a dyn Fn(&T) -> bool>) -> Self {
        Self { space, disabled }
    }

    /// Whether the option at raw index `index` is disabled.
    #[must_use]
    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled
            .is_some_and(|disabled| disabled(self.space.option(index)))
    }

    /// Check the neighbour of `selected` in `direction`.
    #[must_use]
    pub fn try_step(&self, selected: usize, direction: Direction) -> StepCheck {
        let Some(next) = selected.checked_add_signed(direction.sign()) else {
            return StepCheck::Blocked;
        };
        if self.is_disabled(next) {
            StepCheck::Blocked
        } else {
            StepCheck::Allowed(next)
        }
    }

    /// Closest enabled index to `start`, excluding `start` itself.
    ///
    /// Returns the index and the direction it was found in.
    #[must_use]
    pub fn find_nearest_valid(
        &self,
        start: usize,
        preferred: Direction,
    ) -> Option<(usize, Direction)> {
        for distance in 1..self.space.len() {
            for direction in [preferred, preferred.reversed()] {
                let offset = direction.sign() * distance as isize;
                let Some(candidate) = start.checked_add_signed(offset) else {
                    continue;
                };
                if !self.is_disabled(candidate) {
                    return Some((candidate, direction));
                }
            }
        }
        None
    }

    /// Resolve a landing spot: keep it if enabled, otherwise redirect.
    #[must_use]
    pub fn resolve(&self, index: usize, preferred: Direction) -> Resolution {
        if !self.is_disabled(index) {
            return Resolution::Valid(index);
        }
        match self.find_nearest_valid(index, preferred) {
            Some((index, direction)) => Resolution::Redirected { index, direction },
            None => Resolution::Exhausted,
        }
    }

    /// Number of enabled options.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        (0..self.space.len())
            .filter(|&logical| !self.is_disabled(logical))
            .count()
    }
}

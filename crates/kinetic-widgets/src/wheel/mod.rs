#![forbid(unsafe_code)]

//! Wheel instance: one kinetic, wrap-around option column.
//!
//! A [`Wheel`] combines the pieces from `kinetic-core` with an
//! [`IndexSpace`] and a [`Resolver`] into a scrollable, keyboard-navigable
//! column that commits one value at a time.
//!
//! # State Machine
//!
//! ```text
//!          input                 idle window elapsed            transition done
//!   Idle ────────▶ Gesturing ─────────────────────▶ Settling ─────────────────▶ Idle
//!    ▲              ▲     │                           │
//!    │              │     └──── focus lost ───────────┤
//!    │              └────────── input ────────────────┘
//!    └── dispose() from any state ──▶ Disposed (terminal)
//! ```
//!
//! # Commit Rules
//!
//! - Discrete input (notched wheel, keys) commits one row per frame, each
//!   step gated by the resolver. A blocked step bounces and drops the queued
//!   motion in that direction.
//! - Continuous input (trackpad, touch) moves the floating position freely
//!   and commits once, when the gesture settles. Meanwhile the selection is
//!   re-based by whole cycles so it stays next to the position; that never
//!   changes the observable value.
//! - Settling rounds the position. An enabled landing spot snaps; a disabled
//!   one redirects to the nearest enabled option (nudge, then settle); a
//!   fully disabled list bounces in place.
//!
//! # Invariants
//!
//! 1. `selected_index()` is always inside the inner band.
//! 2. At most one transition and one idle deadline are alive.
//! 3. Exactly one [`ValueChange`] is produced per committed logical change.
//! 4. After [`Wheel::dispose`] no call mutates state or emits a change.
//!
//! # Failure Modes
//!
//! - Input while another column holds the shared lock is dropped.
//! - `set_value` with a value that is not an option is a no-op.

mod change;
mod config;

pub use change::{ChangeCause, Phase, ValueChange, VisibleRow};
pub use config::WheelConfig;

use std::fmt::Debug;

use kinetic_core::accumulator::RowAccumulator;
use kinetic_core::animation::{Animator, Transition};
use kinetic_core::event::{
    Direction, Event, KeyCode, KeyEvent, ScrollEvent, TouchEvent, TouchPhase,
};
use kinetic_core::gesture::{ClassifiedDelta, GestureClassifier, InputMode};
use kinetic_core::lock::{ColumnId, ColumnLock};
use web_time::Instant;

// Logging macros; call sites are compiled out without the `tracing` feature.
#[cfg(feature = "tracing")]
use kinetic_core::logging::{debug, trace};

use crate::error::{Result, WheelError};
use crate::index_space::IndexSpace;
use crate::metrics::{self, MetricsProvider};
use crate::resolver::{Resolution, Resolver, StepCheck};

type Predicate<T> = Box<dyn Fn(&T) -> bool>;
type Formatter<T> = Box<dyn Fn(&T) -> String>;
type Listener<T> = Box<dyn FnMut(&ValueChange<T>)>;

#[derive(Debug, Clone, Copy)]
struct Gesture {
    serial: u64,
    mode: InputMode,
    last_direction: Option<Direction>,
    idle_deadline: Instant,
    touching: bool,
}

#[derive(Debug, Clone, Copy)]
enum Activity {
    Idle,
    Gesturing(Gesture),
    Settling,
    Disposed,
}

/// A kinetic option column.
pub struct Wheel<T> {
    space: IndexSpace<T>,
    config: WheelConfig,
    row_height: f64,
    classifier: GestureClassifier,
    accumulator: RowAccumulator,
    animator: Animator,
    selected: usize,
    position: f64,
    activity: Activity,
    gesture_serial: u64,
    disabled: Option<Predicate<T>>,
    formatter: Option<Formatter<T>>,
    listener: Option<Listener<T>>,
    lock: ColumnLock,
    column: ColumnId,
}

impl<T: Debug> Debug for Wheel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("value", self.space.option(self.selected))
            .field("selected", &self.selected)
            .field("position", &self.position)
            .field("activity", &self.activity)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + Debug> Wheel<T> {
    /// Build a wheel over `options`, starting at `initial`.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicated option list, an invalid repeat count,
    /// an `initial` that is not an option, or unusable row metrics.
    pub fn new(
        options: Vec<T>,
        initial: &T,
        provider: &(impl MetricsProvider + ?Sized),
        config: WheelConfig,
    ) -> Result<Self> {
        let space = IndexSpace::new(options, config.repeats)?;
        let logical = space
            .logical_of(initial)
            .ok_or(WheelError::InitialValueNotFound)?;
        let row_height = metrics::measure(provider)?;

        let selected = space.center_of(logical);
        let lock = ColumnLock::default();
        let column = lock.register();
        let mut animator = Animator::new(config.animation.clone());
        animator.set_reduced_motion(config.reduced_motion);

        Ok(Self {
            space,
            row_height,
            classifier: GestureClassifier::new(config.gesture.clone()),
            accumulator: RowAccumulator::new(config.accumulator.clone()),
            animator,
            selected,
            position: selected as f64,
            activity: Activity::Idle,
            gesture_serial: 0,
            disabled: None,
            formatter: None,
            listener: None,
            lock,
            column,
            config,
        })
    }

    /// Install a disabled predicate at construction time.
    ///
    /// If the initial value is disabled the selection moves to the nearest
    /// enabled option (forward first) without animation or change event.
    #[must_use]
    pub fn with_disabled(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.disabled = Some(Box::new(predicate));
        let resolution = self.resolver().resolve(self.selected, Direction::Forward);
        if let Resolution::Redirected { index, .. } = resolution {
            self.place(index);
            self.position = self.selected as f64;
        }
        self
    }

    /// Set the label formatter used by [`formatted_value`](Self::formatted_value)
    /// and [`visible_rows`](Self::visible_rows).
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Fn(&T) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Join an externally shared lock domain.
    #[must_use]
    pub fn with_lock(mut self, lock: ColumnLock) -> Self {
        self.column = lock.register();
        self.lock = lock;
        self
    }

    /// Register the change listener.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&ValueChange<T>) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Committed option.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        self.space.option(self.selected)
    }

    /// Committed option, formatted.
    #[must_use]
    pub fn formatted_value(&self) -> String {
        self.format(self.value())
    }

    /// Committed raw index (always in the inner band).
    #[inline]
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Floating position, in rows.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// The option list and its tiling.
    #[inline]
    #[must_use]
    pub fn index_space(&self) -> &IndexSpace<T> {
        &self.space
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.activity {
            Activity::Idle => Phase::Idle,
            Activity::Gesturing(_) => Phase::Gesturing,
            Activity::Settling => Phase::Settling,
            Activity::Disposed => Phase::Disposed,
        }
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(self.activity, Activity::Disposed)
    }

    /// Serial of the gesture in flight, if any. Serials increase per gesture.
    #[must_use]
    pub fn gesture_serial(&self) -> Option<u64> {
        match self.activity {
            Activity::Gesturing(gesture) => Some(gesture.serial),
            _ => None,
        }
    }

    /// This column's id in its lock domain.
    #[inline]
    #[must_use]
    pub fn column_id(&self) -> ColumnId {
        self.column
    }

    /// Measured row height in pixels.
    #[inline]
    #[must_use]
    pub fn row_height_px(&self) -> f64 {
        self.row_height
    }

    /// Whether the committed option is disabled under the current predicate.
    #[must_use]
    pub fn is_value_disabled(&self) -> bool {
        self.resolver().is_disabled(self.selected)
    }

    /// Whether reduced motion is in effect.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.animator.reduced_motion()
    }

    /// Rows within `radius` of the current position, top to bottom.
    #[must_use]
    pub fn visible_rows(&self, radius: usize) -> Vec<VisibleRow<'_, T>> {
        let center = self.position.round() as isize;
        let radius = radius as isize;
        (center - radius..=center + radius)
            .map(|index| {
                let option = self.space.option_at(index);
                VisibleRow {
                    index,
                    option,
                    label: self.format(option),
                    offset_px: (index as f64 - self.position) * self.row_height,
                    selected: index == self.selected as isize,
                    disabled: self.disabled.as_ref().is_some_and(|p| p(option)),
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Dispatch any input event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Option<ValueChange<T>> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Scroll(scroll) => self.handle_scroll(scroll, now),
            Event::Touch(touch) => self.handle_touch(touch, now),
            Event::Focus(false) => self.handle_focus_lost(now),
            Event::Focus(true) => None,
        }
    }

    /// Arrow keys step one row; PageUp/PageDown step `page_step` rows.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> Option<ValueChange<T>> {
        if !event.is_actionable() {
            return None;
        }
        let direction = Direction::from_key(event.code)?;
        let count = match event.code {
            KeyCode::PageUp | KeyCode::PageDown => self.config.page_step,
            _ => 1,
        };
        self.step(direction, count, now)
    }

    /// Feed a wheel or trackpad delta. Commits happen in [`tick`](Self::tick).
    pub fn handle_scroll(&mut self, event: &ScrollEvent, now: Instant) -> Option<ValueChange<T>> {
        if self.is_disposed() {
            return None;
        }
        let delta = self.classifier.classify_scroll(event, self.row_height)?;
        self.feed(delta, now, false)
    }

    /// Feed a touch drag. Lifting the finger settles immediately.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: Instant) -> Option<ValueChange<T>> {
        if self.is_disposed() {
            return None;
        }
        match event.phase {
            TouchPhase::Start => {
                let grab = ClassifiedDelta {
                    mode: InputMode::Continuous,
                    rows: 0.0,
                };
                self.feed(grab, now, true)
            }
            TouchPhase::Move => {
                let delta = self.classifier.classify_touch(event, self.row_height)?;
                self.feed(delta, now, true)
            }
            TouchPhase::End => self.settle(now),
            TouchPhase::Cancel => self.handle_focus_lost(now),
        }
    }

    /// Settle right away and give up the lock without a grace period.
    pub fn handle_focus_lost(&mut self, now: Instant) -> Option<ValueChange<T>> {
        if self.is_disposed() {
            return None;
        }
        let change = self.settle(now);
        self.lock.force_release(self.column, now);
        change
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Take up to `count` single-row steps, stopping at the first blocked one.
    ///
    /// Cancels any gesture or transition in flight. A step that moves snaps
    /// onto the new value; a step blocked right away bounces.
    pub fn step(&mut self, direction: Direction, count: usize, now: Instant) -> Option<ValueChange<T>> {
        if self.is_disposed() || count == 0 {
            return None;
        }
        self.interrupt();

        let previous = self.logical();
        let mut taken = 0;
        while taken < count {
            let check = self.resolver().try_step(self.selected, direction);
            match check {
                StepCheck::Allowed(next) => self.place(next),
                StepCheck::Blocked => break,
            }
            taken += 1;
        }

        let config = self.animator.effective_config();
        let transition = if taken > 0 {
            Transition::snap(self.position, self.selected as f64, &config)
        } else {
            self.log_bounce(direction);
            Transition::bounce(self.position, direction, self.selected as f64, &config)
        };
        let change = self.commit(previous, ChangeCause::Step);
        self.enter_settling(transition, now);
        change
    }

    /// Jump to `value` without animation.
    ///
    /// Picks the representation closest to the current position. Does not
    /// consult the disabled predicate. Unknown values are ignored.
    pub fn set_value(&mut self, value: &T) -> Option<ValueChange<T>> {
        if self.is_disposed() {
            return None;
        }
        let logical = self.space.logical_of(value)?;
        self.interrupt();
        let previous = self.logical();
        self.selected = self.space.nearest_representation(logical, self.position);
        self.position = self.selected as f64;
        self.commit(previous, ChangeCause::Programmatic)
    }

    /// Replace the disabled predicate.
    ///
    /// If the committed value becomes disabled, the selection moves to the
    /// nearest enabled option (forward first) with a nudge. With nothing
    /// enabled the wheel bounces in place.
    pub fn set_disabled_checker(
        &mut self,
        predicate: impl Fn(&T) -> bool + 'static,
        now: Instant,
    ) -> Option<ValueChange<T>> {
        if self.is_disposed() {
            return None;
        }
        self.disabled = Some(Box::new(predicate));

        let resolution = self.resolver().resolve(self.selected, Direction::Forward);
        match resolution {
            Resolution::Valid(_) => None,
            Resolution::Redirected { index, direction } => {
                self.interrupt();
                let previous = self.logical();
                self.place(index);
                let config = self.animator.effective_config();
                let transition = Transition::nudge_then_settle(
                    self.position,
                    direction,
                    self.selected as f64,
                    &config,
                );
                let change = self.commit(previous, ChangeCause::Constraint);
                self.enter_settling(transition, now);
                change
            }
            Resolution::Exhausted => {
                self.interrupt();
                self.log_bounce(Direction::Forward);
                let config = self.animator.effective_config();
                let transition = Transition::bounce(
                    self.position,
                    Direction::Forward,
                    self.selected as f64,
                    &config,
                );
                self.enter_settling(transition, now);
                None
            }
        }
    }

    /// Toggle reduced motion. Enabling it completes a running transition.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        if self.is_disposed() {
            return;
        }
        self.animator.set_reduced_motion(enabled);
        if self.animator.reduced_motion() && matches!(self.activity, Activity::Settling) {
            self.animator.cancel();
            self.finish_settling();
        }
    }

    /// Re-read the row height after a layout change.
    ///
    /// # Errors
    ///
    /// Returns the measurement error and keeps the previous height.
    pub fn remeasure(&mut self, provider: &(impl MetricsProvider + ?Sized)) -> Result<()> {
        self.row_height = metrics::measure(provider)?;
        Ok(())
    }

    /// Advance one animation frame.
    pub fn tick(&mut self, now: Instant) -> Option<ValueChange<T>> {
        match self.activity {
            Activity::Idle | Activity::Disposed => None,
            Activity::Gesturing(gesture) => {
                let change = match gesture.mode {
                    InputMode::Discrete => self.discrete_frame(now),
                    InputMode::Continuous => {
                        self.continuous_frame();
                        None
                    }
                };
                self.accumulator.end_frame();
                let idle = now >= gesture.idle_deadline
                    && !gesture.touching
                    && !self.accumulator.has_step();
                if idle {
                    return self.settle(now).or(change);
                }
                change
            }
            Activity::Settling => {
                match self.animator.sample(now) {
                    Some(frame) if !frame.finished => self.position = frame.value,
                    _ => self.finish_settling(),
                }
                None
            }
        }
    }

    /// Tear the wheel down. Idempotent.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.animator.cancel();
        self.accumulator.clear();
        self.lock.relinquish(self.column);
        self.listener = None;
        self.position = self.selected as f64;
        self.activity = Activity::Disposed;
        #[cfg(feature = "tracing")]
        debug!(message = "wheel.dispose", column = self.column.get());
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn resolver(&self) -> Resolver<'_, T> {
        let disabled: Option<&dyn Fn(&T) -> bool> = self.disabled.as_deref();
        Resolver::new(&self.space, disabled)
    }

    fn format(&self, option: &T) -> String {
        match &self.formatter {
            Some(formatter) => formatter(option),
            None => format!("{option:?}"),
        }
    }

    #[inline]
    fn logical(&self) -> usize {
        self.space.to_logical(self.selected)
    }

    /// Select raw index `raw`, wrapping the position along with it.
    fn place(&mut self, raw: usize) {
        let (index, shift) = self.space.normalize(raw as isize);
        self.selected = index;
        self.position += shift as f64;
    }

    fn commit(&mut self, previous: usize, cause: ChangeCause) -> Option<ValueChange<T>> {
        if self.logical() == previous {
            return None;
        }
        let change = ValueChange {
            previous: self.space.options()[previous].clone(),
            value: self.value().clone(),
            cause,
        };
        #[cfg(feature = "tracing")]
        debug!(
            message = "wheel.commit",
            column = self.column.get(),
            previous = ?change.previous,
            value = ?change.value,
            cause = ?cause
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(&change);
        }
        Some(change)
    }

    fn feed(&mut self, delta: ClassifiedDelta, now: Instant, touching: bool) -> Option<ValueChange<T>> {
        if !self.lock.request(self.column, now) {
            #[cfg(feature = "tracing")]
            debug!(
                message = "wheel.lock_denied",
                column = self.column.get(),
                holder = self.lock.holder(now).map(ColumnId::get)
            );
            return None;
        }

        let mut change = None;
        let gesture = match self.activity {
            Activity::Gesturing(gesture) if gesture.mode == delta.mode => gesture,
            Activity::Gesturing(_) => {
                // Device switched mid-gesture: settle, then start over.
                change = self.settle(now);
                self.lock.request(self.column, now);
                self.begin_gesture(delta.mode, now)
            }
            _ => self.begin_gesture(delta.mode, now),
        };

        self.accumulator.push(delta.rows);
        self.activity = Activity::Gesturing(Gesture {
            last_direction: Direction::of(delta.rows).or(gesture.last_direction),
            idle_deadline: now + self.config.idle_settle,
            touching: touching || gesture.touching,
            ..gesture
        });
        change
    }

    fn begin_gesture(&mut self, mode: InputMode, now: Instant) -> Gesture {
        self.animator.cancel();
        self.accumulator.clear();
        self.gesture_serial += 1;
        #[cfg(feature = "tracing")]
        trace!(
            message = "wheel.gesture_start",
            column = self.column.get(),
            serial = self.gesture_serial,
            mode = ?mode
        );
        Gesture {
            serial: self.gesture_serial,
            mode,
            last_direction: None,
            idle_deadline: now + self.config.idle_settle,
            touching: false,
        }
    }

    fn discrete_frame(&mut self, now: Instant) -> Option<ValueChange<T>> {
        let mut change = None;
        if let Some(direction) = self.accumulator.take_step() {
            let check = self.resolver().try_step(self.selected, direction);
            match check {
                StepCheck::Allowed(next) => {
                    let previous = self.logical();
                    self.animator.cancel();
                    self.place(next);
                    change = self.commit(previous, ChangeCause::Step);
                }
                StepCheck::Blocked => {
                    self.accumulator.drain_direction(direction);
                    self.log_bounce(direction);
                    let config = self.animator.effective_config();
                    let transition =
                        Transition::bounce(self.position, direction, self.selected as f64, &config);
                    if !transition.is_instant() {
                        self.animator.start(transition, now);
                    }
                }
            }
        }

        self.position = match self.animator.sample(now) {
            Some(frame) => frame.value,
            None => self.selected as f64 + self.accumulator.residual(),
        };
        change
    }

    fn continuous_frame(&mut self) {
        let rows = self.accumulator.take_continuous();
        if rows == 0.0 {
            return;
        }
        self.position += rows;
        self.track(self.logical());
    }

    /// Select the representation of `logical` nearest the floating position,
    /// re-basing both by the same shift so they stay within half a tile.
    fn track(&mut self, logical: usize) {
        let raw = self.space.nearest_raw(logical, self.position);
        let (index, shift) = self.space.normalize(raw);
        self.selected = index;
        self.position += shift as f64;
    }

    /// Resolve the gesture in flight. No-op outside `Gesturing`.
    fn settle(&mut self, now: Instant) -> Option<ValueChange<T>> {
        let Activity::Gesturing(gesture) = self.activity else {
            return None;
        };
        self.lock.release(self.column, now);
        let config = self.animator.effective_config();
        let mut change = None;

        let transition = match gesture.mode {
            InputMode::Discrete => {
                self.accumulator.clear();
                self.animator.cancel();
                Transition::snap(self.position, self.selected as f64, &config)
            }
            InputMode::Continuous => {
                self.continuous_frame();
                self.accumulator.clear();

                let rounded = self.position.round();
                let hint = gesture
                    .last_direction
                    .or_else(|| Direction::of(rounded - self.position))
                    .unwrap_or(Direction::Forward);
                let (landing, shift) = self.space.normalize(rounded as isize);
                self.position += shift as f64;

                let previous = self.logical();
                let resolution = self.resolver().resolve(landing, hint);
                match resolution {
                    Resolution::Valid(index) => {
                        self.place(index);
                        change = self.commit(previous, ChangeCause::Settle);
                        Transition::snap(self.position, self.selected as f64, &config)
                    }
                    Resolution::Redirected { index, .. } => {
                        self.place(index);
                        change = self.commit(previous, ChangeCause::Settle);
                        Transition::nudge_then_settle(
                            self.position,
                            hint,
                            self.selected as f64,
                            &config,
                        )
                    }
                    Resolution::Exhausted => {
                        self.track(previous);
                        self.log_bounce(hint);
                        Transition::bounce(self.position, hint, self.selected as f64, &config)
                    }
                }
            }
        };

        #[cfg(feature = "tracing")]
        debug!(
            message = "wheel.settle",
            column = self.column.get(),
            serial = gesture.serial,
            mode = ?gesture.mode,
            transition = ?transition.kind(),
            selected = self.selected
        );
        self.enter_settling(transition, now);
        change
    }

    fn enter_settling(&mut self, transition: Transition, now: Instant) {
        if transition.is_instant() {
            self.animator.cancel();
            self.finish_settling();
        } else {
            self.animator.start(transition, now);
            self.activity = Activity::Settling;
        }
    }

    fn finish_settling(&mut self) {
        self.position = self.selected as f64;
        self.activity = Activity::Idle;
    }

    /// Abort any gesture or transition and give up the lock.
    fn interrupt(&mut self) {
        self.accumulator.clear();
        self.animator.cancel();
        self.lock.relinquish(self.column);
        self.activity = Activity::Idle;
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_bounce(&self, direction: Direction) {
        #[cfg(feature = "tracing")]
        debug!(
            message = "wheel.bounce",
            column = self.column.get(),
            direction = ?direction,
            selected = self.selected
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use kinetic_core::event::{KeyEventKind, Modifiers};

    use super::*;
    use crate::metrics::FixedRowHeight;

    const ROW: f64 = 40.0;
    const FRAME: Duration = Duration::from_millis(16);
    const LONG: Duration = Duration::from_secs(1);

    fn hours(initial: u8) -> Wheel<u8> {
        Wheel::new(
            (1..=12).collect(),
            &initial,
            &FixedRowHeight(ROW),
            WheelConfig::default(),
        )
        .unwrap()
    }

    /// Feed `events` continuous pixel deltas one frame apart; returns the last input time.
    fn drag(wheel: &mut Wheel<u8>, start: Instant, events: usize, px: f64) -> Instant {
        let mut now = start;
        for i in 0..events {
            now = start + FRAME * i as u32;
            wheel.handle_scroll(&ScrollEvent::pixels(px), now);
            assert_eq!(wheel.tick(now), None);
        }
        now
    }

    fn recorder(wheel: Wheel<u8>) -> (Wheel<u8>, Rc<RefCell<Vec<ValueChange<u8>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let wheel = wheel.on_change(move |change| sink.borrow_mut().push(change.clone()));
        (wheel, log)
    }

    // --- construction ---

    #[test]
    fn starts_on_initial_in_middle_tile() {
        let wheel = hours(1);
        assert_eq!(*wheel.value(), 1);
        assert_eq!(wheel.selected_index(), 36);
        assert_eq!(wheel.position(), 36.0);
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn unknown_initial_is_rejected() {
        let err = Wheel::new(vec![1u8, 2], &9, &FixedRowHeight(ROW), WheelConfig::default())
            .unwrap_err();
        assert_eq!(err, WheelError::InitialValueNotFound);
    }

    #[test]
    fn metrics_are_required() {
        let unmeasured = || -> Option<f64> { None };
        let err = Wheel::new(vec![1u8, 2], &1, &unmeasured, WheelConfig::default()).unwrap_err();
        assert_eq!(err, WheelError::MetricsUnavailable);
    }

    #[test]
    fn with_disabled_moves_off_disabled_initial_silently() {
        let (wheel, log) = recorder(hours(3));
        let wheel = wheel.with_disabled(|h| *h == 3);
        assert_eq!(*wheel.value(), 4);
        assert!(log.borrow().is_empty());
    }

    // --- discrete ---

    #[test]
    fn step_round_trips() {
        let mut wheel = hours(5);
        let t = Instant::now();
        let forward = wheel.step(Direction::Forward, 1, t).unwrap();
        assert_eq!((forward.previous, forward.value), (5, 6));
        assert_eq!(forward.cause, ChangeCause::Step);
        let back = wheel.step(Direction::Backward, 1, t).unwrap();
        assert_eq!(back.value, 5);
    }

    #[test]
    fn step_wraps_seamlessly() {
        let mut wheel = hours(12);
        let change = wheel.step(Direction::Forward, 1, Instant::now()).unwrap();
        assert_eq!(change.value, 1);
        assert!(wheel.index_space().in_inner_band(wheel.selected_index()));
    }

    #[test]
    fn blocked_step_bounces_without_commit() {
        let mut wheel = hours(1).with_disabled(|h| *h == 2);
        let t = Instant::now();
        assert_eq!(wheel.step(Direction::Forward, 1, t), None);
        assert_eq!(wheel.phase(), Phase::Settling);
        assert_eq!(*wheel.value(), 1);

        wheel.tick(t + LONG);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.position(), 36.0);
    }

    #[test]
    fn multi_step_stops_before_disabled() {
        let mut wheel = hours(1).with_disabled(|h| *h == 4);
        let change = wheel.step(Direction::Forward, 5, Instant::now()).unwrap();
        assert_eq!((change.previous, change.value), (1, 3));
    }

    #[test]
    fn page_keys_step_by_page() {
        let mut wheel = hours(1);
        let t = Instant::now();
        let change = wheel.handle_key(&KeyEvent::new(KeyCode::PageDown), t).unwrap();
        assert_eq!(change.value, 6);
        let change = wheel.handle_key(&KeyEvent::new(KeyCode::Up), t).unwrap();
        assert_eq!(change.value, 5);
        let release = KeyEvent::new(KeyCode::Up).with_kind(KeyEventKind::Release);
        assert_eq!(wheel.handle_key(&release, t), None);
        assert_eq!(wheel.handle_key(&KeyEvent::new(KeyCode::Other), t), None);
    }

    #[test]
    fn notched_scroll_commits_one_row_per_frame() {
        let mut wheel = hours(1);
        let t = Instant::now();
        // 120px at 40px rows: a three-row discrete burst.
        wheel.handle_scroll(&ScrollEvent::pixels(120.0), t);
        assert_eq!(wheel.phase(), Phase::Gesturing);

        for (frame, expected) in [2u8, 3, 4].into_iter().enumerate() {
            let change = wheel.tick(t + FRAME * frame as u32).unwrap();
            assert_eq!(change.value, expected);
            assert_eq!(change.cause, ChangeCause::Step);
        }
        assert_eq!(wheel.tick(t + FRAME * 3), None);
    }

    #[test]
    fn notched_scroll_into_disabled_bounces_and_drains() {
        let mut wheel = hours(1).with_disabled(|h| *h == 3);
        let t = Instant::now();
        wheel.handle_scroll(&ScrollEvent::pixels(120.0), t);
        assert_eq!(wheel.tick(t).map(|c| c.value), Some(2));
        assert_eq!(wheel.tick(t + FRAME), None);
        assert_eq!(wheel.tick(t + FRAME * 2), None);
        assert_eq!(*wheel.value(), 2);
    }

    #[test]
    fn line_tick_is_a_full_step() {
        let mut wheel = hours(1);
        let t = Instant::now();
        wheel.handle_scroll(&ScrollEvent::lines(-1.0), t);
        assert_eq!(wheel.tick(t).map(|c| c.value), Some(12));
    }

    // --- continuous ---

    #[test]
    fn continuous_drag_commits_only_at_settle() {
        let (wheel, log) = recorder(hours(1));
        let mut wheel = wheel;
        let t = Instant::now();
        // 8 x 10px = 80px = two rows.
        let last = drag(&mut wheel, t, 8, 10.0);
        assert_eq!(*wheel.value(), 1);
        assert!((wheel.position() - 38.0).abs() < 1e-9);
        assert!(log.borrow().is_empty());

        let change = wheel.tick(last + LONG).unwrap();
        assert_eq!((change.previous, change.value), (1, 3));
        assert_eq!(change.cause, ChangeCause::Settle);
        assert_eq!(log.borrow().len(), 1);

        wheel.tick(last + LONG * 2);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.position(), wheel.selected_index() as f64);
    }

    #[test]
    fn continuous_settle_redirects_off_disabled_landing() {
        let mut wheel = hours(1).with_disabled(|h| *h == 3);
        let t = Instant::now();
        let last = drag(&mut wheel, t, 8, 10.0);
        let change = wheel.tick(last + LONG).unwrap();
        assert_eq!(change.value, 4);
        assert!(!wheel.is_value_disabled());
    }

    #[test]
    fn continuous_settle_rounds_to_nearest_row() {
        let mut wheel = hours(1);
        let t = Instant::now();
        // 0.25 rows x 3 = 0.75 rows: rounds up to the next option.
        let last = drag(&mut wheel, t, 3, 10.0);
        assert_eq!(wheel.tick(last + LONG).map(|c| c.value), Some(2));
    }

    #[test]
    fn fully_disabled_list_bounces_in_place() {
        let mut wheel = hours(1).with_disabled(|_| true);
        let t = Instant::now();
        let last = drag(&mut wheel, t, 8, 10.0);
        assert_eq!(wheel.tick(last + LONG), None);
        assert_eq!(*wheel.value(), 1);
        wheel.tick(last + LONG * 2);
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn drag_past_band_edge_keeps_position_beside_selection() {
        let mut wheel = hours(12).with_disabled(|_| true);
        let t = Instant::now();
        let gap = |w: &Wheel<u8>| (w.position() - w.selected_index() as f64).abs();

        // 141 x 0.25 rows + 0.15 rows = 35.4 rows back from raw 47: the
        // position ends half a row below the inner band.
        let mut now = t;
        for i in 0..141 {
            now = t + FRAME * i;
            wheel.handle_scroll(&ScrollEvent::pixels(-10.0), now);
            wheel.tick(now);
            assert!(gap(&wheel) <= 6.0, "gap {} at frame {i}", gap(&wheel));
        }
        now += FRAME;
        wheel.handle_scroll(&ScrollEvent::pixels(-6.0), now);
        wheel.tick(now);
        assert!(wheel.index_space().in_inner_band(wheel.selected_index()));
        assert!(gap(&wheel) < 1.0, "gap {}", gap(&wheel));

        let settled = now + LONG;
        assert_eq!(wheel.tick(settled), None);
        assert_eq!(wheel.phase(), Phase::Settling);
        for k in 0..60 {
            wheel.tick(settled + FRAME * k);
            assert!(gap(&wheel) < 1.0, "bounce gap {} at frame {k}", gap(&wheel));
        }
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(*wheel.value(), 12);
    }

    #[test]
    fn long_drag_wraps_without_changing_value() {
        let mut wheel = hours(1);
        let t = Instant::now();
        // 12 rows per 48 events; drag 5 full cycles backwards.
        drag(&mut wheel, t, 240, -10.0);
        assert_eq!(*wheel.value(), 1);
        assert!(wheel.index_space().in_inner_band(wheel.selected_index()));
        assert!((wheel.position() - wheel.selected_index() as f64).abs() <= 6.0);
    }

    #[test]
    fn touch_release_settles_immediately() {
        let mut wheel = hours(1);
        let t = Instant::now();
        wheel.handle_touch(&TouchEvent::new(TouchPhase::Start, 0.0), t);
        assert_eq!(wheel.phase(), Phase::Gesturing);
        let serial = wheel.gesture_serial();
        assert!(serial.is_some());
        wheel.handle_touch(&TouchEvent::new(TouchPhase::Move, 2.0 * ROW), t);
        // A held finger never idles out.
        assert_eq!(wheel.tick(t + LONG), None);
        assert_eq!(wheel.gesture_serial(), serial);

        let change = wheel.handle_touch(&TouchEvent::new(TouchPhase::End, 0.0), t + LONG);
        assert_eq!(change.map(|c| c.value), Some(3));
    }

    #[test]
    fn zoom_scroll_is_ignored() {
        let mut wheel = hours(1);
        let event = ScrollEvent::lines(1.0).with_modifiers(Modifiers::CTRL);
        assert_eq!(wheel.handle_scroll(&event, Instant::now()), None);
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    // --- lock ---

    #[test]
    fn sibling_input_is_dropped_while_lock_held() {
        let lock = ColumnLock::default();
        let mut a = hours(1).with_lock(lock.clone());
        let mut b = hours(1).with_lock(lock.clone());
        let t = Instant::now();

        a.handle_scroll(&ScrollEvent::lines(1.0), t);
        b.handle_scroll(&ScrollEvent::lines(1.0), t);
        assert_eq!(b.phase(), Phase::Idle);
        assert_eq!(lock.holder(t), Some(a.column_id()));

        // a commits and settles at t+200ms; the lock frees 150ms later.
        let settle_at = t + Duration::from_millis(200);
        assert_eq!(a.tick(settle_at).map(|c| c.value), Some(2));
        b.handle_scroll(&ScrollEvent::lines(1.0), settle_at + Duration::from_millis(50));
        assert_eq!(b.phase(), Phase::Idle);
        b.handle_scroll(&ScrollEvent::lines(1.0), settle_at + Duration::from_millis(200));
        assert_eq!(b.phase(), Phase::Gesturing);
    }

    #[test]
    fn focus_lost_settles_and_force_releases() {
        let lock = ColumnLock::default();
        let mut wheel = hours(1).with_lock(lock.clone());
        let t = Instant::now();
        let last = drag(&mut wheel, t, 8, 10.0);
        let change = wheel.handle_event(&Event::Focus(false), last);
        assert_eq!(change.map(|c| c.value), Some(3));
        assert_eq!(lock.holder(last), None);
    }

    #[test]
    fn step_force_releases_the_lock() {
        let lock = ColumnLock::default();
        let mut wheel = hours(1).with_lock(lock.clone());
        let t = Instant::now();
        wheel.handle_scroll(&ScrollEvent::pixels(5.0), t);
        assert!(lock.holder(t).is_some());
        wheel.step(Direction::Forward, 1, t);
        assert_eq!(lock.holder(t), None);
    }

    // --- commands ---

    #[test]
    fn set_value_jumps_without_animation() {
        let mut wheel = hours(1);
        let change = wheel.set_value(&7).unwrap();
        assert_eq!((change.previous, change.value), (1, 7));
        assert_eq!(change.cause, ChangeCause::Programmatic);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.position(), wheel.selected_index() as f64);
        assert_eq!(wheel.set_value(&7), None);
        assert_eq!(wheel.set_value(&13), None);
    }

    #[test]
    fn set_disabled_checker_prefers_forward() {
        let mut wheel = hours(7);
        let t = Instant::now();
        let change = wheel.set_disabled_checker(|h| *h == 7, t).unwrap();
        assert_eq!(change.value, 8);
        assert_eq!(change.cause, ChangeCause::Constraint);
    }

    #[test]
    fn set_disabled_checker_falls_back_backward() {
        let mut wheel = hours(7);
        let change = wheel
            .set_disabled_checker(|h| matches!(*h, 7 | 8), Instant::now())
            .unwrap();
        assert_eq!(change.value, 6);
    }

    #[test]
    fn set_disabled_checker_keeps_enabled_value() {
        let mut wheel = hours(7);
        assert_eq!(wheel.set_disabled_checker(|h| *h == 3, Instant::now()), None);
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn set_disabled_checker_with_nothing_enabled_bounces() {
        let mut wheel = hours(7);
        assert_eq!(wheel.set_disabled_checker(|_| true, Instant::now()), None);
        assert_eq!(*wheel.value(), 7);
        assert_eq!(wheel.phase(), Phase::Settling);
    }

    #[test]
    fn reduced_motion_step_is_synchronous() {
        let mut wheel = Wheel::new(
            (1..=12).collect::<Vec<u8>>(),
            &1,
            &FixedRowHeight(ROW),
            WheelConfig::default().reduced_motion(true),
        )
        .unwrap();
        let change = wheel.step(Direction::Forward, 1, Instant::now()).unwrap();
        assert_eq!(change.value, 2);
        assert_eq!(*wheel.value(), 2);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.position(), wheel.selected_index() as f64);
    }

    #[test]
    fn enabling_reduced_motion_finishes_transition() {
        let mut wheel = hours(1);
        wheel.step(Direction::Forward, 1, Instant::now());
        assert_eq!(wheel.phase(), Phase::Settling);
        wheel.set_reduced_motion(true);
        assert_eq!(wheel.phase(), Phase::Idle);
        assert!(wheel.reduced_motion());
    }

    #[test]
    fn dispose_is_idempotent_and_silences_everything() {
        let (wheel, log) = recorder(hours(1));
        let mut wheel = wheel;
        let t = Instant::now();
        drag(&mut wheel, t, 8, 10.0);
        wheel.dispose();
        wheel.dispose();
        assert_eq!(wheel.phase(), Phase::Disposed);
        assert_eq!(wheel.tick(t + LONG), None);
        assert_eq!(wheel.step(Direction::Forward, 1, t), None);
        assert_eq!(wheel.set_value(&5), None);
        assert_eq!(wheel.handle_scroll(&ScrollEvent::lines(1.0), t), None);
        assert!(log.borrow().is_empty());
        assert_eq!(*wheel.value(), 1);
    }

    #[test]
    fn remeasure_updates_row_height() {
        let mut wheel = hours(1);
        wheel.remeasure(&FixedRowHeight(32.0)).unwrap();
        assert_eq!(wheel.row_height_px(), 32.0);
        assert!(wheel.remeasure(&FixedRowHeight(0.0)).is_err());
        assert_eq!(wheel.row_height_px(), 32.0);
    }

    // --- rendering ---

    #[test]
    fn visible_rows_window() {
        let wheel = hours(1)
            .with_disabled(|h| *h == 12)
            .with_formatter(|h| format!("{h:02}"));
        let rows = wheel.visible_rows(2);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["11", "12", "01", "02", "03"]);
        let offsets: Vec<f64> = rows.iter().map(|r| r.offset_px).collect();
        assert_eq!(offsets, [-80.0, -40.0, 0.0, 40.0, 80.0]);
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
        assert!(rows[1].disabled);
        assert_eq!(wheel.formatted_value(), "01");
    }
}

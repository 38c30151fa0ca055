#![forbid(unsafe_code)]

//! Time picker: hour, minute and optional meridiem wheels sharing one lock.
//!
//! The picker owns two or three [`Wheel`]s and keeps them consistent with a
//! caller-supplied rule `is_minute_disabled(&TimeValue) -> bool`:
//!
//! - the minute wheel's predicate is rebuilt whenever the hour or meridiem
//!   commits, which moves the minute off a value that just became disabled;
//! - the hour wheel's predicate marks an hour disabled when *every* minute of
//!   it is disabled, so the picker never rests on an impossible time. It is
//!   rebuilt when the meridiem commits.
//!
//! # Meridiem Modes
//!
//! | Mode | Meridiem column | Hours | `value().meridiem` |
//! |------|-----------------|-------|--------------------|
//! | `Cyclic` | AM/PM wheel | 1–12 | `Some(..)` |
//! | `Fixed(m)` | none (constant label) | 1–12 | `Some(m)` |
//! | `Hidden` | none | 0–23 | `None` |
//!
//! # Invariants
//!
//! 1. The composite listener fires once per change of the combined value.
//! 2. Columns only affect each other through `set_disabled_checker`.
//! 3. After `dispose` every child wheel is disposed and nothing fires.

use std::fmt;
use std::rc::Rc;

use kinetic_core::event::{Event, KeyEvent, ScrollEvent, TouchEvent};
use kinetic_core::lock::ColumnLock;
use web_time::Instant;

// Logging macros; call sites are compiled out without the `tracing` feature.
#[cfg(feature = "tracing")]
use kinetic_core::logging::debug;

use crate::error::{Result, WheelError};
use crate::metrics::MetricsProvider;
use crate::wheel::{Wheel, WheelConfig};

// ============================================================================
// Values
// ============================================================================

/// Half of a 12-hour day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    /// The other half of the day.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the picker presents the half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeridiemMode {
    /// A third wheel cycling AM/PM.
    #[default]
    Cyclic,
    /// A constant, non-interactive label.
    Fixed(Meridiem),
    /// No meridiem at all: a 24-hour clock.
    Hidden,
}

impl MeridiemMode {
    /// Whether hours use the 12-hour range.
    #[must_use]
    pub const fn is_twelve_hour(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// A wall-clock time as shown by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeValue {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
}

impl TimeValue {
    #[must_use]
    pub const fn new(hour: u8, minute: u8, meridiem: Option<Meridiem>) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// 12-hour time.
    #[must_use]
    pub const fn twelve(hour: u8, minute: u8, meridiem: Meridiem) -> Self {
        Self::new(hour, minute, Some(meridiem))
    }

    /// 24-hour time.
    #[must_use]
    pub const fn twenty_four(hour: u8, minute: u8) -> Self {
        Self::new(hour, minute, None)
    }

    /// Minutes since midnight.
    #[must_use]
    pub fn minutes_since_midnight(&self) -> u16 {
        let hour = match self.meridiem {
            None => self.hour % 24,
            Some(Meridiem::Am) => self.hour % 12,
            Some(Meridiem::Pm) => self.hour % 12 + 12,
        };
        u16::from(hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.meridiem {
            Some(meridiem) => write!(f, "{}:{:02} {meridiem}", self.hour, self.minute),
            None => write!(f, "{:02}:{:02}", self.hour, self.minute),
        }
    }
}

/// One column of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Column {
    Hour,
    Minute,
    Meridiem,
}

// ============================================================================
// Configuration
// ============================================================================

/// Construction parameters for [`TimePicker`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimePickerConfig {
    /// Hour options. `None` means the whole clock (1–12 or 0–23).
    pub hours: Option<Vec<u8>>,
    /// Minute granularity; must divide 60 (default: 5).
    pub minute_step: u8,
    /// Meridiem presentation.
    pub meridiem: MeridiemMode,
    /// Starting value. `None` means the first hour at minute zero.
    pub initial: Option<TimeValue>,
    /// Configuration shared by every column.
    pub wheel: WheelConfig,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            hours: None,
            minute_step: 5,
            meridiem: MeridiemMode::Cyclic,
            initial: None,
            wheel: WheelConfig::default(),
        }
    }
}

impl TimePickerConfig {
    /// Restrict the hour options.
    #[must_use]
    pub fn hours(mut self, hours: impl IntoIterator<Item = u8>) -> Self {
        self.hours = Some(hours.into_iter().collect());
        self
    }

    /// Set the minute step.
    #[must_use]
    pub fn minute_step(mut self, step: u8) -> Self {
        self.minute_step = step;
        self
    }

    /// Set the meridiem mode.
    #[must_use]
    pub fn meridiem(mut self, mode: MeridiemMode) -> Self {
        self.meridiem = mode;
        self
    }

    /// Set the starting value.
    #[must_use]
    pub fn initial(mut self, value: TimeValue) -> Self {
        self.initial = Some(value);
        self
    }

    /// Set the per-column wheel configuration.
    #[must_use]
    pub fn wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }

    /// Bring `value` onto this picker's grid.
    ///
    /// 12-hour modes wrap the hour into 1–12 (hours above 12 imply PM) and a
    /// fixed meridiem overrides the given one. The 24-hour mode drops the
    /// meridiem. Minutes are floored to the step.
    #[must_use]
    pub fn normalize(&self, value: TimeValue) -> TimeValue {
        normalize(value, self.meridiem, self.minute_step)
    }

    fn validate(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let step = self.minute_step;
        if step == 0 || step > 60 || 60 % step != 0 {
            return Err(WheelError::InvalidMinuteStep { step });
        }
        let minutes = (0..60).step_by(usize::from(step)).collect();

        let range = if self.meridiem.is_twelve_hour() {
            1..=12
        } else {
            0..=23
        };
        let hours = match &self.hours {
            Some(hours) => hours.clone(),
            None => range.clone().collect(),
        };
        if hours.is_empty() {
            return Err(WheelError::EmptyHours);
        }
        if let Some(&hour) = hours.iter().find(|h| !range.contains(h)) {
            return Err(WheelError::InvalidHour { hour });
        }
        Ok((hours, minutes))
    }
}

fn normalize(value: TimeValue, mode: MeridiemMode, step: u8) -> TimeValue {
    let step = step.clamp(1, 60);
    let minute = value.minute.min(59) / step * step;
    if !mode.is_twelve_hour() {
        return TimeValue::twenty_four(value.hour % 24, minute);
    }

    let (hour, implied) = match value.hour % 24 {
        0 => (12, Meridiem::Am),
        h @ 1..=11 => (h, Meridiem::Am),
        12 => (12, Meridiem::Pm),
        h => (h - 12, Meridiem::Pm),
    };
    let meridiem = match mode {
        MeridiemMode::Fixed(fixed) => fixed,
        _ if value.hour > 12 => implied,
        _ => value.meridiem.unwrap_or(implied),
    };
    TimeValue::twelve(hour, minute, meridiem)
}

// ============================================================================
// Picker
// ============================================================================

type Rule = Rc<dyn Fn(&TimeValue) -> bool>;

/// Composite hour/minute/meridiem picker.
pub struct TimePicker {
    hour: Wheel<u8>,
    minute: Wheel<u8>,
    meridiem: Option<Wheel<Meridiem>>,
    mode: MeridiemMode,
    minute_step: u8,
    rule: Rule,
    lock: ColumnLock,
    snapshot: TimeValue,
    listener: Option<Box<dyn FnMut(&TimeValue)>>,
    start: Option<Box<dyn Fn(&TimeValue)>>,
    end: Option<Box<dyn Fn(&TimeValue)>>,
    disposed: bool,
}

impl fmt::Debug for TimePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimePicker")
            .field("value", &self.snapshot)
            .field("mode", &self.mode)
            .field("hour", &self.hour)
            .field("minute", &self.minute)
            .field("meridiem", &self.meridiem)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl TimePicker {
    /// Build a picker with its own column lock.
    ///
    /// # Errors
    ///
    /// Fails on an invalid minute step, an empty or out-of-range hour list,
    /// an initial hour that is not offered, or unusable row metrics.
    pub fn new(
        config: TimePickerConfig,
        provider: &(impl MetricsProvider + ?Sized),
        is_minute_disabled: impl Fn(&TimeValue) -> bool + 'static,
    ) -> Result<Self> {
        Self::with_lock(config, provider, is_minute_disabled, ColumnLock::default())
    }

    /// Build a picker whose columns join `lock`, so several pickers can
    /// exclude each other.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_lock(
        config: TimePickerConfig,
        provider: &(impl MetricsProvider + ?Sized),
        is_minute_disabled: impl Fn(&TimeValue) -> bool + 'static,
        lock: ColumnLock,
    ) -> Result<Self> {
        let (hours, minutes) = config.validate()?;
        let twelve_hour = config.meridiem.is_twelve_hour();
        let first = TimeValue::new(hours[0], 0, Some(Meridiem::Am));
        let initial = config.normalize(config.initial.unwrap_or(first));
        let rule: Rule = Rc::new(is_minute_disabled);

        let hour_label = move |h: &u8| {
            if twelve_hour {
                h.to_string()
            } else {
                format!("{h:02}")
            }
        };
        let hour = Wheel::new(hours, &initial.hour, provider, config.wheel.clone())?
            .with_lock(lock.clone())
            .with_formatter(hour_label);
        let minute = Wheel::new(minutes, &initial.minute, provider, config.wheel.clone())?
            .with_lock(lock.clone())
            .with_formatter(|m: &u8| format!("{m:02}"));
        let meridiem = match (config.meridiem, initial.meridiem) {
            (MeridiemMode::Cyclic, Some(current)) => Some(
                Wheel::new(
                    vec![Meridiem::Am, Meridiem::Pm],
                    &current,
                    provider,
                    config.wheel.clone(),
                )?
                .with_lock(lock.clone())
                .with_formatter(|m: &Meridiem| m.label().to_string()),
            ),
            _ => None,
        };

        let mut picker = Self {
            hour,
            minute,
            meridiem,
            mode: config.meridiem,
            minute_step: config.minute_step,
            rule,
            lock,
            snapshot: initial,
            listener: None,
            start: None,
            end: None,
            disposed: false,
        };

        // Initial resolution is silent: with_disabled moves without events.
        let hour_rule = picker.hour_rule();
        picker.hour = picker.hour.with_disabled(hour_rule);
        if picker.hour.is_value_disabled() {
            picker = picker.with_other_meridiem();
        }
        let minute_rule = picker.minute_rule();
        picker.minute = picker.minute.with_disabled(minute_rule);
        picker.snapshot = picker.value();

        #[cfg(feature = "tracing")]
        debug!(
            message = "time_picker.init",
            requested = %initial,
            value = %picker.snapshot,
            mode = ?picker.mode
        );
        Ok(picker)
    }

    /// Register the listener for combined value changes.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&TimeValue) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Register the "use as start" helper.
    #[must_use]
    pub fn on_start(mut self, callback: impl Fn(&TimeValue) + 'static) -> Self {
        self.start = Some(Box::new(callback));
        self
    }

    /// Register the "use as end" helper.
    #[must_use]
    pub fn on_end(mut self, callback: impl Fn(&TimeValue) + 'static) -> Self {
        self.end = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Combined committed value.
    #[must_use]
    pub fn value(&self) -> TimeValue {
        let meridiem = match self.mode {
            MeridiemMode::Cyclic => self.meridiem.as_ref().map(|w| *w.value()),
            MeridiemMode::Fixed(fixed) => Some(fixed),
            MeridiemMode::Hidden => None,
        };
        TimeValue::new(*self.hour.value(), *self.minute.value(), meridiem)
    }

    /// Meridiem presentation.
    #[must_use]
    pub fn meridiem_mode(&self) -> MeridiemMode {
        self.mode
    }

    /// Constant label shown instead of a meridiem wheel, if any.
    #[must_use]
    pub fn meridiem_label(&self) -> Option<&'static str> {
        match self.mode {
            MeridiemMode::Fixed(fixed) => Some(fixed.label()),
            _ => None,
        }
    }

    /// Interactive columns, left to right.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Hour, Column::Minute];
        if self.meridiem.is_some() {
            columns.push(Column::Meridiem);
        }
        columns
    }

    #[must_use]
    pub fn hour_wheel(&self) -> &Wheel<u8> {
        &self.hour
    }

    #[must_use]
    pub fn minute_wheel(&self) -> &Wheel<u8> {
        &self.minute
    }

    #[must_use]
    pub fn meridiem_wheel(&self) -> Option<&Wheel<Meridiem>> {
        self.meridiem.as_ref()
    }

    /// The lock shared by this picker's columns.
    #[must_use]
    pub fn lock(&self) -> &ColumnLock {
        &self.lock
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Route an event to one column. Returns the new combined value if it changed.
    pub fn handle_event(&mut self, column: Column, event: &Event, now: Instant) -> Option<TimeValue> {
        if self.disposed {
            return None;
        }
        let committed = match column {
            Column::Hour => self.hour.handle_event(event, now).is_some(),
            Column::Minute => self.minute.handle_event(event, now).is_some(),
            Column::Meridiem => self
                .meridiem
                .as_mut()
                .is_some_and(|w| w.handle_event(event, now).is_some()),
        };
        if committed {
            self.react(column, now);
        }
        self.publish()
    }

    pub fn handle_key(&mut self, column: Column, event: &KeyEvent, now: Instant) -> Option<TimeValue> {
        self.handle_event(column, &Event::Key(*event), now)
    }

    pub fn handle_scroll(
        &mut self,
        column: Column,
        event: &ScrollEvent,
        now: Instant,
    ) -> Option<TimeValue> {
        self.handle_event(column, &Event::Scroll(*event), now)
    }

    pub fn handle_touch(
        &mut self,
        column: Column,
        event: &TouchEvent,
        now: Instant,
    ) -> Option<TimeValue> {
        self.handle_event(column, &Event::Touch(*event), now)
    }

    /// Advance every column one frame.
    pub fn tick(&mut self, now: Instant) -> Option<TimeValue> {
        if self.disposed {
            return None;
        }
        if self.hour.tick(now).is_some() {
            self.react(Column::Hour, now);
        }
        if self
            .meridiem
            .as_mut()
            .is_some_and(|w| w.tick(now).is_some())
        {
            self.react(Column::Meridiem, now);
        }
        self.minute.tick(now);
        self.publish()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Jump to `value` (normalized), then re-apply constraints.
    pub fn set_value(&mut self, value: TimeValue, now: Instant) -> Option<TimeValue> {
        if self.disposed {
            return None;
        }
        let value = normalize(value, self.mode, self.minute_step);

        if let (Some(wheel), Some(meridiem)) = (self.meridiem.as_mut(), value.meridiem) {
            wheel.set_value(&meridiem);
        }
        self.hour.set_value(&value.hour);
        self.apply_hour_rule(now);
        self.minute.set_value(&value.minute);
        self.apply_minute_rule(now);
        self.publish()
    }

    /// Hand the current value to the start helper.
    pub fn press_start(&self) -> Option<TimeValue> {
        self.press(self.start.as_deref())
    }

    /// Hand the current value to the end helper.
    pub fn press_end(&self) -> Option<TimeValue> {
        self.press(self.end.as_deref())
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.hour.set_reduced_motion(enabled);
        self.minute.set_reduced_motion(enabled);
        if let Some(wheel) = self.meridiem.as_mut() {
            wheel.set_reduced_motion(enabled);
        }
    }

    /// Dispose every column. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.hour.dispose();
        self.minute.dispose();
        if let Some(wheel) = self.meridiem.as_mut() {
            wheel.dispose();
        }
        self.listener = None;
        self.start = None;
        self.end = None;
        self.disposed = true;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn current_meridiem(&self) -> Option<Meridiem> {
        self.value().meridiem
    }

    /// Every hour is closed under the current meridiem: switch to the other
    /// one, keeping the original when that is closed too. Construction only,
    /// so nothing is emitted.
    fn with_other_meridiem(mut self) -> Self {
        let Some(current) = self.meridiem.as_ref().map(|wheel| *wheel.value()) else {
            return self;
        };
        for meridiem in [current.opposite(), current] {
            if let Some(wheel) = self.meridiem.as_mut() {
                wheel.set_value(&meridiem);
            }
            let hour_rule = self.hour_rule();
            self.hour = self.hour.with_disabled(hour_rule);
            if !self.hour.is_value_disabled() {
                break;
            }
        }
        self
    }

    /// Hour predicate: every minute of the hour is disabled.
    fn hour_rule(&self) -> impl Fn(&u8) -> bool + 'static {
        let rule = Rc::clone(&self.rule);
        let minutes = self.minute.index_space().options().to_vec();
        let meridiem = self.current_meridiem();
        move |hour: &u8| {
            minutes
                .iter()
                .all(|&minute| rule(&TimeValue::new(*hour, minute, meridiem)))
        }
    }

    /// Minute predicate for the committed hour and meridiem.
    fn minute_rule(&self) -> impl Fn(&u8) -> bool + 'static {
        let rule = Rc::clone(&self.rule);
        let hour = *self.hour.value();
        let meridiem = self.current_meridiem();
        move |minute: &u8| rule(&TimeValue::new(hour, *minute, meridiem))
    }

    fn apply_hour_rule(&mut self, now: Instant) {
        let predicate = self.hour_rule();
        let _moved = self.hour.set_disabled_checker(predicate, now);
        #[cfg(feature = "tracing")]
        if let Some(change) = &_moved {
            debug!(
                message = "time_picker.constraint",
                column = "hour",
                previous = change.previous,
                value = change.value
            );
        }
    }

    fn apply_minute_rule(&mut self, now: Instant) {
        let predicate = self.minute_rule();
        let _moved = self.minute.set_disabled_checker(predicate, now);
        #[cfg(feature = "tracing")]
        if let Some(change) = &_moved {
            debug!(
                message = "time_picker.constraint",
                column = "minute",
                previous = change.previous,
                value = change.value
            );
        }
    }

    fn react(&mut self, committed: Column, now: Instant) {
        match committed {
            Column::Hour => self.apply_minute_rule(now),
            Column::Meridiem => {
                self.apply_hour_rule(now);
                self.apply_minute_rule(now);
            }
            Column::Minute => {}
        }
    }

    /// Refresh the snapshot; notify and return it if it changed.
    fn publish(&mut self) -> Option<TimeValue> {
        let value = self.value();
        if value == self.snapshot {
            return None;
        }
        self.snapshot = value;
        if let Some(listener) = self.listener.as_mut() {
            listener(&value);
        }
        Some(value)
    }

    fn press(&self, callback: Option<&dyn Fn(&TimeValue)>) -> Option<TimeValue> {
        if self.disposed {
            return None;
        }
        let value = self.value();
        if let Some(callback) = callback {
            callback(&value);
        }
        Some(value)
    }
}

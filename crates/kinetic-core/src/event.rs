#![forbid(unsafe_code)]

//! Canonical input event types for wheel columns.
//!
//! Hosts translate their platform events (DOM `wheel`/`keydown`/`touchmove`,
//! toolkit scroll callbacks, terminal mouse reports) into these types before
//! handing them to a wheel.
//!
//! # Design Notes
//!
//! - Vertical deltas are positive when the content should move to the *next*
//!   option (scrolling "down").
//! - `DeltaMode` mirrors the unit tag hosts attach to wheel deltas
//!   (pixels, lines, pages).
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A wheel or trackpad scroll event.
    Scroll(ScrollEvent),

    /// A touch drag event.
    Touch(TouchEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event should move a selection (press or auto-repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes a wheel column reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Any other key. Wheels ignore it.
    Other,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Unit of a scroll delta, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    /// Delta is in device-independent pixels (trackpads, high-res wheels).
    #[default]
    Pixel,
    /// Delta is in text lines (notched wheels on most platforms).
    Line,
    /// Delta is in pages.
    Page,
}

/// A wheel or trackpad scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Vertical delta, positive towards the next option.
    pub delta_y: f64,

    /// Unit of `delta_y`.
    pub mode: DeltaMode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl ScrollEvent {
    /// Create a scroll event with the given delta and unit.
    #[must_use]
    pub const fn new(delta_y: f64, mode: DeltaMode) -> Self {
        Self {
            delta_y,
            mode,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pixel-unit scroll event (the common trackpad case).
    #[must_use]
    pub const fn pixels(delta_y: f64) -> Self {
        Self::new(delta_y, DeltaMode::Pixel)
    }

    /// Line-unit scroll event (the common notched wheel case).
    #[must_use]
    pub const fn lines(delta_y: f64) -> Self {
        Self::new(delta_y, DeltaMode::Line)
    }

    /// Create a scroll event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether the host reserves this event for zooming.
    #[must_use]
    pub const fn is_zoom_gesture(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL.union(Modifiers::SUPER))
    }
}

/// Phase of a touch drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down.
    Start,
    /// Finger moved.
    Move,
    /// Finger lifted.
    End,
    /// The platform interrupted the touch (incoming call, system gesture).
    Cancel,
}

/// A touch drag event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Phase of the touch sequence.
    pub phase: TouchPhase,

    /// Vertical movement in pixels since the previous touch event,
    /// positive towards the next option.
    pub delta_y: f64,
}

impl TouchEvent {
    /// Create a touch event.
    #[must_use]
    pub const fn new(phase: TouchPhase, delta_y: f64) -> Self {
        Self { phase, delta_y }
    }
}

/// Direction of a single step through an option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards the previous option.
    Backward,
    /// Towards the next option.
    Forward,
}

impl Direction {
    /// Signed unit step: `-1` for backward, `+1` for forward.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> isize {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
        }
    }

    /// Direction of a signed quantity, `None` for zero (or NaN).
    #[must_use]
    pub fn of(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Forward)
        } else if value < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }

    /// Direction bound to a navigation key, if any.
    #[must_use]
    pub const fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::PageUp => Some(Self::Backward),
            KeyCode::Down | KeyCode::PageDown => Some(Self::Forward),
            KeyCode::Other => None,
        }
    }
}

#![forbid(unsafe_code)]

//! Observable wheel output: committed changes, lifecycle phase and the
//! visible row window.

/// Why a wheel's committed value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeCause {
    /// A discrete step (key press, notched wheel tick).
    Step,
    /// A continuous gesture came to rest.
    Settle,
    /// `set_value` from the host.
    Programmatic,
    /// A new disabled predicate moved the selection off a disabled value.
    Constraint,
}

/// One committed logical value change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueChange<T> {
    /// Value before the commit.
    pub previous: T,
    /// Value after the commit.
    pub value: T,
    /// What caused it.
    pub cause: ChangeCause,
}

/// Coarse lifecycle phase of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// At rest on the committed value.
    Idle,
    /// Input is arriving; the column lock is held.
    Gesturing,
    /// Playing a snap, nudge or bounce back onto the committed value.
    Settling,
    /// Torn down; every call is a no-op.
    Disposed,
}

/// One row of the render window around the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a, T> {
    /// Raw strip index of the row.
    pub index: isize,
    /// Option shown in the row.
    pub option: &'a T,
    /// Formatted label.
    pub label: String,
    /// Vertical offset from the wheel's center line, in pixels.
    pub offset_px: f64,
    /// Whether this row is the committed selection.
    pub selected: bool,
    /// Whether the option is currently disabled.
    pub disabled: bool,
}

#![forbid(unsafe_code)]

//! Kinetic public facade crate.
//!
//! Re-exports the types most hosts need from `kinetic-core` and
//! `kinetic-widgets`, plus a prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use kinetic_core::Instant;
pub use kinetic_core::accumulator::AccumulatorConfig;
pub use kinetic_core::animation::{AnimationConfig, Easing, TransitionKind};
pub use kinetic_core::event::{
    DeltaMode, Direction, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, ScrollEvent,
    TouchEvent, TouchPhase,
};
pub use kinetic_core::gesture::{GestureConfig, InputMode};
pub use kinetic_core::lock::{ColumnId, ColumnLock, LockConfig};

// --- Widget re-exports -----------------------------------------------------

pub use kinetic_widgets::{
    ChangeCause, Column, FixedRowHeight, IndexSpace, Meridiem, MeridiemMode, MetricsProvider,
    Phase, Result, TimePicker, TimePickerConfig, TimeValue, ValueChange, VisibleRow, Wheel,
    WheelConfig, WheelError,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChangeCause, Column, ColumnLock, Direction, Event, FixedRowHeight, Instant, KeyCode,
        KeyEvent, Meridiem, MeridiemMode, MetricsProvider, Phase, Result, ScrollEvent, TimePicker,
        TimePickerConfig, TimeValue, TouchEvent, TouchPhase, ValueChange, Wheel, WheelConfig,
        WheelError,
    };

    pub use crate::{core, widgets};
}

pub use kinetic_core as core;
pub use kinetic_widgets as widgets;

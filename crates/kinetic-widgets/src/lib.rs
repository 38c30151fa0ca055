#![forbid(unsafe_code)]

//! Wheel columns and the time picker for Kinetic.
//!
//! A [`Wheel`] is one wrap-around option column driven by the physics in
//! `kinetic-core`. A [`TimePicker`] composes hour, minute and meridiem
//! wheels behind a shared column lock and a single disabled-time rule.

pub mod error;
pub mod index_space;
pub mod metrics;
pub mod resolver;
pub mod time_picker;
pub mod wheel;

pub use error::{Result, WheelError};
pub use index_space::{DEFAULT_REPEATS, IndexSpace};
pub use metrics::{FixedRowHeight, MetricsProvider};
pub use resolver::{Resolution, Resolver, StepCheck};
pub use time_picker::{
    Column, Meridiem, MeridiemMode, TimePicker, TimePickerConfig, TimeValue,
};
pub use wheel::{ChangeCause, Phase, ValueChange, VisibleRow, Wheel, WheelConfig};

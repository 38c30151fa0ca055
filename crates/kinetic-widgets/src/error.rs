use thiserror::Error;

pub type Result<T> = std::result::Result<T, WheelError>;

/// Construction-time failures for wheels and time pickers.
///
/// Runtime misuse (unknown `set_value` targets, calls after `dispose`,
/// fully disabled lists) never produces an error; those degrade to no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("option list is empty")]
    EmptyOptions,

    #[error("duplicate option at index {index}")]
    DuplicateOption { index: usize },

    #[error("repeat count must be odd and at least 5 (got {repeats})")]
    InvalidRepeatCount { repeats: usize },

    #[error("row metrics are unavailable")]
    MetricsUnavailable,

    #[error("row height must be finite and positive (got {height})")]
    InvalidRowHeight { height: String },

    #[error("initial value is not one of the options")]
    InitialValueNotFound,

    #[error("minute step must divide 60 (got {step})")]
    InvalidMinuteStep { step: u8 },

    #[error("hour {hour} is outside the clock range")]
    InvalidHour { hour: u8 },

    #[error("hour list is empty")]
    EmptyHours,
}

impl WheelError {
    #[must_use]
    pub fn invalid_row_height(height: f64) -> Self {
        Self::InvalidRowHeight {
            height: height.to_string(),
        }
    }

    /// Whether the error comes from the host's layout rather than the
    /// caller's configuration.
    #[must_use]
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::MetricsUnavailable | Self::InvalidRowHeight { .. })
    }
}

//! Solve configuration.
use std::time::Duration;

native_codes! {
    /// Verbosity of the engine's own terminal output. Has no effect on returned data.
    pub enum MessageLevel ("message level") {
        /// No output
        Off = 0 => "off",
        /// Errors and warnings only
        Error = 1 => "error",
        /// Normal output
        On = 2 => "on",
        /// Full output, including informational messages
        All = 3 => "all",
        /// Debugging output
        Debug = 4 => "debug",
    }
}

impl Default for MessageLevel {
    fn default() -> Self {
        MessageLevel::Off
    }
}

/// Options for [Problem::solve](crate::Problem::solve).
///
/// ```
/// use glpk_core::{MessageLevel, SolveOptions};
/// use std::time::Duration;
///
/// let options = SolveOptions::default()
///     .with_message_level(MessageLevel::Error)
///     .with_time_limit(Duration::from_millis(2500));
/// assert_eq!(options.time_limit_ms(), Some(2500));
/// assert_eq!(SolveOptions::default().time_limit_ms(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveOptions {
    /// Engine verbosity, silent by default
    pub message_level: MessageLevel,
    /// Wall-clock budget for each solve phase. `None` leaves the engine unbounded.
    ///
    /// The integer phase receives the whole budget again, not what the relaxation left over.
    pub time_limit: Option<Duration>,
}

impl SolveOptions {
    /// Sets the engine verbosity
    pub fn with_message_level(mut self, message_level: MessageLevel) -> Self {
        self.message_level = message_level;
        self
    }

    /// Sets the per-phase time limit
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets the per-phase time limit in seconds.
    /// Negative or NaN values are treated as zero, values too large for a [Duration] as unbounded.
    pub fn with_time_limit_secs(mut self, seconds: f64) -> Self {
        self.time_limit = if seconds.is_nan() || seconds <= 0. {
            Some(Duration::ZERO)
        } else {
            Duration::try_from_secs_f64(seconds).ok()
        };
        self
    }

    /// The time limit in the engine's unit, milliseconds, rounded up.
    ///
    /// Rounding up keeps a sub-millisecond limit from turning into "no limit": one
    /// microsecond becomes one millisecond. Limits beyond `i32::MAX` ms saturate.
    pub fn time_limit_ms(&self) -> Option<i32> {
        self.time_limit.map(duration_to_ms)
    }
}

fn duration_to_ms(limit: Duration) -> i32 {
    let ms = limit.as_nanos().div_ceil(1_000_000);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

//! config::matching — settings for associating change points with events.
use serde::Serialize;

use crate::config::{
    constants::{DEFAULT_EVENT_WINDOW_DAYS, MAX_EVENT_WINDOW_DAYS, MIN_EVENT_WINDOW_DAYS},
    errors::{ConfigError, ConfigResult},
};

/// EventMatchingConfig — symmetric day window and nearest-only mode.
///
/// Invariants
/// ----------
/// - `MIN_EVENT_WINDOW_DAYS ≤ window_days ≤ MAX_EVENT_WINDOW_DAYS`.
///
/// Notes
/// -----
/// - `match_nearest` only affects
///   [`associate_with_config`](crate::events::associate_with_config); the
///   plain window functions always return every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventMatchingConfig {
    window_days: u32,
    match_nearest: bool,
}

impl EventMatchingConfig {
    /// Construct a validated matching config.
    ///
    /// Errors with `ConfigError::InvalidWindowDays` when `window_days` falls
    /// outside `[1, 365]`. Takes `i64` so that negative inputs are reported
    /// as-is.
    pub fn new(window_days: i64, match_nearest: bool) -> ConfigResult<Self> {
        let min = i64::from(MIN_EVENT_WINDOW_DAYS);
        let max = i64::from(MAX_EVENT_WINDOW_DAYS);
        if window_days < min || window_days > max {
            return Err(ConfigError::InvalidWindowDays {
                value: window_days,
                min: MIN_EVENT_WINDOW_DAYS,
                max: MAX_EVENT_WINDOW_DAYS,
            });
        }
        Ok(EventMatchingConfig { window_days: window_days as u32, match_nearest })
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn match_nearest(&self) -> bool {
        self.match_nearest
    }
}

impl Default for EventMatchingConfig {
    fn default() -> Self {
        EventMatchingConfig { window_days: DEFAULT_EVENT_WINDOW_DAYS, match_nearest: true }
    }
}

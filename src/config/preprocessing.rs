//! config::preprocessing — return method and rolling-window settings.
use serde::Serialize;

use crate::{
    config::{
        constants::{DEFAULT_ROLLING_WINDOW, MIN_ROLLING_WINDOW},
        errors::{ConfigError, ConfigResult},
    },
    preprocessing::returns::ReturnMethod,
};

/// PreprocessingConfig — how prices become returns and how wide rolling
/// statistics are.
///
/// Invariants
/// ----------
/// - `rolling_window ≥ MIN_ROLLING_WINDOW` so that a sample standard deviation
///   is defined for every complete window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreprocessingConfig {
    return_method: ReturnMethod,
    rolling_window: usize,
}

impl PreprocessingConfig {
    /// Construct a validated preprocessing config.
    ///
    /// Errors with `ConfigError::InvalidRollingWindow` when
    /// `rolling_window < 2`.
    pub fn new(return_method: ReturnMethod, rolling_window: usize) -> ConfigResult<Self> {
        if rolling_window < MIN_ROLLING_WINDOW {
            return Err(ConfigError::InvalidRollingWindow {
                value: rolling_window as i64,
                min: MIN_ROLLING_WINDOW,
            });
        }
        Ok(PreprocessingConfig { return_method, rolling_window })
    }

    pub fn return_method(&self) -> ReturnMethod {
        self.return_method
    }

    pub fn rolling_window(&self) -> usize {
        self.rolling_window
    }
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        PreprocessingConfig { return_method: ReturnMethod::Log, rolling_window: DEFAULT_ROLLING_WINDOW }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify defaults and the lower bound on the rolling window.
    //
    // Given
    // -----
    // - The default config, and `new(Simple, 1)` / `new(Simple, 2)`.
    //
    // Expect
    // ------
    // - Default is (Log, 30); window 1 is rejected, window 2 accepted.
    fn defaults_and_rolling_window_bound() {
        let cfg = PreprocessingConfig::default();
        assert_eq!(cfg.return_method(), ReturnMethod::Log);
        assert_eq!(cfg.rolling_window(), 30);

        assert_eq!(
            PreprocessingConfig::new(ReturnMethod::Simple, 1),
            Err(ConfigError::InvalidRollingWindow { value: 1, min: 2 })
        );
        assert!(PreprocessingConfig::new(ReturnMethod::Simple, 2).is_ok());
    }
}

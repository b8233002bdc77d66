//! config::errors — validation failures for configuration bundles.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias returned by every validated
//! configuration constructor in this crate. Each variant carries the offending
//! value so that messages can name both the field and its admissible range.
//!
//! Conventions
//! -----------
//! - Integer payloads are stored as `i64` so that negative values coming from
//!   loosely-typed callers (e.g., the Python bindings) can be reported verbatim
//!   instead of failing earlier with an opaque conversion error.
//! - Messages follow the pattern "`<field>` must <constraint>; got <value>".

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::errors::ErrorKind;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// ConfigError — a configuration field is outside its valid range.
///
/// Variants
/// --------
/// - `InvalidDraws` / `InvalidTune` / `InvalidChains`
///   Sampler sizes must be strictly positive.
/// - `InvalidHdiProb`
///   The credible mass must lie in the open interval (0, 1).
/// - `InvalidPriorMean`
///   The Normal prior location must be finite.
/// - `InvalidPriorScale { field, value }`
///   A prior scale (`mu_prior_sigma`, `sigma_prior_sigma`) must be finite
///   and strictly positive.
/// - `InvalidWindowDays`
///   The event-matching window must lie in `[MIN_EVENT_WINDOW_DAYS,
///   MAX_EVENT_WINDOW_DAYS]`.
/// - `InvalidRollingWindow`
///   Rolling statistics need at least two observations per window.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDraws { value: i64 },
    InvalidTune { value: i64 },
    InvalidChains { value: i64 },
    InvalidHdiProb { value: f64 },
    InvalidPriorMean { value: f64 },
    InvalidPriorScale { field: &'static str, value: f64 },
    InvalidWindowDays { value: i64, min: u32, max: u32 },
    InvalidRollingWindow { value: i64, min: usize },
}

impl ConfigError {
    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::InvalidDraws { .. } => "draws",
            ConfigError::InvalidTune { .. } => "tune",
            ConfigError::InvalidChains { .. } => "chains",
            ConfigError::InvalidHdiProb { .. } => "hdi_prob",
            ConfigError::InvalidPriorMean { .. } => "mu_prior_mean",
            ConfigError::InvalidPriorScale { field, .. } => field,
            ConfigError::InvalidWindowDays { .. } => "window_days",
            ConfigError::InvalidRollingWindow { .. } => "rolling_window",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDraws { value } => {
                write!(f, "draws must be a positive integer (>= 1); got {value}")
            }
            ConfigError::InvalidTune { value } => {
                write!(f, "tune must be a positive integer (>= 1); got {value}")
            }
            ConfigError::InvalidChains { value } => {
                write!(f, "chains must be a positive integer (>= 1); got {value}")
            }
            ConfigError::InvalidHdiProb { value } => {
                write!(f, "hdi_prob must lie in the open interval (0, 1); got {value}")
            }
            ConfigError::InvalidPriorMean { value } => {
                write!(f, "mu_prior_mean must be finite; got {value}")
            }
            ConfigError::InvalidPriorScale { field, value } => {
                write!(f, "{field} must be finite and > 0; got {value}")
            }
            ConfigError::InvalidWindowDays { value, min, max } => {
                write!(f, "window_days must lie in [{min}, {max}]; got {value}")
            }
            ConfigError::InvalidRollingWindow { value, min } => {
                write!(f, "rolling_window must be an integer >= {min}; got {value}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

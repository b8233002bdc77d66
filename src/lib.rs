//! brent_changepoint — Bayesian change-point detection for commodity returns,
//! with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes change-point detection, return computation, and event association
//! to Python via the `_brent_changepoint` extension module.
//!
//! Key behaviors
//! -------------
//! - Expose the core modules: [`config`], [`preprocessing`], [`changepoint`],
//!   [`events`], the end-to-end [`analysis`] pipeline, and the shared
//!   [`errors`] taxonomy.
//! - When the `python-bindings` feature is enabled, define the
//!   `BayesianChangePoint` class, the `calculate_returns` and
//!   `associate_change_points` functions, and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The library performs no file I/O. Price and event tables are loaded by
//!   the caller.
//!
//! Conventions
//! -----------
//! - Python-exposed items live under `_brent_changepoint.<submodule>`
//!   (`changepoint`, `preprocessing`, `events`).
//! - Rust errors convert to Python `ValueError` with the Rust message,
//!   prefixed by the error kind where one applies.
//! - Sampling releases the GIL.
//!
//! Downstream usage
//! ----------------
//! - Rust: build a [`PriceSeries`](preprocessing::PriceSeries), then call
//!   [`analysis::run_analysis`], or use
//!   [`changepoint::detect_change_point`] on a return series directly.
//! - Python: `BayesianChangePoint(...).fit(returns, dates)` followed by the
//!   result getters and `convergence()`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds the end-to-end
//!   pipeline test.

pub mod analysis;
pub mod changepoint;
pub mod config;
pub mod errors;
pub mod events;
pub mod preprocessing;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::{collections::BTreeMap, str::FromStr};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyValueError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    changepoint::{CancellationToken, DetectionOutcome, Param, detect_change_point},
    config::{BayesianModelConfig, ConfigError, ConfigResult, EventMatchingConfig},
    events::associate_many,
    preprocessing::{ReturnMethod, ReturnSeries, compute_return_values},
    utils::{extract_events, extract_f64_array, parse_iso_dates},
};

/// BayesianChangePoint — Python-facing single change-point detector.
///
/// Purpose
/// -------
/// Hold a validated [`BayesianModelConfig`] and the outcome of the most
/// recent `fit`, forwarding all computation to
/// [`detect_change_point`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BayesianChangePoint(draws=2000, tune=1000, random_seed=42,
/// hdi_prob=0.95, mu_prior_mean=0.0, mu_prior_sigma=0.1,
/// sigma_prior_sigma=0.1, chains=2)`. Invalid values raise `ValueError`
/// naming the field.
///
/// Invariants
/// ----------
/// - Result getters raise `ValueError` until `fit` has succeeded.
/// - A failed `fit` leaves the previous outcome untouched.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "brent_changepoint.changepoint")]
pub struct BayesianChangePoint {
    config: BayesianModelConfig,
    outcome: Option<DetectionOutcome>,
}

#[cfg(feature = "python-bindings")]
impl BayesianChangePoint {
    fn fitted(&self) -> PyResult<&DetectionOutcome> {
        self.outcome.as_ref().ok_or_else(|| PyValueError::new_err("model has not been fitted"))
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BayesianChangePoint {
    #[new]
    #[pyo3(
        signature = (
            draws = 2000,
            tune = 1000,
            random_seed = 42,
            hdi_prob = 0.95,
            mu_prior_mean = 0.0,
            mu_prior_sigma = 0.1,
            sigma_prior_sigma = 0.1,
            chains = 2,
        ),
        text_signature = "(draws=2000, tune=1000, random_seed=42, hdi_prob=0.95, \
                          mu_prior_mean=0.0, mu_prior_sigma=0.1, sigma_prior_sigma=0.1, chains=2)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        draws: i64, tune: i64, random_seed: u64, hdi_prob: f64, mu_prior_mean: f64,
        mu_prior_sigma: f64, sigma_prior_sigma: f64, chains: i64,
    ) -> PyResult<Self> {
        let draws = positive(draws, |value| ConfigError::InvalidDraws { value })?;
        let tune = positive(tune, |value| ConfigError::InvalidTune { value })?;
        let chains = positive(chains, |value| ConfigError::InvalidChains { value })?;
        let config = BayesianModelConfig::new(
            draws,
            tune,
            random_seed,
            hdi_prob,
            mu_prior_mean,
            mu_prior_sigma,
            sigma_prior_sigma,
        )?
        .with_chains(chains)?;
        Ok(BayesianChangePoint { config, outcome: None })
    }

    /// Sample the posterior for `returns` dated by ISO `dates`.
    #[pyo3(signature = (returns, dates), text_signature = "(self, returns, dates, /)")]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, returns: &Bound<'py, PyAny>, dates: Vec<String>,
    ) -> PyResult<()> {
        let arr = extract_f64_array(py, returns)?;
        let values = arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("returns must be a 1-D contiguous float64 array"))?
            .to_vec();
        let series = ReturnSeries::new(parse_iso_dates(&dates)?, values)?;

        let config = &self.config;
        let outcome = py.allow_threads(|| {
            detect_change_point(&series, config, &CancellationToken::new())
        })?;
        self.outcome = Some(outcome);
        Ok(())
    }

    #[getter]
    pub fn change_point_date(&self) -> PyResult<String> {
        Ok(self.fitted()?.result.date.format("%Y-%m-%d").to_string())
    }

    #[getter]
    pub fn change_point_index(&self) -> PyResult<usize> {
        Ok(self.fitted()?.result.index)
    }

    #[getter]
    pub fn mu_1(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.mu_1)
    }

    #[getter]
    pub fn mu_2(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.mu_2)
    }

    #[getter]
    pub fn sigma(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.sigma)
    }

    #[getter]
    pub fn impact(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.impact)
    }

    #[getter]
    pub fn impact_pct(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.impact_pct)
    }

    #[getter]
    pub fn confidence(&self) -> PyResult<f64> {
        Ok(self.fitted()?.result.confidence)
    }

    #[getter]
    pub fn index_hdi(&self) -> PyResult<(usize, usize)> {
        Ok(self.fitted()?.result.index_hdi)
    }

    /// Parameter name → converged flag. Raises when fewer than two chains
    /// were run.
    pub fn convergence(&self) -> PyResult<BTreeMap<String, bool>> {
        let report = self.fitted()?.convergence.clone()?;
        Ok(report.converged.iter().map(|(p, c)| (p.name().to_string(), *c)).collect())
    }

    /// Parameter name → split-chain R-hat.
    pub fn r_hat(&self) -> PyResult<BTreeMap<String, f64>> {
        let report = self.fitted()?.convergence.clone()?;
        Ok(report.r_hat.iter().map(|(p, r)| (p.name().to_string(), *r)).collect())
    }

    /// Retained draws of `param` across all chains, chain-major.
    #[pyo3(signature = (param), text_signature = "(self, param, /)")]
    pub fn trace(&self, param: &str) -> PyResult<Vec<f64>> {
        let param = Param::from_str(param).map_err(PyValueError::new_err)?;
        Ok(self.fitted()?.samples.flat_values(param).to_vec())
    }
}

#[cfg(feature = "python-bindings")]
fn positive(value: i64, err: impl Fn(i64) -> ConfigError) -> ConfigResult<usize> {
    if value <= 0 { Err(err(value)) } else { Ok(value as usize) }
}

/// Log or simple returns of `prices` (length `n − 1`).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (prices, method = "log"), text_signature = "(prices, /, method='log')")]
pub fn calculate_returns<'py>(
    py: Python<'py>, prices: &Bound<'py, PyAny>, method: &str,
) -> PyResult<Vec<f64>> {
    let method = ReturnMethod::from_str(method)?;
    let arr = extract_f64_array(py, prices)?;
    let prices = arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("prices must be a 1-D contiguous float64 array"))?;
    Ok(compute_return_values(prices, method)?.to_vec())
}

/// Windowed association of ISO change-point dates with an event table.
///
/// Returns one dict per matched event, or one sentinel dict per change point
/// without matches.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (change_points, events, window_days = 30),
    text_signature = "(change_points, events, /, window_days=30)"
)]
pub fn associate_change_points<'py>(
    py: Python<'py>, change_points: Vec<String>, events: &Bound<'py, PyAny>, window_days: i64,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let window = EventMatchingConfig::new(window_days, false)?.window_days();
    let change_points = parse_iso_dates(&change_points)?;
    let events = extract_events(events)?;

    associate_many(&change_points, &events, window)
        .into_iter()
        .map(|row| {
            let dict = PyDict::new(py);
            dict.set_item("change_point_date", row.change_point_date.to_string())?;
            dict.set_item("event_date", row.event_date.map(|d| d.to_string()))?;
            dict.set_item("event", row.event)?;
            dict.set_item("description", row.description)?;
            dict.set_item("days_from_change", row.days_from_change)?;
            Ok(dict)
        })
        .collect()
}

/// _brent_changepoint — PyO3 module initializer for the Python extension.
///
/// Creates the `changepoint`, `preprocessing`, and `events` submodules,
/// attaches them to the parent module, and registers them in `sys.modules`
/// so dotted imports work.
///
/// Errors
/// ------
/// - `PyErr` if creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _brent_changepoint<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let changepoint_mod = PyModule::new(_py, "changepoint")?;
    changepoint_mod.add_class::<BayesianChangePoint>()?;
    m.add_submodule(&changepoint_mod)?;

    let preprocessing_mod = PyModule::new(_py, "preprocessing")?;
    preprocessing_mod.add_function(wrap_pyfunction!(calculate_returns, &preprocessing_mod)?)?;
    m.add_submodule(&preprocessing_mod)?;

    let events_mod = PyModule::new(_py, "events")?;
    events_mod.add_function(wrap_pyfunction!(associate_change_points, &events_mod)?)?;
    m.add_submodule(&events_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("brent_changepoint.changepoint", changepoint_mod)?;
    modules.set_item("brent_changepoint.preprocessing", preprocessing_mod)?;
    modules.set_item("brent_changepoint.events", events_mod)?;
    Ok(())
}

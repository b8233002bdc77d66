//! changepoint::model — the single change-point Normal model.
//!
//! Purpose
//! -------
//! Specify the generative model the sampler targets, over a return series
//! `y_0 … y_{n−1}`:
//!
//! ```text
//! τ   ~ Uniform{1, …, n − 1}
//! μ₁  ~ Normal(mu_prior_mean, mu_prior_sigma)
//! μ₂  ~ Normal(mu_prior_mean, mu_prior_sigma)
//! σ   ~ HalfNormal(sigma_prior_sigma)
//! y_i ~ Normal(μ₁, σ)  for i <  τ
//! y_i ~ Normal(μ₂, σ)  for i >= τ
//! ```
//!
//! Key behaviors
//! -------------
//! - [`build_model`] validates the series and precomputes prefix sums of `y`
//!   and `y²`, so any segment log-likelihood costs O(1) regardless of `τ`.
//! - [`ChangePointModel`] describes the model only: it evaluates log densities
//!   and the full conditional of `τ` but holds no sampler state.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n >= 3`, so both regimes can be non-empty for every admissible `τ`.
//! - All returns are finite; degenerate (zero-variance) data is accepted here
//!   and rejected by the sampler, where it becomes a sampling failure.
//! - Log densities outside the support (τ out of range, σ <= 0) are `-inf`.
//!
//! Conventions
//! -----------
//! - `τ` is the index of the first post-change observation.
//! - The uniform prior on `τ` contributes the constant `-ln(n − 1)`; it is
//!   omitted from [`ChangePointModel::tau_log_weights`] since it cancels on
//!   normalisation.
use std::f64::consts::{LN_2, PI};

use ndarray::Array1;
use statrs::{
    distribution::{Continuous, Normal},
    statistics::Statistics,
};

use crate::{
    changepoint::{
        errors::{ModelError, ModelResult},
        params::Draw,
    },
    config::BayesianModelConfig,
};

/// Shortest series for which every admissible τ leaves both regimes non-empty.
pub const MIN_OBSERVATIONS: usize = 3;

/// ChangePointModel — log densities of the single-break Normal model.
#[derive(Debug, Clone)]
pub struct ChangePointModel {
    n: usize,
    prefix_sum: Array1<f64>,
    prefix_sum_sq: Array1<f64>,
    mu_prior: Normal,
    sigma_prior: Normal,
    data_mean: f64,
    data_variance: f64,
}

/// Build the change-point model over `returns`.
///
/// Parameters
/// ----------
/// - `returns`: `&[f64]`
///   Finite returns in chronological order; length `n >= 3`.
/// - `config`: `&BayesianModelConfig`
///   Supplies the prior hyper-parameters.
///
/// Errors
/// ------
/// - `ModelError::TooFewObservations` when `n < 3`.
/// - `ModelError::NonFiniteReturn` for the first NaN/±inf return.
/// - `ModelError::InvalidPrior` when a prior cannot be constructed.
pub fn build_model(returns: &[f64], config: &BayesianModelConfig) -> ModelResult<ChangePointModel> {
    let n = returns.len();
    if n < MIN_OBSERVATIONS {
        return Err(ModelError::TooFewObservations { needed: MIN_OBSERVATIONS, actual: n });
    }
    if let Some((index, &value)) = returns.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        return Err(ModelError::NonFiniteReturn { index, value });
    }

    let mu_prior = Normal::new(config.mu_prior_mean(), config.mu_prior_sigma()).map_err(|_| {
        ModelError::InvalidPrior { field: "mu_prior_sigma", value: config.mu_prior_sigma() }
    })?;
    let sigma_prior = Normal::new(0.0, config.sigma_prior_sigma()).map_err(|_| {
        ModelError::InvalidPrior { field: "sigma_prior_sigma", value: config.sigma_prior_sigma() }
    })?;

    let mut prefix_sum = Array1::zeros(n + 1);
    let mut prefix_sum_sq = Array1::zeros(n + 1);
    for (i, &y) in returns.iter().enumerate() {
        prefix_sum[i + 1] = prefix_sum[i] + y;
        prefix_sum_sq[i + 1] = prefix_sum_sq[i] + y * y;
    }

    Ok(ChangePointModel {
        n,
        prefix_sum,
        prefix_sum_sq,
        mu_prior,
        sigma_prior,
        data_mean: returns.iter().mean(),
        data_variance: returns.iter().variance(),
    })
}

impl ChangePointModel {
    /// Number of observations `n`.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Admissible change-point indices `1..=n−1`.
    pub fn tau_range(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.n - 1
    }

    /// Sample mean of the returns.
    pub fn data_mean(&self) -> f64 {
        self.data_mean
    }

    /// Sample variance (n − 1 denominator) of the returns.
    pub fn data_variance(&self) -> f64 {
        self.data_variance
    }

    /// Gaussian log-likelihood of `y[start..end]` under `Normal(mu, sigma)`.
    ///
    /// Uses `Σ(y − μ)² = Σy² − 2μΣy + kμ²` on the prefix sums. An empty
    /// segment contributes 0; `sigma <= 0` yields `-inf`.
    pub fn segment_log_likelihood(&self, start: usize, end: usize, mu: f64, sigma: f64) -> f64 {
        if end <= start {
            return 0.0;
        }
        if !(sigma > 0.0) {
            return f64::NEG_INFINITY;
        }
        let k = (end - start) as f64;
        let s1 = self.prefix_sum[end] - self.prefix_sum[start];
        let s2 = self.prefix_sum_sq[end] - self.prefix_sum_sq[start];
        let ss = (s2 - 2.0 * mu * s1 + k * mu * mu).max(0.0);
        -k * (0.5 * (2.0 * PI).ln() + sigma.ln()) - ss / (2.0 * sigma * sigma)
    }

    /// Log-likelihood of all observations at `draw`.
    pub fn log_likelihood(&self, draw: &Draw) -> f64 {
        if !self.tau_range().contains(&draw.tau) {
            return f64::NEG_INFINITY;
        }
        self.segment_log_likelihood(0, draw.tau, draw.mu_1, draw.sigma)
            + self.segment_log_likelihood(draw.tau, self.n, draw.mu_2, draw.sigma)
    }

    /// Joint log prior of `draw`.
    pub fn log_prior(&self, draw: &Draw) -> f64 {
        if !self.tau_range().contains(&draw.tau) {
            return f64::NEG_INFINITY;
        }
        -((self.n - 1) as f64).ln()
            + self.mu_prior.ln_pdf(draw.mu_1)
            + self.mu_prior.ln_pdf(draw.mu_2)
            + self.sigma_log_prior(draw.sigma)
    }

    /// HalfNormal log density of `sigma`.
    pub fn sigma_log_prior(&self, sigma: f64) -> f64 {
        if sigma > 0.0 { LN_2 + self.sigma_prior.ln_pdf(sigma) } else { f64::NEG_INFINITY }
    }

    /// Unnormalised log posterior at `draw`.
    pub fn log_posterior(&self, draw: &Draw) -> f64 {
        let prior = self.log_prior(draw);
        if prior == f64::NEG_INFINITY {
            return prior;
        }
        prior + self.log_likelihood(draw)
    }

    /// Unnormalised log weights of the full conditional of τ given the other
    /// parameters; element `k` belongs to `τ = k + 1`.
    pub fn tau_log_weights(&self, mu_1: f64, mu_2: f64, sigma: f64) -> Array1<f64> {
        let mut out = vec![0.0; self.n - 1];
        self.fill_tau_log_weights(mu_1, mu_2, sigma, &mut out);
        Array1::from(out)
    }

    /// In-place variant of [`tau_log_weights`](Self::tau_log_weights) used by
    /// the sampler's per-chain scratch buffer.
    pub(crate) fn fill_tau_log_weights(&self, mu_1: f64, mu_2: f64, sigma: f64, out: &mut [f64]) {
        for (slot, tau) in out.iter_mut().zip(self.tau_range()) {
            *slot = self.segment_log_likelihood(0, tau, mu_1, sigma)
                + self.segment_log_likelihood(tau, self.n, mu_2, sigma);
        }
    }
}

//! changepoint::diagnostics — split-chain R-hat, effective sample size, and
//! the convergence report.
//!
//! Purpose
//! -------
//! Judge whether independent chains agree. [`check_convergence`] flags each
//! parameter by its split-chain potential scale reduction factor (R-hat);
//! [`effective_sample_size`] estimates how many independent draws the
//! autocorrelated chains are worth.
//!
//! Key behaviors
//! -------------
//! - Each chain is split into a first and second half (the middle draw of an
//!   odd-length chain is dropped), giving `2m` sequences of length `n`.
//! - With `W` the mean within-sequence variance and `B` the between-sequence
//!   variance:
//!
//!   ```text
//!   B      = n / (2m − 1) · Σ_j (θ̄_j − θ̄)²
//!   var⁺   = (n − 1)/n · W + B/n
//!   R-hat  = √(var⁺ / W)
//!   ```
//! - A parameter is converged iff `0.99 < R-hat < threshold`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Convergence checks need ≥ 2 chains; one chain is an
//!   `InsufficientChains` error rather than a vacuous pass.
//! - Split statistics need ≥ 4 draws per chain.
//! - Constant draws: identical constants across chains give `R-hat = 1`;
//!   distinct per-chain constants give `R-hat = +inf` (never converged).
//!
//! Testing notes
//! -------------
//! - Unit tests use iid Normal chains (R-hat ≈ 1, ESS ≈ total draws), chains
//!   with separated means (R-hat ≫ 1), and the constant edge cases.
use std::collections::BTreeMap;

use ndarray::{ArrayView1, ArrayView2, Axis, s};
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::{
    changepoint::{
        errors::{ModelError, ModelResult},
        params::Param,
        posterior::PosteriorSamples,
    },
    config::constants::{DEFAULT_RHAT_THRESHOLD, RHAT_LOWER_BOUND},
};

/// Fewest draws per chain that leave two draws in each split half.
pub const MIN_DRAWS_FOR_SPLIT: usize = 4;

/// ConvergenceReport — per-parameter R-hat and its converged flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceReport {
    pub converged: BTreeMap<Param, bool>,
    pub r_hat: BTreeMap<Param, f64>,
    pub threshold: f64,
}

impl ConvergenceReport {
    pub fn all_converged(&self) -> bool {
        self.converged.values().all(|&c| c)
    }

    pub fn is_converged(&self, param: Param) -> bool {
        self.converged.get(&param).copied().unwrap_or(false)
    }

    pub fn r_hat(&self, param: Param) -> Option<f64> {
        self.r_hat.get(&param).copied()
    }

    /// Parameters that failed the check, in reporting order.
    pub fn unconverged(&self) -> Vec<Param> {
        self.converged.iter().filter(|(_, c)| !**c).map(|(p, _)| *p).collect()
    }
}

/// Check convergence of every parameter at the default threshold (1.01).
pub fn check_convergence_default(samples: &PosteriorSamples) -> ModelResult<ConvergenceReport> {
    check_convergence(samples, DEFAULT_RHAT_THRESHOLD)
}

/// Split-chain R-hat convergence check for `tau`, `mu_1`, `mu_2`, `sigma`.
///
/// Parameters
/// ----------
/// - `samples`: `&PosteriorSamples`
///   Retained draws, ≥ 2 chains of ≥ 4 draws.
/// - `threshold`: `f64`
///   Upper (exclusive) R-hat bound; finite and > 1.
///
/// Errors
/// ------
/// - `ModelError::InvalidThreshold` for a non-finite threshold or one ≤ 1.
/// - `ModelError::InsufficientChains` with fewer than 2 chains.
/// - `ModelError::TooFewDraws` with fewer than 4 draws per chain.
pub fn check_convergence(samples: &PosteriorSamples, threshold: f64) -> ModelResult<ConvergenceReport> {
    if !threshold.is_finite() || threshold <= 1.0 {
        return Err(ModelError::InvalidThreshold { value: threshold });
    }
    if samples.n_chains() < 2 {
        return Err(ModelError::InsufficientChains { chains: samples.n_chains() });
    }

    let mut converged = BTreeMap::new();
    let mut r_hat = BTreeMap::new();
    for param in Param::ALL {
        let r = split_rhat(samples.values(param).view())?;
        converged.insert(param, r > RHAT_LOWER_BOUND && r < threshold);
        r_hat.insert(param, r);
    }
    Ok(ConvergenceReport { converged, r_hat, threshold })
}

/// Split-chain R-hat of a `(chains × draws)` matrix.
///
/// Errors
/// ------
/// - `InsufficientChains` when there are fewer than 2 rows.
/// - `TooFewDraws` when there are fewer than 4 columns.
pub fn split_rhat(values: ArrayView2<'_, f64>) -> ModelResult<f64> {
    let chains = values.len_of(Axis(0));
    if chains < 2 {
        return Err(ModelError::InsufficientChains { chains });
    }
    let halves = split_halves(values)?;
    let n = halves[0].len() as f64;

    let means: Vec<f64> = halves.iter().map(|h| h.iter().mean()).collect();
    let w = halves.iter().map(|h| h.iter().variance()).collect::<Vec<f64>>().mean();
    let b = n * means.iter().variance();

    if w == 0.0 {
        return Ok(if b == 0.0 { 1.0 } else { f64::INFINITY });
    }
    let var_plus = (n - 1.0) / n * w + b / n;
    Ok((var_plus / w).sqrt())
}

/// Multi-chain effective sample size using Geyer's initial positive
/// sequence on split chains.
///
/// Constant draws return the total number of draws.
///
/// Errors
/// ------
/// - `TooFewDraws` when there are fewer than 4 draws per chain.
pub fn effective_sample_size(values: ArrayView2<'_, f64>) -> ModelResult<f64> {
    let halves = split_halves(values)?;
    let m = halves.len();
    let n = halves[0].len();
    let total = (m * n) as f64;

    let means: Vec<f64> = halves.iter().map(|h| h.iter().mean()).collect();
    let w = halves.iter().map(|h| h.iter().variance()).collect::<Vec<f64>>().mean();
    let b_over_n = means.iter().variance();
    let var_plus = (n as f64 - 1.0) / n as f64 * w + b_over_n;
    if !(var_plus > 0.0) {
        return Ok(total);
    }

    let rho = |lag: usize| -> f64 {
        let mean_acov = halves
            .iter()
            .zip(&means)
            .map(|(h, &mu)| autocovariance(h, mu, lag))
            .sum::<f64>()
            / m as f64;
        1.0 - (w - mean_acov) / var_plus
    };

    // Initial positive, monotone sequence of paired autocorrelations.
    let mut sum_pairs = 0.0;
    let mut previous_pair = f64::INFINITY;
    let mut lag = 0;
    while lag + 1 < n {
        let pair = if lag == 0 { 1.0 + rho(1) } else { rho(lag) + rho(lag + 1) };
        if pair < 0.0 {
            break;
        }
        let pair = pair.min(previous_pair);
        sum_pairs += pair;
        previous_pair = pair;
        lag += 2;
    }

    let tau = (-1.0 + 2.0 * sum_pairs).max(1.0 / total.log10());
    Ok(total / tau)
}

/// Autocovariance at `lag` with the biased (1/n) normalisation, scaled to
/// match the unbiased within-sequence variance at lag 0.
fn autocovariance(seq: &ArrayView1<'_, f64>, mean: f64, lag: usize) -> f64 {
    let n = seq.len();
    let sum: f64 = (0..n - lag).map(|i| (seq[i] - mean) * (seq[i + lag] - mean)).sum();
    sum / n as f64 * (n as f64 / (n as f64 - 1.0))
}

fn split_halves<'a>(values: ArrayView2<'a, f64>) -> ModelResult<Vec<ArrayView1<'a, f64>>> {
    let draws = values.len_of(Axis(1));
    if draws < MIN_DRAWS_FOR_SPLIT {
        return Err(ModelError::TooFewDraws { needed: MIN_DRAWS_FOR_SPLIT, actual: draws });
    }
    let half = draws / 2;
    let chains = values.len_of(Axis(0));
    let mut out = Vec::with_capacity(2 * chains);
    for c in 0..chains {
        out.push(values.slice_move(s![c, ..half]));
    }
    for c in 0..chains {
        out.push(values.slice_move(s![c, draws - half..]));
    }
    Ok(out)
}

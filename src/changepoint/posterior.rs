//! changepoint::posterior — the per-chain collection of retained draws.
//!
//! Purpose
//! -------
//! [`PosteriorSamples`] is the single hand-off between the sampler and every
//! consumer (result extraction, convergence checks, summaries). It owns one
//! `Vec<Draw>` per chain plus each chain's post-tuning acceptance rates.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one chain; every chain has the same, non-zero length.
//! - Chains are stored in chain-index order.
//! - Immutable after construction.
//!
//! Conventions
//! -----------
//! - [`PosteriorSamples::values`] returns a `(chains × draws)` `Array2`, the
//!   layout the diagnostics operate on.
//! - Flattened views are chain-major.
use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::changepoint::{
    errors::{ModelError, ModelResult},
    params::{Draw, Param},
};

/// Post-tuning acceptance rates of the Metropolis updates of one chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcceptanceStats {
    pub mu_1: f64,
    pub mu_2: f64,
    pub sigma: f64,
}

/// PosteriorSamples — retained draws of every chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSamples {
    chains: Vec<Vec<Draw>>,
    acceptance: Vec<AcceptanceStats>,
}

impl PosteriorSamples {
    /// Wrap per-chain draws.
    ///
    /// Errors
    /// ------
    /// - `EmptySamples` when there are no chains or the first chain is empty.
    /// - `ChainLengthMismatch` when any chain differs in length from chain 0.
    pub fn from_draws(chains: Vec<Vec<Draw>>) -> ModelResult<Self> {
        let expected = chains.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(ModelError::EmptySamples);
        }
        if let Some((chain, c)) = chains.iter().enumerate().find(|(_, c)| c.len() != expected) {
            return Err(ModelError::ChainLengthMismatch { chain, expected, actual: c.len() });
        }
        Ok(PosteriorSamples { chains, acceptance: Vec::new() })
    }

    pub(crate) fn with_acceptance(mut self, acceptance: Vec<AcceptanceStats>) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn n_chains(&self) -> usize {
        self.chains.len()
    }

    /// Draws per chain.
    pub fn n_draws(&self) -> usize {
        self.chains[0].len()
    }

    pub fn chain(&self, index: usize) -> Option<&[Draw]> {
        self.chains.get(index).map(Vec::as_slice)
    }

    pub fn chains(&self) -> &[Vec<Draw>] {
        &self.chains
    }

    /// Acceptance rates per chain; empty for samples not produced by the
    /// sampler.
    pub fn acceptance(&self) -> &[AcceptanceStats] {
        &self.acceptance
    }

    /// All draws, chain-major.
    pub fn iter(&self) -> impl Iterator<Item = &Draw> + '_ {
        self.chains.iter().flatten()
    }

    /// Values of `param` as a `(chains × draws)` matrix.
    pub fn values(&self, param: Param) -> Array2<f64> {
        Array2::from_shape_fn((self.n_chains(), self.n_draws()), |(c, i)| {
            self.chains[c][i].get(param).as_f64()
        })
    }

    /// Values of `param` across all chains, chain-major.
    pub fn flat_values(&self, param: Param) -> Array1<f64> {
        self.iter().map(|d| d.get(param).as_f64()).collect()
    }

    /// Posterior mean of `param` over all chains.
    pub fn mean(&self, param: Param) -> f64 {
        let total = (self.n_chains() * self.n_draws()) as f64;
        self.iter().map(|d| d.get(param).as_f64()).sum::<f64>() / total
    }
}

//! changepoint::sampler — parallel Metropolis-within-Gibbs MCMC.
//!
//! Purpose
//! -------
//! Draw posterior samples from a [`ChangePointModel`]. Each chain runs
//! `tune + draws` sweeps (see [`chain`] for the sweep itself), discards the
//! tuning phase, and keeps `draws` states.
//!
//! Key behaviors
//! -------------
//! - Chains are independent units of work executed on the rayon pool; they
//!   share only `&ChangePointModel`, `&BayesianModelConfig`, and the
//!   cancellation token. Results are combined in chain-index order once all
//!   chains finish.
//! - Identical model, config, and seed give bit-identical draws regardless of
//!   thread scheduling.
//! - Degenerate data (zero or non-finite sample variance) is rejected before
//!   any chain starts.
//!
//! Invariants & assumptions
//! ------------------------
//! - No I/O during sampling; `tracing` events are the only side effect.
//! - On error or cancellation no partial samples are returned. When several
//!   chains fail, the error of the lowest chain index is reported.
pub mod cancel;
pub(crate) mod chain;
pub mod proposals;

pub use self::cancel::CancellationToken;

use rayon::prelude::*;
use tracing::info;

use crate::{
    changepoint::{
        errors::{ModelError, ModelResult},
        model::ChangePointModel,
        posterior::PosteriorSamples,
        sampler::chain::{ChainOutput, run_chain},
    },
    config::BayesianModelConfig,
};

/// Sample the posterior without external cancellation.
///
/// See [`sample_with_cancel`].
pub fn sample(model: &ChangePointModel, config: &BayesianModelConfig) -> ModelResult<PosteriorSamples> {
    sample_with_cancel(model, config, &CancellationToken::new())
}

/// Sample the posterior of `model` with `config.chains()` parallel chains.
///
/// Parameters
/// ----------
/// - `model`: `&ChangePointModel`
///   Built by [`build_model`](crate::changepoint::model::build_model).
/// - `config`: `&BayesianModelConfig`
///   Supplies `draws`, `tune`, `chains`, and `random_seed`; chain `c` is
///   seeded with `random_seed + c`.
/// - `cancel`: `&CancellationToken`
///   Polled by every chain at the start of each iteration.
///
/// Returns
/// -------
/// `PosteriorSamples` with `config.chains()` chains of `config.draws()` draws.
///
/// Errors
/// ------
/// - `ModelError::DegenerateData` for zero-variance returns.
/// - `ModelError::NoFiniteTauCandidate` / `NonFiniteLogPosterior` when the
///   target density breaks down during sampling.
/// - `ModelError::Cancelled` when `cancel` is set before sampling finishes.
pub fn sample_with_cancel(
    model: &ChangePointModel, config: &BayesianModelConfig, cancel: &CancellationToken,
) -> ModelResult<PosteriorSamples> {
    let variance = model.data_variance();
    if !(variance.is_finite() && variance > 0.0) {
        return Err(ModelError::DegenerateData { variance });
    }

    info!(
        observations = model.len(),
        chains = config.chains(),
        draws = config.draws(),
        tune = config.tune(),
        seed = config.random_seed(),
        "starting change-point sampling"
    );

    let outputs: Vec<ModelResult<ChainOutput>> =
        (0..config.chains()).into_par_iter().map(|chain| run_chain(model, config, chain, cancel)).collect();

    let mut chains = Vec::with_capacity(outputs.len());
    let mut acceptance = Vec::with_capacity(outputs.len());
    for output in outputs {
        let output = output?;
        chains.push(output.draws);
        acceptance.push(output.acceptance);
    }
    let samples = PosteriorSamples::from_draws(chains)?.with_acceptance(acceptance);

    info!(chains = samples.n_chains(), draws = samples.n_draws(), "change-point sampling finished");
    Ok(samples)
}

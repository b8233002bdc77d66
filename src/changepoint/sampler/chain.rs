//! sampler::chain — one Metropolis-within-Gibbs chain.
//!
//! Purpose
//! -------
//! Hold the complete mutable state of a single chain in [`ChainState`] and
//! advance it one sweep at a time:
//!
//! 1. `τ`  exact draw from its discrete full conditional over `1..=n−1`;
//! 2. `μ₁` Gaussian random-walk Metropolis;
//! 3. `μ₂` Gaussian random-walk Metropolis;
//! 4. `σ`  Gaussian random walk on `ln σ`, with the Jacobian `+ln σ` added
//!    to both sides of the acceptance ratio.
//!
//! Invariants & assumptions
//! ------------------------
//! - The chain owns its RNG (`Xoshiro256PlusPlus` seeded with
//!   `random_seed + chain`); nothing else is shared between chains except the
//!   immutable model and config.
//! - After every sweep the cached log posterior matches `current`.
//! - Proposal scales adapt only during the first `tune` iterations.
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::{
    changepoint::{
        errors::{ModelError, ModelResult},
        model::ChangePointModel,
        params::{Draw, Param},
        posterior::AcceptanceStats,
        sampler::{
            cancel::CancellationToken,
            proposals::{StepAdapter, metropolis_accept, sample_log_weights},
        },
    },
    config::BayesianModelConfig,
};

/// Retained draws and post-tuning acceptance rates of one chain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChainOutput {
    pub draws: Vec<Draw>,
    pub acceptance: AcceptanceStats,
}

/// Mutable state of one chain.
#[derive(Debug, Clone)]
pub(crate) struct ChainState {
    chain: usize,
    rng: Xoshiro256PlusPlus,
    current: Draw,
    log_posterior: f64,
    mu_1_step: StepAdapter,
    mu_2_step: StepAdapter,
    log_sigma_step: StepAdapter,
    tau_weights: Vec<f64>,
}

impl ChainState {
    /// Dispersed starting point around the data moments.
    ///
    /// `τ` is uniform over `1..=n−1`, each `μ` is `mean + 2·sd/√n · z`, and
    /// `σ = sd · exp(0.1 z)`. Initial scales follow the 2.4·(posterior sd)
    /// rule for one-dimensional random walks.
    pub(crate) fn initialize(model: &ChangePointModel, config: &BayesianModelConfig, chain: usize) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.chain_seed(chain));
        let n = model.len();
        let mean = model.data_mean();
        let sd = model.data_variance().sqrt();
        let spread = 2.0 * sd / (n as f64).sqrt();

        let tau = rng.random_range(1..n);
        let z: [f64; 3] = [rng.sample(StandardNormal), rng.sample(StandardNormal), rng.sample(StandardNormal)];
        let current =
            Draw { tau, mu_1: mean + spread * z[0], mu_2: mean + spread * z[1], sigma: sd * (0.1 * z[2]).exp() };

        let mu_scale = 2.4 * sd / (n as f64 / 2.0).sqrt();
        ChainState {
            chain,
            rng,
            current,
            log_posterior: model.log_posterior(&current),
            mu_1_step: StepAdapter::new(mu_scale),
            mu_2_step: StepAdapter::new(mu_scale),
            log_sigma_step: StepAdapter::new(1.0 / (n as f64).sqrt()),
            tau_weights: vec![0.0; n - 1],
        }
    }

    pub(crate) fn current(&self) -> Draw {
        self.current
    }

    /// Advance the chain by one full sweep.
    ///
    /// Errors
    /// ------
    /// - `NoFiniteTauCandidate` when every τ candidate has a non-finite
    ///   log-likelihood.
    /// - `NonFiniteLogPosterior` when the state after the τ update has a
    ///   non-finite log density.
    pub(crate) fn sweep(&mut self, model: &ChangePointModel, iteration: usize) -> ModelResult<()> {
        let chain = self.chain;

        // τ | μ₁, μ₂, σ
        let Draw { mu_1, mu_2, sigma, .. } = self.current;
        model.fill_tau_log_weights(mu_1, mu_2, sigma, &mut self.tau_weights);
        let k = sample_log_weights(&self.tau_weights, &mut self.rng)
            .ok_or(ModelError::NoFiniteTauCandidate { chain, iteration })?;
        self.current.tau = k + 1;
        self.log_posterior = model.log_posterior(&self.current);
        if !self.log_posterior.is_finite() {
            return Err(ModelError::NonFiniteLogPosterior { chain, iteration, param: Param::Tau });
        }

        // μ₁, μ₂
        let proposal = Draw { mu_1: self.mu_1_step.propose(self.current.mu_1, &mut self.rng), ..self.current };
        let accepted = self.try_accept(model, proposal, 0.0);
        self.mu_1_step.record(accepted);

        let proposal = Draw { mu_2: self.mu_2_step.propose(self.current.mu_2, &mut self.rng), ..self.current };
        let accepted = self.try_accept(model, proposal, 0.0);
        self.mu_2_step.record(accepted);

        // σ on the log scale
        let log_sigma = self.current.sigma.ln();
        let proposed_log_sigma = self.log_sigma_step.propose(log_sigma, &mut self.rng);
        let proposal = Draw { sigma: proposed_log_sigma.exp(), ..self.current };
        let accepted = self.try_accept(model, proposal, proposed_log_sigma - log_sigma);
        self.log_sigma_step.record(accepted);

        Ok(())
    }

    /// Metropolis step toward `proposal`; `log_jacobian` is added to the
    /// ratio for reparameterised proposals.
    fn try_accept(&mut self, model: &ChangePointModel, proposal: Draw, log_jacobian: f64) -> bool {
        let proposed = model.log_posterior(&proposal);
        let accepted = proposed.is_finite()
            && metropolis_accept(proposed - self.log_posterior + log_jacobian, &mut self.rng);
        if accepted {
            self.current = proposal;
            self.log_posterior = proposed;
        }
        accepted
    }

    pub(crate) fn freeze_adaptation(&mut self) {
        self.mu_1_step.freeze();
        self.mu_2_step.freeze();
        self.log_sigma_step.freeze();
    }

    pub(crate) fn acceptance(&self) -> AcceptanceStats {
        AcceptanceStats {
            mu_1: self.mu_1_step.acceptance_rate(),
            mu_2: self.mu_2_step.acceptance_rate(),
            sigma: self.log_sigma_step.acceptance_rate(),
        }
    }
}

/// Run chain `chain` for `tune + draws` iterations, keeping the last `draws`.
///
/// Errors
/// ------
/// - `Cancelled` when `cancel` is set at the start of any iteration.
/// - Sampling errors from [`ChainState::sweep`].
pub(crate) fn run_chain(
    model: &ChangePointModel, config: &BayesianModelConfig, chain: usize, cancel: &CancellationToken,
) -> ModelResult<ChainOutput> {
    let tune = config.tune();
    let mut state = ChainState::initialize(model, config, chain);
    let mut draws = Vec::with_capacity(config.draws());

    for iteration in 0..tune + config.draws() {
        if cancel.is_cancelled() {
            return Err(ModelError::Cancelled { chain, iteration });
        }
        if iteration == tune {
            state.freeze_adaptation();
        }
        state.sweep(model, iteration)?;
        if iteration >= tune {
            draws.push(state.current());
        }
    }

    let acceptance = state.acceptance();
    debug!(
        chain,
        accept_mu_1 = acceptance.mu_1,
        accept_mu_2 = acceptance.mu_2,
        accept_sigma = acceptance.sigma,
        scale_mu_1 = state.mu_1_step.scale(),
        scale_mu_2 = state.mu_2_step.scale(),
        scale_log_sigma = state.log_sigma_step.scale(),
        "chain finished"
    );
    Ok(ChainOutput { draws, acceptance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changepoint::model::build_model;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Initial state validity (τ in range, σ > 0, finite log posterior).
    // - Output length and support of retained draws.
    // - Seed determinism of a single chain.
    // - Cancellation observed before the first iteration.
    // -------------------------------------------------------------------------

    fn model_and_config() -> (ChangePointModel, BayesianModelConfig) {
        let y: Vec<f64> = (0..40_usize)
            .map(|i| {
                let level = if i < 20 { 0.01 } else { -0.01 };
                level + 0.003 * ((i * 7 % 5) as f64 - 2.0)
            })
            .collect();
        let config = BayesianModelConfig::new(200, 100, 11, 0.95, 0.0, 0.1, 0.1).unwrap();
        (build_model(&y, &config).unwrap(), config)
    }

    #[test]
    // Purpose
    // -------
    // Verify the starting point lies in the support.
    //
    // Given
    // -----
    // - A 40-point series and seed 11.
    //
    // Expect
    // ------
    // - 1 <= τ <= 39, σ > 0, finite log posterior.
    fn initial_state_is_in_support() {
        // Arrange
        let (model, config) = model_and_config();

        // Act
        let state = ChainState::initialize(&model, &config, 0);

        // Assert
        let d = state.current();
        assert!((1..=39).contains(&d.tau));
        assert!(d.sigma > 0.0);
        assert!(state.log_posterior.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Ensure `run_chain` keeps exactly `draws` in-support draws and is
    // reproducible for a fixed seed.
    //
    // Given
    // -----
    // - draws = 200, tune = 100, chain 0 run twice.
    //
    // Expect
    // ------
    // - 200 draws each, identical across runs, all with valid τ and σ.
    fn run_chain_is_deterministic_and_in_support() {
        // Arrange
        let (model, config) = model_and_config();
        let token = CancellationToken::new();

        // Act
        let a = run_chain(&model, &config, 0, &token).unwrap();
        let b = run_chain(&model, &config, 0, &token).unwrap();

        // Assert
        assert_eq!(a.draws.len(), 200);
        assert_eq!(a, b);
        assert!(a.draws.iter().all(|d| (1..=39).contains(&d.tau) && d.sigma > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify cancellation is observed at the first iteration boundary.
    //
    // Given
    // -----
    // - A token cancelled before the run.
    //
    // Expect
    // ------
    // - `Cancelled { chain: 1, iteration: 0 }`.
    fn pre_cancelled_token_stops_before_first_sweep() {
        // Arrange
        let (model, config) = model_and_config();
        let token = CancellationToken::new();
        token.cancel();

        // Act
        let err = run_chain(&model, &config, 1, &token).unwrap_err();

        // Assert
        assert_eq!(err, ModelError::Cancelled { chain: 1, iteration: 0 });
    }
}

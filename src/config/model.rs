//! config::model — validated settings for the Bayesian change-point model.
//!
//! Purpose
//! -------
//! Bundle the MCMC budget (draws, tuning iterations, chains, seed), the
//! credible-interval mass used in posterior summaries, and the prior
//! hyper-parameters of the single change-point model into one immutable value.
//!
//! Invariants & assumptions
//! ------------------------
//! - `draws ≥ 1`, `tune ≥ 1`, `chains ≥ 1`.
//! - `0 < hdi_prob < 1`.
//! - `mu_prior_mean` is finite; `mu_prior_sigma` and `sigma_prior_sigma` are
//!   finite and strictly positive.
//! - Values are never clamped: any violation is reported as a [`ConfigError`].
//!
//! Conventions
//! -----------
//! - Fields are private and exposed through accessors so that a constructed
//!   config cannot drift out of its validated state.
//! - Chain `c` is seeded with `random_seed + c` by the sampler.
use serde::Serialize;

use crate::config::{
    constants::{
        DEFAULT_CHAINS, DEFAULT_HDI_PROB, DEFAULT_MCMC_DRAWS, DEFAULT_MCMC_TUNE,
        DEFAULT_RANDOM_SEED, PRIOR_MU_MEAN, PRIOR_MU_SIGMA, PRIOR_SIGMA_SIGMA,
    },
    errors::{ConfigError, ConfigResult},
};

/// BayesianModelConfig — MCMC budget and prior hyper-parameters.
///
/// Fields
/// ------
/// - `draws`: retained post-tuning iterations per chain.
/// - `tune`: discarded burn-in iterations per chain (also the window in which
///   proposal scales adapt).
/// - `random_seed`: base seed; chain `c` uses `random_seed + c`.
/// - `hdi_prob`: mass of the highest-density intervals in summaries.
/// - `mu_prior_mean`, `mu_prior_sigma`: Normal prior on both regime means.
/// - `sigma_prior_sigma`: scale of the half-Normal prior on the shared
///   volatility.
/// - `chains`: number of independent chains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BayesianModelConfig {
    draws: usize,
    tune: usize,
    random_seed: u64,
    hdi_prob: f64,
    mu_prior_mean: f64,
    mu_prior_sigma: f64,
    sigma_prior_sigma: f64,
    chains: usize,
}

impl BayesianModelConfig {
    /// Construct a validated configuration with the default chain count.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidDraws` / `InvalidTune` when the value is 0.
    /// - `ConfigError::InvalidHdiProb` when `hdi_prob ∉ (0, 1)` or is NaN.
    /// - `ConfigError::InvalidPriorMean` when `mu_prior_mean` is not finite.
    /// - `ConfigError::InvalidPriorScale` when either prior scale is not a
    ///   finite positive number.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use brent_changepoint::config::BayesianModelConfig;
    /// let cfg = BayesianModelConfig::new(500, 500, 7, 0.9, 0.0, 0.1, 0.1).unwrap();
    /// assert_eq!(cfg.draws(), 500);
    /// assert!(BayesianModelConfig::new(0, 500, 7, 0.9, 0.0, 0.1, 0.1).is_err());
    /// ```
    pub fn new(
        draws: usize, tune: usize, random_seed: u64, hdi_prob: f64, mu_prior_mean: f64,
        mu_prior_sigma: f64, sigma_prior_sigma: f64,
    ) -> ConfigResult<Self> {
        if draws == 0 {
            return Err(ConfigError::InvalidDraws { value: 0 });
        }
        if tune == 0 {
            return Err(ConfigError::InvalidTune { value: 0 });
        }
        // Written as a negated conjunction so that NaN is rejected too.
        if !(hdi_prob > 0.0 && hdi_prob < 1.0) {
            return Err(ConfigError::InvalidHdiProb { value: hdi_prob });
        }
        if !mu_prior_mean.is_finite() {
            return Err(ConfigError::InvalidPriorMean { value: mu_prior_mean });
        }
        validate_scale("mu_prior_sigma", mu_prior_sigma)?;
        validate_scale("sigma_prior_sigma", sigma_prior_sigma)?;

        Ok(BayesianModelConfig {
            draws,
            tune,
            random_seed,
            hdi_prob,
            mu_prior_mean,
            mu_prior_sigma,
            sigma_prior_sigma,
            chains: DEFAULT_CHAINS,
        })
    }

    /// Return a copy of this config that runs `chains` independent chains.
    ///
    /// Errors with `ConfigError::InvalidChains` when `chains == 0`.
    pub fn with_chains(self, chains: usize) -> ConfigResult<Self> {
        if chains == 0 {
            return Err(ConfigError::InvalidChains { value: 0 });
        }
        Ok(BayesianModelConfig { chains, ..self })
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn tune(&self) -> usize {
        self.tune
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    pub fn hdi_prob(&self) -> f64 {
        self.hdi_prob
    }

    pub fn mu_prior_mean(&self) -> f64 {
        self.mu_prior_mean
    }

    pub fn mu_prior_sigma(&self) -> f64 {
        self.mu_prior_sigma
    }

    pub fn sigma_prior_sigma(&self) -> f64 {
        self.sigma_prior_sigma
    }

    pub fn chains(&self) -> usize {
        self.chains
    }

    /// Seed used by chain `chain`.
    pub fn chain_seed(&self, chain: usize) -> u64 {
        self.random_seed.wrapping_add(chain as u64)
    }
}

impl Default for BayesianModelConfig {
    fn default() -> Self {
        BayesianModelConfig {
            draws: DEFAULT_MCMC_DRAWS,
            tune: DEFAULT_MCMC_TUNE,
            random_seed: DEFAULT_RANDOM_SEED,
            hdi_prob: DEFAULT_HDI_PROB,
            mu_prior_mean: PRIOR_MU_MEAN,
            mu_prior_sigma: PRIOR_MU_SIGMA,
            sigma_prior_sigma: PRIOR_SIGMA_SIGMA,
            chains: DEFAULT_CHAINS,
        }
    }
}

fn validate_scale(field: &'static str, value: f64) -> ConfigResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidPriorScale { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Documented defaults.
    // - Each rejection branch of `BayesianModelConfig::new` and `with_chains`.
    // - Per-chain seed offsets.
    // -------------------------------------------------------------------------

    fn valid() -> BayesianModelConfig {
        BayesianModelConfig::new(100, 50, 1, 0.9, 0.0, 0.1, 0.1).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that `Default` matches the documented baseline.
    //
    // Given
    // -----
    // - No inputs.
    //
    // Expect
    // ------
    // - draws=2000, tune=1000, seed=42, hdi_prob=0.95, priors (0, 0.1, 0.1),
    //   chains=2.
    fn default_matches_documented_values() {
        // Arrange / Act
        let cfg = BayesianModelConfig::default();

        // Assert
        assert_eq!(cfg.draws(), 2000);
        assert_eq!(cfg.tune(), 1000);
        assert_eq!(cfg.random_seed(), 42);
        assert_eq!(cfg.hdi_prob(), 0.95);
        assert_eq!(cfg.mu_prior_mean(), 0.0);
        assert_eq!(cfg.mu_prior_sigma(), 0.1);
        assert_eq!(cfg.sigma_prior_sigma(), 0.1);
        assert_eq!(cfg.chains(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure zero draws or zero tuning iterations are rejected.
    //
    // Given
    // -----
    // - `draws = 0` in one call and `tune = 0` in another.
    //
    // Expect
    // ------
    // - `InvalidDraws` and `InvalidTune` respectively.
    fn zero_draws_or_tune_is_rejected() {
        // Act
        let draws = BayesianModelConfig::new(0, 10, 1, 0.9, 0.0, 0.1, 0.1);
        let tune = BayesianModelConfig::new(10, 0, 1, 0.9, 0.0, 0.1, 0.1);

        // Assert
        assert_eq!(draws, Err(ConfigError::InvalidDraws { value: 0 }));
        assert_eq!(tune, Err(ConfigError::InvalidTune { value: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `hdi_prob` outside the open unit interval is rejected,
    // including both endpoints and NaN.
    //
    // Given
    // -----
    // - hdi_prob ∈ {0.0, 1.0, 1.5, -0.1, NaN}.
    //
    // Expect
    // ------
    // - Every call fails with `InvalidHdiProb`.
    fn hdi_prob_outside_open_unit_interval_is_rejected() {
        for bad in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
            // Act
            let result = BayesianModelConfig::new(10, 10, 1, bad, 0.0, 0.1, 0.1);

            // Assert
            match result {
                Err(ConfigError::InvalidHdiProb { .. }) => (),
                other => panic!("expected InvalidHdiProb for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-positive or non-finite prior scales are rejected with the
    // name of the offending field.
    //
    // Given
    // -----
    // - `mu_prior_sigma = 0.0`, then `sigma_prior_sigma = inf`.
    //
    // Expect
    // ------
    // - `InvalidPriorScale` whose `field()` names the right scale.
    fn invalid_prior_scales_name_their_field() {
        // Act
        let mu = BayesianModelConfig::new(10, 10, 1, 0.9, 0.0, 0.0, 0.1).unwrap_err();
        let sigma =
            BayesianModelConfig::new(10, 10, 1, 0.9, 0.0, 0.1, f64::INFINITY).unwrap_err();

        // Assert
        assert_eq!(mu.field(), "mu_prior_sigma");
        assert_eq!(sigma.field(), "sigma_prior_sigma");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a non-finite prior mean is rejected.
    //
    // Given
    // -----
    // - `mu_prior_mean = NaN`.
    //
    // Expect
    // ------
    // - `InvalidPriorMean`.
    fn non_finite_prior_mean_is_rejected() {
        let err = BayesianModelConfig::new(10, 10, 1, 0.9, f64::NAN, 0.1, 0.1).unwrap_err();
        assert_eq!(err.field(), "mu_prior_mean");
    }

    #[test]
    // Purpose
    // -------
    // Check that `with_chains` validates the count and leaves other fields
    // untouched.
    //
    // Given
    // -----
    // - A valid config; `with_chains(0)` and `with_chains(4)`.
    //
    // Expect
    // ------
    // - 0 fails with `InvalidChains`; 4 succeeds and keeps `draws`.
    fn with_chains_validates_and_preserves_other_fields() {
        // Act
        let bad = valid().with_chains(0);
        let good = valid().with_chains(4).unwrap();

        // Assert
        assert_eq!(bad, Err(ConfigError::InvalidChains { value: 0 }));
        assert_eq!(good.chains(), 4);
        assert_eq!(good.draws(), 100);
    }

    #[test]
    // Purpose
    // -------
    // Ensure chains are seeded with consecutive offsets from the base seed.
    //
    // Given
    // -----
    // - random_seed = 1.
    //
    // Expect
    // ------
    // - chain 0 → 1, chain 3 → 4.
    fn chain_seed_offsets_base_seed() {
        let cfg = valid();
        assert_eq!(cfg.chain_seed(0), 1);
        assert_eq!(cfg.chain_seed(3), 4);
    }
}

//! Default values and admissible bounds shared by the configuration bundles.

// ---- MCMC ----
pub const DEFAULT_MCMC_DRAWS: usize = 2000;
pub const DEFAULT_MCMC_TUNE: usize = 1000;
pub const DEFAULT_RANDOM_SEED: u64 = 42;
pub const DEFAULT_HDI_PROB: f64 = 0.95;
pub const DEFAULT_CHAINS: usize = 2;

// ---- Priors ----
pub const PRIOR_MU_MEAN: f64 = 0.0;
pub const PRIOR_MU_SIGMA: f64 = 0.1;
pub const PRIOR_SIGMA_SIGMA: f64 = 0.1;

// ---- Convergence ----
pub const DEFAULT_RHAT_THRESHOLD: f64 = 1.01;
/// Lower edge of the open acceptance band for R-hat.
pub const RHAT_LOWER_BOUND: f64 = 0.99;

// ---- Event matching ----
pub const DEFAULT_EVENT_WINDOW_DAYS: u32 = 30;
pub const MIN_EVENT_WINDOW_DAYS: u32 = 1;
pub const MAX_EVENT_WINDOW_DAYS: u32 = 365;

// ---- Preprocessing ----
pub const DEFAULT_ROLLING_WINDOW: usize = 30;
pub const MIN_ROLLING_WINDOW: usize = 2;

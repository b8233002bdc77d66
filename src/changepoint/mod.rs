//! changepoint — Bayesian single change-point detection on return series.
//!
//! Purpose
//! -------
//! Provide the inference engine of the crate: a single-break Normal model
//! with a discrete change-point location, a Metropolis-within-Gibbs sampler,
//! and the reductions callers need from its draws (point estimate, posterior
//! summary, convergence diagnostics).
//!
//! Key behaviors
//! -------------
//! - [`model`]: [`build_model`] validates returns and precomputes prefix sums;
//!   [`ChangePointModel`] evaluates log prior, log likelihood, and the full
//!   conditional of τ.
//! - [`sampler`]: [`sample`] / [`sample_with_cancel`] run independent,
//!   deterministically seeded chains in parallel and return
//!   [`PosteriorSamples`].
//! - [`results`]: [`extract_result`] produces a [`ChangePointResult`]
//!   (date, regime means, volatility, impact, confidence, τ HDI).
//! - [`diagnostics`]: [`check_convergence`] flags each parameter by split-chain
//!   R-hat; [`effective_sample_size`] estimates ESS.
//! - [`summary`]: [`summarize`] builds per-parameter summary rows.
//! - [`analysis`]: [`detect_change_point`] chains all of the above for one
//!   dated return series.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returns are finite with at least 3 observations; τ ranges over
//!   `1..=n−1` and indexes the first post-change observation.
//! - Posterior samples always hold ≥ 1 chain of equal-length draws.
//! - All computation is synchronous and CPU-bound. The only concurrency is
//!   chain-level parallelism inside the sampler; the model and config are
//!   shared immutably.
//!
//! Conventions
//! -----------
//! - Errors are reported as [`ModelError`] with an
//!   [`ErrorKind`](crate::errors::ErrorKind) from the crate taxonomy.
//! - Logging uses `tracing`: `info` at sampling start/finish and detection,
//!   `debug` per chain, `warn` for unconverged parameters. The library never
//!   installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! 1. Compute a [`ReturnSeries`](crate::preprocessing::ReturnSeries).
//! 2. Call [`detect_change_point`], or drive [`build_model`] → [`sample`] →
//!    [`extract_result`] / [`check_convergence`] manually.
//! 3. Pass `result.date` to [`events`](crate::events) for association.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; the integration test under `tests/`
//!   recovers an injected shift end to end.

pub mod analysis;
pub mod diagnostics;
pub mod errors;
pub mod model;
pub mod params;
pub mod posterior;
pub mod results;
pub mod sampler;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analysis::{DetectionOutcome, detect_change_point};
pub use self::diagnostics::{
    ConvergenceReport, check_convergence, check_convergence_default, effective_sample_size,
    split_rhat,
};
pub use self::errors::{ModelError, ModelResult};
pub use self::model::{ChangePointModel, build_model};
pub use self::params::{Draw, Param, ParamValue};
pub use self::posterior::{AcceptanceStats, PosteriorSamples};
pub use self::results::{ChangePointResult, extract_result};
pub use self::sampler::{CancellationToken, sample, sample_with_cancel};
pub use self::summary::{ParameterSummary, hdi, summarize};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        CancellationToken, ChangePointModel, ChangePointResult, ConvergenceReport, Draw,
        ModelError, ModelResult, Param, PosteriorSamples, build_model, check_convergence,
        detect_change_point, extract_result, sample,
    };
}

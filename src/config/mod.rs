//! config — immutable, validated parameter bundles.
//!
//! Purpose
//! -------
//! Collect every tunable of a change-point analysis run in one place: the
//! MCMC budget and priors ([`BayesianModelConfig`]), event matching
//! ([`EventMatchingConfig`]), and return preprocessing
//! ([`PreprocessingConfig`]), plus the aggregate [`ProjectConfig`].
//!
//! Key behaviors
//! -------------
//! - Every constructor validates its inputs and fails fast with a
//!   [`ConfigError`] naming the offending field and its admissible range.
//! - `Default` implementations reproduce the documented baseline values in
//!   [`constants`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed config is never mutated; `with_*` helpers return new,
//!   re-validated values.
//! - No config reads files or environment variables; callers decide where
//!   values come from (CLI flags, request payloads, Python kwargs).
//!
//! Testing notes
//! -------------
//! - Each submodule tests its defaults and every rejection branch.

pub mod constants;
pub mod errors;
pub mod matching;
pub mod model;
pub mod preprocessing;

use serde::Serialize;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ConfigError, ConfigResult};
pub use self::matching::EventMatchingConfig;
pub use self::model::BayesianModelConfig;
pub use self::preprocessing::PreprocessingConfig;

/// ProjectConfig — the three sub-configurations of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectConfig {
    pub preprocessing: PreprocessingConfig,
    pub model: BayesianModelConfig,
    pub event_matching: EventMatchingConfig,
}

impl ProjectConfig {
    pub fn new(
        preprocessing: PreprocessingConfig, model: BayesianModelConfig,
        event_matching: EventMatchingConfig,
    ) -> ProjectConfig {
        ProjectConfig { preprocessing, model, event_matching }
    }
}

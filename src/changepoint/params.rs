//! changepoint::params — parameter tags and the fixed-size draw record.
//!
//! A [`Draw`] is one retained MCMC state `{tau, mu_1, mu_2, sigma}`. It is a
//! small `Copy` value; collections of draws are indexed per parameter through
//! [`Param`] so diagnostics can iterate parameters without string lookups.
use std::str::FromStr;

use serde::Serialize;

/// Tag for one model parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Param {
    #[serde(rename = "tau")]
    Tau,
    #[serde(rename = "mu_1")]
    Mu1,
    #[serde(rename = "mu_2")]
    Mu2,
    #[serde(rename = "sigma")]
    Sigma,
}

impl Param {
    /// All parameters in reporting order.
    pub const ALL: [Param; 4] = [Param::Tau, Param::Mu1, Param::Mu2, Param::Sigma];

    pub fn name(&self) -> &'static str {
        match self {
            Param::Tau => "tau",
            Param::Mu1 => "mu_1",
            Param::Mu2 => "mu_2",
            Param::Sigma => "sigma",
        }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Param::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("Unknown parameter '{s}'; expected one of tau, mu_1, mu_2, sigma."))
    }
}

/// Value of one parameter in a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Discrete(usize),
    Continuous(f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Discrete(v) => v as f64,
            ParamValue::Continuous(v) => v,
        }
    }
}

/// One retained MCMC state.
///
/// Invariants
/// ----------
/// - `1 <= tau <= n − 1` for the model it was drawn from.
/// - `sigma > 0` and all continuous fields are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Draw {
    pub tau: usize,
    pub mu_1: f64,
    pub mu_2: f64,
    pub sigma: f64,
}

impl Draw {
    pub fn get(&self, param: Param) -> ParamValue {
        match param {
            Param::Tau => ParamValue::Discrete(self.tau),
            Param::Mu1 => ParamValue::Continuous(self.mu_1),
            Param::Mu2 => ParamValue::Continuous(self.mu_2),
            Param::Sigma => ParamValue::Continuous(self.sigma),
        }
    }
}

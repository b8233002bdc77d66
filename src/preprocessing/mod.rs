//! preprocessing — dated series, returns, and rolling statistics.
//!
//! Purpose
//! -------
//! Provide the thin numeric layer between an external price loader and the
//! change-point engine: validated dated containers ([`PriceSeries`],
//! [`ReturnSeries`]), price-to-return conversion, and fixed-window rolling
//! statistics used for volatility context.
//!
//! Key behaviors
//! -------------
//! - [`compute_returns`] / [`compute_return_values`] produce `n − 1` log or
//!   simple returns, dropping the first observation.
//! - [`rolling_mean`] / [`rolling_std`] leave the first `window − 1` outputs
//!   missing instead of shrinking the window.
//!
//! Invariants & assumptions
//! ------------------------
//! - All inputs are already parsed; this module performs no I/O.
//! - Every failure is a [`PreprocessError`] of kind `InvalidInput`.

pub mod errors;
pub mod returns;
pub mod rolling;
pub mod series;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{PreprocessError, PreprocessResult};
pub use self::returns::{ReturnMethod, compute_return_values, compute_returns};
pub use self::rolling::{rolling_mean, rolling_std};
pub use self::series::{PriceSeries, ReturnSeries};

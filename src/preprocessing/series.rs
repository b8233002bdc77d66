//! preprocessing::series — validated, immutable dated series.
//!
//! Purpose
//! -------
//! Hold price and return observations together with their calendar dates so
//! that a change-point index can always be mapped back to a date.
//!
//! Invariants & assumptions
//! ------------------------
//! - Dates are strictly increasing (sorted, no duplicates); gaps are allowed
//!   (weekends, holidays).
//! - Values are finite; prices are additionally strictly positive.
//! - Date and value columns have equal length.
//!
//! Conventions
//! -----------
//! - Values live in `ndarray::Array1<f64>`; dates in a `Vec<NaiveDate>`.
//! - Construction is the only validation point; accessors hand out shared
//!   borrows and there is no mutation path.
use chrono::NaiveDate;
use ndarray::Array1;

use crate::preprocessing::errors::{PreprocessError, PreprocessResult};

/// PriceSeries — strictly positive prices indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Array1<f64>,
}

impl PriceSeries {
    /// Validate and wrap a price column.
    ///
    /// Errors
    /// ------
    /// - `LengthMismatch`, `DuplicateDate`, `UnsortedDates`, `NonFiniteValue`
    ///   as for every dated series.
    /// - `NonPositivePrice` when any price is ≤ 0.
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> PreprocessResult<Self> {
        validate_dated_values(&dates, &prices)?;
        if let Some((index, &value)) = prices.iter().enumerate().find(|(_, p)| **p <= 0.0) {
            return Err(PreprocessError::NonPositivePrice { index, value });
        }
        Ok(PriceSeries { dates, prices: Array1::from(prices) })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &Array1<f64> {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// ReturnSeries — finite returns indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Array1<f64>,
}

impl ReturnSeries {
    /// Validate and wrap a return column.
    ///
    /// Errors with `LengthMismatch`, `DuplicateDate`, `UnsortedDates` or
    /// `NonFiniteValue`.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> PreprocessResult<Self> {
        validate_dated_values(&dates, &values)?;
        Ok(ReturnSeries { dates, values: Array1::from(values) })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Contiguous view of the values, as consumed by the model builder.
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate over `(date, value)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// Check the shared invariants of a dated column pair.
pub(crate) fn validate_dated_values(dates: &[NaiveDate], values: &[f64]) -> PreprocessResult<()> {
    if dates.len() != values.len() {
        return Err(PreprocessError::LengthMismatch { dates: dates.len(), values: values.len() });
    }
    for (index, pair) in dates.windows(2).enumerate() {
        let (previous, date) = (pair[0], pair[1]);
        if date == previous {
            return Err(PreprocessError::DuplicateDate { index: index + 1, date });
        }
        if date < previous {
            return Err(PreprocessError::UnsortedDates { index: index + 1, previous, date });
        }
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(PreprocessError::NonFiniteValue { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of sorted, unique, finite series (with calendar gaps).
    // - Each rejection branch: length mismatch, duplicate, unsorted,
    //   non-finite, non-positive price.
    // -------------------------------------------------------------------------

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed series with a weekend gap is accepted and
    // iterates in order.
    //
    // Given
    // -----
    // - Friday and Monday dates with finite returns.
    //
    // Expect
    // ------
    // - Construction succeeds; `iter()` yields the original pairs.
    fn return_series_accepts_gapped_sorted_dates() {
        // Arrange
        let dates = vec![d(2020, 1, 3), d(2020, 1, 6)];

        // Act
        let series = ReturnSeries::new(dates.clone(), vec![0.01, -0.02]).unwrap();

        // Assert
        let pairs: Vec<_> = series.iter().collect();
        assert_eq!(pairs, vec![(dates[0], 0.01), (dates[1], -0.02)]);
        assert_eq!(series.as_slice(), &[0.01, -0.02]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure duplicate and out-of-order dates are rejected with the index
    // of the offending row.
    //
    // Given
    // -----
    // - [Jan 2, Jan 2] and [Jan 3, Jan 2].
    //
    // Expect
    // ------
    // - `DuplicateDate { index: 1 }` and `UnsortedDates { index: 1 }`.
    fn duplicate_and_unsorted_dates_are_rejected() {
        // Act
        let dup = ReturnSeries::new(vec![d(2020, 1, 2), d(2020, 1, 2)], vec![0.0, 0.0]);
        let unsorted = ReturnSeries::new(vec![d(2020, 1, 3), d(2020, 1, 2)], vec![0.0, 0.0]);

        // Assert
        assert_eq!(dup, Err(PreprocessError::DuplicateDate { index: 1, date: d(2020, 1, 2) }));
        match unsorted {
            Err(PreprocessError::UnsortedDates { index: 1, .. }) => (),
            other => panic!("expected UnsortedDates, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the value-level guards.
    //
    // Given
    // -----
    // - A return series containing NaN; a price series containing 0.
    // - Mismatched column lengths.
    //
    // Expect
    // ------
    // - `NonFiniteValue`, `NonPositivePrice`, and `LengthMismatch`.
    fn value_guards_reject_bad_rows() {
        // Act
        let nan = ReturnSeries::new(vec![d(2020, 1, 2), d(2020, 1, 3)], vec![0.0, f64::NAN]);
        let zero = PriceSeries::new(vec![d(2020, 1, 2), d(2020, 1, 3)], vec![50.0, 0.0]);
        let short = PriceSeries::new(vec![d(2020, 1, 2)], vec![50.0, 51.0]);

        // Assert
        match nan {
            Err(PreprocessError::NonFiniteValue { index: 1, value }) => assert!(value.is_nan()),
            other => panic!("expected NonFiniteValue, got {other:?}"),
        }
        assert_eq!(zero, Err(PreprocessError::NonPositivePrice { index: 1, value: 0.0 }));
        assert_eq!(short, Err(PreprocessError::LengthMismatch { dates: 1, values: 2 }));
    }
}

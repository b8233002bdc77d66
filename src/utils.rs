//! utils — input conversion helpers shared by the Rust API and the PyO3
//! bindings.
use chrono::NaiveDate;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::events::Event;
use crate::preprocessing::errors::{PreprocessError, PreprocessResult};

/// ISO date format accepted everywhere in the crate.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD` strings (surrounding whitespace ignored).
///
/// Errors with `PreprocessError::InvalidDate` naming the first bad entry.
pub fn parse_iso_dates<S: AsRef<str>>(values: &[S]) -> PreprocessResult<Vec<NaiveDate>> {
    values
        .iter()
        .enumerate()
        .map(|(index, s)| {
            NaiveDate::parse_from_str(s.as_ref().trim(), ISO_DATE_FORMAT)
                .map_err(|_| PreprocessError::InvalidDate { index, value: s.as_ref().to_string() })
        })
        .collect()
}

/// Borrow a 1-D float64 view of a numpy array, pandas Series, or Python
/// sequence, copying only when the input is not already contiguous float64.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert a sequence of dicts into events.
///
/// Each dict needs a date under `"date"` or `"Date"` (ISO string) and a label
/// under `"event"` or `"Event"`; `"description"` / `"Description"` is optional.
#[cfg(feature = "python-bindings")]
pub fn extract_events<'py>(raw_events: &Bound<'py, PyAny>) -> PyResult<Vec<Event>> {
    let rows: Vec<Bound<'py, PyDict>> = raw_events
        .extract()
        .map_err(|_| PyTypeError::new_err("events must be a sequence of dicts"))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let date: String = lookup(row, "date", "Date")?
                .ok_or_else(|| PyValueError::new_err(format!("event {index} has no date")))?;
            let label: String = lookup(row, "event", "Event")?
                .ok_or_else(|| PyValueError::new_err(format!("event {index} has no label")))?;
            let description: String = lookup(row, "description", "Description")?.unwrap_or_default();
            let date = parse_iso_dates(&[date])?.remove(0);
            Ok(Event::new(date, label, description))
        })
        .collect()
}

#[cfg(feature = "python-bindings")]
fn lookup<'py>(row: &Bound<'py, PyDict>, key: &str, alt: &str) -> PyResult<Option<String>> {
    match row.get_item(key)?.or(row.get_item(alt)?) {
        Some(value) if !value.is_none() => Ok(Some(value.str()?.to_string())),
        _ => Ok(None),
    }
}

//! Quality control and summary statistics for raw measurement arrays.
//!
//! Filtering discards values, it never clips them: NaN/infinite values,
//! the variable's declared fill value, ARGO sentinels, and anything outside
//! the parameter's plausible range are dropped before statistics are taken.

/// ARGO files mark missing data with 99999.0; anything at or beyond this
/// magnitude is treated as a sentinel.
pub const ARGO_SENTINEL: f64 = 99_999.0;

/// Summary statistics over a non-empty set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

pub fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

pub fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}

/// True for NaN/infinite values and the declared fill value only.
///
/// Used where 99999 is a legitimate magnitude, such as time offsets in
/// seconds.
pub fn is_fill(value: f64, fill_value: Option<f64>) -> bool {
    !value.is_finite() || fill_value.map_or(false, |fill| value == fill)
}

/// True when `value` is a missing-data marker rather than a measurement.
pub fn is_missing(value: f64, fill_value: Option<f64>) -> bool {
    if !value.is_finite() || value.abs() >= ARGO_SENTINEL {
        return true;
    }
    match fill_value {
        Some(fill) => value == fill,
        None => false,
    }
}

/// Keep the values that are present and inside the inclusive `range`.
pub fn clean_values(values: &[f64], fill_value: Option<f64>, range: (f64, f64)) -> Vec<f64> {
    let (lo, hi) = range;
    values
        .iter()
        .copied()
        .filter(|v| !is_missing(*v, fill_value))
        .filter(|v| *v >= lo && *v <= hi)
        .collect()
}

/// Min/max/mean/population std over `values`; `None` when empty.
///
/// The mean is clamped into `[min, max]` so rounding in the running sum can
/// never push it past the extremes.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = values.iter().sum();
    let mean = (sum / count as f64).clamp(min, max);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Some(Summary {
        min,
        max,
        mean,
        std: variance.sqrt(),
        count,
    })
}

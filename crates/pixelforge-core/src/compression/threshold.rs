//! Coefficient thresholding by distinct-magnitude quantile.
//!
//! The threshold is a quantile over the **set** of distinct magnitudes
//! (rounded to three decimals), not over every coefficient. Many repeated
//! small magnitudes therefore count once, which zeroes fewer coefficients
//! than a population percentile would at the same percentage.

use std::collections::BTreeSet;

use super::haar::Matrix;

/// Magnitudes are compared at this many steps per unit (3 decimals).
const MAGNITUDE_SCALE: f64 = 1000.0;

/// Chosen threshold and the size of the distinct-magnitude set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub value: f64,
    pub distinct_magnitudes: usize,
}

/// Pick the threshold for `percentage` (already validated to `[0, 100]`).
///
/// At 100 % the threshold is `f64::MAX`, which clears every coefficient.
/// Otherwise it is the distinct magnitude at index
/// `round(count × percentage / 100)`, or `f64::MAX` past the end.
pub fn select(channels: &[Matrix], percentage: f64) -> Threshold {
    let distinct: BTreeSet<u64> = channels
        .iter()
        .flat_map(|m| m.values().iter())
        .map(|v| (v.abs() * MAGNITUDE_SCALE).round() as u64)
        .collect();
    let count = distinct.len();

    let value = if percentage >= 100.0 {
        f64::MAX
    } else {
        let index = (count as f64 * percentage / 100.0).round() as usize;
        distinct
            .iter()
            .nth(index)
            .map_or(f64::MAX, |&k| k as f64 / MAGNITUDE_SCALE)
    };

    Threshold {
        value,
        distinct_magnitudes: count,
    }
}

/// Zero every coefficient whose magnitude is below `threshold`; returns how
/// many were cleared.
pub fn apply(channels: &mut [Matrix], threshold: f64) -> usize {
    let mut zeroed = 0;
    for v in channels.iter_mut().flat_map(|m| m.values_mut().iter_mut()) {
        if v.abs() < threshold {
            *v = 0.0;
            zeroed += 1;
        }
    }
    zeroed
}

//! Volume anomaly detection

use crate::models::indicators::VolumeAnalysis;

/// Compare the current volume against the trailing `period` average.
///
/// `is_high` is a strict comparison: exactly `average * multiplier` is not
/// anomalous. Negative and non-finite entries are dropped before the window
/// is taken; returns `None` if fewer than `period` values remain.
pub fn analyze_volume(volumes: &[f64], period: usize, multiplier: f64) -> Option<VolumeAnalysis> {
    if period == 0 || volumes.len() < period {
        return None;
    }

    let valid: Vec<f64> = volumes
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();
    if valid.len() < period {
        return None;
    }

    let window = &valid[valid.len() - period..];
    let average = window.iter().sum::<f64>() / period as f64;
    let current = *valid.last()?;

    Some(VolumeAnalysis {
        average,
        current,
        is_high: current > average * multiplier,
    })
}

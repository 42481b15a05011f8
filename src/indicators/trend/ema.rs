//! EMA (Exponential Moving Average) indicator

use crate::indicators::finite_values;

/// Calculate the EMA of a series.
///
/// Seeded with the simple mean of the first `period` values, then each
/// subsequent value is blended in with weight `2 / (period + 1)`.
/// Returns `None` if fewer than `period` finite values remain after
/// filtering.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let valid = finite_values(prices);
    if valid.len() < period {
        return None;
    }

    let weight = 2.0 / (period as f64 + 1.0);
    let mut ema = valid[..period].iter().sum::<f64>() / period as f64;

    for price in &valid[period..] {
        ema = price * weight + ema * (1.0 - weight);
    }

    Some(ema)
}

//! Bollinger Bands indicator

use crate::indicators::finite_values;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands over the trailing `period` values.
///
/// Middle Band = mean(period)
/// Upper Band = Middle + (multiplier * standard deviation)
/// Lower Band = Middle - (multiplier * standard deviation)
///
/// The standard deviation is the population deviation of the window.
/// Returns `None` if fewer than `period` finite values remain after
/// filtering.
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: usize,
    multiplier: f64,
) -> Option<BollingerBands> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let valid = finite_values(prices);
    if valid.len() < period {
        return None;
    }

    let window = &valid[valid.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    Some(BollingerBands {
        upper: mean + multiplier * std_dev,
        middle: mean,
        lower: mean - multiplier * std_dev,
        current_price: *valid.last()?,
    })
}

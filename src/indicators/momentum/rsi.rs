//! RSI (Relative Strength Index) indicator

use crate::indicators::finite_values;

/// Calculate RSI with Wilder smoothing.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are seeded from the first `period` deltas and then smoothed with
/// `avg = (avg * (period - 1) + new) / period` across every remaining delta
/// in order. The full-history pass is what weights recent moves correctly;
/// smoothing only the last step produces different values.
///
/// Returns 100 when the smoothed average loss is exactly zero, and `None`
/// if fewer than `period + 1` finite values remain after filtering.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let valid = finite_values(prices);
    if valid.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(valid.len() - 1);
    let mut losses = Vec::with_capacity(valid.len() - 1);
    for pair in valid.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period as f64 - 1.0) + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + losses[i]) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

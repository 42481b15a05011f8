//! Pure indicator functions over numeric series.
//!
//! Every function validates defensively and returns `None` on insufficient
//! or unusable data instead of erroring, so one bad indicator never blocks
//! the others in a cycle.

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::calculate_rsi;
pub use trend::calculate_ema;
pub use volatility::calculate_bollinger_bands;
pub use volume::analyze_volume;

/// Drop NaN and infinite entries from a series before computation.
pub(crate) fn finite_values(series: &[f64]) -> Vec<f64> {
    series.iter().copied().filter(|v| v.is_finite()).collect()
}

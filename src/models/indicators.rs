use serde::{Deserialize, Serialize};

/// Volatility channel computed from a trailing window.
///
/// `middle` is the window mean; `upper`/`lower` are mean ± multiplier·σ
/// (population standard deviation). `current_price` is the last value of the
/// series the bands were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub current_price: f64,
}

/// Trailing-window volume anomaly result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnalysis {
    pub average: f64,
    pub current: f64,
    pub is_high: bool,
}

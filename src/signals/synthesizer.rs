//! Signal synthesis from indicator outputs.

use crate::config::RsiConfig;
use crate::models::indicators::{BollingerBands, VolumeAnalysis};
use crate::models::signal::{Signal, SignalBundle, SignalStrength, SignalType, Trend};
use tracing::warn;

/// Combines current price and indicator outputs into a ranked signal bundle.
///
/// Pure: no I/O, no state beyond the configured RSI thresholds. Signals are
/// emitted in a fixed order (band rule, RSI confirmation, volume) so the
/// dedup key stays stable across cycles.
pub struct SignalSynthesizer {
    oversold: f64,
    overbought: f64,
}

impl SignalSynthesizer {
    pub fn new(rsi: &RsiConfig) -> Self {
        Self {
            oversold: rsi.oversold,
            overbought: rsi.overbought,
        }
    }

    pub fn synthesize(
        &self,
        price: f64,
        bands: Option<&BollingerBands>,
        rsi: Option<f64>,
        volume: Option<&VolumeAnalysis>,
        ema_short: Option<f64>,
        ema_long: Option<f64>,
    ) -> SignalBundle {
        if !price.is_finite() {
            warn!("Invalid price data for signal synthesis");
            return SignalBundle::empty(Trend::Sideways);
        }

        let trend = match (ema_short, ema_long) {
            (Some(short), Some(long)) if short.is_finite() && long.is_finite() => {
                if short > long {
                    Trend::Uptrend
                } else if short < long {
                    Trend::Downtrend
                } else {
                    Trend::Sideways
                }
            }
            _ => Trend::Sideways,
        };

        let mut signals = Vec::new();

        // Band-touch rule. Boundary inclusive: a close sitting exactly on a
        // band counts as a touch.
        if let Some(b) = bands.filter(|b| b.lower.is_finite() && b.upper.is_finite()) {
            if price <= b.lower {
                signals.push(match rsi {
                    Some(r) if r < self.oversold => Signal {
                        signal_type: SignalType::Buy,
                        reason: format!("Price touched lower Bollinger Band + RSI oversold ({:.2})", r),
                        strength: SignalStrength::Strong,
                    },
                    _ => Signal {
                        signal_type: SignalType::Buy,
                        reason: "Price touched lower Bollinger Band".to_string(),
                        strength: SignalStrength::Medium,
                    },
                });
            } else if price >= b.upper {
                signals.push(match rsi {
                    Some(r) if r > self.overbought => Signal {
                        signal_type: SignalType::Sell,
                        reason: format!("Price touched upper Bollinger Band + RSI overbought ({:.2})", r),
                        strength: SignalStrength::Strong,
                    },
                    _ => Signal {
                        signal_type: SignalType::Sell,
                        reason: "Price touched upper Bollinger Band".to_string(),
                        strength: SignalStrength::Medium,
                    },
                });
            }
        }

        // RSI confirmation, independent of the band rule. The strict band
        // guard keeps a confirmed band touch from also counting as a second,
        // weaker signal: equality is "not past the boundary".
        if let Some(r) = rsi {
            if r < self.oversold && bands.map_or(true, |b| price > b.lower) {
                signals.push(Signal {
                    signal_type: SignalType::Buy,
                    reason: format!("RSI oversold ({:.2})", r),
                    strength: SignalStrength::Medium,
                });
            } else if r > self.overbought && bands.map_or(true, |b| price < b.upper) {
                signals.push(Signal {
                    signal_type: SignalType::Sell,
                    reason: format!("RSI overbought ({:.2})", r),
                    strength: SignalStrength::Medium,
                });
            }
        }

        // Volume confirmation.
        if let Some(v) = volume {
            if v.current.is_finite() && v.average.is_finite() && v.average > 0.0 && v.is_high {
                signals.push(Signal {
                    signal_type: SignalType::VolumeAlert,
                    reason: format!("High volume ({:.2}x average)", v.current / v.average),
                    strength: SignalStrength::Medium,
                });
            }
        }

        SignalBundle { signals, trend }
    }
}

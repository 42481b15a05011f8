use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of alert a symbol can raise in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    Buy,
    Sell,
    VolumeAlert,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Buy => write!(f, "BUY"),
            SignalType::Sell => write!(f, "SELL"),
            SignalType::VolumeAlert => write!(f, "VOLUME_ALERT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Medium,
    Strong,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStrength::Medium => write!(f, "MEDIUM"),
            SignalStrength::Strong => write!(f, "STRONG"),
        }
    }
}

/// Directional bias derived from the short/long trend averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "UPTREND ↗"),
            Trend::Downtrend => write!(f, "DOWNTREND ↘"),
            Trend::Sideways => write!(f, "SIDEWAYS ➡"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub reason: String,
    pub strength: SignalStrength,
}

/// Everything one symbol produced in one cycle: the signals in their fixed
/// emission order plus the trend label. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub signals: Vec<Signal>,
    pub trend: Trend,
}

impl SignalBundle {
    pub fn empty(trend: Trend) -> Self {
        Self {
            signals: Vec::new(),
            trend,
        }
    }

    /// Signal types in emission order, the dedup-key component.
    pub fn signal_types(&self) -> Vec<SignalType> {
        self.signals.iter().map(|s| s.signal_type).collect()
    }
}

//! Time-windowed deduplication of outgoing alerts.

use crate::models::signal::{SignalBundle, SignalType};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Dedup key: a symbol plus the exact ordered list of signal types present
/// in a bundle. A BUY-only bundle and a BUY+VOLUME_ALERT bundle are
/// different keys and throttle independently. Reasons and strengths do not
/// participate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub symbol: String,
    pub signal_types: Vec<SignalType>,
}

impl AlertKey {
    pub fn new(symbol: &str, bundle: &SignalBundle) -> Self {
        Self {
            symbol: symbol.to_string(),
            signal_types: bundle.signal_types(),
        }
    }
}

/// Last-sent timestamp per alert key, owned by the engine for its lifetime.
///
/// Entries are only ever overwritten, never evicted; symbol sets are small
/// and fixed in practice, so growth is bounded by the handful of type
/// combinations each symbol can produce.
pub struct AlertRegistry {
    window: Duration,
    last_sent: HashMap<AlertKey, DateTime<Utc>>,
}

impl AlertRegistry {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: HashMap::new(),
        }
    }

    /// True if this key was never alerted, or its last alert is older than
    /// the throttle window.
    pub fn should_send(&self, key: &AlertKey, now: DateTime<Utc>) -> bool {
        match self.last_sent.get(key) {
            None => true,
            Some(last) => now - *last > self.window,
        }
    }

    pub fn record(&mut self, key: AlertKey, now: DateTime<Utc>) {
        self.last_sent.insert(key, now);
    }

    pub fn len(&self) -> usize {
        self.last_sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_sent.is_empty()
    }
}

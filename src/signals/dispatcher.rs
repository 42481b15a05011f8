//! Alert formatting and best-effort delivery.

use crate::models::signal::{SignalBundle, SignalType};
use crate::services::notifier::Notifier;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Formats signal bundles into Telegram HTML and hands them to the
/// notification sink. Alerts are advisory: delivery failures are logged and
/// swallowed, never retried or escalated.
pub struct AlertDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl AlertDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Deliver a message best-effort.
    pub async fn dispatch(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(error = %e, "Alert delivery failed: {}", e);
        }
    }
}

/// Render a signal bundle for delivery; `None` when there is nothing to say.
pub fn format_signal_message(symbol: &str, bundle: &SignalBundle, price: f64) -> Option<String> {
    if bundle.signals.is_empty() {
        return None;
    }

    let mut message = String::from("🚨 <b>TRADING SIGNAL ALERT</b>\n\n");
    message.push_str(&format!("<b>Pair:</b> {}\n", symbol));
    message.push_str(&format!("<b>Trend:</b> {}\n", bundle.trend));
    message.push_str(&format!("<b>Price:</b> ${}\n\n", format_price(price)));

    for (i, signal) in bundle.signals.iter().enumerate() {
        let emoji = match signal.signal_type {
            SignalType::Buy => "🟢",
            SignalType::Sell => "🔴",
            SignalType::VolumeAlert => "📊",
        };
        message.push_str(&format!(
            "{} <b>Signal {}:</b> {}\n",
            emoji,
            i + 1,
            signal.signal_type
        ));
        message.push_str(&format!("   Reason: {}\n", signal.reason));
        message.push_str(&format!("   Strength: {}\n\n", signal.strength));
    }

    message.push_str(&format!(
        "<i>Generated at {} UTC</i>",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));

    Some(message)
}

/// Price precision scales with magnitude so sub-dollar pairs stay readable.
pub fn format_price(price: f64) -> String {
    if price < 1.0 {
        format!("{:.6}", price)
    } else if price < 10.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.2}", price)
    }
}

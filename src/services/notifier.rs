//! Notification sink interface.

/// Message delivery endpoint. Implementations report failures; whether a
/// failure matters is the caller's call (alert delivery is best-effort).
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

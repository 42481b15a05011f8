//! Telegram sendMessage client.

use crate::config::TelegramConfig;
use crate::services::notifier::Notifier;
use serde_json::json;

pub struct TelegramNotifier {
    api_url: String,
    token: String,
    chat_id: String,
    http: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Construct with an explicit client, for tests against a mock server
    /// (set `config.api_url` to the mock's URI).
    pub fn with_client(config: &TelegramConfig, http: reqwest::Client) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        self.http
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

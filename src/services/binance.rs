//! Binance klines REST client.

use crate::models::candle::{Candle, RawKline};
use crate::services::market_data::MarketDataProvider;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct BinanceMarketData {
    base_url: String,
    http: reqwest::Client,
}

impl BinanceMarketData {
    pub fn new(
        base_url: impl Into<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    /// Construct with an explicit client and base URL, for tests against a
    /// mock server.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceMarketData {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .http
            .get(format!("{}/klines", self.base_url))
            .query(&[
                ("symbol", symbol),
                ("interval", interval),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let raw: Vec<RawKline> = response.json().await?;
        raw.into_iter().map(Candle::try_from).collect()
    }
}

//! Market data provider interface and fetch orchestration.

use crate::config::MarketDataConfig;
use crate::models::candle::Candle;
use backon::{ExponentialBuilder, Retryable};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// One network call against the external market data source. Retry and
/// batching live in the gateway, not here.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Fetch orchestration over a provider: bounded exponential-backoff retry
/// per symbol, and concurrent batch fetches that tolerate partial failure.
pub struct MarketDataGateway {
    provider: Arc<dyn MarketDataProvider>,
    max_retries: usize,
    retry_base_delay: Duration,
}

impl MarketDataGateway {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &MarketDataConfig) -> Self {
        Self {
            provider,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        }
    }

    /// Fetch one symbol, retrying with exponential backoff: the delay after
    /// the n-th failed attempt is `2^n * base`, up to `max_retries` retries.
    pub async fn fetch_one(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_base_delay)
            .with_factor(2.0)
            .with_max_times(self.max_retries);

        (|| async { self.provider.get_candles(symbol, interval, limit).await })
            .retry(backoff)
            .notify(|err, delay| {
                warn!(
                    symbol = %symbol,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying kline fetch for {} in {}ms",
                    symbol,
                    delay.as_millis()
                );
            })
            .await
    }

    /// Fetch a batch of symbols concurrently. A symbol whose retries are
    /// exhausted is logged and omitted from the result; the batch itself
    /// never fails. An empty map therefore means no symbol returned data.
    pub async fn fetch_all(
        &self,
        symbols: &[String],
        interval: &str,
        limit: usize,
    ) -> HashMap<String, Vec<Candle>> {
        let fetches = symbols.iter().map(|symbol| async move {
            match self.fetch_one(symbol, interval, limit).await {
                Ok(candles) => Some((symbol.clone(), candles)),
                Err(e) => {
                    error!(symbol = %symbol, error = %e, "Failed to fetch data for {}: {}", symbol, e);
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}

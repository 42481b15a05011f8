//! Gateway tests: retry with backoff, partial-failure tolerance, and raw
//! kline parsing, against a mocked exchange endpoint.

#[path = "test_utils.rs"]
mod test_utils;

use spotwatch::services::binance::BinanceMarketData;
use spotwatch::services::market_data::MarketDataGateway;
use std::sync::Arc;
use test_utils::{kline_rows, mount_klines, mount_klines_failure, test_config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(binance: &MockServer, max_retries: usize) -> MarketDataGateway {
    let mut config = test_config(&binance.uri(), "http://unused.invalid", &["BTCUSDT"]);
    config.market_data.max_retries = max_retries;
    let provider = Arc::new(BinanceMarketData::with_client(
        config.market_data.api_url.clone(),
        reqwest::Client::new(),
    ));
    MarketDataGateway::new(provider, &config.market_data)
}

async fn kline_request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/klines")
        .count()
}

#[tokio::test]
async fn transient_failure_is_retried_until_success() {
    let binance = MockServer::start().await;

    // First request fails, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/klines"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&binance)
        .await;
    mount_klines(&binance, "BTCUSDT", &[100.0; 30], &[1000.0; 30]).await;

    let gateway = gateway_for(&binance, 2);
    let candles = gateway
        .fetch_one("BTCUSDT", "15m", 200)
        .await
        .expect("retry should recover");

    assert_eq!(candles.len(), 30);
    assert_eq!(kline_request_count(&binance).await, 2);
}

#[tokio::test]
async fn exhausted_retries_surface_the_failure() {
    let binance = MockServer::start().await;
    mount_klines_failure(&binance, "BTCUSDT", 500).await;

    let gateway = gateway_for(&binance, 2);
    let result = gateway.fetch_one("BTCUSDT", "15m", 200).await;

    assert!(result.is_err());
    // Initial attempt plus two retries.
    assert_eq!(kline_request_count(&binance).await, 3);
}

#[tokio::test]
async fn batch_fetch_omits_failing_symbols() {
    let binance = MockServer::start().await;
    mount_klines(&binance, "BTCUSDT", &[100.0; 30], &[1000.0; 30]).await;
    mount_klines_failure(&binance, "ETHUSDT", 503).await;

    let gateway = gateway_for(&binance, 0);
    let symbols = vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()];
    let data = gateway.fetch_all(&symbols, "15m", 200).await;

    assert_eq!(data.len(), 1);
    assert!(data.contains_key("BTCUSDT"));
    assert!(!data.contains_key("ETHUSDT"));
}

#[tokio::test]
async fn batch_fetch_is_empty_when_every_symbol_fails() {
    let binance = MockServer::start().await;
    mount_klines_failure(&binance, "BTCUSDT", 500).await;
    mount_klines_failure(&binance, "ETHUSDT", 500).await;

    let gateway = gateway_for(&binance, 0);
    let symbols = vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()];
    let data = gateway.fetch_all(&symbols, "15m", 200).await;

    assert!(data.is_empty());
}

#[tokio::test]
async fn raw_klines_parse_into_candles() {
    let binance = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/klines"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("interval", "15m"))
        .and(query_param("limit", "200"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(kline_rows(&[100.0, 101.5], &[10.0, 20.0])),
        )
        .mount(&binance)
        .await;

    let gateway = gateway_for(&binance, 0);
    let candles = gateway.fetch_one("BTCUSDT", "15m", 200).await.unwrap();

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 100.0);
    assert_eq!(candles[1].close, 101.5);
    assert_eq!(candles[1].volume, 20.0);
    assert_eq!(candles[1].high, 102.0);
    assert!(candles[0].open_time < candles[1].open_time);
    assert!(candles[0].close_time > candles[0].open_time);
    assert_eq!(candles[0].trade_count, 100);
}

#[tokio::test]
async fn malformed_rows_fail_the_symbol_fetch() {
    let binance = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [1_700_000_000_000_i64, "oops", "1", "1", "1", "1", 1_700_000_059_999_i64, "1", 1, "1", "1", "0"]
        ])))
        .mount(&binance)
        .await;

    let gateway = gateway_for(&binance, 0);
    let result = gateway.fetch_one("BTCUSDT", "15m", 200).await;
    assert!(result.is_err());
}

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar for a fixed time bucket, oldest→newest when collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: DateTime<Utc>,
    pub quote_volume: f64,
    pub trade_count: u64,
    pub taker_buy_base_volume: f64,
    pub taker_buy_quote_volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume: 0.0,
            trade_count: 0,
            taker_buy_base_volume: 0.0,
            taker_buy_quote_volume: 0.0,
        }
    }
}

/// Raw kline tuple as returned by the exchange: a 12-element JSON array
/// mixing integer timestamps with numeric strings.
///
/// `[open_time, open, high, low, close, volume, close_time, quote_volume,
///   trade_count, taker_buy_base, taker_buy_quote, ignore]`
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub String,
    pub u64,
    pub String,
    pub String,
    #[serde(default)] pub serde_json::Value,
);

impl TryFrom<RawKline> for Candle {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(raw: RawKline) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: &str| -> Result<f64, Self::Error> {
            value
                .parse::<f64>()
                .map_err(|e| format!("invalid {} value '{}': {}", field, value, e).into())
        };

        let open_time = Utc
            .timestamp_millis_opt(raw.0)
            .single()
            .ok_or_else(|| format!("invalid open time: {}", raw.0))?;
        let close_time = Utc
            .timestamp_millis_opt(raw.6)
            .single()
            .ok_or_else(|| format!("invalid close time: {}", raw.6))?;

        Ok(Self {
            open_time,
            open: parse("open", &raw.1)?,
            high: parse("high", &raw.2)?,
            low: parse("low", &raw.3)?,
            close: parse("close", &raw.4)?,
            volume: parse("volume", &raw.5)?,
            close_time,
            quote_volume: parse("quote volume", &raw.7)?,
            trade_count: raw.8,
            taker_buy_base_volume: parse("taker buy base volume", &raw.9)?,
            taker_buy_quote_volume: parse("taker buy quote volume", &raw.10)?,
        })
    }
}

/// Extract the close-price series, dropping non-finite entries.
pub fn close_series(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .map(|c| c.close)
        .filter(|p| p.is_finite())
        .collect()
}

/// Extract the volume series, dropping non-finite and negative entries.
pub fn volume_series(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .map(|c| c.volume)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect()
}

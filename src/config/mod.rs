//! Environment-based configuration.
//!
//! Every knob has a default so the engine can start from a bare environment;
//! only the Telegram credentials are required. `dotenvy` is loaded by the
//! binary before this module is consulted.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Current deployment environment (`sandbox` unless `ENVIRONMENT` says
/// otherwise). Drives the logging format.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    /// Base URL of the Telegram API, overridable for tests.
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub api_url: String,
    pub max_retries: usize,
    pub retry_base_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TradingConfig {
    pub symbols: Vec<String>,
    pub timeframe: String,
    pub poll_interval_secs: u64,
    pub kline_limit: usize,
}

#[derive(Debug, Clone)]
pub struct BollingerConfig {
    pub period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct RsiConfig {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

#[derive(Debug, Clone)]
pub struct VolumeConfig {
    pub period: usize,
    pub multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct EmaConfig {
    pub short: usize,
    pub long: usize,
}

#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub bb: BollingerConfig,
    pub rsi: RsiConfig,
    pub volume: VolumeConfig,
    pub ema: EmaConfig,
}

impl IndicatorConfig {
    /// Longest lookback any configured indicator needs. A symbol whose
    /// filtered series is shorter than this is skipped for the cycle.
    pub fn max_lookback(&self) -> usize {
        self.bb
            .period
            .max(self.rsi.period + 1)
            .max(self.volume.period)
            .max(self.ema.long)
            .max(self.ema.short)
    }
}

#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub dedup_window: chrono::Duration,
    pub max_consecutive_failures: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub telegram: TelegramConfig,
    pub market_data: MarketDataConfig,
    pub trading: TradingConfig,
    pub indicators: IndicatorConfig,
    pub alerts: AlertConfig,
}

impl Config {
    /// Load the full configuration from the environment.
    ///
    /// Fails only on missing Telegram credentials; everything else falls
    /// back to defaults.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| "TELEGRAM_BOT_TOKEN must be set")?;
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| "TELEGRAM_CHAT_ID must be set")?;

        let symbols: Vec<String> = env::var("SYMBOLS")
            .unwrap_or_else(|_| "BTCUSDT".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err("SYMBOLS must name at least one symbol".into());
        }

        Ok(Self {
            environment: get_environment(),
            telegram: TelegramConfig {
                token,
                chat_id,
                api_url: env::var("TELEGRAM_API_URL")
                    .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            },
            market_data: MarketDataConfig {
                api_url: env::var("BINANCE_API_URL")
                    .unwrap_or_else(|_| "https://api.binance.com/api/v3".to_string()),
                max_retries: env_parse("FETCH_MAX_RETRIES", 3),
                retry_base_delay: Duration::from_millis(env_parse("FETCH_RETRY_BASE_MS", 1000)),
            },
            trading: TradingConfig {
                symbols,
                timeframe: env::var("TIMEFRAME").unwrap_or_else(|_| "15m".to_string()),
                poll_interval_secs: env_parse("EVAL_INTERVAL_SECONDS", 300),
                kline_limit: env_parse("KLINE_LIMIT", 200),
            },
            indicators: IndicatorConfig {
                bb: BollingerConfig {
                    period: env_parse("BB_PERIOD", 20),
                    multiplier: env_parse("BB_MULTIPLIER", 2.0),
                },
                rsi: RsiConfig {
                    period: env_parse("RSI_PERIOD", 14),
                    oversold: env_parse("RSI_OVERSOLD", 30.0),
                    overbought: env_parse("RSI_OVERBOUGHT", 70.0),
                },
                volume: VolumeConfig {
                    period: env_parse("VOLUME_PERIOD", 20),
                    multiplier: env_parse("VOLUME_MULTIPLIER", 1.5),
                },
                ema: EmaConfig {
                    short: env_parse("EMA_SHORT", 9),
                    long: env_parse("EMA_LONG", 21),
                },
            },
            alerts: AlertConfig {
                dedup_window: chrono::Duration::minutes(env_parse("ALERT_DEDUP_MINUTES", 15)),
                max_consecutive_failures: env_parse("MAX_CONSECUTIVE_FAILURES", 5),
            },
        })
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bb: BollingerConfig {
                period: 20,
                multiplier: 2.0,
            },
            rsi: RsiConfig {
                period: 14,
                oversold: 30.0,
                overbought: 70.0,
            },
            volume: VolumeConfig {
                period: 20,
                multiplier: 1.5,
            },
            ema: EmaConfig { short: 9, long: 21 },
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dedup_window: chrono::Duration::minutes(15),
            max_consecutive_failures: 5,
        }
    }
}

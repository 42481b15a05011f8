//! Cycle orchestration: fetch, analyze, deduplicate, dispatch.

use crate::config::{Config, IndicatorConfig, TradingConfig};
use crate::core::scheduler::CycleScheduler;
use crate::indicators::{analyze_volume, calculate_bollinger_bands, calculate_ema, calculate_rsi};
use crate::models::candle::{close_series, volume_series, Candle};
use crate::models::signal::SignalBundle;
use crate::services::market_data::MarketDataGateway;
use crate::signals::dispatcher::{format_signal_message, AlertDispatcher};
use crate::signals::registry::{AlertKey, AlertRegistry};
use crate::signals::synthesizer::SignalSynthesizer;
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Drives the periodic signal cycle and owns the only long-lived mutable
/// state: the alert dedup registry and the consecutive-failure counter.
/// All of it is engine-owned, so several engines can coexist in one process
/// without interference.
pub struct SignalEngine {
    gateway: MarketDataGateway,
    dispatcher: AlertDispatcher,
    synthesizer: SignalSynthesizer,
    trading: TradingConfig,
    indicators: IndicatorConfig,
    registry: AlertRegistry,
    failure_threshold: u32,
    consecutive_failures: u32,
}

impl SignalEngine {
    pub fn new(config: &Config, gateway: MarketDataGateway, dispatcher: AlertDispatcher) -> Self {
        Self {
            gateway,
            dispatcher,
            synthesizer: SignalSynthesizer::new(&config.indicators.rsi),
            trading: config.trading.clone(),
            indicators: config.indicators.clone(),
            registry: AlertRegistry::new(config.alerts.dedup_window),
            failure_threshold: config.alerts.max_consecutive_failures,
            consecutive_failures: 0,
        }
    }

    /// Run one immediate cycle, then one cycle per scheduler tick, forever.
    ///
    /// Each cycle is awaited before the next tick is computed, so cycles
    /// never overlap; a tick that would land inside a long cycle is skipped.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            symbols = ?self.trading.symbols,
            timeframe = %self.trading.timeframe,
            interval = self.trading.poll_interval_secs,
            "Starting signal engine: {} every {}s",
            self.trading.symbols.join(", "),
            self.trading.poll_interval_secs
        );

        let scheduler = CycleScheduler::new(self.trading.poll_interval_secs)?;
        self.run_cycle().await;
        loop {
            scheduler.wait_next_tick().await;
            self.run_cycle().await;
        }
    }

    /// One full cycle. Never fails outward; any cycle-level error feeds the
    /// failure counter instead.
    pub async fn run_cycle(&mut self) {
        if let Err(e) = self.check_signals().await {
            error!(error = %e, "Error checking signals: {}", e);
            self.record_cycle_failure().await;
        }
    }

    /// Consecutive whole-cycle failures since the last success or
    /// escalation.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    async fn check_signals(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Checking trading signals...");

        let data = self
            .gateway
            .fetch_all(
                &self.trading.symbols,
                &self.trading.timeframe,
                self.trading.kline_limit,
            )
            .await;

        info!(
            fetched = data.len(),
            total = self.trading.symbols.len(),
            "Fetched data for {}/{} symbols",
            data.len(),
            self.trading.symbols.len()
        );

        if data.is_empty() {
            return Err("no symbol returned market data".into());
        }
        self.consecutive_failures = 0;

        // Iterate in configured order for deterministic processing.
        let symbols = self.trading.symbols.clone();
        for symbol in &symbols {
            let Some(candles) = data.get(symbol) else {
                continue;
            };
            if candles.is_empty() {
                debug!(symbol = %symbol, "No candle data for {}", symbol);
                continue;
            }

            let Some((bundle, price)) = self.analyze_symbol(symbol, candles) else {
                continue;
            };
            if bundle.signals.is_empty() {
                debug!(symbol = %symbol, trend = %bundle.trend, "No signals for {}", symbol);
                continue;
            }

            self.process_bundle(symbol, &bundle, price).await;
        }

        Ok(())
    }

    /// Indicator pass for one symbol. Each indicator degrades to `None` on
    /// its own; a symbol without enough valid raw data is skipped entirely
    /// (not an error).
    fn analyze_symbol(&self, symbol: &str, candles: &[Candle]) -> Option<(SignalBundle, f64)> {
        let closes = close_series(candles);
        let volumes = volume_series(candles);

        let required = self.indicators.max_lookback();
        if closes.len() < required || volumes.len() < required {
            warn!(
                symbol = %symbol,
                closes = closes.len(),
                volumes = volumes.len(),
                required = required,
                "Insufficient valid data for {}, skipping",
                symbol
            );
            return None;
        }

        let bb = &self.indicators.bb;
        let rsi_cfg = &self.indicators.rsi;
        let vol_cfg = &self.indicators.volume;
        let ema_cfg = &self.indicators.ema;

        let bands = calculate_bollinger_bands(&closes, bb.period, bb.multiplier);
        let rsi = calculate_rsi(&closes, rsi_cfg.period);
        let volume = analyze_volume(&volumes, vol_cfg.period, vol_cfg.multiplier);
        let ema_short = calculate_ema(&closes, ema_cfg.short);
        let ema_long = calculate_ema(&closes, ema_cfg.long);

        let price = *closes.last()?;
        let bundle = self.synthesizer.synthesize(
            price,
            bands.as_ref(),
            rsi,
            volume.as_ref(),
            ema_short,
            ema_long,
        );
        Some((bundle, price))
    }

    /// Dedup step: one alert per (symbol, signal-type set) per throttle
    /// window. The timestamp is recorded after dispatch regardless of
    /// delivery outcome; delivery is best-effort.
    async fn process_bundle(&mut self, symbol: &str, bundle: &SignalBundle, price: f64) {
        let key = AlertKey::new(symbol, bundle);
        let now = Utc::now();

        if !self.registry.should_send(&key, now) {
            debug!(symbol = %symbol, "Alert suppressed for {} (recently sent)", symbol);
            return;
        }

        if let Some(message) = format_signal_message(symbol, bundle, price) {
            self.dispatcher.dispatch(&message).await;
            self.registry.record(key, now);
            info!(
                symbol = %symbol,
                price = price,
                signal_count = bundle.signals.len(),
                "Signal alert sent for {} at ${}",
                symbol,
                price
            );
        }
    }

    async fn record_cycle_failure(&mut self) {
        self.consecutive_failures += 1;
        warn!(
            failures = self.consecutive_failures,
            threshold = self.failure_threshold,
            "Cycle failed ({}/{})",
            self.consecutive_failures,
            self.failure_threshold
        );

        if self.consecutive_failures >= self.failure_threshold {
            let message = format!(
                "⚠️ Critical: failed to fetch market data for {} consecutive cycles",
                self.consecutive_failures
            );
            error!("{}", message);
            self.dispatcher.dispatch(&message).await;
            self.consecutive_failures = 0;
        }
    }
}

//! spotwatch binary
//!
//! Wires configuration, the market data gateway, and the alert dispatcher
//! into the signal engine, then runs it until a shutdown signal arrives.

use dotenvy::dotenv;
use spotwatch::config::Config;
use spotwatch::logging;
use spotwatch::services::binance::BinanceMarketData;
use spotwatch::services::market_data::MarketDataGateway;
use spotwatch::services::telegram::TelegramNotifier;
use spotwatch::signals::dispatcher::AlertDispatcher;
use spotwatch::signals::engine::SignalEngine;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting spotwatch signal engine");
    info!(environment = %config.environment, "Environment");
    info!(
        symbols = ?config.trading.symbols,
        "Monitoring symbols: {}",
        config.trading.symbols.join(", ")
    );
    info!(timeframe = %config.trading.timeframe, "Timeframe: {}", config.trading.timeframe);
    info!(
        interval = config.trading.poll_interval_secs,
        "Check interval: {}s", config.trading.poll_interval_secs
    );

    let provider = Arc::new(BinanceMarketData::new(config.market_data.api_url.clone())?);
    let gateway = MarketDataGateway::new(provider, &config.market_data);
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram));
    let dispatcher = AlertDispatcher::new(notifier);

    let mut engine = SignalEngine::new(&config, gateway, dispatcher);

    tokio::select! {
        result = engine.run() => {
            if let Err(e) = result {
                error!(error = %e, "Signal engine stopped: {}", e);
                return Err(e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down spotwatch...");
        }
    }

    Ok(())
}

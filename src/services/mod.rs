//! External collaborators: the market data source and the notification sink.

pub mod binance;
pub mod market_data;
pub mod notifier;
pub mod telegram;

pub use binance::BinanceMarketData;
pub use market_data::{MarketDataGateway, MarketDataProvider};
pub use notifier::Notifier;
pub use telegram::TelegramNotifier;

//! spotwatch: periodic market-signal engine.
//!
//! Polls spot-market candles for a configured symbol set, computes a fixed
//! set of technical indicators (Bollinger Bands, RSI, EMA trend pair, volume
//! anomaly), synthesizes directional signals, and pushes deduplicated alerts
//! to Telegram.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

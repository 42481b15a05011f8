//! Market scenario tests driving the indicator pipeline into the
//! synthesizer, without any I/O.

use spotwatch::config::RsiConfig;
use spotwatch::indicators::{
    analyze_volume, calculate_bollinger_bands, calculate_ema, calculate_rsi,
};
use spotwatch::models::signal::{SignalStrength, SignalType, Trend};
use spotwatch::signals::synthesizer::SignalSynthesizer;

fn synthesizer() -> SignalSynthesizer {
    SignalSynthesizer::new(&RsiConfig {
        period: 14,
        oversold: 30.0,
        overbought: 70.0,
    })
}

fn synthesize_from_series(closes: &[f64], volumes: &[f64]) -> spotwatch::models::SignalBundle {
    let bands = calculate_bollinger_bands(closes, 20, 2.0);
    let rsi = calculate_rsi(closes, 14);
    let volume = analyze_volume(volumes, 20, 1.5);
    let ema_short = calculate_ema(closes, 9);
    let ema_long = calculate_ema(closes, 21);
    let price = *closes.last().unwrap();

    synthesizer().synthesize(
        price,
        bands.as_ref(),
        rsi,
        volume.as_ref(),
        ema_short,
        ema_long,
    )
}

#[test]
fn linear_rally_reports_uptrend_with_an_overbought_confirmation() {
    // 90 -> 110 over 30 bars. The price stays inside the widening bands, so
    // no band-touch fires; the steady gains pin RSI at 100, which the
    // confirmation rule reports as a medium sell.
    let closes: Vec<f64> = (0..30).map(|i| 90.0 + i as f64 * (20.0 / 29.0)).collect();
    let volumes = vec![1000.0; 30];

    let bundle = synthesize_from_series(&closes, &volumes);

    assert_eq!(bundle.trend, Trend::Uptrend);
    assert_eq!(bundle.signals.len(), 1);
    let signal = &bundle.signals[0];
    assert_eq!(signal.signal_type, SignalType::Sell);
    assert_eq!(signal.strength, SignalStrength::Medium);
    assert!(signal.reason.contains("RSI overbought"));
}

#[test]
fn flat_market_touches_its_own_collapsed_band() {
    // A constant series collapses the bands onto the price, so the close
    // sits exactly on the lower band: the touch is boundary inclusive and
    // must fire. Zero losses pin RSI at 100, so the touch stays medium, and
    // the strict upper-band guard keeps the overbought confirmation quiet.
    let closes = vec![100.0; 30];
    let volumes = vec![1000.0; 30];

    let bundle = synthesize_from_series(&closes, &volumes);

    assert_eq!(bundle.trend, Trend::Sideways);
    assert_eq!(bundle.signals.len(), 1);
    let signal = &bundle.signals[0];
    assert_eq!(signal.signal_type, SignalType::Buy);
    assert_eq!(signal.strength, SignalStrength::Medium);
    assert!(signal.reason.contains("lower Bollinger Band"));
}

#[test]
fn crash_through_the_lower_band_is_a_strong_buy() {
    // Flat at 100 for 28 bars, then two hard down moves push the close
    // well below the lower band while RSI collapses toward zero.
    let mut closes = vec![100.0; 28];
    closes.push(90.0);
    closes.push(80.0);
    let volumes = vec![1000.0; 30];

    let bundle = synthesize_from_series(&closes, &volumes);

    assert!(!bundle.signals.is_empty());
    let signal = &bundle.signals[0];
    assert_eq!(signal.signal_type, SignalType::Buy);
    assert_eq!(signal.strength, SignalStrength::Strong);
}

#[test]
fn short_series_yields_no_indicators_and_no_signals() {
    // Below every lookback: all indicators degrade to None and the bundle
    // is empty rather than an error.
    let closes = vec![100.0; 5];
    let bands = calculate_bollinger_bands(&closes, 20, 2.0);
    let rsi = calculate_rsi(&closes, 14);
    let ema_long = calculate_ema(&closes, 21);
    assert!(bands.is_none());
    assert!(rsi.is_none());
    assert!(ema_long.is_none());

    let bundle = synthesizer().synthesize(100.0, bands.as_ref(), rsi, None, None, ema_long);
    assert!(bundle.signals.is_empty());
    assert_eq!(bundle.trend, Trend::Sideways);
}

#[test]
fn volume_spike_rides_along_with_a_price_signal() {
    let closes = vec![100.0; 30];
    let mut volumes = vec![1000.0; 29];
    volumes.push(5000.0);

    let bundle = synthesize_from_series(&closes, &volumes);

    let types: Vec<SignalType> = bundle.signals.iter().map(|s| s.signal_type).collect();
    assert_eq!(types, vec![SignalType::Buy, SignalType::VolumeAlert]);
}

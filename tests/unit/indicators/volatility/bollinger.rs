//! Unit tests for the Bollinger Bands indicator

use spotwatch::indicators::calculate_bollinger_bands;

#[test]
fn constant_series_collapses_bands_to_the_constant() {
    let prices = vec![42.5; 20];
    let bands = calculate_bollinger_bands(&prices, 20, 2.0).unwrap();
    assert_eq!(bands.upper, 42.5);
    assert_eq!(bands.middle, 42.5);
    assert_eq!(bands.lower, 42.5);
    assert_eq!(bands.current_price, 42.5);

    // Zero variance, so the multiplier cannot matter.
    let wide = calculate_bollinger_bands(&prices, 20, 10.0).unwrap();
    assert_eq!(wide.upper, wide.lower);
}

#[test]
fn known_window_produces_exact_bands() {
    // mean = 5, population standard deviation = 2
    let prices = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let bands = calculate_bollinger_bands(&prices, 8, 2.0).unwrap();
    assert!((bands.middle - 5.0).abs() < 1e-12);
    assert!((bands.upper - 9.0).abs() < 1e-12);
    assert!((bands.lower - 1.0).abs() < 1e-12);
    assert_eq!(bands.current_price, 9.0);
}

#[test]
fn uses_only_the_trailing_window() {
    // The leading 1000.0 must not leak into a period-3 window.
    let prices = vec![1000.0, 10.0, 10.0, 10.0];
    let bands = calculate_bollinger_bands(&prices, 3, 2.0).unwrap();
    assert_eq!(bands.middle, 10.0);
    assert_eq!(bands.upper, 10.0);
}

#[test]
fn insufficient_data_returns_none() {
    let prices = vec![1.0, 2.0, 3.0];
    assert!(calculate_bollinger_bands(&prices, 4, 2.0).is_none());
    assert!(calculate_bollinger_bands(&[], 1, 2.0).is_none());
    assert!(calculate_bollinger_bands(&prices, 0, 2.0).is_none());
}

#[test]
fn non_finite_values_are_filtered_out() {
    let prices = vec![10.0, f64::NAN, 10.0, f64::INFINITY, 10.0];
    let bands = calculate_bollinger_bands(&prices, 3, 2.0).unwrap();
    assert_eq!(bands.middle, 10.0);
    assert_eq!(bands.current_price, 10.0);
}

#[test]
fn filtering_below_period_returns_none() {
    let prices = vec![10.0, f64::NAN, 10.0, f64::NAN];
    assert!(calculate_bollinger_bands(&prices, 3, 2.0).is_none());
}

//! Property tests for the classifier feature extractor

use trendcast::features::{extract_features, FeatureError, FEATURE_NAMES, MIN_OBSERVATIONS};

/// Deterministic pseudo-random walk with strictly positive prices.
fn random_walk(seed: u64, count: usize) -> Vec<f64> {
    let mut state = seed;
    let mut price = 100.0;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let step = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
            price = (price * (1.0 + step * 0.2)).max(1.0);
            price
        })
        .collect()
}

#[test]
fn test_all_fields_finite_for_valid_series() {
    for seed in 0..50 {
        for len in [50, 51, 60, 120, 300] {
            let prices = random_walk(seed, len);
            let features = extract_features(&prices).unwrap();
            assert!(
                features.is_finite(),
                "seed {} len {}: {:?}",
                seed,
                len,
                features
            );
        }
    }
}

#[test]
fn test_binary_fields() {
    for seed in 0..50 {
        let features = extract_features(&random_walk(seed, 64)).unwrap();
        assert!(features.sma_cross_5_20 <= 1);
        assert!(features.sma_cross_10_50 <= 1);
        assert!(features.trend <= 1);
    }
}

#[test]
fn test_rsi_bounded() {
    for seed in 0..50 {
        let features = extract_features(&random_walk(seed, 80)).unwrap();
        assert!((0.0..=100.0).contains(&features.rsi_14));
    }
}

#[test]
fn test_bollinger_position_at_mean() {
    // Last 20 prices average 100 and the last one is 100.
    let mut prices = vec![100.0; 30];
    prices.extend([95.0, 105.0].repeat(9));
    prices.extend([100.0, 100.0]);
    let features = extract_features(&prices).unwrap();
    assert!((features.bb_position - 0.5).abs() < 1e-12);
}

#[test]
fn test_increasing_series() {
    let prices: Vec<f64> = (100..160).map(f64::from).collect();
    let features = extract_features(&prices).unwrap();
    assert_eq!(features.trend, 1);
    assert_eq!(features.sma_cross_5_20, 1);
}

#[test]
fn test_decreasing_series() {
    let prices: Vec<f64> = (100..160).rev().map(f64::from).collect();
    let features = extract_features(&prices).unwrap();
    assert_eq!(features.trend, 0);
}

#[test]
fn test_constant_series() {
    let features = extract_features(&[100.0; 60]).unwrap();
    assert!(features.rsi_14.is_finite());
    assert_eq!(features.volatility_5d, 0.0);
    assert_eq!(features.volatility_20d, 0.0);
    assert_eq!(features.noise, 0.0);
}

#[test]
fn test_minimum_length_boundary() {
    let prices = random_walk(7, MIN_OBSERVATIONS);
    assert!(extract_features(&prices).is_ok());
    assert_eq!(
        extract_features(&prices[1..]),
        Err(FeatureError::InsufficientData {
            required: 50,
            actual: 49
        })
    );
    assert!(matches!(
        extract_features(&[]),
        Err(FeatureError::InsufficientData { actual: 0, .. })
    ));
}

#[test]
fn test_bit_identical_reruns() {
    let prices = random_walk(42, 60);
    let first = serde_json::to_string(&extract_features(&prices).unwrap()).unwrap();
    let second = serde_json::to_string(&extract_features(&prices).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(extract_features(&prices), extract_features(&prices));
}

#[test]
fn test_wire_names_match_classifier_schema() {
    let features = extract_features(&random_walk(3, 60)).unwrap();
    let value = serde_json::to_value(features).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = FEATURE_NAMES.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

#[test]
fn test_only_trailing_history_matters() {
    // Changes before the last 51 prices do not affect any feature.
    let tail = random_walk(11, 51);
    let mut long = random_walk(12, 40);
    long.extend(&tail);
    assert_eq!(extract_features(&long), extract_features(&tail));
}

#[test]
fn test_overflowing_prices_never_yield_partial_vector() {
    let huge = vec![1e307; 60];
    assert!(matches!(
        extract_features(&huge),
        Err(FeatureError::NonFiniteFeature { .. })
    ));

    let mut jump = vec![1e-300; 59];
    jump.push(1e300);
    match extract_features(&jump) {
        Err(FeatureError::NonFiniteFeature { value, .. }) => assert!(!value.is_finite()),
        other => panic!("expected NonFiniteFeature, got {:?}", other),
    }
}

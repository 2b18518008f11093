mod common;

use approx::assert_relative_eq;

use cda_core::stats::{manders, masked_total, ColocAccumulator};

use common::{checker_mask, full_mask, gradient_plane, mask_volume, volume};

#[test]
fn test_pearson_identical_channels_is_one() {
    let mut acc = ColocAccumulator::new();
    for i in 0..16 {
        acc.push(i as f64, i as f64);
    }
    assert_relative_eq!(acc.pearson(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_pearson_anticorrelated_is_minus_one() {
    let mut acc = ColocAccumulator::new();
    for i in 0..16 {
        acc.push(i as f64, (15 - i) as f64);
    }
    assert_relative_eq!(acc.pearson(), -1.0, epsilon = 1e-12);
}

#[test]
fn test_pearson_known_value() {
    // x = [1,2,3], y = [1,3,2]: cov = 1, var_x = var_y = 2, r = 0.5.
    let mut acc = ColocAccumulator::new();
    acc.push(1.0, 1.0);
    acc.push(2.0, 3.0);
    acc.push(3.0, 2.0);
    assert_relative_eq!(acc.pearson(), 0.5, epsilon = 1e-12);
}

#[test]
fn test_pearson_empty_is_nan() {
    let acc = ColocAccumulator::new();
    assert!(acc.pearson().is_nan());
}

#[test]
fn test_pearson_constant_channel_is_nan() {
    let mut acc = ColocAccumulator::new();
    for i in 0..8 {
        acc.push(2.0, i as f64);
    }
    assert!(acc.pearson().is_nan());
}

#[test]
fn test_accumulator_sums() {
    let mut acc = ColocAccumulator::new();
    acc.push(1.0, 4.0);
    acc.push(2.0, 5.0);
    assert_eq!(acc.n(), 2);
    assert_eq!(acc.sum_x(), 3.0);
    assert_eq!(acc.sum_y(), 9.0);
}

#[test]
fn test_manders() {
    assert_relative_eq!(manders(30.0, 120.0), 0.25);
    assert!(manders(30.0, 0.0).is_nan());
    assert_eq!(manders(0.0, 10.0), 0.0);
}

#[test]
fn test_masked_total_full_mask() {
    let vol = volume(vec![gradient_plane(4, 4)]);
    let masks = mask_volume(vec![full_mask(4, 4)]);
    // Sum of 0..=15.
    assert_eq!(masked_total(&vol, &masks).unwrap(), 120.0);
}

#[test]
fn test_masked_total_partial_mask() {
    let vol = volume(vec![gradient_plane(2, 2)]);
    let masks = mask_volume(vec![checker_mask(2, 2)]);
    // Members are (0,0) and (1,1): 0 + 3.
    assert_eq!(masked_total(&vol, &masks).unwrap(), 3.0);
}

#[test]
fn test_masked_total_shape_mismatch() {
    let vol = volume(vec![gradient_plane(4, 4)]);
    let masks = mask_volume(vec![full_mask(3, 3)]);
    assert!(masked_total(&vol, &masks).is_err());
}

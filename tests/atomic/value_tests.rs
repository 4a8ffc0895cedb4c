/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_engine::atomic::value::{
    f32_lane_manual,
    f64_lane_manual,
};
use prism3_atomic_engine::{
    AtomicValue,
    TypeFamily,
};

fn round_trip<V: AtomicValue + std::fmt::Debug>(values: &[V]) {
    for &value in values {
        assert_eq!(V::from_lane(value.into_lane()), value, "{value:?}");
    }
}

#[test]
fn test_round_trip_bool() {
    round_trip(&[false, true]);
}

#[test]
fn test_round_trip_signed() {
    round_trip(&[0i8, 1, -1, i8::MIN, i8::MAX]);
    round_trip(&[0i16, 1, -1, i16::MIN, i16::MAX]);
    round_trip(&[0i32, 1, -1, i32::MIN, i32::MAX]);
    round_trip(&[0i64, 1, -1, i64::MIN, i64::MAX]);
}

#[test]
fn test_round_trip_unsigned() {
    round_trip(&[0u8, 1, u8::MAX]);
    round_trip(&[0u16, 1, u16::MAX]);
    round_trip(&[0u32, 1, u32::MAX]);
    round_trip(&[0u64, 1, u64::MAX]);
}

#[test]
fn test_round_trip_float() {
    round_trip(&[
        0.0f32,
        1.5,
        -2.25,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        1.0e-42, // subnormal
    ]);
    round_trip(&[
        0.0f64,
        1.5,
        -2.25,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        5.0e-320, // subnormal
    ]);
}

// Signed zero must survive the lane round trip bit for bit.
#[test]
fn test_round_trip_signed_zero() {
    let negative_zero = f64::from_lane((-0.0f64).into_lane());
    assert_eq!(negative_zero, 0.0);
    assert!(negative_zero.is_sign_negative());

    let negative_zero = f32::from_lane((-0.0f32).into_lane());
    assert_eq!(negative_zero, 0.0);
    assert!(negative_zero.is_sign_negative());
}

#[test]
fn test_families() {
    assert_eq!(bool::FAMILY, TypeFamily::Boolean);
    assert_eq!(i8::FAMILY, TypeFamily::Signed);
    assert_eq!(i64::FAMILY, TypeFamily::Signed);
    assert_eq!(u8::FAMILY, TypeFamily::Unsigned);
    assert_eq!(u64::FAMILY, TypeFamily::Unsigned);
    assert_eq!(f32::FAMILY, TypeFamily::FloatingPoint);
    assert_eq!(f64::FAMILY, TypeFamily::FloatingPoint);
}

// Signed values are sign-extended through the lane; unsigned values are
// zero-extended.
#[test]
fn test_lane_extension() {
    assert_eq!((-1i8).into_lane(), u64::MAX);
    assert_eq!((-1i16).into_lane(), u64::MAX);
    assert_eq!(0xFFu8.into_lane(), 0xFF);
    assert_eq!(0xFFFFu16.into_lane(), 0xFFFF);
}

// Decoding ignores bits above the logical width, so a lane left
// non-canonical by a wrapping hardware increment still decodes.
#[test]
fn test_narrow_decode_masks_high_bits() {
    assert_eq!(u8::from_lane(0x0100), 0x00);
    assert_eq!(u8::from_lane(0x01FF), 0xFF);
    assert_eq!(i8::from_lane(0x0080), i8::MIN);
}

// Float lanes carry the memory bit pattern, not a numeric cast.
#[test]
fn test_float_lane_is_bit_pattern() {
    assert_eq!(1.0f64.into_lane(), 0x3FF0_0000_0000_0000);
    assert_ne!(1.0f64.into_lane(), 1);
    assert_eq!(f32::from_lane(1.0f32.into_lane()), 1.0);
}

// The manual IEEE-754 encoders must agree with the lane conversion for
// finite values.
#[test]
fn test_manual_lane_agreement() {
    for value in [0.0f32, -0.0, 1.0, -1.5, 3.25e10, f32::MIN_POSITIVE, 1.0e-42]
    {
        assert_eq!(f32_lane_manual(value), value.into_lane(), "{value}");
    }
    for value in
        [0.0f64, -0.0, 1.0, -1.5, 3.25e100, f64::MIN_POSITIVE, 5.0e-320]
    {
        assert_eq!(f64_lane_manual(value), value.into_lane(), "{value}");
    }
}

#[test]
fn test_eq_values_float_magnitude() {
    assert!(f32::eq_values(-3.0, 3.0));
    assert!(f64::eq_values(-3.0, 3.0));
    assert!(!f64::eq_values(3.0, 4.0));
    assert!(!i32::eq_values(-3, 3));
}

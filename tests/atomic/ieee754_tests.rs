/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_engine::atomic::ieee754::{
    decode_f32,
    decode_f64,
    encode_f32,
    encode_f64,
};

const F64_VALUES: &[f64] = &[
    0.0,
    -0.0,
    1.0,
    -1.0,
    2.0,
    0.5,
    1.5,
    std::f64::consts::PI,
    -std::f64::consts::E,
    1.0e300,
    -1.0e-300,
    f64::MAX,
    f64::MIN,
    f64::MIN_POSITIVE,
    5.0e-324,  // smallest subnormal
    1.2e-310,  // mid-range subnormal
    f64::INFINITY,
    f64::NEG_INFINITY,
];

const F32_VALUES: &[f32] = &[
    0.0,
    -0.0,
    1.0,
    -1.0,
    2.0,
    0.5,
    1.5,
    std::f32::consts::PI,
    -std::f32::consts::E,
    1.0e38,
    -1.0e-38,
    f32::MAX,
    f32::MIN,
    f32::MIN_POSITIVE,
    1.0e-45,  // smallest subnormal
    1.0e-42,  // mid-range subnormal
    f32::INFINITY,
    f32::NEG_INFINITY,
];

// The manual encoder must produce the exact memory bit pattern.
#[test]
fn test_encode_matches_to_bits_f64() {
    for &value in F64_VALUES {
        assert_eq!(encode_f64(value), value.to_bits(), "{value}");
    }
}

#[test]
fn test_encode_matches_to_bits_f32() {
    for &value in F32_VALUES {
        assert_eq!(encode_f32(value), value.to_bits(), "{value}");
    }
}

#[test]
fn test_decode_matches_from_bits_f64() {
    for &value in F64_VALUES {
        let bits = value.to_bits();
        let decoded = decode_f64(bits);
        assert_eq!(decoded.to_bits(), bits, "{value}");
    }
}

#[test]
fn test_decode_matches_from_bits_f32() {
    for &value in F32_VALUES {
        let bits = value.to_bits();
        let decoded = decode_f32(bits);
        assert_eq!(decoded.to_bits(), bits, "{value}");
    }
}

// Round trip is bit-exact for all finite values, signed zeros and
// subnormals included.
#[test]
fn test_round_trip_f64() {
    for &value in F64_VALUES {
        let back = decode_f64(encode_f64(value));
        assert_eq!(back.to_bits(), value.to_bits(), "{value}");
    }
}

#[test]
fn test_round_trip_f32() {
    for &value in F32_VALUES {
        let back = decode_f32(encode_f32(value));
        assert_eq!(back.to_bits(), value.to_bits(), "{value}");
    }
}

#[test]
fn test_known_patterns() {
    assert_eq!(encode_f64(1.0), 0x3FF0_0000_0000_0000);
    assert_eq!(encode_f64(2.0), 0x4000_0000_0000_0000);
    assert_eq!(encode_f64(-2.0), 0xC000_0000_0000_0000);
    assert_eq!(encode_f64(-0.0), 0x8000_0000_0000_0000);
    assert_eq!(encode_f32(1.0), 0x3F80_0000);
    assert_eq!(encode_f32(-0.0), 0x8000_0000);
}

// The subnormal path has no implicit leading one: the smallest
// subnormal is mantissa 1, exponent field 0.
#[test]
fn test_subnormal_layout() {
    assert_eq!(encode_f64(5.0e-324), 1);
    assert_eq!(decode_f64(1), 5.0e-324);
    assert_eq!(encode_f32(1.0e-45), 1);
    assert_eq!(decode_f32(1), 1.0e-45);
}

// NaN payloads collapse to the canonical quiet NaN; that the result is
// still a NaN is the only guarantee.
#[test]
fn test_nan_canonicalized() {
    assert_eq!(encode_f64(f64::NAN), 0x7FF8_0000_0000_0000);
    assert!(decode_f64(0x7FF8_0000_0000_0001).is_nan());
    assert_eq!(encode_f32(f32::NAN), 0x7FC0_0000);
    assert!(decode_f32(0x7FC0_0001).is_nan());
}

#[test]
fn test_infinity() {
    assert_eq!(encode_f64(f64::INFINITY), 0x7FF0_0000_0000_0000);
    assert_eq!(decode_f64(0xFFF0_0000_0000_0000), f64::NEG_INFINITY);
    assert_eq!(encode_f32(f32::INFINITY), 0x7F80_0000);
    assert_eq!(decode_f32(0xFF80_0000), f32::NEG_INFINITY);
}

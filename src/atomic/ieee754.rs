/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Manual IEEE-754 Codec
//!
//! Re-derives the IEEE-754 single and double precision bit layout with
//! plain arithmetic, independent of the builtin `to_bits`/`from_bits`
//! reinterpretation.
//!
//! The encoders decompose a value into sign, biased exponent and mantissa
//! by exact halving and doubling; the decoders rebuild the value by exact
//! scaling. Every step multiplies or divides by a power of two with the
//! operand inside the normal range, so no rounding occurs and the
//! round-trip is bit-exact for all finite values, including signed zeros
//! and subnormals.
//!
//! NaN payloads are not preserved: every NaN input encodes to the
//! canonical quiet NaN of its width.
//!
//! # Author
//!
//! Haixing Hu

/// Exponent bias of an IEEE-754 double.
const F64_BIAS: i32 = 1023;
/// Mantissa width of an IEEE-754 double.
const F64_MANTISSA_BITS: u32 = 52;
/// Minimum normal exponent of an IEEE-754 double.
const F64_MIN_EXP: i32 = -1022;
/// All-ones exponent field of an IEEE-754 double.
const F64_EXP_SATURATED: u64 = 0x7FF;
/// Canonical quiet NaN bit pattern of an IEEE-754 double.
const F64_QUIET_NAN: u64 = 0x7FF8_0000_0000_0000;

/// Exponent bias of an IEEE-754 single.
const F32_BIAS: i32 = 127;
/// Mantissa width of an IEEE-754 single.
const F32_MANTISSA_BITS: u32 = 23;
/// Minimum normal exponent of an IEEE-754 single.
const F32_MIN_EXP: i32 = -126;
/// All-ones exponent field of an IEEE-754 single.
const F32_EXP_SATURATED: u32 = 0xFF;
/// Canonical quiet NaN bit pattern of an IEEE-754 single.
const F32_QUIET_NAN: u32 = 0x7FC0_0000;

/// Detects the sign of a value arithmetically, including `-0.0`.
///
/// The reciprocal of a negative zero is negative infinity, which lets the
/// sign of zero be recovered without inspecting bits.
#[inline]
fn is_negative_f64(value: f64) -> bool {
    if value < 0.0 {
        true
    } else if value == 0.0 {
        value.recip() < 0.0
    } else {
        false
    }
}

#[inline]
fn is_negative_f32(value: f32) -> bool {
    if value < 0.0 {
        true
    } else if value == 0.0 {
        value.recip() < 0.0
    } else {
        false
    }
}

/// Encodes an `f64` into its IEEE-754 bit pattern.
///
/// Handles sign, biased exponent, mantissa, subnormal values (all-zero
/// exponent field, no implicit leading one), signed zeros and infinities.
/// NaN encodes to the canonical quiet NaN; payloads are not preserved.
///
/// # Parameters
///
/// * `value` - The value to encode.
///
/// # Returns
///
/// The 64-bit pattern the value has in memory.
///
/// # Example
///
/// ```rust
/// use prism3_atomic_engine::atomic::ieee754::encode_f64;
///
/// assert_eq!(encode_f64(1.0), 0x3FF0_0000_0000_0000);
/// assert_eq!(encode_f64(-0.0), 0x8000_0000_0000_0000);
/// ```
pub fn encode_f64(value: f64) -> u64 {
    if value.is_nan() {
        return F64_QUIET_NAN;
    }
    let sign_bit = if is_negative_f64(value) { 1u64 << 63 } else { 0 };
    if value == 0.0 {
        return sign_bit;
    }
    if value.is_infinite() {
        return sign_bit | (F64_EXP_SATURATED << F64_MANTISSA_BITS);
    }

    // Normalize |value| into [1.0, 2.0) by exact halving/doubling,
    // stopping at the minimum normal exponent so subnormal inputs fall
    // out with a fraction below 1.0.
    let mut frac = value.abs();
    let mut exp: i32 = 0;
    while frac >= 2.0 {
        frac /= 2.0;
        exp += 1;
    }
    while frac < 1.0 && exp > F64_MIN_EXP {
        frac *= 2.0;
        exp -= 1;
    }

    let scale = exp2_f64(F64_MANTISSA_BITS as i32);
    if frac < 1.0 {
        // Subnormal: exponent field zero, mantissa scaled directly.
        let mantissa = (frac * scale) as u64;
        sign_bit | mantissa
    } else {
        let biased = (exp + F64_BIAS) as u64;
        let mantissa = ((frac - 1.0) * scale) as u64;
        sign_bit | (biased << F64_MANTISSA_BITS) | mantissa
    }
}

/// Decodes an IEEE-754 bit pattern into an `f64`.
///
/// The inverse of [`encode_f64`]: rebuilds sign, exponent and mantissa by
/// exact scaling. A saturated exponent field yields infinity or the
/// canonical NaN depending on the mantissa field.
///
/// # Parameters
///
/// * `bits` - The 64-bit pattern to decode.
///
/// # Returns
///
/// The value whose memory representation is `bits`.
///
/// # Example
///
/// ```rust
/// use prism3_atomic_engine::atomic::ieee754::decode_f64;
///
/// assert_eq!(decode_f64(0x4000_0000_0000_0000), 2.0);
/// ```
pub fn decode_f64(bits: u64) -> f64 {
    let negative = (bits >> 63) != 0;
    let exp_field = (bits >> F64_MANTISSA_BITS) & F64_EXP_SATURATED;
    let mantissa = bits & ((1u64 << F64_MANTISSA_BITS) - 1);

    let magnitude = if exp_field == F64_EXP_SATURATED {
        if mantissa == 0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    } else if exp_field == 0 {
        // Subnormal: no implicit leading one. The two-step scaling keeps
        // every intermediate exactly representable.
        let fraction = mantissa as f64 * exp2_f64(-(F64_MANTISSA_BITS as i32));
        fraction * exp2_f64(F64_MIN_EXP)
    } else {
        let fraction =
            1.0 + mantissa as f64 * exp2_f64(-(F64_MANTISSA_BITS as i32));
        fraction * exp2_f64(exp_field as i32 - F64_BIAS)
    };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Encodes an `f32` into its IEEE-754 bit pattern.
///
/// Single-precision counterpart of [`encode_f64`]: same decomposition
/// with a 23-bit mantissa, bias 127 and minimum normal exponent -126.
///
/// # Parameters
///
/// * `value` - The value to encode.
///
/// # Returns
///
/// The 32-bit pattern the value has in memory.
pub fn encode_f32(value: f32) -> u32 {
    if value.is_nan() {
        return F32_QUIET_NAN;
    }
    let sign_bit = if is_negative_f32(value) { 1u32 << 31 } else { 0 };
    if value == 0.0 {
        return sign_bit;
    }
    if value.is_infinite() {
        return sign_bit | (F32_EXP_SATURATED << F32_MANTISSA_BITS);
    }

    let mut frac = value.abs();
    let mut exp: i32 = 0;
    while frac >= 2.0 {
        frac /= 2.0;
        exp += 1;
    }
    while frac < 1.0 && exp > F32_MIN_EXP {
        frac *= 2.0;
        exp -= 1;
    }

    let scale = exp2_f32(F32_MANTISSA_BITS as i32);
    if frac < 1.0 {
        let mantissa = (frac * scale) as u32;
        sign_bit | mantissa
    } else {
        let biased = (exp + F32_BIAS) as u32;
        let mantissa = ((frac - 1.0) * scale) as u32;
        sign_bit | (biased << F32_MANTISSA_BITS) | mantissa
    }
}

/// Decodes an IEEE-754 bit pattern into an `f32`.
///
/// Single-precision counterpart of [`decode_f64`].
///
/// # Parameters
///
/// * `bits` - The 32-bit pattern to decode.
///
/// # Returns
///
/// The value whose memory representation is `bits`.
pub fn decode_f32(bits: u32) -> f32 {
    let negative = (bits >> 31) != 0;
    let exp_field = (bits >> F32_MANTISSA_BITS) & F32_EXP_SATURATED;
    let mantissa = bits & ((1u32 << F32_MANTISSA_BITS) - 1);

    let magnitude = if exp_field == F32_EXP_SATURATED {
        if mantissa == 0 {
            f32::INFINITY
        } else {
            f32::NAN
        }
    } else if exp_field == 0 {
        let fraction = mantissa as f32 * exp2_f32(-(F32_MANTISSA_BITS as i32));
        fraction * exp2_f32(F32_MIN_EXP)
    } else {
        let fraction =
            1.0 + mantissa as f32 * exp2_f32(-(F32_MANTISSA_BITS as i32));
        fraction * exp2_f32(exp_field as i32 - F32_BIAS)
    };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Computes `2^exp` exactly for exponents inside the normal range.
///
/// Built by repeated doubling/halving so the result never passes through
/// an inexact intermediate.
fn exp2_f64(exp: i32) -> f64 {
    let mut result = 1.0f64;
    if exp >= 0 {
        for _ in 0..exp {
            result *= 2.0;
        }
    } else {
        for _ in 0..(-exp) {
            result /= 2.0;
        }
    }
    result
}

fn exp2_f32(exp: i32) -> f32 {
    let mut result = 1.0f32;
    if exp >= 0 {
        for _ in 0..exp {
            result *= 2.0;
        }
    } else {
        for _ in 0..(-exp) {
            result /= 2.0;
        }
    }
    result
}

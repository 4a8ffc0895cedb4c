/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Logical Values and Lane Conversion
//!
//! Defines the classification of logical value types and the bit-level
//! conversion between a logical value and the 64-bit storage lane of an
//! atomic cell.
//!
//! A cell physically stores 64 bits. Those bits carry two interpretations:
//! a signed lane (as `i64`) and an unsigned lane (as `u64`). Signed,
//! boolean and floating-point values route through the signed
//! interpretation (sign-extended where narrow); unsigned values route
//! through the unsigned interpretation (zero-extended). Floating-point
//! values store their memory bit pattern, never their numeric value cast
//! to integer.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::ieee754;

/// Classification of a logical value type.
///
/// The family determines which lane interpretation is authoritative for a
/// cell, which operation table applies, and how narrow values are masked.
///
/// # Author
///
/// Haixing Hu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    /// Two-valued logical type (`bool`).
    Boolean,
    /// Two's-complement signed integers (`i8` through `i64`).
    Signed,
    /// Unsigned integers (`u8` through `u64`).
    Unsigned,
    /// IEEE-754 binary floating point (`f32`, `f64`).
    FloatingPoint,
}

mod sealed {
    /// Seals [`AtomicValue`](super::AtomicValue) to the supported set of
    /// logical types.
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A logical value type that can live inside an atomic cell.
///
/// This trait is sealed: it is implemented for exactly `bool`, the four
/// signed and four unsigned integer widths, `f32` and `f64`. Attempting
/// to instantiate an atomic over any other type is a compile error, so an
/// unsupported type is rejected before any memory is touched.
///
/// # Contract
///
/// For every implementor, `from_lane(into_lane(v))` must reproduce `v`
/// exactly. For floating-point types the lane carries the value's memory
/// bit pattern, so the round-trip preserves `-0.0` and subnormal values
/// bit for bit.
///
/// # Author
///
/// Haixing Hu
pub trait AtomicValue:
    sealed::Sealed + Copy + PartialEq + PartialOrd + Send + Sync + 'static
{
    /// The type family this logical type belongs to.
    const FAMILY: TypeFamily;

    /// The logical width, in bits.
    const BITS: u32;

    /// Mask selecting the low `BITS` bits of a lane.
    const MASK: u64;

    /// Lane encoding of the value one, used by the increment and
    /// decrement paths.
    const ONE_LANE: u64;

    /// Converts the logical value to its 64-bit lane representation.
    fn into_lane(self) -> u64;

    /// Reconstructs the logical value from a 64-bit lane.
    ///
    /// Bits above the logical width are ignored, so a lane left
    /// non-canonical by a wrapping hardware increment still decodes to
    /// the correct logical value.
    fn from_lane(lane: u64) -> Self;

    /// Compares two logical values for equality.
    ///
    /// Integer and boolean families compare exactly. Floating-point
    /// families compare by magnitude, so `-3.0` equals `3.0`; see the
    /// wrapper-level equality documentation for the rationale.
    #[inline]
    fn eq_values(a: Self, b: Self) -> bool {
        a == b
    }
}

const fn width_mask(bits: u32) -> u64 {
    if bits == 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl AtomicValue for bool {
    const FAMILY: TypeFamily = TypeFamily::Boolean;
    const BITS: u32 = 8;
    const MASK: u64 = width_mask(8);
    const ONE_LANE: u64 = 1;

    #[inline]
    fn into_lane(self) -> u64 {
        self as u64
    }

    #[inline]
    fn from_lane(lane: u64) -> Self {
        (lane & Self::MASK) != 0
    }
}

macro_rules! impl_signed_value {
    ($type:ty, $bits:expr) => {
        impl AtomicValue for $type {
            const FAMILY: TypeFamily = TypeFamily::Signed;
            const BITS: u32 = $bits;
            const MASK: u64 = width_mask($bits);
            const ONE_LANE: u64 = 1;

            #[inline]
            fn into_lane(self) -> u64 {
                // Sign-extend into the signed lane interpretation.
                (self as i64) as u64
            }

            #[inline]
            fn from_lane(lane: u64) -> Self {
                lane as $type
            }
        }
    };
}

macro_rules! impl_unsigned_value {
    ($type:ty, $bits:expr) => {
        impl AtomicValue for $type {
            const FAMILY: TypeFamily = TypeFamily::Unsigned;
            const BITS: u32 = $bits;
            const MASK: u64 = width_mask($bits);
            const ONE_LANE: u64 = 1;

            #[inline]
            fn into_lane(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_lane(lane: u64) -> Self {
                lane as $type
            }
        }
    };
}

impl_signed_value!(i8, 8);
impl_signed_value!(i16, 16);
impl_signed_value!(i32, 32);
impl_signed_value!(i64, 64);
impl_unsigned_value!(u8, 8);
impl_unsigned_value!(u16, 16);
impl_unsigned_value!(u32, 32);
impl_unsigned_value!(u64, 64);

impl AtomicValue for f32 {
    const FAMILY: TypeFamily = TypeFamily::FloatingPoint;
    const BITS: u32 = 32;
    const MASK: u64 = width_mask(32);
    // Bit pattern of 1.0f32 in the lane.
    const ONE_LANE: u64 = 0x3F80_0000;

    #[inline]
    fn into_lane(self) -> u64 {
        // The memory bit pattern, sign-extended through the signed lane.
        ((self.to_bits() as i32) as i64) as u64
    }

    #[inline]
    fn from_lane(lane: u64) -> Self {
        f32::from_bits(lane as u32)
    }

    #[inline]
    fn eq_values(a: Self, b: Self) -> bool {
        a.abs() == b.abs()
    }
}

impl AtomicValue for f64 {
    const FAMILY: TypeFamily = TypeFamily::FloatingPoint;
    const BITS: u32 = 64;
    const MASK: u64 = width_mask(64);
    // Bit pattern of 1.0f64.
    const ONE_LANE: u64 = 0x3FF0_0000_0000_0000;

    #[inline]
    fn into_lane(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_lane(lane: u64) -> Self {
        f64::from_bits(lane)
    }

    #[inline]
    fn eq_values(a: Self, b: Self) -> bool {
        a.abs() == b.abs()
    }
}

/// A floating-point logical value type.
///
/// Extends [`AtomicValue`] with the unary math operations the
/// floating-point wrappers expose. Sealed alongside `AtomicValue`;
/// implemented for `f32` and `f64` only.
///
/// # Author
///
/// Haixing Hu
pub trait AtomicFloat: AtomicValue {
    /// The value `1.0` of this type.
    const ONE: Self;

    /// Absolute value.
    fn abs(self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Raises `self` to the power `exp`.
    fn pow(self, exp: Self) -> Self;
    /// Natural logarithm.
    fn log(self) -> Self;
    /// Exponential, `e^self`.
    fn exp(self) -> Self;
    /// Largest integer value not greater than `self`.
    fn floor(self) -> Self;
    /// Smallest integer value not less than `self`.
    fn ceil(self) -> Self;
    /// Nearest integer, ties away from zero.
    fn round(self) -> Self;
    /// Sign negation.
    fn negate(self) -> Self;
    /// Addition, used by the read-compute-write increment path.
    fn add(self, other: Self) -> Self;
}

macro_rules! impl_atomic_float {
    ($type:ty) => {
        impl AtomicFloat for $type {
            const ONE: Self = 1.0;

            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }

            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }

            #[inline]
            fn pow(self, exp: Self) -> Self {
                self.powf(exp)
            }

            #[inline]
            fn log(self) -> Self {
                self.ln()
            }

            #[inline]
            fn exp(self) -> Self {
                self.exp()
            }

            #[inline]
            fn floor(self) -> Self {
                self.floor()
            }

            #[inline]
            fn ceil(self) -> Self {
                self.ceil()
            }

            #[inline]
            fn round(self) -> Self {
                self.round()
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }

            #[inline]
            fn add(self, other: Self) -> Self {
                self + other
            }
        }
    };
}

impl_atomic_float!(f32);
impl_atomic_float!(f64);

/// Encodes an `f32` into its lane representation through the manual
/// IEEE-754 encoder instead of the builtin bit conversion.
///
/// Produces the same lane bits as `AtomicValue::into_lane` for every
/// finite value; NaN collapses to the canonical quiet NaN.
///
/// # Parameters
///
/// * `value` - The value to encode.
///
/// # Returns
///
/// The 64-bit lane carrying the value's bit pattern.
#[inline]
pub fn f32_lane_manual(value: f32) -> u64 {
    ((ieee754::encode_f32(value) as i32) as i64) as u64
}

/// Encodes an `f64` into its lane representation through the manual
/// IEEE-754 encoder instead of the builtin bit conversion.
///
/// # Parameters
///
/// * `value` - The value to encode.
///
/// # Returns
///
/// The 64-bit lane carrying the value's bit pattern.
#[inline]
pub fn f64_lane_manual(value: f64) -> u64 {
    ieee754::encode_f64(value)
}

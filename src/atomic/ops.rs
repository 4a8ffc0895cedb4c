/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Operation Tables
//!
//! Maps an operation kind to a pure lane-level function, per type family
//! and width. The tables are `static` and shared by every atomic of a
//! given logical type, so dispatch costs one array index and no
//! per-instance allocation.
//!
//! Every entry decodes its operands from the 64-bit lane, applies the
//! operation at the logical width, and re-encodes the result, so bits
//! above the logical width never leak into a result: an 8-bit `Not` of
//! `0b0000_1111` is `0b1111_0000`, not a 64-bit complement.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::error::AtomicError;
use crate::atomic::value::{
    AtomicValue,
    TypeFamily,
};

/// The operations an atomic cell can perform through its table.
///
/// Arithmetic kinds apply to the signed, unsigned and floating-point
/// families; bitwise and shift kinds apply to the integer families;
/// `And`, `Or`, `Xor` and `Not` additionally have logical meanings for
/// the boolean family.
///
/// # Author
///
/// Haixing Hu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Wrapping (integer) or IEEE (float) addition.
    Add = 0,
    /// Wrapping (integer) or IEEE (float) subtraction.
    Subtract = 1,
    /// Wrapping (integer) or IEEE (float) multiplication.
    Multiply = 2,
    /// Division; integer division by zero is a fatal error.
    Divide = 3,
    /// Remainder; integer remainder by zero is a fatal error.
    Modulus = 4,
    /// Bitwise or logical AND.
    And = 5,
    /// Bitwise or logical OR.
    Or = 6,
    /// Bitwise or logical XOR.
    Xor = 7,
    /// Bitwise or logical complement; the operand is ignored.
    Not = 8,
    /// Left shift, amount taken modulo the logical width.
    LeftShift = 9,
    /// Right shift (arithmetic for signed), amount modulo the width.
    RightShift = 10,
    /// Left rotation within the logical width.
    RotateLeft = 11,
    /// Right rotation within the logical width.
    RotateRight = 12,
}

impl OpKind {
    /// Number of operation kinds.
    pub const COUNT: usize = 13;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A pure binary operation over lane bits.
///
/// Takes the current lane and the operand lane, returns the new lane.
pub type LaneOp = fn(u64, u64) -> u64;

/// A fixed mapping from [`OpKind`] to a lane-level function for one type
/// family and width.
///
/// Tables are constructed once as `static` items; a missing entry means
/// the operation kind is not defined for the family and surfaces as
/// [`AtomicError::InvalidOperation`].
///
/// # Author
///
/// Haixing Hu
pub struct OpTable {
    family: TypeFamily,
    entries: [Option<LaneOp>; OpKind::COUNT],
}

impl OpTable {
    /// Applies an operation to lane operands.
    ///
    /// # Parameters
    ///
    /// * `kind` - The operation to apply.
    /// * `current` - The current lane bits.
    /// * `operand` - The operand lane bits.
    ///
    /// # Returns
    ///
    /// The new lane bits, or [`AtomicError::InvalidOperation`] if the
    /// kind has no entry for this table's family.
    #[inline]
    pub fn apply(
        &self,
        kind: OpKind,
        current: u64,
        operand: u64,
    ) -> Result<u64, AtomicError> {
        match self.entries[kind.index()] {
            Some(op) => Ok(op(current, operand)),
            None => Err(AtomicError::InvalidOperation {
                kind,
                family: self.family,
            }),
        }
    }

    /// Returns whether an operation kind has an entry in this table.
    #[inline]
    pub fn supports(&self, kind: OpKind) -> bool {
        self.entries[kind.index()].is_some()
    }

    /// Returns the static table for a logical value type.
    #[inline]
    pub fn of<V: AtomicValue>() -> &'static OpTable {
        match (V::FAMILY, V::BITS) {
            (TypeFamily::Boolean, _) => &BOOL_TABLE,
            (TypeFamily::Signed, 8) => &I8_TABLE,
            (TypeFamily::Signed, 16) => &I16_TABLE,
            (TypeFamily::Signed, 32) => &I32_TABLE,
            (TypeFamily::Signed, _) => &I64_TABLE,
            (TypeFamily::Unsigned, 8) => &U8_TABLE,
            (TypeFamily::Unsigned, 16) => &U16_TABLE,
            (TypeFamily::Unsigned, 32) => &U32_TABLE,
            (TypeFamily::Unsigned, _) => &U64_TABLE,
            (TypeFamily::FloatingPoint, 32) => &F32_TABLE,
            (TypeFamily::FloatingPoint, _) => &F64_TABLE,
        }
    }
}

/// Rotates the low `width` bits of `bits` left by `amount`.
///
/// Implemented as two shifts combined with OR; the amount is reduced
/// modulo the width, so rotating by the full width is the identity.
#[inline]
fn rotate_left_masked(bits: u64, amount: u64, width: u32, mask: u64) -> u64 {
    let s = (amount as u32) % width;
    let x = bits & mask;
    if s == 0 {
        x
    } else {
        ((x << s) | (x >> (width - s))) & mask
    }
}

/// Rotates the low `width` bits of `bits` right by `amount`.
#[inline]
fn rotate_right_masked(bits: u64, amount: u64, width: u32, mask: u64) -> u64 {
    let s = (amount as u32) % width;
    let x = bits & mask;
    if s == 0 {
        x
    } else {
        ((x >> s) | (x << (width - s))) & mask
    }
}

/// Generates the static operation table for one integer type.
///
/// Every entry decodes the lane operands to the concrete type, applies
/// the operation with wrapping semantics, and re-encodes. Shift amounts
/// are reduced modulo the logical width; rotations happen on the masked
/// unsigned bit pattern and are re-encoded through the type's lane
/// conversion so signed results stay sign-extended.
macro_rules! int_op_table {
    ($name:ident, $t:ty) => {
        static $name: OpTable = OpTable {
            family: <$t as AtomicValue>::FAMILY,
            entries: [
                // Add
                Some(|a, b| {
                    <$t>::from_lane(a)
                        .wrapping_add(<$t>::from_lane(b))
                        .into_lane()
                }),
                // Subtract
                Some(|a, b| {
                    <$t>::from_lane(a)
                        .wrapping_sub(<$t>::from_lane(b))
                        .into_lane()
                }),
                // Multiply
                Some(|a, b| {
                    <$t>::from_lane(a)
                        .wrapping_mul(<$t>::from_lane(b))
                        .into_lane()
                }),
                // Divide: division by zero is a fatal arithmetic error.
                Some(|a, b| {
                    <$t>::from_lane(a)
                        .wrapping_div(<$t>::from_lane(b))
                        .into_lane()
                }),
                // Modulus
                Some(|a, b| {
                    <$t>::from_lane(a)
                        .wrapping_rem(<$t>::from_lane(b))
                        .into_lane()
                }),
                // And
                Some(|a, b| {
                    (<$t>::from_lane(a) & <$t>::from_lane(b)).into_lane()
                }),
                // Or
                Some(|a, b| {
                    (<$t>::from_lane(a) | <$t>::from_lane(b)).into_lane()
                }),
                // Xor
                Some(|a, b| {
                    (<$t>::from_lane(a) ^ <$t>::from_lane(b)).into_lane()
                }),
                // Not: complement at the logical width only.
                Some(|a, _| (!<$t>::from_lane(a)).into_lane()),
                // LeftShift
                Some(|a, b| {
                    let s = (b as u32) % <$t as AtomicValue>::BITS;
                    (<$t>::from_lane(a) << s).into_lane()
                }),
                // RightShift: arithmetic for signed, logical for unsigned.
                Some(|a, b| {
                    let s = (b as u32) % <$t as AtomicValue>::BITS;
                    (<$t>::from_lane(a) >> s).into_lane()
                }),
                // RotateLeft
                Some(|a, b| {
                    let r = rotate_left_masked(
                        a,
                        b,
                        <$t as AtomicValue>::BITS,
                        <$t as AtomicValue>::MASK,
                    );
                    <$t>::from_lane(r).into_lane()
                }),
                // RotateRight
                Some(|a, b| {
                    let r = rotate_right_masked(
                        a,
                        b,
                        <$t as AtomicValue>::BITS,
                        <$t as AtomicValue>::MASK,
                    );
                    <$t>::from_lane(r).into_lane()
                }),
            ],
        };
    };
}

/// Generates the static operation table for one floating-point type.
///
/// Only the arithmetic kinds are defined; IEEE rules apply, so division
/// by zero yields an infinity or NaN rather than failing.
macro_rules! float_op_table {
    ($name:ident, $t:ty) => {
        static $name: OpTable = OpTable {
            family: TypeFamily::FloatingPoint,
            entries: [
                // Add
                Some(|a, b| {
                    (<$t>::from_lane(a) + <$t>::from_lane(b)).into_lane()
                }),
                // Subtract
                Some(|a, b| {
                    (<$t>::from_lane(a) - <$t>::from_lane(b)).into_lane()
                }),
                // Multiply
                Some(|a, b| {
                    (<$t>::from_lane(a) * <$t>::from_lane(b)).into_lane()
                }),
                // Divide
                Some(|a, b| {
                    (<$t>::from_lane(a) / <$t>::from_lane(b)).into_lane()
                }),
                // Modulus
                Some(|a, b| {
                    (<$t>::from_lane(a) % <$t>::from_lane(b)).into_lane()
                }),
                // And, Or, Xor, Not
                None,
                None,
                None,
                None,
                // LeftShift, RightShift, RotateLeft, RotateRight
                None,
                None,
                None,
                None,
            ],
        };
    };
}

int_op_table!(I8_TABLE, i8);
int_op_table!(I16_TABLE, i16);
int_op_table!(I32_TABLE, i32);
int_op_table!(I64_TABLE, i64);
int_op_table!(U8_TABLE, u8);
int_op_table!(U16_TABLE, u16);
int_op_table!(U32_TABLE, u32);
int_op_table!(U64_TABLE, u64);
float_op_table!(F32_TABLE, f32);
float_op_table!(F64_TABLE, f64);

/// The boolean family has its own two-valued logical table.
static BOOL_TABLE: OpTable = OpTable {
    family: TypeFamily::Boolean,
    entries: [
        // Add, Subtract, Multiply, Divide, Modulus
        None,
        None,
        None,
        None,
        None,
        // And
        Some(|a, b| (bool::from_lane(a) && bool::from_lane(b)).into_lane()),
        // Or
        Some(|a, b| (bool::from_lane(a) || bool::from_lane(b)).into_lane()),
        // Xor
        Some(|a, b| (bool::from_lane(a) ^ bool::from_lane(b)).into_lane()),
        // Not
        Some(|a, _| (!bool::from_lane(a)).into_lane()),
        // LeftShift, RightShift, RotateLeft, RotateRight
        None,
        None,
        None,
        None,
    ],
};

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Error Taxonomy
//!
//! Contract-violation errors of the atomic engine. These are
//! programmer-error-class failures, not expected runtime conditions;
//! callers should propagate them rather than swallow them, since masking
//! them would hide a type-safety violation.
//!
//! Two failure classes from the engine's contract do not appear here
//! because Rust removes them statically: constructing an atomic over an
//! unsupported logical type is a compile error (the value trait is
//! sealed), and use-after-release is unrepresentable because release is
//! tied to ownership.
//!
//! # Author
//!
//! Haixing Hu

use thiserror::Error;

use crate::atomic::ops::OpKind;
use crate::atomic::value::TypeFamily;

/// Errors reported by atomic cells and typed wrappers.
///
/// # Author
///
/// Haixing Hu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AtomicError {
    /// The operation kind has no entry in the cell's operation table,
    /// e.g. a bitwise operation on a floating-point atomic.
    #[error("operation {kind:?} is not defined for the {family:?} family")]
    InvalidOperation {
        /// The operation that was requested.
        kind: OpKind,
        /// The type family of the cell.
        family: TypeFamily,
    },

    /// The reference count is at its representable maximum; the cell
    /// cannot be shared further.
    #[error("atomic cell reference count is at its maximum")]
    ReferenceOverflow,
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Adaptive Atomic Types
//!
//! The atomic variable engine: a generic typed wrapper over a small
//! aligned storage cell whose synchronization strategy adapts to the
//! measured sharing level, a bit-level conversion layer between logical
//! values and the cell's 64-bit lanes, and static per-family operation
//! tables.
//!
//! # Layers
//!
//! - [`value`]: logical type classification and lane conversion, with a
//!   manual IEEE-754 codec in [`ieee754`]
//! - [`ops`]: operation kinds and the static tables dispatching them
//! - [`cell`]: the tiered storage and concurrency core
//! - [`typed`]: the generic wrapper and the per-type aliases
//! - [`signal`]: a single-slot handoff primitive built on the engine
//!
//! # Author
//!
//! Haixing Hu

pub mod cell;
pub mod error;
pub mod ieee754;
pub mod ops;
pub mod signal;
pub mod typed;
pub mod value;

pub use cell::{
    AccessTier,
    AtomicCell,
    CellGuard,
};
pub use error::AtomicError;
pub use ops::{
    OpKind,
    OpTable,
};
pub use signal::Signal;
pub use typed::{
    AtomicBool,
    AtomicF32,
    AtomicF64,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    TypedAtomic,
};
pub use value::{
    AtomicFloat,
    AtomicValue,
    TypeFamily,
};

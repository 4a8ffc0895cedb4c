/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-atomic-engine
//!
//! Adaptive atomic variable engine with contention-tiered access
//! strategies.
//!
//! This crate provides atomic read/write/arithmetic/bitwise/shift
//! operations over primitive numeric and boolean values, backed by a
//! small aligned memory cell. Instead of a single fixed synchronization
//! primitive, each cell selects an access strategy from its live
//! reference count: plain ordered accesses while one holder exists,
//! lock-free hardware primitives under light sharing, and a
//! spin-then-block contention lock once sharing grows past a handful of
//! holders. Compare-and-swap and the reference count itself stay
//! lock-free at every tier.
//!
//! ## Design Goals
//!
//! - **Adaptivity**: the synchronization cost tracks the measured
//!   sharing level, never the worst case
//! - **Transparency**: the tier changes the performance path only,
//!   never an observable result
//! - **One wrapper**: a single generic [`TypedAtomic`] covers all eleven
//!   logical types through static, table-driven dispatch
//! - **Explicit bit layout**: the IEEE-754 encode/decode path is
//!   re-derived manually in [`atomic::ieee754`], independent of the
//!   builtin bit conversion
//!
//! ## Features
//!
//! - Boolean atomic type: `AtomicBool`
//! - Integer atomic types: `AtomicI8`, `AtomicU8`, `AtomicI16`,
//!   `AtomicU16`, `AtomicI32`, `AtomicU32`, `AtomicI64`, `AtomicU64`
//! - Floating-point atomic types: `AtomicF32`, `AtomicF64`
//! - Single-slot handoff primitive: `Signal<T>`
//!
//! ## Example
//!
//! ```rust
//! use prism3_atomic_engine::AtomicI32;
//! use std::thread;
//!
//! // Sole owner: exclusive tier.
//! let counter = AtomicI32::new(0);
//! counter.increment().unwrap();
//! assert_eq!(counter.load(), 1);
//!
//! // Shared: the tier escalates with the reference count, the
//! // observable results do not change.
//! let counter = AtomicI32::new(0);
//! let mut handles = vec![];
//! for _ in 0..10 {
//!     let counter = counter.share().unwrap();
//!     handles.push(thread::spawn(move || {
//!         for _ in 0..100 {
//!             counter.increment().unwrap();
//!         }
//!     }));
//! }
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(counter.load(), 1000);
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;

// Re-export all atomic types and the engine's public vocabulary
pub use atomic::{
    AccessTier,
    AtomicBool,
    AtomicCell,
    AtomicError,
    AtomicF32,
    AtomicF64,
    AtomicFloat,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicValue,
    CellGuard,
    OpKind,
    OpTable,
    Signal,
    TypeFamily,
    TypedAtomic,
};

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Typed Atomic Wrappers
//!
//! One generic wrapper, [`TypedAtomic`], parameterized over the eleven
//! supported logical types, plus the familiar per-type aliases
//! (`AtomicBool`, `AtomicI32`, `AtomicF64`, ...).
//!
//! A wrapper owns one atomic cell and a reference to the static
//! operation table of its type family and width. Every named operation
//! reads the current lane through the cell's tier-selected strategy,
//! applies the table function, writes the result back and returns it.
//! Except where a tier happens to serialize the pair, that
//! read-modify-write is not a single atomic transaction; callers that
//! need transactional updates use [`TypedAtomic::compare_set`] in a
//! retry loop (or [`TypedAtomic::update`], which does exactly that), or
//! bracket several calls with [`TypedAtomic::lock`].
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::atomic::cell::{
    AccessTier,
    AtomicCell,
    CellGuard,
};
use crate::atomic::error::AtomicError;
use crate::atomic::ops::{
    OpKind,
    OpTable,
};
use crate::atomic::value::{
    AtomicFloat,
    AtomicValue,
    TypeFamily,
};

/// An atomic variable over one logical value type.
///
/// The wrapper adapts its synchronization strategy to the measured
/// sharing level: with a single holder it uses plain ordered accesses,
/// with light sharing it uses lock-free hardware primitives, and with
/// five or more holders it escalates to a spin-then-block contention
/// lock. The tier never changes observable results, only the
/// performance path.
///
/// Sharing is explicit: [`TypedAtomic::share`] adds a reference and
/// returns a second handle to the same cell, and dropping a handle
/// removes its reference. The backing memory is released exactly when
/// the last handle is dropped.
///
/// # Equality
///
/// Two wrappers compare equal when their current logical values do.
/// Floating-point wrappers compare by magnitude, so an atomic holding
/// `-3.0` equals one holding `3.0`. This is a deliberate, if surprising,
/// part of the contract; use `load()` and compare directly for exact
/// semantics.
///
/// # Example
///
/// ```rust
/// use prism3_atomic_engine::AtomicU16;
///
/// let atomic = AtomicU16::new(0xFFF0);
/// assert_eq!(atomic.and(0x0F0F).unwrap(), 0x0F00);
/// assert_eq!(atomic.load(), 0x0F00);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct TypedAtomic<V: AtomicValue> {
    cell: Arc<AtomicCell>,
    table: &'static OpTable,
    _value: PhantomData<V>,
}

impl<V: AtomicValue> TypedAtomic<V> {
    /// Creates a new atomic holding the given initial value.
    ///
    /// The cell starts with one reference, so a freshly constructed
    /// atomic runs in the exclusive tier.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicI32;
    ///
    /// let atomic = AtomicI32::new(42);
    /// assert_eq!(atomic.load(), 42);
    /// ```
    #[inline]
    pub fn new(value: V) -> Self {
        Self {
            cell: Arc::new(AtomicCell::new(value.into_lane())),
            table: OpTable::of::<V>(),
            _value: PhantomData,
        }
    }

    /// Creates a second handle to the same cell, adding one reference.
    ///
    /// The new reference count takes effect immediately for the tier
    /// decision of subsequent operations on either handle.
    ///
    /// # Returns
    ///
    /// A new handle, or [`AtomicError::ReferenceOverflow`] if the
    /// reference count is saturated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicI32;
    ///
    /// let atomic = AtomicI32::new(7);
    /// let shared = atomic.share().unwrap();
    /// shared.store(8);
    /// assert_eq!(atomic.load(), 8);
    /// ```
    pub fn share(&self) -> Result<Self, AtomicError> {
        self.cell.add_reference()?;
        Ok(Self {
            cell: Arc::clone(&self.cell),
            table: self.table,
            _value: PhantomData,
        })
    }

    /// Loads the current value through the tier-selected strategy.
    #[inline]
    pub fn load(&self) -> V {
        V::from_lane(self.cell.load())
    }

    /// Stores a new value through the tier-selected strategy.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to store.
    #[inline]
    pub fn store(&self, value: V) {
        self.cell.store(value.into_lane());
    }

    /// Swaps in a new value, returning the old value.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to swap in.
    ///
    /// # Returns
    ///
    /// The old value.
    #[inline]
    pub fn swap(&self, value: V) -> V {
        V::from_lane(self.cell.swap(value.into_lane()))
    }

    /// Compares and sets the value atomically.
    ///
    /// A single hardware CAS at every tier. If the stored lane holds
    /// non-canonical high bits left by a wrapped hardware increment of a
    /// narrow type, the comparison is retried against the raw bits so a
    /// logically equal comparand still succeeds.
    ///
    /// # Parameters
    ///
    /// * `current` - The expected current value.
    /// * `new` - The new value to set if `current` matches.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `Err(actual)` where `actual` is the real
    /// current value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicI32;
    ///
    /// let atomic = AtomicI32::new(5);
    /// assert!(atomic.compare_set(5, 9).is_ok());
    /// assert_eq!(atomic.load(), 9);
    /// ```
    pub fn compare_set(&self, current: V, new: V) -> Result<(), V> {
        let mut expected = current.into_lane();
        let new_lane = new.into_lane();
        loop {
            match self.cell.compare_exchange(expected, new_lane) {
                Ok(_) => return Ok(()),
                Err(actual) => {
                    if actual != expected
                        && V::from_lane(actual) == V::from_lane(expected)
                    {
                        expected = actual;
                    } else {
                        return Err(V::from_lane(actual));
                    }
                }
            }
        }
    }

    /// Compares and exchanges the value atomically, returning the
    /// previous value.
    ///
    /// Convenient in CAS loops: if the returned value equals `current`,
    /// the exchange happened.
    ///
    /// # Parameters
    ///
    /// * `current` - The expected current value.
    /// * `new` - The new value to set if `current` matches.
    ///
    /// # Returns
    ///
    /// The value before the operation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicI32;
    ///
    /// let atomic = AtomicI32::new(5);
    /// assert_eq!(atomic.compare_exchange(5, 9), 5);
    /// assert_eq!(atomic.compare_exchange(999, 1), 9);
    /// assert_eq!(atomic.load(), 9);
    /// ```
    #[inline]
    pub fn compare_exchange(&self, current: V, new: V) -> V {
        match self.compare_set(current, new) {
            Ok(()) => current,
            Err(actual) => actual,
        }
    }

    /// Increments the value by one, returning the new value.
    ///
    /// For the integer families this is a single always-atomic hardware
    /// increment on the lane, independent of tier. For floating-point
    /// values it is a read-compute-write pair: the read and the write
    /// are each tier-appropriate, but the pair is not atomic as a unit,
    /// and a concurrent writer between them is a lost update. Callers
    /// that need an atomic float increment should use
    /// [`TypedAtomic::update`].
    ///
    /// # Returns
    ///
    /// The new value, or [`AtomicError::InvalidOperation`] for boolean
    /// atomics.
    pub fn increment(&self) -> Result<V, AtomicError> {
        match V::FAMILY {
            TypeFamily::Signed | TypeFamily::Unsigned => {
                let previous = self.cell.fetch_increment();
                Ok(V::from_lane(previous.wrapping_add(1)))
            }
            _ => self.apply(OpKind::Add, V::ONE_LANE),
        }
    }

    /// Decrements the value by one, returning the new value.
    ///
    /// Same contract as [`TypedAtomic::increment`]: hardware atomic for
    /// the integer families, a non-transactional read-compute-write pair
    /// for floating point.
    ///
    /// # Returns
    ///
    /// The new value, or [`AtomicError::InvalidOperation`] for boolean
    /// atomics.
    pub fn decrement(&self) -> Result<V, AtomicError> {
        match V::FAMILY {
            TypeFamily::Signed | TypeFamily::Unsigned => {
                let previous = self.cell.fetch_decrement();
                Ok(V::from_lane(previous.wrapping_sub(1)))
            }
            _ => self.apply(OpKind::Subtract, V::ONE_LANE),
        }
    }

    /// Applies a table operation: read, compute, write, return the new
    /// value. Not a single atomic transaction.
    fn apply(&self, kind: OpKind, operand: u64) -> Result<V, AtomicError> {
        let current = self.cell.load();
        let next = self.table.apply(kind, current, operand)?;
        self.cell.store(next);
        Ok(V::from_lane(next))
    }

    /// Adds a value, returning the new value.
    ///
    /// Integer addition wraps at the logical width; floating-point
    /// addition follows IEEE rules.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to add.
    ///
    /// # Returns
    ///
    /// The new value, or [`AtomicError::InvalidOperation`] for boolean
    /// atomics.
    #[inline]
    pub fn add(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Add, operand.into_lane())
    }

    /// Subtracts a value, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to subtract.
    #[inline]
    pub fn sub(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Subtract, operand.into_lane())
    }

    /// Multiplies by a factor, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The factor to multiply by.
    #[inline]
    pub fn mul(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Multiply, operand.into_lane())
    }

    /// Divides by a divisor, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The divisor.
    ///
    /// # Panics
    ///
    /// Panics on integer division by zero; floating-point division by
    /// zero yields an infinity or NaN per IEEE rules.
    #[inline]
    pub fn div(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Divide, operand.into_lane())
    }

    /// Computes the remainder, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The divisor.
    ///
    /// # Panics
    ///
    /// Panics on integer remainder by zero.
    #[inline]
    pub fn rem(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Modulus, operand.into_lane())
    }

    /// Bitwise (or logical, for booleans) AND, returning the new value.
    ///
    /// Operands are masked to the logical width, so bits above the
    /// declared width are never set.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to AND with.
    ///
    /// # Returns
    ///
    /// The new value, or [`AtomicError::InvalidOperation`] for
    /// floating-point atomics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicU16;
    ///
    /// let atomic = AtomicU16::new(0xFFF0);
    /// assert_eq!(atomic.and(0x0F0F).unwrap(), 0x0F00);
    /// ```
    #[inline]
    pub fn and(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::And, operand.into_lane())
    }

    /// Bitwise (or logical) OR, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to OR with.
    #[inline]
    pub fn or(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Or, operand.into_lane())
    }

    /// Bitwise (or logical) XOR, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to XOR with.
    #[inline]
    pub fn xor(&self, operand: V) -> Result<V, AtomicError> {
        self.apply(OpKind::Xor, operand.into_lane())
    }

    /// Bitwise (or logical) complement, returning the new value.
    ///
    /// The complement happens at the logical width: an 8-bit atomic
    /// holding `0b0000_1111` becomes `0b1111_0000`.
    ///
    /// # Returns
    ///
    /// The new value, or [`AtomicError::InvalidOperation`] for
    /// floating-point atomics.
    #[inline]
    pub fn not(&self) -> Result<V, AtomicError> {
        self.apply(OpKind::Not, 0)
    }

    /// Shifts left, returning the new value.
    ///
    /// The amount is reduced modulo the logical width.
    ///
    /// # Parameters
    ///
    /// * `amount` - The number of bit positions to shift.
    #[inline]
    pub fn shift_left(&self, amount: u32) -> Result<V, AtomicError> {
        self.apply(OpKind::LeftShift, amount as u64)
    }

    /// Shifts right, returning the new value.
    ///
    /// Arithmetic for signed atomics, logical for unsigned; the amount
    /// is reduced modulo the logical width.
    ///
    /// # Parameters
    ///
    /// * `amount` - The number of bit positions to shift.
    #[inline]
    pub fn shift_right(&self, amount: u32) -> Result<V, AtomicError> {
        self.apply(OpKind::RightShift, amount as u64)
    }

    /// Rotates left within the logical width, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `amount` - The number of bit positions to rotate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicU8;
    ///
    /// let atomic = AtomicU8::new(0b1000_0000);
    /// assert_eq!(atomic.rotate_left(1).unwrap(), 0b0000_0001);
    /// ```
    #[inline]
    pub fn rotate_left(&self, amount: u32) -> Result<V, AtomicError> {
        self.apply(OpKind::RotateLeft, amount as u64)
    }

    /// Rotates right within the logical width, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `amount` - The number of bit positions to rotate.
    #[inline]
    pub fn rotate_right(&self, amount: u32) -> Result<V, AtomicError> {
        self.apply(OpKind::RotateRight, amount as u64)
    }

    /// Sets the value to the minimum of the current and given values,
    /// returning the new value.
    ///
    /// Read-compute-write, like the table operations.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to compare with.
    pub fn min(&self, operand: V) -> V {
        let current = self.load();
        let next = if operand < current { operand } else { current };
        self.store(next);
        next
    }

    /// Sets the value to the maximum of the current and given values,
    /// returning the new value.
    ///
    /// # Parameters
    ///
    /// * `operand` - The value to compare with.
    pub fn max(&self, operand: V) -> V {
        let current = self.load();
        let next = if operand > current { operand } else { current };
        self.store(next);
        next
    }

    /// Updates the value with a function, returning the new value.
    ///
    /// Internally a CAS retry loop, so unlike the named operations the
    /// whole update is atomic: no concurrent write is lost.
    ///
    /// # Parameters
    ///
    /// * `f` - A function from the current value to the new value.
    ///
    /// # Returns
    ///
    /// The new value after the update.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicI32;
    ///
    /// let atomic = AtomicI32::new(10);
    /// assert_eq!(atomic.update(|x| x * 2), 20);
    /// ```
    pub fn update<F>(&self, f: F) -> V
    where
        F: Fn(V) -> V,
    {
        let mut current = self.load();
        loop {
            let new = f(current);
            match self.compare_set(current, new) {
                Ok(()) => return new,
                Err(actual) => current = actual,
            }
        }
    }

    /// Takes the cell's contention lock without blocking, if free or
    /// already held by this thread.
    ///
    /// An escape hatch for batching several operations under one
    /// critical section. The guard serializes only against other lock
    /// holders and against accesses running in the heavily shared tier;
    /// the lock is reentrant, so only other threads observe `None`.
    #[inline]
    pub fn try_lock(&self) -> Option<CellGuard<'_>> {
        self.cell.try_lock()
    }

    /// Takes the cell's contention lock, spinning briefly before
    /// blocking. No timeout: returns only once the lock is held.
    #[inline]
    pub fn lock(&self) -> CellGuard<'_> {
        self.cell.lock()
    }

    /// Returns the current access tier.
    #[inline]
    pub fn tier(&self) -> AccessTier {
        self.cell.tier()
    }

    /// Returns the current reference count of the backing cell.
    #[inline]
    pub fn reference_count(&self) -> u32 {
        self.cell.reference_count()
    }

    /// Gets a reference to the underlying cell for advanced use cases
    /// that operate on raw lane bits.
    #[inline]
    pub fn inner(&self) -> &AtomicCell {
        &self.cell
    }
}

impl<V: AtomicFloat> TypedAtomic<V> {
    /// Read-compute-write of a unary float function.
    fn map_value<F>(&self, f: F) -> V
    where
        F: Fn(V) -> V,
    {
        let next = f(self.load());
        self.store(next);
        next
    }

    /// Replaces the value with its absolute value, returning it.
    #[inline]
    pub fn abs(&self) -> V {
        self.map_value(V::abs)
    }

    /// Replaces the value with its square root, returning it.
    #[inline]
    pub fn sqrt(&self) -> V {
        self.map_value(V::sqrt)
    }

    /// Raises the value to a power, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `exp` - The exponent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_atomic_engine::AtomicF64;
    ///
    /// let atomic = AtomicF64::new(2.0);
    /// assert_eq!(atomic.pow(10.0), 1024.0);
    /// ```
    #[inline]
    pub fn pow(&self, exp: V) -> V {
        self.map_value(|x| x.pow(exp))
    }

    /// Replaces the value with its natural logarithm, returning it.
    #[inline]
    pub fn log(&self) -> V {
        self.map_value(V::log)
    }

    /// Replaces the value with its exponential, returning it.
    #[inline]
    pub fn exp(&self) -> V {
        self.map_value(V::exp)
    }

    /// Replaces the value with its floor, returning it.
    #[inline]
    pub fn floor(&self) -> V {
        self.map_value(V::floor)
    }

    /// Replaces the value with its ceiling, returning it.
    #[inline]
    pub fn ceil(&self) -> V {
        self.map_value(V::ceil)
    }

    /// Rounds the value to the nearest integer, returning it.
    #[inline]
    pub fn round(&self) -> V {
        self.map_value(V::round)
    }

    /// Negates the value, returning it.
    #[inline]
    pub fn negate(&self) -> V {
        self.map_value(V::negate)
    }
}

impl<V: AtomicValue> Drop for TypedAtomic<V> {
    /// Removes this handle's reference; when it is the last one, the
    /// `Arc` drop that follows releases the backing memory.
    fn drop(&mut self) {
        self.cell.remove_reference();
    }
}

impl<V: AtomicValue> PartialEq for TypedAtomic<V> {
    /// Compares current logical values; floating point by magnitude.
    fn eq(&self, other: &Self) -> bool {
        V::eq_values(self.load(), other.load())
    }
}

impl<V: AtomicValue + Default> Default for TypedAtomic<V> {
    #[inline]
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: AtomicValue> From<V> for TypedAtomic<V> {
    #[inline]
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: AtomicValue + fmt::Debug> fmt::Debug for TypedAtomic<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedAtomic")
            .field("value", &self.load())
            .field("references", &self.reference_count())
            .finish()
    }
}

impl<V: AtomicValue + fmt::Display> fmt::Display for TypedAtomic<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.load())
    }
}

/// Atomic boolean.
pub type AtomicBool = TypedAtomic<bool>;
/// Atomic 8-bit signed integer.
pub type AtomicI8 = TypedAtomic<i8>;
/// Atomic 8-bit unsigned integer.
pub type AtomicU8 = TypedAtomic<u8>;
/// Atomic 16-bit signed integer.
pub type AtomicI16 = TypedAtomic<i16>;
/// Atomic 16-bit unsigned integer.
pub type AtomicU16 = TypedAtomic<u16>;
/// Atomic 32-bit signed integer.
pub type AtomicI32 = TypedAtomic<i32>;
/// Atomic 32-bit unsigned integer.
pub type AtomicU32 = TypedAtomic<u32>;
/// Atomic 64-bit signed integer.
pub type AtomicI64 = TypedAtomic<i64>;
/// Atomic 64-bit unsigned integer.
pub type AtomicU64 = TypedAtomic<u64>;
/// Atomic 32-bit floating point number.
pub type AtomicF32 = TypedAtomic<f32>;
/// Atomic 64-bit floating point number.
pub type AtomicF64 = TypedAtomic<f64>;

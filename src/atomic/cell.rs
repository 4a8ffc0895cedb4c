/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Cell Core
//!
//! The storage and concurrency engine behind every typed atomic. A cell
//! owns one 16-byte-aligned 64-bit block, a live reference count and a
//! contention lock, and selects its access strategy from the reference
//! count at each call:
//!
//! | References | Strategy |
//! |---|---|
//! | `1` | Plain acquire/release load and store |
//! | `2..=4` | Hardware atomic load and exchange |
//! | `>= 5` | Bounded spin on the lock, then blocking acquisition |
//!
//! The cost model behind the escalation: lock-free retries scale poorly
//! past a handful of contending threads, while checking the reference
//! count is cheap relative to contention. Compare-and-swap stays a single
//! hardware instruction at every tier, as do the reference count updates
//! that drive the tier decision.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::{
    AtomicU32,
    AtomicU64,
    Ordering,
};

use crossbeam_utils::Backoff;
use crossbeam_utils::CachePadded;
use parking_lot::ReentrantMutex;
use parking_lot::ReentrantMutexGuard;

use crate::atomic::error::AtomicError;

/// Largest reference count served by the lock-free tier.
const LOCK_FREE_MAX_REFERENCES: u32 = 4;

/// The access strategy a cell selects from its current reference count.
///
/// The tier changes as holders come and go; it affects only the
/// performance path, never the observable value of the cell.
///
/// # Author
///
/// Haixing Hu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// Sole owner: ordered load/store without further synchronization.
    Exclusive,
    /// Light sharing (2 to 4 holders): lock-free hardware primitives.
    LockFree,
    /// Heavy sharing (5 or more holders): spin briefly, then block on
    /// the contention lock.
    Locked,
}

/// The aligned 64-bit storage block of a cell.
///
/// The block holds raw lane bits; the signed and unsigned
/// interpretations are the same bits viewed two ways, and the logical
/// type of the owning wrapper decides which view is authoritative.
#[repr(C, align(16))]
struct CellBlock {
    bits: AtomicU64,
}

/// The unit of storage of the atomic engine.
///
/// A cell operates purely on lane bits; encoding and decoding logical
/// values is the typed wrapper's job. Cells are shared through `Arc`, and
/// the reference count mirrors the number of live wrapper handles so the
/// tier decision tracks actual sharing.
///
/// # Author
///
/// Haixing Hu
pub struct AtomicCell {
    block: CachePadded<CellBlock>,
    references: AtomicU32,
    lock: ReentrantMutex<()>,
}

/// RAII guard for a manually locked cell.
///
/// Lets a holder batch several operations under one critical section.
/// The guard excludes other manual lockers and any access running in the
/// [`AccessTier::Locked`] tier; accesses in the lower tiers do not take
/// the lock and are not serialized by it. The lock is reentrant, so the
/// holding thread can keep operating on the cell while the guard lives.
///
/// # Author
///
/// Haixing Hu
pub struct CellGuard<'a> {
    _guard: ReentrantMutexGuard<'a, ()>,
}

impl AtomicCell {
    /// Creates a cell holding the given lane bits, with one reference.
    #[inline]
    pub fn new(bits: u64) -> Self {
        Self {
            block: CachePadded::new(CellBlock {
                bits: AtomicU64::new(bits),
            }),
            references: AtomicU32::new(1),
            lock: ReentrantMutex::new(()),
        }
    }

    /// Derives the access tier from the current reference count.
    ///
    /// The count is read with `Relaxed` ordering: it is advisory input
    /// to a performance decision, and every tier produces the same
    /// observable results.
    #[inline]
    pub fn tier(&self) -> AccessTier {
        match self.references.load(Ordering::Relaxed) {
            0 | 1 => AccessTier::Exclusive,
            2..=LOCK_FREE_MAX_REFERENCES => AccessTier::LockFree,
            _ => AccessTier::Locked,
        }
    }

    /// Reads the current lane bits through the tier-selected strategy.
    #[inline]
    pub fn load(&self) -> u64 {
        match self.tier() {
            AccessTier::Exclusive => self.block.bits.load(Ordering::Acquire),
            AccessTier::LockFree => self.block.bits.load(Ordering::SeqCst),
            AccessTier::Locked => {
                let _guard = self.acquire_contended();
                self.block.bits.load(Ordering::Acquire)
            }
        }
    }

    /// Writes new lane bits through the tier-selected strategy.
    #[inline]
    pub fn store(&self, bits: u64) {
        match self.tier() {
            AccessTier::Exclusive => {
                self.block.bits.store(bits, Ordering::Release);
            }
            AccessTier::LockFree => {
                // Hardware exchange; the previous value is discarded.
                self.block.bits.swap(bits, Ordering::SeqCst);
            }
            AccessTier::Locked => {
                let _guard = self.acquire_contended();
                self.block.bits.store(bits, Ordering::Release);
            }
        }
    }

    /// Swaps in new lane bits, returning the previous bits.
    #[inline]
    pub fn swap(&self, bits: u64) -> u64 {
        match self.tier() {
            AccessTier::Exclusive => {
                let previous = self.block.bits.load(Ordering::Acquire);
                self.block.bits.store(bits, Ordering::Release);
                previous
            }
            AccessTier::LockFree => self.block.bits.swap(bits, Ordering::SeqCst),
            AccessTier::Locked => {
                let _guard = self.acquire_contended();
                let previous = self.block.bits.load(Ordering::Acquire);
                self.block.bits.store(bits, Ordering::Release);
                previous
            }
        }
    }

    /// Compares and exchanges the lane bits.
    ///
    /// A single hardware CAS at every tier: unlike plain reads and
    /// writes, CAS remains efficient under higher contention, so it
    /// never escalates to the lock.
    ///
    /// # Parameters
    ///
    /// * `current` - The expected current bits.
    /// * `new` - The bits to store if `current` matches.
    ///
    /// # Returns
    ///
    /// `Ok(previous)` on success, `Err(actual)` on mismatch.
    #[inline]
    pub fn compare_exchange(&self, current: u64, new: u64) -> Result<u64, u64> {
        self.block
            .bits
            .compare_exchange(current, new, Ordering::SeqCst, Ordering::SeqCst)
    }

    /// Atomically adds one to the lane bits, returning the previous bits.
    ///
    /// A single always-atomic hardware instruction, independent of tier.
    /// For narrow logical types a wrap can leave bits above the logical
    /// width in the lane; decoding masks them off.
    #[inline]
    pub fn fetch_increment(&self) -> u64 {
        self.block.bits.fetch_add(1, Ordering::SeqCst)
    }

    /// Atomically subtracts one from the lane bits, returning the
    /// previous bits.
    #[inline]
    pub fn fetch_decrement(&self) -> u64 {
        self.block.bits.fetch_sub(1, Ordering::SeqCst)
    }

    /// Returns the current reference count.
    #[inline]
    pub fn reference_count(&self) -> u32 {
        self.references.load(Ordering::Acquire)
    }

    /// Adds one reference.
    ///
    /// The count is updated with a lock-free CAS loop at every tier: it
    /// is both data and the control signal for the tier decision, so its
    /// access strategy never escalates.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or [`AtomicError::ReferenceOverflow`] if the count is
    /// already at its representable maximum.
    pub fn add_reference(&self) -> Result<(), AtomicError> {
        let mut current = self.references.load(Ordering::Relaxed);
        loop {
            if current == u32::MAX {
                return Err(AtomicError::ReferenceOverflow);
            }
            match self.references.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    /// Removes one reference.
    ///
    /// Decrementing past zero is a contract violation, checked by a
    /// debug assertion.
    ///
    /// # Returns
    ///
    /// `true` exactly when this call dropped the count to zero, i.e.
    /// the caller held the last reference and the backing memory is
    /// about to be released.
    pub fn remove_reference(&self) -> bool {
        let previous = self.references.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "reference count underflow");
        previous == 1
    }

    /// Attempts to take the contention lock without blocking.
    ///
    /// The lock is reentrant: the thread already holding it re-acquires
    /// successfully, so `None` is only observed from other threads.
    ///
    /// # Returns
    ///
    /// A guard if the lock was free or already held by this thread,
    /// `None` if another thread holds it.
    #[inline]
    pub fn try_lock(&self) -> Option<CellGuard<'_>> {
        self.lock.try_lock().map(|guard| CellGuard { _guard: guard })
    }

    /// Takes the contention lock, spinning briefly before blocking.
    ///
    /// There is no timeout: the call returns only once the lock is held.
    #[inline]
    pub fn lock(&self) -> CellGuard<'_> {
        CellGuard {
            _guard: self.acquire_contended(),
        }
    }

    /// Spin-then-block lock acquisition for the contended tier.
    ///
    /// Tries the fast path under a bounded backoff first; many brief
    /// critical sections resolve within the spin window without a
    /// scheduler round trip. Falls back to a blocking acquisition once
    /// the backoff is exhausted.
    fn acquire_contended(&self) -> ReentrantMutexGuard<'_, ()> {
        let backoff = Backoff::new();
        loop {
            if let Some(guard) = self.lock.try_lock() {
                return guard;
            }
            if backoff.is_completed() {
                return self.lock.lock();
            }
            backoff.spin();
        }
    }
}

impl std::fmt::Debug for AtomicCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicCell")
            .field("bits", &self.block.bits.load(Ordering::Relaxed))
            .field("references", &self.reference_count())
            .field("tier", &self.tier())
            .finish()
    }
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Single-Slot Signal
//!
//! A "latest value" handoff box for one producer and one consumer: the
//! producer publishes a value and raises the signaled flag, the consumer
//! polls or waits for the flag and takes the value. The flag is an
//! atomic boolean cell whose reference count stays at one for this
//! single-producer/single-consumer usage, so it runs in the exclusive
//! tier.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::Arc;

use crossbeam_utils::Backoff;
use parking_lot::Mutex;

use crate::atomic::typed::AtomicBool;

/// A single-slot "latest value" handoff primitive.
///
/// Holds at most one value. Publishing overwrites any previous value;
/// there is no queueing. Values travel as `Arc<T>` so the producer and
/// the consumer can both observe the published value without cloning
/// `T`.
///
/// The waiting path is a blocking poll with backoff: it spins briefly,
/// then yields between polls. There is no timeout and no cancellation;
/// a producer that never signals stalls the waiter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use prism3_atomic_engine::Signal;
///
/// let signal = Arc::new(Signal::new());
/// let consumer = signal.clone();
///
/// let handle = thread::spawn(move || *consumer.wait_signaled());
/// signal.set_signaled(Arc::new(42u32));
/// assert_eq!(handle.join().unwrap(), 42);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct Signal<T> {
    signaled: AtomicBool,
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Signal<T> {
    /// Creates a non-signaled, empty signal.
    #[inline]
    pub fn new() -> Self {
        Self {
            signaled: AtomicBool::new(false),
            slot: Mutex::new(None),
        }
    }

    /// Publishes a value and raises the signaled flag.
    ///
    /// The value is stored before the flag is raised, so a consumer that
    /// observes the flag always finds the value.
    ///
    /// # Parameters
    ///
    /// * `value` - The value to publish.
    pub fn set_signaled(&self, value: Arc<T>) {
        *self.slot.lock() = Some(value);
        self.signaled.store(true);
    }

    /// Clears the signaled flag and drops any published value.
    pub fn set_non_signaled(&self) {
        self.signaled.store(false);
        *self.slot.lock() = None;
    }

    /// Returns whether the signal is raised.
    #[inline]
    pub fn is_signaled(&self) -> bool {
        self.signaled.load()
    }

    /// Returns whether the signal is cleared.
    #[inline]
    pub fn is_non_signaled(&self) -> bool {
        !self.signaled.load()
    }

    /// Returns the currently published value, if any.
    #[inline]
    pub fn value(&self) -> Option<Arc<T>> {
        self.slot.lock().clone()
    }

    /// Blocks until the signal is raised, returning the published value.
    ///
    /// Spins briefly, then yields between polls. No timeout: the call
    /// returns only once a producer has signaled.
    pub fn wait_signaled(&self) -> Arc<T> {
        let backoff = Backoff::new();
        loop {
            if self.signaled.load() {
                // The producer stores the value before raising the
                // flag, but set_non_signaled can race in between; only
                // return once both line up.
                if let Some(value) = self.value() {
                    return value;
                }
            }
            backoff.snooze();
        }
    }
}

impl<T> Default for Signal<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("signaled", &self.is_signaled())
            .finish()
    }
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_atomic_engine::{
    AccessTier,
    AtomicCell,
};

#[test]
fn test_new_starts_exclusive() {
    let cell = AtomicCell::new(5);
    assert_eq!(cell.reference_count(), 1);
    assert_eq!(cell.tier(), AccessTier::Exclusive);
    assert_eq!(cell.load(), 5);
}

// The tier follows the live reference count: 1 exclusive, 2..=4
// lock-free, 5 and up locked.
#[test]
fn test_tier_escalation_and_return() {
    let cell = AtomicCell::new(0);
    assert_eq!(cell.tier(), AccessTier::Exclusive);

    cell.add_reference().unwrap();
    assert_eq!(cell.tier(), AccessTier::LockFree);
    cell.add_reference().unwrap();
    cell.add_reference().unwrap();
    assert_eq!(cell.reference_count(), 4);
    assert_eq!(cell.tier(), AccessTier::LockFree);

    cell.add_reference().unwrap();
    assert_eq!(cell.tier(), AccessTier::Locked);

    // Holders leaving de-escalates the tier again.
    assert!(!cell.remove_reference());
    assert_eq!(cell.tier(), AccessTier::LockFree);
    assert!(!cell.remove_reference());
    assert!(!cell.remove_reference());
    assert!(!cell.remove_reference());
    assert_eq!(cell.tier(), AccessTier::Exclusive);
}

#[test]
fn test_load_store_every_tier() {
    let cell = AtomicCell::new(0);
    for tier in [
        AccessTier::Exclusive,
        AccessTier::LockFree,
        AccessTier::Locked,
    ] {
        while cell.tier() != tier {
            cell.add_reference().unwrap();
        }
        cell.store(0xDEAD_BEEF);
        assert_eq!(cell.load(), 0xDEAD_BEEF, "{tier:?}");
        cell.store(7);
        assert_eq!(cell.load(), 7, "{tier:?}");
    }
}

#[test]
fn test_swap_every_tier() {
    let cell = AtomicCell::new(1);
    assert_eq!(cell.swap(2), 1);
    cell.add_reference().unwrap();
    assert_eq!(cell.swap(3), 2);
    for _ in 0..3 {
        cell.add_reference().unwrap();
    }
    assert_eq!(cell.tier(), AccessTier::Locked);
    assert_eq!(cell.swap(4), 3);
    assert_eq!(cell.load(), 4);
}

#[test]
fn test_compare_exchange_success() {
    let cell = AtomicCell::new(5);
    assert_eq!(cell.compare_exchange(5, 9), Ok(5));
    assert_eq!(cell.load(), 9);
}

#[test]
fn test_compare_exchange_failure() {
    let cell = AtomicCell::new(5);
    assert_eq!(cell.compare_exchange(999, 9), Err(5));
    assert_eq!(cell.load(), 5);
}

#[test]
fn test_fetch_increment_decrement() {
    let cell = AtomicCell::new(10);
    assert_eq!(cell.fetch_increment(), 10);
    assert_eq!(cell.load(), 11);
    assert_eq!(cell.fetch_decrement(), 11);
    assert_eq!(cell.load(), 10);
}

// One release event fires per matching add/remove pair plus the initial
// implicit reference: two added references release on the third remove.
#[test]
fn test_reference_lifecycle() {
    let cell = AtomicCell::new(0);
    cell.add_reference().unwrap();
    cell.add_reference().unwrap();
    assert_eq!(cell.reference_count(), 3);

    assert!(!cell.remove_reference());
    assert!(!cell.remove_reference());
    assert!(cell.remove_reference());
    assert_eq!(cell.reference_count(), 0);
}

// The lock excludes other threads but not the holding thread: while a
// guard lives, try_lock fails elsewhere yet re-acquires here.
#[test]
fn test_try_lock_excludes_other_threads() {
    let cell = AtomicCell::new(0);
    let guard = cell.try_lock().unwrap();
    assert!(cell.try_lock().is_some());
    std::thread::scope(|scope| {
        scope
            .spawn(|| assert!(cell.try_lock().is_none()))
            .join()
            .unwrap();
    });
    drop(guard);
    std::thread::scope(|scope| {
        scope
            .spawn(|| assert!(cell.try_lock().is_some()))
            .join()
            .unwrap();
    });
}

#[test]
fn test_lock_batches_operations() {
    let cell = AtomicCell::new(1);
    {
        let _guard = cell.lock();
        // Tier-independent operations still work under the guard.
        assert_eq!(cell.compare_exchange(1, 2), Ok(1));
        assert_eq!(cell.fetch_increment(), 2);
    }
    assert_eq!(cell.load(), 3);
}

// The lock is reentrant: a holder batching operations under the guard
// can still run tier-selected accesses even while heavily shared.
#[test]
fn test_lock_is_reentrant_under_locked_tier() {
    let cell = AtomicCell::new(1);
    for _ in 0..5 {
        cell.add_reference().unwrap();
    }
    assert_eq!(cell.tier(), AccessTier::Locked);
    let _guard = cell.lock();
    cell.store(2);
    assert_eq!(cell.load(), 2);
}

/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use prism3_atomic_engine::Signal;

#[test]
fn test_starts_non_signaled() {
    let signal: Signal<i32> = Signal::new();
    assert!(signal.is_non_signaled());
    assert!(!signal.is_signaled());
    assert!(signal.value().is_none());
}

#[test]
fn test_set_and_clear() {
    let signal = Signal::new();
    signal.set_signaled(Arc::new(42));
    assert!(signal.is_signaled());
    assert_eq!(*signal.value().unwrap(), 42);

    signal.set_non_signaled();
    assert!(signal.is_non_signaled());
    assert!(signal.value().is_none());
}

#[test]
fn test_set_replaces_value() {
    let signal = Signal::new();
    signal.set_signaled(Arc::new(String::from("first")));
    signal.set_signaled(Arc::new(String::from("second")));
    assert_eq!(*signal.value().unwrap(), "second");
}

#[test]
fn test_wait_signaled_across_threads() {
    let signal: Arc<Signal<i32>> = Arc::new(Signal::new());
    let producer = {
        let signal = Arc::clone(&signal);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            signal.set_signaled(Arc::new(7));
        })
    };
    let value = signal.wait_signaled();
    assert_eq!(*value, 7);
    producer.join().unwrap();
}

#[test]
fn test_wait_signaled_multiple_consumers() {
    let signal: Arc<Signal<String>> = Arc::new(Signal::new());
    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let signal = Arc::clone(&signal);
            thread::spawn(move || signal.wait_signaled())
        })
        .collect();
    thread::sleep(Duration::from_millis(20));
    signal.set_signaled(Arc::new(String::from("ready")));
    for consumer in consumers {
        assert_eq!(*consumer.join().unwrap(), "ready");
    }
}

#[test]
fn test_default() {
    let signal: Signal<u8> = Signal::default();
    assert!(signal.is_non_signaled());
}

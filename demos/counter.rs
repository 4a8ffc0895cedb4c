/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Tiered Atomic Counter Example
//!
//! Demonstrates counting through the tiered atomic engine: exclusive,
//! lock-free and locked access depending on how many handles exist.

use std::thread;

use prism3_atomic_engine::AtomicI32;

fn main() {
    println!("=== Tiered Atomic Counter Example ===\n");

    // Example 1: Basic counter operations
    println!("1. Basic Counter Operations:");
    let counter = AtomicI32::new(0);
    println!("   Initial value: {}", counter.load());
    println!("   Access tier: {:?}", counter.tier());

    counter.increment().unwrap();
    println!("   After increment: {}", counter.load());

    counter.add(5).unwrap();
    println!("   After adding 5: {}", counter.load());

    counter.decrement().unwrap();
    println!("   After decrement: {}", counter.load());

    // Example 2: Multi-threaded counter through shared handles
    println!("\n2. Multi-threaded Counter:");
    let counter = AtomicI32::new(0);
    let num_threads = 10;
    let increments_per_thread = 1000;

    let mut handles = vec![];
    for i in 0..num_threads {
        let shared = counter.share().unwrap();
        let handle = thread::spawn(move || {
            for _ in 0..increments_per_thread {
                shared.increment().unwrap();
            }
            println!("   Thread {} completed", i);
        });
        handles.push(handle);
    }

    println!("   Access tier while shared: {:?}", counter.tier());

    for handle in handles {
        handle.join().unwrap();
    }

    println!(
        "   Final count: {} (expected: {})",
        counter.load(),
        num_threads * increments_per_thread
    );
    println!("   Access tier after joins: {:?}", counter.tier());

    // Example 3: Compare-and-swap driven state machine
    println!("\n3. Compare-and-Swap:");
    let state = AtomicI32::new(0);
    match state.compare_set(0, 1) {
        Ok(()) => println!("   Transitioned 0 -> 1"),
        Err(actual) => println!("   Transition lost, saw {}", actual),
    }
    match state.compare_set(0, 2) {
        Ok(()) => println!("   Transitioned 0 -> 2"),
        Err(actual) => println!("   Transition lost, saw {}", actual),
    }
    println!("   Final state: {}", state.load());

    println!("\n=== Example Complete ===");
}

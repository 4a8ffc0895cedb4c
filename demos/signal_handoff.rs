/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Signal Handoff Example
//!
//! Demonstrates handing a value from a producer thread to consumers
//! through a single-slot [`Signal`].

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use prism3_atomic_engine::Signal;

fn main() {
    println!("=== Signal Handoff Example ===\n");

    // Example 1: Simple set and read
    println!("1. Set and Read:");
    let signal = Signal::new();
    println!("   Signaled: {}", signal.is_signaled());
    signal.set_signaled(Arc::new(String::from("hello")));
    println!("   Signaled: {}", signal.is_signaled());
    println!("   Value: {:?}", signal.value().map(|v| v.to_string()));
    signal.set_non_signaled();
    println!("   After clear: {}", signal.is_signaled());

    // Example 2: Producer hands a result to waiting consumers
    println!("\n2. Producer / Consumer Handoff:");
    let signal: Arc<Signal<i64>> = Arc::new(Signal::new());

    let mut consumers = vec![];
    for i in 0..3 {
        let signal = Arc::clone(&signal);
        consumers.push(thread::spawn(move || {
            let value = signal.wait_signaled();
            println!("   Consumer {} received {}", i, value);
        }));
    }

    let producer = {
        let signal = Arc::clone(&signal);
        thread::spawn(move || {
            // Pretend the result takes a while to compute.
            thread::sleep(Duration::from_millis(100));
            let result: i64 = (1..=100).sum();
            println!("   Producer publishing {}", result);
            signal.set_signaled(Arc::new(result));
        })
    };

    producer.join().unwrap();
    for consumer in consumers {
        consumer.join().unwrap();
    }

    println!("\n=== Example Complete ===");
}

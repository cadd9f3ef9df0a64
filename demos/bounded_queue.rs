//! Bounded queue example
//!
//! Demonstrates queue capacity limits and the two submit policies.
//!
//! Run with: cargo run --example bounded_queue

use jobpool::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== jobpool - Bounded Queue Example ===\n");

    // A small queue with the reject policy surfaces QueueFull under load
    let config = PoolConfig::new(2)
        .with_queue_capacity(5)
        .with_thread_name_prefix("bounded-worker")
        .reject_when_full();

    let pool = ThreadPool::new(config)?;

    println!("1. Configuration:");
    println!("   Worker threads: {}", pool.workers());
    println!("   Maximum queue size: 5, policy: reject when full");

    println!("\n2. Submitting slow jobs faster than they drain:");

    let accepted = Arc::new(AtomicUsize::new(0));
    let rejected = Arc::new(AtomicUsize::new(0));

    for i in 0..20 {
        let result = pool.execute(|| {
            thread::sleep(Duration::from_millis(100));
            Ok(())
        });

        match result {
            Ok(()) => {
                accepted.fetch_add(1, Ordering::Relaxed);
                println!("  Job {} accepted", i);
            }
            Err(PoolError::QueueFull { current, capacity }) => {
                rejected.fetch_add(1, Ordering::Relaxed);
                println!("  Job {} rejected ({}/{} queued)", i, current, capacity);
            }
            Err(e) => println!("  Job {} error: {}", i, e),
        }
    }

    println!(
        "\n3. Accepted {} jobs, rejected {}",
        accepted.load(Ordering::Relaxed),
        rejected.load(Ordering::Relaxed)
    );

    pool.join()?;
    println!("\n4. Pool joined; {} jobs ran", pool.total_jobs_processed());

    // The default Block policy never rejects; submitters wait instead
    println!("\n5. Same load with the default blocking policy:");
    let blocking_pool = ThreadPool::new(PoolConfig::new(2).with_queue_capacity(5))?;
    for _ in 0..20 {
        blocking_pool.execute(|| {
            thread::sleep(Duration::from_millis(10));
            Ok(())
        })?;
    }
    blocking_pool.join()?;
    println!(
        "   All {} jobs ran, none rejected",
        blocking_pool.total_jobs_processed()
    );

    Ok(())
}

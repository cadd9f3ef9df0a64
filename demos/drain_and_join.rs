//! Drain-and-join example
//!
//! A large batch of short-lived jobs on a wide pool: submit everything,
//! then join once and observe that every job ran before join returned.
//!
//! Run with: cargo run --example drain_and_join

use jobpool::prelude::*;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::init();

    println!("=== jobpool - Drain and Join Example ===\n");

    const JOBS: usize = 1000;

    let config = PoolConfig::new(64).with_thread_name_prefix("drain-worker");
    let pool = ThreadPool::new(config)?;

    println!("1. Pool with {} workers, submitting {} jobs", pool.workers(), JOBS);

    let completed = Arc::new(AtomicUsize::new(0));
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    for _ in 0..JOBS {
        let millis: u64 = rng.gen_range(1..=5);
        let completed = Arc::clone(&completed);
        pool.execute(move || {
            thread::sleep(Duration::from_millis(millis));
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })?;
    }

    println!("2. Joining (drains the queue, then stops the workers)...");
    pool.join()?;
    let elapsed = start.elapsed();

    println!("\n3. Results:");
    println!("   Completed: {}/{}", completed.load(Ordering::Relaxed), JOBS);
    println!("   Processed per stats: {}", pool.total_jobs_processed());
    println!("   Wall clock: {:?}", elapsed);

    assert_eq!(completed.load(Ordering::Relaxed), JOBS);

    Ok(())
}

//! Basic thread pool usage example
//!
//! Demonstrates pool creation, job submission, statistics, and join.
//!
//! Run with: cargo run --example basic_usage

use jobpool::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== jobpool - Basic Usage Example ===\n");

    // Create a thread pool with 4 worker threads
    let pool = ThreadPool::with_workers(4)?;
    println!("1. Created thread pool with {} workers", pool.workers());

    println!("\n2. Submitting simple jobs:");

    // Submit some simple jobs using closures
    for i in 0..10 {
        pool.execute(move || {
            println!(
                "  Job {} executing on {}",
                i,
                thread::current().name().unwrap_or("unnamed")
            );
            thread::sleep(Duration::from_millis(50));
            Ok(())
        })?;
    }

    println!("   Submitted 10 jobs, {} pending", pool.pending_jobs());

    // Submit a custom job type
    struct GreetJob {
        who: String,
    }

    impl Job for GreetJob {
        fn execute(&mut self) -> Result<()> {
            println!("  Hello, {}!", self.who);
            Ok(())
        }

        fn name(&self) -> &str {
            "GreetJob"
        }
    }

    println!("\n3. Submitting a custom job type:");
    pool.submit(GreetJob {
        who: "world".to_string(),
    })?;

    // Drain everything and stop the workers
    println!("\n4. Joining the pool...");
    pool.join()?;

    println!("\n5. Final statistics:");
    println!("   Jobs submitted: {}", pool.jobs_submitted());
    println!("   Jobs processed: {}", pool.total_jobs_processed());
    for (i, stat) in pool.stats().iter().enumerate() {
        println!(
            "   Worker {}: {} processed, {} failed, {} panicked",
            i,
            stat.get_jobs_processed(),
            stat.get_jobs_failed(),
            stat.get_jobs_panicked()
        );
    }

    // Submissions after join are rejected
    match pool.execute(|| Ok(())) {
        Err(PoolError::PoolClosed { .. }) => {
            println!("\n6. Submission after join correctly rejected");
        }
        _ => println!("\n6. Submission after join was not rejected"),
    }

    Ok(())
}

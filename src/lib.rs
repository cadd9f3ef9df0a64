//! # jobpool
//!
//! A worker-pool job execution engine: a fixed set of worker threads pulls
//! opaque units of work from a shared FIFO queue and executes them until an
//! explicit shutdown request drains and joins all workers.
//!
//! ## Features
//!
//! - **Thread Pool**: Worker pool with configurable thread count, created
//!   atomically (all workers spawn or construction fails cleanly)
//! - **Job Queue**: Bounded and unbounded FIFO queues using crossbeam channels
//! - **Drain-and-Join Shutdown**: `join` closes the queue, executes every
//!   queued job exactly once, and waits for all workers to exit
//! - **Fault Containment**: A failing or panicking job never kills its worker
//!   and never affects other jobs
//! - **Worker Statistics**: Per-worker processed/failed/panicked counters
//!
//! ## Quick Start
//!
//! ```rust
//! use jobpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create a pool with 4 worker threads
//! let pool = ThreadPool::with_workers(4)?;
//!
//! // Submit jobs
//! for i in 0..10 {
//!     pool.execute(move || {
//!         println!("Job {} executing", i);
//!         Ok(())
//!     })?;
//! }
//!
//! // Drain all queued jobs and stop the workers
//! pool.join()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pool Configuration
//!
//! ```rust
//! use jobpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = PoolConfig::new(8)
//!     .with_queue_capacity(1000)
//!     .with_thread_name_prefix("my-worker");
//!
//! let pool = ThreadPool::new(config)?;
//! # pool.join()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Jobs
//!
//! ```rust
//! use jobpool::prelude::*;
//!
//! struct MyJob {
//!     data: String,
//! }
//!
//! impl Job for MyJob {
//!     fn execute(&mut self) -> Result<()> {
//!         println!("Processing: {}", self.data);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyJob"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! # let pool = ThreadPool::with_workers(2)?;
//! pool.submit(MyJob {
//!     data: "test".to_string(),
//! })?;
//! # pool.join()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle
//!
//! A pool moves through `Running -> Joining -> Joined` exactly once. While
//! `Running` it accepts submissions from any number of threads; once
//! [`ThreadPool::join`] begins, further submissions fail with
//! [`PoolError::PoolClosed`] and are never executed. Dropping the pool joins
//! it first if the caller did not, so worker threads never outlive the
//! handle.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;

pub use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result};
pub use pool::{FailureHandler, PoolConfig, PoolState, SubmitPolicy, ThreadPool, WorkerStats};

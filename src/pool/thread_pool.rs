//! Thread pool implementation

use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result};
use crate::pool::worker::{FailureHandler, Worker, WorkerStats};
use crate::queue::{BoundedQueue, ChannelQueue, JobQueue, QueueError};
use log::error;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

/// Policy for submissions against a full bounded queue.
///
/// Only meaningful when the pool is configured with a queue capacity;
/// an unbounded queue never fills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Block the submitting thread until space frees (default)
    #[default]
    Block,
    /// Fail immediately with `QueueFull`
    Reject,
}

/// Configuration for a thread pool
#[derive(Clone)]
pub struct PoolConfig {
    /// Number of worker threads. Must be at least 1; validated at pool
    /// construction, not here.
    pub workers: usize,
    /// Maximum queue size (None = unbounded)
    pub queue_capacity: Option<usize>,
    /// Behavior when a bounded queue is full.
    pub submit_policy: SubmitPolicy,
    /// Thread name prefix
    pub thread_name_prefix: String,
    /// Out-of-band channel for job faults (if None, faults are logged)
    failure_handler: Option<Arc<dyn FailureHandler>>,
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("workers", &self.workers)
            .field("queue_capacity", &self.queue_capacity)
            .field("submit_policy", &self.submit_policy)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field(
                "failure_handler",
                &self.failure_handler.as_ref().map(|_| "<handler>"),
            )
            .finish()
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            queue_capacity: None,
            submit_policy: SubmitPolicy::default(),
            thread_name_prefix: "worker".to_string(),
            failure_handler: None,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with the specified number of workers
    ///
    /// The value is kept as given; a zero worker count is representable
    /// here and rejected by [`validate`](Self::validate) at construction.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Set the maximum queue size
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Set the thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the out-of-band failure handler for job faults
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_failure_handler(mut self, handler: Arc<dyn FailureHandler>) -> Self {
        self.failure_handler = Some(handler);
        self
    }

    /// Configure the pool to reject jobs immediately when the queue is full
    ///
    /// This is a convenience method equivalent to setting
    /// [`SubmitPolicy::Reject`].
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn reject_when_full(mut self) -> Self {
        self.submit_policy = SubmitPolicy::Reject;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(PoolError::invalid_config(
                "workers",
                "Number of workers must be greater than 0",
            ));
        }
        if self.queue_capacity == Some(0) {
            return Err(PoolError::invalid_config(
                "queue_capacity",
                "Queue capacity must be greater than 0 (omit it for unbounded)",
            ));
        }
        Ok(())
    }
}

/// Lifecycle state of a thread pool
///
/// A pool moves through its states exactly once and never returns to
/// `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolState {
    /// Accepting and executing jobs
    Running,
    /// `join` has begun: no new jobs, queued jobs draining
    Joining,
    /// All workers have exited
    Joined,
}

const STATE_RUNNING: u8 = 0;
const STATE_JOINING: u8 = 1;
const STATE_JOINED: u8 = 2;

/// A thread pool for executing jobs concurrently
///
/// The pool owns one shared job queue and a fixed set of worker threads,
/// all created at construction. Jobs are executed in FIFO order, each
/// exactly once, by exactly one worker.
///
/// # Shutdown
///
/// [`join`](Self::join) closes the queue for draining and blocks until
/// every worker has executed its last job and exited. Submissions after
/// `join` begins fail with [`PoolError::PoolClosed`]. Dropping the pool
/// joins it first if the caller did not, so no worker thread outlives the
/// pool handle.
///
/// # Example
///
/// ```rust
/// use jobpool::prelude::*;
///
/// # fn main() -> Result<()> {
/// let pool = ThreadPool::with_workers(4)?;
///
/// for i in 0..10 {
///     pool.execute(move || {
///         println!("Job {} executing", i);
///         Ok(())
///     })?;
/// }
///
/// pool.join()?;
/// # Ok(())
/// # }
/// ```
pub struct ThreadPool {
    config: PoolConfig,
    queue: Arc<dyn JobQueue>,
    workers: Mutex<Vec<Worker>>,
    worker_stats: Vec<Arc<WorkerStats>>,
    state: AtomicU8,
    jobs_submitted: AtomicU64,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("config", &self.config)
            .field("state", &self.state())
            .field(
                "jobs_submitted",
                &self.jobs_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl ThreadPool {
    /// Create a thread pool, spawning all worker threads
    ///
    /// Construction is atomic: either every configured worker starts, or
    /// the already-spawned workers are rolled back (signalled and joined)
    /// and an error is returned, leaving no orphaned threads.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfig`] if the configuration is invalid
    /// - [`PoolError::ConstructionFailed`] if a worker thread could not
    ///   be spawned
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let queue: Arc<dyn JobQueue> = match config.queue_capacity {
            Some(capacity) => Arc::new(BoundedQueue::new(capacity)),
            None => Arc::new(ChannelQueue::unbounded()),
        };

        let mut workers = Vec::with_capacity(config.workers);
        for id in 0..config.workers {
            match Worker::new(
                id,
                Arc::clone(&queue),
                &config.thread_name_prefix,
                config.failure_handler.clone(),
            ) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Roll back: close the queue so the spawned workers
                    // observe termination, then join them before failing.
                    queue.close();
                    for worker in workers {
                        if let Err(join_err) = worker.join() {
                            error!("rollback join failed: {}", join_err);
                        }
                    }
                    return Err(e);
                }
            }
        }

        let worker_stats = workers.iter().map(Worker::stats).collect();

        Ok(Self {
            config,
            queue,
            workers: Mutex::new(workers),
            worker_stats,
            state: AtomicU8::new(STATE_RUNNING),
            jobs_submitted: AtomicU64::new(0),
        })
    }

    /// Create a thread pool with the default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(PoolConfig::default())
    }

    /// Create a thread pool with the specified number of workers
    pub fn with_workers(workers: usize) -> Result<Self> {
        Self::new(PoolConfig::new(workers))
    }

    /// Submit a job to the pool
    ///
    /// May be called concurrently from any number of threads. The job's
    /// captured state is transferred to the engine and released after the
    /// job runs; a rejected job is dropped without ever executing.
    ///
    /// With a bounded queue, the behavior when the queue is full depends
    /// on the configured [`SubmitPolicy`]:
    ///
    /// - [`Block`](SubmitPolicy::Block): wait for queue space (default)
    /// - [`Reject`](SubmitPolicy::Reject): fail with [`PoolError::QueueFull`]
    ///
    /// # Errors
    ///
    /// - [`PoolError::PoolClosed`] if `join` has begun
    /// - [`PoolError::QueueFull`] under the reject policy
    pub fn submit<J: Job + 'static>(&self, job: J) -> Result<()> {
        self.submit_boxed(Box::new(job))
    }

    /// Submit a closure as a job
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.submit(ClosureJob::new(f))
    }

    fn submit_boxed(&self, job: BoxedJob) -> Result<()> {
        if self.state.load(Ordering::Acquire) != STATE_RUNNING {
            return Err(PoolError::pool_closed(self.queue.len()));
        }

        let result = match self.config.submit_policy {
            SubmitPolicy::Block => self.queue.send(job),
            SubmitPolicy::Reject => self.queue.try_send(job),
        };

        match result {
            Ok(()) => {
                self.jobs_submitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(QueueError::Full(_)) => Err(PoolError::queue_full(
                self.queue.len(),
                self.queue.capacity().unwrap_or(0),
            )),
            Err(QueueError::Closed(_)) => Err(PoolError::pool_closed(self.queue.len())),
            Err(e) => Err(PoolError::other(e.to_string())),
        }
    }

    /// Drain all queued jobs and wait for every worker to exit
    ///
    /// The first call transitions the pool to `Joining`, closes the queue
    /// so no further submissions are accepted, and blocks until every
    /// worker has executed its remaining jobs and exited; the pool is then
    /// `Joined`. Subsequent calls return `Ok(())` immediately.
    ///
    /// Terminates in finite time once submissions stop, even if no job was
    /// ever submitted.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::JoinError`] if a worker thread itself panicked
    /// (not a job; job panics are contained). All workers are joined even
    /// when one of them reports an error.
    pub fn join(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(
                STATE_RUNNING,
                STATE_JOINING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            // Already joining or joined
            return Ok(());
        }

        // Close the queue: remaining jobs stay deliverable, and workers
        // observe termination once the queue drains.
        self.queue.close();

        let workers = std::mem::take(&mut *self.workers.lock());
        let mut result = Ok(());
        for worker in workers {
            if let Err(e) = worker.join() {
                error!("{}", e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        self.state.store(STATE_JOINED, Ordering::Release);
        result
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> PoolState {
        match self.state.load(Ordering::Acquire) {
            STATE_RUNNING => PoolState::Running,
            STATE_JOINING => PoolState::Joining,
            _ => PoolState::Joined,
        }
    }

    /// Check if the pool is accepting jobs
    pub fn is_running(&self) -> bool {
        self.state() == PoolState::Running
    }

    /// Get the number of worker threads
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Get the number of jobs waiting to be executed (approximate)
    ///
    /// The value may change between checking and using it.
    pub fn pending_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Get the total number of jobs accepted by the pool
    pub fn jobs_submitted(&self) -> u64 {
        self.jobs_submitted.load(Ordering::Relaxed)
    }

    /// Get statistics for all workers
    ///
    /// Statistics remain readable after [`join`](Self::join).
    pub fn stats(&self) -> &[Arc<WorkerStats>] {
        &self.worker_stats
    }

    /// Get total jobs completed successfully across all workers
    pub fn total_jobs_processed(&self) -> u64 {
        self.worker_stats
            .iter()
            .map(|s| s.get_jobs_processed())
            .sum()
    }

    /// Get total jobs that returned an error across all workers
    pub fn total_jobs_failed(&self) -> u64 {
        self.worker_stats.iter().map(|s| s.get_jobs_failed()).sum()
    }

    /// Get total jobs that panicked across all workers
    pub fn total_jobs_panicked(&self) -> u64 {
        self.worker_stats
            .iter()
            .map(|s| s.get_jobs_panicked())
            .sum()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Join on behalf of a caller that did not; workers never outlive
        // the pool handle.
        if self.state.load(Ordering::Acquire) != STATE_JOINED {
            if let Err(e) = self.join() {
                error!(
                    "Failed to join thread pool '{}' during drop: {}",
                    self.config.thread_name_prefix, e
                );
            }
        }
    }
}

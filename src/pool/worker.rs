//! Worker thread implementation

use crate::core::{BoxedJob, PoolError, Result};
use crate::queue::JobQueue;
use log::{debug, error, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

/// Out-of-band channel for job execution faults.
///
/// A fault inside a job body is contained by the worker that ran it. It is
/// never returned to the submitter and never terminates the worker; instead
/// it is delivered here. When no handler is configured, faults go to the
/// `log` facade.
///
/// # Example
///
/// ```rust,ignore
/// use jobpool::pool::FailureHandler;
/// use jobpool::core::PoolError;
///
/// struct CountFailures;
///
/// impl FailureHandler for CountFailures {
///     fn on_job_failure(&self, error: &PoolError) {
///         eprintln!("job fault: {error}");
///     }
/// }
/// ```
pub trait FailureHandler: Send + Sync {
    /// Called after a job returns an error or panics.
    ///
    /// The error is [`PoolError::JobFailed`] or [`PoolError::JobPanicked`]
    /// and identifies the worker that ran the job.
    fn on_job_failure(&self, error: &PoolError);
}

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of jobs that completed successfully
    pub jobs_processed: AtomicU64,
    /// Total number of jobs that returned an error
    pub jobs_failed: AtomicU64,
    /// Total number of jobs that panicked
    pub jobs_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment jobs processed counter
    pub fn increment_processed(&self) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment jobs failed counter
    pub fn increment_failed(&self) {
        self.jobs_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment jobs panicked counter
    pub fn increment_panicked(&self) {
        self.jobs_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total jobs processed
    pub fn get_jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Get total jobs failed
    pub fn get_jobs_failed(&self) -> u64 {
        self.jobs_failed.load(Ordering::Relaxed)
    }

    /// Get total jobs panicked
    pub fn get_jobs_panicked(&self) -> u64 {
        self.jobs_panicked.load(Ordering::Relaxed)
    }
}

/// A worker thread that processes jobs from a queue
///
/// Workers block in [`JobQueue::recv`] while the queue is empty and exit
/// when it reports disconnection, which happens once the queue is closed
/// and drained. There is no polling.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Create and start a new worker bound to a job queue
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for this worker
    /// * `queue` - Shared job queue
    /// * `name_prefix` - Prefix for the OS thread name
    /// * `failure_handler` - Optional out-of-band fault channel
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ConstructionFailed`] if the OS thread could not
    /// be spawned.
    pub fn new(
        id: usize,
        queue: Arc<dyn JobQueue>,
        name_prefix: &str,
        failure_handler: Option<Arc<dyn FailureHandler>>,
    ) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, queue, stats_clone, failure_handler);
            })
            .map_err(|e| {
                PoolError::construction_with_source(id, "OS refused to spawn thread", e)
            })?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread
    ///
    /// Blocks until the worker exits, which requires the queue to have been
    /// closed and drained.
    pub fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PoolError::join(self.id, "Worker thread panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop
    ///
    /// Dequeues and executes jobs until the queue is closed and empty.
    fn run(
        id: usize,
        queue: Arc<dyn JobQueue>,
        stats: Arc<WorkerStats>,
        failure_handler: Option<Arc<dyn FailureHandler>>,
    ) {
        debug!("worker {} started", id);

        loop {
            match queue.recv() {
                Ok(mut job) => {
                    Self::execute_job(id, &mut job, &stats, failure_handler.as_deref());
                }
                Err(_) => {
                    // Queue closed and drained
                    debug!(
                        "worker {} shutting down ({} processed, {} failed, {} panicked)",
                        id,
                        stats.get_jobs_processed(),
                        stats.get_jobs_failed(),
                        stats.get_jobs_panicked()
                    );
                    break;
                }
            }
        }
    }

    /// Execute a single job with panic protection
    fn execute_job(
        id: usize,
        job: &mut BoxedJob,
        stats: &WorkerStats,
        failure_handler: Option<&dyn FailureHandler>,
    ) {
        let panic_result = catch_unwind(AssertUnwindSafe(|| job.execute()));

        match panic_result {
            Ok(Ok(())) => {
                stats.increment_processed();
            }
            Ok(Err(e)) => {
                stats.increment_failed();
                let fault = PoolError::job_failed(id, format!("{}: {}", job.name(), e));
                match failure_handler {
                    Some(handler) => handler.on_job_failure(&fault),
                    None => warn!("{}", fault),
                }
            }
            Err(panic_info) => {
                stats.increment_panicked();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                let fault = PoolError::job_panicked(id, format!("{}: {}", job.name(), panic_msg));
                match failure_handler {
                    Some(handler) => handler.on_job_failure(&fault),
                    None => error!("{}", fault),
                }
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // The owning pool closes the queue before worker handles drop,
        // so this join cannot block on an open queue.
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("worker {} panicked during shutdown", self.id);
            }
        }
    }
}

//! Queue abstractions for the shared job queue.
//!
//! This module provides the [`JobQueue`] trait that abstracts the hand-off of
//! jobs between submitting threads and worker threads, plus two
//! implementations built on crossbeam channels:
//!
//! - [`ChannelQueue`]: Unbounded FIFO queue (default)
//! - [`BoundedQueue`]: Bounded FIFO queue with configurable capacity
//!
//! # Shutdown protocol
//!
//! A queue starts open. [`JobQueue::close`] transitions it to closing:
//! no new jobs are accepted, but jobs already queued remain deliverable.
//! Once the queue drains, every consumer blocked in [`JobQueue::recv`]
//! observes [`QueueError::Disconnected`], which is the termination signal.
//! Workers never poll for shutdown; closing the queue wakes them.
//!
//! # Custom Queues
//!
//! You can implement custom queues by implementing the [`JobQueue`] trait:
//!
//! ```rust,ignore
//! use jobpool::queue::JobQueue;
//!
//! struct MyCustomQueue { /* ... */ }
//!
//! impl JobQueue for MyCustomQueue {
//!     // Implement all required methods...
//! }
//! ```

mod bounded;
mod channel;

pub use bounded::BoundedQueue;
pub use channel::ChannelQueue;

use crate::core::BoxedJob;

/// Errors that can occur during queue operations.
#[derive(Debug)]
pub enum QueueError {
    /// Queue is full (for bounded queues); the rejected job is recoverable
    Full(RejectedJob),
    /// Queue is closed and not accepting new jobs; the rejected job is recoverable
    Closed(RejectedJob),
    /// Queue is empty (for try_recv)
    Empty,
    /// Queue is closed and drained; termination signal for consumers
    Disconnected,
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::Full(_) => write!(f, "queue is full"),
            QueueError::Closed(_) => write!(f, "queue is closed"),
            QueueError::Empty => write!(f, "queue is empty"),
            QueueError::Disconnected => write!(f, "queue is disconnected"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A holder for jobs rejected by the queue.
///
/// When an enqueue operation fails, the job travels back to the caller inside
/// the error so ownership is returned untouched and the caller can retry or
/// discard it. A rejected job is never executed.
#[derive(Debug)]
pub struct RejectedJob {
    job: Option<BoxedJob>,
}

impl RejectedJob {
    /// Creates a new holder with the given job.
    pub fn new(job: BoxedJob) -> Self {
        Self { job: Some(job) }
    }

    /// Takes the job out of the holder.
    pub fn take(mut self) -> Option<BoxedJob> {
        self.job.take()
    }

    /// Returns a reference to the job if present.
    pub fn as_ref(&self) -> Option<&BoxedJob> {
        self.job.as_ref()
    }
}

/// Result type for queue operations.
pub type QueueResult<T> = std::result::Result<T, QueueError>;

/// Trait for job queue implementations.
///
/// All implementations must be `Send + Sync` to allow sharing across threads,
/// and must deliver jobs in FIFO order with at-most-once semantics: a job
/// handed out by [`recv`](Self::recv) is never visible to another consumer.
pub trait JobQueue: Send + Sync {
    /// Sends a job to the queue, blocking if necessary.
    ///
    /// For bounded queues, this will block until space is available.
    /// For unbounded queues, this never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] if the queue has been closed; the job
    /// is returned inside the error.
    fn send(&self, job: BoxedJob) -> QueueResult<()>;

    /// Attempts to send a job without blocking.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Full`] if the queue is full (bounded queues)
    /// - [`QueueError::Closed`] if the queue has been closed
    fn try_send(&self, job: BoxedJob) -> QueueResult<()>;

    /// Receives a job from the queue, blocking until one is available.
    ///
    /// This is the single mechanism by which consumers learn to stop:
    /// once the queue is closed and drained, every blocked caller is woken
    /// and receives [`QueueError::Disconnected`].
    fn recv(&self) -> QueueResult<BoxedJob>;

    /// Attempts to receive a job without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(job)` if a job was available
    /// - `Err(QueueError::Empty)` if no job was available
    /// - `Err(QueueError::Disconnected)` if the queue is closed and drained
    fn try_recv(&self) -> QueueResult<BoxedJob>;

    /// Closes the queue, preventing new jobs from being sent.
    ///
    /// Idempotent. Jobs already in the queue can still be received; consumers
    /// blocked in [`recv`](Self::recv) are woken once the queue drains.
    fn close(&self);

    /// Returns `true` if the queue has been closed.
    fn is_closed(&self) -> bool;

    /// Returns the current number of queued jobs.
    fn len(&self) -> usize;

    /// Returns `true` if the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity, or `None` if unbounded.
    fn capacity(&self) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClosureJob;

    #[test]
    fn test_queue_error_display() {
        let job: BoxedJob = Box::new(ClosureJob::new(|| Ok(())));
        assert_eq!(
            QueueError::Full(RejectedJob::new(job)).to_string(),
            "queue is full"
        );
        assert_eq!(QueueError::Empty.to_string(), "queue is empty");
        assert_eq!(
            QueueError::Disconnected.to_string(),
            "queue is disconnected"
        );
    }

    #[test]
    fn test_rejected_job_returns_ownership() {
        let job: BoxedJob = Box::new(ClosureJob::with_name(|| Ok(()), "rejected"));
        let holder = RejectedJob::new(job);
        assert!(holder.as_ref().is_some());

        let recovered = holder.take().expect("job should be recoverable");
        assert_eq!(recovered.name(), "rejected");
    }
}

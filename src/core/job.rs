//! Job trait and related types

use crate::core::error::Result;
use std::fmt;

/// A trait representing a unit of work to be executed by the pool
///
/// The engine never inspects a job's contents; it only stores, transports,
/// and invokes it exactly once on a worker thread.
pub trait Job: Send {
    /// Execute the job
    ///
    /// # Errors
    ///
    /// Returns an error if the job execution fails. The error is reported
    /// out-of-band (failure handler or log); it never reaches the submitter.
    fn execute(&mut self) -> Result<()>;

    /// Get the job's name for debugging and failure reports
    fn name(&self) -> &str {
        "Job"
    }
}

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.name())
    }
}

/// A boxed job that can be sent across threads
pub type BoxedJob = Box<dyn Job>;

/// Helper to create a job from a closure
pub struct ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    closure: Option<F>,
    name: String,
}

impl<F> ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    /// Create a new closure job
    pub fn new(closure: F) -> Self {
        Self {
            closure: Some(closure),
            name: "ClosureJob".to_string(),
        }
    }

    /// Create a new closure job with a custom name
    pub fn with_name<S: Into<String>>(closure: F, name: S) -> Self {
        Self {
            closure: Some(closure),
            name: name.into(),
        }
    }
}

impl<F> Job for ClosureJob<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    fn execute(&mut self) -> Result<()> {
        if let Some(closure) = self.closure.take() {
            closure()
        } else {
            // Closure already executed, return error instead of silently succeeding
            Err(crate::core::PoolError::other(
                "ClosureJob already executed - cannot execute twice",
            ))
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

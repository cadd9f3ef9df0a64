//! Error types for the pool engine

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in the pool engine
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Configuration violates a precondition
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// A worker thread could not be started during pool construction
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    ConstructionFailed {
        /// ID of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Submission attempted after join began
    #[error("Pool is closed ({pending_jobs} jobs pending)")]
    PoolClosed {
        /// Number of jobs still queued when the submission was rejected
        pending_jobs: usize,
    },

    /// Submission attempted against a bounded, full queue under the reject policy
    #[error("Job queue is full: {current}/{capacity} jobs queued")]
    QueueFull {
        /// Current queue size
        current: usize,
        /// Maximum queue size
        capacity: usize,
    },

    /// A job body returned an error during execution
    #[error("Job failed on worker #{worker_id}: {message}")]
    JobFailed {
        /// ID of the worker that ran the job
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// A job body panicked during execution
    #[error("Job panicked on worker #{worker_id}: {message}")]
    JobPanicked {
        /// ID of the worker that ran the job
        worker_id: usize,
        /// Panic message
        message: String,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    JoinError {
        /// ID of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl PoolError {
    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        PoolError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a construction error
    pub fn construction(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::ConstructionFailed {
            worker_id,
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction error with source
    pub fn construction_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        PoolError::ConstructionFailed {
            worker_id,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a pool closed error
    pub fn pool_closed(pending_jobs: usize) -> Self {
        PoolError::PoolClosed { pending_jobs }
    }

    /// Create a queue full error
    pub fn queue_full(current: usize, capacity: usize) -> Self {
        PoolError::QueueFull { current, capacity }
    }

    /// Create a job failed error
    pub fn job_failed(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::JobFailed {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a job panicked error
    pub fn job_panicked(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::JobPanicked {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::JoinError {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PoolError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PoolError::invalid_config("workers", "must be greater than 0");
        assert!(matches!(err, PoolError::InvalidConfig { .. }));

        let err = PoolError::queue_full(100, 100);
        assert!(matches!(err, PoolError::QueueFull { .. }));

        let err = PoolError::pool_closed(3);
        assert!(matches!(err, PoolError::PoolClosed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PoolError::invalid_config("workers", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'workers': must be greater than 0"
        );

        let err = PoolError::queue_full(8, 8);
        assert_eq!(err.to_string(), "Job queue is full: 8/8 jobs queued");

        let err = PoolError::pool_closed(0);
        assert_eq!(err.to_string(), "Pool is closed (0 jobs pending)");

        let err = PoolError::job_panicked(2, "boom");
        assert_eq!(err.to_string(), "Job panicked on worker #2: boom");
    }

    #[test]
    fn test_construction_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = PoolError::construction_with_source(5, "Cannot create thread", io_err);

        assert!(matches!(err, PoolError::ConstructionFailed { .. }));
        assert!(err.to_string().contains("worker thread #5"));
    }
}

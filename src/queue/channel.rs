//! Unbounded FIFO queue using crossbeam channels.

use super::{JobQueue, QueueError, QueueResult, RejectedJob};
use crate::core::BoxedJob;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError, TrySendError};
use parking_lot::RwLock;

/// An unbounded FIFO queue using crossbeam channels.
///
/// This is the default queue implementation. The producer half of the channel
/// lives behind an `RwLock<Option<..>>`: closing the queue takes the sender
/// out and drops it, which disconnects the channel once the remaining jobs
/// drain and wakes every consumer blocked in [`recv`](JobQueue::recv).
///
/// # Example
///
/// ```rust
/// use jobpool::queue::{ChannelQueue, JobQueue};
/// use jobpool::core::ClosureJob;
///
/// let queue = ChannelQueue::unbounded();
/// let job = Box::new(ClosureJob::new(|| Ok(())));
/// queue.send(job).unwrap();
/// let received = queue.recv().unwrap();
/// ```
pub struct ChannelQueue {
    sender: RwLock<Option<Sender<BoxedJob>>>,
    receiver: Receiver<BoxedJob>,
}

impl ChannelQueue {
    /// Creates a new unbounded channel queue.
    pub fn unbounded() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            sender: RwLock::new(Some(sender)),
            receiver,
        }
    }

    fn producer(&self) -> Option<Sender<BoxedJob>> {
        self.sender.read().as_ref().cloned()
    }
}

impl JobQueue for ChannelQueue {
    fn send(&self, job: BoxedJob) -> QueueResult<()> {
        match self.producer() {
            Some(tx) => tx
                .send(job)
                .map_err(|e| QueueError::Closed(RejectedJob::new(e.0))),
            None => Err(QueueError::Closed(RejectedJob::new(job))),
        }
    }

    fn try_send(&self, job: BoxedJob) -> QueueResult<()> {
        match self.producer() {
            Some(tx) => tx.try_send(job).map_err(|e| match e {
                TrySendError::Full(job) => QueueError::Full(RejectedJob::new(job)),
                TrySendError::Disconnected(job) => QueueError::Closed(RejectedJob::new(job)),
            }),
            None => Err(QueueError::Closed(RejectedJob::new(job))),
        }
    }

    fn recv(&self) -> QueueResult<BoxedJob> {
        self.receiver.recv().map_err(|_| QueueError::Disconnected)
    }

    fn try_recv(&self) -> QueueResult<BoxedJob> {
        self.receiver.try_recv().map_err(|e| match e {
            TryRecvError::Empty => QueueError::Empty,
            TryRecvError::Disconnected => QueueError::Disconnected,
        })
    }

    fn close(&self) {
        // Dropping the sender disconnects the channel once drained
        self.sender.write().take();
    }

    fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    fn len(&self) -> usize {
        self.receiver.len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}

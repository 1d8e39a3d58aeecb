//! Work queue with a completion barrier
//!
//! Includes:
//! - FIFO hand-off of discovered files to workers
//! - Outstanding-work accounting decoupled from claiming
//! - A drain barrier the driver blocks on
//! - A scope guard that makes done-accounting unconditional

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex};

struct QueueState {
    items: VecDeque<PathBuf>,
    /// Items pushed but not yet marked done, whether queued or claimed.
    outstanding: usize,
}

/// Thread-safe FIFO of files waiting to be stamped.
///
/// Claiming an item does not complete it; every claimed item must be
/// followed by exactly one [`FileQueue::mark_done`], normally via
/// [`DoneGuard`]. The queue is drained once every pushed item was marked
/// done, at which point [`FileQueue::await_drained`] unblocks.
pub struct FileQueue {
    state: Mutex<QueueState>,
    drained: Condvar,
}

impl FileQueue {
    pub fn new() -> Self {
        FileQueue {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                outstanding: 0,
            }),
            drained: Condvar::new(),
        }
    }

    /// Append an item and account for it in the drain barrier.
    pub fn push(&self, item: PathBuf) {
        let mut state = self.state.lock().expect("work queue lock poisoned");
        state.items.push_back(item);
        state.outstanding += 1;
    }

    /// Claim the oldest queued item. Never blocks; `None` means the queue
    /// holds nothing claimable right now.
    pub fn try_pop(&self) -> Option<PathBuf> {
        let mut state = self.state.lock().expect("work queue lock poisoned");
        state.items.pop_front()
    }

    /// Record that one claimed item reached the end of its lifecycle.
    pub fn mark_done(&self) {
        let mut state = self.state.lock().expect("work queue lock poisoned");
        assert!(
            state.outstanding > 0,
            "mark_done called with nothing outstanding"
        );
        state.outstanding -= 1;
        if state.outstanding == 0 {
            self.drained.notify_all();
        }
    }

    /// Block until every pushed item has been marked done. Returns
    /// immediately when nothing was ever pushed.
    pub fn await_drained(&self) {
        let mut state = self.state.lock().expect("work queue lock poisoned");
        while state.outstanding > 0 {
            state = self
                .drained
                .wait(state)
                .expect("work queue lock poisoned");
        }
    }

    /// Number of items queued and not yet claimed.
    pub fn len(&self) -> usize {
        self.state.lock().expect("work queue lock poisoned").items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items pushed and not yet marked done.
    pub fn outstanding(&self) -> usize {
        self.state.lock().expect("work queue lock poisoned").outstanding
    }
}

impl Default for FileQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks one item done when dropped, so the accounting also runs when
/// processing returns early or unwinds.
pub struct DoneGuard<'a>(&'a FileQueue);

impl<'a> DoneGuard<'a> {
    pub fn new(queue: &'a FileQueue) -> Self {
        DoneGuard(queue)
    }
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.0.mark_done();
    }
}

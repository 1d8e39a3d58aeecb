//! Worker pool that drains the file queue
//!
//! Includes:
//! - One processor per worker, built up front on the launching thread
//! - Named worker threads with a non-blocking drain loop
//! - Per-item failure isolation and logging
//! - Stat aggregation and panic surfacing at join

use anyhow::{Context, Result, bail};
use log::{error, info};
use std::any::Any;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::common::PROGRESS_LOG_INTERVAL;
use crate::common::errors::StampError;
use crate::workflow::processor::FileProcessor;
use crate::workflow::queue::{DoneGuard, FileQueue};

/// Tally kept by a single worker across its drain loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub processed: usize,
    pub failed: usize,
}

/// Combined tallies of every worker in a finished pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Worker count matching the host's available parallelism.
pub fn default_pool_size() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub struct WorkerPool {
    handles: Vec<JoinHandle<WorkerStats>>,
}

impl WorkerPool {
    /// Build one processor per worker, then start all drain loops.
    ///
    /// Every processor is constructed on the calling thread before any
    /// thread spawns, so a resource failure (a missing caption font)
    /// aborts the launch with no worker running.
    pub fn launch<P, F>(queue: Arc<FileQueue>, workers: usize, factory: F) -> Result<Self>
    where
        P: FileProcessor + Send + 'static,
        F: Fn(usize) -> Result<P, StampError>,
    {
        let mut processors = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let processor = factory(worker_id)
                .with_context(|| format!("failed to construct worker {worker_id}"))?;
            processors.push(processor);
        }

        let mut handles = Vec::with_capacity(workers);
        for (worker_id, mut processor) in processors.into_iter().enumerate() {
            let queue = Arc::clone(&queue);
            let handle = thread::Builder::new()
                .name(format!("stamp-worker-{worker_id}"))
                .spawn(move || drain_queue(&queue, &mut processor))
                .context("failed to spawn worker thread")?;
            handles.push(handle);
        }

        Ok(WorkerPool { handles })
    }

    /// Wait for every worker to stop and combine their tallies.
    pub fn join(self) -> Result<PoolStats> {
        let mut totals = PoolStats {
            workers: self.handles.len(),
            processed: 0,
            failed: 0,
        };
        let mut first_panic = None;

        for handle in self.handles {
            match handle.join() {
                Ok(stats) => {
                    totals.processed += stats.processed;
                    totals.failed += stats.failed;
                }
                Err(panic) => {
                    if first_panic.is_none() {
                        first_panic = Some(panic_message(&*panic));
                    }
                }
            }
        }

        if let Some(message) = first_panic {
            bail!("worker thread panicked: {message}");
        }
        Ok(totals)
    }
}

/// The loop each worker runs until the queue has nothing left to claim.
fn drain_queue<P: FileProcessor>(queue: &FileQueue, processor: &mut P) -> WorkerStats {
    let mut stats = WorkerStats::default();
    let mut claimed: usize = 0;

    while let Some(item) = queue.try_pop() {
        let _done = DoneGuard::new(queue);

        claimed += 1;
        if claimed % PROGRESS_LOG_INTERVAL == 0 {
            info!("Image {claimed}: {}", item.display());
        }

        match processor.process(&item) {
            Ok(()) => stats.processed += 1,
            Err(error) => {
                stats.failed += 1;
                let error = anyhow::Error::from(error);
                error!("skipping {}: {error:#}", item.display());
            }
        }
    }

    info!("work queue empty, stopping");
    stats
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked without a message".to_string()
    }
}

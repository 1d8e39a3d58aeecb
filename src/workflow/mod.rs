//! Concurrent annotation pipeline
//!
//! Includes:
//! - Depth-one discovery of stampable files
//! - Queue seeding and worker pool launch
//! - Drain barrier and end-of-run reporting

pub mod pool;
pub mod processor;
pub mod queue;

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use walkdir::WalkDir;

use crate::common::STAMP_FILE_SUFFIX;
use crate::workflow::pool::{WorkerPool, default_pool_size};
use crate::workflow::processor::TimestampProcessor;
use crate::workflow::queue::FileQueue;

/// What a completed run did. Per-item failures are tallied here, never
/// escalated; the run as a whole still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub queued: usize,
    pub processed: usize,
    pub failed: usize,
}

fn is_stamp_candidate(file_name: &str) -> bool {
    file_name.ends_with(STAMP_FILE_SUFFIX)
}

/// Stamp every `*.jpg` symlink directly inside `dir`.
///
/// Seeds the queue fully before launching workers, since workers stop as
/// soon as they see the queue empty.
pub fn annotate_directory(dir: &Path) -> Result<RunSummary> {
    let start_time = Instant::now();

    let queue = Arc::new(FileQueue::new());
    let mut queued = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.context(format!("failed to list directory {dir:?}"))?;
        if is_stamp_candidate(&entry.file_name().to_string_lossy()) {
            queue.push(entry.path().to_path_buf());
            queued += 1;
        }
    }

    let workers = default_pool_size();
    info!("annotating {queued} images under {dir:?} with {workers} workers");

    let pool = WorkerPool::launch(Arc::clone(&queue), workers, |_| TimestampProcessor::new())
        .context("failed to launch the worker pool")?;
    queue.await_drained();
    let stats = pool.join()?;

    info!(duration = &*format!("{:?}", start_time.elapsed());
        "stamped {} of {queued} images, {} failed", stats.processed, stats.failed);

    Ok(RunSummary {
        queued,
        processed: stats.processed,
        failed: stats.failed,
    })
}

#[cfg(test)]
mod tests {
    use super::is_stamp_candidate;

    #[test]
    fn only_exact_lowercase_suffixes_qualify() {
        assert!(is_stamp_candidate("cam0.jpg"));
        assert!(is_stamp_candidate(".jpg"));
        assert!(!is_stamp_candidate("cam0.JPG"));
        assert!(!is_stamp_candidate("cam0.jpeg"));
        assert!(!is_stamp_candidate("jpg"));
        assert!(!is_stamp_candidate("notes.txt"));
    }
}

//! Lock-free per-worker progress counters.
//!
//! Each worker owns exactly one [`ProgressEntry`] and is its only writer; any other
//! thread may load the counters at any time. Values are cumulative and monotonically
//! non-decreasing within a job, so a load is always a valid (possibly stale)
//! snapshot. No mutex exists anywhere on this path.
//!
//! Cross-worker aggregates ("total pixels so far") are computed by summing the
//! entries on the *read* side; no shared write target exists.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress counters for a single worker.
///
/// Written only by the owning worker, read by anyone.
#[derive(Debug, Default)]
pub struct ProgressEntry {
    pixels_done: AtomicUsize,
    bytes_done: AtomicUsize,
    runs_done: AtomicUsize,
}

impl ProgressEntry {
    /// Stores the worker's cumulative counters. Called by the owning worker after
    /// each encoded run.
    pub(crate) fn record(&self, pixels: usize, bytes: usize, runs: usize) {
        // Relaxed is enough: entries are independent, single-writer, and only
        // consumed as monotonic snapshots.
        self.pixels_done.store(pixels, Ordering::Relaxed);
        self.bytes_done.store(bytes, Ordering::Relaxed);
        self.runs_done.store(runs, Ordering::Relaxed);
    }

    /// Pixels compressed so far by this worker.
    pub fn pixels_done(&self) -> usize {
        self.pixels_done.load(Ordering::Relaxed)
    }

    /// Compressed bytes produced so far by this worker.
    pub fn bytes_done(&self) -> usize {
        self.bytes_done.load(Ordering::Relaxed)
    }

    /// Runs emitted so far by this worker.
    pub fn runs_done(&self) -> usize {
        self.runs_done.load(Ordering::Relaxed)
    }
}

/// The set of per-worker progress entries for one compression job.
///
/// Allocated before the workers start and shared by reference into each worker
/// task. An observer thread holding the same reference can poll while the job
/// runs:
///
/// ```rust
/// use parle::{partition_count, ProgressTracker};
///
/// let workers = partition_count(1080, 8);
/// let tracker = ProgressTracker::new(workers);
/// // hand &tracker to Parle::compress_tracked on another thread, then poll:
/// let done = tracker.total_pixels_done();
/// # assert_eq!(done, 0);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    entries: Vec<ProgressEntry>,
}

impl ProgressTracker {
    /// Creates a tracker with `num_workers` zeroed entries.
    pub fn new(num_workers: usize) -> Self {
        let mut entries = Vec::with_capacity(num_workers);
        entries.resize_with(num_workers, ProgressEntry::default);
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tracker has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry owned by worker `index`, if it exists.
    pub fn entry(&self, index: usize) -> Option<&ProgressEntry> {
        self.entries.get(index)
    }

    /// Sum of pixels compressed across all workers.
    pub fn total_pixels_done(&self) -> usize {
        self.entries.iter().map(ProgressEntry::pixels_done).sum()
    }

    /// Sum of compressed bytes produced across all workers.
    pub fn total_bytes_done(&self) -> usize {
        self.entries.iter().map(ProgressEntry::bytes_done).sum()
    }

    /// Sum of runs emitted across all workers.
    pub fn total_runs_done(&self) -> usize {
        self.entries.iter().map(ProgressEntry::runs_done).sum()
    }
}

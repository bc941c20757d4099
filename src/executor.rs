//! The fork-join compression engine.
//!
//! One worker task is spawned per partition inside a `rayon::scope`; the scope is
//! the job's only synchronization barrier. Each task reads its slice of the shared
//! pixel buffer, encodes runs into its own private chunk, and publishes progress to
//! its own atomic entry. No worker ever touches another worker's state, so the hot
//! path carries no locks.
//!
//! When the scope returns, every worker is quiescent and ownership of the chunks
//! passes to the merger, in partition order.

use std::time::{Duration, Instant};

use crate::codec::RunIter;
use crate::constants::CHUNK_SLACK;
use crate::error::{ParleError, Result};
use crate::partition::Partition;
use crate::pixel::PixelBuffer;
use crate::progress::{ProgressEntry, ProgressTracker};

/// Timing and size figures for one completed worker.
///
/// Captured with `std::time::Instant` on the worker's own thread; no
/// platform-specific thread introspection is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerMetrics {
    /// Partition index this worker processed.
    pub worker: usize,
    /// First row of the partition.
    pub start_row: u32,
    /// Rows processed.
    pub row_count: u32,
    /// Pixels read.
    pub pixels_in: usize,
    /// Compressed bytes produced.
    pub bytes_out: usize,
    /// Runs emitted.
    pub runs: usize,
    /// Wall time spent inside the worker task.
    pub elapsed: Duration,
}

/// Aggregate figures for one compression job, assembled after the join barrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Per-worker figures, in partition order.
    pub workers: Vec<WorkerMetrics>,
    /// Raw input size in bytes.
    pub raw_size: usize,
    /// Total output size in bytes, header included.
    pub compressed_size: usize,
    /// Wall time from fork to merge completion.
    pub elapsed: Duration,
}

impl JobReport {
    /// Total runs emitted across all workers.
    pub fn total_runs(&self) -> usize {
        self.workers.iter().map(|w| w.runs).sum()
    }

    /// Space saved as a fraction of the raw size, in `[0, 1]`. Negative expansion
    /// (the all-distinct worst case) clamps to 0.
    pub fn space_saving(&self) -> f64 {
        if self.raw_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.raw_size as f64).max(0.0)
    }
}

/// The result of one worker task: its private chunk plus its metrics.
#[derive(Debug)]
pub(crate) struct WorkerOutput {
    pub chunk: Vec<u8>,
    pub metrics: WorkerMetrics,
}

/// Runs one worker task per partition and blocks until all complete.
///
/// Outputs are returned in partition order (index 0 first) regardless of which
/// worker finished first. `tracker` must hold at least one entry per partition.
///
/// # Errors
/// [`ParleError::Internal`] if the tracker is too small or a result slot is left
/// unfilled after the barrier; both indicate bugs, not runtime conditions.
pub(crate) fn execute(
    image: &PixelBuffer<'_>,
    partitions: &[Partition],
    tracker: &ProgressTracker,
) -> Result<Vec<WorkerOutput>> {
    if partitions.is_empty() {
        return Ok(Vec::new());
    }

    // Resolve every progress entry up front so workers can't race an index error.
    let entries: Vec<&ProgressEntry> = partitions
        .iter()
        .map(|p| {
            tracker.entry(p.index).ok_or_else(|| {
                ParleError::Internal(format!(
                    "ProgressTracker has {} entries, partition {} needs one",
                    tracker.len(),
                    p.index
                ))
            })
        })
        .collect::<Result<_>>()?;

    log::debug!(
        "forking {} workers over {}x{} ({} bytes raw)",
        partitions.len(),
        image.width(),
        image.height(),
        image.raw_size()
    );

    let mut slots: Vec<Option<WorkerOutput>> = Vec::with_capacity(partitions.len());
    slots.resize_with(partitions.len(), || None);

    // The scope is the join barrier: it returns only after every spawned task has
    // finished, at which point each slot holds its worker's output.
    rayon::scope(|s| {
        for ((slot, partition), entry) in slots.iter_mut().zip(partitions).zip(entries) {
            s.spawn(move |_| {
                *slot = Some(run_worker(image, partition, entry));
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.ok_or_else(|| {
                ParleError::Internal("Worker slot unfilled after join barrier".into())
            })
        })
        .collect()
}

/// The body of one worker task.
fn run_worker(
    image: &PixelBuffer<'_>,
    partition: &Partition,
    entry: &ProgressEntry,
) -> WorkerOutput {
    let started = Instant::now();
    let channels = image.format().channels();
    let pixels = image.partition_slice(partition);

    // Initial estimate assumes ~2:1 compression; the buffer doubles from there.
    // Growth failure aborts the process: there is no partial-compression path.
    let mut chunk = Vec::with_capacity(partition.pixel_count * channels / 2 + CHUNK_SLACK);

    let mut pixels_done = 0usize;
    let mut runs = 0usize;
    for run in RunIter::new(pixels, channels) {
        run.encode_into(&mut chunk);
        pixels_done += run.count as usize;
        runs += 1;
        entry.record(pixels_done, chunk.len(), runs);
    }

    let metrics = WorkerMetrics {
        worker: partition.index,
        start_row: partition.start_row,
        row_count: partition.row_count,
        pixels_in: partition.pixel_count,
        bytes_out: chunk.len(),
        runs,
        elapsed: started.elapsed(),
    };

    log::trace!(
        "worker {} done: rows {}..{}, {} runs, {} bytes in {:?}",
        metrics.worker,
        metrics.start_row,
        metrics.start_row + metrics.row_count,
        metrics.runs,
        metrics.bytes_out,
        metrics.elapsed
    );

    WorkerOutput { chunk, metrics }
}

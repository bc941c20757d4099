//! Row-aligned job splitting.
//!
//! A compression job divides the image into contiguous, non-overlapping row ranges,
//! one per worker. The split is purely arithmetic and deterministic: the same
//! `(height, num_workers)` always yields the same boundaries, which is what makes
//! the merged output reproducible regardless of scheduling.

/// One worker's share of the image: a contiguous, disjoint, row-aligned range.
///
/// The union of all partitions of a job covers `[0, height)` exactly once.
/// Instances are created by [`partition`] at job start and never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Position of this partition in the job (0-based). Chunks are merged in
    /// this order.
    pub index: usize,
    /// First row covered.
    pub start_row: u32,
    /// Number of rows covered. Always at least 1.
    pub row_count: u32,
    /// Offset of the first pixel, in pixels from the start of the image.
    pub pixel_offset: usize,
    /// Number of pixels covered.
    pub pixel_count: usize,
}

/// Splits `height` rows among `num_workers` workers.
///
/// `num_workers` is clamped to `[1, height]` so every partition holds at least one
/// row. Rows divide as `base = height / workers` with the first `height % workers`
/// partitions taking one extra row, keeping any two partitions within one row of
/// each other.
///
/// A zero `height` produces no partitions (and a zero-length compressed payload
/// downstream); it is not an error.
pub fn partition(width: u32, height: u32, num_workers: usize) -> Vec<Partition> {
    let count = partition_count(height, num_workers);
    if count == 0 {
        return Vec::new();
    }

    let base = height / count as u32;
    let remainder = (height % count as u32) as usize;
    let width = width as usize;

    let mut partitions = Vec::with_capacity(count);
    let mut row = 0u32;
    for index in 0..count {
        let rows = base + u32::from(index < remainder);
        partitions.push(Partition {
            index,
            start_row: row,
            row_count: rows,
            pixel_offset: row as usize * width,
            pixel_count: rows as usize * width,
        });
        row += rows;
    }
    partitions
}

/// The number of partitions [`partition`] would produce for these inputs.
///
/// Useful for sizing a [`crate::ProgressTracker`] before forking the job.
pub fn partition_count(height: u32, num_workers: usize) -> usize {
    if height == 0 {
        return 0;
    }
    num_workers.max(1).min(height as usize)
}

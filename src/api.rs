//! High-level entry points.

use std::path::Path;
use std::time::Instant;

use crate::error::{ParleError, Result};
use crate::executor::{execute, JobReport};
use crate::format::{CompressedStream, StreamHeader};
use crate::io::StreamWriter;
use crate::partition::{partition, partition_count};
use crate::pixel::PixelBuffer;
use crate::progress::ProgressTracker;
use crate::verify;

/// The main entry point for compressing and decompressing pixel data.
#[derive(Debug)]
pub struct Parle;

impl Parle {
    /// Compresses an image across `num_workers` parallel workers.
    ///
    /// `num_workers` is clamped to the image height; `0` selects the width of the
    /// rayon pool. The returned stream is deterministic: the same image and worker
    /// count always produce identical bytes, and any worker count round-trips to
    /// the same pixels.
    pub fn compress(image: &PixelBuffer<'_>, num_workers: usize) -> Result<CompressedStream> {
        Self::compress_with_report(image, num_workers).map(|(stream, _)| stream)
    }

    /// Like [`Parle::compress`], also returning per-worker metrics.
    pub fn compress_with_report(
        image: &PixelBuffer<'_>,
        num_workers: usize,
    ) -> Result<(CompressedStream, JobReport)> {
        let workers = effective_workers(num_workers);
        let tracker = ProgressTracker::new(partition_count(image.height(), workers));
        Self::compress_tracked(image, workers, &tracker)
    }

    /// Compresses with a caller-supplied progress tracker.
    ///
    /// The tracker must hold at least [`partition_count`] entries for this image
    /// and worker count. An observer thread sharing `tracker` may poll the entries
    /// while this call blocks; see [`ProgressTracker`].
    pub fn compress_tracked(
        image: &PixelBuffer<'_>,
        num_workers: usize,
        tracker: &ProgressTracker,
    ) -> Result<(CompressedStream, JobReport)> {
        let started = Instant::now();
        let workers = effective_workers(num_workers);

        // 1. Partition the rows. Degenerate images produce zero partitions and a
        //    header-only stream.
        let partitions = partition(image.width(), image.height(), workers);

        // 2. Fork-join: one task per partition, outputs in partition order.
        let outputs = execute(image, &partitions, tracker)?;

        // 3. Merge in partition order.
        let mut chunks = Vec::with_capacity(outputs.len());
        let mut metrics = Vec::with_capacity(outputs.len());
        for output in outputs {
            metrics.push(output.metrics);
            chunks.push(output.chunk);
        }
        let stream = CompressedStream::merge(image.width(), image.height(), image.format(), &chunks);

        let report = JobReport {
            workers: metrics,
            raw_size: image.raw_size(),
            compressed_size: stream.as_bytes().len(),
            elapsed: started.elapsed(),
        };

        log::debug!(
            "job complete: {} -> {} bytes ({:.1}% saved) in {:?}",
            report.raw_size,
            report.compressed_size,
            report.space_saving() * 100.0,
            report.elapsed
        );

        Ok((stream, report))
    }

    /// Decompresses a stream back into raw pixel bytes.
    ///
    /// # Errors
    /// [`ParleError::Format`] if the payload decodes to fewer pixels than the
    /// header promises.
    pub fn decompress(stream: &CompressedStream) -> Result<Vec<u8>> {
        let expected = stream.width() as usize
            * stream.height() as usize
            * stream.format().channels();
        let pixels = stream.decode_pixels();
        if pixels.len() != expected {
            return Err(ParleError::Format(format!(
                "Stream decoded to {} of {} bytes",
                pixels.len(),
                expected
            )));
        }
        Ok(pixels)
    }

    /// Returns true iff `stream` decompresses to exactly `image`.
    pub fn verify(image: &PixelBuffer<'_>, stream: &CompressedStream) -> bool {
        verify::verify(image, stream)
    }

    /// Compresses an image and writes the container to `path`, streaming chunks
    /// in partition order without building the merged copy in memory.
    pub fn save<P: AsRef<Path>>(
        path: P,
        image: &PixelBuffer<'_>,
        num_workers: usize,
    ) -> Result<JobReport> {
        let started = Instant::now();
        let workers = effective_workers(num_workers);
        let tracker = ProgressTracker::new(partition_count(image.height(), workers));
        let partitions = partition(image.width(), image.height(), workers);

        let outputs = execute(image, &partitions, &tracker)?;

        let header = StreamHeader {
            width: image.width(),
            height: image.height(),
        };
        let mut writer = StreamWriter::create(path.as_ref(), header)?;
        for output in &outputs {
            writer.write_chunk(&output.chunk)?;
        }
        let written = writer.finish()?;

        Ok(JobReport {
            workers: outputs.into_iter().map(|o| o.metrics).collect(),
            raw_size: image.raw_size(),
            compressed_size: written as usize,
            elapsed: started.elapsed(),
        })
    }
}

/// Resolves the requested worker count: `0` means one worker per rayon thread.
fn effective_workers(num_workers: usize) -> usize {
    if num_workers == 0 {
        rayon::current_num_threads()
    } else {
        num_workers
    }
}

//! Read-only pixel input handed to a compression job.
//!
//! A [`PixelBuffer`] borrows the caller's pixel bytes for the duration of the job;
//! the library never copies or mutates them. All workers read from the same buffer
//! concurrently, which is safe precisely because nothing writes to it.

use crate::error::{ParleError, Result};
use crate::partition::Partition;

/// The channel layout of a pixel buffer and of the run records encoded from it.
///
/// The compressed container itself carries no format marker (the 8-byte header is
/// only `width`/`height`), so the format travels with the in-memory types instead:
/// every decode entry point requires it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three channels per pixel (R, G, B). Run records are 4 bytes.
    Rgb,
    /// One channel per pixel. Run records are 2 bytes.
    Gray,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Gray => 1,
        }
    }

    /// Size in bytes of one encoded run record: count byte + channel tuple.
    pub fn run_size(&self) -> usize {
        self.channels() + 1
    }
}

/// An immutable view over `width * height * channels` bytes of pixel data.
///
/// The buffer stays owned by the caller; compression only borrows it. Row `y`
/// occupies bytes `[y * width * channels, (y + 1) * width * channels)`.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wraps a pixel slice, validating that its length matches the dimensions.
    ///
    /// # Errors
    /// Returns [`ParleError::Format`] if `data.len() != width * height * channels`.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: &'a [u8]) -> Result<Self> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(ParleError::Format(format!(
                "Pixel slice length {} does not match {}x{} ({} bytes expected)",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels (rows).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The channel layout of this buffer.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The raw pixel bytes.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total size of the raw pixel data in bytes.
    pub fn raw_size(&self) -> usize {
        self.data.len()
    }

    /// The byte slice covered by one partition.
    ///
    /// Partitions produced for this buffer's dimensions are always in bounds; the
    /// range is re-checked here so a mismatched partition yields an empty slice
    /// rather than a panic.
    pub(crate) fn partition_slice(&self, partition: &Partition) -> &'a [u8] {
        let ch = self.format.channels();
        let start = partition.pixel_offset * ch;
        let end = start + partition.pixel_count * ch;
        self.data.get(start..end).unwrap_or(&[])
    }
}

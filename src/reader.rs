//! The read-side engine for compressed containers.
//!
//! Memory-maps a `.rle` file, validates the header, and decodes on demand. The
//! payload is never copied until decode time; verification against a source image
//! reads straight from the map.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::codec;
use crate::error::{ParleError, Result};
use crate::format::{StreamHeader, STREAM_HEADER_SIZE};
use crate::pixel::{PixelBuffer, PixelFormat};

/// A handle to a compressed container file.
///
/// The wire format carries no channel-format marker, so the caller states the
/// format at open time; see [`crate::PixelFormat`].
#[derive(Debug)]
pub struct ParleReader {
    mmap: Mmap,
    header: StreamHeader,
    format: PixelFormat,
}

impl ParleReader {
    /// Opens a container file and validates its header.
    ///
    /// # Errors
    /// [`ParleError::Io`] if the file cannot be opened or mapped;
    /// [`ParleError::Format`] if it is smaller than the 8-byte header.
    pub fn open<P: AsRef<Path>>(path: P, format: PixelFormat) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len < STREAM_HEADER_SIZE as u64 {
            return Err(ParleError::Format(format!(
                "Container smaller than header: {len} bytes"
            )));
        }

        // Safety: Mmap is fundamentally unsafe as external processes could modify
        // the file. We assume exclusive access or accept the risk for performance
        // (standard practice).
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };

        let header = StreamHeader::from_bytes(&mmap)?;
        Ok(Self {
            mmap,
            header,
            format,
        })
    }

    /// Image width recorded in the header.
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Image height recorded in the header.
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// The channel format this reader decodes with.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The run records after the header, borrowed from the map.
    pub fn payload(&self) -> &[u8] {
        &self.mmap[STREAM_HEADER_SIZE..]
    }

    /// Decodes the full image.
    ///
    /// # Errors
    /// [`ParleError::Format`] if the payload decodes to fewer pixels than the
    /// header promises (truncated or corrupt container).
    pub fn decode(&self) -> Result<Vec<u8>> {
        let expected = self.header.pixel_count();
        let channels = self.format.channels();

        let mut out = Vec::with_capacity(expected * channels);
        let written = codec::decode_into(self.payload(), channels, expected, &mut out);

        if written != expected {
            return Err(ParleError::Format(format!(
                "Container decoded to {written} of {expected} pixels"
            )));
        }
        Ok(out)
    }

    /// Returns true iff this container decodes to exactly `original`.
    ///
    /// Same contract as [`crate::verify`], reading the payload straight from the
    /// map.
    pub fn verify(&self, original: &PixelBuffer<'_>) -> bool {
        if self.header.width != original.width()
            || self.header.height != original.height()
            || self.format != original.format()
        {
            return false;
        }

        let expected = self.header.pixel_count();
        let channels = self.format.channels();
        let mut out = Vec::with_capacity(expected * channels);
        codec::decode_into(self.payload(), channels, expected, &mut out);

        out.len() == original.raw_size() && out == original.data()
    }
}

//! Defines the physical binary layout of a compressed stream, and the merger that
//! produces it.
//!
//! # Layout
//!
//! ```text
//! offset 0: u32 little-endian  width
//! offset 4: u32 little-endian  height
//! offset 8: run records, partition order
//!           RGB runs       = 4 bytes each (count, R, G, B)
//!           grayscale runs = 2 bytes each (count, value)
//! ```
//!
//! Chunks are concatenated in **partition order**, never completion order: worker
//! completion order is nondeterministic, but the byte stream must be identical for
//! the same input, worker count and codec regardless of scheduling or timing.

use crate::codec;
use crate::error::{ParleError, Result};
use crate::pixel::PixelFormat;

/// The fixed size of the stream header: width(4) + height(4).
pub const STREAM_HEADER_SIZE: usize = 8;

/// The 8-byte dimension header at the start of every compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl StreamHeader {
    /// Serializes to a fixed-size byte array (Little Endian).
    pub fn to_bytes(&self) -> [u8; STREAM_HEADER_SIZE] {
        let mut buf = [0u8; STREAM_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.width.to_le_bytes());
        buf[4..8].copy_from_slice(&self.height.to_le_bytes());
        buf
    }

    /// Deserializes from the start of a byte slice.
    ///
    /// # Errors
    /// Returns [`ParleError::Format`] if the slice is shorter than the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < STREAM_HEADER_SIZE {
            return Err(ParleError::Format(format!(
                "Stream shorter than {STREAM_HEADER_SIZE}-byte header: {} bytes",
                bytes.len()
            )));
        }
        let width = u32::from_le_bytes(bytes[0..4].try_into().unwrap_or([0; 4]));
        let height = u32::from_le_bytes(bytes[4..8].try_into().unwrap_or([0; 4]));
        Ok(Self { width, height })
    }

    /// Total number of pixels the payload must decode to.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A complete compressed image: header plus run records, contiguous in memory.
///
/// Produced by [`CompressedStream::merge`] from per-worker chunks, or wrapped
/// around externally loaded bytes with [`CompressedStream::from_bytes`]. The
/// channel format is carried alongside the bytes because the wire layout does not
/// encode it; a stream decoded with the wrong format would be garbage, so the
/// format is demanded up front instead of guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedStream {
    header: StreamHeader,
    format: PixelFormat,
    bytes: Vec<u8>,
}

impl CompressedStream {
    /// Concatenates per-worker chunks, in partition order, behind the dimension
    /// header.
    ///
    /// This is the only place chunk bytes from different workers meet; by the time
    /// it runs the join barrier has already made every chunk immutable.
    pub fn merge(width: u32, height: u32, format: PixelFormat, chunks: &[Vec<u8>]) -> Self {
        let header = StreamHeader { width, height };
        let payload_len: usize = chunks.iter().map(Vec::len).sum();

        let mut bytes = Vec::with_capacity(STREAM_HEADER_SIZE + payload_len);
        bytes.extend_from_slice(&header.to_bytes());
        for chunk in chunks {
            bytes.extend_from_slice(chunk);
        }

        Self {
            header,
            format,
            bytes,
        }
    }

    /// Wraps an externally produced stream (e.g. bytes read back from storage),
    /// validating the header.
    ///
    /// # Errors
    /// Returns [`ParleError::Format`] if `bytes` is shorter than the header.
    pub fn from_bytes(bytes: Vec<u8>, format: PixelFormat) -> Result<Self> {
        let header = StreamHeader::from_bytes(&bytes)?;
        Ok(Self {
            header,
            format,
            bytes,
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

    /// The channel format this stream was encoded with.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The full stream, header included. This is what an output sink stores.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The run records after the header.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[STREAM_HEADER_SIZE..]
    }

    /// Consumes the stream, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decodes the payload into pixels.
    ///
    /// The result may be shorter than `width * height * channels` if the payload is
    /// truncated or malformed; [`crate::Parle::decompress`] turns that into an
    /// error, [`crate::Parle::verify`] into a `false`.
    pub fn decode_pixels(&self) -> Vec<u8> {
        let expected = self.header.pixel_count();
        let mut out = Vec::with_capacity(expected * self.format.channels());
        codec::decode_into(self.payload(), self.format.channels(), expected, &mut out);
        out
    }
}

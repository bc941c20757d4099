//! Low-level I/O for persisting compressed streams.
//!
//! The core produces bytes; this module is the convenience sink that puts them on
//! disk. Chunks are written in partition order behind the header, so the file is
//! byte-identical to [`crate::CompressedStream::as_bytes`] without requiring the
//! merged copy to exist in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::format::StreamHeader;

/// A buffered writer that appends stream pieces to a file and tracks the offset.
#[derive(Debug)]
pub(crate) struct StreamWriter {
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl StreamWriter {
    /// Creates the output file (truncating it) and writes the dimension header.
    pub fn create(path: &Path, header: StreamHeader) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&header.to_bytes())?;
        Ok(Self {
            writer,
            bytes_written: header.to_bytes().len() as u64,
        })
    }

    /// Appends one chunk.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer.write_all(chunk)?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    /// Flushes buffered bytes to disk and returns the total written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.bytes_written)
    }
}

//! # Parle
//!
//! A parallel run-length codec for raster pixel data.
//!
//! ## Overview
//!
//! Parle compresses an image by splitting its rows into disjoint, row-aligned
//! partitions, encoding each partition into run records on its own worker, and
//! concatenating the per-worker chunks deterministically behind an 8-byte
//! dimension header. The same image and worker count always produce identical
//! bytes, and any worker count decodes back to identical pixels.
//!
//! ### Key Properties
//!
//! *   **Fork-join parallelism:** One worker per partition inside a rayon scope;
//!     the scope is the only synchronization barrier in a job.
//! *   **Lock-free progress:** Each worker publishes cumulative counters to its own
//!     atomic [`ProgressEntry`]; observers poll without any mutex.
//! *   **Deterministic merge:** Chunks are concatenated in partition order, never
//!     completion order, so scheduling and timing cannot change the output.
//! *   **Recoverable decode:** Truncated or malformed payloads decode to a short
//!     buffer instead of panicking; completeness is checked by the caller or by
//!     [`Parle::verify`].
//!
//! ## Usage
//!
//! ```rust
//! use parle::{Parle, PixelBuffer, PixelFormat};
//!
//! # fn main() -> parle::Result<()> {
//! let pixels = vec![0u8; 64 * 64 * 3];
//! let image = PixelBuffer::new(64, 64, PixelFormat::Rgb, &pixels)?;
//!
//! let stream = Parle::compress(&image, 4)?;
//! assert!(Parle::verify(&image, &stream));
//!
//! let decoded = Parle::decompress(&stream)?;
//! assert_eq!(decoded, pixels);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! The input [`PixelBuffer`] is a read-only borrow shared by every worker with no
//! synchronization, which is safe because nothing mutates it during the job. Each worker's
//! output chunk and progress entry are exclusively owned by that worker until the
//! join barrier, after which ownership passes to the merger (handoff after
//! barrier, not lock-protected sharing). The only shared mutable state is the
//! array of progress atomics, single-writer by construction.
//!
//! There is no cancellation and no timeout: once forked, a job runs to
//! completion. Allocation failure while growing a chunk aborts the process; there
//! is no partial-compression path.
//!
//! ### Safety and Error Handling
//!
//! * **No Panics:** No `unwrap()` or `panic!()` calls in the library (enforced by
//!   clippy lints).
//! * **Encapsulated Unsafe:** `unsafe` appears only in the `reader` module for the
//!   memory map.
//! * **Comprehensive Errors:** All failures correspond to a [`ParleError`] type.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod codec;
pub mod error;
pub mod format;
pub mod partition;
pub mod pixel;
pub mod progress;
pub mod reader;

// --- INTERNAL IMPLEMENTATION MODULES ---
#[doc(hidden)]
pub mod executor;
#[doc(hidden)]
pub mod io;

mod verify;

// --- RE-EXPORTS ---

pub use api::Parle;
pub use error::{ParleError, Result};
pub use executor::{JobReport, WorkerMetrics};
pub use format::{CompressedStream, StreamHeader, STREAM_HEADER_SIZE};
pub use partition::{partition, partition_count, Partition};
pub use pixel::{PixelBuffer, PixelFormat};
pub use progress::{ProgressEntry, ProgressTracker};
pub use reader::ParleReader;
pub use verify::verify;

/// Constants used throughout the library.
pub mod constants {
    /// Maximum pixels one run record can cover (the count is a single byte).
    pub const MAX_RUN_LEN: usize = 255;

    /// Extra capacity added to each worker's initial chunk estimate so tiny
    /// partitions don't reallocate immediately.
    pub const CHUNK_SLACK: usize = 256;
}

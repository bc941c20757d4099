//! Centralized error handling for Parle.
//!
//! This module provides a robust error handling system that strictly avoids panics,
//! ensuring that all failure conditions are properly propagated through the `Result` type.
//!
//! ## Design Philosophy
//!
//! 1. **No Panics:** All error conditions are represented as `Result` values. The library
//!    enforces this through `#![deny(clippy::panic)]` and `#![deny(clippy::unwrap_used)]`.
//!
//! 2. **Recoverable decode:** A truncated or malformed compressed payload is *not* an
//!    error at the kernel level: decoding stops early and the caller checks the
//!    produced length. Only the high-level entry points ([`crate::Parle::decompress`],
//!    [`crate::ParleReader::decode`]) convert a length mismatch into
//!    [`ParleError::Format`].
//!
//! 3. **Fatal allocation:** Growth failure of a worker's output buffer aborts the
//!    process (standard `Vec` behavior). There is no partial-compression path, so no
//!    error variant exists for it.
//!
//! 4. **Cloneable Errors:** [`ParleError`] is `Clone`, allowing errors to be shared
//!    across worker threads or stored for later analysis.
//!
//! ## Error Categories
//!
//! - **I/O Errors** ([`ParleError::Io`]): container file reads and writes
//! - **Format Errors** ([`ParleError::Format`]): invalid stream layout or corruption
//! - **Internal Errors** ([`ParleError::Internal`]): logic errors (should not occur)

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for Parle operations.
///
/// ```rust
/// use parle::Result;
///
/// fn my_function() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ParleError>;

/// The master error enum covering all failure domains in Parle.
///
/// ## Variants
///
/// - **Io:** Low-level I/O failures (file not found, permission denied, disk full, etc.)
/// - **Format:** Stream validation failures (short header, truncated payload, dimension
///   mismatch between a pixel buffer and the data handed to it)
/// - **Internal:** Logic errors in the library (please report as bugs)
///
/// ## Cloneability
///
/// This type is `Clone` to support error sharing across threads. I/O errors are
/// wrapped in `Arc` to make cloning efficient.
#[derive(Debug, Clone)]
pub enum ParleError {
    /// Low-level I/O failure while writing or memory-mapping a container file.
    ///
    /// The underlying `io::Error` is wrapped in an `Arc` to make the error `Clone`.
    Io(Arc<io::Error>),

    /// The stream or buffer layout is invalid, corrupted, or inconsistent.
    ///
    /// Raised for:
    ///
    /// - A container smaller than the 8-byte header
    /// - A decoded pixel count that does not match the header dimensions
    /// - A pixel slice whose length disagrees with `width * height * channels`
    Format(String),

    /// Logic error in the scheduler or other internal components.
    ///
    /// This error should not occur in production. If you encounter it, it likely
    /// indicates a bug in the library (a worker slot left unfilled after the join
    /// barrier, an out-of-range progress entry).
    Internal(String),
}

impl fmt::Display for ParleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O Error: {e}"),
            Self::Format(s) => write!(f, "Format Error: {s}"),
            Self::Internal(s) => write!(f, "Internal Logic Error: {s}"),
        }
    }
}

impl std::error::Error for ParleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParleError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

//! Decode-and-compare validation of a compressed stream.

use crate::format::CompressedStream;
use crate::pixel::PixelBuffer;

/// Returns true iff `stream` decompresses to exactly the bytes of `original`.
///
/// The check is strict: the decoded length must equal the original length (a
/// truncated payload that happens to match as a prefix still fails), every byte
/// must match, and the header dimensions and channel format must agree with the
/// buffer's. Intended for testing and validation; production decoding does not
/// need it.
pub fn verify(original: &PixelBuffer<'_>, stream: &CompressedStream) -> bool {
    if stream.width() != original.width()
        || stream.height() != original.height()
        || stream.format() != original.format()
    {
        return false;
    }

    let decoded = stream.decode_pixels();
    decoded.len() == original.raw_size() && decoded == original.data()
}

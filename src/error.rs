use thiserror::Error;

/// Errors reported for call-site misuse or tool I/O.
///
/// A symbol that cannot be found or decoded is not an error: the decode
/// functions return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The pixel buffer does not hold `width * height` RGBA pixels
    #[error("malformed pixel data: expected {expected} bytes, got {actual}")]
    MalformedInput {
        /// `width * height * 4`
        expected: usize,
        /// Length of the buffer passed in
        actual: usize,
    },
    /// Width or height is zero, or their product overflows
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Image file could not be opened or decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// A background decode ended without reporting a result
    #[error("decode worker exited without a result")]
    WorkerLost,
    /// Filesystem or stream failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that `pixels` is an RGBA buffer of the given size
pub(crate) fn check_rgba_len(pixels: usize, width: usize, height: usize) -> Result<(), DecodeError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .filter(|&n| n > 0)
        .ok_or(DecodeError::InvalidDimensions { width, height })?;
    if pixels != expected {
        return Err(DecodeError::MalformedInput {
            expected,
            actual: pixels,
        });
    }
    Ok(())
}

/// Main QR code decoder - wires everything together
use crate::models::{BitMatrix, DecodedQr};

mod matrix_decode;

/// Decodes sampled module matrices
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a `dimension x dimension` module matrix (dark = true).
    ///
    /// When the matrix as sampled does not decode, its transpose is tried
    /// once; a result from the transpose has `mirrored` set.
    pub fn decode(matrix: &BitMatrix) -> Option<DecodedQr> {
        if let Some(decoded) = matrix_decode::decode_matrix(matrix) {
            return Some(decoded);
        }

        log::debug!("matrix did not decode, retrying transposed");
        let mut decoded = matrix_decode::decode_matrix(&matrix.transposed())?;
        decoded.mirrored = true;
        Some(decoded)
    }
}

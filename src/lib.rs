//! QR code scanning from raw RGBA pixels.
//!
//! The image is converted to luminance, binarized per 8x8 region, searched
//! for finder and alignment patterns, sampled through a perspective
//! transform and decoded with Reed-Solomon correction. Every stage returns
//! `None` on failure and the driver moves on to the next hypothesis.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decode options and environment overrides
pub mod config;
/// QR code decoding modules (error correction, format extraction, data modes)
pub mod decoder;
/// QR code detection modules (finder patterns, alignment, sampling)
pub mod detector;
/// Call-site error type
pub mod error;
/// Core data structures (QRCode, BitMatrix, Point, etc.)
pub mod models;
/// Locate, extract and decode driver
pub mod pipeline;
/// Frame dispatch with stale-result dropping
pub mod scanner;
/// Image loading helpers for the command line tool
pub mod tools;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use config::{DecodeOptions, GrayscaleWeights, InversionAttempts};
pub use error::DecodeError;
pub use models::{
    BitMatrix, Chunk, CodeLocation, DecodedQr, ECLevel, EciAssignment, Frame, MaskPattern, Point,
    QRCode,
};
pub use scanner::FrameScanner;

use rayon::prelude::*;
use utils::binarization::{binarize, binarize_owned};

/// Find and decode a QR code in an RGBA image.
///
/// # Arguments
/// * `pixels` - Raw RGBA bytes (4 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `options` - Inversion policy and grayscale weights
///
/// # Returns
/// `Ok(None)` when no symbol decodes, an error only when the buffer does
/// not match the dimensions.
pub fn decode_image(
    pixels: &[u8],
    width: usize,
    height: usize,
    options: &DecodeOptions,
) -> Result<Option<QRCode>, DecodeError> {
    let grids = binarize(
        pixels,
        width,
        height,
        options.inversion_attempts.needs_inverted(),
        &options.grayscale_weights,
    )?;
    Ok(pipeline::run(&grids, options.inversion_attempts))
}

/// Like [`decode_image`], taking ownership of the buffer. With
/// `can_overwrite_image` set the buffer is reused for the luminance plane.
pub fn decode_image_owned(
    pixels: Vec<u8>,
    width: usize,
    height: usize,
    options: &DecodeOptions,
) -> Result<Option<QRCode>, DecodeError> {
    if !options.can_overwrite_image {
        return decode_image(&pixels, width, height, options);
    }
    let grids = binarize_owned(
        pixels,
        width,
        height,
        options.inversion_attempts.needs_inverted(),
        &options.grayscale_weights,
    )?;
    Ok(pipeline::run(&grids, options.inversion_attempts))
}

/// Decode independent frames in parallel; results keep the input order
pub fn decode_batch(
    frames: &[Frame],
    options: &DecodeOptions,
) -> Vec<Result<Option<QRCode>, DecodeError>> {
    frames
        .par_iter()
        .map(|frame| decode_image(&frame.pixels, frame.width, frame.height, options))
        .collect()
}

/// Decoder holding a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Create a decoder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given options
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Options this decoder uses
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode an RGBA image
    pub fn decode(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Option<QRCode>, DecodeError> {
        decode_image(pixels, width, height, &self.options)
    }

    /// Decode several RGBA frames in parallel
    pub fn decode_batch(&self, frames: &[Frame]) -> Vec<Result<Option<QRCode>, DecodeError>> {
        decode_batch(frames, &self.options)
    }
}

//! Utility functions for image processing
//!
//! This module provides helper functions for QR code detection:
//! - Grayscale conversion (RGBA to luminance)
//! - Binarization (8x8 region thresholds averaged over 5x5 neighbourhoods)
//! - Geometry (perspective transforms, rounding)

/// Regional thresholding into bit matrices
pub mod binarization;
/// Perspective transforms and rounding
pub mod geometry;
/// RGBA to luminance
pub mod grayscale;

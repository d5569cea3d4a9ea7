//! RGBA to luminance conversion with configurable weights.
//!
//! Values are stored the way a clamped byte buffer stores them: the float
//! path rounds half to even and clamps to 0..=255, the integer path computes
//! `(r*wr + g*wg + b*wb + 128) >> 8` and clamps.

use crate::config::{GrayscaleWeights, parallel_min_pixels};
use rayon::prelude::*;

/// Luminance of a single pixel
#[inline]
pub fn luminance(r: u8, g: u8, b: u8, weights: &GrayscaleWeights) -> u8 {
    let sum = weights.red * r as f64 + weights.green * g as f64 + weights.blue * b as f64;
    if weights.use_integer_approximation {
        let shifted = ((sum + 128.0).trunc() as i64) >> 8;
        shifted.clamp(0, 255) as u8
    } else if sum.is_nan() {
        0
    } else {
        sum.clamp(0.0, 255.0).round_ties_even() as u8
    }
}

fn convert_row(rgba_row: &[u8], gray_row: &mut [u8], weights: &GrayscaleWeights) {
    for (px, out) in rgba_row.chunks_exact(4).zip(gray_row.iter_mut()) {
        *out = luminance(px[0], px[1], px[2], weights);
    }
}

/// Convert an RGBA buffer to a `width * height` luminance plane.
///
/// Large images are processed row-parallel on the rayon pool; the output
/// does not depend on which path runs.
pub fn rgba_to_grayscale(
    rgba: &[u8],
    width: usize,
    height: usize,
    weights: &GrayscaleWeights,
) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    if width == 0 {
        return gray;
    }

    if pixel_count >= parallel_min_pixels() {
        gray.par_chunks_mut(width)
            .zip(rgba.par_chunks(width * 4))
            .for_each(|(row, src)| convert_row(src, row, weights));
    } else {
        gray.chunks_mut(width)
            .zip(rgba.chunks(width * 4))
            .for_each(|(row, src)| convert_row(src, row, weights));
    }

    gray
}

/// Convert an owned RGBA buffer in place, reusing its allocation for the
/// luminance plane.
pub fn rgba_to_grayscale_in_place(
    mut rgba: Vec<u8>,
    width: usize,
    height: usize,
    weights: &GrayscaleWeights,
) -> Vec<u8> {
    let pixel_count = width * height;
    // Pixel i is read from 4*i >= i, so writing front-to-back never
    // clobbers an unread pixel.
    for i in 0..pixel_count {
        let base = i * 4;
        rgba[i] = luminance(rgba[base], rgba[base + 1], rgba[base + 2], weights);
    }
    rgba.truncate(pixel_count);
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_default_weights() {
        let w = GrayscaleWeights::default();
        assert_eq!(luminance(255, 255, 255, &w), 255);
        assert_eq!(luminance(0, 0, 0, &w), 0);
        // 0.2126 * 255 = 54.21
        assert_eq!(luminance(255, 0, 0, &w), 54);
        // 0.7152 * 255 = 182.376
        assert_eq!(luminance(0, 255, 0, &w), 182);
        // 0.0722 * 255 = 18.411
        assert_eq!(luminance(0, 0, 255, &w), 18);
    }

    #[test]
    fn test_luminance_rounds_half_to_even() {
        let w = GrayscaleWeights {
            red: 0.5,
            green: 0.0,
            blue: 0.0,
            use_integer_approximation: false,
        };
        // 2.5 -> 2, 3.5 -> 4
        assert_eq!(luminance(5, 0, 0, &w), 2);
        assert_eq!(luminance(7, 0, 0, &w), 4);
    }

    #[test]
    fn test_luminance_clamps() {
        let w = GrayscaleWeights {
            red: 2.0,
            green: -1.0,
            blue: 0.0,
            use_integer_approximation: false,
        };
        assert_eq!(luminance(200, 0, 0, &w), 255);
        assert_eq!(luminance(0, 200, 0, &w), 0);
    }

    #[test]
    fn test_luminance_integer_approximation() {
        let w = GrayscaleWeights::INTEGER;
        assert_eq!(luminance(255, 255, 255, &w), 255);
        assert_eq!(luminance(0, 0, 0, &w), 0);
        // (54*100 + 183*100 + 19*100 + 128) >> 8 = 25728 >> 8 = 100
        assert_eq!(luminance(100, 100, 100, &w), 100);
    }

    #[test]
    fn test_rgba_to_grayscale_ignores_alpha() {
        let rgba = vec![255, 255, 255, 0, 0, 0, 0, 255, 255, 0, 0, 128, 0, 255, 0, 255];
        let gray = rgba_to_grayscale(&rgba, 2, 2, &GrayscaleWeights::default());
        assert_eq!(gray, vec![255, 0, 54, 182]);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let mut rgba = Vec::new();
        for i in 0..(13 * 7) {
            rgba.extend_from_slice(&[(i * 7) as u8, (i * 13) as u8, (i * 29) as u8, 255]);
        }
        let weights = GrayscaleWeights::default();
        let copied = rgba_to_grayscale(&rgba, 13, 7, &weights);
        let in_place = rgba_to_grayscale_in_place(rgba, 13, 7, &weights);
        assert_eq!(copied, in_place);
    }
}
